//! # forge-state
//!
//! Interaction state for forge charts.
//! `InteractionTracker` is the plain owner with listener dispatch;
//! `ChartSignals` exposes the same state as Leptos signals so hosts rerun
//! the geometry pass whenever the active set or emphasis changes.

pub mod tracker;

pub use tracker::*;

use forge_core::{ActiveEntrySet, ChartEvent, InteractionState, Label};
use leptos::prelude::*;

// ============================================================================
// CHART SIGNALS
// ============================================================================

/// Reactive interaction state of one chart
#[derive(Clone, Copy)]
pub struct ChartSignals {
    /// Active legend/series entries, most recent first
    pub active_entries: RwSignal<ActiveEntrySet>,
    /// Emphasized value (hovered x position)
    pub emphasized: RwSignal<Option<Label>>,
    /// Last event emitted toward the host
    pub last_event: RwSignal<Option<ChartEvent>>,
}

impl ChartSignals {
    pub fn new() -> Self {
        Self {
            active_entries: RwSignal::new(ActiveEntrySet::new()),
            emphasized: RwSignal::new(None),
            last_event: RwSignal::new(None),
        }
    }

    // ========================================================================
    // Activation
    // ========================================================================

    /// Activate an entry; duplicates leave the signals untouched
    pub fn activate(&self, entry: impl Into<Label>) -> Option<ChartEvent> {
        let entry = entry.into();
        let next = self.active_entries.get_untracked().with_activated(entry.clone())?;
        let event = ChartEvent::Activate {
            value: entry,
            entries: next.clone(),
        };
        Some(self.commit(next, event))
    }

    /// Deactivate an entry; absent entries leave the signals untouched
    pub fn deactivate(&self, entry: impl Into<Label>) -> Option<ChartEvent> {
        let entry = entry.into();
        let next = self.active_entries.get_untracked().with_deactivated(&entry)?;
        let event = ChartEvent::Deactivate {
            value: entry,
            entries: next.clone(),
        };
        Some(self.commit(next, event))
    }

    fn commit(&self, next: ActiveEntrySet, event: ChartEvent) -> ChartEvent {
        self.active_entries.set(next);
        self.last_event.set(Some(event.clone()));
        event
    }

    /// Check if an entry is active (tracked)
    pub fn is_active(&self, entry: &Label) -> bool {
        self.active_entries.with(|entries| entries.contains(entry))
    }

    // ========================================================================
    // Emphasis & Selection
    // ========================================================================

    pub fn set_emphasized(&self, value: Option<Label>) {
        self.emphasized.set(value);
    }

    pub fn select(&self, name: impl Into<Label>, value: f64) {
        self.last_event.set(Some(ChartEvent::Select {
            name: name.into(),
            value,
        }));
    }

    /// Snapshot for the next geometry pass (tracked)
    pub fn snapshot(&self) -> InteractionState {
        InteractionState {
            active_entries: self.active_entries.get(),
            emphasized: self.emphasized.get(),
        }
    }
}

impl Default for ChartSignals {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// CONTEXT HELPERS
// ============================================================================

/// Provide chart signals to the component tree
pub fn provide_chart_signals() -> ChartSignals {
    let signals = ChartSignals::new();
    provide_context(signals);
    tracing::debug!("Chart signals provided");
    signals
}

/// Use chart signals from context
pub fn use_chart_signals() -> ChartSignals {
    expect_context::<ChartSignals>()
}

/// Try to get chart signals from context (returns None if not provided)
pub fn try_use_chart_signals() -> Option<ChartSignals> {
    use_context::<ChartSignals>()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn in_owner(test: impl FnOnce()) {
        Owner::new().with(test);
    }

    #[test]
    fn test_activate_updates_signals() {
        in_owner(|| {
            let signals = ChartSignals::new();

            let event = signals.activate("Germany").unwrap();
            assert!(matches!(event, ChartEvent::Activate { .. }));
            assert!(signals.is_active(&Label::text("Germany")));
            assert_eq!(signals.last_event.get_untracked(), Some(event));
        });
    }

    #[test]
    fn test_duplicate_activate_leaves_signals_untouched() {
        in_owner(|| {
            let signals = ChartSignals::new();
            signals.activate("Germany");
            signals.activate("France");
            let before = signals.last_event.get_untracked();

            assert!(signals.activate("Germany").is_none());
            assert_eq!(
                signals.active_entries.get_untracked().as_slice(),
                &[Label::text("France"), Label::text("Germany")]
            );
            assert_eq!(signals.last_event.get_untracked(), before);
        });
    }

    #[test]
    fn test_deactivate() {
        in_owner(|| {
            let signals = ChartSignals::new();
            assert!(signals.deactivate("Spain").is_none());
            assert_eq!(signals.last_event.get_untracked(), None);

            signals.activate("Spain");
            match signals.deactivate("Spain") {
                Some(ChartEvent::Deactivate { value, entries }) => {
                    assert_eq!(value, Label::text("Spain"));
                    assert!(entries.is_empty());
                }
                other => panic!("expected deactivate, got {:?}", other),
            }
            assert!(!signals.is_active(&Label::text("Spain")));
        });
    }

    #[test]
    fn test_select_and_snapshot() {
        in_owner(|| {
            let signals = ChartSignals::new();
            signals.activate("Q2");
            signals.set_emphasized(Some(Label::text("Q3")));
            signals.select("Q2", 80.0);

            assert_eq!(
                signals.last_event.get_untracked(),
                Some(ChartEvent::Select {
                    name: Label::text("Q2"),
                    value: 80.0,
                })
            );

            let state = signals.snapshot();
            assert!(state.is_active(&Label::text("Q2")));
            assert!(state.is_emphasized(&Label::text("Q3")));
        });
    }

    #[test]
    fn test_context_helpers() {
        in_owner(|| {
            assert!(try_use_chart_signals().is_none());

            let provided = provide_chart_signals();
            provided.activate("a");

            let used = use_chart_signals();
            assert!(used.is_active(&Label::text("a")));
            assert!(try_use_chart_signals().is_some());
        });
    }
}
