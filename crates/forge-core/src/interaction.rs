//! Interaction state: active entries, emphasized value and emitted events

use crate::Label;
use serde::{Deserialize, Serialize};

// ============================================================================
// ACTIVE ENTRY SET
// ============================================================================

/// Ordered, duplicate-free set of highlighted entries (labels or series names).
///
/// The most recent activation sits at the front.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ActiveEntrySet(Vec<Label>);

impl ActiveEntrySet {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn contains(&self, entry: &Label) -> bool {
        self.0.iter().any(|e| e == entry)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Label> {
        self.0.iter()
    }

    pub fn as_slice(&self) -> &[Label] {
        &self.0
    }

    /// New set with `entry` at the front, or `None` if it is already active
    pub fn with_activated(&self, entry: Label) -> Option<Self> {
        if self.contains(&entry) {
            return None;
        }
        let mut entries = Vec::with_capacity(self.0.len() + 1);
        entries.push(entry);
        entries.extend(self.0.iter().cloned());
        Some(Self(entries))
    }

    /// New set without the first occurrence of `entry`, or `None` if it is not active
    pub fn with_deactivated(&self, entry: &Label) -> Option<Self> {
        let idx = self.0.iter().position(|e| e == entry)?;
        let mut entries = self.0.clone();
        entries.remove(idx);
        Some(Self(entries))
    }

    /// Activate in place; returns the event to emit, nothing on a duplicate
    pub fn activate(&mut self, entry: Label) -> Option<ChartEvent> {
        let next = self.with_activated(entry.clone())?;
        *self = next;
        Some(ChartEvent::Activate {
            value: entry,
            entries: self.clone(),
        })
    }

    /// Deactivate in place; returns the event to emit, nothing if the entry was not active
    pub fn deactivate(&mut self, entry: Label) -> Option<ChartEvent> {
        let next = self.with_deactivated(&entry)?;
        *self = next;
        Some(ChartEvent::Deactivate {
            value: entry,
            entries: self.clone(),
        })
    }
}

impl FromIterator<Label> for ActiveEntrySet {
    fn from_iter<I: IntoIterator<Item = Label>>(iter: I) -> Self {
        let mut set = Self::new();
        for entry in iter {
            if !set.contains(&entry) {
                set.0.push(entry);
            }
        }
        set
    }
}

// ============================================================================
// INTERACTION STATE
// ============================================================================

/// Read-only interaction snapshot handed to builders for one pass
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InteractionState {
    #[serde(default)]
    pub active_entries: ActiveEntrySet,
    /// Externally emphasized value (e.g. the hovered x position of a line chart)
    #[serde(default)]
    pub emphasized: Option<Label>,
}

impl InteractionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_active(mut self, entries: ActiveEntrySet) -> Self {
        self.active_entries = entries;
        self
    }

    pub fn with_emphasized(mut self, value: impl Into<Label>) -> Self {
        self.emphasized = Some(value.into());
        self
    }

    pub fn is_active(&self, entry: &Label) -> bool {
        self.active_entries.contains(entry)
    }

    /// Whether `label` matches the emphasized value by display string
    pub fn is_emphasized(&self, label: &Label) -> bool {
        self.emphasized
            .as_ref()
            .is_some_and(|e| e.to_string() == label.to_string())
    }
}

// ============================================================================
// EVENTS
// ============================================================================

/// Events emitted toward the host
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "lowercase")]
pub enum ChartEvent {
    Select { name: Label, value: f64 },
    Activate { value: Label, entries: ActiveEntrySet },
    Deactivate { value: Label, entries: ActiveEntrySet },
}

impl ChartEvent {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Select { .. } => "select",
            Self::Activate { .. } => "activate",
            Self::Deactivate { .. } => "deactivate",
        }
    }
}
