//! Interaction tracking with listener dispatch
//!
//! Owns the chart's interaction state, applies pointer-driven changes and
//! forwards the resulting events to every registered listener.

use forge_core::{ChartEvent, InteractionState, Label};

/// Callback invoked for each emitted chart event
pub type Listener = Box<dyn Fn(&ChartEvent) + Send + Sync>;

/// Handle returned by [`EventDispatcher::subscribe`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

/// Fan-out of chart events to registered listeners, in subscription order
#[derive(Default)]
pub struct EventDispatcher {
    listeners: Vec<(ListenerId, Listener)>,
    next_id: u64,
}

impl EventDispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(
        &mut self,
        listener: impl Fn(&ChartEvent) + Send + Sync + 'static,
    ) -> ListenerId {
        let id = ListenerId(self.next_id);
        self.next_id += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Returns false if the listener was already gone
    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(lid, _)| *lid != id);
        self.listeners.len() != before
    }

    pub fn dispatch(&self, event: &ChartEvent) {
        tracing::debug!("Dispatching {} to {} listeners", event.kind(), self.listeners.len());
        for (_, listener) in &self.listeners {
            listener(event);
        }
    }

    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }
}

impl std::fmt::Debug for EventDispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventDispatcher")
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

/// Interaction state of one chart plus its event listeners
#[derive(Debug, Default)]
pub struct InteractionTracker {
    state: InteractionState,
    dispatcher: EventDispatcher,
}

impl InteractionTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot handed to the builders for the next pass
    pub fn state(&self) -> &InteractionState {
        &self.state
    }

    pub fn dispatcher_mut(&mut self) -> &mut EventDispatcher {
        &mut self.dispatcher
    }

    pub fn subscribe(
        &mut self,
        listener: impl Fn(&ChartEvent) + Send + Sync + 'static,
    ) -> ListenerId {
        self.dispatcher.subscribe(listener)
    }

    /// Activate an entry; returns whether the state changed.
    ///
    /// Activating an entry that is already active is a no-op and emits nothing.
    pub fn activate(&mut self, entry: impl Into<Label>) -> bool {
        let event = self.state.active_entries.activate(entry.into());
        self.emit(event)
    }

    /// Deactivate an entry; absent entries are a no-op and emit nothing
    pub fn deactivate(&mut self, entry: impl Into<Label>) -> bool {
        let event = self.state.active_entries.deactivate(entry.into());
        self.emit(event)
    }

    /// Click on a primitive
    pub fn select(&self, name: impl Into<Label>, value: f64) {
        self.dispatcher.dispatch(&ChartEvent::Select {
            name: name.into(),
            value,
        });
    }

    /// Forward an event produced by a primitive's own hover handling
    pub fn emit(&self, event: Option<ChartEvent>) -> bool {
        match event {
            Some(event) => {
                self.dispatcher.dispatch(&event);
                true
            }
            None => false,
        }
    }

    pub fn set_emphasized(&mut self, value: Option<Label>) {
        self.state.emphasized = value;
    }

    pub fn clear(&mut self) {
        let entries: Vec<Label> = self.state.active_entries.iter().cloned().collect();
        for entry in entries {
            self.deactivate(entry);
        }
        self.state.emphasized = None;
    }
}
