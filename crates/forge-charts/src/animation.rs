//! Entrance animation state machine
//!
//! Each primitive starts from a degenerate geometry and transitions to its
//! target form. Transitions are descriptors for the renderer to play; the
//! geometry pipeline never waits on them, and a newer target simply replaces
//! an in-flight one.

use std::collections::{HashMap, HashSet};

use serde::Serialize;

/// Default transition length handed to the renderer
pub const DEFAULT_DURATION_MS: u32 = 500;

/// Per-primitive animation phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AnimationPhase {
    /// Showing the degenerate starting geometry, not yet loaded
    Initial,
    /// Transition toward the target has been scheduled
    Entering,
    /// Displaying the target geometry
    Steady,
}

/// A visual transition for the renderer to play
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Transition<G> {
    pub from: G,
    pub to: G,
    pub duration_ms: u32,
}

impl<G: PartialEq> Transition<G> {
    pub fn is_noop(&self) -> bool {
        self.from == self.to
    }
}

/// Primitives that have a starting and a target geometry
pub trait Animated {
    type Geometry: Clone + PartialEq;

    /// Identity that survives recomputes (series + label)
    fn animation_key(&self) -> String;
    fn starting_geometry(&self) -> Self::Geometry;
    fn target_geometry(&self) -> Self::Geometry;
}

// ============================================================================
// SINGLE PRIMITIVE
// ============================================================================

/// Animation state of one primitive
#[derive(Debug, Clone, PartialEq)]
pub struct EntranceAnimation<G> {
    phase: AnimationPhase,
    start: G,
    displayed: G,
    target: G,
    animate_updates: bool,
    duration_ms: u32,
}

impl<G: Clone + PartialEq> EntranceAnimation<G> {
    pub fn new(start: G, target: G) -> Self {
        Self {
            phase: AnimationPhase::Initial,
            displayed: start.clone(),
            start,
            target,
            animate_updates: false,
            duration_ms: DEFAULT_DURATION_MS,
        }
    }

    pub fn with_update_animation(mut self, animate: bool) -> Self {
        self.animate_updates = animate;
        self
    }

    pub fn with_duration(mut self, ms: u32) -> Self {
        self.duration_ms = ms;
        self
    }

    pub fn phase(&self) -> AnimationPhase {
        self.phase
    }

    pub fn start(&self) -> &G {
        &self.start
    }

    pub fn displayed(&self) -> &G {
        &self.displayed
    }

    pub fn target(&self) -> &G {
        &self.target
    }

    /// First paint
    pub fn load(&mut self) -> Transition<G> {
        self.animate_to_current_form()
    }

    /// Move the displayed geometry to the target.
    ///
    /// Calling it again once there yields a no-op transition and leaves the
    /// phase untouched.
    pub fn animate_to_current_form(&mut self) -> Transition<G> {
        let from = std::mem::replace(&mut self.displayed, self.target.clone());
        if from != self.target {
            self.phase = AnimationPhase::Entering;
        } else if self.phase == AnimationPhase::Initial {
            self.phase = AnimationPhase::Steady;
        }
        tracing::trace!("Entrance animation now {:?}", self.phase);

        Transition {
            from,
            to: self.target.clone(),
            duration_ms: self.duration_ms,
        }
    }

    /// Renderer reports the transition finished
    pub fn finish(&mut self) {
        if self.phase == AnimationPhase::Entering {
            self.phase = AnimationPhase::Steady;
        }
    }

    /// A recompute produced new geometry.
    ///
    /// Re-enters only when update animation is on; otherwise jumps straight to
    /// the new target. Before the first `load` nothing is scheduled.
    pub fn retarget(&mut self, start: G, target: G) -> Option<Transition<G>> {
        self.start = start;
        self.target = target;

        match self.phase {
            AnimationPhase::Initial => {
                self.displayed = self.start.clone();
                None
            }
            _ if self.animate_updates => Some(self.animate_to_current_form()),
            _ => {
                self.displayed = self.target.clone();
                self.phase = AnimationPhase::Steady;
                None
            }
        }
    }
}

// ============================================================================
// CONTROLLER
// ============================================================================

/// Keyed animation states for every primitive of a chart
#[derive(Debug, Clone)]
pub struct EntranceController<G> {
    animations: HashMap<String, EntranceAnimation<G>>,
    animate_updates: bool,
    duration_ms: u32,
}

impl<G: Clone + PartialEq> EntranceController<G> {
    pub fn new(animate_updates: bool) -> Self {
        Self {
            animations: HashMap::new(),
            animate_updates,
            duration_ms: DEFAULT_DURATION_MS,
        }
    }

    pub fn with_duration(mut self, ms: u32) -> Self {
        self.duration_ms = ms;
        self
    }

    /// Apply one recompute pass.
    ///
    /// New keys are loaded (entrance), known keys are retargeted, keys absent
    /// from the pass are dropped. A key repeated within one pass is suffixed
    /// with its occurrence (`B`, `B#1`, ...) so every item keeps its own state.
    /// Returns the transitions to schedule, in input order.
    pub fn sync<I>(&mut self, items: I) -> Vec<(String, Transition<G>)>
    where
        I: IntoIterator<Item = (String, G, G)>,
    {
        let mut seen = HashSet::new();
        let mut transitions = Vec::new();

        for (base, start, target) in items {
            let key = unique_key(&mut seen, base);
            match self.animations.get_mut(&key) {
                Some(animation) => {
                    if let Some(t) = animation.retarget(start, target) {
                        transitions.push((key, t));
                    }
                }
                None => {
                    let mut animation = EntranceAnimation::new(start, target)
                        .with_update_animation(self.animate_updates)
                        .with_duration(self.duration_ms);
                    let t = animation.load();
                    self.animations.insert(key.clone(), animation);
                    transitions.push((key, t));
                }
            }
        }

        self.animations.retain(|key, _| seen.contains(key));
        tracing::trace!(
            "Animation sync: {} tracked, {} transitions",
            self.animations.len(),
            transitions.len()
        );
        transitions
    }

    /// `sync` fed from primitive descriptors
    pub fn sync_animated<'a, T, I>(&mut self, items: I) -> Vec<(String, Transition<G>)>
    where
        T: Animated<Geometry = G> + 'a,
        I: IntoIterator<Item = &'a T>,
    {
        self.sync(
            items
                .into_iter()
                .map(|p| (p.animation_key(), p.starting_geometry(), p.target_geometry())),
        )
    }

    pub fn finish_all(&mut self) {
        self.animations.values_mut().for_each(EntranceAnimation::finish);
    }

    pub fn get(&self, key: &str) -> Option<&EntranceAnimation<G>> {
        self.animations.get(key)
    }

    pub fn len(&self) -> usize {
        self.animations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.animations.is_empty()
    }
}

fn unique_key(seen: &mut HashSet<String>, base: String) -> String {
    if seen.insert(base.clone()) {
        return base;
    }
    let mut occurrence = 1;
    loop {
        let key = format!("{}#{}", base, occurrence);
        if seen.insert(key.clone()) {
            return key;
        }
        occurrence += 1;
    }
}
