//! Default transition runner
//!
//! Keeps at most one running transition per element. A running
//! transition completes when the host reports `transitionend` for its
//! element, or when `tick` passes its deadline (delay + duration + padding).

use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::element::{Element, ElementKey};
use crate::runner::{
    RunningTransition, Transition, TransitionHandle, TransitionOptions, TransitionRunner,
};

/// Extra time allowed past the computed transition time before the
/// fallback timer completes a transition that never reported `transitionend`
pub const TRANSITION_TIMER_PADDING: Duration = Duration::from_millis(5);

struct RunningEntry {
    element: Element,
    transition: Arc<dyn Transition>,
    handle: TransitionHandle,
    deadline: Instant,
}

#[derive(Default)]
pub struct TransitionEngine {
    running: Mutex<HashMap<ElementKey, RunningEntry>>,
}

impl TransitionEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a live transition is running on `element`
    pub fn is_running(&self, element: &Element) -> bool {
        self.running
            .lock()
            .get(&element.key())
            .is_some_and(|entry| entry.handle.is_running())
    }

    pub fn running_count(&self) -> usize {
        self.running
            .lock()
            .values()
            .filter(|entry| entry.handle.is_running())
            .count()
    }

    /// Report a `transitionend` event for `element`
    pub fn transition_end(&self, element: &Element) -> Option<TransitionHandle> {
        let entry = self.running.lock().remove(&element.key())?;
        Self::finish(entry)
    }

    /// Complete every transition whose deadline is at or before `now`
    pub fn tick(&self, now: Instant) -> Vec<TransitionHandle> {
        let due: Vec<RunningEntry> = {
            let mut running = self.running.lock();
            let keys: Vec<ElementKey> = running
                .iter()
                .filter(|(_, entry)| entry.deadline <= now || !entry.handle.is_running())
                .map(|(key, _)| *key)
                .collect();
            keys.iter().filter_map(|key| running.remove(key)).collect()
        };

        due.into_iter().filter_map(Self::finish).collect()
    }

    /// Stop the transition running on `element`, if any
    pub fn stop(&self, element: &Element) -> bool {
        match self.running.lock().remove(&element.key()) {
            Some(entry) => {
                tracing::debug!(
                    element = %element.key(),
                    transition = entry.transition.name(),
                    "Transition stopped"
                );
                entry.handle.cancel()
            }
            None => false,
        }
    }

    /// Stop everything, e.g. on teardown
    pub fn stop_all(&self) {
        let entries: Vec<RunningEntry> = self.running.lock().drain().map(|(_, e)| e).collect();
        for entry in entries {
            entry.handle.cancel();
        }
    }

    fn finish(entry: RunningEntry) -> Option<TransitionHandle> {
        // A stopped transition must not apply its end state
        if !entry.handle.is_running() {
            return None;
        }

        entry.transition.on_end(&entry.element);
        entry.handle.complete();

        tracing::debug!(
            element = %entry.element.key(),
            transition = entry.transition.name(),
            "Transition completed"
        );

        Some(entry.handle)
    }
}

impl TransitionRunner for TransitionEngine {
    fn run(
        &self,
        element: &Element,
        transition: Arc<dyn Transition>,
        options: &TransitionOptions,
    ) -> TransitionHandle {
        let mut running = self.running.lock();

        if let Some(existing) = running.remove(&element.key()) {
            if existing.handle.is_running() {
                match options.running_transition {
                    RunningTransition::Continue => {
                        let handle = existing.handle.clone();
                        running.insert(element.key(), existing);
                        return handle;
                    }
                    RunningTransition::Stop => {
                        tracing::debug!(
                            element = %element.key(),
                            transition = existing.transition.name(),
                            "Stopping running transition"
                        );
                        existing.handle.cancel();
                    }
                }
            }
        }

        let handle = TransitionHandle::new(element.key());
        transition.on_start(element, options.animation);

        let transition_time = element.transition_time();
        if !options.animation || transition_time.is_zero() {
            drop(running);
            transition.on_end(element);
            handle.complete();
            return handle;
        }

        tracing::debug!(
            element = %element.key(),
            transition = transition.name(),
            duration_ms = transition_time.as_millis() as u64,
            "Transition started"
        );

        running.insert(
            element.key(),
            RunningEntry {
                element: element.clone(),
                transition,
                handle: handle.clone(),
                deadline: Instant::now() + transition_time + TRANSITION_TIMER_PADDING,
            },
        );

        handle
    }
}
