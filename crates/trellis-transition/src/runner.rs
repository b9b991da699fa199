//! Transition runner contract
//!
//! ```text
//! Running
//!   ↓ transitionend / timer          ↓ stop / cancel
//! Completed                         Stopped
//! ```
//!
//! A stopped transition never runs its end-state mutator.

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use crate::element::{Element, ElementKey};

static NEXT_TRANSITION_ID: AtomicU64 = AtomicU64::new(1);

/// A pair of element mutators describing one visual transition
pub trait Transition: Send + Sync {
    /// Apply the start state. `animation` is false when the transition
    /// will complete immediately.
    fn on_start(&self, element: &Element, animation: bool);

    /// Apply the end state once the transition has completed
    fn on_end(&self, _element: &Element) {}

    fn name(&self) -> &'static str {
        "transition"
    }
}

/// What to do when a transition is already running on the same element
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RunningTransition {
    /// Return the handle of the running transition, start nothing new
    Continue,
    /// Stop the running transition and start the new one
    Stop,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransitionOptions {
    pub animation: bool,
    pub running_transition: RunningTransition,
}

impl TransitionOptions {
    pub fn new(animation: bool) -> Self {
        Self {
            animation,
            running_transition: RunningTransition::Stop,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransitionStatus {
    Running,
    Completed,
    Stopped,
}

impl TransitionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransitionStatus::Running => "running",
            TransitionStatus::Completed => "completed",
            TransitionStatus::Stopped => "stopped",
        }
    }
}

impl std::fmt::Display for TransitionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Cancelable completion signal for one started transition
#[derive(Debug, Clone)]
pub struct TransitionHandle {
    id: u64,
    element: ElementKey,
    status: Arc<Mutex<TransitionStatus>>,
}

impl TransitionHandle {
    pub fn new(element: ElementKey) -> Self {
        Self {
            id: NEXT_TRANSITION_ID.fetch_add(1, Ordering::Relaxed),
            element,
            status: Arc::new(Mutex::new(TransitionStatus::Running)),
        }
    }

    /// A handle that has already completed
    pub fn completed(element: ElementKey) -> Self {
        let handle = Self::new(element);
        handle.complete();
        handle
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn element(&self) -> ElementKey {
        self.element
    }

    pub fn status(&self) -> TransitionStatus {
        *self.status.lock()
    }

    pub fn is_running(&self) -> bool {
        self.status() == TransitionStatus::Running
    }

    pub fn is_complete(&self) -> bool {
        self.status() == TransitionStatus::Completed
    }

    pub fn is_stopped(&self) -> bool {
        self.status() == TransitionStatus::Stopped
    }

    /// Stop the transition. Returns false if it had already finished.
    pub fn cancel(&self) -> bool {
        let mut status = self.status.lock();
        if *status == TransitionStatus::Running {
            *status = TransitionStatus::Stopped;
            true
        } else {
            false
        }
    }

    /// Mark the transition as completed. Returns false if it was stopped
    /// or had already completed.
    pub fn complete(&self) -> bool {
        let mut status = self.status.lock();
        if *status == TransitionStatus::Running {
            *status = TransitionStatus::Completed;
            true
        } else {
            false
        }
    }
}

impl PartialEq for TransitionHandle {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for TransitionHandle {}

/// Starts transitions on elements
pub trait TransitionRunner {
    fn run(
        &self,
        element: &Element,
        transition: Arc<dyn Transition>,
        options: &TransitionOptions,
    ) -> TransitionHandle;
}
