//! Trellis Transitions
//!
//! Headless presentation elements plus the machinery that runs
//! CSS-style transitions on them:
//! - `Element`: class list, attributes, and computed transition timing
//! - `Transition`: start-state mutator and end-state mutator pair
//! - `TransitionRunner`: starts a transition, returns a cancelable handle
//! - `TransitionEngine`: default runner, completed by `transitionend`
//!   events or by a timer derived from the element's transition timing

mod element;
mod engine;
mod runner;

pub use element::{Element, ElementKey};
pub use engine::{TransitionEngine, TRANSITION_TIMER_PADDING};
pub use runner::{
    RunningTransition, Transition, TransitionHandle, TransitionOptions, TransitionRunner,
    TransitionStatus,
};
