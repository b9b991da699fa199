//! Trellis Navigation
//!
//! Tabbed navigation: a `Nav` owns the items and the active id, a
//! `NavOutlet` renders one pane per mountable item and hands off
//! between panes with a fade-out / fade-in sequence:
//!
//! ```text
//! nav change → render → fade out active pane
//!            → swap active pane → render → hidden(previous)
//!            → add .active → fade in → shown(next)
//! ```

mod config;
mod error;
mod event;
mod item;
mod nav;
mod outlet;
mod pane;
mod stream;
mod transition;

pub use config::{Keyboard, NavConfig, Orientation, Roles};
pub use error::NavError;
pub use event::{EventEmitter, ListenerId};
pub use item::{NavItem, NavItemConfig};
pub use nav::{Nav, NavChangeEvent, NavKey};
pub use outlet::{NavOutlet, Phase};
pub use pane::{Pane, PaneRegistry};
pub use stream::{ChangeStream, Changes, Subscription};
pub use transition::{FadeIn, FadeOut};

pub type Result<T> = std::result::Result<T, NavError>;
