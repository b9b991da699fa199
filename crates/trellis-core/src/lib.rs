//! Trellis Core
//!
//! Entry point for hosts embedding Trellis widgets: configuration,
//! logging setup, and `TabSet`, which runs a nav and its pane outlet
//! off a single transition engine.

mod config;
mod error;
mod tabset;

pub use config::Config;
pub use error::CoreError;
pub use tabset::TabSet;

// Re-export widget crates
pub use trellis_nav::{
    Keyboard, Nav, NavChangeEvent, NavConfig, NavError, NavItem, NavItemConfig, NavKey,
    NavOutlet, Orientation, Pane, Phase, Roles,
};
pub use trellis_timepicker::{
    NaiveTimeAdapter, Size, Time, TimeAdapter, TimeError, TimeField, TimeStruct,
    TimeStructAdapter, Timepicker, TimepickerConfig, TimepickerI18n,
};
pub use trellis_transition::{Element, TransitionEngine, TransitionHandle, TransitionStatus};

pub type Result<T> = std::result::Result<T, CoreError>;

/// Initialize logging
pub fn init_logging() {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    fmt().with_env_filter(filter).with_target(true).init();
}

/// Timepicker bound to `chrono::NaiveTime` with the configured defaults
pub fn naive_timepicker(config: &Config) -> Timepicker<chrono::NaiveTime, NaiveTimeAdapter> {
    Timepicker::new(&config.timepicker, NaiveTimeAdapter)
}
