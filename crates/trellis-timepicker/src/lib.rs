//! Trellis Timepicker
//!
//! A time-of-day picker split into:
//! - `Time`: hour/minute/second fields with wrap-around arithmetic
//! - `Timepicker`: spinners, meridian mode, text input handling, and
//!   value propagation to the owning form
//! - `TimeAdapter`: conversion between the picker and the form's model type
//! - `TimepickerI18n`: day-period names

mod adapter;
mod config;
mod error;
mod i18n;
mod time;
mod timepicker;
mod util;

pub use adapter::{NaiveTimeAdapter, TimeAdapter, TimeStruct, TimeStructAdapter};
pub use config::{Size, TimepickerConfig};
pub use error::TimeError;
pub use i18n::{DefaultTimepickerI18n, TimepickerI18n};
pub use time::Time;
pub use timepicker::{TimeField, Timepicker};
pub use util::{filter_digits, pad_number, to_integer};

pub type Result<T> = std::result::Result<T, TimeError>;
