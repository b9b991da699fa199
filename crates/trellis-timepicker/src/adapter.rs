//! Model adapters
//!
//! The picker works on `TimeStruct`; forms may bind any model type that
//! has a `TimeAdapter`.

use chrono::{NaiveTime, Timelike};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeStruct {
    pub hour: i32,
    pub minute: i32,
    #[serde(default)]
    pub second: Option<i32>,
}

impl TimeStruct {
    pub fn new(hour: i32, minute: i32, second: Option<i32>) -> Self {
        Self {
            hour,
            minute,
            second,
        }
    }
}

pub trait TimeAdapter<T> {
    /// Convert the form's value into the picker's structure
    fn from_model(&self, value: Option<&T>) -> Option<TimeStruct>;

    /// Convert the picker's structure into the form's value
    fn to_model(&self, time: Option<TimeStruct>) -> Option<T>;
}

/// Binds `TimeStruct` values as-is
#[derive(Debug, Clone, Copy, Default)]
pub struct TimeStructAdapter;

impl TimeAdapter<TimeStruct> for TimeStructAdapter {
    fn from_model(&self, value: Option<&TimeStruct>) -> Option<TimeStruct> {
        value.copied()
    }

    fn to_model(&self, time: Option<TimeStruct>) -> Option<TimeStruct> {
        time
    }
}

/// Binds `chrono::NaiveTime` values; out-of-range times become `None`
#[derive(Debug, Clone, Copy, Default)]
pub struct NaiveTimeAdapter;

impl TimeAdapter<NaiveTime> for NaiveTimeAdapter {
    fn from_model(&self, value: Option<&NaiveTime>) -> Option<TimeStruct> {
        value.map(|t| TimeStruct::new(t.hour() as i32, t.minute() as i32, Some(t.second() as i32)))
    }

    fn to_model(&self, time: Option<TimeStruct>) -> Option<NaiveTime> {
        let time = time?;
        NaiveTime::from_hms_opt(
            u32::try_from(time.hour).ok()?,
            u32::try_from(time.minute).ok()?,
            u32::try_from(time.second.unwrap_or(0)).ok()?,
        )
    }
}
