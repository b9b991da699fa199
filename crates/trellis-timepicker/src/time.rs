//! Time-of-day model
//!
//! Each field may be unset, which is distinct from zero. Stepping wraps
//! around (hour 23 + 1 → 0), and minute/second overflow carries into the
//! next larger field (minute 3 − 5 → 58 and one hour back).

use chrono::{NaiveTime, Timelike};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::TimeError;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Time {
    pub hour: Option<i32>,
    pub minute: Option<i32>,
    pub second: Option<i32>,
}

impl Time {
    pub fn new(hour: Option<i32>, minute: Option<i32>, second: Option<i32>) -> Self {
        Self {
            hour,
            minute,
            second,
        }
    }

    pub fn hms(hour: i32, minute: i32, second: i32) -> Self {
        Self::new(Some(hour), Some(minute), Some(second))
    }

    pub fn change_hour(&mut self, step: i32) {
        self.add_hours(i64::from(step));
    }

    pub fn update_hour(&mut self, hour: Option<i32>) {
        self.hour = hour.map(|h| h.rem_euclid(24));
    }

    pub fn change_minute(&mut self, step: i32) {
        self.add_minutes(i64::from(step));
    }

    pub fn update_minute(&mut self, minute: Option<i32>) {
        match minute {
            Some(minute) => self.set_minutes(i64::from(minute)),
            None => self.minute = None,
        }
    }

    pub fn change_second(&mut self, step: i32) {
        self.add_seconds(i64::from(step));
    }

    pub fn update_second(&mut self, second: Option<i32>) {
        match second {
            Some(second) => self.set_seconds(i64::from(second)),
            None => self.second = None,
        }
    }

    // Steps are widened to i64 so any i32 step, or its negation, fits

    pub(crate) fn add_hours(&mut self, step: i64) {
        let hour = i64::from(self.hour.unwrap_or(0)) + step;
        self.hour = Some(hour.rem_euclid(24) as i32);
    }

    pub(crate) fn add_minutes(&mut self, step: i64) {
        self.set_minutes(i64::from(self.minute.unwrap_or(0)) + step);
    }

    pub(crate) fn add_seconds(&mut self, step: i64) {
        self.set_seconds(i64::from(self.second.unwrap_or(0)) + step);
    }

    fn set_minutes(&mut self, minutes: i64) {
        self.minute = Some(minutes.rem_euclid(60) as i32);
        self.add_hours(minutes.div_euclid(60));
    }

    fn set_seconds(&mut self, seconds: i64) {
        self.second = Some(seconds.rem_euclid(60) as i32);
        self.add_minutes(seconds.div_euclid(60));
    }

    /// Hour and minute set, plus second when `check_seconds`
    pub fn is_valid(&self, check_seconds: bool) -> bool {
        self.hour.is_some() && self.minute.is_some() && (!check_seconds || self.second.is_some())
    }
}

impl fmt::Display for Time {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{}:{}",
            self.hour.unwrap_or(0),
            self.minute.unwrap_or(0),
            self.second.unwrap_or(0)
        )
    }
}

impl From<NaiveTime> for Time {
    fn from(value: NaiveTime) -> Self {
        Self::hms(value.hour() as i32, value.minute() as i32, value.second() as i32)
    }
}

impl TryFrom<Time> for NaiveTime {
    type Error = TimeError;

    /// An unset second converts as 0
    fn try_from(value: Time) -> Result<Self, Self::Error> {
        let (Some(hour), Some(minute)) = (value.hour, value.minute) else {
            return Err(TimeError::Incomplete(value.to_string()));
        };
        let second = value.second.unwrap_or(0);

        let out_of_range = || TimeError::OutOfRange {
            hour,
            minute,
            second,
        };
        let h = u32::try_from(hour).map_err(|_| out_of_range())?;
        let m = u32::try_from(minute).map_err(|_| out_of_range())?;
        let s = u32::try_from(second).map_err(|_| out_of_range())?;

        NaiveTime::from_hms_opt(h, m, s).ok_or_else(out_of_range)
    }
}
