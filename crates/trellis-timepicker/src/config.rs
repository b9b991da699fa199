//! Timepicker defaults

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Size {
    Small,
    #[default]
    Medium,
    Large,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimepickerConfig {
    /// 12-hour display with an AM/PM toggle
    pub meridian: bool,
    pub spinners: bool,
    pub seconds: bool,
    pub hour_step: i32,
    pub minute_step: i32,
    pub second_step: i32,
    pub disabled: bool,
    pub readonly_inputs: bool,
    pub size: Size,
}

impl Default for TimepickerConfig {
    fn default() -> Self {
        Self {
            meridian: false,
            spinners: true,
            seconds: false,
            hour_step: 1,
            minute_step: 1,
            second_step: 1,
            disabled: false,
            readonly_inputs: false,
            size: Size::Medium,
        }
    }
}
