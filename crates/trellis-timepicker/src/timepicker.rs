//! Timepicker component
//!
//! Holds the current `Time` and reports every change to the owning form
//! through the registered callbacks. The form sees its own model type `T`;
//! the `TimeAdapter` converts in both directions.
//!
//! ```text
//! write_value(T) ──► adapter.from_model ──► Time
//!                                            │ spinner / text input
//!                                            ▼
//! on_change(T)   ◄── adapter.to_model   ◄── propagate
//! ```
//!
//! Before the first `write_value` there is no model: spinner and text
//! input operations do nothing to it but still report `None` to the form.

use tracing::debug;

use crate::adapter::{TimeAdapter, TimeStruct};
use crate::config::{Size, TimepickerConfig};
use crate::i18n::{DefaultTimepickerI18n, TimepickerI18n};
use crate::time::Time;
use crate::util::{filter_digits, pad_number, to_integer};

type ChangeCallback<T> = Box<dyn FnMut(Option<T>) + Send>;
type TouchedCallback = Box<dyn FnMut() + Send>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeField {
    Hour,
    Minute,
    Second,
}

pub struct Timepicker<T, A: TimeAdapter<T>> {
    pub meridian: bool,
    pub spinners: bool,
    pub readonly_inputs: bool,
    pub size: Size,
    seconds: bool,
    hour_step: i32,
    minute_step: i32,
    second_step: i32,
    disabled: bool,
    model: Option<Time>,
    adapter: A,
    i18n: Box<dyn TimepickerI18n>,
    on_change: ChangeCallback<T>,
    on_touched: TouchedCallback,
}

impl<T, A: TimeAdapter<T>> Timepicker<T, A> {
    pub fn new(config: &TimepickerConfig, adapter: A) -> Self {
        Self::with_i18n(config, adapter, Box::new(DefaultTimepickerI18n::new()))
    }

    pub fn with_i18n(config: &TimepickerConfig, adapter: A, i18n: Box<dyn TimepickerI18n>) -> Self {
        Self {
            meridian: config.meridian,
            spinners: config.spinners,
            readonly_inputs: config.readonly_inputs,
            size: config.size,
            seconds: config.seconds,
            hour_step: config.hour_step,
            minute_step: config.minute_step,
            second_step: config.second_step,
            disabled: config.disabled,
            model: None,
            adapter,
            i18n,
            on_change: Box::new(|_| {}),
            on_touched: Box::new(|| {}),
        }
    }

    pub fn model(&self) -> Option<&Time> {
        self.model.as_ref()
    }

    pub fn is_disabled(&self) -> bool {
        self.disabled
    }

    pub fn seconds(&self) -> bool {
        self.seconds
    }

    pub fn hour_step(&self) -> i32 {
        self.hour_step
    }

    pub fn minute_step(&self) -> i32 {
        self.minute_step
    }

    pub fn second_step(&self) -> i32 {
        self.second_step
    }

    pub fn set_hour_step(&mut self, step: i32) {
        self.hour_step = step;
    }

    pub fn set_minute_step(&mut self, step: i32) {
        self.minute_step = step;
    }

    pub fn set_second_step(&mut self, step: i32) {
        self.second_step = step;
    }

    /// Load a value from the form. Does not report back.
    pub fn write_value(&mut self, value: Option<&T>) {
        let structure = self.adapter.from_model(value);
        let mut model = match structure {
            Some(s) => Time::new(Some(s.hour), Some(s.minute), s.second),
            None => Time::default(),
        };

        if !self.seconds && structure.and_then(|s| s.second).is_none() {
            model.second = Some(0);
        }

        debug!(time = %model, "Timepicker value written");
        self.model = Some(model);
    }

    pub fn register_on_change(&mut self, f: impl FnMut(Option<T>) + Send + 'static) {
        self.on_change = Box::new(f);
    }

    pub fn register_on_touched(&mut self, f: impl FnMut() + Send + 'static) {
        self.on_touched = Box::new(f);
    }

    pub fn set_disabled_state(&mut self, disabled: bool) {
        self.disabled = disabled;
    }

    pub fn change_hour(&mut self, step: i32) {
        self.shift(TimeField::Hour, i64::from(step));
    }

    pub fn change_minute(&mut self, step: i32) {
        self.shift(TimeField::Minute, i64::from(step));
    }

    pub fn change_second(&mut self, step: i32) {
        self.shift(TimeField::Second, i64::from(step));
    }

    /// Spinner up: one configured step forward
    pub fn step_up(&mut self, field: TimeField) {
        let step = self.step(field);
        self.shift(field, step);
    }

    /// Spinner down: one configured step back
    pub fn step_down(&mut self, field: TimeField) {
        let step = self.step(field);
        self.shift(field, -step);
    }

    /// Text entry for the hour. In meridian mode the entered 1-12 value is
    /// read in the current period.
    pub fn update_hour(&mut self, input: &str) {
        let is_pm = self
            .model
            .and_then(|m| m.hour)
            .is_some_and(|hour| hour >= 12);
        let entered = to_integer(input);

        let hour = match entered {
            Some(h) if self.meridian && ((is_pm && h < 12) || (!is_pm && h == 12)) => Some(h + 12),
            other => other,
        };

        if let Some(model) = self.model.as_mut() {
            model.update_hour(hour);
        }
        self.propagate(true);
    }

    pub fn update_minute(&mut self, input: &str) {
        if let Some(model) = self.model.as_mut() {
            model.update_minute(to_integer(input));
        }
        self.propagate(true);
    }

    pub fn update_second(&mut self, input: &str) {
        if let Some(model) = self.model.as_mut() {
            model.update_second(to_integer(input));
        }
        self.propagate(true);
    }

    pub fn toggle_meridian(&mut self) {
        if self.meridian && self.model.is_some_and(|m| m.hour.is_some()) {
            self.change_hour(12);
        }
    }

    /// Hour as shown in the input: 01-12 in meridian mode, 00-23 otherwise
    pub fn format_hour(&self, value: Option<i32>) -> String {
        let display = value.map(|v| {
            if self.meridian {
                match v % 12 {
                    0 => 12,
                    h => h,
                }
            } else {
                v % 24
            }
        });
        pad_number(display)
    }

    pub fn format_min_sec(&self, value: Option<i32>) -> String {
        pad_number(value)
    }

    /// Sanitize raw text typed into a field
    pub fn filter_input(&self, input: &str) -> String {
        filter_digits(input)
    }

    pub fn handle_blur(&mut self) {
        (self.on_touched)();
    }

    /// Turning seconds off fills in an unset second with 0 and reports
    /// the now-complete value without marking touched.
    pub fn set_seconds(&mut self, seconds: bool) {
        let changed = self.seconds != seconds;
        self.seconds = seconds;

        if !changed || seconds {
            return;
        }
        if let Some(model) = self.model.as_mut() {
            if model.second.is_none() {
                model.second = Some(0);
                self.propagate(false);
            }
        }
    }

    pub fn is_small_size(&self) -> bool {
        self.size == Size::Small
    }

    pub fn is_large_size(&self) -> bool {
        self.size == Size::Large
    }

    /// Period name for the current hour; afternoon from 12:00 on
    pub fn period_label(&self) -> String {
        match self.model.and_then(|m| m.hour) {
            Some(hour) if hour >= 12 => self.i18n.afternoon_period(),
            _ => self.i18n.morning_period(),
        }
    }

    fn step(&self, field: TimeField) -> i64 {
        i64::from(match field {
            TimeField::Hour => self.hour_step,
            TimeField::Minute => self.minute_step,
            TimeField::Second => self.second_step,
        })
    }

    fn shift(&mut self, field: TimeField, step: i64) {
        if let Some(model) = self.model.as_mut() {
            match field {
                TimeField::Hour => model.add_hours(step),
                TimeField::Minute => model.add_minutes(step),
                TimeField::Second => model.add_seconds(step),
            }
        }
        self.propagate(true);
    }

    fn propagate(&mut self, touched: bool) {
        if touched {
            (self.on_touched)();
        }

        let structure = self.model.and_then(|m| {
            if !m.is_valid(self.seconds) {
                return None;
            }
            Some(TimeStruct::new(m.hour?, m.minute?, m.second))
        });

        debug!(valid = structure.is_some(), touched, "Timepicker change propagated");
        let value = self.adapter.to_model(structure);
        (self.on_change)(value);
    }
}
