//! Day-period names

use chrono::NaiveTime;

pub trait TimepickerI18n: Send + Sync {
    /// Name for the period before midday
    fn morning_period(&self) -> String;

    /// Name for the period after midday
    fn afternoon_period(&self) -> String;
}

/// Periods as chrono formats them (`%p`)
#[derive(Debug, Clone)]
pub struct DefaultTimepickerI18n {
    periods: [String; 2],
}

impl DefaultTimepickerI18n {
    pub fn new() -> Self {
        let period = |hour| {
            NaiveTime::from_hms_opt(hour, 0, 0)
                .map(|t| t.format("%p").to_string())
                .unwrap_or_default()
        };

        Self {
            periods: [period(1), period(13)],
        }
    }
}

impl Default for DefaultTimepickerI18n {
    fn default() -> Self {
        Self::new()
    }
}

impl TimepickerI18n for DefaultTimepickerI18n {
    fn morning_period(&self) -> String {
        self.periods[0].clone()
    }

    fn afternoon_period(&self) -> String {
        self.periods[1].clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_periods() {
        let i18n = DefaultTimepickerI18n::new();
        assert_eq!(i18n.morning_period(), "AM");
        assert_eq!(i18n.afternoon_period(), "PM");
    }
}
