use chrono::{Duration, NaiveDateTime};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::SchedulerError;

pub const MIN_DURATION_MINUTES: u32 = 5;
pub const MAX_DURATION_MINUTES: u32 = 120;
pub const DURATION_STEP_MINUTES: u32 = 5;

/// Duration given to a blank form before a type is chosen.
pub const DEFAULT_DURATION_MINUTES: u32 = 30;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Appointment {
    pub id: Uuid,
    pub appointment_type: String,
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
    pub duration: u32,
    pub patient_name: String,
    pub phone_number: String,
}

/// Checks an edited duration against the bookable range.
pub fn validate_duration(minutes: u32) -> Result<u32, SchedulerError> {
    let in_range = (MIN_DURATION_MINUTES..=MAX_DURATION_MINUTES).contains(&minutes);
    if in_range && minutes % DURATION_STEP_MINUTES == 0 {
        Ok(minutes)
    } else {
        Err(SchedulerError::InvalidDuration(minutes))
    }
}

pub fn end_for(start: NaiveDateTime, minutes: u32) -> NaiveDateTime {
    start + Duration::minutes(i64::from(minutes))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duration_bounds_and_step() {
        assert_eq!(validate_duration(5).unwrap(), 5);
        assert_eq!(validate_duration(120).unwrap(), 120);
        assert_eq!(validate_duration(45).unwrap(), 45);

        for bad in [0, 3, 7, 125, 240] {
            assert!(matches!(
                validate_duration(bad),
                Err(SchedulerError::InvalidDuration(m)) if m == bad
            ));
        }
    }

    #[test]
    fn end_is_start_plus_minutes() {
        let start = NaiveDateTime::parse_from_str("2024-01-01 23:50", "%Y-%m-%d %H:%M").unwrap();
        let end = end_for(start, 20);
        assert_eq!(end.to_string(), "2024-01-02 00:10:00");
    }
}
