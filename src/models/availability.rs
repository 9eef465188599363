use chrono::NaiveDateTime;
use serde::Serialize;

use crate::models::appointment::Appointment;

/// Outcome of a device availability check.
///
/// An unavailable device is a normal verdict, not an error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AvailabilityResult {
    pub available: bool,
    /// Set only when the pool is exhausted: when the first device frees up.
    pub next_available_date: Option<NaiveDateTime>,
    pub in_use_count: usize,
    /// Pool size minus in-use count. Zero for unconstrained types.
    pub remaining_devices: i64,
    /// When the last conflicting booking releases its device.
    pub restriction_end: Option<NaiveDateTime>,
    pub conflicting_appointments: Vec<Appointment>,
}

impl AvailabilityResult {
    pub fn unconstrained() -> Self {
        Self {
            available: true,
            next_available_date: None,
            in_use_count: 0,
            remaining_devices: 0,
            restriction_end: None,
            conflicting_appointments: Vec::new(),
        }
    }
}
