use chrono::{Duration, NaiveDateTime};

use crate::models::appointment::Appointment;
use crate::models::appointment_type::{AppointmentType, TypeRegistry};
use crate::models::availability::AvailabilityResult;

/// Instant at which a booking releases its device (inclusive).
pub fn occupancy_end(start: NaiveDateTime, restriction_hours: u32) -> NaiveDateTime {
    start + Duration::hours(i64::from(restriction_hours))
}

/// Decides whether a device from `candidate`'s pool is free at `start`.
///
/// Every appointment whose type shares the candidate's device group and whose
/// occupancy interval `[start, start + restriction_hours]` contains `start`
/// holds one device. Both interval ends are inclusive: a device is still in
/// use at the exact release instant.
pub fn evaluate(
    registry: &TypeRegistry,
    existing: &[Appointment],
    candidate: &AppointmentType,
    start: NaiveDateTime,
) -> AvailabilityResult {
    let Some((group, _)) = candidate.device_constraint() else {
        return AvailabilityResult::unconstrained();
    };

    let conflicts: Vec<(NaiveDateTime, &Appointment)> = existing
        .iter()
        .filter_map(|apt| {
            let (apt_group, hours) = registry.find(&apt.appointment_type)?.device_constraint()?;
            (apt_group == group).then(|| (occupancy_end(apt.start, hours), apt))
        })
        .filter(|(release, apt)| apt.start <= start && start <= *release)
        .collect();

    let in_use_count = conflicts.len();
    let remaining_devices = i64::from(registry.device_pool_size()) - in_use_count as i64;
    let available = remaining_devices > 0;

    let first_release = conflicts.iter().map(|(release, _)| *release).min();
    let next_available_date = if available { None } else { first_release };
    let restriction_end = conflicts.iter().map(|(release, _)| *release).max();

    AvailabilityResult {
        available,
        next_available_date,
        in_use_count,
        remaining_devices,
        restriction_end,
        conflicting_appointments: conflicts.into_iter().map(|(_, apt)| apt.clone()).collect(),
    }
}
