use chrono::NaiveDateTime;

use crate::error::SchedulerError;
use crate::models::availability::AvailabilityResult;
use crate::scheduling::evaluator::evaluate;
use crate::state::AppState;

pub async fn check_availability(
    state: &AppState,
    type_id: &str,
    start: NaiveDateTime,
) -> Result<AvailabilityResult, SchedulerError> {
    let kind = state.registry.get(type_id)?;
    let calendar = state.calendar.lock().await;
    let verdict = evaluate(&state.registry, calendar.appointments(), kind, start);

    tracing::debug!(
        appointment_type = type_id,
        %start,
        available = verdict.available,
        remaining = verdict.remaining_devices,
        "availability requested"
    );
    Ok(verdict)
}
