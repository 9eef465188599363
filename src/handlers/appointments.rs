use uuid::Uuid;

use crate::error::SchedulerError;
use crate::models::appointment::Appointment;
use crate::scheduling::calendar::CalendarEvent;
use crate::state::AppState;

pub async fn list_events(state: &AppState) -> Vec<CalendarEvent> {
    state.calendar.lock().await.events(&state.registry)
}

pub async fn get_appointment(state: &AppState, id: Uuid) -> Result<Appointment, SchedulerError> {
    state.calendar.lock().await.get(id).cloned()
}

pub async fn delete_appointment(state: &AppState, id: Uuid) -> Result<Appointment, SchedulerError> {
    let removed = state.calendar.lock().await.delete(id)?;
    tracing::info!(appointment = %removed.id, "appointment deleted");
    Ok(removed)
}
