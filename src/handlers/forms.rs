use chrono::NaiveDateTime;
use uuid::Uuid;

use crate::error::SchedulerError;
use crate::models::appointment::Appointment;
use crate::models::appointment_type::TypeRegistry;
use crate::scheduling::form::{FormController, FormMode};
use crate::state::AppState;

pub async fn open_slot(
    state: &AppState,
    start: NaiveDateTime,
    end: NaiveDateTime,
) -> Result<FormController, SchedulerError> {
    let form = state.calendar.lock().await.open_slot(start, end);
    state.forms.insert(form.id(), form.clone()).await;
    tracing::debug!(form = %form.id(), %start, "opened blank form");
    Ok(form)
}

pub async fn open_event(state: &AppState, appointment_id: Uuid) -> Result<FormController, SchedulerError> {
    let form = state.calendar.lock().await.open_event(appointment_id)?;
    state.forms.insert(form.id(), form.clone()).await;
    tracing::debug!(form = %form.id(), "opened edit form");
    Ok(form)
}

pub async fn get_form(state: &AppState, id: Uuid) -> Result<FormController, SchedulerError> {
    state.forms.get(&id).await.ok_or(SchedulerError::FormNotFound(id))
}

/// Applies one edit while holding the calendar, so the verdict it computes
/// reflects the appointments as they are right now.
async fn edit<F>(state: &AppState, id: Uuid, apply: F) -> Result<FormController, SchedulerError>
where
    F: FnOnce(&mut FormController, &TypeRegistry, &[Appointment]) -> Result<(), SchedulerError>,
{
    let calendar = state.calendar.lock().await;
    let mut form = get_form(state, id).await?;
    apply(&mut form, state.registry.as_ref(), calendar.appointments())?;
    state.forms.insert(id, form.clone()).await;
    Ok(form)
}

pub async fn select_type(state: &AppState, id: Uuid, type_id: String) -> Result<FormController, SchedulerError> {
    edit(state, id, |form, registry, existing| {
        form.select_type(registry, existing, &type_id)
    })
    .await
}

pub async fn change_start(state: &AppState, id: Uuid, start: NaiveDateTime) -> Result<FormController, SchedulerError> {
    edit(state, id, |form, registry, existing| {
        form.change_start(registry, existing, start);
        Ok(())
    })
    .await
}

pub async fn change_duration(state: &AppState, id: Uuid, minutes: u32) -> Result<FormController, SchedulerError> {
    edit(state, id, |form, _, _| form.change_duration(minutes)).await
}

pub async fn update_patient(
    state: &AppState,
    id: Uuid,
    patient_name: Option<String>,
    phone_number: Option<String>,
) -> Result<FormController, SchedulerError> {
    edit(state, id, |form, _, _| {
        if let Some(name) = patient_name {
            form.set_patient_name(name);
        }
        if let Some(phone) = phone_number {
            form.set_phone_number(phone);
        }
        Ok(())
    })
    .await
}

pub async fn submit(state: &AppState, id: Uuid) -> Result<Appointment, SchedulerError> {
    let mut calendar = state.calendar.lock().await;
    let mut form = get_form(state, id).await?;

    // other forms may have saved since this one was last checked
    form.refresh(&state.registry, calendar.appointments());

    let appointment = match form.submit() {
        Ok(appointment) => appointment,
        Err(e) => {
            if matches!(e, SchedulerError::DeviceUnavailable(_)) {
                tracing::warn!(form = %id, "submission blocked, no device free");
            }
            state.forms.insert(id, form).await;
            return Err(e);
        }
    };

    calendar.save(form.mode(), appointment.clone())?;
    state.forms.invalidate(&id).await;

    tracing::info!(
        appointment = %appointment.id,
        appointment_type = %appointment.appointment_type,
        start = %appointment.start,
        mode = ?form.mode(),
        "appointment saved"
    );
    Ok(appointment)
}

/// Deletes the appointment an edit form was opened for.
pub async fn delete(state: &AppState, id: Uuid) -> Result<Appointment, SchedulerError> {
    let mut calendar = state.calendar.lock().await;
    let form = get_form(state, id).await?;
    if form.mode() != FormMode::Edit {
        return Err(SchedulerError::NotEditing);
    }

    let removed = calendar.delete(form.id())?;
    state.forms.invalidate(&id).await;
    tracing::info!(appointment = %removed.id, "appointment deleted");
    Ok(removed)
}

pub async fn close(state: &AppState, id: Uuid) -> Result<(), SchedulerError> {
    get_form(state, id).await?;
    state.forms.invalidate(&id).await;
    Ok(())
}
