use chrono::NaiveDateTime;
use serde::Serialize;
use uuid::Uuid;

use crate::error::SchedulerError;
use crate::models::appointment::Appointment;
use crate::models::appointment_type::TypeRegistry;
use crate::scheduling::form::{FormController, FormMode};

const FALLBACK_COLOR: &str = "#9CA3AF";

/// Render props for one calendar block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarEvent {
    pub id: Uuid,
    pub title: String,
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
    pub appointment_type: String,
    pub color: String,
}

/// Owner of the session's appointments.
#[derive(Debug, Default, Clone)]
pub struct Calendar {
    appointments: Vec<Appointment>,
}

impl Calendar {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn appointments(&self) -> &[Appointment] {
        &self.appointments
    }

    pub fn get(&self, id: Uuid) -> Result<&Appointment, SchedulerError> {
        self.appointments
            .iter()
            .find(|apt| apt.id == id)
            .ok_or(SchedulerError::AppointmentNotFound(id))
    }

    pub fn create(&mut self, appointment: Appointment) {
        self.appointments.push(appointment);
    }

    pub fn update(&mut self, appointment: Appointment) -> Result<(), SchedulerError> {
        let slot = self
            .appointments
            .iter_mut()
            .find(|apt| apt.id == appointment.id)
            .ok_or(SchedulerError::AppointmentNotFound(appointment.id))?;
        *slot = appointment;
        Ok(())
    }

    pub fn delete(&mut self, id: Uuid) -> Result<Appointment, SchedulerError> {
        let index = self
            .appointments
            .iter()
            .position(|apt| apt.id == id)
            .ok_or(SchedulerError::AppointmentNotFound(id))?;
        Ok(self.appointments.remove(index))
    }

    /// Stores a submitted form: new bookings are appended, edits replace by id.
    pub fn save(&mut self, mode: FormMode, appointment: Appointment) -> Result<(), SchedulerError> {
        match mode {
            FormMode::Create => {
                self.create(appointment);
                Ok(())
            }
            FormMode::Edit => self.update(appointment),
        }
    }

    pub fn open_slot(&self, start: NaiveDateTime, end: NaiveDateTime) -> FormController {
        FormController::for_slot(start, end)
    }

    pub fn open_event(&self, id: Uuid) -> Result<FormController, SchedulerError> {
        self.get(id).map(FormController::for_appointment)
    }

    pub fn events(&self, registry: &TypeRegistry) -> Vec<CalendarEvent> {
        self.appointments
            .iter()
            .map(|apt| {
                let kind = registry.find(&apt.appointment_type);
                let type_name = kind.map_or(apt.appointment_type.as_str(), |k| k.name.as_str());
                CalendarEvent {
                    id: apt.id,
                    title: format!("{} - {} ({})", type_name, apt.patient_name, apt.phone_number),
                    start: apt.start,
                    end: apt.end,
                    appointment_type: apt.appointment_type.clone(),
                    color: kind.map_or_else(|| FALLBACK_COLOR.to_string(), |k| k.color.clone()),
                }
            })
            .collect()
    }
}
