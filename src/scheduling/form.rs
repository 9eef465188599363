use chrono::NaiveDateTime;
use serde::Serialize;
use uuid::Uuid;

use crate::error::SchedulerError;
use crate::models::appointment::{Appointment, DEFAULT_DURATION_MINUTES, end_for, validate_duration};
use crate::models::appointment_type::{AppointmentType, TypeRegistry};
use crate::models::availability::AvailabilityResult;
use crate::scheduling::evaluator::{evaluate, occupancy_end};

const DATE_FORMAT: &str = "%d/%m/%Y alle %H:%M";
const DATE_UNAVAILABLE: &str = "data non disponibile";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum FormMode {
    Create,
    Edit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum WarningLevel {
    Info,
    Warning,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AvailabilityWarning {
    pub level: WarningLevel,
    pub message: String,
}

/// Booking being edited. `appointment_type` stays empty until chosen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Draft {
    pub id: Uuid,
    pub appointment_type: Option<String>,
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
    pub duration: u32,
    pub patient_name: String,
    pub phone_number: String,
}

/// State of one open booking form.
///
/// Every edit that can change the verdict recomputes `can_proceed` before it
/// returns, so `submit` only ever reads a fresh flag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FormController {
    mode: FormMode,
    draft: Draft,
    warning: Option<AvailabilityWarning>,
    can_proceed: bool,
}

impl FormController {
    /// Blank form for an empty calendar slot.
    pub fn for_slot(start: NaiveDateTime, end: NaiveDateTime) -> Self {
        Self {
            mode: FormMode::Create,
            draft: Draft {
                id: Uuid::new_v4(),
                appointment_type: None,
                start,
                end,
                duration: DEFAULT_DURATION_MINUTES,
                patient_name: String::new(),
                phone_number: String::new(),
            },
            warning: None,
            can_proceed: true,
        }
    }

    /// Form populated from an existing booking.
    pub fn for_appointment(appointment: &Appointment) -> Self {
        Self {
            mode: FormMode::Edit,
            draft: Draft {
                id: appointment.id,
                appointment_type: Some(appointment.appointment_type.clone()),
                start: appointment.start,
                end: appointment.end,
                duration: appointment.duration,
                patient_name: appointment.patient_name.clone(),
                phone_number: appointment.phone_number.clone(),
            },
            warning: None,
            can_proceed: true,
        }
    }

    pub fn id(&self) -> Uuid {
        self.draft.id
    }

    pub fn mode(&self) -> FormMode {
        self.mode
    }

    pub fn draft(&self) -> &Draft {
        &self.draft
    }

    pub fn warning(&self) -> Option<&AvailabilityWarning> {
        self.warning.as_ref()
    }

    pub fn can_proceed(&self) -> bool {
        self.can_proceed
    }

    /// Picks the service type. Resets the duration to the type's default.
    pub fn select_type(
        &mut self,
        registry: &TypeRegistry,
        existing: &[Appointment],
        type_id: &str,
    ) -> Result<(), SchedulerError> {
        let kind = registry.get(type_id)?;

        self.draft.appointment_type = Some(kind.id.clone());
        self.draft.duration = kind.default_duration;
        self.draft.end = end_for(self.draft.start, self.draft.duration);

        if kind.is_device_constrained() {
            self.check_availability(registry, existing, kind);
        } else {
            self.clear_warning();
        }
        Ok(())
    }

    pub fn change_start(&mut self, registry: &TypeRegistry, existing: &[Appointment], start: NaiveDateTime) {
        self.draft.start = start;
        self.draft.end = end_for(start, self.draft.duration);

        let selected = self.draft.appointment_type.as_deref().and_then(|id| registry.find(id));
        if let Some(kind) = selected.filter(|kind| kind.is_device_constrained()) {
            self.check_availability(registry, existing, kind);
        }
    }

    /// Updates the displayed end only; the verdict is left as it was.
    pub fn change_duration(&mut self, minutes: u32) -> Result<(), SchedulerError> {
        self.draft.duration = validate_duration(minutes)?;
        self.draft.end = end_for(self.draft.start, self.draft.duration);
        Ok(())
    }

    pub fn set_patient_name(&mut self, name: impl Into<String>) {
        self.draft.patient_name = name.into();
    }

    pub fn set_phone_number(&mut self, phone: impl Into<String>) {
        self.draft.phone_number = phone.into();
    }

    /// Re-runs the last availability check against `existing`.
    ///
    /// Forms that never ran a check (unconstrained type, or an edit form whose
    /// type and start were left alone) are untouched.
    pub fn refresh(&mut self, registry: &TypeRegistry, existing: &[Appointment]) {
        if self.warning.is_none() {
            return;
        }
        let selected = self.draft.appointment_type.as_deref().and_then(|id| registry.find(id));
        if let Some(kind) = selected.filter(|kind| kind.is_device_constrained()) {
            self.check_availability(registry, existing, kind);
        }
    }

    /// Produces the booking if the last verdict allows it and the required
    /// fields are filled.
    pub fn submit(&self) -> Result<Appointment, SchedulerError> {
        if !self.can_proceed {
            let message = self
                .warning
                .as_ref()
                .map(|w| w.message.clone())
                .unwrap_or_default();
            return Err(SchedulerError::DeviceUnavailable(message));
        }

        let appointment_type = self
            .draft
            .appointment_type
            .clone()
            .ok_or(SchedulerError::MissingField("appointmentType"))?;
        if self.draft.patient_name.trim().is_empty() {
            return Err(SchedulerError::MissingField("patientName"));
        }
        if self.draft.phone_number.trim().is_empty() {
            return Err(SchedulerError::MissingField("phoneNumber"));
        }

        Ok(Appointment {
            id: self.draft.id,
            appointment_type,
            start: self.draft.start,
            end: self.draft.end,
            duration: self.draft.duration,
            patient_name: self.draft.patient_name.clone(),
            phone_number: self.draft.phone_number.clone(),
        })
    }

    fn check_availability(&mut self, registry: &TypeRegistry, existing: &[Appointment], kind: &AppointmentType) {
        let verdict = evaluate(registry, existing, kind, self.draft.start);
        let warning = warning_for(kind, self.draft.start, &verdict);

        tracing::debug!(
            form = %self.draft.id,
            appointment_type = %kind.id,
            in_use = verdict.in_use_count,
            remaining = verdict.remaining_devices,
            level = ?warning.level,
            "availability checked"
        );

        self.can_proceed = warning.level != WarningLevel::Error;
        self.warning = Some(warning);
    }

    fn clear_warning(&mut self) {
        self.warning = None;
        self.can_proceed = true;
    }
}

fn format_date(date: NaiveDateTime) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// Maps a verdict for a device-constrained type onto the message shown in the form.
pub fn warning_for(kind: &AppointmentType, start: NaiveDateTime, verdict: &AvailabilityResult) -> AvailabilityWarning {
    if !verdict.available {
        let next = verdict
            .next_available_date
            .map(format_date)
            .unwrap_or_else(|| DATE_UNAVAILABLE.to_string());
        AvailabilityWarning {
            level: WarningLevel::Error,
            message: format!(
                "Tutti i dispositivi Holter sono occupati in questa fascia oraria fino al {next}. \
                 Seleziona un'altra data o orario."
            ),
        }
    } else if verdict.remaining_devices == 1 {
        let until = verdict.restriction_end.map(format_date).unwrap_or_default();
        AvailabilityWarning {
            level: WarningLevel::Warning,
            message: format!(
                "Ultimo dispositivo Holter disponibile fino al {until}. \
                 È possibile procedere con la prenotazione."
            ),
        }
    } else {
        let released = occupancy_end(start, kind.restriction_hours.unwrap_or(0));
        AvailabilityWarning {
            level: WarningLevel::Info,
            message: format!("Questo dispositivo sarà occupato fino al {}.", format_date(released)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::appointment_type::TOTAL_HOLTER_DEVICES;

    fn at(s: &str) -> NaiveDateTime {
        NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S").unwrap()
    }

    fn registry() -> TypeRegistry {
        TypeRegistry::clinic(TOTAL_HOLTER_DEVICES).unwrap()
    }

    fn book(registry: &TypeRegistry, existing: &[Appointment], kind: &str, start: &str) -> Appointment {
        let mut form = FormController::for_slot(at(start), end_for(at(start), 30));
        form.select_type(registry, existing, kind).unwrap();
        form.set_patient_name("Paziente");
        form.set_phone_number("0212345678");
        form.submit().unwrap()
    }

    #[test]
    fn blank_form_starts_without_warning() {
        let form = FormController::for_slot(at("2024-01-01T09:00:00"), at("2024-01-01T09:30:00"));
        assert_eq!(form.mode(), FormMode::Create);
        assert!(form.can_proceed());
        assert!(form.warning().is_none());
        assert_eq!(form.draft().duration, 30);
        assert_eq!(form.draft().appointment_type, None);
    }

    #[test]
    fn unconstrained_type_clears_warning() {
        let registry = registry();
        let first = book(&registry, &[], "holter24", "2024-01-01T09:00:00");
        let second = book(&registry, std::slice::from_ref(&first), "holter48", "2024-01-01T09:00:00");
        let existing = vec![first, second];

        let mut form = FormController::for_slot(at("2024-01-01T10:00:00"), at("2024-01-01T10:30:00"));
        form.select_type(&registry, &existing, "holter72").unwrap();
        assert!(!form.can_proceed());

        form.select_type(&registry, &existing, "ecg").unwrap();
        assert!(form.can_proceed());
        assert!(form.warning().is_none());
        assert_eq!(form.draft().duration, 20);
        assert_eq!(form.draft().end, at("2024-01-01T10:20:00"));
    }

    #[test]
    fn free_pool_gives_info_with_own_release() {
        let registry = registry();
        let mut form = FormController::for_slot(at("2024-01-01T09:00:00"), at("2024-01-01T09:30:00"));
        form.select_type(&registry, &[], "holter48").unwrap();

        let warning = form.warning().unwrap();
        assert_eq!(warning.level, WarningLevel::Info);
        assert_eq!(warning.message, "Questo dispositivo sarà occupato fino al 03/01/2024 alle 11:00.");
        assert!(form.can_proceed());
    }

    #[test]
    fn last_device_gives_warning_citing_restriction_end() {
        let registry = registry();
        let existing = vec![book(&registry, &[], "holter24", "2024-01-01T09:00:00")];

        let mut form = FormController::for_slot(at("2024-01-01T10:00:00"), at("2024-01-01T10:30:00"));
        form.select_type(&registry, &existing, "holter48").unwrap();

        let warning = form.warning().unwrap();
        assert_eq!(warning.level, WarningLevel::Warning);
        assert!(warning.message.contains("02/01/2024 alle 11:00"), "{}", warning.message);
        assert!(form.can_proceed());
    }

    #[test]
    fn exhausted_pool_blocks_submission() {
        let registry = registry();
        let first = book(&registry, &[], "holter24", "2024-01-01T09:00:00");
        let second = book(&registry, std::slice::from_ref(&first), "holter48", "2024-01-01T10:00:00");
        let existing = vec![first, second];

        let mut form = FormController::for_slot(at("2024-01-01T11:00:00"), at("2024-01-01T11:30:00"));
        form.select_type(&registry, &existing, "holter72").unwrap();
        form.set_patient_name("Anna");
        form.set_phone_number("3330000000");

        let warning = form.warning().unwrap().clone();
        assert_eq!(warning.level, WarningLevel::Error);
        assert!(warning.message.contains("02/01/2024 alle 11:00"), "{}", warning.message);
        assert!(!form.can_proceed());

        match form.submit() {
            Err(SchedulerError::DeviceUnavailable(message)) => assert_eq!(message, warning.message),
            other => panic!("expected blocked submission, got {other:?}"),
        }
    }

    #[test]
    fn moving_start_past_release_unblocks() {
        let registry = registry();
        let first = book(&registry, &[], "holter24", "2024-01-01T09:00:00");
        let second = book(&registry, std::slice::from_ref(&first), "holter24", "2024-01-01T09:00:00");
        let existing = vec![first, second];

        let mut form = FormController::for_slot(at("2024-01-01T12:00:00"), at("2024-01-01T12:30:00"));
        form.select_type(&registry, &existing, "holter24").unwrap();
        assert!(!form.can_proceed());

        form.change_start(&registry, &existing, at("2024-01-02T11:05:00"));
        assert!(form.can_proceed());
        assert_eq!(form.warning().unwrap().level, WarningLevel::Info);
        assert_eq!(form.draft().end, at("2024-01-02T11:35:00"));
    }

    #[test]
    fn duration_edit_does_not_reevaluate() {
        let registry = registry();
        let first = book(&registry, &[], "holter24", "2024-01-01T09:00:00");
        let mut form = FormController::for_slot(at("2024-01-01T10:00:00"), at("2024-01-01T10:30:00"));
        form.select_type(&registry, std::slice::from_ref(&first), "holter24").unwrap();
        let before = form.warning().cloned();

        form.change_duration(60).unwrap();

        assert_eq!(form.warning().cloned(), before);
        assert_eq!(form.warning().unwrap().level, WarningLevel::Warning);
        assert!(form.can_proceed());
        assert_eq!(form.draft().end, at("2024-01-01T11:00:00"));
    }

    #[test]
    fn refresh_sees_bookings_made_after_the_last_edit() {
        let registry = registry();
        let mut form = FormController::for_slot(at("2024-01-01T09:00:00"), at("2024-01-01T09:30:00"));
        form.select_type(&registry, &[], "holter24").unwrap();
        assert_eq!(form.warning().unwrap().level, WarningLevel::Info);

        let first = book(&registry, &[], "holter24", "2024-01-01T09:00:00");
        let second = book(&registry, std::slice::from_ref(&first), "holter48", "2024-01-01T09:00:00");
        let existing = vec![first, second];

        form.refresh(&registry, &existing);
        assert_eq!(form.warning().unwrap().level, WarningLevel::Error);
        assert!(!form.can_proceed());
        assert!(matches!(form.submit(), Err(SchedulerError::DeviceUnavailable(_))));
    }

    #[test]
    fn refresh_leaves_unchecked_forms_alone() {
        let registry = registry();
        let first = book(&registry, &[], "holter24", "2024-01-01T09:00:00");
        let second = book(&registry, std::slice::from_ref(&first), "holter24", "2024-01-01T09:00:00");
        let existing = vec![first.clone(), second];

        let mut edit = FormController::for_appointment(&first);
        edit.refresh(&registry, &existing);
        assert!(edit.warning().is_none());
        assert!(edit.can_proceed());

        let mut ecg = FormController::for_slot(at("2024-01-01T09:00:00"), at("2024-01-01T09:20:00"));
        ecg.select_type(&registry, &existing, "ecg").unwrap();
        ecg.refresh(&registry, &existing);
        assert!(ecg.warning().is_none());
    }

    #[test]
    fn invalid_duration_is_rejected_and_keeps_draft() {
        let mut form = FormController::for_slot(at("2024-01-01T09:00:00"), at("2024-01-01T09:30:00"));
        assert!(form.change_duration(7).is_err());
        assert!(form.change_duration(125).is_err());
        assert_eq!(form.draft().duration, 30);
    }

    #[test]
    fn unknown_type_is_rejected() {
        let registry = registry();
        let mut form = FormController::for_slot(at("2024-01-01T09:00:00"), at("2024-01-01T09:30:00"));
        assert!(matches!(
            form.select_type(&registry, &[], "mri"),
            Err(SchedulerError::UnknownAppointmentType(_))
        ));
        assert_eq!(form.draft().appointment_type, None);
    }

    #[test]
    fn submit_requires_fields() {
        let registry = registry();
        let mut form = FormController::for_slot(at("2024-01-01T09:00:00"), at("2024-01-01T09:30:00"));
        assert!(matches!(form.submit(), Err(SchedulerError::MissingField("appointmentType"))));

        form.select_type(&registry, &[], "ecg").unwrap();
        form.set_patient_name("   ");
        assert!(matches!(form.submit(), Err(SchedulerError::MissingField("patientName"))));

        form.set_patient_name("Luca Bianchi");
        assert!(matches!(form.submit(), Err(SchedulerError::MissingField("phoneNumber"))));

        form.set_phone_number("3401112233");
        let appointment = form.submit().unwrap();
        assert_eq!(appointment.id, form.id());
        assert_eq!(appointment.duration, 20);
    }

    #[test]
    fn edit_form_copies_the_booking() {
        let registry = registry();
        let saved = book(&registry, &[], "holter72", "2024-03-10T08:00:00");
        let form = FormController::for_appointment(&saved);

        assert_eq!(form.mode(), FormMode::Edit);
        assert_eq!(form.id(), saved.id);
        assert!(form.can_proceed());
        assert_eq!(form.submit().unwrap(), saved);
    }

    #[test]
    fn error_without_release_date_uses_fallback_label() {
        let registry = registry();
        let kind = registry.get("holter24").unwrap();
        let verdict = AvailabilityResult {
            available: false,
            next_available_date: None,
            in_use_count: 2,
            remaining_devices: 0,
            restriction_end: None,
            conflicting_appointments: Vec::new(),
        };

        let warning = warning_for(kind, at("2024-01-01T09:00:00"), &verdict);
        assert_eq!(warning.level, WarningLevel::Error);
        assert!(warning.message.contains("data non disponibile"));
    }
}
