use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use serde::Serialize;
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum SchedulerError {
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    #[error("unknown appointment type '{0}'")]
    UnknownAppointmentType(String),

    #[error("appointment {0} not found")]
    AppointmentNotFound(Uuid),

    #[error("form {0} not found or expired")]
    FormNotFound(Uuid),

    #[error("duration must be between 5 and 120 minutes in steps of 5, got {0}")]
    InvalidDuration(u32),

    #[error("required field '{0}' is missing")]
    MissingField(&'static str),

    /// Submission refused by the last availability verdict.
    #[error("{0}")]
    DeviceUnavailable(String),

    #[error("only an existing appointment can be deleted from its form")]
    NotEditing,
}

#[derive(Debug, Serialize)]
struct ErrorBody<'a> {
    code: &'a str,
    message: String,
}

impl SchedulerError {
    pub fn code(&self) -> &'static str {
        match self {
            SchedulerError::InvalidConfiguration(_) => "INVALID_CONFIGURATION",
            SchedulerError::UnknownAppointmentType(_) => "UNKNOWN_APPOINTMENT_TYPE",
            SchedulerError::AppointmentNotFound(_) => "APPOINTMENT_NOT_FOUND",
            SchedulerError::FormNotFound(_) => "FORM_NOT_FOUND",
            SchedulerError::InvalidDuration(_) => "INVALID_DURATION",
            SchedulerError::MissingField(_) => "MISSING_FIELD",
            SchedulerError::DeviceUnavailable(_) => "DEVICE_UNAVAILABLE",
            SchedulerError::NotEditing => "NOT_EDITING",
        }
    }
}

impl ResponseError for SchedulerError {
    fn status_code(&self) -> StatusCode {
        match self {
            SchedulerError::InvalidConfiguration(_) => StatusCode::INTERNAL_SERVER_ERROR,
            SchedulerError::AppointmentNotFound(_) | SchedulerError::FormNotFound(_) => {
                StatusCode::NOT_FOUND
            }
            SchedulerError::DeviceUnavailable(_) => StatusCode::CONFLICT,
            SchedulerError::UnknownAppointmentType(_)
            | SchedulerError::InvalidDuration(_)
            | SchedulerError::MissingField(_)
            | SchedulerError::NotEditing => StatusCode::BAD_REQUEST,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(ErrorBody {
            code: self.code(),
            message: self.to_string(),
        })
    }
}
