pub mod appointment;
pub mod appointment_type;
pub mod availability;
