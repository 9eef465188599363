//! Booking rules: device availability, the booking form and the calendar
//! that owns the appointments.

pub mod calendar;
pub mod evaluator;
pub mod form;

pub use calendar::{Calendar, CalendarEvent};
pub use evaluator::evaluate;
pub use form::{FormController, FormMode, WarningLevel};
