//! Appointment scheduling for a clinic with a shared pool of Holter devices.

pub mod cache;
pub mod config;
pub mod error;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod scheduling;
pub mod state;
