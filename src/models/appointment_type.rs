use std::collections::HashMap;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::error::SchedulerError;
use crate::models::appointment::{MAX_DURATION_MINUTES, MIN_DURATION_MINUTES};

pub const HOLTER_DEVICE_GROUP: &str = "holterCardiac";

/// Number of physical devices shared by every device-grouped type.
pub const TOTAL_HOLTER_DEVICES: u32 = 2;

/// A bookable service offered by the clinic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppointmentType {
    pub id: String,
    pub name: String,
    pub default_duration: u32,
    pub color: String,
    /// Types sharing a group compete for the same devices.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub device_group: Option<String>,
    /// Hours a device stays occupied after the appointment starts.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub restriction_hours: Option<u32>,
}

impl AppointmentType {
    /// Group and restriction window, when this type consumes a device.
    pub fn device_constraint(&self) -> Option<(&str, u32)> {
        match (&self.device_group, self.restriction_hours) {
            (Some(group), Some(hours)) if hours > 0 => Some((group.as_str(), hours)),
            _ => None,
        }
    }

    pub fn is_device_constrained(&self) -> bool {
        self.device_constraint().is_some()
    }
}

fn holter(id: &str, name: &str, color: &str, restriction_hours: u32) -> AppointmentType {
    AppointmentType {
        id: id.to_string(),
        name: name.to_string(),
        default_duration: 30,
        color: color.to_string(),
        device_group: Some(HOLTER_DEVICE_GROUP.to_string()),
        restriction_hours: Some(restriction_hours),
    }
}

fn unconstrained(id: &str, name: &str, color: &str, default_duration: u32) -> AppointmentType {
    AppointmentType {
        id: id.to_string(),
        name: name.to_string(),
        default_duration,
        color: color.to_string(),
        device_group: None,
        restriction_hours: None,
    }
}

pub static CLINIC_APPOINTMENT_TYPES: Lazy<Vec<AppointmentType>> = Lazy::new(|| {
    vec![
        holter("holter24", "Holter Cardiaco 24h", "#93C5FD", 26),
        holter("holter48", "Holter Cardiaco 48h", "#A5B4FC", 50),
        holter("holter72", "Holter Cardiaco 72h", "#C4B5FD", 74),
        unconstrained("holterPress", "Holter Pressorio", "#DDD6FE", 30),
        unconstrained("ecg", "ECG", "#F5D0FE", 20),
    ]
});

/// Appointment types indexed by id, plus the size of the device pool.
///
/// Built once at startup; construction rejects catalogues that would make the
/// availability check ambiguous.
#[derive(Debug, Clone)]
pub struct TypeRegistry {
    ordered: Vec<AppointmentType>,
    by_id: HashMap<String, usize>,
    device_pool_size: u32,
}

impl TypeRegistry {
    pub fn new(types: Vec<AppointmentType>, device_pool_size: u32) -> Result<Self, SchedulerError> {
        if device_pool_size == 0 {
            return Err(SchedulerError::InvalidConfiguration(
                "device pool size must be at least 1".to_string(),
            ));
        }

        let mut by_id = HashMap::with_capacity(types.len());
        for (index, kind) in types.iter().enumerate() {
            if kind.id.trim().is_empty() {
                return Err(SchedulerError::InvalidConfiguration(format!(
                    "appointment type #{index} has an empty id"
                )));
            }
            if by_id.insert(kind.id.clone(), index).is_some() {
                return Err(SchedulerError::InvalidConfiguration(format!(
                    "duplicate appointment type id '{}'",
                    kind.id
                )));
            }
            if kind.device_group.is_some() && kind.restriction_hours.unwrap_or(0) == 0 {
                return Err(SchedulerError::InvalidConfiguration(format!(
                    "appointment type '{}' has a device group but no restriction hours",
                    kind.id
                )));
            }
            if !(MIN_DURATION_MINUTES..=MAX_DURATION_MINUTES).contains(&kind.default_duration) {
                return Err(SchedulerError::InvalidConfiguration(format!(
                    "appointment type '{}' has default duration {} outside {}..={} minutes",
                    kind.id, kind.default_duration, MIN_DURATION_MINUTES, MAX_DURATION_MINUTES
                )));
            }
        }

        Ok(Self {
            ordered: types,
            by_id,
            device_pool_size,
        })
    }

    /// The clinic catalogue with the given pool size.
    pub fn clinic(device_pool_size: u32) -> Result<Self, SchedulerError> {
        Self::new(CLINIC_APPOINTMENT_TYPES.clone(), device_pool_size)
    }

    pub fn get(&self, id: &str) -> Result<&AppointmentType, SchedulerError> {
        self.find(id)
            .ok_or_else(|| SchedulerError::UnknownAppointmentType(id.to_string()))
    }

    pub fn find(&self, id: &str) -> Option<&AppointmentType> {
        self.by_id.get(id).map(|&index| &self.ordered[index])
    }

    /// Types in catalogue order.
    pub fn types(&self) -> &[AppointmentType] {
        &self.ordered
    }

    pub fn device_pool_size(&self) -> u32 {
        self.device_pool_size
    }
}
