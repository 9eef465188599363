use std::sync::Arc;

use tokio::sync::Mutex;

use crate::cache::{FormCache, form_cache};
use crate::config::ServerConfig;
use crate::models::appointment_type::TypeRegistry;
use crate::scheduling::calendar::Calendar;

/// Shared by every handler through `web::Data`.
pub struct AppState {
    pub registry: Arc<TypeRegistry>,
    /// Held across a whole read-evaluate-write step.
    pub calendar: Mutex<Calendar>,
    pub forms: FormCache,
}

impl AppState {
    pub fn new(registry: TypeRegistry, config: &ServerConfig) -> Self {
        Self {
            registry: Arc::new(registry),
            calendar: Mutex::new(Calendar::new()),
            forms: form_cache(config.form_idle),
        }
    }
}
