use std::time::Duration;

use moka::future::Cache;
use uuid::Uuid;

use crate::scheduling::form::FormController;

/// Open booking forms, keyed by form id. Forms nobody touches expire.
pub type FormCache = Cache<Uuid, FormController>;

pub fn form_cache(idle: Duration) -> FormCache {
    Cache::builder()
        .max_capacity(256) // one clinic desk rarely has more open
        .time_to_idle(idle)
        .build()
}
