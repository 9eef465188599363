use std::env;
use std::str::FromStr;
use std::time::Duration;

use anyhow::{Context, Result, ensure};

use crate::models::appointment_type::TOTAL_HOLTER_DEVICES;

/// Longest a form may sit idle: one week.
const MAX_FORM_IDLE_MINUTES: u64 = 7 * 24 * 60;

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// How long an untouched form stays open.
    pub form_idle: Duration,
    pub device_pool_size: u32,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            form_idle: Duration::from_secs(30 * 60),
            device_pool_size: TOTAL_HOLTER_DEVICES,
        }
    }
}

impl ServerConfig {
    /// Reads `HOST`, `PORT`, `FORM_IDLE_MINUTES` and `DEVICE_POOL_SIZE`.
    pub fn from_env() -> Result<Self> {
        let defaults = Self::default();
        let idle_minutes: u64 = parse_var("FORM_IDLE_MINUTES", 30)?;

        Ok(Self {
            host: env::var("HOST").unwrap_or(defaults.host),
            port: parse_var("PORT", defaults.port)?,
            form_idle: form_idle(idle_minutes).context("FORM_IDLE_MINUTES")?,
            device_pool_size: parse_var("DEVICE_POOL_SIZE", defaults.device_pool_size)?,
        })
    }
}

fn form_idle(minutes: u64) -> Result<Duration> {
    ensure!(
        (1..=MAX_FORM_IDLE_MINUTES).contains(&minutes),
        "form idle time must be between 1 and {MAX_FORM_IDLE_MINUTES} minutes, got {minutes}"
    );
    let secs = minutes.checked_mul(60).context("form idle time overflows")?;
    Ok(Duration::from_secs(secs))
}

fn parse_var<T>(key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse()
            .with_context(|| format!("{key} has an invalid value '{raw}'")),
        Err(_) => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unset_variable_falls_back() {
        let port: u16 = parse_var("CLINIC_SCHEDULER_TEST_UNSET_PORT", 9000).unwrap();
        assert_eq!(port, 9000);
    }

    #[test]
    fn form_idle_rejects_zero_and_huge_values() {
        assert_eq!(form_idle(30).unwrap(), Duration::from_secs(1800));
        assert_eq!(form_idle(MAX_FORM_IDLE_MINUTES).unwrap(), Duration::from_secs(7 * 24 * 3600));

        assert!(form_idle(0).is_err());
        assert!(form_idle(MAX_FORM_IDLE_MINUTES + 1).is_err());
        assert!(form_idle(999_999_999_999).is_err());
        assert!(form_idle(u64::MAX).is_err());
    }

    #[test]
    fn defaults_match_the_clinic() {
        let config = ServerConfig::default();
        assert_eq!(config.device_pool_size, 2);
        assert_eq!(config.form_idle, Duration::from_secs(1800));
    }
}
