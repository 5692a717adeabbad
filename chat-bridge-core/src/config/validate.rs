//! Configuration validation

use crate::error::{Error, Result};

use super::schema::Config;

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];
const LOG_FORMATS: [&str; 2] = ["text", "json"];

/// Validate a resolved configuration, failing closed on bad values
pub fn validate_config(config: &Config) -> Result<()> {
    if config.relay.max_responses == 0 {
        return Err(Error::Config(
            "relay.max_responses must be at least 1".to_string(),
        ));
    }

    if config.relay.throttle.enabled && config.relay.throttle.min_interval_ms == 0 {
        return Err(Error::Config(
            "relay.throttle.min_interval_ms must be positive when the throttle is enabled"
                .to_string(),
        ));
    }

    let level = config.logging.level.to_lowercase();
    if !LOG_LEVELS.contains(&level.as_str()) {
        return Err(Error::Config(format!(
            "unknown logging.level '{}'",
            config.logging.level
        )));
    }

    let format = config.logging.format.to_lowercase();
    if !LOG_FORMATS.contains(&format.as_str()) {
        return Err(Error::Config(format!(
            "unknown logging.format '{}'",
            config.logging.format
        )));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(validate_config(&Config::default()).is_ok());
    }

    #[test]
    fn test_zero_capacity_rejected() {
        let mut config = Config::default();
        config.relay.max_responses = 0;
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_zero_interval_rejected_when_enabled() {
        let mut config = Config::default();
        config.relay.throttle.min_interval_ms = 0;
        assert!(validate_config(&config).is_err());

        config.relay.throttle.enabled = false;
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_bad_log_level_rejected() {
        let mut config = Config::default();
        config.logging.level = "verbose".to_string();
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_bad_log_format_rejected() {
        let mut config = Config::default();
        config.logging.format = "xml".to_string();
        assert!(validate_config(&config).is_err());
    }
}
