//! Configuration validation utilities.

use std::collections::BTreeMap;

use super::error::{ConfigError, ConfigResult};
use super::schema::{AutorouteConfig, ControllerConfig, LogLevel, LogOutput, LoggingConfig};

/// Validates the entire configuration.
pub fn validate_config(config: &AutorouteConfig) -> ConfigResult<()> {
    validate_logging_config(&config.logging)?;
    for (name, controller) in &config.controllers {
        validate_controller_config(name, controller)?;
    }
    Ok(())
}

/// Validates logging settings.
fn validate_logging_config(logging: &LoggingConfig) -> ConfigResult<()> {
    validate_log_level(&logging.level)?;

    for (module, level) in &logging.filters {
        if module.is_empty() {
            return Err(ConfigError::validation("Log filter module cannot be empty"));
        }
        validate_log_level(level)?;
    }

    if logging.output == LogOutput::File && logging.file_path.is_none() {
        return Err(ConfigError::validation(
            "File log output requires logging.file_path",
        ));
    }

    Ok(())
}

fn validate_log_level(level: &str) -> ConfigResult<()> {
    level.parse::<LogLevel>().map(|_| ()).map_err(|level| {
        let valid: Vec<_> = LogLevel::ALL.iter().map(LogLevel::as_str).collect();
        ConfigError::validation(format!(
            "Invalid log level: {level}. Valid values are: {valid:?}"
        ))
    })
}

/// Validates one controller override.
fn validate_controller_config(name: &str, controller: &ControllerConfig) -> ConfigResult<()> {
    if name.is_empty() {
        return Err(ConfigError::validation("Controller name cannot be empty"));
    }

    if let Some(suffix) = &controller.action_suffix
        && suffix.is_empty()
    {
        return Err(ConfigError::invalid_controller(
            name,
            "action_suffix cannot be empty",
        ));
    }

    if let Some(prefix) = &controller.prefix {
        validate_prefix(name, "prefix", prefix)?;
    }

    if let Some(fixed) = &controller.fixed_prefix {
        validate_prefix(name, "fixed_prefix", fixed)?;
        if fixed.starts_with('/') {
            return Err(ConfigError::invalid_controller(
                name,
                "fixed_prefix must not start with '/'",
            ));
        }
    }

    if let Some(patterns) = &controller.type_patterns {
        validate_patterns(name, "type_patterns", patterns)?;
    }
    if let Some(patterns) = &controller.name_patterns {
        validate_patterns(name, "name_patterns", patterns)?;
    }

    Ok(())
}

fn validate_prefix(controller: &str, field: &str, prefix: &str) -> ConfigResult<()> {
    if prefix.chars().any(char::is_whitespace) {
        return Err(ConfigError::invalid_controller(
            controller,
            format!("{field} cannot contain whitespace"),
        ));
    }
    Ok(())
}

fn validate_patterns(
    controller: &str,
    field: &str,
    patterns: &BTreeMap<String, String>,
) -> ConfigResult<()> {
    for (key, pattern) in patterns {
        if key.is_empty() {
            return Err(ConfigError::invalid_controller(
                controller,
                format!("{field} contains an empty key"),
            ));
        }
        if pattern.is_empty() {
            return Err(ConfigError::invalid_controller(
                controller,
                format!("{field}.{key} cannot be empty"),
            ));
        }
    }
    Ok(())
}
