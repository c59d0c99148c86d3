//! Environment variable interpolation for configuration
//!
//! Credentials are referenced as `${VAR_NAME}` in the configuration file
//! and substituted from the process environment before parsing.

use super::error::ConfigError;
use regex::Regex;
use std::env;

fn env_var_pattern() -> Regex {
    Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}").unwrap()
}

/// Interpolate `${VAR}` references in a configuration document. Fails on
/// the first reference whose variable is not set.
pub fn interpolate_env_vars(content: &str) -> Result<String, ConfigError> {
    let pattern = env_var_pattern();
    let mut missing: Option<String> = None;

    let interpolated = pattern.replace_all(content, |caps: &regex::Captures<'_>| {
        let var = &caps[1];
        match env::var(var) {
            Ok(value) => value,
            Err(_) => {
                if missing.is_none() {
                    missing = Some(var.to_string());
                }
                caps[0].to_string()
            }
        }
    });

    match missing {
        Some(var) => Err(ConfigError::EnvVarNotFound { var }),
        None => Ok(interpolated.into_owned()),
    }
}
