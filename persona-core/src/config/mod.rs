//! Configuration loading for the persona library
//!
//! Configuration is one YAML document, read once at startup. Credentials
//! are referenced as `${ENV_VAR}` and substituted from the environment
//! before parsing; presence or absence of each backend section decides
//! which gateway paths are reachable.

mod env;
mod error;
mod schema;
mod secrets;

pub use error::{ConfigError, ConfigResult};
pub use schema::{
    AnswerApiSettings, BackendsConfig, GroqSettings, OpenRouterSettings, PersonaConfig,
};
pub use secrets::SecretString;

use std::fs;
use std::path::Path;

/// Load a configuration from a YAML file
pub fn load_from_yaml<P: AsRef<Path>>(path: P) -> Result<PersonaConfig, ConfigError> {
    let path = path.as_ref();
    let content = fs::read_to_string(path).map_err(|e| ConfigError::Io {
        path: path.to_string_lossy().to_string(),
        source: e,
    })?;

    // Substitute ${ENV_VAR} references before parsing
    let interpolated = env::interpolate_env_vars(&content)?;

    let config: PersonaConfig =
        serde_yaml::from_str(&interpolated).map_err(|e| ConfigError::Parse {
            path: path.to_string_lossy().to_string(),
            line: e.location().map(|l| l.line()),
            column: e.location().map(|l| l.column()),
            message: e.to_string(),
        })?;

    config.validate()?;
    Ok(config)
}
