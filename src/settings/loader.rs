//! Layered settings loader.

use std::collections::HashMap;
use std::path::Path;

use config::{Config, ConfigBuilder, Environment, File, FileFormat, builder::DefaultState};

use super::{Settings, SettingsError};

const ENV_PREFIX: &str = "CALIPER";

/// Loads settings from a TOML string, ignoring the environment.
///
/// # Errors
///
/// Returns [`SettingsError::Load`] for malformed input and
/// [`SettingsError::Invalid`] for unacceptable values.
pub fn load_settings_from_str(toml_str: &str) -> Result<Settings, SettingsError> {
    let builder = Config::builder().add_source(File::from_str(toml_str, FileFormat::Toml));
    finish(builder)
}

/// Loads settings from an optional file and `CALIPER__*` environment variables.
///
/// # Errors
///
/// Returns [`SettingsError::Load`] if an explicit file is missing or any
/// source cannot be parsed, and [`SettingsError::Invalid`] for
/// unacceptable values.
pub fn load_settings(path: Option<&Path>) -> Result<Settings, SettingsError> {
    load_with_environment(path, None)
}

pub(super) fn load_with_environment(
    path: Option<&Path>,
    env: Option<HashMap<String, String>>,
) -> Result<Settings, SettingsError> {
    let mut builder = Config::builder();

    if let Some(file) = path {
        if !file.exists() {
            return Err(SettingsError::Load(format!(
                "settings file not found: {}",
                file.display()
            )));
        }
        builder = builder.add_source(File::from(file).format(FileFormat::Toml));
    }

    builder = builder.add_source(
        Environment::with_prefix(ENV_PREFIX)
            .separator("__")
            .try_parsing(true)
            .source(env),
    );

    finish(builder)
}

fn finish(builder: ConfigBuilder<DefaultState>) -> Result<Settings, SettingsError> {
    let settings: Settings = builder
        .build()
        .map_err(|e| SettingsError::Load(e.to_string()))?
        .try_deserialize()
        .map_err(|e| SettingsError::Load(e.to_string()))?;
    validate(&settings)?;
    Ok(settings)
}

fn validate(settings: &Settings) -> Result<(), SettingsError> {
    if settings.polling_interval_ms == 0 {
        return Err(SettingsError::Invalid {
            field: "polling_interval_ms".to_owned(),
            reason: "must be greater than zero".to_owned(),
        });
    }
    if settings.function_prefix.is_empty() || !settings.function_prefix.ends_with(':') {
        return Err(SettingsError::Invalid {
            field: "function_prefix".to_owned(),
            reason: "must be non-empty and end with ':'".to_owned(),
        });
    }
    Ok(())
}
