//! Settings loading.
//!
//! Precedence, lowest first: built-in defaults, the TOML settings file,
//! `CLASSROOM_*` environment variables, command-line overrides.

use std::path::{Path, PathBuf};

use config::{Config, ConfigError, Environment, File};

use classroom_domain::ClientSettings;

const APP_DIR: &str = "classroom";
const CONFIG_FILE: &str = "config.toml";
const STATE_FILE: &str = "session.json";
const ENV_PREFIX: &str = "CLASSROOM";

/// Loads settings. An explicitly named file must exist; the default one may not.
///
/// # Errors
///
/// Returns an error if a source cannot be read or holds invalid values,
/// including session timing outside the accepted range.
pub fn load_settings(explicit: Option<&Path>) -> Result<ClientSettings, ConfigError> {
    let file = match explicit {
        Some(path) => Some((path.to_path_buf(), true)),
        None => default_config_path().map(|path| (path, false)),
    };
    build_settings(file, Environment::with_prefix(ENV_PREFIX))
}

fn build_settings(
    file: Option<(PathBuf, bool)>,
    env: Environment,
) -> Result<ClientSettings, ConfigError> {
    let mut builder = Config::builder();
    if let Some((path, required)) = file {
        builder = builder.add_source(File::from(path).required(required));
    }
    let settings: ClientSettings = builder
        .add_source(env.try_parsing(true))
        .build()?
        .try_deserialize()?;
    settings
        .validate()
        .map_err(|e| ConfigError::Message(e.to_string()))?;
    Ok(settings)
}

/// `<config dir>/classroom/config.toml`, if the platform has a config dir.
#[must_use]
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(APP_DIR).join(CONFIG_FILE))
}

/// Where the session is persisted between invocations.
#[must_use]
pub fn state_path(settings: &ClientSettings) -> PathBuf {
    settings.state_file.clone().unwrap_or_else(|| {
        dirs::data_local_dir()
            .map_or_else(|| PathBuf::from(".classroom"), |dir| dir.join(APP_DIR))
            .join(STATE_FILE)
    })
}
