use config::{Config, Environment, File};
use serde::de::DeserializeOwned;
use std::borrow::Cow;
use std::path::{Path, PathBuf};
use tracing::info;

const ENV_PREFIX: &str = "FLIP";
const DEFAULT_CONFIG: &str = "server";

/// Custom error type for config loading.
#[flip_derive::flip_error]
pub enum ConfigError {
    #[error("Config error{}: {source}", format_context(.context))]
    Config { source: config::ConfigError, context: Option<Cow<'static, str>> },
}

/// Loads a configuration file and overlays environment overrides.
///
/// 1. **Base File**: `path`, or `server.{toml,yaml,json}` in the working directory.
/// 2. **Environment Overrides**: variables prefixed with `FLIP__`, nested with
///    double underscores (`FLIP__SERVER__PORT` maps to `server.port`).
///
/// # Errors
/// Returns [`ConfigError::Config`] if the file is missing or the merged
/// sources do not match `T`.
///
/// # Example
/// ```rust
/// use flip_kernel::config::load_config;
///
/// #[derive(Default, serde::Deserialize)]
/// struct AppConfig {
///     port: u16,
/// }
///
/// let cfg: AppConfig = load_config(Some("config/local")).unwrap_or_default();
/// ```
pub fn load_config<T>(path: Option<impl AsRef<Path>>) -> Result<T, ConfigError>
where
    T: DeserializeOwned,
{
    let effective_path =
        path.map_or_else(|| PathBuf::from(DEFAULT_CONFIG), |p| p.as_ref().to_path_buf());

    info!("Loading config from {}", effective_path.display());

    Config::builder()
        .add_source(File::from(effective_path.as_path()).required(true))
        .add_source(
            Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true),
        )
        .build()
        .context("Failed to build config")?
        .try_deserialize::<T>()
        .context("Failed to deserialize config")
}
