//! System-wide constants and default locations.

use std::path::PathBuf;
use std::sync::OnceLock;

/// Base URL of the CarQuery vehicle-data API.
pub const DEFAULT_ENDPOINT: &str = "https://www.carqueryapi.com/api/0.3/";

/// Default timeout for a single lookup request, in milliseconds.
pub const DEFAULT_TIMEOUT_MS: u64 = 10_000;

/// Label shown for a trim record with no trim name.
pub const DEFAULT_TRIM_LABEL: &str = "Default";

/// Conversion factor from PS (metric horsepower) to displayed horsepower.
pub const PS_TO_HP: f64 = 0.986;

/// Conversion factor from newton-metres to foot-pounds.
pub const NM_TO_FT_LB: f64 = 0.737_56;

/// Element identifiers of the host page's cascade selects.
pub mod elements {
    /// Year select.
    pub const YEAR_SELECT: &str = "year-select";
    /// Make select.
    pub const MAKE_SELECT: &str = "make-select";
    /// Model select.
    pub const MODEL_SELECT: &str = "model-select";
    /// Trim select.
    pub const TRIM_SELECT: &str = "trim-select";
    /// Hidden model year input.
    pub const HIDDEN_YEAR: &str = "year";
    /// Hidden make display name input.
    pub const HIDDEN_MAKE: &str = "make";
    /// Hidden model name input.
    pub const HIDDEN_MODEL: &str = "model";
    /// Hidden provider model identifier input.
    pub const MODEL_ID: &str = "model_id";
    /// Horsepower input.
    pub const HORSEPOWER: &str = "horsepower";
    /// Torque input.
    pub const TORQUE: &str = "torque";
    /// Weight input.
    pub const WEIGHT: &str = "weight";
    /// Engine size input.
    pub const ENGINE_SIZE: &str = "engine_size";
    /// Drivetrain select.
    pub const DRIVETRAIN: &str = "drivetrain";
}

/// Returns the configuration directory, preferring `$HOME/.modlog` and
/// falling back to `./.modlog` when no home directory is known.
fn resolve_config_dir() -> PathBuf {
    std::env::var("HOME")
        .or_else(|_| std::env::var("USERPROFILE"))
        .map_or_else(|_| PathBuf::from(".modlog"), |home| PathBuf::from(home).join(".modlog"))
}

static CONFIG_DIR: OnceLock<PathBuf> = OnceLock::new();

/// Returns the resolved configuration directory for this session.
pub fn config_dir() -> &'static PathBuf {
    CONFIG_DIR.get_or_init(resolve_config_dir)
}

/// Returns the default configuration file path.
pub fn default_config_file() -> PathBuf {
    config_dir().join("config.json")
}

/// Environment variable overriding the lookup endpoint.
pub const ENDPOINT_ENV: &str = "MODLOG_ENDPOINT";

/// Environment variable overriding the configuration file path.
pub const CONFIG_ENV: &str = "MODLOG_CONFIG";

/// Binary name for the CLI.
pub const BIN_NAME: &str = "modlog";
