//! Configuration model for the cascade controller and lookup client.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::constants::{self, elements};
use crate::error::{ModlogError, Result};
use crate::types::{CascadeField, DrivetrainFallback, OutputField};

/// Root configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModlogConfig {
    /// Base URL of the vehicle lookup service.
    pub endpoint: String,
    /// Restrict lookups to models sold in the US (`sold_in_us=1`).
    pub sold_in_us: bool,
    /// Per-request timeout in milliseconds.
    pub timeout_ms: u64,
    /// Handling of drivetrain descriptions no rule matches.
    pub drivetrain_fallback: DrivetrainFallback,
    /// Element identifiers of the host page.
    pub bindings: FieldBindings,
}

impl Default for ModlogConfig {
    fn default() -> Self {
        Self {
            endpoint: constants::DEFAULT_ENDPOINT.to_string(),
            sold_in_us: true,
            timeout_ms: constants::DEFAULT_TIMEOUT_MS,
            drivetrain_fallback: DrivetrainFallback::default(),
            bindings: FieldBindings::default(),
        }
    }
}

impl ModlogConfig {
    /// Reads a JSON configuration file. Absent keys take their defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, does not parse, or
    /// holds an invalid value.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| ModlogError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        let config: Self = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Like [`load`](Self::load), but returns the defaults when `path`
    /// does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if an existing file cannot be read or parsed.
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        Self::load(path)
    }

    /// Checks values serde cannot reject on its own.
    ///
    /// # Errors
    ///
    /// Returns `ModlogError::Config` for an empty endpoint or a zero timeout.
    pub fn validate(&self) -> Result<()> {
        if self.endpoint.trim().is_empty() {
            return Err(ModlogError::Config {
                message: "endpoint must not be empty".to_string(),
            });
        }
        if self.timeout_ms == 0 {
            return Err(ModlogError::Config {
                message: "timeout_ms must be greater than zero".to_string(),
            });
        }
        Ok(())
    }
}

/// Identifiers of the host page elements the controller drives.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldBindings {
    /// Year select.
    pub year_select: String,
    /// Make select.
    pub make_select: String,
    /// Model select.
    pub model_select: String,
    /// Trim select.
    pub trim_select: String,
    /// Hidden model year.
    pub hidden_year: String,
    /// Hidden make display name.
    pub hidden_make: String,
    /// Hidden model name.
    pub hidden_model: String,
    /// Provider model identifier.
    pub model_id: String,
    /// Horsepower.
    pub horsepower: String,
    /// Torque.
    pub torque: String,
    /// Weight.
    pub weight: String,
    /// Engine size.
    pub engine_size: String,
    /// Drivetrain.
    pub drivetrain: String,
}

impl Default for FieldBindings {
    fn default() -> Self {
        Self {
            year_select: elements::YEAR_SELECT.to_string(),
            make_select: elements::MAKE_SELECT.to_string(),
            model_select: elements::MODEL_SELECT.to_string(),
            trim_select: elements::TRIM_SELECT.to_string(),
            hidden_year: elements::HIDDEN_YEAR.to_string(),
            hidden_make: elements::HIDDEN_MAKE.to_string(),
            hidden_model: elements::HIDDEN_MODEL.to_string(),
            model_id: elements::MODEL_ID.to_string(),
            horsepower: elements::HORSEPOWER.to_string(),
            torque: elements::TORQUE.to_string(),
            weight: elements::WEIGHT.to_string(),
            engine_size: elements::ENGINE_SIZE.to_string(),
            drivetrain: elements::DRIVETRAIN.to_string(),
        }
    }
}

impl FieldBindings {
    /// Element identifier of a cascade select.
    #[must_use]
    pub fn select(&self, field: CascadeField) -> &str {
        match field {
            CascadeField::Year => &self.year_select,
            CascadeField::Make => &self.make_select,
            CascadeField::Model => &self.model_select,
            CascadeField::Trim => &self.trim_select,
        }
    }

    /// Element identifier of an output field.
    #[must_use]
    pub fn output(&self, field: OutputField) -> &str {
        match field {
            OutputField::HiddenYear => &self.hidden_year,
            OutputField::HiddenMake => &self.hidden_make,
            OutputField::HiddenModel => &self.hidden_model,
            OutputField::ModelId => &self.model_id,
            OutputField::Horsepower => &self.horsepower,
            OutputField::Torque => &self.torque,
            OutputField::Weight => &self.weight,
            OutputField::EngineSize => &self.engine_size,
            OutputField::Drivetrain => &self.drivetrain,
        }
    }
}
