//! Derivation of form values from a trim's specification record.

use modlog_common::constants::{NM_TO_FT_LB, PS_TO_HP};
use modlog_common::types::{Drivetrain, DrivetrainFallback, OutputField};
use modlog_lookup::models::SpecRecord;
use serde::Serialize;

/// Values written to the form once a trim resolves.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DerivedSpec {
    /// Model year.
    pub year: String,
    /// Make display name.
    pub make: String,
    /// Model name.
    pub model: String,
    /// Provider model identifier.
    pub model_id: String,
    /// Horsepower, from PS.
    pub horsepower: i64,
    /// Torque in ft-lb, from Nm.
    pub torque: i64,
    /// Weight in kg.
    pub weight: i64,
    /// Engine size in litres, one decimal.
    pub engine_size: f64,
    /// Drivetrain; `None` when unmatched under [`DrivetrainFallback::KeepPrevious`].
    pub drivetrain: Option<Drivetrain>,
}

#[allow(clippy::cast_possible_truncation)]
fn floor_or_zero(value: Option<f64>, factor: f64) -> i64 {
    value.map_or(0, |v| (v * factor).floor() as i64)
}

/// Classifies a free-text drivetrain description.
///
/// Matching is case-insensitive substring containment, in priority order:
/// `front`, then `rear`, then any of `all`/`4wd`/`awd`.
#[must_use]
pub fn classify_drivetrain(raw: &str) -> Option<Drivetrain> {
    let drive = raw.to_lowercase();
    if drive.contains("front") {
        Some(Drivetrain::Fwd)
    } else if drive.contains("rear") {
        Some(Drivetrain::Rwd)
    } else if ["all", "4wd", "awd"].iter().any(|k| drive.contains(*k)) {
        Some(Drivetrain::Awd)
    } else {
        None
    }
}

impl DerivedSpec {
    /// Computes every output value from `record`.
    ///
    /// Absent numeric attributes yield 0. A missing drivetrain description
    /// is treated like one that matches no rule.
    #[must_use]
    pub fn from_record(record: &SpecRecord, fallback: DrivetrainFallback) -> Self {
        let classified = record.model_drive.as_deref().and_then(classify_drivetrain);
        let drivetrain = match (classified, fallback) {
            (Some(drive), _) => Some(drive),
            (None, DrivetrainFallback::Fwd) => Some(Drivetrain::Fwd),
            (None, DrivetrainFallback::KeepPrevious) => None,
        };
        if classified.is_none() {
            tracing::debug!(
                model_id = %record.model_id,
                drive = ?record.model_drive,
                ?fallback,
                "drivetrain description matched no rule"
            );
        }

        Self {
            year: record.model_year.clone(),
            make: record.make_name().to_string(),
            model: record.model_name.clone(),
            model_id: record.model_id.clone(),
            horsepower: floor_or_zero(record.model_engine_power_ps, PS_TO_HP),
            torque: floor_or_zero(record.model_engine_torque_nm, NM_TO_FT_LB),
            weight: floor_or_zero(record.model_weight_kg, 1.0),
            engine_size: record
                .model_engine_cc
                .map_or(0.0, |cc| (cc / 100.0).round() / 10.0),
            drivetrain,
        }
    }

    /// Weight divided by horsepower, to two decimals. `None` without power.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn weight_to_power(&self) -> Option<f64> {
        if self.horsepower == 0 {
            return None;
        }
        let ratio = self.weight as f64 / self.horsepower as f64;
        Some((ratio * 100.0).round() / 100.0)
    }

    /// Rendered value of every output field, in write order.
    ///
    /// The drivetrain is omitted when it was left unresolved.
    #[must_use]
    pub fn output_values(&self) -> Vec<(OutputField, String)> {
        let mut values = Vec::with_capacity(OutputField::ALL.len());
        for field in OutputField::ALL {
            let value = match field {
                OutputField::HiddenYear => self.year.clone(),
                OutputField::HiddenMake => self.make.clone(),
                OutputField::HiddenModel => self.model.clone(),
                OutputField::ModelId => self.model_id.clone(),
                OutputField::Horsepower => self.horsepower.to_string(),
                OutputField::Torque => self.torque.to_string(),
                OutputField::Weight => self.weight.to_string(),
                OutputField::EngineSize => format!("{:.1}", self.engine_size),
                OutputField::Drivetrain => match self.drivetrain {
                    Some(drive) => drive.as_str().to_string(),
                    None => continue,
                },
            };
            values.push((field, value));
        }
        values
    }
}
