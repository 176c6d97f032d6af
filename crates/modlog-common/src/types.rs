//! Domain primitive types used across the modlog workspace.

use std::fmt;

use serde::{Deserialize, Serialize};

static CASCADE_ORDER: [CascadeField; 4] = CascadeField::ALL;

/// One of the four dependent selection fields, in cascade order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CascadeField {
    /// Model year.
    Year,
    /// Manufacturer.
    Make,
    /// Model name.
    Model,
    /// Trim level; the terminal field.
    Trim,
}

impl CascadeField {
    /// All cascade fields, upstream first.
    pub const ALL: [Self; 4] = [Self::Year, Self::Make, Self::Model, Self::Trim];

    /// Position of this field in the cascade.
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Self::Year => 0,
            Self::Make => 1,
            Self::Model => 2,
            Self::Trim => 3,
        }
    }

    /// The field populated once this one is chosen, if any.
    #[must_use]
    pub const fn next(self) -> Option<Self> {
        match self {
            Self::Year => Some(Self::Make),
            Self::Make => Some(Self::Model),
            Self::Model => Some(Self::Trim),
            Self::Trim => None,
        }
    }

    /// Fields strictly downstream of this one.
    #[must_use]
    pub fn downstream(self) -> &'static [Self] {
        &CASCADE_ORDER[self.index() + 1..]
    }

    /// Returns whether this is the terminal field.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Trim)
    }
}

impl fmt::Display for CascadeField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Year => write!(f, "year"),
            Self::Make => write!(f, "make"),
            Self::Model => write!(f, "model"),
            Self::Trim => write!(f, "trim"),
        }
    }
}

/// Form field written as a side effect of resolving a trim.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputField {
    /// Hidden model year.
    HiddenYear,
    /// Hidden make display name.
    HiddenMake,
    /// Hidden model name.
    HiddenModel,
    /// Provider model identifier.
    ModelId,
    /// Horsepower, integer.
    Horsepower,
    /// Torque in ft-lb, integer.
    Torque,
    /// Weight, integer.
    Weight,
    /// Engine size in litres, one decimal.
    EngineSize,
    /// Drivetrain classification.
    Drivetrain,
}

impl OutputField {
    /// All output fields in write order.
    pub const ALL: [Self; 9] = [
        Self::HiddenYear,
        Self::HiddenMake,
        Self::HiddenModel,
        Self::ModelId,
        Self::Horsepower,
        Self::Torque,
        Self::Weight,
        Self::EngineSize,
        Self::Drivetrain,
    ];
}

impl fmt::Display for OutputField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::HiddenYear => "year",
            Self::HiddenMake => "make",
            Self::HiddenModel => "model",
            Self::ModelId => "model_id",
            Self::Horsepower => "horsepower",
            Self::Torque => "torque",
            Self::Weight => "weight",
            Self::EngineSize => "engine_size",
            Self::Drivetrain => "drivetrain",
        };
        f.write_str(name)
    }
}

/// Drivetrain layout. Numeric codes match the project form's choices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Drivetrain {
    /// Front-wheel drive.
    Fwd = 1,
    /// Rear-wheel drive.
    Rwd = 2,
    /// All-wheel or four-wheel drive.
    Awd = 3,
}

impl Drivetrain {
    /// Short upper-case name as written into the form.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Fwd => "FWD",
            Self::Rwd => "RWD",
            Self::Awd => "AWD",
        }
    }

    /// Numeric form code.
    #[must_use]
    pub const fn code(self) -> u8 {
        self as u8
    }

    /// Parses a numeric form code.
    #[must_use]
    pub const fn from_code(code: u8) -> Option<Self> {
        match code {
            1 => Some(Self::Fwd),
            2 => Some(Self::Rwd),
            3 => Some(Self::Awd),
            _ => None,
        }
    }
}

impl fmt::Display for Drivetrain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What to do with a drivetrain description that matches no rule.
///
/// Two behaviours exist for the same page: one defaults to FWD, the other
/// leaves the drivetrain field at whatever it held before.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DrivetrainFallback {
    /// Classify unmatched descriptions as FWD.
    #[default]
    Fwd,
    /// Leave the drivetrain output untouched.
    KeepPrevious,
}

/// A (value, label) pair presented in a dropdown.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SelectOption {
    /// Submitted value; an externally assigned identifier.
    pub value: String,
    /// Text shown to the user.
    pub label: String,
}

impl SelectOption {
    /// Creates an option from a value and label.
    #[must_use]
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
        }
    }

    /// The empty option leading every populated list.
    #[must_use]
    pub const fn blank() -> Self {
        Self {
            value: String::new(),
            label: String::new(),
        }
    }

    /// Returns whether this is the leading empty option.
    #[must_use]
    pub const fn is_blank(&self) -> bool {
        self.value.is_empty()
    }
}
