//! Lookup failure taxonomy.

use thiserror::Error;

use crate::LookupCommand;

/// Why a lookup produced no usable result.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LookupFailure {
    /// The request never produced a response (connect error, timeout).
    #[error("{command} request failed: {message}")]
    Network {
        /// Command that was issued.
        command: LookupCommand,
        /// Transport error description.
        message: String,
    },

    /// The service answered with a non-success HTTP status.
    #[error("{command} returned HTTP {status}")]
    Status {
        /// Command that was issued.
        command: LookupCommand,
        /// HTTP status code.
        status: u16,
    },

    /// The response body was not the expected shape.
    #[error("{command} returned a malformed payload: {message}")]
    Malformed {
        /// Command that was issued.
        command: LookupCommand,
        /// What was wrong with the payload.
        message: String,
    },

    /// The response was well formed but held no records.
    #[error("{command} returned no results")]
    Empty {
        /// Command that was issued.
        command: LookupCommand,
    },
}

impl LookupFailure {
    /// Short tag for display next to the affected field.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Network { .. } | Self::Status { .. } => "network",
            Self::Malformed { .. } => "malformed",
            Self::Empty { .. } => "empty",
        }
    }

    /// Command the failure belongs to.
    #[must_use]
    pub const fn command(&self) -> LookupCommand {
        match self {
            Self::Network { command, .. }
            | Self::Status { command, .. }
            | Self::Malformed { command, .. }
            | Self::Empty { command } => *command,
        }
    }

    pub(crate) fn malformed(command: LookupCommand, message: impl Into<String>) -> Self {
        Self::Malformed {
            command,
            message: message.into(),
        }
    }
}
