//! Cascade controller errors.

use modlog_common::types::CascadeField;
use modlog_lookup::error::LookupFailure;
use thiserror::Error;

/// Errors produced by the cascade controller.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CascadeError {
    /// The lookup for a field's options failed. The host has been told.
    #[error("lookup failed: {0}")]
    Lookup(#[from] LookupFailure),

    /// A trim value did not resolve against the current trim list.
    #[error("trim {value:?} is not in the current trim list")]
    NoMatchFound {
        /// Rejected trim value.
        value: String,
    },

    /// A value was chosen that the field does not currently offer.
    #[error("{field} {value:?} is not one of the current options")]
    NotOffered {
        /// Field the value was chosen for.
        field: CascadeField,
        /// Rejected value.
        value: String,
    },
}
