//! # modlog-lookup
//!
//! Client side of the external, read-only vehicle-data API queried at each
//! cascade step.
//!
//! - [`LookupService`]: the contract the cascade controller depends on.
//! - [`models`]: provider records, decoded leniently.
//! - [`decode`]: JSON/JSONP payload decoding per command.
//! - [`client::CarQueryClient`]: the reqwest-backed implementation.

pub mod client;
pub mod decode;
pub mod error;
pub mod models;

use std::fmt;
use std::future::Future;

use crate::error::LookupFailure;
use crate::models::{MakeRecord, ModelRecord, SpecRecord, YearRange};

/// Commands understood by the lookup service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LookupCommand {
    /// Range of valid model years.
    GetYears,
    /// Makes available in a year.
    GetMakes,
    /// Models of a make in a year.
    GetModels,
    /// Trims of a model in a year.
    GetTrims,
}

impl LookupCommand {
    /// Wire name passed as `cmd`.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::GetYears => "getYears",
            Self::GetMakes => "getMakes",
            Self::GetModels => "getModels",
            Self::GetTrims => "getTrims",
        }
    }

    /// Key holding the result in the response object.
    #[must_use]
    pub const fn resource_key(self) -> &'static str {
        match self {
            Self::GetYears => "Years",
            Self::GetMakes => "Makes",
            Self::GetModels => "Models",
            Self::GetTrims => "Trims",
        }
    }
}

impl fmt::Display for LookupCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Contextual filters sent with a command.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LookupQuery {
    /// Model year filter.
    pub year: Option<String>,
    /// Make identifier filter.
    pub make: Option<String>,
    /// Model name filter.
    pub model: Option<String>,
}

impl LookupQuery {
    /// Query parameters for `command`; absent filters are omitted.
    #[must_use]
    pub fn params(&self, command: LookupCommand, sold_in_us: bool) -> Vec<(&'static str, String)> {
        let mut params = vec![("cmd", command.as_str().to_string())];
        let filters = [("year", &self.year), ("make", &self.make), ("model", &self.model)];
        for (name, value) in filters {
            if let Some(value) = value {
                params.push((name, value.clone()));
            }
        }
        if sold_in_us {
            params.push(("sold_in_us", "1".to_string()));
        }
        params
    }
}

/// The external vehicle-data service.
///
/// Every method returns the provider's records unchanged in order; ordering
/// and labelling for display are the caller's concern.
pub trait LookupService: Send + Sync {
    /// Fetches the range of valid model years.
    fn years(&self) -> impl Future<Output = Result<YearRange, LookupFailure>> + Send;

    /// Fetches the makes available in `year`.
    fn makes(&self, year: &str) -> impl Future<Output = Result<Vec<MakeRecord>, LookupFailure>> + Send;

    /// Fetches the models of `make` in `year`.
    fn models(
        &self,
        year: &str,
        make: &str,
    ) -> impl Future<Output = Result<Vec<ModelRecord>, LookupFailure>> + Send;

    /// Fetches the trims, with full specification records, of a model.
    fn trims(
        &self,
        year: &str,
        make: &str,
        model: &str,
    ) -> impl Future<Output = Result<Vec<SpecRecord>, LookupFailure>> + Send;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn params_include_region_and_present_filters_only() {
        let query = LookupQuery {
            year: Some("2020".into()),
            make: Some("honda".into()),
            model: None,
        };
        let params = query.params(LookupCommand::GetModels, true);
        assert_eq!(
            params,
            vec![
                ("cmd", "getModels".to_string()),
                ("year", "2020".to_string()),
                ("make", "honda".to_string()),
                ("sold_in_us", "1".to_string()),
            ]
        );
    }

    #[test]
    fn params_without_region_filter() {
        let params = LookupQuery::default().params(LookupCommand::GetYears, false);
        assert_eq!(params, vec![("cmd", "getYears".to_string())]);
    }

    #[test]
    fn resource_keys_are_plural_names() {
        assert_eq!(LookupCommand::GetMakes.resource_key(), "Makes");
        assert_eq!(LookupCommand::GetTrims.resource_key(), "Trims");
    }
}
