//! HTTP client for the CarQuery API.

use std::time::Duration;

use modlog_common::config::ModlogConfig;
use modlog_common::error::{ModlogError, Result};

use crate::error::LookupFailure;
use crate::models::{MakeRecord, ModelRecord, SpecRecord, YearRange};
use crate::{LookupCommand, LookupQuery, LookupService, decode};

/// [`LookupService`] backed by the CarQuery HTTP API.
#[derive(Debug, Clone)]
pub struct CarQueryClient {
    http: reqwest::Client,
    endpoint: String,
    sold_in_us: bool,
}

impl CarQueryClient {
    /// Creates a client for `endpoint` with a per-request timeout.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be initialized.
    pub fn new(endpoint: impl Into<String>, timeout: Duration, sold_in_us: bool) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ModlogError::Config {
                message: format!("failed to build HTTP client: {e}"),
            })?;
        Ok(Self {
            http,
            endpoint: endpoint.into(),
            sold_in_us,
        })
    }

    /// Creates a client from the endpoint, timeout and region settings.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be initialized.
    pub fn from_config(config: &ModlogConfig) -> Result<Self> {
        Self::new(
            config.endpoint.clone(),
            Duration::from_millis(config.timeout_ms),
            config.sold_in_us,
        )
    }

    /// Base URL requests are sent to.
    #[must_use]
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Issues `command` and returns the raw response body.
    async fn fetch(&self, command: LookupCommand, query: &LookupQuery) -> std::result::Result<String, LookupFailure> {
        let params = query.params(command, self.sold_in_us);
        tracing::debug!(command = command.as_str(), endpoint = %self.endpoint, ?query, "lookup request");

        let response = self
            .http
            .get(&self.endpoint)
            .query(&params)
            .send()
            .await
            .map_err(|e| {
                tracing::warn!(command = command.as_str(), error = %e, "lookup request failed");
                LookupFailure::Network {
                    command,
                    message: e.to_string(),
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!(command = command.as_str(), status = status.as_u16(), "lookup returned error status");
            return Err(LookupFailure::Status {
                command,
                status: status.as_u16(),
            });
        }

        response.text().await.map_err(|e| LookupFailure::Network {
            command,
            message: format!("failed to read response body: {e}"),
        })
    }
}

impl LookupService for CarQueryClient {
    async fn years(&self) -> std::result::Result<YearRange, LookupFailure> {
        let body = self
            .fetch(LookupCommand::GetYears, &LookupQuery::default())
            .await?;
        decode::decode_years(&body)
    }

    async fn makes(&self, year: &str) -> std::result::Result<Vec<MakeRecord>, LookupFailure> {
        let query = LookupQuery {
            year: Some(year.to_string()),
            ..LookupQuery::default()
        };
        let body = self.fetch(LookupCommand::GetMakes, &query).await?;
        decode::decode_makes(&body)
    }

    async fn models(
        &self,
        year: &str,
        make: &str,
    ) -> std::result::Result<Vec<ModelRecord>, LookupFailure> {
        let query = LookupQuery {
            year: Some(year.to_string()),
            make: Some(make.to_string()),
            model: None,
        };
        let body = self.fetch(LookupCommand::GetModels, &query).await?;
        decode::decode_models(&body)
    }

    async fn trims(
        &self,
        year: &str,
        make: &str,
        model: &str,
    ) -> std::result::Result<Vec<SpecRecord>, LookupFailure> {
        let query = LookupQuery {
            year: Some(year.to_string()),
            make: Some(make.to_string()),
            model: Some(model.to_string()),
        };
        let body = self.fetch(LookupCommand::GetTrims, &query).await?;
        decode::decode_trims(&body)
    }
}
