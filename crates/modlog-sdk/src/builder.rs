//! Fluent API for configuring a cascade controller.

use modlog_cascade::controller::CascadeController;
use modlog_cascade::host::FormHost;
use modlog_common::config::{FieldBindings, ModlogConfig};
use modlog_common::error::Result;
use modlog_common::types::DrivetrainFallback;
use modlog_lookup::LookupService;
use modlog_lookup::client::CarQueryClient;

/// Builder for a [`CascadeController`].
#[derive(Debug, Clone, Default)]
pub struct ControllerBuilder {
    config: ModlogConfig,
}

impl ControllerBuilder {
    /// Creates a builder with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts from an existing configuration.
    #[must_use]
    pub const fn from_config(config: ModlogConfig) -> Self {
        Self { config }
    }

    /// Sets the lookup service base URL.
    #[must_use]
    pub fn endpoint(mut self, url: impl Into<String>) -> Self {
        self.config.endpoint = url.into();
        self
    }

    /// Sets the per-request timeout in milliseconds.
    #[must_use]
    pub const fn timeout_ms(mut self, ms: u64) -> Self {
        self.config.timeout_ms = ms;
        self
    }

    /// Sets whether lookups are limited to models sold in the US.
    #[must_use]
    pub const fn sold_in_us(mut self, sold_in_us: bool) -> Self {
        self.config.sold_in_us = sold_in_us;
        self
    }

    /// Sets the page element identifiers.
    #[must_use]
    pub fn bindings(mut self, bindings: FieldBindings) -> Self {
        self.config.bindings = bindings;
        self
    }

    /// Sets how unmatched drivetrain descriptions are handled.
    #[must_use]
    pub const fn drivetrain_fallback(mut self, fallback: DrivetrainFallback) -> Self {
        self.config.drivetrain_fallback = fallback;
        self
    }

    /// Configuration assembled so far.
    #[must_use]
    pub const fn config(&self) -> &ModlogConfig {
        &self.config
    }

    /// Builds a controller backed by the CarQuery API.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid or the HTTP client
    /// cannot be created.
    pub fn build<H: FormHost>(self, host: H) -> Result<CascadeController<CarQueryClient, H>> {
        self.config.validate()?;
        let client = CarQueryClient::from_config(&self.config)?;
        tracing::debug!(endpoint = %self.config.endpoint, "building cascade controller");
        Ok(CascadeController::from_config(client, host, &self.config))
    }

    /// Builds a controller over a caller-supplied lookup service.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn build_with<L: LookupService, H: FormHost>(
        self,
        lookup: L,
        host: H,
    ) -> Result<CascadeController<L, H>> {
        self.config.validate()?;
        Ok(CascadeController::from_config(lookup, host, &self.config))
    }
}
