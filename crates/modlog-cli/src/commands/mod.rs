//! CLI command definitions and dispatch.

pub mod form;
pub mod lookup;
pub mod mods;
pub mod resolve;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use modlog_common::config::ModlogConfig;
use modlog_common::constants;

/// modlog — vehicle specification lookups for project build logs.
#[derive(Parser, Debug)]
#[command(name = constants::BIN_NAME, version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Command,

    /// Path to a JSON configuration file.
    #[arg(long, global = true, env = constants::CONFIG_ENV)]
    pub config: Option<PathBuf>,

    /// Base URL of the vehicle lookup service.
    #[arg(long, global = true, env = constants::ENDPOINT_ENV)]
    pub endpoint: Option<String>,

    /// Per-request timeout in milliseconds.
    #[arg(long, global = true)]
    pub timeout_ms: Option<u64>,

    /// Print machine-readable JSON instead of tables.
    #[arg(long, global = true)]
    pub json: bool,
}

/// Available CLI subcommands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// List valid model years, newest first.
    Years,
    /// List the makes of a year, common makes first.
    Makes(lookup::MakesArgs),
    /// List the models of a make.
    Models(lookup::ModelsArgs),
    /// List the trims of a model.
    Trims(lookup::TrimsArgs),
    /// Walk the full cascade and print the derived form fields.
    Resolve(resolve::ResolveArgs),
    /// Remove a mod from a project's mod list.
    DeleteMod(mods::DeleteModArgs),
    /// Fetch a project modal form fragment.
    Form(form::FormArgs),
}

impl Cli {
    /// Loads the configuration file and applies command-line overrides.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or a value is invalid.
    pub fn load_config(&self) -> anyhow::Result<ModlogConfig> {
        let path = self
            .config
            .clone()
            .unwrap_or_else(constants::default_config_file);
        let mut config = ModlogConfig::load_or_default(&path)
            .map_err(|e| anyhow::anyhow!("{e}"))?;
        if let Some(endpoint) = &self.endpoint {
            config.endpoint.clone_from(endpoint);
        }
        if let Some(timeout_ms) = self.timeout_ms {
            config.timeout_ms = timeout_ms;
        }
        config.validate().map_err(|e| anyhow::anyhow!("{e}"))?;
        tracing::debug!(path = %path.display(), endpoint = %config.endpoint, "configuration loaded");
        Ok(config)
    }
}

/// Dispatches the parsed CLI command to its handler.
///
/// # Errors
///
/// Returns an error if the command execution fails.
pub async fn execute(cli: Cli) -> anyhow::Result<()> {
    let config = cli.load_config()?;
    let json = cli.json;
    match cli.command {
        Command::Years => lookup::years(&config, json).await,
        Command::Makes(args) => lookup::makes(&config, args, json).await,
        Command::Models(args) => lookup::models(&config, args, json).await,
        Command::Trims(args) => lookup::trims(&config, args, json).await,
        Command::Resolve(args) => resolve::execute(config, args, json).await,
        Command::DeleteMod(args) => mods::execute(&config, args).await,
        Command::Form(args) => form::execute(&config, args).await,
    }
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn command_is_named_after_the_binary() {
        assert_eq!(Cli::command().get_name(), constants::BIN_NAME);
    }

    #[test]
    fn overrides_apply_on_top_of_defaults() {
        let cli = Cli::parse_from([
            "modlog",
            "--config",
            "/nonexistent/modlog.json",
            "--endpoint",
            "http://localhost:8080/api/",
            "--timeout-ms",
            "1500",
            "years",
        ]);
        let config = cli.load_config().expect("config");
        assert_eq!(config.endpoint, "http://localhost:8080/api/");
        assert_eq!(config.timeout_ms, 1500);
    }

    #[test]
    fn zero_timeout_is_rejected() {
        let cli = Cli::parse_from([
            "modlog",
            "--config",
            "/nonexistent/modlog.json",
            "--timeout-ms",
            "0",
            "years",
        ]);
        assert!(cli.load_config().is_err());
    }
}
