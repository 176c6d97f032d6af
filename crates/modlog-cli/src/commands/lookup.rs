//! `modlog years|makes|models|trims` — list the options of one cascade level.

use clap::Args;
use modlog_cascade::options;
use modlog_common::config::ModlogConfig;
use modlog_lookup::LookupService;
use modlog_lookup::client::CarQueryClient;

use crate::output;

/// Arguments for the `makes` command.
#[derive(Args, Debug)]
pub struct MakesArgs {
    /// Model year.
    #[arg(long)]
    pub year: String,
}

/// Arguments for the `models` command.
#[derive(Args, Debug)]
pub struct ModelsArgs {
    /// Model year.
    #[arg(long)]
    pub year: String,
    /// Make identifier (e.g. `honda`).
    #[arg(long)]
    pub make: String,
}

/// Arguments for the `trims` command.
#[derive(Args, Debug)]
pub struct TrimsArgs {
    /// Model year.
    #[arg(long)]
    pub year: String,
    /// Make identifier.
    #[arg(long)]
    pub make: String,
    /// Model name.
    #[arg(long)]
    pub model: String,
}

fn client(config: &ModlogConfig) -> anyhow::Result<CarQueryClient> {
    CarQueryClient::from_config(config).map_err(|e| anyhow::anyhow!("{e}"))
}

/// Executes the `years` command.
///
/// # Errors
///
/// Returns an error if the lookup fails.
pub async fn years(config: &ModlogConfig, json: bool) -> anyhow::Result<()> {
    let range = client(config)?.years().await?;
    output::print_options(&options::year_options(range), json)
}

/// Executes the `makes` command.
///
/// # Errors
///
/// Returns an error if the lookup fails.
pub async fn makes(config: &ModlogConfig, args: MakesArgs, json: bool) -> anyhow::Result<()> {
    let makes = client(config)?.makes(&args.year).await?;
    output::print_options(&options::make_options(makes), json)
}

/// Executes the `models` command.
///
/// # Errors
///
/// Returns an error if the lookup fails.
pub async fn models(config: &ModlogConfig, args: ModelsArgs, json: bool) -> anyhow::Result<()> {
    let models = client(config)?.models(&args.year, &args.make).await?;
    output::print_options(&options::model_options(&models), json)
}

/// Executes the `trims` command.
///
/// With `--json` the full specification records are printed.
///
/// # Errors
///
/// Returns an error if the lookup fails.
pub async fn trims(config: &ModlogConfig, args: TrimsArgs, json: bool) -> anyhow::Result<()> {
    let trims = client(config)?
        .trims(&args.year, &args.make, &args.model)
        .await?;
    if json {
        println!("{}", serde_json::to_string_pretty(&trims)?);
        return Ok(());
    }
    output::print_options(&options::trim_options(&trims), false)
}
