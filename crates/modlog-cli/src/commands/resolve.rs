//! `modlog resolve` — walk the cascade and print the derived form fields.

use clap::Args;
use modlog_cascade::controller::{CascadeController, StepOutcome};
use modlog_cascade::host::MemoryPage;
use modlog_common::config::ModlogConfig;
use modlog_common::constants;
use modlog_common::types::{CascadeField, DrivetrainFallback, OutputField, SelectOption};
use modlog_lookup::LookupService;
use modlog_sdk::builder::ControllerBuilder;

use crate::output;

/// Arguments for the `resolve` command.
///
/// Each value may be given as the option value (e.g. `honda`, a trim's
/// model id) or its label (e.g. `Honda`, `Si`).
#[derive(Args, Debug)]
pub struct ResolveArgs {
    /// Model year.
    #[arg(long)]
    pub year: String,
    /// Make identifier or display name.
    #[arg(long)]
    pub make: String,
    /// Model name.
    #[arg(long)]
    pub model: String,
    /// Trim model id or trim name.
    #[arg(long)]
    pub trim: String,
    /// Leave the drivetrain unset when the description matches no rule.
    #[arg(long)]
    pub keep_drivetrain: bool,
}

/// Finds the option whose value, or failing that label, matches `wanted`.
pub fn pick<'a>(options: &'a [SelectOption], wanted: &str) -> Option<&'a SelectOption> {
    options
        .iter()
        .find(|o| o.value == wanted)
        .or_else(|| options.iter().find(|o| o.label.eq_ignore_ascii_case(wanted)))
}

async fn choose<L: LookupService>(
    controller: &CascadeController<L, MemoryPage>,
    field: CascadeField,
    wanted: &str,
) -> anyhow::Result<StepOutcome> {
    let offered = controller.options(field);
    let Some(option) = pick(&offered, wanted) else {
        anyhow::bail!(
            "no {field} matching {wanted:?} among {} option(s); list them with `{} {field}s`",
            offered.len(),
            constants::BIN_NAME
        );
    };
    tracing::debug!(%field, value = %option.value, "selecting");
    Ok(controller.select(field, Some(&option.value)).await?)
}

/// Executes the `resolve` command.
///
/// # Errors
///
/// Returns an error if any lookup fails or a value matches no option.
pub async fn execute(config: ModlogConfig, args: ResolveArgs, json: bool) -> anyhow::Result<()> {
    let mut builder = ControllerBuilder::from_config(config);
    if args.keep_drivetrain {
        builder = builder.drivetrain_fallback(DrivetrainFallback::KeepPrevious);
    }
    let controller = builder
        .build(MemoryPage::new())
        .map_err(|e| anyhow::anyhow!("{e}"))?;

    let _ = controller.initialize().await?;
    let _ = choose(&controller, CascadeField::Year, &args.year).await?;
    let _ = choose(&controller, CascadeField::Make, &args.make).await?;
    let _ = choose(&controller, CascadeField::Model, &args.model).await?;
    let StepOutcome::Resolved(spec) = choose(&controller, CascadeField::Trim, &args.trim).await?
    else {
        anyhow::bail!("trim {:?} did not resolve", args.trim);
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&spec)?);
        return Ok(());
    }

    let bindings = controller.bindings().clone();
    let page = controller.into_host();
    let rows: Vec<(String, String)> = OutputField::ALL
        .iter()
        .map(|&field| {
            let value = page.value(bindings.output(field)).unwrap_or("-");
            (field.to_string(), value.to_string())
        })
        .collect();
    output::print_fields(&rows);
    println!(
        "{:<12} {}",
        "w2p",
        output::format_ratio(spec.weight_to_power())
    );
    Ok(())
}
