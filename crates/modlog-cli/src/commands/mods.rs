//! `modlog delete-mod` — remove a mod from a project's mod list.

use std::time::Duration;

use clap::Args;
use modlog_common::config::ModlogConfig;
use modlog_sdk::project::ProjectClient;

/// Arguments for the `delete-mod` command.
#[derive(Args, Debug)]
pub struct DeleteModArgs {
    /// Project page URL (e.g. `https://site/projects/<id>`).
    #[arg(long)]
    pub project: String,

    /// Position of the mod in the list, starting at 0.
    pub index: usize,
}

/// Executes the `delete-mod` command.
///
/// # Errors
///
/// Returns an error if the site rejects the request.
pub async fn execute(config: &ModlogConfig, args: DeleteModArgs) -> anyhow::Result<()> {
    let client = ProjectClient::new(&args.project, Duration::from_millis(config.timeout_ms))
        .map_err(|e| anyhow::anyhow!("{e}"))?;

    if client.delete_mod(args.index).await? {
        println!("Removed mod {} from {}", args.index, client.project_url());
    } else {
        println!("Request accepted; mod {} left in place", args.index);
    }
    Ok(())
}
