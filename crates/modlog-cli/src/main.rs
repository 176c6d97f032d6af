//! # modlog — vehicle lookup CLI
//!
//! Walks the year → make → model → trim cascade against the vehicle-data
//! API and performs project page actions from the terminal.

mod commands;
mod output;

use clap::Parser;

use crate::commands::Cli;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    commands::execute(cli).await
}
