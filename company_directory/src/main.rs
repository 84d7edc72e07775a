//! Main entry point for the Company Directory CLI.

use anyhow::Result;
use clap::Parser;
use company_directory::{
    cli::{self, Commands},
    server,
    settings::Settings,
    telemetry,
};

#[tokio::main]
async fn main() -> Result<()> {
    let args = cli::Cli::parse();

    let mut settings = Settings::load()?;

    telemetry::init(&settings.logging)?;

    if let Some(data) = args.command.data() {
        settings.data.json_file_path = data.to_path_buf();
    }
    settings.check_data_file();

    let path = settings.data.json_file_path.as_path();
    match args.command {
        Commands::Serve { addr, .. } => server::serve(&settings, addr).await,
        Commands::Search { query, .. } => {
            println!("{}", cli::run_search(path, &query)?);
            Ok(())
        }
        Commands::Update { id, changes, .. } => {
            println!("{}", cli::run_update(path, &id, &changes)?);
            Ok(())
        }
    }
}
