//! Callscribe CLI entry point

use std::process::ExitCode;

use clap::Parser;

use callscribe::cli::{
    app::{load_merged_config, run_pipeline, EXIT_ERROR},
    args::{Cli, Commands, RunOptions},
    config_cmd::handle_config_command,
    presenter::Presenter,
};
use callscribe::domain::config::AppConfig;
use callscribe::infrastructure::XdgConfigStore;

#[tokio::main(flavor = "multi_thread", worker_threads = 2)]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    let presenter = Presenter::new();

    // Handle subcommands
    if let Some(Commands::Config { action }) = cli.command {
        let store = XdgConfigStore::new();
        if let Err(e) = handle_config_command(action, &store, &presenter).await {
            presenter.error(&e.to_string());
            return ExitCode::from(EXIT_ERROR);
        }
        return ExitCode::SUCCESS;
    }

    // Build CLI config from args
    let cli_config = AppConfig {
        source_base_url: cli.source_url.clone(),
        callback_url: cli.callback_url.clone(),
        max_records: cli.max_records,
        ..Default::default()
    };

    // Merge config
    let config = load_merged_config(cli_config).await;

    let options = RunOptions {
        limit: cli.limit,
        dry_run: cli.dry_run,
    };

    run_pipeline(config, options).await
}
