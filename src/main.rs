//! Voice Memo CLI entry point

use std::process::ExitCode;

use clap::Parser;

use voice_memo::cli::{
    app::{init_tracing, load_merged_config, EXIT_ERROR, EXIT_USAGE_ERROR},
    args::{Cli, Commands, ScreenOptions},
    config_cmd::handle_config_command,
    presenter::Presenter,
    screen::run_screen,
};
use voice_memo::infrastructure::XdgConfigStore;

#[tokio::main(flavor = "multi_thread", worker_threads = 2)]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    let presenter = Presenter::new();
    let cli_config = cli.to_config();

    // Handle subcommands
    if let Some(Commands::Config { action }) = cli.command {
        let store = XdgConfigStore::new();
        if let Err(e) = handle_config_command(action, &store, &presenter).await {
            presenter.error(&e.to_string());
            return ExitCode::from(EXIT_ERROR);
        }
        return ExitCode::SUCCESS;
    }

    let config = match load_merged_config(cli_config).await {
        Ok(config) => config,
        Err(e) => {
            presenter.error(&format!("Invalid configuration: {}", e));
            return ExitCode::from(EXIT_USAGE_ERROR);
        }
    };

    run_screen(ScreenOptions::from_config(&config)).await
}
