mod cli;

use anyhow::Result;
use clap::Parser;
use cli::commands;

fn main() {
    let cli = cli::Cli::parse();

    // Setup tracing
    let level = if cli.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()),
        )
        .init();

    // Run the command and handle errors gracefully
    if let Err(err) = run_command(cli) {
        commands::display_error(&err);
        std::process::exit(1);
    }
}

fn run_command(cli: cli::Cli) -> Result<()> {
    use cli::Commands;

    match cli.command {
        Commands::Init { path } => commands::init::handle(&path),
        Commands::Decorate { report, output } => {
            let config = commands::load_config(cli.config.as_deref())?;
            commands::decorate::handle(&report, output.as_deref(), &config)
        }
        Commands::Check { report } => {
            let config = commands::load_config(cli.config.as_deref())?;
            commands::check::handle(&report, &config)
        }
        Commands::Config { action } => {
            let config = commands::load_config(cli.config.as_deref())?;
            commands::config::handle(action, config)
        }
    }
}
