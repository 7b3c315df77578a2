//! CLI entry point - the composition root.
//!
//! This is the only place where infrastructure is wired together via
//! bootstrap. Command dispatch routes to handlers which delegate to the
//! session layer.

use clap::Parser;
use tracing_subscriber::EnvFilter;

use askql_cli::handlers::ask::AskArgs;
use askql_cli::{Cli, CliConfig, CliError, Commands, bootstrap, handlers};

#[tokio::main]
async fn main() {
    // Load environment variables before anything reads them
    dotenvy::dotenv().ok();

    // Parse CLI arguments
    let cli = Cli::parse();

    // Initialize logging (RUST_LOG wins over the verbose flag)
    let default_filter = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .init();

    if let Err(e) = run(cli).await {
        eprintln!("Error: {e}");
        std::process::exit(e.exit_code());
    }
}

async fn run(mut cli: Cli) -> Result<(), CliError> {
    let Some(command) = cli.command.take() else {
        // No command provided - show help
        use clap::CommandFactory;
        Cli::command().print_help()?;
        return Ok(());
    };

    match command {
        Commands::Ask {
            question,
            route,
            top,
            thoughts,
            sources,
            speak,
        } => {
            let config = CliConfig::from_cli(&cli, speak)?;
            let ctx = bootstrap(config);
            let args = AskArgs {
                question,
                route: route.to_route(),
                top,
                thoughts,
                sources,
                speak,
            };
            handlers::ask::execute(&ctx, args).await?;
        }

        Commands::Agent { speak } => {
            let config = CliConfig::from_cli(&cli, speak)?;
            let mut ctx = bootstrap(config);
            handlers::agent::execute(&mut ctx).await?;
        }
    }

    Ok(())
}
