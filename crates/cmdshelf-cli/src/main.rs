mod cli;
mod commands;
mod completions;
mod error;

use clap::Parser;
use cli::{Cli, Commands};
use cmdshelf_core::registry::RegistryLoader;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // RUST_LOG wins; --verbose raises the default level otherwise.
    let default_level = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let loader = RegistryLoader::new();
    let result = match cli.command {
        Commands::Completions { shell } => {
            completions::generate_completions(shell);
            Ok(())
        }
        Commands::Add(args) => commands::add::run(&loader, args).await,
        Commands::Remove(args) => commands::remove::run(args),
        Commands::List => commands::list::run(&loader).await,
    };

    if let Err(err) = result {
        error::handle_error(err);
    }
}
