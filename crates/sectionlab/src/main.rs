mod cli;
mod commands;
mod output;

use clap::Parser;
use cli::{CatalogCommands, Cli, Commands};
use tracing_subscriber::EnvFilter;

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = match cli.command {
        Commands::Render {
            input,
            output,
            config,
        } => commands::render::run(&input, config.as_deref(), &output),
        Commands::Detect { input, json } => commands::detect::run(&input, json),
        Commands::Schema { input, json } => commands::schema::run(&input, json),
        Commands::Catalog(catalog_cmd) => match catalog_cmd {
            CatalogCommands::Render {
                catalog,
                slug,
                output,
                config,
            } => commands::catalog::run_render(&catalog, &slug, config.as_deref(), &output),
            CatalogCommands::List { catalog, json } => commands::catalog::run_list(&catalog, json),
        },
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

/// Log to stderr; `RUST_LOG` overrides the verbosity flag
fn init_tracing(verbose: bool) {
    let default_level = if verbose { "info" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();
}
