//! Confkit CLI entry point.

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use confkit::cli::{Cli, Commands};
use confkit::SharedConfig;

fn main() {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let config = SharedConfig::new();
    if let Err(err) = config.load(&cli.config) {
        confkit::cli::fatal(&err);
    }

    let result = match cli.command {
        Commands::Get(args) => confkit::cli::commands::get::execute(args, &config, cli.json),
        Commands::Log(args) => confkit::cli::commands::log::execute(args, &config, cli.json),
    };

    if let Err(err) = result {
        confkit::cli::handle_error(err, cli.json);
    }
}
