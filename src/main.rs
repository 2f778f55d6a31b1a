//! CLI entry point for pixelation and photomosaic generation

use clap::Parser;
use photomosaic::io::cli::{Cli, CommandRunner};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn init_logging(verbose: bool, quiet: bool) {
    let env_filter = if verbose {
        "photomosaic=debug"
    } else if quiet {
        "photomosaic=warn"
    } else {
        "photomosaic=info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| env_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn main() -> photomosaic::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.quiet);

    let runner = CommandRunner::new(cli);
    runner.run()?;
    Ok(())
}
