use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    // Diagnostics go to stderr so stdout stays clean for passwords and paths.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("pswd=warn")),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let cli = pswd::cli::Cli::parse();
    cli.run()
}
