use anyhow::Result;
use clap::Parser;
use robots_census_runtime::cli::analyze_cmd;
use robots_census_runtime::cli::args::Cli;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    cli.export_global_flags();
    init_tracing(&cli)?;

    info!("starting robots-census v{}", env!("CARGO_PKG_VERSION"));
    analyze_cmd::run(&cli.config()).await?;
    Ok(())
}

/// Logs go to stderr so the report on stdout stays clean. `RUST_LOG` wins
/// over the defaults.
fn init_tracing(cli: &Cli) -> Result<()> {
    let default = if cli.verbose {
        "robots_census=debug"
    } else if cli.quiet {
        "robots_census=warn"
    } else {
        "robots_census=info"
    };
    let filter = EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(default))?;

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);
    if cli.json {
        builder.json().init();
    } else {
        builder.init();
    }
    Ok(())
}
