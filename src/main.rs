//! Sitebind main entry point
//!
//! Command-line interface: crawl one site a single level deep, render each
//! internal page to PDF, and bind everything into `merged.pdf`.

use clap::Parser;
use sitebind::Config;
use tracing_subscriber::EnvFilter;

/// Sitebind: site-to-PDF binder
///
/// Fetches the seed page, discovers its same-domain links, renders every
/// discovered page in a headless browser, and merges the results into one
/// PDF ordered by link discovery order.
#[derive(Parser, Debug)]
#[command(name = "sitebind")]
#[command(version)]
#[command(about = "Crawl a site one level deep and bind every page into a single PDF", long_about = None)]
struct Cli {
    /// Seed URL to crawl
    #[arg(value_name = "URL")]
    url: String,

    /// Number of concurrent browser sessions (recommended: 2)
    #[arg(short, long, default_value_t = 2)]
    jobs: usize,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    let config = Config::new(&cli.url, cli.jobs)?;

    match sitebind::run(config).await {
        Ok(summary) => {
            tracing::info!(
                "Done: {} of {} pages bound into {}",
                summary.merged,
                summary.discovered,
                summary.output_path.display()
            );
            Ok(())
        }
        Err(e) => {
            tracing::error!("Run failed: {}", e);
            Err(e.into())
        }
    }
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("sitebind=info,warn"),
            1 => EnvFilter::new("sitebind=debug,info"),
            2 => EnvFilter::new("sitebind=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}
