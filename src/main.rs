//! smokecheck - Start-screen smoke check for the recorder app
//!
//! Main entry point for the CLI application.

use clap::Parser;
use std::path::PathBuf;

use smokecheck::{Config, VerificationRunner};

/// Headless-browser smoke check for the recorder start screen
#[derive(Parser, Debug)]
#[command(name = "smokecheck")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Target URL (default: http://localhost:5173/)
    #[arg(long, short = 'u')]
    url: Option<String>,

    /// Screenshot output path
    #[arg(long, short = 'o')]
    output: Option<PathBuf>,

    /// Readiness timeout in seconds
    #[arg(long, short = 't')]
    timeout_secs: Option<u64>,

    /// Run in headed browser mode (visible window)
    #[arg(long)]
    headed: bool,

    /// Disable the Chromium sandbox (needed in most containers)
    #[arg(long)]
    no_sandbox: bool,

    /// Enable debug output
    #[arg(long, short = 'd')]
    debug: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // Diagnostics go to stderr; stdout carries only the result lines.
    let default_filter = if args.debug {
        "smokecheck=debug"
    } else {
        "smokecheck=info"
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_filter)),
        )
        .with_writer(std::io::stderr)
        .init();

    // Build configuration
    let mut config = Config::load();

    // Apply CLI overrides
    if let Some(ref url) = args.url {
        config.set_url(url.clone());
    }

    if let Some(output) = args.output {
        config.artifact.path = output;
    }

    if let Some(secs) = args.timeout_secs {
        config.set_readiness_timeout_ms(secs * 1000);
    }

    if args.headed {
        config.browser.headed = true;
    }

    if args.no_sandbox {
        config.browser.no_sandbox = true;
    }

    let runner = VerificationRunner::with_config(config);
    runner.run().await?;

    Ok(())
}
