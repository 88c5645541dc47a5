//! rlscfg - inspect the RLS client settings for a workspace
//!
//! Resolves user and workspace settings the way the editor does and prints
//! the configuration snapshot the RLS client would start with.

use clap::Parser;
use rls_config::cli::Cli;
use rls_config::utils::format::DisplayUtils;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    // Parse command-line arguments
    let cli = Cli::parse();

    // Initialize logging
    init_logging(cli.debug);

    let display = DisplayUtils::new(cli.no_color);

    // Execute the command
    info!("Starting rlscfg");
    if let Err(e) = cli.execute().await {
        error!("Error: {}", e);
        display.print_error(&format!("Error: {}", e));
        std::process::exit(1);
    }
}

fn init_logging(debug: bool) {
    let default_filter = if debug { "rls_config=debug,rlscfg=debug" } else { "rls_config=info,rlscfg=info" };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
