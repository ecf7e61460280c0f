mod accounts;
mod dashboard;

use clap::{Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "socialleaf-cli")]
#[command(about = "Social Leaf metrics aggregator command line interface")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Refresh platform snapshots, all platforms or a single one
    Refresh {
        #[arg(long)]
        platform: Option<String>,
    },
    /// Print the unified dashboard metrics
    Metrics,
    /// Print the 7-day engagement trend series
    Trends,
    /// List platform connections
    Connections,
    /// Connect a platform by public handle
    Connect {
        platform: String,
        #[arg(long)]
        handle: String,
        #[arg(long)]
        channel_id: Option<String>,
    },
    /// Disconnect a platform
    Disconnect { platform: String },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    let config = socialleaf_core::load_app_config()?;

    match cli.command {
        Commands::Refresh { platform } => dashboard::refresh(&config, platform.as_deref()).await,
        Commands::Metrics => dashboard::metrics(&config).await,
        Commands::Trends => dashboard::trends(&config).await,
        Commands::Connections => accounts::list(&config),
        Commands::Connect {
            platform,
            handle,
            channel_id,
        } => accounts::connect(&config, &platform, &handle, channel_id.as_deref()),
        Commands::Disconnect { platform } => accounts::disconnect(&config, &platform),
    }
}
