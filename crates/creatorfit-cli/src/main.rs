mod analyze;
mod markdown;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "creatorfit-cli")]
#[command(about = "Judge how well a LinkedIn creator fits a brand and a topic")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Run a full fit analysis for one creator.
    Analyze {
        /// LinkedIn profile URL of the creator.
        #[arg(long)]
        url: String,
        /// Topic to match the creator's posts against.
        #[arg(long)]
        topic: String,
        /// Brand considering the sponsorship.
        #[arg(long)]
        brand: String,
        /// Creator's display name, used in the executive report.
        #[arg(long)]
        creator: String,
        /// Print the report as JSON instead of markdown.
        #[arg(long)]
        json: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let Some(command) = cli.command else {
        println!("no command given; try `creatorfit-cli analyze --help`");
        return Ok(());
    };

    let config = creatorfit_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    match command {
        Commands::Analyze {
            url,
            topic,
            brand,
            creator,
            json,
        } => {
            let request = creatorfit_analysis::AnalysisRequest {
                linkedin_url: url,
                topic,
                brand,
                creator_name: creator,
            };
            analyze::run_analyze(&config, &request, json).await?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests;
