mod config;
mod import;
mod pipeline;

use anyhow::Result;
use config::Config;
use pipeline::MatchingPipeline;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration
    let config = Config::load()?;
    talentmatch_logging::init_logging(&config.logging.level, config.logging.json)?;

    // Import, score and store one run
    let report = MatchingPipeline::new(config).run().await?;
    tracing::debug!("Run report: {:?}", report);
    Ok(())
}
