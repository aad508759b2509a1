use crate::config::Config;
use crate::import::{import_taxonomy, Importer};
use anyhow::{Context, Result};
use talentmatch_engine::{MatchOrchestrator, MatchReport, MatchingConfig};
use talentmatch_persistence::SqliteStore;
use talentmatch_taxonomy::{apply_reasoning, Reasoner, SkillIndex};
use tracing::{info, warn};

/// Matching pipeline - imports, scores and stores one run
pub struct MatchingPipeline {
    config: Config,
    reasoner: Option<Box<dyn Reasoner>>,
}

impl MatchingPipeline {
    /// Create a new pipeline
    pub fn new(config: Config) -> Self {
        Self {
            config,
            reasoner: None,
        }
    }

    /// Run the pipeline
    pub async fn run(self) -> Result<MatchReport> {
        info!("Starting talentmatch run");

        let store = SqliteStore::new(&self.config.database.path).await?;
        self.import(&store).await?;

        let taxonomy = store.load_taxonomy().await?;
        if taxonomy.is_empty() {
            warn!("Taxonomy is empty; only exact skill overlap will score");
        }
        let taxonomy = apply_reasoning(taxonomy, self.reasoner.as_deref());

        let users = store.load_users().await?;
        let jobs = store.load_jobs().await?;
        info!("Loaded {} users and {} jobs", users.len(), jobs.len());

        let matching = MatchingConfig::from(self.config.matching);
        let outcome = tokio::task::spawn_blocking(move || {
            MatchOrchestrator::new(taxonomy, matching).run(&users, &jobs)
        })
        .await
        .context("Matching task failed")??;

        store.replace_matches(&outcome.run).await?;

        let report = outcome.report;
        info!(
            "Run {} stored: {} matches ({} strong, {} mid, {} weak) from {} users x {} jobs",
            outcome.run.id,
            report.matches(),
            report.strong,
            report.mid,
            report.weak,
            report.eligible_users,
            report.eligible_jobs
        );
        Ok(report)
    }

    async fn import(&self, store: &SqliteStore) -> Result<()> {
        let paths = &self.config.import;

        if let Some(path) = &paths.taxonomy_path {
            import_taxonomy(store, path).await?;
        }

        if paths.jobs_path.is_none() && paths.users_path.is_none() {
            return Ok(());
        }

        let taxonomy = store.load_taxonomy().await?;
        let importer = Importer::new(SkillIndex::from_taxonomy(&taxonomy))?;

        if let Some(path) = &paths.jobs_path {
            importer.import_jobs(store, path).await?;
        }
        if let Some(path) = &paths.users_path {
            importer.import_users(store, path).await?;
        }

        Ok(())
    }
}
