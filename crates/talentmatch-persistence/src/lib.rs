use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use sqlx::{Row, SqlitePool};
use std::collections::BTreeMap;
use talentmatch_taxonomy::Taxonomy;
use talentmatch_types::{
    JobId, JobPosting, MatchClass, MatchRun, SkillId, UserId, UserMatch, UserProfile,
};
use tracing::{debug, info};
use uuid::Uuid;

/// Bookkeeping row for a stored run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchRunSummary {
    pub id: Uuid,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub match_count: i64,
}

/// User/job store and taxonomy source backed by SQLite
pub struct SqliteStore {
    pool: SqlitePool,
}

impl SqliteStore {
    /// Open (or create) the database and run migrations
    pub async fn new(database_path: &str) -> Result<Self> {
        let database_url = format!("sqlite:{}?mode=rwc", database_path);
        let pool = SqlitePool::connect(&database_url)
            .await
            .with_context(|| format!("Failed to open database {}", database_path))?;

        let store = Self { pool };
        store.run_migrations().await?;

        info!("Store initialized with database: {}", database_path);
        Ok(store)
    }

    /// Run database migrations
    async fn run_migrations(&self) -> Result<()> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS skills (
                id TEXT PRIMARY KEY
            );

            CREATE TABLE IF NOT EXISTS skill_edges (
                parent TEXT NOT NULL,
                child TEXT NOT NULL,
                PRIMARY KEY (parent, child)
            );

            CREATE TABLE IF NOT EXISTS users (
                id TEXT PRIMARY KEY,
                email TEXT UNIQUE NOT NULL,
                created_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP
            );

            CREATE TABLE IF NOT EXISTS user_skills (
                user_id TEXT NOT NULL,
                skill_id TEXT NOT NULL,
                PRIMARY KEY (user_id, skill_id),
                FOREIGN KEY (user_id) REFERENCES users(id)
            );

            CREATE TABLE IF NOT EXISTS jobs (
                id TEXT PRIMARY KEY,
                url TEXT NOT NULL,
                title TEXT,
                company TEXT
            );

            CREATE TABLE IF NOT EXISTS job_skills (
                job_id TEXT NOT NULL,
                skill_id TEXT NOT NULL,
                PRIMARY KEY (job_id, skill_id),
                FOREIGN KEY (job_id) REFERENCES jobs(id)
            );

            CREATE TABLE IF NOT EXISTS additional_skills (
                job_id TEXT NOT NULL,
                name TEXT NOT NULL,
                PRIMARY KEY (job_id, name),
                FOREIGN KEY (job_id) REFERENCES jobs(id)
            );

            CREATE TABLE IF NOT EXISTS match_runs (
                id TEXT PRIMARY KEY,
                started_at TEXT NOT NULL,
                finished_at TEXT NOT NULL,
                match_count INTEGER NOT NULL
            );

            CREATE TABLE IF NOT EXISTS matches (
                run_id TEXT NOT NULL,
                user_id TEXT NOT NULL,
                job_id TEXT NOT NULL,
                similarity REAL NOT NULL,
                match_type TEXT NOT NULL,
                PRIMARY KEY (user_id, job_id)
            );

            CREATE INDEX IF NOT EXISTS idx_user_skills_user ON user_skills(user_id);
            CREATE INDEX IF NOT EXISTS idx_job_skills_job ON job_skills(job_id);
            CREATE INDEX IF NOT EXISTS idx_matches_user ON matches(user_id);
            "#,
        )
        .execute(&self.pool)
        .await?;

        info!("Database migrations completed");
        Ok(())
    }

    /// Replace the stored taxonomy with `taxonomy`
    pub async fn save_taxonomy(&self, taxonomy: &Taxonomy) -> Result<()> {
        let mut tx = self.pool.begin().await?;

        sqlx::query("DELETE FROM skill_edges").execute(&mut *tx).await?;
        sqlx::query("DELETE FROM skills").execute(&mut *tx).await?;

        for skill in taxonomy.skills() {
            sqlx::query("INSERT INTO skills (id) VALUES (?)")
                .bind(skill.as_str())
                .execute(&mut *tx)
                .await?;
        }

        for (parent, child) in taxonomy.edges() {
            sqlx::query("INSERT INTO skill_edges (parent, child) VALUES (?, ?)")
                .bind(parent.as_str())
                .bind(child.as_str())
                .execute(&mut *tx)
                .await?;
        }

        tx.commit().await?;
        info!(
            "Saved taxonomy: {} skills, {} edges",
            taxonomy.len(),
            taxonomy.edge_count()
        );
        Ok(())
    }

    /// Read the full taxonomy into memory
    pub async fn load_taxonomy(&self) -> Result<Taxonomy> {
        let mut taxonomy = Taxonomy::new();

        let skills = sqlx::query("SELECT id FROM skills")
            .fetch_all(&self.pool)
            .await
            .context("Failed to load skills")?;
        for row in &skills {
            taxonomy.add_skill(SkillId::new(row.try_get::<String, _>("id")?));
        }

        let edges = sqlx::query("SELECT parent, child FROM skill_edges")
            .fetch_all(&self.pool)
            .await
            .context("Failed to load taxonomy edges")?;
        for row in &edges {
            taxonomy.add_edge(
                SkillId::new(row.try_get::<String, _>("parent")?),
                SkillId::new(row.try_get::<String, _>("child")?),
            );
        }

        debug!(
            "Loaded taxonomy: {} skills, {} edges",
            taxonomy.len(),
            taxonomy.edge_count()
        );
        Ok(taxonomy)
    }

    /// Insert or update a user and replace their skills
    pub async fn save_user(&self, user: &UserProfile) -> Result<()> {
        let mut tx = self.pool.begin().await?;

        sqlx::query(
            r#"
            INSERT INTO users (id, email) VALUES (?, ?)
            ON CONFLICT(id) DO UPDATE SET email = excluded.email
            "#,
        )
        .bind(user.id.as_str())
        .bind(&user.email)
        .execute(&mut *tx)
        .await?;

        sqlx::query("DELETE FROM user_skills WHERE user_id = ?")
            .bind(user.id.as_str())
            .execute(&mut *tx)
            .await?;

        for skill in &user.skills {
            sqlx::query("INSERT INTO user_skills (user_id, skill_id) VALUES (?, ?)")
                .bind(user.id.as_str())
                .bind(skill.as_str())
                .execute(&mut *tx)
                .await?;
        }

        tx.commit().await?;
        Ok(())
    }

    /// Insert or update a job and replace its required skills
    pub async fn save_job(&self, job: &JobPosting) -> Result<()> {
        let mut tx = self.pool.begin().await?;

        sqlx::query(
            r#"
            INSERT INTO jobs (id, url, title, company) VALUES (?, ?, ?, ?)
            ON CONFLICT(id) DO UPDATE SET
                url = excluded.url,
                title = excluded.title,
                company = excluded.company
            "#,
        )
        .bind(job.id.as_str())
        .bind(&job.url)
        .bind(&job.title)
        .bind(&job.company)
        .execute(&mut *tx)
        .await?;

        sqlx::query("DELETE FROM job_skills WHERE job_id = ?")
            .bind(job.id.as_str())
            .execute(&mut *tx)
            .await?;

        for skill in &job.required_skills {
            sqlx::query("INSERT INTO job_skills (job_id, skill_id) VALUES (?, ?)")
                .bind(job.id.as_str())
                .bind(skill.as_str())
                .execute(&mut *tx)
                .await?;
        }

        tx.commit().await?;
        Ok(())
    }

    /// Replace the job skills that have no taxonomy node
    pub async fn save_additional_skills(&self, job_id: &JobId, names: &[String]) -> Result<()> {
        let mut tx = self.pool.begin().await?;

        sqlx::query("DELETE FROM additional_skills WHERE job_id = ?")
            .bind(job_id.as_str())
            .execute(&mut *tx)
            .await?;

        for name in names {
            sqlx::query("INSERT OR IGNORE INTO additional_skills (job_id, name) VALUES (?, ?)")
                .bind(job_id.as_str())
                .bind(name)
                .execute(&mut *tx)
                .await?;
        }

        tx.commit().await?;
        Ok(())
    }

    /// Unmapped skill names recorded for a job
    pub async fn additional_skills(&self, job_id: &JobId) -> Result<Vec<String>> {
        let rows = sqlx::query("SELECT name FROM additional_skills WHERE job_id = ? ORDER BY name")
            .bind(job_id.as_str())
            .fetch_all(&self.pool)
            .await?;

        rows.iter()
            .map(|row| Ok(row.try_get::<String, _>("name")?))
            .collect()
    }

    /// All users with their skills, ordered by id
    pub async fn load_users(&self) -> Result<Vec<UserProfile>> {
        let rows = sqlx::query("SELECT id, email FROM users ORDER BY id")
            .fetch_all(&self.pool)
            .await
            .context("Failed to load users")?;

        let mut users = BTreeMap::new();
        for row in &rows {
            let id: String = row.try_get("id")?;
            let email: String = row.try_get("email")?;
            users.insert(id.clone(), UserProfile::new(id, email));
        }

        let skills = sqlx::query("SELECT user_id, skill_id FROM user_skills")
            .fetch_all(&self.pool)
            .await
            .context("Failed to load user skills")?;
        for row in &skills {
            let user_id: String = row.try_get("user_id")?;
            if let Some(user) = users.get_mut(&user_id) {
                user.skills.insert(SkillId::new(row.try_get::<String, _>("skill_id")?));
            }
        }

        Ok(users.into_values().collect())
    }

    /// All jobs with their required skills, ordered by id
    pub async fn load_jobs(&self) -> Result<Vec<JobPosting>> {
        let rows = sqlx::query("SELECT id, url, title, company FROM jobs ORDER BY id")
            .fetch_all(&self.pool)
            .await
            .context("Failed to load jobs")?;

        let mut jobs = BTreeMap::new();
        for row in &rows {
            let id: String = row.try_get("id")?;
            let mut job = JobPosting::new(id.clone(), row.try_get::<String, _>("url")?);
            job.title = row.try_get("title")?;
            job.company = row.try_get("company")?;
            jobs.insert(id, job);
        }

        let skills = sqlx::query("SELECT job_id, skill_id FROM job_skills")
            .fetch_all(&self.pool)
            .await
            .context("Failed to load job skills")?;
        for row in &skills {
            let job_id: String = row.try_get("job_id")?;
            if let Some(job) = jobs.get_mut(&job_id) {
                job.required_skills
                    .insert(SkillId::new(row.try_get::<String, _>("skill_id")?));
            }
        }

        Ok(jobs.into_values().collect())
    }

    /// Replace every stored match with the results of `run`.
    ///
    /// Runs in a single transaction: readers see either the previous result
    /// set or the new one, never an empty table in between.
    pub async fn replace_matches(&self, run: &MatchRun) -> Result<()> {
        let mut tx = self.pool.begin().await?;

        sqlx::query("DELETE FROM matches").execute(&mut *tx).await?;

        sqlx::query(
            r#"
            INSERT INTO match_runs (id, started_at, finished_at, match_count)
            VALUES (?, ?, ?, ?)
            "#,
        )
        .bind(run.id.to_string())
        .bind(run.started_at.to_rfc3339())
        .bind(run.finished_at.to_rfc3339())
        .bind(run.results.len() as i64)
        .execute(&mut *tx)
        .await?;

        for result in &run.results {
            sqlx::query(
                r#"
                INSERT INTO matches (run_id, user_id, job_id, similarity, match_type)
                VALUES (?, ?, ?, ?, ?)
                "#,
            )
            .bind(run.id.to_string())
            .bind(result.user_id.as_str())
            .bind(result.job_id.as_str())
            .bind(result.similarity)
            .bind(result.classification.label())
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await.context("Failed to commit match results")?;
        info!("Stored {} matches for run {}", run.results.len(), run.id);
        Ok(())
    }

    /// Stored matches of one user, best first
    pub async fn list_user_matches(&self, user_id: &UserId) -> Result<Vec<UserMatch>> {
        let rows = sqlx::query(
            r#"
            SELECT
                m.job_id,
                j.title,
                j.company,
                m.similarity,
                m.match_type
            FROM matches m
            JOIN jobs j ON m.job_id = j.id
            WHERE m.user_id = ?
            ORDER BY m.similarity DESC, m.job_id
            "#,
        )
        .bind(user_id.as_str())
        .fetch_all(&self.pool)
        .await?;

        rows.iter()
            .map(|row| {
                let match_type: String = row.try_get("match_type")?;
                Ok(UserMatch {
                    job_id: JobId::new(row.try_get::<String, _>("job_id")?),
                    job_title: row.try_get("title")?,
                    company_name: row.try_get("company")?,
                    similarity: row.try_get("similarity")?,
                    match_type: MatchClass::from_label(&match_type)
                        .with_context(|| format!("Unknown match type '{}'", match_type))?,
                })
            })
            .collect()
    }

    /// Most recent stored run, if any
    pub async fn latest_run(&self) -> Result<Option<MatchRunSummary>> {
        let row = sqlx::query(
            r#"
            SELECT id, started_at, finished_at, match_count
            FROM match_runs
            ORDER BY rowid DESC
            LIMIT 1
            "#,
        )
        .fetch_optional(&self.pool)
        .await?;

        let Some(row) = row else {
            return Ok(None);
        };

        let parse_time = |column: &str| -> Result<DateTime<Utc>> {
            let value: String = row.try_get(column)?;
            Ok(DateTime::parse_from_rfc3339(&value)
                .with_context(|| format!("Invalid timestamp in match_runs.{}", column))?
                .with_timezone(&Utc))
        };

        Ok(Some(MatchRunSummary {
            id: Uuid::parse_str(&row.try_get::<String, _>("id")?)?,
            started_at: parse_time("started_at")?,
            finished_at: parse_time("finished_at")?,
            match_count: row.try_get("match_count")?,
        }))
    }
}
