use crate::models::{JobPosting, WorkerProfile, WorkType};
use sqlx::postgres::{PgPoolOptions, PgRow};
use sqlx::{PgPool, Row};
use std::collections::BTreeSet;
use std::time::Duration;
use thiserror::Error;

/// Errors that can occur when interacting with PostgreSQL
#[derive(Debug, Error)]
pub enum PostgresError {
    #[error("SQLx error: {0}")]
    SqlxError(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    MigrateError(#[from] sqlx::migrate::MigrateError),

    #[error("Not found: {0}")]
    NotFound(String),
}

/// Connection options for [`PostgresClient::connect`]
#[derive(Debug, Clone)]
pub struct PoolOptions {
    pub max_connections: u32,
    pub min_connections: u32,
    pub acquire_timeout: Duration,
    pub idle_timeout: Duration,
    pub run_migrations: bool,
}

impl Default for PoolOptions {
    fn default() -> Self {
        Self {
            max_connections: 10,
            min_connections: 1,
            acquire_timeout: Duration::from_secs(5),
            idle_timeout: Duration::from_secs(600),
            run_migrations: false,
        }
    }
}

/// Read-only adapter over the marketplace's job and worker tables
///
/// Rows are converted into the scorer's value types here, so stored
/// representations (text arrays, serialized work-type lists, signed
/// integers) never leak past this module.
pub struct PostgresClient {
    pool: PgPool,
}

impl PostgresClient {
    /// Create a new PostgreSQL client from a connection string
    pub async fn connect(database_url: &str, options: PoolOptions) -> Result<Self, PostgresError> {
        let pool = PgPoolOptions::new()
            .max_connections(options.max_connections)
            .min_connections(options.min_connections)
            .acquire_timeout(options.acquire_timeout)
            .idle_timeout(options.idle_timeout)
            .test_before_acquire(true)
            .connect(database_url)
            .await?;

        if options.run_migrations {
            sqlx::migrate!("./migrations").run(&pool).await?;
            tracing::info!("Database migrations applied");
        }

        Ok(Self { pool })
    }

    /// Wrap an existing pool without connecting or migrating
    pub fn from_pool(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Fetch a single job posting by id
    pub async fn get_job_posting(&self, job_id: &str) -> Result<JobPosting, PostgresError> {
        let query = r#"
            SELECT id, required_skills, salary_amount, city, state,
                   min_experience_years, work_type
            FROM job_postings
            WHERE id = $1
        "#;

        let row = sqlx::query(query)
            .bind(job_id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| PostgresError::NotFound(format!("Job posting {}", job_id)))?;

        job_from_row(&row)
    }

    /// Fetch a single worker profile by id
    pub async fn get_worker_profile(&self, worker_id: &str) -> Result<WorkerProfile, PostgresError> {
        let query = r#"
            SELECT id, skills, hourly_rate, city, state, experience_years,
                   preferred_work_types, is_available
            FROM worker_profiles
            WHERE id = $1
        "#;

        let row = sqlx::query(query)
            .bind(worker_id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| PostgresError::NotFound(format!("Worker profile {}", worker_id)))?;

        worker_from_row(&row)
    }

    /// List open job postings, newest first
    ///
    /// Rows that cannot be converted are skipped with a warning.
    pub async fn list_open_jobs(&self, limit: usize) -> Result<Vec<JobPosting>, PostgresError> {
        let query = r#"
            SELECT id, required_skills, salary_amount, city, state,
                   min_experience_years, work_type
            FROM job_postings
            WHERE status = 'OPEN'
            ORDER BY created_at DESC
            LIMIT $1
        "#;

        let rows = sqlx::query(query)
            .bind(limit as i64)
            .fetch_all(&self.pool)
            .await?;

        let jobs = collect_rows(&rows, job_from_row);
        tracing::debug!("Loaded {} open job postings", jobs.len());

        Ok(jobs)
    }

    /// List worker profiles, most recently updated first
    pub async fn list_worker_profiles(&self, limit: usize) -> Result<Vec<WorkerProfile>, PostgresError> {
        let query = r#"
            SELECT id, skills, hourly_rate, city, state, experience_years,
                   preferred_work_types, is_available
            FROM worker_profiles
            ORDER BY updated_at DESC
            LIMIT $1
        "#;

        let rows = sqlx::query(query)
            .bind(limit as i64)
            .fetch_all(&self.pool)
            .await?;

        let workers = collect_rows(&rows, worker_from_row);
        tracing::debug!("Loaded {} worker profiles", workers.len());

        Ok(workers)
    }

    /// Health check for the database connection
    pub async fn health_check(&self) -> Result<bool, PostgresError> {
        sqlx::query("SELECT 1")
            .fetch_one(&self.pool)
            .await
            .map(|_| true)
            .map_err(Into::into)
    }
}

fn collect_rows<T>(rows: &[PgRow], convert: fn(&PgRow) -> Result<T, PostgresError>) -> Vec<T> {
    rows.iter()
        .filter_map(|row| match convert(row) {
            Ok(value) => Some(value),
            Err(e) => {
                tracing::warn!("Skipping unusable row: {}", e);
                None
            }
        })
        .collect()
}

fn job_from_row(row: &PgRow) -> Result<JobPosting, PostgresError> {
    let id: String = row.try_get("id")?;
    let raw_work_type: Option<String> = row.try_get("work_type")?;
    let work_type = job_work_type(&id, raw_work_type.as_deref());

    Ok(JobPosting {
        required_skills: skill_set(row.try_get("required_skills")?),
        salary_amount: non_negative(row.try_get("salary_amount")?),
        city: row.try_get("city")?,
        state: row.try_get("state")?,
        min_experience_years: row
            .try_get::<Option<i32>, _>("min_experience_years")?
            .map(years),
        work_type,
        id,
    })
}

fn worker_from_row(row: &PgRow) -> Result<WorkerProfile, PostgresError> {
    let raw_work_types: Option<String> = row.try_get("preferred_work_types")?;

    Ok(WorkerProfile {
        id: row.try_get("id")?,
        skills: skill_set(row.try_get("skills")?),
        hourly_rate: non_negative(row.try_get("hourly_rate")?),
        city: row.try_get("city")?,
        state: row.try_get("state")?,
        experience_years: years(row.try_get("experience_years")?),
        preferred_work_types: raw_work_types
            .as_deref()
            .map(parse_work_types)
            .unwrap_or_default(),
        is_available: row.try_get("is_available")?,
    })
}

/// Unknown or blank stored work types leave the job without one
fn job_work_type(job_id: &str, raw: Option<&str>) -> Option<WorkType> {
    let raw = raw.map(str::trim).filter(|raw| !raw.is_empty())?;

    match raw.parse::<WorkType>() {
        Ok(work_type) => Some(work_type),
        Err(e) => {
            tracing::warn!("Job {} has {}; scoring without a work type", job_id, e);
            None
        }
    }
}

/// Parse a stored work-type preference list
///
/// Accepts a JSON array (`["FULL_TIME","LIVE_IN"]`) or a comma-separated
/// list (`FULL_TIME, LIVE_IN`). Unknown entries are dropped with a warning.
pub fn parse_work_types(raw: &str) -> BTreeSet<WorkType> {
    let raw = raw.trim();

    let entries: Vec<String> = if raw.starts_with('[') {
        match serde_json::from_str(raw) {
            Ok(entries) => entries,
            Err(e) => {
                tracing::warn!("Malformed work type list {:?}: {}", raw, e);
                return BTreeSet::new();
            }
        }
    } else {
        raw.split(',').map(str::to_string).collect()
    };

    entries
        .iter()
        .filter(|entry| !entry.trim().is_empty())
        .filter_map(|entry| match entry.parse::<WorkType>() {
            Ok(work_type) => Some(work_type),
            Err(e) => {
                tracing::warn!("Ignoring stored work type: {}", e);
                None
            }
        })
        .collect()
}

fn skill_set(skills: Option<Vec<String>>) -> BTreeSet<String> {
    skills
        .unwrap_or_default()
        .into_iter()
        .filter(|skill| !skill.trim().is_empty())
        .collect()
}

fn non_negative(value: Option<f64>) -> Option<f64> {
    value.map(|amount| amount.max(0.0))
}

fn years(value: i32) -> u32 {
    u32::try_from(value).unwrap_or(0)
}
