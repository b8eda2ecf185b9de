use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::sqlite::{SqlitePool, SqlitePoolOptions};
use std::path::PathBuf;
use uuid::Uuid;

use crate::error::{EstimatorError, Result};
use crate::estimate::{CostBreakdown, ProjectParams};

/// One persisted project row: the parameters plus the latest computed
/// breakdown snapshot, if any.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectRecord {
    pub id: Uuid,
    pub owner: Option<String>,
    pub project: ProjectParams,
    pub breakdown: Option<CostBreakdown>,
    pub updated_at: DateTime<Utc>,
}

impl ProjectRecord {
    pub fn new(owner: Option<String>, project: ProjectParams, breakdown: Option<CostBreakdown>) -> Self {
        Self {
            id: Uuid::new_v4(),
            owner,
            project,
            breakdown,
            updated_at: Utc::now(),
        }
    }
}

/// Record-shaped CRUD over saved projects, keyed by project id. The core
/// never queries beyond insert/select/update/delete by id.
pub struct ProjectStore {
    pool: SqlitePool,
}

impl ProjectStore {
    pub async fn new(db_path: PathBuf) -> Result<Self> {
        if let Some(parent) = db_path.parent() {
            std::fs::create_dir_all(parent).map_err(EstimatorError::from)?;
        }

        // A `:memory:` database is per-connection, so the pool must hold
        // exactly one connection (and never retire it) for the data to
        // survive between queries.
        let in_memory = db_path.as_os_str() == ":memory:";
        let pool = SqlitePoolOptions::new()
            .max_connections(if in_memory { 1 } else { 5 })
            .idle_timeout(if in_memory { None } else { Some(std::time::Duration::from_secs(600)) })
            .max_lifetime(if in_memory { None } else { Some(std::time::Duration::from_secs(1800)) })
            .connect_with(
                sqlx::sqlite::SqliteConnectOptions::new()
                    .filename(&db_path)
                    .create_if_missing(true),
            )
            .await
            .map_err(EstimatorError::from)?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS projects (
                id TEXT PRIMARY KEY,
                owner TEXT,
                project_json TEXT NOT NULL,
                breakdown_json TEXT,
                updated_at INTEGER NOT NULL
            )
            "#,
        )
        .execute(&pool)
        .await
        .map_err(EstimatorError::from)?;

        sqlx::query("CREATE INDEX IF NOT EXISTS idx_projects_owner ON projects(owner)")
            .execute(&pool)
            .await
            .map_err(EstimatorError::from)?;

        Ok(Self { pool })
    }

    pub async fn insert(&self, record: &ProjectRecord) -> Result<()> {
        let breakdown_json = record
            .breakdown
            .as_ref()
            .map(serde_json::to_string)
            .transpose()?;

        sqlx::query(
            r#"
            INSERT INTO projects (id, owner, project_json, breakdown_json, updated_at)
            VALUES (?1, ?2, ?3, ?4, ?5)
            "#,
        )
        .bind(record.id.to_string())
        .bind(&record.owner)
        .bind(serde_json::to_string(&record.project)?)
        .bind(breakdown_json)
        .bind(record.updated_at.timestamp())
        .execute(&self.pool)
        .await
        .map_err(EstimatorError::from)?;

        Ok(())
    }

    pub async fn get(&self, id: Uuid) -> Result<Option<ProjectRecord>> {
        let row: Option<(String, Option<String>, String, Option<String>, i64)> = sqlx::query_as(
            "SELECT id, owner, project_json, breakdown_json, updated_at FROM projects WHERE id = ?1",
        )
        .bind(id.to_string())
        .fetch_optional(&self.pool)
        .await
        .map_err(EstimatorError::from)?;

        let Some((id_text, owner, project_json, breakdown_json, updated_at)) = row else {
            return Ok(None);
        };

        let id = Uuid::parse_str(&id_text)
            .map_err(|e| EstimatorError::Unknown(format!("bad project id in storage: {}", e)))?;
        let project: ProjectParams = serde_json::from_str(&project_json)?;
        let breakdown = breakdown_json
            .as_deref()
            .map(serde_json::from_str)
            .transpose()?;
        let updated_at = DateTime::from_timestamp(updated_at, 0).unwrap_or_else(Utc::now);

        Ok(Some(ProjectRecord {
            id,
            owner,
            project,
            breakdown,
            updated_at,
        }))
    }

    pub async fn update(&self, record: &ProjectRecord) -> Result<()> {
        let breakdown_json = record
            .breakdown
            .as_ref()
            .map(serde_json::to_string)
            .transpose()?;

        sqlx::query(
            r#"
            UPDATE projects
            SET owner = ?2, project_json = ?3, breakdown_json = ?4, updated_at = ?5
            WHERE id = ?1
            "#,
        )
        .bind(record.id.to_string())
        .bind(&record.owner)
        .bind(serde_json::to_string(&record.project)?)
        .bind(breakdown_json)
        .bind(Utc::now().timestamp())
        .execute(&self.pool)
        .await
        .map_err(EstimatorError::from)?;

        Ok(())
    }

    pub async fn delete(&self, id: Uuid) -> Result<()> {
        sqlx::query("DELETE FROM projects WHERE id = ?1")
            .bind(id.to_string())
            .execute(&self.pool)
            .await
            .map_err(EstimatorError::from)?;
        Ok(())
    }
}
