//! Subject repository implementation.

use sqlx::PgPool;
use uuid::Uuid;

use fleetgate_core::error::{AppError, ErrorKind};
use fleetgate_core::result::AppResult;
use fleetgate_entity::subject::{RoleName, SubjectAccount};

/// Flat row shape before role aggregation.
#[derive(Debug, sqlx::FromRow)]
struct SubjectRow {
    id: Uuid,
    email: String,
    password_hash: String,
    team_id: Option<Uuid>,
    department_id: Option<Uuid>,
    active: bool,
    created_at: chrono::DateTime<chrono::Utc>,
}

/// Repository for subject account lookups.
#[derive(Debug, Clone)]
pub struct SubjectRepository {
    pool: PgPool,
}

impl SubjectRepository {
    /// Create a new subject repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find a subject account by email, with role assignments aggregated.
    pub async fn find_by_email(&self, email: &str) -> AppResult<Option<SubjectAccount>> {
        let row = sqlx::query_as::<_, SubjectRow>(
            "SELECT s.id, s.email, s.password_hash, s.team_id, t.department_id, s.active, s.created_at \
             FROM subjects s LEFT JOIN teams t ON t.id = s.team_id \
             WHERE s.email = $1",
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to find subject by email", e)
        })?;

        match row {
            Some(row) => Ok(Some(self.with_roles(row).await?)),
            None => Ok(None),
        }
    }

    /// Find a subject account by ID, with role assignments aggregated.
    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<SubjectAccount>> {
        let row = sqlx::query_as::<_, SubjectRow>(
            "SELECT s.id, s.email, s.password_hash, s.team_id, t.department_id, s.active, s.created_at \
             FROM subjects s LEFT JOIN teams t ON t.id = s.team_id \
             WHERE s.id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find subject", e))?;

        match row {
            Some(row) => Ok(Some(self.with_roles(row).await?)),
            None => Ok(None),
        }
    }

    /// Load role assignments for a row and assemble the aggregate.
    async fn with_roles(&self, row: SubjectRow) -> AppResult<SubjectAccount> {
        let roles: Vec<RoleName> =
            sqlx::query_scalar("SELECT role FROM subject_roles WHERE subject_id = $1")
                .bind(row.id)
                .fetch_all(&self.pool)
                .await
                .map_err(|e| {
                    AppError::with_source(ErrorKind::Database, "Failed to load subject roles", e)
                })?;

        Ok(SubjectAccount {
            id: row.id,
            email: row.email,
            password_hash: row.password_hash,
            roles,
            team_id: row.team_id,
            department_id: row.department_id,
            active: row.active,
            created_at: row.created_at,
        })
    }
}
