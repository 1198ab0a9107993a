//! SQLite database operations
//!
//! All SQL access goes through this module. `Database` owns the pool and
//! implements the repository traits directly.

use std::path::Path;

use async_trait::async_trait;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::{Executor, Pool, QueryBuilder, Sqlite};

use super::error::{StoreError, StoreResult};
use super::models::*;
use super::repository::{AccountRepository, StatusRepository, TimelineRepository};
use super::timeline::{PublicTimelineQuery, TimelineFilter};
use crate::error::AppError;

/// Columns of a status joined with its author, aliased to match `StatusRow`
const STATUS_WITH_ACCOUNT_SELECT: &str = r#"
    SELECT s.id AS status_id,
           s.content,
           s.created_at AS status_created_at,
           a.id AS account_id,
           a.username,
           a.password_hash,
           a.display_name,
           a.note,
           a.avatar,
           a.header,
           a.created_at AS account_created_at
    FROM status s
    INNER JOIN account a ON s.account_id = a.id
"#;

const ACCOUNT_SELECT_BY_USERNAME: &str = r#"
    SELECT id, username, password_hash, display_name, note, avatar, header, created_at
    FROM account
    WHERE username = ?
"#;

const ACCOUNT_SELECT_BY_ID: &str = r#"
    SELECT id, username, password_hash, display_name, note, avatar, header, created_at
    FROM account
    WHERE id = ?
"#;

/// Database connection pool wrapper
pub struct Database {
    pool: Pool<Sqlite>,
}

impl Database {
    // =========================================================================
    // Connection
    // =========================================================================

    /// Connect to SQLite database
    ///
    /// Creates the database file if it doesn't exist.
    /// Runs pending migrations automatically.
    ///
    /// # Arguments
    /// * `path` - Path to SQLite database file
    /// * `max_connections` - Pool size
    ///
    /// # Errors
    /// Returns error if connection or migration fails
    pub async fn connect(path: &Path, max_connections: u32) -> Result<Self, AppError> {
        // Create parent directory if it doesn't exist
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| AppError::Database(sqlx::Error::Io(e)))?;
        }

        let options = SqliteConnectOptions::new()
            .filename(path)
            .create_if_missing(true)
            .foreign_keys(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(max_connections)
            .connect_with(options)
            .await?;

        sqlx::migrate!("./migrations")
            .run(&pool)
            .await
            .map_err(|e| {
                tracing::error!("Migration failed: {}", e);
                AppError::Internal(anyhow::anyhow!("Migration failed: {}", e))
            })?;

        tracing::info!(path = %path.display(), "Database connected and migrated successfully");

        Ok(Self { pool })
    }
}

// =============================================================================
// Account
// =============================================================================

#[async_trait]
impl AccountRepository for Database {
    async fn find_by_username(&self, username: &str) -> StoreResult<Option<Account>> {
        let account = sqlx::query_as::<_, Account>(ACCOUNT_SELECT_BY_USERNAME)
            .bind(username)
            .fetch_optional(&self.pool)
            .await?;

        Ok(account)
    }

    async fn add(&self, account: NewAccount) -> StoreResult<Account> {
        // Insert and read back on one connection; the row is visible to
        // every pooled connection once the transaction commits.
        let mut tx = self.pool.begin().await?;

        let result = sqlx::query(
            r#"
            INSERT INTO account (
                username, password_hash, display_name, avatar, header, note
            ) VALUES (?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&account.username)
        .bind(&account.password_hash)
        .bind(&account.display_name)
        .bind(&account.avatar)
        .bind(&account.header)
        .bind(&account.note)
        .execute(&mut *tx)
        .await
        .map_err(|e| StoreError::from_account_insert(e, &account.username))?;

        let id: AccountId = result.last_insert_rowid();
        let inserted = sqlx::query_as::<_, Account>(ACCOUNT_SELECT_BY_ID)
            .bind(id)
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;

        Ok(inserted)
    }
}

// =============================================================================
// Status
// =============================================================================

/// Fetch one status joined with its author, on any executor
async fn select_status_with_account<'c, E>(
    executor: E,
    id: StatusId,
) -> Result<Option<Status>, sqlx::Error>
where
    E: Executor<'c, Database = Sqlite>,
{
    let mut builder = QueryBuilder::<Sqlite>::new(STATUS_WITH_ACCOUNT_SELECT);
    builder.push(" WHERE s.id = ").push_bind(id);

    let row = builder
        .build_query_as::<StatusRow>()
        .fetch_optional(executor)
        .await?;

    Ok(row.map(Status::from))
}

#[async_trait]
impl StatusRepository for Database {
    async fn find_with_account_by_id(&self, id: StatusId) -> StoreResult<Option<Status>> {
        Ok(select_status_with_account(&self.pool, id).await?)
    }

    async fn add(&self, status: NewStatus) -> StoreResult<Status> {
        let mut tx = self.pool.begin().await?;

        let result = sqlx::query("INSERT INTO status (account_id, content) VALUES (?, ?)")
            .bind(status.account_id)
            .bind(&status.content)
            .execute(&mut *tx)
            .await
            .map_err(|e| StoreError::from_status_insert(e, status.account_id))?;

        let id: StatusId = result.last_insert_rowid();

        // Same transaction as the insert, so a miss here is a store fault,
        // never an absent record.
        let inserted = select_status_with_account(&mut *tx, id)
            .await?
            .ok_or(StoreError::Database(sqlx::Error::RowNotFound))?;

        tx.commit().await?;

        Ok(inserted)
    }

    async fn delete_by_id(&self, id: StatusId) -> StoreResult<()> {
        let result = sqlx::query("DELETE FROM status WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound);
        }

        Ok(())
    }
}

// =============================================================================
// Timeline
// =============================================================================

#[async_trait]
impl TimelineRepository for Database {
    async fn find_public(&self, query: PublicTimelineQuery) -> StoreResult<Vec<Status>> {
        let filter = TimelineFilter::from_query(&query);

        let mut builder = QueryBuilder::<Sqlite>::new(STATUS_WITH_ACCOUNT_SELECT);
        filter.push_where(&mut builder);
        builder
            .push(" ORDER BY s.created_at DESC, s.id DESC LIMIT ")
            .push_bind(filter.limit());

        let rows = builder
            .build_query_as::<StatusRow>()
            .fetch_all(&self.pool)
            .await?;

        Ok(rows.into_iter().map(Status::from).collect())
    }
}
