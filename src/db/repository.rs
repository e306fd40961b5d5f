//! Account repository for SSIS.
//!
//! Uniqueness of username and email is checked and enforced inside the same
//! transaction as the write, so a failed check never leaves a partial row.

use sqlx::{QueryBuilder, SqliteConnection};

use super::account::{Account, AccountUpdate, NewAccount};
use super::DbPool;
use crate::error::unique_violation;
use crate::{Result, SsisError};

const ACCOUNT_COLUMNS: &str = "id, username, password_hash, email, created_at";

/// Repository for account CRUD operations.
pub struct AccountRepository<'a> {
    pool: &'a DbPool,
}

impl<'a> AccountRepository<'a> {
    /// Create a new AccountRepository with the given database pool reference.
    pub fn new(pool: &'a DbPool) -> Self {
        Self { pool }
    }

    /// Create a new account.
    ///
    /// Fails with `DuplicateUsername` or `DuplicateEmail` if either value is
    /// already registered (compared case-insensitively).
    pub async fn create(&self, new_account: &NewAccount) -> Result<Account> {
        let mut tx = self.pool.begin_with("BEGIN IMMEDIATE").await?;

        ensure_available(&mut tx, &new_account.username, &new_account.email, None).await?;

        let id: i64 = sqlx::query_scalar(
            "INSERT INTO users (username, email, password_hash) VALUES (?, ?, ?) RETURNING id",
        )
        .bind(&new_account.username)
        .bind(&new_account.email)
        .bind(&new_account.password_hash)
        .fetch_one(&mut *tx)
        .await
        .map_err(classify_write_error)?;

        tx.commit().await?;

        self.get_by_id(id)
            .await?
            .ok_or_else(|| SsisError::NotFound("account".to_string()))
    }

    /// Get an account by ID.
    pub async fn get_by_id(&self, id: i64) -> Result<Option<Account>> {
        let account = sqlx::query_as::<_, Account>(&format!(
            "SELECT {ACCOUNT_COLUMNS} FROM users WHERE id = ?"
        ))
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        Ok(account)
    }

    /// Get an account by username (case-insensitive).
    pub async fn get_by_username(&self, username: &str) -> Result<Option<Account>> {
        let account = sqlx::query_as::<_, Account>(&format!(
            "SELECT {ACCOUNT_COLUMNS} FROM users WHERE username = ? COLLATE NOCASE"
        ))
        .bind(username)
        .fetch_optional(self.pool)
        .await?;

        Ok(account)
    }

    /// Update an account by ID.
    ///
    /// Only fields that are set in the update will be modified.
    /// Returns the updated account, or None if not found.
    pub async fn update(&self, id: i64, update: &AccountUpdate) -> Result<Option<Account>> {
        if update.is_empty() {
            return self.get_by_id(id).await;
        }

        let mut tx = self.pool.begin_with("BEGIN IMMEDIATE").await?;

        if let Some(ref username) = update.username {
            if username_taken(&mut tx, username, Some(id)).await? {
                return Err(SsisError::DuplicateUsername);
            }
        }
        if let Some(ref email) = update.email {
            if email_taken(&mut tx, email, Some(id)).await? {
                return Err(SsisError::DuplicateEmail);
            }
        }

        let mut query: QueryBuilder<sqlx::Sqlite> = QueryBuilder::new("UPDATE users SET ");
        let mut separated = query.separated(", ");

        if let Some(ref username) = update.username {
            separated.push("username = ");
            separated.push_bind_unseparated(username);
        }
        if let Some(ref email) = update.email {
            separated.push("email = ");
            separated.push_bind_unseparated(email);
        }
        if let Some(ref password_hash) = update.password_hash {
            separated.push("password_hash = ");
            separated.push_bind_unseparated(password_hash);
        }

        query.push(" WHERE id = ");
        query.push_bind(id);

        let result = query
            .build()
            .execute(&mut *tx)
            .await
            .map_err(classify_write_error)?;

        if result.rows_affected() == 0 {
            return Ok(None);
        }

        tx.commit().await?;
        self.get_by_id(id).await
    }

    /// Delete an account by ID.
    ///
    /// Returns true if an account was deleted, false if not found.
    pub async fn delete(&self, id: i64) -> Result<bool> {
        let result = sqlx::query("DELETE FROM users WHERE id = ?")
            .bind(id)
            .execute(self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Count all accounts.
    pub async fn count(&self) -> Result<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users")
            .fetch_one(self.pool)
            .await?;
        Ok(count)
    }
}

async fn ensure_available(
    conn: &mut SqliteConnection,
    username: &str,
    email: &str,
    exclude_id: Option<i64>,
) -> Result<()> {
    if username_taken(conn, username, exclude_id).await? {
        return Err(SsisError::DuplicateUsername);
    }
    if email_taken(conn, email, exclude_id).await? {
        return Err(SsisError::DuplicateEmail);
    }
    Ok(())
}

async fn username_taken(
    conn: &mut SqliteConnection,
    username: &str,
    exclude_id: Option<i64>,
) -> Result<bool> {
    let taken: bool = sqlx::query_scalar(
        "SELECT EXISTS(SELECT 1 FROM users WHERE username = ? COLLATE NOCASE AND id IS NOT ?)",
    )
    .bind(username)
    .bind(exclude_id)
    .fetch_one(&mut *conn)
    .await?;
    Ok(taken)
}

async fn email_taken(
    conn: &mut SqliteConnection,
    email: &str,
    exclude_id: Option<i64>,
) -> Result<bool> {
    let taken: bool = sqlx::query_scalar(
        "SELECT EXISTS(SELECT 1 FROM users WHERE email = ? COLLATE NOCASE AND id IS NOT ?)",
    )
    .bind(email)
    .bind(exclude_id)
    .fetch_one(&mut *conn)
    .await?;
    Ok(taken)
}

/// Map a unique violation that slipped past the pre-check to a duplicate error.
fn classify_write_error(err: sqlx::Error) -> SsisError {
    match unique_violation(&err) {
        Some(msg) if msg.contains("users.email") => SsisError::DuplicateEmail,
        Some(msg) if msg.contains("users.username") => SsisError::DuplicateUsername,
        _ => SsisError::from(err),
    }
}
