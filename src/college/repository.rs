//! College repository for SSIS.

use sqlx::SqliteConnection;

use super::types::{College, CollegeSummary, NewCollege};
use crate::db::DbPool;
use crate::error::unique_violation;
use crate::{Result, SsisError};

/// Repository for college CRUD operations.
pub struct CollegeRepository<'a> {
    pool: &'a DbPool,
}

impl<'a> CollegeRepository<'a> {
    /// Create a new CollegeRepository with the given database pool reference.
    pub fn new(pool: &'a DbPool) -> Self {
        Self { pool }
    }

    /// List all colleges ordered by name, with program and student counts.
    ///
    /// Students are counted through the programs the college owns.
    pub async fn list_summaries(&self) -> Result<Vec<CollegeSummary>> {
        let colleges = sqlx::query_as::<_, CollegeSummary>(
            r#"
            SELECT c.id, c.code, c.name,
                   (SELECT COUNT(*) FROM programs p WHERE p.college_id = c.id) AS num_programs,
                   (SELECT COUNT(*) FROM students s
                      JOIN programs p ON s.program_id = p.id
                     WHERE p.college_id = c.id) AS num_students
            FROM colleges c
            ORDER BY c.name COLLATE NOCASE, c.code
            "#,
        )
        .fetch_all(self.pool)
        .await?;

        Ok(colleges)
    }

    /// Get a college by ID.
    pub async fn get_by_id(&self, id: i64) -> Result<Option<College>> {
        let college =
            sqlx::query_as::<_, College>("SELECT id, code, name FROM colleges WHERE id = ?")
                .bind(id)
                .fetch_optional(self.pool)
                .await?;

        Ok(college)
    }

    /// Check whether a college exists.
    pub async fn exists(&self, id: i64) -> Result<bool> {
        let exists: bool = sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM colleges WHERE id = ?)")
            .bind(id)
            .fetch_one(self.pool)
            .await?;
        Ok(exists)
    }

    /// Create a new college.
    pub async fn create(&self, college: &NewCollege) -> Result<College> {
        let mut tx = self.pool.begin_with("BEGIN IMMEDIATE").await?;

        ensure_unique(&mut tx, college, None).await?;

        let created = sqlx::query_as::<_, College>(
            "INSERT INTO colleges (code, name) VALUES (?, ?) RETURNING id, code, name",
        )
        .bind(&college.code)
        .bind(&college.name)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| classify_write_error(e, college))?;

        tx.commit().await?;
        Ok(created)
    }

    /// Update a college's code and name.
    ///
    /// Returns None if the college does not exist.
    pub async fn update(&self, id: i64, college: &NewCollege) -> Result<Option<College>> {
        let mut tx = self.pool.begin_with("BEGIN IMMEDIATE").await?;

        let exists: bool = sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM colleges WHERE id = ?)")
            .bind(id)
            .fetch_one(&mut *tx)
            .await?;
        if !exists {
            return Ok(None);
        }

        ensure_unique(&mut tx, college, Some(id)).await?;

        let updated = sqlx::query_as::<_, College>(
            "UPDATE colleges SET code = ?, name = ? WHERE id = ? RETURNING id, code, name",
        )
        .bind(&college.code)
        .bind(&college.name)
        .bind(id)
        .fetch_optional(&mut *tx)
        .await
        .map_err(|e| classify_write_error(e, college))?;

        tx.commit().await?;
        Ok(updated)
    }

    /// Delete a college, detaching its programs and students first.
    ///
    /// Both steps run in one transaction. Returns the deleted college, or
    /// None if it did not exist (nothing is changed in that case).
    pub async fn delete(&self, id: i64) -> Result<Option<College>> {
        let mut tx = self.pool.begin_with("BEGIN IMMEDIATE").await?;

        let Some(college) =
            sqlx::query_as::<_, College>("SELECT id, code, name FROM colleges WHERE id = ?")
                .bind(id)
                .fetch_optional(&mut *tx)
                .await?
        else {
            return Ok(None);
        };

        sqlx::query("UPDATE programs SET college_id = NULL WHERE college_id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await?;
        sqlx::query("UPDATE students SET college_id = NULL WHERE college_id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await?;
        sqlx::query("DELETE FROM colleges WHERE id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(Some(college))
    }

    /// Count all colleges.
    pub async fn count(&self) -> Result<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM colleges")
            .fetch_one(self.pool)
            .await?;
        Ok(count)
    }
}

async fn ensure_unique(
    conn: &mut SqliteConnection,
    college: &NewCollege,
    exclude_id: Option<i64>,
) -> Result<()> {
    let code_taken: bool = sqlx::query_scalar(
        "SELECT EXISTS(SELECT 1 FROM colleges WHERE code = ? COLLATE NOCASE AND id IS NOT ?)",
    )
    .bind(&college.code)
    .bind(exclude_id)
    .fetch_one(&mut *conn)
    .await?;
    if code_taken {
        return Err(SsisError::DuplicateName(format!(
            "college code '{}'",
            college.code
        )));
    }

    let name_taken: bool = sqlx::query_scalar(
        "SELECT EXISTS(SELECT 1 FROM colleges WHERE name = ? COLLATE NOCASE AND id IS NOT ?)",
    )
    .bind(&college.name)
    .bind(exclude_id)
    .fetch_one(&mut *conn)
    .await?;
    if name_taken {
        return Err(SsisError::DuplicateName(format!(
            "college name '{}'",
            college.name
        )));
    }

    Ok(())
}

fn classify_write_error(err: sqlx::Error, college: &NewCollege) -> SsisError {
    match unique_violation(&err) {
        Some(msg) if msg.contains("colleges.code") => {
            SsisError::DuplicateName(format!("college code '{}'", college.code))
        }
        Some(_) => SsisError::DuplicateName(format!("college name '{}'", college.name)),
        None => SsisError::from(err),
    }
}
