//! Program repository for SSIS.

use sqlx::SqliteConnection;

use super::types::{NewProgram, Program, ProgramSummary};
use crate::db::DbPool;
use crate::error::{foreign_key_violation, unique_violation};
use crate::{Result, SsisError};

const PROGRAM_COLUMNS: &str = "id, code, name, college_id";

/// Repository for program CRUD operations.
pub struct ProgramRepository<'a> {
    pool: &'a DbPool,
}

impl<'a> ProgramRepository<'a> {
    /// Create a new ProgramRepository with the given database pool reference.
    pub fn new(pool: &'a DbPool) -> Self {
        Self { pool }
    }

    /// List all programs ordered by name, with college name and student count.
    pub async fn list_summaries(&self) -> Result<Vec<ProgramSummary>> {
        let programs = sqlx::query_as::<_, ProgramSummary>(
            r#"
            SELECT p.id, p.code, p.name, p.college_id,
                   c.name AS college_name,
                   (SELECT COUNT(*) FROM students s WHERE s.program_id = p.id) AS num_students
            FROM programs p
            LEFT JOIN colleges c ON p.college_id = c.id
            ORDER BY p.name COLLATE NOCASE, p.code
            "#,
        )
        .fetch_all(self.pool)
        .await?;

        Ok(programs)
    }

    /// Get a program by ID.
    pub async fn get_by_id(&self, id: i64) -> Result<Option<Program>> {
        let program = sqlx::query_as::<_, Program>(&format!(
            "SELECT {PROGRAM_COLUMNS} FROM programs WHERE id = ?"
        ))
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        Ok(program)
    }

    /// Create a new program.
    pub async fn create(&self, program: &NewProgram) -> Result<Program> {
        let mut tx = self.pool.begin_with("BEGIN IMMEDIATE").await?;

        ensure_unique(&mut tx, program, None).await?;

        let created = sqlx::query_as::<_, Program>(&format!(
            "INSERT INTO programs (code, name, college_id) VALUES (?, ?, ?) RETURNING {PROGRAM_COLUMNS}"
        ))
        .bind(&program.code)
        .bind(&program.name)
        .bind(program.college_id)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| classify_write_error(e, program))?;

        tx.commit().await?;
        Ok(created)
    }

    /// Update a program.
    ///
    /// Students enrolled in the program move with it to its new college.
    /// Returns None if the program does not exist.
    pub async fn update(&self, id: i64, program: &NewProgram) -> Result<Option<Program>> {
        let mut tx = self.pool.begin_with("BEGIN IMMEDIATE").await?;

        let exists: bool = sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM programs WHERE id = ?)")
            .bind(id)
            .fetch_one(&mut *tx)
            .await?;
        if !exists {
            return Ok(None);
        }

        ensure_unique(&mut tx, program, Some(id)).await?;

        let updated = sqlx::query_as::<_, Program>(&format!(
            "UPDATE programs SET code = ?, name = ?, college_id = ? WHERE id = ? RETURNING {PROGRAM_COLUMNS}"
        ))
        .bind(&program.code)
        .bind(&program.name)
        .bind(program.college_id)
        .bind(id)
        .fetch_optional(&mut *tx)
        .await
        .map_err(|e| classify_write_error(e, program))?;

        // Enrolled students follow the program into its college
        sqlx::query("UPDATE students SET college_id = ? WHERE program_id = ? AND college_id IS NOT ?")
            .bind(program.college_id)
            .bind(id)
            .bind(program.college_id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(updated)
    }

    /// Delete a program, detaching its students first.
    ///
    /// Both steps run in one transaction. Returns the deleted program, or
    /// None if it did not exist.
    pub async fn delete(&self, id: i64) -> Result<Option<Program>> {
        let mut tx = self.pool.begin_with("BEGIN IMMEDIATE").await?;

        let Some(program) = sqlx::query_as::<_, Program>(&format!(
            "SELECT {PROGRAM_COLUMNS} FROM programs WHERE id = ?"
        ))
        .bind(id)
        .fetch_optional(&mut *tx)
        .await?
        else {
            return Ok(None);
        };

        sqlx::query("UPDATE students SET program_id = NULL WHERE program_id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await?;
        sqlx::query("DELETE FROM programs WHERE id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(Some(program))
    }
}

async fn ensure_unique(
    conn: &mut SqliteConnection,
    program: &NewProgram,
    exclude_id: Option<i64>,
) -> Result<()> {
    let code_taken: bool = sqlx::query_scalar(
        "SELECT EXISTS(SELECT 1 FROM programs WHERE code = ? COLLATE NOCASE AND id IS NOT ?)",
    )
    .bind(&program.code)
    .bind(exclude_id)
    .fetch_one(&mut *conn)
    .await?;
    if code_taken {
        return Err(SsisError::DuplicateName(format!(
            "program code '{}'",
            program.code
        )));
    }

    let name_taken: bool = sqlx::query_scalar(
        "SELECT EXISTS(SELECT 1 FROM programs WHERE name = ? COLLATE NOCASE AND id IS NOT ?)",
    )
    .bind(&program.name)
    .bind(exclude_id)
    .fetch_one(&mut *conn)
    .await?;
    if name_taken {
        return Err(SsisError::DuplicateName(format!(
            "program name '{}'",
            program.name
        )));
    }

    Ok(())
}

fn classify_write_error(err: sqlx::Error, program: &NewProgram) -> SsisError {
    match unique_violation(&err) {
        Some(msg) if msg.contains("programs.code") => {
            SsisError::DuplicateName(format!("program code '{}'", program.code))
        }
        Some(_) => SsisError::DuplicateName(format!("program name '{}'", program.name)),
        None if foreign_key_violation(&err) => SsisError::NotFound("college".to_string()),
        None => SsisError::from(err),
    }
}
