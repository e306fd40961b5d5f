//! Student repository for SSIS.
//!
//! Students are addressed by their external `id_number`.

use super::types::{NewStudent, Student, StudentFilters, StudentRow, StudentSummary, StudentSummaryRow};
use crate::db::DbPool;
use crate::error::{foreign_key_violation, unique_violation};
use crate::{Result, SsisError};

const STUDENT_COLUMNS: &str =
    "id, id_number, last_name, first_name, gender, year_level, college_id, program_id, photo_url";

/// Repository for student CRUD operations.
pub struct StudentRepository<'a> {
    pool: &'a DbPool,
}

impl<'a> StudentRepository<'a> {
    /// Create a new StudentRepository with the given database pool reference.
    pub fn new(pool: &'a DbPool) -> Self {
        Self { pool }
    }

    /// List all students ordered by last name, first name and id number,
    /// with their program code and name and their college name.
    pub async fn list_summaries(&self) -> Result<Vec<StudentSummary>> {
        let rows = sqlx::query_as::<_, StudentSummaryRow>(
            r#"
            SELECT s.id, s.id_number, s.last_name, s.first_name, s.gender, s.year_level,
                   s.college_id, s.program_id, s.photo_url,
                   p.code AS program_code,
                   p.name AS program_name,
                   c.name AS college_name
            FROM students s
            LEFT JOIN programs p ON s.program_id = p.id
            LEFT JOIN colleges c ON s.college_id = c.id
            ORDER BY s.last_name COLLATE NOCASE, s.first_name COLLATE NOCASE, s.id_number
            "#,
        )
        .fetch_all(self.pool)
        .await?;

        rows.into_iter().map(StudentSummary::try_from).collect()
    }

    /// Get a student by id number.
    pub async fn get_by_id_number(&self, id_number: &str) -> Result<Option<Student>> {
        let row = sqlx::query_as::<_, StudentRow>(&format!(
            "SELECT {STUDENT_COLUMNS} FROM students WHERE id_number = ?"
        ))
        .bind(id_number)
        .fetch_optional(self.pool)
        .await?;

        row.map(Student::try_from).transpose()
    }

    /// Create a new student.
    pub async fn create(&self, student: &NewStudent) -> Result<Student> {
        let mut tx = self.pool.begin_with("BEGIN IMMEDIATE").await?;

        if id_number_taken(&mut tx, &student.id_number, None).await? {
            return Err(duplicate_id_number(&student.id_number));
        }

        let row = sqlx::query_as::<_, StudentRow>(&format!(
            "INSERT INTO students (id_number, last_name, first_name, gender, year_level, college_id, program_id, photo_url)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?)
             RETURNING {STUDENT_COLUMNS}"
        ))
        .bind(&student.id_number)
        .bind(&student.last_name)
        .bind(&student.first_name)
        .bind(student.gender.as_str())
        .bind(student.year_level.as_str())
        .bind(student.college_id)
        .bind(student.program_id)
        .bind(&student.photo_url)
        .fetch_one(&mut *tx)
        .await;
        let row = match row {
            Ok(row) => row,
            Err(e) => return Err(classify_write_error(&mut tx, e, student).await),
        };

        tx.commit().await?;
        row.try_into()
    }

    /// Update the student currently identified by `id_number`.
    ///
    /// The id number itself may change. Returns None if the student does
    /// not exist.
    pub async fn update(&self, id_number: &str, student: &NewStudent) -> Result<Option<Student>> {
        let mut tx = self.pool.begin_with("BEGIN IMMEDIATE").await?;

        let Some(id): Option<i64> =
            sqlx::query_scalar("SELECT id FROM students WHERE id_number = ?")
                .bind(id_number)
                .fetch_optional(&mut *tx)
                .await?
        else {
            return Ok(None);
        };

        if id_number_taken(&mut tx, &student.id_number, Some(id)).await? {
            return Err(duplicate_id_number(&student.id_number));
        }

        let row = sqlx::query_as::<_, StudentRow>(&format!(
            "UPDATE students
             SET id_number = ?, last_name = ?, first_name = ?, gender = ?, year_level = ?,
                 college_id = ?, program_id = ?, photo_url = ?
             WHERE id = ?
             RETURNING {STUDENT_COLUMNS}"
        ))
        .bind(&student.id_number)
        .bind(&student.last_name)
        .bind(&student.first_name)
        .bind(student.gender.as_str())
        .bind(student.year_level.as_str())
        .bind(student.college_id)
        .bind(student.program_id)
        .bind(&student.photo_url)
        .bind(id)
        .fetch_one(&mut *tx)
        .await;
        let row = match row {
            Ok(row) => row,
            Err(e) => return Err(classify_write_error(&mut tx, e, student).await),
        };

        tx.commit().await?;
        row.try_into().map(Some)
    }

    /// Delete a student by id number.
    ///
    /// Returns true if a student was deleted, false if not found.
    pub async fn delete(&self, id_number: &str) -> Result<bool> {
        let result = sqlx::query("DELETE FROM students WHERE id_number = ?")
            .bind(id_number)
            .execute(self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Distinct year levels and genders currently in use.
    pub async fn filters(&self) -> Result<StudentFilters> {
        let year_levels: Vec<String> =
            sqlx::query_scalar("SELECT DISTINCT year_level FROM students ORDER BY year_level")
                .fetch_all(self.pool)
                .await?;
        let genders: Vec<String> =
            sqlx::query_scalar("SELECT DISTINCT gender FROM students ORDER BY gender")
                .fetch_all(self.pool)
                .await?;

        Ok(StudentFilters {
            year_levels,
            genders,
        })
    }
}

async fn id_number_taken(
    conn: &mut sqlx::SqliteConnection,
    id_number: &str,
    exclude_id: Option<i64>,
) -> Result<bool> {
    let taken: bool = sqlx::query_scalar(
        "SELECT EXISTS(SELECT 1 FROM students WHERE id_number = ? AND id IS NOT ?)",
    )
    .bind(id_number)
    .bind(exclude_id)
    .fetch_one(&mut *conn)
    .await?;
    Ok(taken)
}

fn duplicate_id_number(id_number: &str) -> SsisError {
    SsisError::DuplicateName(format!("student id number '{id_number}'"))
}

async fn classify_write_error(
    conn: &mut sqlx::SqliteConnection,
    err: sqlx::Error,
    student: &NewStudent,
) -> SsisError {
    if unique_violation(&err).is_some() {
        return duplicate_id_number(&student.id_number);
    }
    if !foreign_key_violation(&err) {
        return SsisError::from(err);
    }

    // SQLite does not say which reference failed
    if let Some(program_id) = student.program_id {
        let found: std::result::Result<bool, sqlx::Error> =
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM programs WHERE id = ?)")
                .bind(program_id)
                .fetch_one(&mut *conn)
                .await;
        if let Ok(false) = found {
            return SsisError::NotFound("program".to_string());
        }
    }
    SsisError::NotFound("college".to_string())
}
