//! Program service for SSIS.

use tracing::info;

use super::repository::ProgramRepository;
use super::types::{NewProgram, Program, ProgramInput, ProgramSummary};
use crate::college::CollegeRepository;
use crate::db::Database;
use crate::validation::{canonical_code, canonical_name, ValidationError, MAX_NAME_LENGTH};
use crate::{Result, SsisError};

/// Validate program input and return its canonical form.
///
/// Only checks the fields themselves; the college's existence is checked
/// by [`ProgramService`].
pub fn validate_program(input: &ProgramInput) -> Result<NewProgram> {
    let code = canonical_code("program_code", &input.code)?;
    let name = canonical_name("program_name", &input.name, MAX_NAME_LENGTH)?;
    let college_id = input.college_id.ok_or(ValidationError::Required {
        field: "college_id",
    })?;

    Ok(NewProgram {
        code,
        name,
        college_id,
    })
}

/// Service for program operations.
pub struct ProgramService<'a> {
    db: &'a Database,
}

impl<'a> ProgramService<'a> {
    /// Create a new ProgramService with the given database reference.
    pub fn new(db: &'a Database) -> Self {
        Self { db }
    }

    fn repo(&self) -> ProgramRepository<'a> {
        ProgramRepository::new(self.db.pool())
    }

    async fn validated(&self, input: &ProgramInput) -> Result<NewProgram> {
        let program = validate_program(input)?;
        if !CollegeRepository::new(self.db.pool())
            .exists(program.college_id)
            .await?
        {
            return Err(SsisError::NotFound("college".to_string()));
        }
        Ok(program)
    }

    /// List all programs with college name and student count.
    pub async fn list(&self) -> Result<Vec<ProgramSummary>> {
        self.repo().list_summaries().await
    }

    /// Get a program by ID.
    pub async fn get(&self, id: i64) -> Result<Program> {
        self.repo()
            .get_by_id(id)
            .await?
            .ok_or_else(|| SsisError::NotFound("program".to_string()))
    }

    /// Create a program under an existing college.
    pub async fn create(&self, input: &ProgramInput) -> Result<Program> {
        let program = self.validated(input).await?;
        let created = self.repo().create(&program).await?;
        info!(program_id = created.id, code = %created.code, "Program created");
        Ok(created)
    }

    /// Update a program.
    pub async fn update(&self, id: i64, input: &ProgramInput) -> Result<Program> {
        let program = self.validated(input).await?;
        let updated = self
            .repo()
            .update(id, &program)
            .await?
            .ok_or_else(|| SsisError::NotFound("program".to_string()))?;
        info!(program_id = id, code = %updated.code, "Program updated");
        Ok(updated)
    }

    /// Delete a program. Its students are kept, unassigned.
    ///
    /// Returns a confirmation message.
    pub async fn delete(&self, id: i64) -> Result<String> {
        let program = self
            .repo()
            .delete(id)
            .await?
            .ok_or_else(|| SsisError::NotFound("program".to_string()))?;
        info!(program_id = id, code = %program.code, "Program deleted");
        Ok(format!("Program '{}' deleted successfully", program.code))
    }
}
