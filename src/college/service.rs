//! College service for SSIS.
//!
//! Validates and canonicalizes client input before it reaches the repository.

use tracing::info;

use super::repository::CollegeRepository;
use super::types::{College, CollegeInput, CollegeSummary, NewCollege};
use crate::db::Database;
use crate::validation::{canonical_code, canonical_name, MAX_NAME_LENGTH};
use crate::{Result, SsisError};

/// Validate college input and return its canonical form.
pub fn validate_college(input: &CollegeInput) -> Result<NewCollege> {
    Ok(NewCollege {
        code: canonical_code("college_code", &input.code)?,
        name: canonical_name("college_name", &input.name, MAX_NAME_LENGTH)?,
    })
}

/// Service for college operations.
pub struct CollegeService<'a> {
    db: &'a Database,
}

impl<'a> CollegeService<'a> {
    /// Create a new CollegeService with the given database reference.
    pub fn new(db: &'a Database) -> Self {
        Self { db }
    }

    fn repo(&self) -> CollegeRepository<'a> {
        CollegeRepository::new(self.db.pool())
    }

    /// List all colleges with their program and student counts.
    pub async fn list(&self) -> Result<Vec<CollegeSummary>> {
        self.repo().list_summaries().await
    }

    /// Get a college by ID.
    pub async fn get(&self, id: i64) -> Result<College> {
        self.repo()
            .get_by_id(id)
            .await?
            .ok_or_else(|| SsisError::NotFound("college".to_string()))
    }

    /// Create a college.
    pub async fn create(&self, input: &CollegeInput) -> Result<College> {
        let college = validate_college(input)?;
        let created = self.repo().create(&college).await?;
        info!(college_id = created.id, code = %created.code, "College created");
        Ok(created)
    }

    /// Update a college.
    pub async fn update(&self, id: i64, input: &CollegeInput) -> Result<College> {
        let college = validate_college(input)?;
        let updated = self
            .repo()
            .update(id, &college)
            .await?
            .ok_or_else(|| SsisError::NotFound("college".to_string()))?;
        info!(college_id = id, code = %updated.code, "College updated");
        Ok(updated)
    }

    /// Delete a college. Its programs and students are kept, unassigned.
    ///
    /// Returns a confirmation message.
    pub async fn delete(&self, id: i64) -> Result<String> {
        let college = self
            .repo()
            .delete(id)
            .await?
            .ok_or_else(|| SsisError::NotFound("college".to_string()))?;
        info!(college_id = id, code = %college.code, "College deleted");
        Ok(format!("College '{}' deleted successfully", college.code))
    }
}
