//! Student service for SSIS.
//!
//! Validates student fields and resolves the college and program a student
//! is assigned to before writing.

use tracing::info;

use super::repository::StudentRepository;
use super::types::{NewStudent, Student, StudentFilters, StudentInput, StudentSummary};
use crate::college::CollegeRepository;
use crate::db::Database;
use crate::program::ProgramRepository;
use crate::validation::{
    canonical_id_number, canonical_name, canonical_photo_url, ValidationError,
    MAX_PERSON_NAME_LENGTH,
};
use crate::{Result, SsisError};

/// Validate student fields and return their canonical form.
///
/// College and program references are copied as given; see
/// [`StudentService`] for how they are resolved.
pub fn validate_student(input: &StudentInput) -> Result<NewStudent> {
    Ok(NewStudent {
        id_number: canonical_id_number(&input.id_number)?,
        last_name: canonical_name("last_name", &input.last_name, MAX_PERSON_NAME_LENGTH)?,
        first_name: canonical_name("first_name", &input.first_name, MAX_PERSON_NAME_LENGTH)?,
        gender: input.gender.parse()?,
        year_level: input.year_level.parse()?,
        college_id: input.college_id,
        program_id: input.program_id,
        photo_url: canonical_photo_url(input.photo_url.as_deref())?,
    })
}

/// Service for student operations.
pub struct StudentService<'a> {
    db: &'a Database,
}

impl<'a> StudentService<'a> {
    /// Create a new StudentService with the given database reference.
    pub fn new(db: &'a Database) -> Self {
        Self { db }
    }

    fn repo(&self) -> StudentRepository<'a> {
        StudentRepository::new(self.db.pool())
    }

    /// Validate input and resolve its college/program assignment.
    ///
    /// - a referenced college or program must exist
    /// - a program given without a college assigns the program's college
    /// - a program owned by a different college than the one given is rejected
    async fn validated(&self, input: &StudentInput) -> Result<NewStudent> {
        let mut student = validate_student(input)?;

        if let Some(college_id) = student.college_id {
            if !CollegeRepository::new(self.db.pool())
                .exists(college_id)
                .await?
            {
                return Err(SsisError::NotFound("college".to_string()));
            }
        }

        if let Some(program_id) = student.program_id {
            let program = ProgramRepository::new(self.db.pool())
                .get_by_id(program_id)
                .await?
                .ok_or_else(|| SsisError::NotFound("program".to_string()))?;

            match (student.college_id, program.college_id) {
                (None, owner) => student.college_id = owner,
                (Some(given), Some(owner)) if given != owner => {
                    return Err(ValidationError::ProgramCollegeMismatch.into());
                }
                _ => {}
            }
        }

        Ok(student)
    }

    /// List all students with their program and college names.
    pub async fn list(&self) -> Result<Vec<StudentSummary>> {
        self.repo().list_summaries().await
    }

    /// Get a student by id number.
    pub async fn get(&self, id_number: &str) -> Result<Student> {
        self.repo()
            .get_by_id_number(id_number.trim())
            .await?
            .ok_or_else(|| SsisError::NotFound("student".to_string()))
    }

    /// Create a student.
    pub async fn create(&self, input: &StudentInput) -> Result<Student> {
        let student = self.validated(input).await?;
        let created = self.repo().create(&student).await?;
        info!(id_number = %created.id_number, "Student created");
        Ok(created)
    }

    /// Update the student identified by `id_number`.
    pub async fn update(&self, id_number: &str, input: &StudentInput) -> Result<Student> {
        let student = self.validated(input).await?;
        let updated = self
            .repo()
            .update(id_number.trim(), &student)
            .await?
            .ok_or_else(|| SsisError::NotFound("student".to_string()))?;
        info!(id_number = %updated.id_number, "Student updated");
        Ok(updated)
    }

    /// Delete a student. Returns a confirmation message.
    pub async fn delete(&self, id_number: &str) -> Result<String> {
        let id_number = id_number.trim();
        if !self.repo().delete(id_number).await? {
            return Err(SsisError::NotFound("student".to_string()));
        }
        info!(id_number = %id_number, "Student deleted");
        Ok(format!("Student '{id_number}' deleted successfully"))
    }

    /// Year levels and genders currently in use.
    pub async fn filters(&self) -> Result<StudentFilters> {
        self.repo().filters().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::college::{CollegeInput, CollegeService};
    use crate::program::{ProgramInput, ProgramService};
    use crate::student::{Gender, YearLevel};

    fn input(id_number: &str) -> StudentInput {
        StudentInput {
            id_number: id_number.to_string(),
            last_name: "dela  cruz".to_string(),
            first_name: "juan".to_string(),
            gender: "male".to_string(),
            year_level: "2".to_string(),
            ..Default::default()
        }
    }

    async fn seed(db: &Database) -> (i64, i64) {
        let college = CollegeService::new(db)
            .create(&CollegeInput::new("CCS", "Computer Studies"))
            .await
            .unwrap();
        let program = ProgramService::new(db)
            .create(&ProgramInput::new("BSCS", "Computer Science", college.id))
            .await
            .unwrap();
        (college.id, program.id)
    }

    #[test]
    fn test_validate_canonicalizes() {
        let student = validate_student(&input("2025-0001")).unwrap();
        assert_eq!(student.last_name, "Dela Cruz");
        assert_eq!(student.first_name, "Juan");
        assert_eq!(student.gender, Gender::Male);
        assert_eq!(student.year_level, YearLevel::Second);
    }

    #[test]
    fn test_validate_rejects_malformed_id_number() {
        assert!(matches!(
            validate_student(&input("20251")),
            Err(SsisError::Validation(ValidationError::InvalidIdNumber))
        ));
    }

    #[test]
    fn test_validate_rejects_bad_enums() {
        let mut bad_gender = input("2025-0001");
        bad_gender.gender = "unknown".to_string();
        assert!(matches!(
            validate_student(&bad_gender),
            Err(SsisError::Validation(ValidationError::InvalidGender))
        ));

        let mut bad_year = input("2025-0001");
        bad_year.year_level = "5".to_string();
        assert!(matches!(
            validate_student(&bad_year),
            Err(SsisError::Validation(ValidationError::InvalidYearLevel))
        ));
    }

    #[tokio::test]
    async fn test_create_twice_is_duplicate() {
        let db = Database::open_in_memory().await.unwrap();
        let service = StudentService::new(&db);

        service.create(&input("2025-0001")).await.unwrap();
        assert!(matches!(
            service.create(&input("2025-0001")).await,
            Err(SsisError::DuplicateName(_))
        ));
    }

    #[tokio::test]
    async fn test_program_assigns_college() {
        let db = Database::open_in_memory().await.unwrap();
        let (college_id, program_id) = seed(&db).await;
        let service = StudentService::new(&db);

        let mut with_program = input("2025-0001");
        with_program.program_id = Some(program_id);
        let student = service.create(&with_program).await.unwrap();

        assert_eq!(student.program_id, Some(program_id));
        assert_eq!(student.college_id, Some(college_id));

        let listed = service.list().await.unwrap();
        assert_eq!(listed[0].program_code.as_deref(), Some("BSCS"));
        assert_eq!(listed[0].college_name.as_deref(), Some("Computer Studies"));
    }

    #[tokio::test]
    async fn test_program_college_mismatch() {
        let db = Database::open_in_memory().await.unwrap();
        let (_, program_id) = seed(&db).await;
        let other = CollegeService::new(&db)
            .create(&CollegeInput::new("COE", "Engineering"))
            .await
            .unwrap();
        let service = StudentService::new(&db);

        let mut mismatched = input("2025-0001");
        mismatched.college_id = Some(other.id);
        mismatched.program_id = Some(program_id);

        assert!(matches!(
            service.create(&mismatched).await,
            Err(SsisError::Validation(ValidationError::ProgramCollegeMismatch))
        ));
    }

    #[tokio::test]
    async fn test_missing_references() {
        let db = Database::open_in_memory().await.unwrap();
        let service = StudentService::new(&db);

        let mut bad_college = input("2025-0001");
        bad_college.college_id = Some(77);
        assert!(matches!(
            service.create(&bad_college).await,
            Err(SsisError::NotFound(what)) if what == "college"
        ));

        let mut bad_program = input("2025-0001");
        bad_program.program_id = Some(77);
        assert!(matches!(
            service.create(&bad_program).await,
            Err(SsisError::NotFound(what)) if what == "program"
        ));
    }

    #[tokio::test]
    async fn test_update_and_delete() {
        let db = Database::open_in_memory().await.unwrap();
        let service = StudentService::new(&db);
        service.create(&input("2025-0001")).await.unwrap();

        let mut changed = input("2025-0001");
        changed.year_level = "4+".to_string();
        let updated = service.update("2025-0001", &changed).await.unwrap();
        assert_eq!(updated.year_level, YearLevel::FourthPlus);

        assert!(matches!(
            service.update("2025-0404", &changed).await,
            Err(SsisError::NotFound(_))
        ));

        assert_eq!(
            service.delete("2025-0001").await.unwrap(),
            "Student '2025-0001' deleted successfully"
        );
        assert!(matches!(
            service.get("2025-0001").await,
            Err(SsisError::NotFound(_))
        ));
    }
}
