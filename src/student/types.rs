//! Student model for SSIS.
//!
//! Gender and year level are closed sets stored as text; rows are read as
//! raw strings and converted into the typed [`Student`].

use std::fmt;
use std::str::FromStr;

use crate::validation::ValidationError;
use crate::{Result, SsisError};

/// Student gender.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Gender {
    Male,
    Female,
    Others,
}

impl Gender {
    /// All values, in display order.
    pub const ALL: [Gender; 3] = [Gender::Male, Gender::Female, Gender::Others];

    /// Convert to the stored representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Male => "Male",
            Gender::Female => "Female",
            Gender::Others => "Others",
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Gender {
    type Err = ValidationError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "male" => Ok(Gender::Male),
            "female" => Ok(Gender::Female),
            "others" => Ok(Gender::Others),
            _ => Err(ValidationError::InvalidGender),
        }
    }
}

/// Student year level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum YearLevel {
    First,
    Second,
    Third,
    Fourth,
    /// Beyond the fourth year.
    FourthPlus,
}

impl YearLevel {
    /// Convert to the stored representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            YearLevel::First => "1",
            YearLevel::Second => "2",
            YearLevel::Third => "3",
            YearLevel::Fourth => "4",
            YearLevel::FourthPlus => "4+",
        }
    }
}

impl fmt::Display for YearLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for YearLevel {
    type Err = ValidationError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim() {
            "1" => Ok(YearLevel::First),
            "2" => Ok(YearLevel::Second),
            "3" => Ok(YearLevel::Third),
            "4" => Ok(YearLevel::Fourth),
            "4+" => Ok(YearLevel::FourthPlus),
            _ => Err(ValidationError::InvalidYearLevel),
        }
    }
}

/// Raw student row.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct StudentRow {
    pub id: i64,
    pub id_number: String,
    pub last_name: String,
    pub first_name: String,
    pub gender: String,
    pub year_level: String,
    pub college_id: Option<i64>,
    pub program_id: Option<i64>,
    pub photo_url: Option<String>,
}

/// Student row joined with its program and college names.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct StudentSummaryRow {
    #[sqlx(flatten)]
    pub student: StudentRow,
    pub program_code: Option<String>,
    pub program_name: Option<String>,
    pub college_name: Option<String>,
}

/// A stored student.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Student {
    /// Internal row ID.
    pub id: i64,
    /// External identifier, `DDDD-DDDD`.
    pub id_number: String,
    /// Last name (title case).
    pub last_name: String,
    /// First name (title case).
    pub first_name: String,
    /// Gender.
    pub gender: Gender,
    /// Year level.
    pub year_level: YearLevel,
    /// College, if assigned.
    pub college_id: Option<i64>,
    /// Program, if assigned.
    pub program_id: Option<i64>,
    /// Photo URL.
    pub photo_url: Option<String>,
}

impl TryFrom<StudentRow> for Student {
    type Error = SsisError;

    fn try_from(row: StudentRow) -> Result<Self> {
        let corrupt = |what: &str| {
            SsisError::Database(format!("student {} has invalid {what}", row.id_number))
        };
        let gender = row.gender.parse().map_err(|_| corrupt("gender"))?;
        let year_level = row.year_level.parse().map_err(|_| corrupt("year_level"))?;

        Ok(Student {
            id: row.id,
            id_number: row.id_number,
            last_name: row.last_name,
            first_name: row.first_name,
            gender,
            year_level,
            college_id: row.college_id,
            program_id: row.program_id,
            photo_url: row.photo_url,
        })
    }
}

/// A student with the names of their program and college.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StudentSummary {
    /// The student.
    pub student: Student,
    /// Program code; None when unassigned.
    pub program_code: Option<String>,
    /// Program name; None when unassigned.
    pub program_name: Option<String>,
    /// College name; None when unassigned.
    pub college_name: Option<String>,
}

impl TryFrom<StudentSummaryRow> for StudentSummary {
    type Error = SsisError;

    fn try_from(row: StudentSummaryRow) -> Result<Self> {
        Ok(StudentSummary {
            student: row.student.try_into()?,
            program_code: row.program_code,
            program_name: row.program_name,
            college_name: row.college_name,
        })
    }
}

/// Raw student fields as submitted by a client.
#[derive(Debug, Clone, Default)]
pub struct StudentInput {
    /// External identifier.
    pub id_number: String,
    /// Last name.
    pub last_name: String,
    /// First name.
    pub first_name: String,
    /// Gender (case-insensitive).
    pub gender: String,
    /// Year level.
    pub year_level: String,
    /// College.
    pub college_id: Option<i64>,
    /// Program.
    pub program_id: Option<i64>,
    /// Photo URL.
    pub photo_url: Option<String>,
}

/// Validated, canonical student fields ready to be written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewStudent {
    /// External identifier.
    pub id_number: String,
    /// Title-case last name.
    pub last_name: String,
    /// Title-case first name.
    pub first_name: String,
    /// Gender.
    pub gender: Gender,
    /// Year level.
    pub year_level: YearLevel,
    /// College.
    pub college_id: Option<i64>,
    /// Program.
    pub program_id: Option<i64>,
    /// Photo URL.
    pub photo_url: Option<String>,
}

/// Values currently in use, for building list filters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StudentFilters {
    /// Distinct year levels, ascending.
    pub year_levels: Vec<String>,
    /// Distinct genders, ascending.
    pub genders: Vec<String>,
}
