//! Request DTOs for Web API.
//!
//! Missing string fields deserialize as empty strings so they reach domain
//! validation and are reported per field instead of as malformed JSON.

use serde::Deserialize;
use validator::Validate;

use super::validation::no_control_chars;
use crate::college::CollegeInput;
use crate::program::ProgramInput;
use crate::student::StudentInput;

/// Login request.
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    /// Username.
    #[serde(default)]
    #[validate(length(min = 1, message = "Username is required"))]
    pub username: String,
    /// Password.
    #[serde(default)]
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Account registration request.
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    /// Username.
    #[serde(default)]
    #[validate(custom(function = "no_control_chars"))]
    pub username: String,
    /// Email address.
    #[serde(default)]
    #[validate(custom(function = "no_control_chars"))]
    pub email: String,
    /// Password.
    #[serde(default)]
    pub password: String,
}

/// Update of the authenticated account.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateAccountRequest {
    /// New username.
    #[serde(default)]
    #[validate(custom(function = "no_control_chars"))]
    pub username: String,
    /// New email address.
    #[serde(default)]
    #[validate(custom(function = "no_control_chars"))]
    pub email: String,
    /// New password; the current one is kept when absent or empty.
    #[serde(default)]
    pub password: Option<String>,
}

/// College create/update request.
#[derive(Debug, Deserialize, Validate)]
pub struct CollegeRequest {
    /// College code.
    #[serde(default)]
    #[validate(custom(function = "no_control_chars"))]
    pub college_code: String,
    /// College name.
    #[serde(default)]
    #[validate(custom(function = "no_control_chars"))]
    pub college_name: String,
}

impl From<CollegeRequest> for CollegeInput {
    fn from(req: CollegeRequest) -> Self {
        CollegeInput::new(req.college_code, req.college_name)
    }
}

/// Program create/update request.
#[derive(Debug, Deserialize, Validate)]
pub struct ProgramRequest {
    /// Program code.
    #[serde(default)]
    #[validate(custom(function = "no_control_chars"))]
    pub program_code: String,
    /// Program name.
    #[serde(default)]
    #[validate(custom(function = "no_control_chars"))]
    pub program_name: String,
    /// Owning college.
    #[serde(default)]
    pub college_id: Option<i64>,
}

impl From<ProgramRequest> for ProgramInput {
    fn from(req: ProgramRequest) -> Self {
        ProgramInput {
            code: req.program_code,
            name: req.program_name,
            college_id: req.college_id,
        }
    }
}

/// Student create/update request.
#[derive(Debug, Deserialize, Validate)]
pub struct StudentRequest {
    /// External id (`DDDD-DDDD`).
    #[serde(default)]
    pub id_number: String,
    /// First name.
    #[serde(default)]
    #[validate(custom(function = "no_control_chars"))]
    pub first_name: String,
    /// Last name.
    #[serde(default)]
    #[validate(custom(function = "no_control_chars"))]
    pub last_name: String,
    /// Gender.
    #[serde(default)]
    pub gender: String,
    /// Year level.
    #[serde(default)]
    pub year_level: String,
    /// College, inferred from the program when absent.
    #[serde(default)]
    pub college_id: Option<i64>,
    /// Program.
    #[serde(default)]
    pub program_id: Option<i64>,
    /// Photo URL.
    #[serde(default)]
    #[validate(length(max = 500, message = "Photo URL is too long"))]
    pub photo_url: Option<String>,
}

impl From<StudentRequest> for StudentInput {
    fn from(req: StudentRequest) -> Self {
        StudentInput {
            id_number: req.id_number,
            last_name: req.last_name,
            first_name: req.first_name,
            gender: req.gender,
            year_level: req.year_level,
            college_id: req.college_id,
            program_id: req.program_id,
            photo_url: req.photo_url,
        }
    }
}
