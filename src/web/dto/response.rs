//! Response DTOs for Web API.

use serde::Serialize;

use crate::college::{College, CollegeSummary};
use crate::db::Account;
use crate::program::{Program, ProgramSummary};
use crate::student::{Student, StudentFilters, StudentSummary};

/// Login response.
#[derive(Debug, Serialize)]
pub struct TokenResponse {
    /// Access token (JWT).
    pub access_token: String,
    /// Always `Bearer`.
    pub token_type: &'static str,
    /// Access token lifetime in seconds.
    pub expires_in: u64,
}

impl TokenResponse {
    /// Create a bearer token response.
    pub fn bearer(access_token: String, expires_in: u64) -> Self {
        Self {
            access_token,
            token_type: "Bearer",
            expires_in,
        }
    }
}

/// Generic success response.
#[derive(Debug, Serialize)]
pub struct SuccessResponse {
    /// Always true.
    pub success: bool,
    /// Human-readable message.
    pub message: String,
}

impl SuccessResponse {
    /// Create a success response with a message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
        }
    }
}

/// Account response (for /me and /register).
#[derive(Debug, Serialize)]
pub struct AccountResponse {
    /// Account ID.
    pub id: i64,
    /// Username.
    pub username: String,
    /// Email address.
    pub email: String,
}

impl From<Account> for AccountResponse {
    fn from(account: Account) -> Self {
        Self {
            id: account.id,
            username: account.username,
            email: account.email,
        }
    }
}

// ============================================================================
// College DTOs
// ============================================================================

/// College response.
#[derive(Debug, Serialize)]
pub struct CollegeResponse {
    /// College ID.
    pub id: i64,
    /// College code.
    pub college_code: String,
    /// College name.
    pub college_name: String,
}

impl From<College> for CollegeResponse {
    fn from(college: College) -> Self {
        Self {
            id: college.id,
            college_code: college.code,
            college_name: college.name,
        }
    }
}

/// College list entry with live counts.
#[derive(Debug, Serialize)]
pub struct CollegeSummaryResponse {
    /// College ID.
    pub id: i64,
    /// College code.
    pub college_code: String,
    /// College name.
    pub college_name: String,
    /// Programs under the college.
    pub num_programs: i64,
    /// Students enrolled in those programs.
    pub num_students: i64,
}

impl From<CollegeSummary> for CollegeSummaryResponse {
    fn from(summary: CollegeSummary) -> Self {
        Self {
            id: summary.id,
            college_code: summary.code,
            college_name: summary.name,
            num_programs: summary.num_programs,
            num_students: summary.num_students,
        }
    }
}

/// College list response.
#[derive(Debug, Serialize)]
pub struct CollegeListResponse {
    /// Colleges, ordered by name.
    pub colleges: Vec<CollegeSummaryResponse>,
}

/// College create/update response.
#[derive(Debug, Serialize)]
pub struct CollegeSavedResponse {
    /// Human-readable message.
    pub message: String,
    /// Stored college.
    pub college: CollegeResponse,
}

// ============================================================================
// Program DTOs
// ============================================================================

/// Program response.
#[derive(Debug, Serialize)]
pub struct ProgramResponse {
    /// Program ID.
    pub id: i64,
    /// Program code.
    pub program_code: String,
    /// Program name.
    pub program_name: String,
    /// Owning college, null once the college is deleted.
    pub college_id: Option<i64>,
}

impl From<Program> for ProgramResponse {
    fn from(program: Program) -> Self {
        Self {
            id: program.id,
            program_code: program.code,
            program_name: program.name,
            college_id: program.college_id,
        }
    }
}

/// Program list entry with college name and live student count.
#[derive(Debug, Serialize)]
pub struct ProgramSummaryResponse {
    /// Program ID.
    pub id: i64,
    /// Program code.
    pub program_code: String,
    /// Program name.
    pub program_name: String,
    /// Owning college.
    pub college_id: Option<i64>,
    /// Owning college name.
    pub college_name: Option<String>,
    /// Students enrolled in the program.
    pub num_students: i64,
}

impl From<ProgramSummary> for ProgramSummaryResponse {
    fn from(summary: ProgramSummary) -> Self {
        Self {
            id: summary.id,
            program_code: summary.code,
            program_name: summary.name,
            college_id: summary.college_id,
            college_name: summary.college_name,
            num_students: summary.num_students,
        }
    }
}

/// Program list response.
#[derive(Debug, Serialize)]
pub struct ProgramListResponse {
    /// Programs, ordered by name.
    pub programs: Vec<ProgramSummaryResponse>,
}

/// Program create/update response.
#[derive(Debug, Serialize)]
pub struct ProgramSavedResponse {
    /// Human-readable message.
    pub message: String,
    /// Stored program.
    pub program: ProgramResponse,
}

// ============================================================================
// Student DTOs
// ============================================================================

/// Student response.
#[derive(Debug, Serialize)]
pub struct StudentResponse {
    /// External id.
    pub id_number: String,
    /// First name.
    pub first_name: String,
    /// Last name.
    pub last_name: String,
    /// Gender.
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

impl From<Student> for StudentResponse {
    fn from(student: Student) -> Self {
        Self {
            id_number: student.id_number,
            first_name: student.first_name,
            last_name: student.last_name,
            gender: student.gender.to_string(),
            year_level: student.year_level.to_string(),
            college_id: student.college_id,
            program_id: student.program_id,
            photo_url: student.photo_url,
        }
    }
}

/// Student list entry with program and college names.
#[derive(Debug, Serialize)]
pub struct StudentSummaryResponse {
    #[serde(flatten)]
    pub student: StudentResponse,
    /// Program code.
    pub program_code: Option<String>,
    /// Program name.
    pub program_name: Option<String>,
    /// College name.
    pub college_name: Option<String>,
}

impl From<StudentSummary> for StudentSummaryResponse {
    fn from(summary: StudentSummary) -> Self {
        Self {
            student: summary.student.into(),
            program_code: summary.program_code,
            program_name: summary.program_name,
            college_name: summary.college_name,
        }
    }
}

/// Student list response.
#[derive(Debug, Serialize)]
pub struct StudentListResponse {
    /// Students, ordered by last name then first name.
    pub students: Vec<StudentSummaryResponse>,
}

/// Student create/update response.
#[derive(Debug, Serialize)]
pub struct StudentSavedResponse {
    /// Human-readable message.
    pub message: String,
    /// Stored student.
    pub student: StudentResponse,
}

/// Filter options for the student list.
#[derive(Debug, Serialize)]
pub struct StudentFiltersResponse {
    /// Year levels in use.
    pub year_levels: Vec<String>,
    /// Genders in use.
    pub genders: Vec<String>,
}

impl From<StudentFilters> for StudentFiltersResponse {
    fn from(filters: StudentFilters) -> Self {
        Self {
            year_levels: filters.year_levels,
            genders: filters.genders,
        }
    }
}
