//! Program model for SSIS.

/// A stored program row.
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct Program {
    /// Unique program ID.
    pub id: i64,
    /// Program code (unique, upper case).
    pub code: String,
    /// Program name (unique case-insensitively, title case).
    pub name: String,
    /// Owning college, if any.
    pub college_id: Option<i64>,
}

/// A program with its college's name and a live student count.
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct ProgramSummary {
    /// Unique program ID.
    pub id: i64,
    /// Program code.
    pub code: String,
    /// Program name.
    pub name: String,
    /// Owning college, if any.
    pub college_id: Option<i64>,
    /// Owning college's name; None when unassigned.
    pub college_name: Option<String>,
    /// Students enrolled in the program.
    pub num_students: i64,
}

/// Raw program fields as submitted by a client.
#[derive(Debug, Clone, Default)]
pub struct ProgramInput {
    /// Program code.
    pub code: String,
    /// Program name.
    pub name: String,
    /// Owning college; required.
    pub college_id: Option<i64>,
}

impl ProgramInput {
    /// Create an input for a program under the given college.
    pub fn new(code: impl Into<String>, name: impl Into<String>, college_id: i64) -> Self {
        Self {
            code: code.into(),
            name: name.into(),
            college_id: Some(college_id),
        }
    }
}

/// Validated, canonical program fields ready to be written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewProgram {
    /// Upper-case code.
    pub code: String,
    /// Title-case name.
    pub name: String,
    /// Owning college.
    pub college_id: i64,
}
