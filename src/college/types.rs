//! College model for SSIS.

/// A stored college row.
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct College {
    /// Unique college ID.
    pub id: i64,
    /// College code (unique, upper case).
    pub code: String,
    /// College name (unique case-insensitively, title case).
    pub name: String,
}

/// A college with live counts of what sits under it.
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct CollegeSummary {
    /// Unique college ID.
    pub id: i64,
    /// College code.
    pub code: String,
    /// College name.
    pub name: String,
    /// Programs owned by the college.
    pub num_programs: i64,
    /// Students enrolled in the college's programs.
    pub num_students: i64,
}

/// Raw college fields as submitted by a client.
#[derive(Debug, Clone, Default)]
pub struct CollegeInput {
    /// College code.
    pub code: String,
    /// College name.
    pub name: String,
}

impl CollegeInput {
    /// Create an input from code and name.
    pub fn new(code: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            name: name.into(),
        }
    }
}

/// Validated, canonical college fields ready to be written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCollege {
    /// Upper-case code.
    pub code: String,
    /// Title-case name.
    pub name: String,
}
