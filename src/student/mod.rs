//! Student module for SSIS.
//!
//! Students may be assigned to a college and a program, and are keyed by
//! their external id number (`DDDD-DDDD`).

mod repository;
mod service;
mod types;

pub use repository::StudentRepository;
pub use service::{validate_student, StudentService};
pub use types::{
    Gender, NewStudent, Student, StudentFilters, StudentInput, StudentSummary, YearLevel,
};
