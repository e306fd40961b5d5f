//! Program module for SSIS.
//!
//! Programs belong to at most one college and own students. Deleting a
//! program leaves its students in place with their program cleared.

mod repository;
mod service;
mod types;

pub use repository::ProgramRepository;
pub use service::{validate_program, ProgramService};
pub use types::{NewProgram, Program, ProgramInput, ProgramSummary};
