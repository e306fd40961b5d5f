//! College module for SSIS.
//!
//! Colleges own programs. Deleting a college leaves its programs and
//! students in place with their college cleared.

mod repository;
mod service;
mod types;

pub use repository::CollegeRepository;
pub use service::{validate_college, CollegeService};
pub use types::{College, CollegeInput, CollegeSummary, NewCollege};
