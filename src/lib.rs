//! SSIS - Simple Student Information System
//!
//! A records backend for colleges, the programs they offer and the students
//! enrolled in them, served as a token-authenticated JSON API.

pub mod auth;
pub mod college;
pub mod config;
pub mod db;
pub mod error;
pub mod logging;
pub mod program;
pub mod student;
pub mod validation;
pub mod web;

pub use auth::{
    hash_password, verify_password, CredentialStore, PasswordError, RevocationSet, TokenError,
    TokenIssuer,
};
pub use college::{College, CollegeService};
pub use config::Config;
pub use db::{Account, Database};
pub use error::{Result, SsisError};
pub use program::{Program, ProgramService};
pub use student::{Gender, Student, StudentService, YearLevel};
pub use validation::ValidationError;
pub use web::WebServer;
