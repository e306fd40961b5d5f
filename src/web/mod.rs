//! Web API module for SSIS.
//!
//! A JSON REST API over the credential store and the college, program and
//! student records. Every route except login and the health check sits
//! behind bearer-token authentication.

pub mod dto;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod server;

pub use error::ApiError;
pub use handlers::AppState;
pub use router::create_router;
pub use server::WebServer;
