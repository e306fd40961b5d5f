//! Authentication module for SSIS.
//!
//! This module provides password hashing, credential storage, and
//! access-token issuance with revocation.

mod credentials;
mod password;
mod revocation;
mod token;
pub mod validation;

pub use credentials::{CredentialStore, INVALID_CREDENTIALS};
pub use password::{hash_password, verify_password, PasswordError};
pub use revocation::RevocationSet;
pub use token::{IssuedToken, TokenClaims, TokenError, TokenIssuer};
