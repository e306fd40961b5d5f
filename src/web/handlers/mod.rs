//! API handlers for the Web API.

pub mod auth;
pub mod college;
pub mod program;
pub mod student;

use std::sync::Arc;

use crate::auth::{RevocationSet, TokenIssuer};
use crate::Database;

pub use auth::*;
pub use college::*;
pub use program::*;
pub use student::*;

/// Application state shared by all handlers.
pub struct AppState {
    /// Database handle.
    pub db: Database,
    /// Token issuer, also injected into request extensions for [`AuthUser`].
    ///
    /// [`AuthUser`]: crate::web::middleware::AuthUser
    pub tokens: Arc<TokenIssuer>,
}

impl AppState {
    /// Create a new application state with an empty revocation set.
    pub fn new(db: Database, jwt_secret: &str, access_token_expiry_secs: u64) -> Self {
        let revoked = Arc::new(RevocationSet::new());
        Self {
            db,
            tokens: Arc::new(TokenIssuer::new(
                jwt_secret,
                access_token_expiry_secs,
                revoked,
            )),
        }
    }
}
