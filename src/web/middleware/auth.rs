//! Bearer-token authentication middleware.

use axum::{
    async_trait,
    body::Body,
    extract::FromRequestParts,
    http::{request::Parts, Request},
    middleware::Next,
    response::Response,
};
use axum_extra::{
    headers::{authorization::Bearer, Authorization},
    TypedHeader,
};
use std::sync::Arc;

use crate::auth::{TokenClaims, TokenIssuer};
use crate::web::error::ApiError;

/// Extractor for authenticated accounts.
///
/// Use this extractor to require authentication for a handler. The request
/// is rejected before the handler runs unless it carries a valid,
/// unexpired and unrevoked bearer token.
#[derive(Debug, Clone)]
pub struct AuthUser {
    /// Verified token claims.
    pub claims: TokenClaims,
    /// The presented token, kept so logout can revoke it.
    pub token: String,
}

impl AuthUser {
    /// ID of the authenticated account.
    pub fn account_id(&self) -> i64 {
        self.claims.sub
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let TypedHeader(Authorization(bearer)) =
            TypedHeader::<Authorization<Bearer>>::from_request_parts(parts, state)
                .await
                .map_err(|_| ApiError::unauthorized("Missing authorization"))?;

        // Issuer is injected by `token_auth`
        let issuer = parts
            .extensions
            .get::<Arc<TokenIssuer>>()
            .ok_or_else(|| ApiError::internal("Token issuer not configured"))?;

        let claims = issuer.verify_claims(bearer.token()).map_err(|e| {
            tracing::debug!("Token rejected: {}", e);
            ApiError::from(e)
        })?;

        Ok(AuthUser {
            claims,
            token: bearer.token().to_string(),
        })
    }
}

/// Middleware function to inject the token issuer into request extensions.
pub async fn token_auth(
    issuer: Arc<TokenIssuer>,
    mut request: Request<Body>,
    next: Next,
) -> Response {
    request.extensions_mut().insert(issuer);
    next.run(request).await
}
