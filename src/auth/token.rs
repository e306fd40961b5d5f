//! Signed access tokens.
//!
//! Tokens are HS256 JWTs carrying the account ID, issue and expiry times,
//! and a random unique ID (`jti`) used for revocation. A token is valid
//! until it expires or its `jti` is added to the shared [`RevocationSet`].

use std::sync::Arc;

use chrono::{DateTime, TimeZone, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use super::revocation::RevocationSet;

/// JWT claims structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenClaims {
    /// Subject (account ID).
    pub sub: i64,
    /// Issued at timestamp.
    pub iat: i64,
    /// Expiration timestamp.
    pub exp: i64,
    /// JWT ID (unique identifier).
    pub jti: String,
}

/// A freshly issued token.
#[derive(Debug, Clone)]
pub struct IssuedToken {
    /// Encoded token to hand to the client.
    pub value: String,
    /// The token's `jti`.
    pub unique_id: String,
    /// Expiry time.
    pub expires_at: DateTime<Utc>,
}

/// Token verification errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TokenError {
    /// Not a token signed by this issuer.
    #[error("malformed token")]
    Malformed,

    /// Token lifetime has passed.
    #[error("token expired")]
    Expired,

    /// Token was revoked by logout.
    #[error("token revoked")]
    Revoked,

    /// Signing failed.
    #[error("token signing failed: {0}")]
    Signing(String),
}

/// Issues and verifies access tokens.
pub struct TokenIssuer {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    lifetime_secs: u64,
    revoked: Arc<RevocationSet>,
}

impl TokenIssuer {
    /// Create an issuer signing with `secret` and sharing `revoked`.
    pub fn new(secret: &str, lifetime_secs: u64, revoked: Arc<RevocationSet>) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            lifetime_secs,
            revoked,
        }
    }

    /// Token lifetime in seconds.
    pub fn lifetime_secs(&self) -> u64 {
        self.lifetime_secs
    }

    /// Issue a token for an account, valid from now.
    pub fn issue(&self, account_id: i64) -> Result<IssuedToken, TokenError> {
        self.issue_at(account_id, Utc::now())
    }

    /// Issue a token as if it had been issued at `issued_at`.
    pub fn issue_at(
        &self,
        account_id: i64,
        issued_at: DateTime<Utc>,
    ) -> Result<IssuedToken, TokenError> {
        let iat = issued_at.timestamp();
        let exp = iat.saturating_add(i64::try_from(self.lifetime_secs).unwrap_or(i64::MAX));
        let jti = uuid::Uuid::new_v4().to_string();

        let claims = TokenClaims {
            sub: account_id,
            iat,
            exp,
            jti: jti.clone(),
        };

        let value = encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| TokenError::Signing(e.to_string()))?;

        let expires_at = Utc
            .timestamp_opt(exp, 0)
            .single()
            .unwrap_or(DateTime::<Utc>::MAX_UTC);

        Ok(IssuedToken {
            value,
            unique_id: jti,
            expires_at,
        })
    }

    /// Verify a token and return its claims.
    ///
    /// Checks signature, then expiry, then revocation.
    pub fn verify_claims(&self, token: &str) -> Result<TokenClaims, TokenError> {
        let claims = decode::<TokenClaims>(token, &self.decoding_key, &self.validation(true))
            .map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => TokenError::Expired,
                _ => {
                    debug!("Token validation failed: {}", e);
                    TokenError::Malformed
                }
            })?
            .claims;

        if self.revoked.is_revoked(&claims.jti) {
            return Err(TokenError::Revoked);
        }

        Ok(claims)
    }

    /// Verify a token and return the account ID it was issued for.
    pub fn verify(&self, token: &str) -> Result<i64, TokenError> {
        self.verify_claims(token).map(|claims| claims.sub)
    }

    /// Revoke a token. Revoking an already revoked or expired token succeeds.
    pub fn revoke(&self, token: &str) -> Result<(), TokenError> {
        let claims = decode::<TokenClaims>(token, &self.decoding_key, &self.validation(false))
            .map_err(|_| TokenError::Malformed)?
            .claims;

        if self.revoked.revoke(&claims.jti) {
            debug!(account_id = claims.sub, "Token revoked");
        }
        Ok(())
    }

    fn validation(&self, check_expiry: bool) -> Validation {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        validation.validate_exp = check_expiry;
        if !check_expiry {
            validation.required_spec_claims.clear();
        }
        validation
    }
}

impl std::fmt::Debug for TokenIssuer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenIssuer")
            .field("lifetime_secs", &self.lifetime_secs)
            .finish()
    }
}
