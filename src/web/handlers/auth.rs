//! Authentication and account handlers.

use axum::{extract::State, http::StatusCode, Json};
use std::sync::Arc;

use super::AppState;
use crate::auth::CredentialStore;
use crate::web::dto::{
    AccountResponse, LoginRequest, RegisterRequest, SuccessResponse, TokenResponse,
    UpdateAccountRequest, ValidatedJson,
};
use crate::web::error::ApiError;
use crate::web::middleware::AuthUser;

/// POST /login - Exchange credentials for an access token.
pub async fn login(
    State(state): State<Arc<AppState>>,
    ValidatedJson(req): ValidatedJson<LoginRequest>,
) -> Result<Json<TokenResponse>, ApiError> {
    let store = CredentialStore::new(state.db.pool());
    let account = store.verify(&req.username, &req.password).await?;

    let token = state.tokens.issue(account.id)?;
    tracing::info!(account_id = account.id, "Login succeeded");

    Ok(Json(TokenResponse::bearer(
        token.value,
        state.tokens.lifetime_secs(),
    )))
}

/// POST /logout - Revoke the presented token.
pub async fn logout(
    State(state): State<Arc<AppState>>,
    auth: AuthUser,
) -> Result<Json<SuccessResponse>, ApiError> {
    state.tokens.revoke(&auth.token)?;
    tracing::info!(account_id = auth.account_id(), "Logged out");
    Ok(Json(SuccessResponse::new("Token has been revoked")))
}

/// GET /me - Current account.
pub async fn me(
    State(state): State<Arc<AppState>>,
    auth: AuthUser,
) -> Result<Json<AccountResponse>, ApiError> {
    let store = CredentialStore::new(state.db.pool());
    let account = store.get(auth.account_id()).await?;
    Ok(Json(account.into()))
}

/// PUT /me - Update the current account's credentials.
pub async fn update_me(
    State(state): State<Arc<AppState>>,
    auth: AuthUser,
    ValidatedJson(req): ValidatedJson<UpdateAccountRequest>,
) -> Result<Json<AccountResponse>, ApiError> {
    let store = CredentialStore::new(state.db.pool());
    let account = store
        .update_credentials(
            auth.account_id(),
            &req.username,
            &req.email,
            req.password.as_deref(),
        )
        .await?;
    Ok(Json(account.into()))
}

/// DELETE /me - Delete the current account and revoke the presented token.
pub async fn delete_me(
    State(state): State<Arc<AppState>>,
    auth: AuthUser,
) -> Result<Json<SuccessResponse>, ApiError> {
    let store = CredentialStore::new(state.db.pool());
    store.delete(auth.account_id()).await?;
    state.tokens.revoke(&auth.token)?;
    Ok(Json(SuccessResponse::new("Account deleted successfully")))
}

/// POST /register - Create a further account.
pub async fn register(
    State(state): State<Arc<AppState>>,
    auth: AuthUser,
    ValidatedJson(req): ValidatedJson<RegisterRequest>,
) -> Result<(StatusCode, Json<AccountResponse>), ApiError> {
    let store = CredentialStore::new(state.db.pool());
    let account = store
        .register(&req.username, &req.email, &req.password)
        .await?;
    tracing::debug!(
        account_id = account.id,
        created_by = auth.account_id(),
        "Account created through API"
    );
    Ok((StatusCode::CREATED, Json(account.into())))
}
