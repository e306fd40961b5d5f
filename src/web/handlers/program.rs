//! Program handlers.

use axum::{
    extract::State,
    http::StatusCode,
    Json,
};
use std::sync::Arc;

use super::AppState;
use crate::program::ProgramService;
use crate::web::dto::{
    ProgramListResponse, ProgramRequest, ProgramResponse, ProgramSavedResponse, SuccessResponse,
    ValidatedJson, ValidatedPath,
};
use crate::web::error::ApiError;
use crate::web::middleware::AuthUser;

/// GET /programs - List programs with college names and student counts.
pub async fn list_programs(
    State(state): State<Arc<AppState>>,
    _auth: AuthUser,
) -> Result<Json<ProgramListResponse>, ApiError> {
    let programs = ProgramService::new(&state.db).list().await?;
    Ok(Json(ProgramListResponse {
        programs: programs.into_iter().map(Into::into).collect(),
    }))
}

/// GET /programs/:id - Get a program.
pub async fn get_program(
    State(state): State<Arc<AppState>>,
    _auth: AuthUser,
    ValidatedPath(id): ValidatedPath<i64>,
) -> Result<Json<ProgramResponse>, ApiError> {
    let program = ProgramService::new(&state.db).get(id).await?;
    Ok(Json(program.into()))
}

/// POST /programs - Create a program.
pub async fn create_program(
    State(state): State<Arc<AppState>>,
    _auth: AuthUser,
    ValidatedJson(req): ValidatedJson<ProgramRequest>,
) -> Result<(StatusCode, Json<ProgramSavedResponse>), ApiError> {
    let program = ProgramService::new(&state.db).create(&req.into()).await?;
    Ok((
        StatusCode::CREATED,
        Json(ProgramSavedResponse {
            message: "Program added successfully".to_string(),
            program: program.into(),
        }),
    ))
}

/// PUT /programs/:id - Update a program.
pub async fn update_program(
    State(state): State<Arc<AppState>>,
    _auth: AuthUser,
    ValidatedPath(id): ValidatedPath<i64>,
    ValidatedJson(req): ValidatedJson<ProgramRequest>,
) -> Result<Json<ProgramSavedResponse>, ApiError> {
    let program = ProgramService::new(&state.db)
        .update(id, &req.into())
        .await?;
    Ok(Json(ProgramSavedResponse {
        message: "Program updated successfully".to_string(),
        program: program.into(),
    }))
}

/// DELETE /programs/:id - Delete a program, unlinking its students.
pub async fn delete_program(
    State(state): State<Arc<AppState>>,
    _auth: AuthUser,
    ValidatedPath(id): ValidatedPath<i64>,
) -> Result<Json<SuccessResponse>, ApiError> {
    let message = ProgramService::new(&state.db).delete(id).await?;
    Ok(Json(SuccessResponse::new(message)))
}
