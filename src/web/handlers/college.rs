//! College handlers.

use axum::{
    extract::State,
    http::StatusCode,
    Json,
};
use std::sync::Arc;

use super::AppState;
use crate::college::CollegeService;
use crate::web::dto::{
    CollegeListResponse, CollegeRequest, CollegeResponse, CollegeSavedResponse, SuccessResponse,
    ValidatedJson, ValidatedPath,
};
use crate::web::error::ApiError;
use crate::web::middleware::AuthUser;

/// GET /colleges - List colleges with program and student counts.
pub async fn list_colleges(
    State(state): State<Arc<AppState>>,
    _auth: AuthUser,
) -> Result<Json<CollegeListResponse>, ApiError> {
    let colleges = CollegeService::new(&state.db).list().await?;
    Ok(Json(CollegeListResponse {
        colleges: colleges.into_iter().map(Into::into).collect(),
    }))
}

/// GET /colleges/:id - Get a college.
pub async fn get_college(
    State(state): State<Arc<AppState>>,
    _auth: AuthUser,
    ValidatedPath(id): ValidatedPath<i64>,
) -> Result<Json<CollegeResponse>, ApiError> {
    let college = CollegeService::new(&state.db).get(id).await?;
    Ok(Json(college.into()))
}

/// POST /colleges - Create a college.
pub async fn create_college(
    State(state): State<Arc<AppState>>,
    _auth: AuthUser,
    ValidatedJson(req): ValidatedJson<CollegeRequest>,
) -> Result<(StatusCode, Json<CollegeSavedResponse>), ApiError> {
    let college = CollegeService::new(&state.db).create(&req.into()).await?;
    Ok((
        StatusCode::CREATED,
        Json(CollegeSavedResponse {
            message: "College added successfully".to_string(),
            college: college.into(),
        }),
    ))
}

/// PUT /colleges/:id - Update a college.
pub async fn update_college(
    State(state): State<Arc<AppState>>,
    _auth: AuthUser,
    ValidatedPath(id): ValidatedPath<i64>,
    ValidatedJson(req): ValidatedJson<CollegeRequest>,
) -> Result<Json<CollegeSavedResponse>, ApiError> {
    let college = CollegeService::new(&state.db)
        .update(id, &req.into())
        .await?;
    Ok(Json(CollegeSavedResponse {
        message: "College updated successfully".to_string(),
        college: college.into(),
    }))
}

/// DELETE /colleges/:id - Delete a college, unlinking its programs and students.
pub async fn delete_college(
    State(state): State<Arc<AppState>>,
    _auth: AuthUser,
    ValidatedPath(id): ValidatedPath<i64>,
) -> Result<Json<SuccessResponse>, ApiError> {
    let message = CollegeService::new(&state.db).delete(id).await?;
    Ok(Json(SuccessResponse::new(message)))
}
