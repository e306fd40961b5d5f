//! Student handlers.
//!
//! Students are addressed by their external id number, not the row id.

use axum::{
    extract::State,
    http::StatusCode,
    Json,
};
use std::sync::Arc;

use super::AppState;
use crate::student::StudentService;
use crate::web::dto::{
    StudentFiltersResponse, StudentListResponse, StudentRequest, StudentResponse,
    StudentSavedResponse, SuccessResponse, ValidatedJson, ValidatedPath,
};
use crate::web::error::ApiError;
use crate::web::middleware::AuthUser;

/// GET /students - List students with program and college names.
pub async fn list_students(
    State(state): State<Arc<AppState>>,
    _auth: AuthUser,
) -> Result<Json<StudentListResponse>, ApiError> {
    let students = StudentService::new(&state.db).list().await?;
    Ok(Json(StudentListResponse {
        students: students.into_iter().map(Into::into).collect(),
    }))
}

/// GET /students/filters - Year levels and genders in use.
pub async fn student_filters(
    State(state): State<Arc<AppState>>,
    _auth: AuthUser,
) -> Result<Json<StudentFiltersResponse>, ApiError> {
    let filters = StudentService::new(&state.db).filters().await?;
    Ok(Json(filters.into()))
}

/// GET /students/:id_number - Get a student.
pub async fn get_student(
    State(state): State<Arc<AppState>>,
    _auth: AuthUser,
    ValidatedPath(id_number): ValidatedPath<String>,
) -> Result<Json<StudentResponse>, ApiError> {
    let student = StudentService::new(&state.db).get(&id_number).await?;
    Ok(Json(student.into()))
}

/// POST /students - Create a student.
pub async fn create_student(
    State(state): State<Arc<AppState>>,
    _auth: AuthUser,
    ValidatedJson(req): ValidatedJson<StudentRequest>,
) -> Result<(StatusCode, Json<StudentSavedResponse>), ApiError> {
    let student = StudentService::new(&state.db).create(&req.into()).await?;
    Ok((
        StatusCode::CREATED,
        Json(StudentSavedResponse {
            message: "Student added successfully".to_string(),
            student: student.into(),
        }),
    ))
}

/// PUT /students/:id_number - Update a student.
pub async fn update_student(
    State(state): State<Arc<AppState>>,
    _auth: AuthUser,
    ValidatedPath(id_number): ValidatedPath<String>,
    ValidatedJson(req): ValidatedJson<StudentRequest>,
) -> Result<Json<StudentSavedResponse>, ApiError> {
    let student = StudentService::new(&state.db)
        .update(&id_number, &req.into())
        .await?;
    Ok(Json(StudentSavedResponse {
        message: format!("Student {} updated successfully", student.id_number),
        student: student.into(),
    }))
}

/// DELETE /students/:id_number - Delete a student.
pub async fn delete_student(
    State(state): State<Arc<AppState>>,
    _auth: AuthUser,
    ValidatedPath(id_number): ValidatedPath<String>,
) -> Result<Json<SuccessResponse>, ApiError> {
    let message = StudentService::new(&state.db).delete(&id_number).await?;
    Ok(Json(SuccessResponse::new(message)))
}
