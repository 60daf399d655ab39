use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json},
    Extension,
};
use validator::Validate;

use crate::dto::quiz_dto::{CreateQuizPayload, CreateQuizResponse, SubmitQuizRequest};
use crate::error::Result;
use crate::middleware::auth::Claims;
use crate::AppState;

#[utoipa::path(
    get,
    path = "/api/quizzes/{id}",
    params(("id" = i64, Path, description = "Quiz ID")),
    responses(
        (status = 200, description = "Quiz with its questions, without answers"),
        (status = 404, description = "Quiz not found")
    )
)]
#[axum::debug_handler]
pub async fn get_quiz(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse> {
    let quiz = state.quiz_service.get_public(id).await?;
    Ok(Json(quiz))
}

#[utoipa::path(
    post,
    path = "/api/quizzes/{id}/submit",
    params(("id" = i64, Path, description = "Quiz ID")),
    responses(
        (status = 200, description = "Submission scored and recorded"),
        (status = 400, description = "Invalid payload"),
        (status = 404, description = "Quiz not found")
    )
)]
#[axum::debug_handler]
pub async fn submit_quiz(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path(id): Path<i64>,
    Json(req): Json<SubmitQuizRequest>,
) -> Result<impl IntoResponse> {
    req.validate()?;
    let user_id = claims.user_id()?;
    let result = state.attempt_service.submit(user_id, id, &req).await?;
    Ok(Json(result))
}

#[axum::debug_handler]
pub async fn list_my_attempts(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
) -> Result<impl IntoResponse> {
    let user_id = claims.user_id()?;
    let attempts = state.attempt_service.history(user_id).await?;
    Ok(Json(attempts))
}

#[utoipa::path(
    post,
    path = "/api/admin/quizzes",
    responses(
        (status = 201, description = "Quiz created"),
        (status = 400, description = "Invalid payload")
    )
)]
#[axum::debug_handler]
pub async fn create_quiz(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Json(payload): Json<CreateQuizPayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    let admin_id = claims.user_id()?;
    let id = state.quiz_service.create(&payload, admin_id).await?;
    Ok((
        StatusCode::CREATED,
        Json(CreateQuizResponse {
            id,
            message: "Quiz created successfully".to_string(),
        }),
    ))
}
