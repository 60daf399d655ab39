use axum::{
    extract::State,
    response::{IntoResponse, Json},
    Extension,
};
use validator::Validate;

use crate::dto::preference_dto::UpdatePreferencesPayload;
use crate::error::Result;
use crate::middleware::auth::Claims;
use crate::AppState;

#[axum::debug_handler]
pub async fn get_preferences(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
) -> Result<impl IntoResponse> {
    let prefs = state.preference_service.get(claims.user_id()?).await?;
    Ok(Json(prefs))
}

#[axum::debug_handler]
pub async fn update_preferences(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Json(payload): Json<UpdatePreferencesPayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    let prefs = state
        .preference_service
        .upsert(claims.user_id()?, &payload)
        .await?;
    Ok(Json(prefs))
}
