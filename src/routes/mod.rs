pub mod health;
pub mod jobs;
pub mod preferences;
pub mod quiz;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use utoipa::OpenApi;

use crate::middleware::auth::{require_admin, require_bearer_auth};
use crate::AppState;

#[derive(OpenApi)]
#[openapi(paths(
    quiz::get_quiz,
    quiz::submit_quiz,
    quiz::create_quiz,
    jobs::list_job_logs,
    jobs::run_job,
    jobs::list_schedule,
    jobs::list_metrics,
))]
pub struct ApiDoc;

pub fn create_router(state: AppState) -> Router {
    let user_api = Router::new()
        .route("/api/quizzes/:id", get(quiz::get_quiz))
        .route("/api/quizzes/:id/submit", post(quiz::submit_quiz))
        .route("/api/user/attempts", get(quiz::list_my_attempts))
        .route(
            "/api/user/preferences",
            get(preferences::get_preferences).put(preferences::update_preferences),
        )
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            require_bearer_auth,
        ));

    let admin_api = Router::new()
        .route("/api/admin/quizzes", post(quiz::create_quiz))
        .route("/api/admin/jobs", get(jobs::list_job_logs))
        .route("/api/admin/jobs/schedule", get(jobs::list_schedule))
        .route("/api/admin/jobs/:name/run", post(jobs::run_job))
        .route("/api/admin/metrics", get(jobs::list_metrics))
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            require_admin,
        ));

    Router::new()
        .route("/health", get(health::health))
        .merge(user_api)
        .merge(admin_api)
        .with_state(state)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}
