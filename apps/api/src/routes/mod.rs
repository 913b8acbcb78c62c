pub mod health;
pub mod roles;
pub mod scoring;

use axum::{
    routing::{get, post},
    Router,
};

use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Registry and taxonomy
        .route("/api/v1/roles", get(roles::handle_list_roles))
        .route("/api/v1/roles/:name", get(roles::handle_get_role))
        .route("/api/v1/skills/normalize", post(roles::handle_normalize))
        // Scoring
        .route("/api/v1/skill-match", post(scoring::handle_skill_match))
        .route("/api/v1/readiness", post(scoring::handle_readiness))
        .route("/api/v1/simulate", post(scoring::handle_simulate))
        .route("/api/v1/profile/report", post(scoring::handle_profile_report))
        .route("/api/v1/resume/score", post(scoring::handle_resume_score))
        // Batch
        .route(
            "/api/v1/rank/candidates",
            post(scoring::handle_rank_candidates),
        )
        .route("/api/v1/rank/roles", post(scoring::handle_rank_roles))
        .with_state(state)
}
