use axum::{
    extract::{Path, State},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::engine::registry::RoleProfile;
use crate::engine::taxonomy::NormalizedSkill;
use crate::errors::AppError;
use crate::state::AppState;

#[derive(Serialize)]
pub struct RoleListResponse {
    pub roles: Vec<String>,
}

#[derive(Deserialize)]
pub struct NormalizeRequest {
    pub skills: Vec<String>,
}

#[derive(Serialize)]
pub struct NormalizeResponse {
    pub skills: Vec<NormalizedSkill>,
}

/// GET /api/v1/roles
pub async fn handle_list_roles(State(state): State<AppState>) -> Json<RoleListResponse> {
    let roles = state
        .engine
        .registry()
        .role_names()
        .into_iter()
        .map(str::to_string)
        .collect();
    Json(RoleListResponse { roles })
}

/// GET /api/v1/roles/:name
pub async fn handle_get_role(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Json<RoleProfile>, AppError> {
    state
        .engine
        .registry()
        .get(&name)
        .cloned()
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("Role '{name}' not found")))
}

/// POST /api/v1/skills/normalize
pub async fn handle_normalize(
    State(state): State<AppState>,
    Json(req): Json<NormalizeRequest>,
) -> Json<NormalizeResponse> {
    let skills = req
        .skills
        .iter()
        .map(|raw| state.engine.normalize(raw))
        .collect();
    Json(NormalizeResponse { skills })
}
