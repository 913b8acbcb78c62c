use anyhow::Context;
use axum::{
    extract::{Multipart, State},
    Json,
};
use bytes::Bytes;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::engine::profile::ProfileReport;
use crate::engine::ranking::{RankBy, RankedCandidate, RankedRole};
use crate::engine::readiness::ReadinessResult;
use crate::engine::resume::{assess_resume, ResumeAssessment};
use crate::engine::simulator::{HypotheticalChange, SimulationResult};
use crate::engine::skill_match::ScoreResult;
use crate::errors::AppError;
use crate::models::candidate::{CandidateSnapshot, SkillEntry, UserCategory};
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct SkillMatchRequest {
    pub role_name: String,
    #[serde(default)]
    pub skills: Vec<SkillEntry>,
}

#[derive(Deserialize)]
pub struct ReadinessRequest {
    pub role_name: String,
    pub candidate: CandidateSnapshot,
}

#[derive(Deserialize)]
pub struct SimulateRequest {
    pub role_name: String,
    pub candidate: CandidateSnapshot,
    pub change: HypotheticalChange,
}

#[derive(Deserialize)]
pub struct RankCandidatesRequest {
    pub role_name: String,
    pub candidates: Vec<CandidateSnapshot>,
    #[serde(default)]
    pub rank_by: RankBy,
}

#[derive(Deserialize)]
pub struct RankRolesRequest {
    pub candidate: CandidateSnapshot,
    pub role_names: Vec<String>,
    #[serde(default)]
    pub rank_by: RankBy,
}

#[derive(Serialize)]
pub struct RankCandidatesResponse {
    pub role_name: String,
    pub rank_by: RankBy,
    pub results: Vec<RankedCandidate>,
}

#[derive(Serialize)]
pub struct RankRolesResponse {
    pub rank_by: RankBy,
    pub results: Vec<RankedRole>,
}

#[derive(Deserialize)]
pub struct ProfileReportRequest {
    pub candidate: CandidateSnapshot,
}

#[derive(Serialize)]
pub struct ResumeScoreResponse {
    pub file_name: String,
    pub score: u32,
    pub assessment: ResumeAssessment,
}

fn require_role_name(role_name: &str) -> Result<(), AppError> {
    if role_name.trim().is_empty() {
        return Err(AppError::Validation("role_name must not be empty".to_string()));
    }
    Ok(())
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/skill-match
pub async fn handle_skill_match(
    State(state): State<AppState>,
    Json(req): Json<SkillMatchRequest>,
) -> Result<Json<ScoreResult>, AppError> {
    require_role_name(&req.role_name)?;
    Ok(Json(state.engine.score_skills(&req.role_name, &req.skills)))
}

/// POST /api/v1/readiness
pub async fn handle_readiness(
    State(state): State<AppState>,
    Json(req): Json<ReadinessRequest>,
) -> Result<Json<ReadinessResult>, AppError> {
    require_role_name(&req.role_name)?;
    let engine = state.engine.clone();

    // Resume extraction may parse a PDF.
    let result = tokio::task::spawn_blocking(move || {
        engine.compute_readiness(&req.role_name, &req.candidate)
    })
    .await
    .context("readiness task failed")?;

    Ok(Json(result))
}

/// POST /api/v1/simulate
pub async fn handle_simulate(
    State(state): State<AppState>,
    Json(req): Json<SimulateRequest>,
) -> Result<Json<SimulationResult>, AppError> {
    require_role_name(&req.role_name)?;
    let engine = state.engine.clone();

    let result = tokio::task::spawn_blocking(move || {
        engine.simulate(&req.candidate, &req.change, &req.role_name)
    })
    .await
    .context("simulation task failed")?;

    Ok(Json(result))
}

/// POST /api/v1/rank/candidates
pub async fn handle_rank_candidates(
    State(state): State<AppState>,
    Json(req): Json<RankCandidatesRequest>,
) -> Result<Json<RankCandidatesResponse>, AppError> {
    require_role_name(&req.role_name)?;
    let engine = state.engine.clone();
    let RankCandidatesRequest {
        role_name,
        candidates,
        rank_by,
    } = req;

    let (role_name, results) = tokio::task::spawn_blocking(move || {
        let results = engine.rank_candidates(&role_name, &candidates, rank_by);
        (role_name, results)
    })
    .await
    .context("candidate ranking task failed")?;

    info!("Ranked {} candidates for '{role_name}'", results.len());
    Ok(Json(RankCandidatesResponse {
        role_name,
        rank_by,
        results,
    }))
}

/// POST /api/v1/rank/roles
pub async fn handle_rank_roles(
    State(state): State<AppState>,
    Json(req): Json<RankRolesRequest>,
) -> Result<Json<RankRolesResponse>, AppError> {
    if req.role_names.is_empty() {
        return Err(AppError::Validation("role_names must not be empty".to_string()));
    }
    let engine = state.engine.clone();
    let RankRolesRequest {
        candidate,
        role_names,
        rank_by,
    } = req;

    let results = tokio::task::spawn_blocking(move || {
        engine.rank_roles(&candidate, &role_names, rank_by)
    })
    .await
    .context("role ranking task failed")?;

    Ok(Json(RankRolesResponse { rank_by, results }))
}

/// POST /api/v1/profile/report
pub async fn handle_profile_report(
    State(state): State<AppState>,
    Json(req): Json<ProfileReportRequest>,
) -> Json<ProfileReport> {
    Json(state.engine.profile_report(&req.candidate))
}

/// POST /api/v1/resume/score
/// Multipart fields: `file` (required) and `user_category` (defaults to student).
pub async fn handle_resume_score(mut multipart: Multipart) -> Result<Json<ResumeScoreResponse>, AppError> {
    let mut upload: Option<(String, Vec<u8>)> = None;
    let mut user_category = UserCategory::Student;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Malformed multipart body: {e}")))?
    {
        let name = field.name().unwrap_or("").to_string();
        match name.as_str() {
            "file" => {
                let file_name = field.file_name().unwrap_or("").to_string();
                let bytes: Bytes = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::Validation(format!("Unreadable file field: {e}")))?;
                upload = Some((file_name, bytes.to_vec()));
            }
            "user_category" => {
                let value = field
                    .text()
                    .await
                    .map_err(|e| AppError::Validation(format!("Unreadable user_category: {e}")))?;
                user_category = parse_user_category(&value)?;
            }
            _ => {}
        }
    }

    let (file_name, bytes) =
        upload.ok_or_else(|| AppError::Validation("Missing 'file' field".to_string()))?;
    if bytes.is_empty() {
        return Err(AppError::UnprocessableEntity(format!(
            "Uploaded file '{file_name}' is empty"
        )));
    }

    // Extraction is CPU-bound and may be slow on large PDFs.
    let assessment = {
        let file_name = file_name.clone();
        tokio::task::spawn_blocking(move || assess_resume(&bytes, &file_name, user_category))
            .await
            .context("resume scoring task failed")?
    };

    Ok(Json(ResumeScoreResponse {
        file_name,
        score: assessment.score,
        assessment,
    }))
}

fn parse_user_category(value: &str) -> Result<UserCategory, AppError> {
    let normalized = value.trim().to_lowercase();
    serde_json::from_value(serde_json::Value::String(normalized))
        .map_err(|_| AppError::Validation(format!("Unknown user_category '{value}'")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_user_category() {
        assert_eq!(parse_user_category("Student").unwrap(), UserCategory::Student);
        assert_eq!(parse_user_category(" fresher ").unwrap(), UserCategory::Student);
        assert_eq!(
            parse_user_category("professional").unwrap(),
            UserCategory::Professional
        );
        assert!(parse_user_category("manager").is_err());
    }

    #[test]
    fn test_blank_role_name_rejected() {
        assert!(require_role_name("  ").is_err());
        assert!(require_role_name("Data Analyst").is_ok());
    }
}
