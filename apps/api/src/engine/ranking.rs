//! Batch ranker: one role against many candidates, or one candidate against
//! many roles. Sorting is stable so ties keep insertion order.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::engine::readiness::ReadinessStatus;
use crate::engine::settings::MatchLabelBands;
use crate::engine::ReadinessEngine;
use crate::models::candidate::CandidateSnapshot;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchLabel {
    Excellent,
    Good,
    Moderate,
    Poor,
}

impl MatchLabel {
    pub fn from_percentage(percentage: u32, bands: &MatchLabelBands) -> Self {
        if percentage >= bands.excellent {
            MatchLabel::Excellent
        } else if percentage >= bands.good {
            MatchLabel::Good
        } else if percentage >= bands.moderate {
            MatchLabel::Moderate
        } else {
            MatchLabel::Poor
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RankBy {
    #[default]
    Readiness,
    SkillMatch,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedCandidate {
    pub rank: usize,
    /// Position in the input list.
    pub index: usize,
    pub candidate_id: Option<Uuid>,
    pub score: u32,
    pub readiness_score: u32,
    pub match_percentage: u32,
    pub label: MatchLabel,
    pub status: ReadinessStatus,
    pub essential_gaps: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedRole {
    pub rank: usize,
    pub index: usize,
    pub role_name: String,
    pub role_found: bool,
    pub score: u32,
    pub readiness_score: u32,
    pub match_percentage: u32,
    pub label: MatchLabel,
    pub status: ReadinessStatus,
    pub essential_gaps: Vec<String>,
}

/// Shared per-item scoring for both ranking directions.
struct Scored {
    role_name: String,
    role_found: bool,
    readiness_score: u32,
    match_percentage: u32,
    status: ReadinessStatus,
    essential_gaps: Vec<String>,
}

impl Scored {
    fn key(&self, rank_by: RankBy) -> u32 {
        match rank_by {
            RankBy::Readiness => self.readiness_score,
            RankBy::SkillMatch => self.match_percentage,
        }
    }
}

impl ReadinessEngine {
    fn score_pair(&self, role_name: &str, candidate: &CandidateSnapshot, resume: f64) -> Scored {
        let (readiness, skill_match) = self.readiness_with_resume(role_name, candidate, resume);
        Scored {
            role_name: skill_match.role_name,
            role_found: skill_match.role_found,
            readiness_score: readiness.score,
            match_percentage: skill_match.match_percentage,
            status: readiness.status,
            essential_gaps: skill_match.essential_gaps,
        }
    }

    /// Ranks `candidates` for `role_name`, best first.
    pub fn rank_candidates(
        &self,
        role_name: &str,
        candidates: &[CandidateSnapshot],
        rank_by: RankBy,
    ) -> Vec<RankedCandidate> {
        let mut scored: Vec<(usize, &CandidateSnapshot, Scored)> = candidates
            .iter()
            .enumerate()
            .map(|(i, c)| (i, c, self.score_pair(role_name, c, self.resume_component(c))))
            .collect();
        scored.sort_by(|a, b| b.2.key(rank_by).cmp(&a.2.key(rank_by)));

        let bands = &self.settings().match_labels;
        scored
            .into_iter()
            .enumerate()
            .map(|(pos, (index, candidate, s))| {
                let score = s.key(rank_by);
                RankedCandidate {
                    rank: pos + 1,
                    index,
                    candidate_id: candidate.candidate_id,
                    score,
                    readiness_score: s.readiness_score,
                    match_percentage: s.match_percentage,
                    label: MatchLabel::from_percentage(score, bands),
                    status: s.status,
                    essential_gaps: s.essential_gaps,
                }
            })
            .collect()
    }

    /// Ranks `role_names` for one candidate, best fit first.
    pub fn rank_roles(
        &self,
        candidate: &CandidateSnapshot,
        role_names: &[String],
        rank_by: RankBy,
    ) -> Vec<RankedRole> {
        let resume = self.resume_component(candidate);
        let mut scored: Vec<(usize, Scored)> = role_names
            .iter()
            .enumerate()
            .map(|(i, role)| (i, self.score_pair(role, candidate, resume)))
            .collect();
        scored.sort_by(|a, b| b.1.key(rank_by).cmp(&a.1.key(rank_by)));

        let bands = &self.settings().match_labels;
        scored
            .into_iter()
            .enumerate()
            .map(|(pos, (index, s))| {
                let score = s.key(rank_by);
                RankedRole {
                    rank: pos + 1,
                    index,
                    score,
                    label: MatchLabel::from_percentage(score, bands),
                    readiness_score: s.readiness_score,
                    match_percentage: s.match_percentage,
                    status: s.status,
                    role_found: s.role_found,
                    essential_gaps: s.essential_gaps,
                    role_name: s.role_name,
                }
            })
            .collect()
    }
}
