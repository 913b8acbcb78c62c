//! Composite readiness aggregator.
//!
//! Four unit sub-scores (skill, project, experience, resume) are blended with
//! the weight table for the candidate's `UserCategory` into a 0–100 score.

use serde::{Deserialize, Serialize};

use crate::engine::clamp;
use crate::engine::duration::parse_months;
use crate::engine::resume::score_resume;
use crate::engine::settings::ComponentWeights;
use crate::engine::skill_match::ScoreResult;
use crate::engine::ReadinessEngine;
use crate::models::candidate::{
    CandidateSnapshot, ExperienceEntry, ExperienceKind, Project, ProjectComplexity, UserCategory,
};

/// Tags that mark a project as advanced when no explicit complexity is given.
const ADVANCED_PROJECT_TAGS: &[&str] = &[
    "production",
    "deployed",
    "distributed",
    "microservices",
    "machine learning",
    "scalable",
    "real-time",
    "full stack",
    "fullstack",
    "open source",
];

/// Tag count at which an untagged-complexity project counts as intermediate.
const INTERMEDIATE_TAG_COUNT: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReadinessStatus {
    Strong,
    Improving,
    Gated,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ComponentScores {
    pub skill: f64,
    pub project: f64,
    pub experience: f64,
    pub resume: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReadinessResult {
    pub role_name: String,
    pub user_category: UserCategory,
    pub score: u32,
    pub component_scores: ComponentScores,
    pub weights: ComponentWeights,
    pub gaps: Vec<String>,
    pub status: ReadinessStatus,
    pub recommendations: Vec<String>,
    pub explanation: String,
}

pub fn project_complexity(project: &Project) -> ProjectComplexity {
    if let Some(c) = project.complexity {
        return c;
    }
    let advanced = project.tags.iter().any(|tag| {
        let tag = tag.trim().to_lowercase();
        ADVANCED_PROJECT_TAGS.contains(&tag.as_str())
    });
    if advanced {
        ProjectComplexity::Advanced
    } else if project.tags.len() >= INTERMEDIATE_TAG_COUNT {
        ProjectComplexity::Intermediate
    } else {
        ProjectComplexity::Basic
    }
}

fn complexity_points(complexity: ProjectComplexity) -> f64 {
    match complexity {
        ProjectComplexity::Basic => 0.5,
        ProjectComplexity::Intermediate => 0.75,
        ProjectComplexity::Advanced => 1.0,
    }
}

impl ReadinessEngine {
    /// Complexity points over the full-credit threshold, capped at 1.0.
    pub fn project_score(&self, projects: &[Project]) -> f64 {
        let points: f64 = projects
            .iter()
            .map(|p| complexity_points(project_complexity(p)))
            .sum();
        clamp::unit(points / self.settings().project_full_credit)
    }

    /// Months weighted by experience kind, before any capping.
    pub fn weighted_experience_months(&self, experiences: &[ExperienceEntry]) -> f64 {
        let exp = &self.settings().experience;
        experiences
            .iter()
            .map(|e| parse_months(&e.duration_text) as f64 * exp.kind_weight(e.kind))
            .sum()
    }

    /// `min(1, weighted/36) + 0.1 if any job`, clamped to `[0, 1]`.
    pub fn experience_score(&self, experiences: &[ExperienceEntry]) -> f64 {
        let exp = &self.settings().experience;
        let weighted = self.weighted_experience_months(experiences);
        let base = (weighted / exp.full_credit_months).min(1.0);
        let job_bonus = if experiences.iter().any(|e| e.kind == ExperienceKind::Job) {
            exp.job_bonus
        } else {
            0.0
        };
        clamp::unit(base + job_bonus)
    }

    /// Resume score as a unit value. No resume scores 0.
    pub fn resume_component(&self, candidate: &CandidateSnapshot) -> f64 {
        match &candidate.resume_bytes {
            Some(bytes) => {
                let file_name = candidate.resume_file_name.as_deref().unwrap_or("");
                clamp::unit(score_resume(bytes, file_name, candidate.user_category) as f64 / 100.0)
            }
            None => 0.0,
        }
    }

    pub fn status_for(&self, score: u32) -> ReadinessStatus {
        let bands = &self.settings().status_bands;
        if score >= bands.strong {
            ReadinessStatus::Strong
        } else if score >= bands.improving {
            ReadinessStatus::Improving
        } else {
            ReadinessStatus::Gated
        }
    }

    pub fn compute_readiness(&self, role_name: &str, candidate: &CandidateSnapshot) -> ReadinessResult {
        let resume = self.resume_component(candidate);
        self.readiness_with_resume(role_name, candidate, resume).0
    }

    /// Readiness with a precomputed resume component, plus the skill match it
    /// was built from. The resume score does not depend on the role, so batch
    /// and what-if callers extract the document once and reuse it here.
    pub(crate) fn readiness_with_resume(
        &self,
        role_name: &str,
        candidate: &CandidateSnapshot,
        resume: f64,
    ) -> (ReadinessResult, ScoreResult) {
        let skill_match = self.score_skills(role_name, &candidate.skills);

        let components = ComponentScores {
            skill: skill_match.overall_score,
            project: self.project_score(&candidate.projects),
            experience: self.experience_score(&candidate.experiences),
            resume: clamp::unit(resume),
        };
        let weights = *self
            .settings()
            .category_weights
            .for_category(candidate.user_category);

        let blended = weights.skill * components.skill
            + weights.project * components.project
            + weights.experience * components.experience
            + weights.resume * components.resume;
        let score = clamp::percent(blended);
        let status = self.status_for(score);

        let mut gaps = skill_match.essential_gaps.clone();
        let weakest = [
            components.skill,
            components.project,
            components.experience,
            components.resume,
        ]
        .into_iter()
        .fold(f64::INFINITY, f64::min);
        if components.project == weakest {
            gaps.push(
                "Projects are your weakest area: build a project that uses the role's essential skills."
                    .to_string(),
            );
        }
        if components.experience == weakest {
            gaps.push(format!(
                "Experience is your weakest area: {:.0} of {:.0} weighted months toward full credit.",
                self.weighted_experience_months(&candidate.experiences),
                self.settings().experience.full_credit_months
            ));
        }

        let mut recommendations = skill_match.recommendations.clone();
        if candidate.resume_bytes.is_none() {
            recommendations.push("Upload a resume to earn resume credit.".to_string());
        }

        let shortfalls = [
            ("skill", weights.skill * (1.0 - components.skill)),
            ("project", weights.project * (1.0 - components.project)),
            ("experience", weights.experience * (1.0 - components.experience)),
            ("resume", weights.resume * (1.0 - components.resume)),
        ];
        // First of equal shortfalls wins
        let (largest_name, largest_loss) = shortfalls
            .iter()
            .copied()
            .fold(("", f64::NEG_INFINITY), |best, s| if s.1 > best.1 { s } else { best });

        let explanation = format!(
            "{:?} readiness {score}/100 as {:?}: skill {:.2}, project {:.2}, experience {:.2}, resume {:.2} \
             (weighted {:.2} + {:.2} + {:.2} + {:.2}). Largest weighted shortfall: {largest_name} \
             ({} points). {}",
            status,
            candidate.user_category,
            components.skill,
            components.project,
            components.experience,
            components.resume,
            weights.skill * components.skill,
            weights.project * components.project,
            weights.experience * components.experience,
            weights.resume * components.resume,
            clamp::percent(largest_loss),
            skill_match.explanation
        );

        let result = ReadinessResult {
            role_name: skill_match.role_name.clone(),
            user_category: candidate.user_category,
            score,
            component_scores: components,
            weights,
            gaps,
            status,
            recommendations,
            explanation,
        };
        (result, skill_match)
    }
}
