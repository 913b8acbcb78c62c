//! Tunable weight and threshold tables.
//!
//! Defaults reproduce the documented scoring model. A JSON file can override
//! any subset of fields; the merged result is validated once at load and the
//! process refuses to start on a malformed table.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::engine::error::{ensure_sums_to_one, EngineConfigError};
use crate::models::candidate::{ExperienceKind, SkillLevel, UserCategory};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TierWeights {
    pub essential: f64,
    pub strong: f64,
    pub bonus: f64,
}

impl Default for TierWeights {
    fn default() -> Self {
        Self {
            essential: 0.5,
            strong: 0.3,
            bonus: 0.2,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LevelWeights {
    pub beginner: f64,
    pub intermediate: f64,
    pub advanced: f64,
}

impl Default for LevelWeights {
    fn default() -> Self {
        Self {
            beginner: 0.5,
            intermediate: 0.75,
            advanced: 1.0,
        }
    }
}

impl LevelWeights {
    /// Untracked level counts as full credit.
    pub fn weight(&self, level: Option<SkillLevel>) -> f64 {
        match level {
            Some(SkillLevel::Beginner) => self.beginner,
            Some(SkillLevel::Intermediate) => self.intermediate,
            Some(SkillLevel::Advanced) | None => self.advanced,
        }
    }
}

/// Component weights for the readiness aggregator. Must sum to 1.0.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ComponentWeights {
    pub skill: f64,
    pub project: f64,
    pub experience: f64,
    pub resume: f64,
}

impl ComponentWeights {
    fn as_slice(&self) -> [f64; 4] {
        [self.skill, self.project, self.experience, self.resume]
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CategoryWeightTables {
    pub student: ComponentWeights,
    pub professional: ComponentWeights,
}

impl Default for CategoryWeightTables {
    fn default() -> Self {
        Self {
            student: ComponentWeights {
                skill: 0.45,
                project: 0.30,
                experience: 0.05,
                resume: 0.20,
            },
            professional: ComponentWeights {
                skill: 0.30,
                project: 0.10,
                experience: 0.40,
                resume: 0.20,
            },
        }
    }
}

impl CategoryWeightTables {
    pub fn for_category(&self, category: UserCategory) -> &ComponentWeights {
        match category {
            UserCategory::Student => &self.student,
            UserCategory::Professional => &self.professional,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExperienceSettings {
    pub job_weight: f64,
    pub internship_weight: f64,
    pub freelance_weight: f64,
    /// Weighted months that earn full experience credit.
    pub full_credit_months: f64,
    /// Flat bonus when any formal job is listed.
    pub job_bonus: f64,
}

impl Default for ExperienceSettings {
    fn default() -> Self {
        Self {
            job_weight: 1.0,
            internship_weight: 0.8,
            freelance_weight: 0.6,
            full_credit_months: 36.0,
            job_bonus: 0.1,
        }
    }
}

impl ExperienceSettings {
    pub fn kind_weight(&self, kind: ExperienceKind) -> f64 {
        match kind {
            ExperienceKind::Job => self.job_weight,
            ExperienceKind::Internship => self.internship_weight,
            ExperienceKind::Freelance => self.freelance_weight,
        }
    }
}

/// Readiness score bands (0–100).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StatusBands {
    pub strong: u32,
    pub improving: u32,
}

impl Default for StatusBands {
    fn default() -> Self {
        Self {
            strong: 70,
            improving: 50,
        }
    }
}

/// Match label bands (percent).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchLabelBands {
    pub excellent: u32,
    pub good: u32,
    pub moderate: u32,
}

impl Default for MatchLabelBands {
    fn default() -> Self {
        Self {
            excellent: 85,
            good: 65,
            moderate: 45,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringSettings {
    pub tier_weights: TierWeights,
    pub level_weights: LevelWeights,
    pub category_weights: CategoryWeightTables,
    pub experience: ExperienceSettings,
    /// Complexity points that earn full project credit.
    pub project_full_credit: f64,
    pub status_bands: StatusBands,
    pub match_labels: MatchLabelBands,
    pub max_recommendations: usize,
}

impl Default for ScoringSettings {
    fn default() -> Self {
        Self {
            tier_weights: TierWeights::default(),
            level_weights: LevelWeights::default(),
            category_weights: CategoryWeightTables::default(),
            experience: ExperienceSettings::default(),
            project_full_credit: 4.0,
            status_bands: StatusBands::default(),
            match_labels: MatchLabelBands::default(),
            max_recommendations: 5,
        }
    }
}

impl ScoringSettings {
    /// Loads overrides from a JSON file and validates the merged tables.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, EngineConfigError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)?;
        let settings: ScoringSettings = serde_json::from_str(&raw)?;
        settings.validate()?;
        info!("Loaded scoring settings from {}", path.display());
        Ok(settings)
    }

    pub fn validate(&self) -> Result<(), EngineConfigError> {
        let tiers = &self.tier_weights;
        ensure_sums_to_one("tier weights", &[tiers.essential, tiers.strong, tiers.bonus])?;
        ensure_sums_to_one("student weights", &self.category_weights.student.as_slice())?;
        ensure_sums_to_one(
            "professional weights",
            &self.category_weights.professional.as_slice(),
        )?;

        let levels = &self.level_weights;
        let ordered = 0.0 < levels.beginner
            && levels.beginner <= levels.intermediate
            && levels.intermediate <= levels.advanced
            && levels.advanced <= 1.0;
        if !ordered {
            return Err(EngineConfigError::Thresholds(
                "level weights must satisfy 0 < beginner <= intermediate <= advanced <= 1".to_string(),
            ));
        }

        let exp = &self.experience;
        if [exp.job_weight, exp.internship_weight, exp.freelance_weight, exp.job_bonus]
            .iter()
            .any(|w| *w < 0.0 || w.is_nan())
        {
            return Err(EngineConfigError::Thresholds(
                "experience weights must be non-negative".to_string(),
            ));
        }
        if !(exp.full_credit_months > 0.0) {
            return Err(EngineConfigError::Thresholds(
                "full_credit_months must be positive".to_string(),
            ));
        }
        if !(self.project_full_credit > 0.0) {
            return Err(EngineConfigError::Thresholds(
                "project_full_credit must be positive".to_string(),
            ));
        }

        let status = &self.status_bands;
        if !(status.improving < status.strong && status.strong <= 100) {
            return Err(EngineConfigError::Thresholds(format!(
                "status bands must satisfy improving < strong <= 100 (got {} / {})",
                status.improving, status.strong
            )));
        }

        let labels = &self.match_labels;
        if !(labels.moderate < labels.good && labels.good < labels.excellent && labels.excellent <= 100)
        {
            return Err(EngineConfigError::Thresholds(format!(
                "match labels must satisfy moderate < good < excellent <= 100 (got {} / {} / {})",
                labels.moderate, labels.good, labels.excellent
            )));
        }

        Ok(())
    }
}
