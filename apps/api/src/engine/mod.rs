//! Deterministic role-readiness scoring engine.
//!
//! Everything under this module is synchronous and I/O-free once built. The
//! only shared state is the taxonomy, the role registry and the settings,
//! all owned by `ReadinessEngine` and immutable after construction, so one
//! engine can be shared across threads behind an `Arc` without locking.

pub mod clamp;
pub mod duration;
pub mod error;
pub mod profile;
pub mod ranking;
pub mod readiness;
pub mod registry;
pub mod resume;
pub mod settings;
pub mod simulator;
pub mod skill_match;
pub mod taxonomy;

use tracing::info;

use crate::engine::error::EngineConfigError;
use crate::engine::registry::RoleRegistry;
use crate::engine::settings::ScoringSettings;
use crate::engine::taxonomy::{NormalizedSkill, SkillTaxonomy};

pub struct ReadinessEngine {
    taxonomy: SkillTaxonomy,
    registry: RoleRegistry,
    settings: ScoringSettings,
}

impl ReadinessEngine {
    /// Validates `settings` and takes ownership of the lookup tables.
    pub fn new(
        taxonomy: SkillTaxonomy,
        registry: RoleRegistry,
        settings: ScoringSettings,
    ) -> Result<Self, EngineConfigError> {
        settings.validate()?;
        info!(
            "Scoring engine ready: {} skills in taxonomy, {} role profiles",
            taxonomy.len(),
            registry.len()
        );
        Ok(Self {
            taxonomy,
            registry,
            settings,
        })
    }

    /// Built-in taxonomy, built-in roles and default settings.
    pub fn builtin() -> Result<Self, EngineConfigError> {
        let taxonomy = SkillTaxonomy::builtin()?;
        let registry = RoleRegistry::builtin(&taxonomy)?;
        Self::new(taxonomy, registry, ScoringSettings::default())
    }

    pub fn taxonomy(&self) -> &SkillTaxonomy {
        &self.taxonomy
    }

    pub fn registry(&self) -> &RoleRegistry {
        &self.registry
    }

    pub fn settings(&self) -> &ScoringSettings {
        &self.settings
    }

    pub fn normalize(&self, raw_skill: &str) -> NormalizedSkill {
        self.taxonomy.normalize(raw_skill)
    }
}
