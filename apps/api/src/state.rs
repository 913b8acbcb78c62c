use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::info;

use crate::config::Config;
use crate::engine::registry::RoleRegistry;
use crate::engine::settings::ScoringSettings;
use crate::engine::taxonomy::SkillTaxonomy;
use crate::engine::ReadinessEngine;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Immutable after startup; shared across handlers and blocking workers.
    pub engine: Arc<ReadinessEngine>,
}

impl AppState {
    /// Builds the engine from the configured tables. Any invalid table aborts
    /// startup.
    pub fn from_config(config: &Config) -> Result<Self> {
        let taxonomy = SkillTaxonomy::builtin().context("built-in skill taxonomy is invalid")?;

        let registry = match &config.role_profiles_path {
            Some(path) => RoleRegistry::from_file(path, &taxonomy)
                .with_context(|| format!("loading role profiles from {}", path.display()))?,
            None => RoleRegistry::builtin(&taxonomy).context("built-in role profiles are invalid")?,
        };

        let settings = match &config.scoring_settings_path {
            Some(path) => ScoringSettings::from_file(path)
                .with_context(|| format!("loading scoring settings from {}", path.display()))?,
            None => {
                info!("Using default scoring settings");
                ScoringSettings::default()
            }
        };

        let engine = ReadinessEngine::new(taxonomy, registry, settings)?;
        Ok(Self::with_engine(engine))
    }

    pub fn with_engine(engine: ReadinessEngine) -> Self {
        Self {
            engine: Arc::new(engine),
        }
    }
}
