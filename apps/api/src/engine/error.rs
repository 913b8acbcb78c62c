use thiserror::Error;

/// Configuration-time failures. These are the only engine errors that may
/// halt the process; they are raised while building the registry or loading
/// settings, never while scoring.
#[derive(Debug, Error)]
pub enum EngineConfigError {
    #[error("Weights for {context} sum to {sum}, expected 1.0")]
    WeightSum { context: String, sum: f64 },

    #[error("Negative weight {weight} in {context}")]
    NegativeWeight { context: String, weight: f64 },

    #[error("Role name cannot be empty")]
    EmptyRoleName,

    #[error("Role '{0}' is registered more than once")]
    DuplicateRole(String),

    #[error("Role '{role}' lists '{skill}' in both the {first} and {second} tiers")]
    OverlappingTiers {
        role: String,
        skill: String,
        first: &'static str,
        second: &'static str,
    },

    #[error("Role '{role}' lists '{skill}' twice in the {tier} tier")]
    DuplicateSkill {
        role: String,
        skill: String,
        tier: &'static str,
    },

    #[error("Role '{role}' weights category '{category}' more than once")]
    DuplicateCategory { role: String, category: String },

    #[error("Alias '{alias}' maps to both '{first}' and '{second}'")]
    AliasConflict {
        alias: String,
        first: String,
        second: String,
    },

    #[error("Invalid threshold bands: {0}")]
    Thresholds(String),

    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse config JSON: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Sum-to-one check shared by every weight table.
pub(crate) fn ensure_sums_to_one(context: &str, weights: &[f64]) -> Result<(), EngineConfigError> {
    if let Some(&weight) = weights.iter().find(|w| **w < 0.0 || w.is_nan()) {
        return Err(EngineConfigError::NegativeWeight {
            context: context.to_string(),
            weight,
        });
    }
    let sum: f64 = weights.iter().sum();
    if (sum - 1.0).abs() > 1e-9 {
        return Err(EngineConfigError::WeightSum {
            context: context.to_string(),
            sum,
        });
    }
    Ok(())
}
