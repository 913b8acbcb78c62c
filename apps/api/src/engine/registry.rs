//! Role profile registry.
//!
//! Profiles are assembled through `RoleProfileBuilder`, which resolves every
//! skill through the taxonomy and rejects malformed profiles (category weights
//! not summing to 1.0, a skill appearing in two tiers). The registry is built
//! once at startup and is read-only afterwards.

use std::collections::HashMap;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::engine::error::{ensure_sums_to_one, EngineConfigError};
use crate::engine::taxonomy::{SkillCategory, SkillTaxonomy};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tier {
    Essential,
    Strong,
    Bonus,
}

impl Tier {
    pub const ALL: [Tier; 3] = [Tier::Essential, Tier::Strong, Tier::Bonus];

    pub fn label(self) -> &'static str {
        match self {
            Tier::Essential => "essential",
            Tier::Strong => "strong",
            Tier::Bonus => "bonus",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryWeight {
    pub category: SkillCategory,
    pub weight: f64,
}

/// Per-role requirements. Tier lists hold canonical names in priority order
/// and are pairwise disjoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoleProfile {
    pub role_name: String,
    pub categories: Vec<CategoryWeight>,
    pub essential_skills: Vec<String>,
    pub strong_skills: Vec<String>,
    pub bonus_skills: Vec<String>,
}

impl RoleProfile {
    pub fn tier(&self, tier: Tier) -> &[String] {
        match tier {
            Tier::Essential => &self.essential_skills,
            Tier::Strong => &self.strong_skills,
            Tier::Bonus => &self.bonus_skills,
        }
    }

    pub fn tier_of(&self, canonical_name: &str) -> Option<Tier> {
        Tier::ALL
            .into_iter()
            .find(|t| self.tier(*t).iter().any(|s| s == canonical_name))
    }
}

/// JSON shape for file-supplied profiles. Skill names may be aliases.
#[derive(Debug, Clone, Deserialize)]
pub struct RoleProfileDef {
    pub role_name: String,
    pub categories: Vec<CategoryWeight>,
    #[serde(default)]
    pub essential_skills: Vec<String>,
    #[serde(default)]
    pub strong_skills: Vec<String>,
    #[serde(default)]
    pub bonus_skills: Vec<String>,
}

#[derive(Debug, Clone, Default)]
pub struct RoleProfileBuilder {
    role_name: String,
    categories: Vec<CategoryWeight>,
    essential: Vec<String>,
    strong: Vec<String>,
    bonus: Vec<String>,
}

impl RoleProfileBuilder {
    pub fn new(role_name: impl Into<String>) -> Self {
        Self {
            role_name: role_name.into(),
            ..Self::default()
        }
    }

    pub fn category(mut self, category: SkillCategory, weight: f64) -> Self {
        self.categories.push(CategoryWeight { category, weight });
        self
    }

    pub fn essential(mut self, skills: &[&str]) -> Self {
        self.essential.extend(skills.iter().map(|s| s.to_string()));
        self
    }

    pub fn strong(mut self, skills: &[&str]) -> Self {
        self.strong.extend(skills.iter().map(|s| s.to_string()));
        self
    }

    pub fn bonus(mut self, skills: &[&str]) -> Self {
        self.bonus.extend(skills.iter().map(|s| s.to_string()));
        self
    }

    pub fn build(self, taxonomy: &SkillTaxonomy) -> Result<RoleProfile, EngineConfigError> {
        let role_name = self.role_name.trim().to_string();
        if role_name.is_empty() {
            return Err(EngineConfigError::EmptyRoleName);
        }

        for (i, cw) in self.categories.iter().enumerate() {
            if self.categories[..i].iter().any(|c| c.category == cw.category) {
                return Err(EngineConfigError::DuplicateCategory {
                    role: role_name,
                    category: cw.category.label().to_string(),
                });
            }
        }
        let weights: Vec<f64> = self.categories.iter().map(|c| c.weight).collect();
        ensure_sums_to_one(&format!("role '{role_name}' categories"), &weights)?;

        let essential = canonical_tier(&role_name, Tier::Essential, &self.essential, taxonomy)?;
        let strong = canonical_tier(&role_name, Tier::Strong, &self.strong, taxonomy)?;
        let bonus = canonical_tier(&role_name, Tier::Bonus, &self.bonus, taxonomy)?;

        let tiers = [
            (Tier::Essential, &essential),
            (Tier::Strong, &strong),
            (Tier::Bonus, &bonus),
        ];
        for (i, (first_tier, first)) in tiers.iter().enumerate() {
            for (second_tier, second) in &tiers[i + 1..] {
                if let Some(skill) = first.iter().find(|s| second.contains(s)) {
                    return Err(EngineConfigError::OverlappingTiers {
                        role: role_name,
                        skill: skill.clone(),
                        first: first_tier.label(),
                        second: second_tier.label(),
                    });
                }
            }
        }

        Ok(RoleProfile {
            role_name,
            categories: self.categories,
            essential_skills: essential,
            strong_skills: strong,
            bonus_skills: bonus,
        })
    }
}

impl From<RoleProfileDef> for RoleProfileBuilder {
    fn from(def: RoleProfileDef) -> Self {
        Self {
            role_name: def.role_name,
            categories: def.categories,
            essential: def.essential_skills,
            strong: def.strong_skills,
            bonus: def.bonus_skills,
        }
    }
}

fn canonical_tier(
    role: &str,
    tier: Tier,
    raw: &[String],
    taxonomy: &SkillTaxonomy,
) -> Result<Vec<String>, EngineConfigError> {
    let mut out: Vec<String> = Vec::with_capacity(raw.len());
    for name in raw {
        let canonical = taxonomy.normalize(name).canonical_name;
        if out.contains(&canonical) {
            return Err(EngineConfigError::DuplicateSkill {
                role: role.to_string(),
                skill: canonical,
                tier: tier.label(),
            });
        }
        out.push(canonical);
    }
    Ok(out)
}

#[derive(Debug, Clone)]
pub struct RoleRegistry {
    profiles: Vec<RoleProfile>,
    by_key: HashMap<String, usize>,
}

impl RoleRegistry {
    pub fn from_profiles(profiles: Vec<RoleProfile>) -> Result<Self, EngineConfigError> {
        let mut by_key = HashMap::with_capacity(profiles.len());
        for (idx, profile) in profiles.iter().enumerate() {
            if by_key.insert(role_key(&profile.role_name), idx).is_some() {
                return Err(EngineConfigError::DuplicateRole(profile.role_name.clone()));
            }
        }
        Ok(Self { profiles, by_key })
    }

    /// Loads a JSON array of role definitions, validating each through the builder.
    pub fn from_file(
        path: impl AsRef<Path>,
        taxonomy: &SkillTaxonomy,
    ) -> Result<Self, EngineConfigError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)?;
        let defs: Vec<RoleProfileDef> = serde_json::from_str(&raw)?;
        let profiles = defs
            .into_iter()
            .map(|def| RoleProfileBuilder::from(def).build(taxonomy))
            .collect::<Result<Vec<_>, _>>()?;
        info!("Loaded {} role profiles from {}", profiles.len(), path.display());
        Self::from_profiles(profiles)
    }

    pub fn builtin(taxonomy: &SkillTaxonomy) -> Result<Self, EngineConfigError> {
        let profiles = builtin_profiles()
            .into_iter()
            .map(|b| b.build(taxonomy))
            .collect::<Result<Vec<_>, _>>()?;
        Self::from_profiles(profiles)
    }

    /// Case-insensitive lookup. `None` is the documented NotFound path.
    pub fn get(&self, role_name: &str) -> Option<&RoleProfile> {
        self.by_key
            .get(&role_key(role_name))
            .map(|&idx| &self.profiles[idx])
    }

    pub fn role_names(&self) -> Vec<&str> {
        self.profiles.iter().map(|p| p.role_name.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.profiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }
}

fn role_key(name: &str) -> String {
    name.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

fn builtin_profiles() -> Vec<RoleProfileBuilder> {
    use SkillCategory::*;

    vec![
        RoleProfileBuilder::new("Frontend Developer")
            .category(Frontend, 0.5)
            .category(ProgrammingLanguage, 0.25)
            .category(Tools, 0.15)
            .category(Design, 0.10)
            .essential(&["HTML", "CSS", "JavaScript", "React"])
            .strong(&["TypeScript", "Redux", "Git", "REST APIs", "Testing"])
            .bonus(&["Next.js", "Tailwind CSS", "Figma", "Node.js", "UI/UX Design"]),
        RoleProfileBuilder::new("Backend Developer")
            .category(Backend, 0.4)
            .category(Database, 0.25)
            .category(ProgrammingLanguage, 0.2)
            .category(CloudDevops, 0.15)
            .essential(&["SQL", "REST APIs", "PostgreSQL", "Git"])
            .strong(&["Node.js", "Python", "Java", "Docker", "Redis"])
            .bonus(&["Kubernetes", "AWS", "GraphQL", "Microservices", "MongoDB"]),
        RoleProfileBuilder::new("Full Stack Developer")
            .category(Frontend, 0.3)
            .category(Backend, 0.3)
            .category(Database, 0.2)
            .category(CloudDevops, 0.1)
            .category(Tools, 0.1)
            .essential(&["JavaScript", "React", "Node.js", "SQL"])
            .strong(&["TypeScript", "REST APIs", "MongoDB", "Git", "HTML", "CSS"])
            .bonus(&["Docker", "AWS", "Next.js", "GraphQL", "Testing"]),
        RoleProfileBuilder::new("Data Scientist")
            .category(DataScience, 0.5)
            .category(ProgrammingLanguage, 0.3)
            .category(Database, 0.2)
            .essential(&["Python", "Statistics", "Machine Learning", "Pandas"])
            .strong(&["SQL", "NumPy", "Scikit-learn", "Data Visualization", "Deep Learning"])
            .bonus(&["TensorFlow", "PyTorch", "NLP", "R", "Tableau"]),
        RoleProfileBuilder::new("Data Analyst")
            .category(DataScience, 0.5)
            .category(Database, 0.3)
            .category(SoftSkill, 0.2)
            .essential(&["SQL", "Statistics", "Data Visualization"])
            .strong(&["Python", "Pandas", "Tableau", "Power BI"])
            .bonus(&["R", "Machine Learning", "Communication"]),
        RoleProfileBuilder::new("DevOps Engineer")
            .category(CloudDevops, 0.6)
            .category(ProgrammingLanguage, 0.2)
            .category(Tools, 0.2)
            .essential(&["Linux", "Docker", "Kubernetes", "CI/CD"])
            .strong(&["AWS", "Terraform", "Git", "Jenkins", "Python"])
            .bonus(&["Azure", "GCP", "Go", "Agile"]),
        RoleProfileBuilder::new("Mobile Developer")
            .category(Mobile, 0.6)
            .category(ProgrammingLanguage, 0.25)
            .category(Design, 0.15)
            .essential(&["Android", "Kotlin", "Git"])
            .strong(&["Flutter", "React Native", "Dart", "Swift", "iOS"])
            .bonus(&["Figma", "REST APIs", "UI/UX Design"]),
        RoleProfileBuilder::new("ML Engineer")
            .category(DataScience, 0.5)
            .category(ProgrammingLanguage, 0.25)
            .category(CloudDevops, 0.25)
            .essential(&["Python", "Machine Learning", "Deep Learning"])
            .strong(&["PyTorch", "TensorFlow", "NumPy", "Docker", "SQL"])
            .bonus(&["Kubernetes", "AWS", "NLP", "FastAPI"]),
    ]
}
