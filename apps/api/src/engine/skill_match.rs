//! Tiered skill-match scorer.
//!
//! `overall = essential*0.5 + strong*0.3 + bonus*0.2` where each coverage is
//! the level-weighted share of that tier the candidate holds. Missing every
//! essential skill therefore caps the score at 0.5. Category weights from the
//! role profile only annotate `category_breakdown`; they never move the score.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::engine::clamp;
use crate::engine::registry::{RoleProfile, Tier};
use crate::engine::settings::ScoringSettings;
use crate::engine::taxonomy::SkillCategory;
use crate::engine::ReadinessEngine;
use crate::models::candidate::SkillEntry;

pub const NO_SKILLS_NOTICE: &str = "no skills declared";
pub const UNKNOWN_ROLE_NOTICE: &str = "role not in taxonomy — approximate analysis";

// ────────────────────────────────────────────────────────────────────────────
// Output data models
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TierBreakdown {
    pub tier: Tier,
    pub weight: f64,
    pub coverage: f64,
    pub contribution: f64,
    pub matched: Vec<String>,
    pub missing: Vec<String>,
}

/// Role category annotation. Purely explanatory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryBreakdown {
    pub category: SkillCategory,
    pub label: String,
    pub weight: f64,
    pub matched: Vec<String>,
    pub required: Vec<String>,
    pub coverage: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillGroup {
    pub category: Option<SkillCategory>,
    pub label: String,
    pub skills: Vec<String>,
}

/// Always consistent: `match_percentage == round(overall_score * 100)`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreResult {
    pub role_name: String,
    pub role_found: bool,
    pub overall_score: f64,
    pub match_percentage: u32,
    pub component_breakdown: Vec<TierBreakdown>,
    pub category_breakdown: Vec<CategoryBreakdown>,
    pub essential_gaps: Vec<String>,
    pub strengths: Vec<String>,
    pub strength_groups: Vec<SkillGroup>,
    pub recommendations: Vec<String>,
    pub explanation: String,
}

/// Canonical skill held by the candidate with its best level weight.
struct HeldSkill {
    canonical_name: String,
    category: Option<SkillCategory>,
    weight: f64,
}

// ────────────────────────────────────────────────────────────────────────────
// Scorer
// ────────────────────────────────────────────────────────────────────────────

impl ReadinessEngine {
    /// Scores `skills` against `role_name`. Total: unknown roles and empty
    /// skill lists degrade to an explained low score instead of failing.
    pub fn score_skills(&self, role_name: &str, skills: &[SkillEntry]) -> ScoreResult {
        let held = self.resolve_skills(skills);

        match self.registry().get(role_name) {
            Some(profile) => self.score_against_profile(profile, &held),
            None => {
                debug!("Role '{role_name}' not registered, using approximate analysis");
                self.score_unknown_role(role_name, &held)
            }
        }
    }

    /// Normalizes and de-duplicates, keeping the highest level per skill.
    /// Order of first appearance is preserved.
    fn resolve_skills(&self, skills: &[SkillEntry]) -> Vec<HeldSkill> {
        let levels = &self.settings().level_weights;
        let mut held: Vec<HeldSkill> = Vec::with_capacity(skills.len());
        let mut index: HashMap<String, usize> = HashMap::with_capacity(skills.len());

        for entry in skills {
            if entry.name.trim().is_empty() {
                continue;
            }
            let normalized = self.normalize(&entry.name);
            let weight = levels.weight(entry.level);
            match index.get(&normalized.canonical_name) {
                Some(&i) => held[i].weight = held[i].weight.max(weight),
                None => {
                    index.insert(normalized.canonical_name.clone(), held.len());
                    held.push(HeldSkill {
                        canonical_name: normalized.canonical_name,
                        category: normalized.category,
                        weight,
                    });
                }
            }
        }
        held
    }

    fn score_against_profile(&self, profile: &RoleProfile, held: &[HeldSkill]) -> ScoreResult {
        let settings = self.settings();
        let weight_of = |name: &str| {
            held.iter()
                .find(|h| h.canonical_name == name)
                .map(|h| h.weight)
        };

        let mut component_breakdown = Vec::with_capacity(3);
        for tier in Tier::ALL {
            let required = profile.tier(tier);
            let mut weighted = 0.0;
            let mut matched = Vec::new();
            let mut missing = Vec::new();
            for skill in required {
                match weight_of(skill.as_str()) {
                    Some(w) => {
                        weighted += w;
                        matched.push(skill.clone());
                    }
                    None => missing.push(skill.clone()),
                }
            }
            let coverage = clamp::coverage(weighted, required.len());
            let weight = tier_weight(settings, tier);
            component_breakdown.push(TierBreakdown {
                tier,
                weight,
                coverage,
                contribution: coverage * weight,
                matched,
                missing,
            });
        }

        let overall_score = if held.is_empty() {
            0.0
        } else {
            clamp::unit(component_breakdown.iter().map(|t| t.contribution).sum())
        };
        let match_percentage = clamp::percent(overall_score);

        let essential_gaps = component_breakdown[0].missing.clone();

        let mut matched_role_skills: Vec<&HeldSkill> = held
            .iter()
            .filter(|h| profile.tier_of(&h.canonical_name).is_some())
            .collect();
        // Stable: first-appearance order within each category
        matched_role_skills.sort_by_key(|h| category_rank(h.category));
        let strengths: Vec<String> = matched_role_skills
            .iter()
            .map(|h| h.canonical_name.clone())
            .collect();
        let strength_groups = group_by_category(&matched_role_skills);

        let category_breakdown = profile
            .categories
            .iter()
            .map(|cw| {
                let required: Vec<String> = Tier::ALL
                    .into_iter()
                    .flat_map(|t| profile.tier(t).iter())
                    .filter(|s| self.taxonomy().category_of(s) == Some(cw.category))
                    .cloned()
                    .collect();
                let matched: Vec<String> = required
                    .iter()
                    .filter(|s| weight_of(s.as_str()).is_some())
                    .cloned()
                    .collect();
                CategoryBreakdown {
                    category: cw.category,
                    label: cw.category.label().to_string(),
                    weight: cw.weight,
                    coverage: clamp::coverage(matched.len() as f64, required.len()),
                    matched,
                    required,
                }
            })
            .collect();

        let recommendations = if held.is_empty() {
            let mut recs = vec![format!(
                "Add your skills to get a gap analysis for {}.",
                profile.role_name
            )];
            recs.extend(
                profile
                    .essential_skills
                    .iter()
                    .take(settings.max_recommendations.saturating_sub(1))
                    .map(|s| essential_recommendation(s, &profile.role_name)),
            );
            recs.truncate(settings.max_recommendations);
            recs
        } else {
            build_recommendations(
                profile,
                &component_breakdown,
                held,
                settings.max_recommendations,
            )
        };

        let explanation = if held.is_empty() {
            NO_SKILLS_NOTICE.to_string()
        } else {
            let counts: Vec<String> = component_breakdown
                .iter()
                .map(|t| {
                    format!(
                        "{}/{} {}",
                        t.matched.len(),
                        t.matched.len() + t.missing.len(),
                        t.tier.label()
                    )
                })
                .collect();
            format!(
                "Matched {} skills for {} ({match_percentage}% match).",
                counts.join(", "),
                profile.role_name
            )
        };

        ScoreResult {
            role_name: profile.role_name.clone(),
            role_found: true,
            overall_score,
            match_percentage,
            component_breakdown,
            category_breakdown,
            essential_gaps,
            strengths,
            strength_groups,
            recommendations,
            explanation,
        }
    }

    /// Unknown role: no essential or strong tiers, the candidate's own skills
    /// form one unweighted bonus tier.
    fn score_unknown_role(&self, role_name: &str, held: &[HeldSkill]) -> ScoreResult {
        let settings = self.settings();
        let bonus_names: Vec<String> = held.iter().map(|h| h.canonical_name.clone()).collect();
        let coverage = clamp::coverage(bonus_names.len() as f64, bonus_names.len());
        let bonus_weight = settings.tier_weights.bonus;

        let component_breakdown = vec![
            empty_tier(Tier::Essential, settings.tier_weights.essential),
            empty_tier(Tier::Strong, settings.tier_weights.strong),
            TierBreakdown {
                tier: Tier::Bonus,
                weight: bonus_weight,
                coverage,
                contribution: coverage * bonus_weight,
                matched: bonus_names.clone(),
                missing: Vec::new(),
            },
        ];

        let overall_score = clamp::unit(coverage * bonus_weight);
        let match_percentage = clamp::percent(overall_score);

        let mut sorted: Vec<&HeldSkill> = held.iter().collect();
        sorted.sort_by_key(|h| category_rank(h.category));

        let explanation = if held.is_empty() {
            format!("{NO_SKILLS_NOTICE}; {UNKNOWN_ROLE_NOTICE}")
        } else {
            format!(
                "{UNKNOWN_ROLE_NOTICE}: {} declared skills counted as bonus coverage for '{}'.",
                held.len(),
                role_name.trim()
            )
        };

        ScoreResult {
            role_name: role_name.trim().to_string(),
            role_found: false,
            overall_score,
            match_percentage,
            component_breakdown,
            category_breakdown: Vec::new(),
            essential_gaps: Vec::new(),
            strengths: sorted.iter().map(|h| h.canonical_name.clone()).collect(),
            strength_groups: group_by_category(&sorted),
            recommendations: vec![format!(
                "'{}' is not a registered role; choose one of {} for a full gap analysis.",
                role_name.trim(),
                self.registry().role_names().join(", ")
            )],
            explanation,
        }
    }
}

fn tier_weight(settings: &ScoringSettings, tier: Tier) -> f64 {
    match tier {
        Tier::Essential => settings.tier_weights.essential,
        Tier::Strong => settings.tier_weights.strong,
        Tier::Bonus => settings.tier_weights.bonus,
    }
}

fn empty_tier(tier: Tier, weight: f64) -> TierBreakdown {
    TierBreakdown {
        tier,
        weight,
        coverage: 0.0,
        contribution: 0.0,
        matched: Vec::new(),
        missing: Vec::new(),
    }
}

/// Taxonomy order, unknown skills last.
fn category_rank(category: Option<SkillCategory>) -> usize {
    category
        .and_then(|c| SkillCategory::ALL.iter().position(|x| *x == c))
        .unwrap_or(SkillCategory::ALL.len())
}

/// Expects input already sorted by `category_rank`.
fn group_by_category(skills: &[&HeldSkill]) -> Vec<SkillGroup> {
    let mut groups: Vec<SkillGroup> = Vec::new();
    for skill in skills {
        match groups.last_mut() {
            Some(group) if group.category == skill.category => {
                group.skills.push(skill.canonical_name.clone())
            }
            _ => groups.push(SkillGroup {
                category: skill.category,
                label: skill.category.map_or("Other", |c| c.label()).to_string(),
                skills: vec![skill.canonical_name.clone()],
            }),
        }
    }
    groups
}

fn essential_recommendation(skill: &str, role: &str) -> String {
    format!("Learn {skill}: it is an essential skill for {role}.")
}

fn gap_recommendation(tier: Tier, skill: &str, role: &str) -> String {
    match tier {
        Tier::Essential => essential_recommendation(skill, role),
        Tier::Strong => format!("Add {skill} to strengthen your {role} profile."),
        Tier::Bonus => format!("Consider {skill} as a bonus skill for {role}."),
    }
}

/// The highest-priority gap of each tier first, then the remaining gaps in
/// tier order, then level upgrades for weakly held essential/strong skills.
/// Capped at `limit`.
fn build_recommendations(
    profile: &RoleProfile,
    tiers: &[TierBreakdown],
    held: &[HeldSkill],
    limit: usize,
) -> Vec<String> {
    let role = &profile.role_name;
    let mut recs = Vec::new();

    for breakdown in tiers {
        if let Some(skill) = breakdown.missing.first() {
            recs.push(gap_recommendation(breakdown.tier, skill, role));
        }
    }
    for breakdown in tiers {
        for skill in breakdown.missing.iter().skip(1) {
            recs.push(gap_recommendation(breakdown.tier, skill, role));
        }
    }

    for tier in [Tier::Essential, Tier::Strong] {
        for skill in profile.tier(tier) {
            if let Some(h) = held.iter().find(|h| &h.canonical_name == skill && h.weight < 1.0) {
                recs.push(format!(
                    "Deepen your {} proficiency; it currently counts for {:.0}% of its {} weight.",
                    h.canonical_name,
                    h.weight * 100.0,
                    tier.label()
                ));
            }
        }
    }

    if recs.is_empty() {
        recs.push(format!(
            "Your skills cover every listed requirement for {role}; showcase them through projects."
        ));
    }
    recs.truncate(limit);
    recs
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::registry::{RoleProfileBuilder, RoleRegistry};
    use crate::engine::taxonomy::SkillTaxonomy;
    use crate::models::candidate::SkillLevel;

    fn engine() -> ReadinessEngine {
        ReadinessEngine::builtin().unwrap()
    }

    /// Engine with a role whose only requirements are three essential skills.
    fn essentials_only_engine() -> ReadinessEngine {
        let taxonomy = SkillTaxonomy::builtin().unwrap();
        let profile = RoleProfileBuilder::new("UI Engineer")
            .category(SkillCategory::Frontend, 0.6)
            .category(SkillCategory::ProgrammingLanguage, 0.4)
            .essential(&["React", "TypeScript", "JavaScript"])
            .build(&taxonomy)
            .unwrap();
        let registry = RoleRegistry::from_profiles(vec![profile]).unwrap();
        ReadinessEngine::new(taxonomy, registry, ScoringSettings::default()).unwrap()
    }

    fn skills(names: &[&str]) -> Vec<SkillEntry> {
        names.iter().map(|n| SkillEntry::untracked(*n)).collect()
    }

    #[test]
    fn test_level_weighted_essential_coverage() {
        let result = essentials_only_engine().score_skills(
            "UI Engineer",
            &[
                SkillEntry::new("React", SkillLevel::Advanced),
                SkillEntry::new("TypeScript", SkillLevel::Intermediate),
                SkillEntry::new("JavaScript", SkillLevel::Beginner),
            ],
        );
        assert!((result.component_breakdown[0].coverage - 0.75).abs() < 1e-12);
        assert!((result.overall_score - 0.375).abs() < 1e-12);
        assert_eq!(result.match_percentage, 38);
        assert!(result.essential_gaps.is_empty());
    }

    #[test]
    fn test_full_match_scores_one() {
        let e = engine();
        let profile = e.registry().get("DevOps Engineer").unwrap().clone();
        let all: Vec<SkillEntry> = Tier::ALL
            .into_iter()
            .flat_map(|t| profile.tier(t).to_vec())
            .map(SkillEntry::untracked)
            .collect();
        let result = e.score_skills("DevOps Engineer", &all);
        assert!((result.overall_score - 1.0).abs() < 1e-12);
        assert_eq!(result.match_percentage, 100);
        assert!(result.essential_gaps.is_empty());
    }

    #[test]
    fn test_missing_all_essentials_caps_at_half() {
        let e = engine();
        let profile = e.registry().get("Backend Developer").unwrap().clone();
        let non_essential: Vec<SkillEntry> = profile
            .strong_skills
            .iter()
            .chain(profile.bonus_skills.iter())
            .map(|s| SkillEntry::new(s.clone(), SkillLevel::Advanced))
            .collect();
        let result = e.score_skills("Backend Developer", &non_essential);
        assert_eq!(result.component_breakdown[0].coverage, 0.0);
        assert!(result.overall_score <= 0.5);
        assert_eq!(result.essential_gaps, profile.essential_skills);
    }

    #[test]
    fn test_aliases_match_requirements() {
        let result = engine().score_skills("Frontend Developer", &skills(&["html5", "css3", "js", "reactjs"]));
        assert!(result.essential_gaps.is_empty());
        assert_eq!(result.component_breakdown[0].coverage, 1.0);
    }

    #[test]
    fn test_unknown_skills_never_match() {
        let result = engine().score_skills("Frontend Developer", &skills(&["Underwater Basket Weaving"]));
        assert_eq!(result.overall_score, 0.0);
        assert_eq!(result.essential_gaps.len(), 4);
        assert!(result.strengths.is_empty());
    }

    #[test]
    fn test_empty_skills_explained() {
        let result = engine().score_skills("Frontend Developer", &[]);
        assert_eq!(result.overall_score, 0.0);
        assert_eq!(result.match_percentage, 0);
        assert_eq!(result.explanation, NO_SKILLS_NOTICE);
        assert!(!result.recommendations.is_empty());
    }

    #[test]
    fn test_blank_skill_names_ignored() {
        let result = engine().score_skills("Frontend Developer", &skills(&["", "   "]));
        assert_eq!(result.explanation, NO_SKILLS_NOTICE);
    }

    #[test]
    fn test_unknown_role_uses_bonus_tier_only() {
        let result = engine().score_skills("Quantum Gardener", &skills(&["Python", "Rust", "Gardening"]));
        assert!(!result.role_found);
        assert!(result.essential_gaps.is_empty());
        assert!(result.explanation.contains(UNKNOWN_ROLE_NOTICE));
        assert_eq!(result.component_breakdown[0].contribution, 0.0);
        assert_eq!(result.component_breakdown[1].contribution, 0.0);
        assert!((result.overall_score - 0.2).abs() < 1e-12);
        assert_eq!(result.match_percentage, 20);
        assert_eq!(result.strengths.len(), 3);
    }

    #[test]
    fn test_unknown_role_ignores_levels() {
        let result = engine().score_skills(
            "Quantum Gardener",
            &[SkillEntry::new("Python", SkillLevel::Beginner)],
        );
        assert!((result.overall_score - 0.2).abs() < 1e-12);
    }

    #[test]
    fn test_unknown_role_with_no_skills() {
        let result = engine().score_skills("Quantum Gardener", &[]);
        assert_eq!(result.overall_score, 0.0);
        assert!(result.explanation.contains(NO_SKILLS_NOTICE));
        assert!(result.explanation.contains(UNKNOWN_ROLE_NOTICE));
    }

    #[test]
    fn test_duplicate_skills_keep_best_level() {
        let result = essentials_only_engine().score_skills(
            "UI Engineer",
            &[
                SkillEntry::new("React", SkillLevel::Beginner),
                SkillEntry::new("reactjs", SkillLevel::Advanced),
            ],
        );
        assert!((result.component_breakdown[0].coverage - 1.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_recommendations_follow_tier_priority_and_cap() {
        let result = engine().score_skills("Full Stack Developer", &skills(&["Git"]));
        let recs = &result.recommendations;
        assert_eq!(recs.len(), 5);
        assert!(recs[0].contains("JavaScript") && recs[0].contains("essential"));
        assert!(recs[1].contains("TypeScript"));
        assert!(recs[2].contains("Docker") && recs[2].contains("bonus"));
        assert!(recs[3].contains("React"));
        assert!(recs[4].contains("Node.js"));
    }

    #[test]
    fn test_every_tier_recommended_when_essentials_missing() {
        let result = engine().score_skills("Frontend Developer", &skills(&["Figma"]));
        let recs = &result.recommendations;
        assert_eq!(recs.len(), 5);
        assert!(recs[0].contains("HTML") && recs[0].contains("essential"));
        assert!(recs[1].contains("TypeScript"));
        assert!(recs[2].contains("Next.js") && recs[2].contains("bonus"));
        assert_eq!(recs.iter().filter(|r| r.contains("essential")).count(), 3);
    }

    #[test]
    fn test_strengths_grouped_by_category() {
        let result = engine().score_skills(
            "Full Stack Developer",
            &skills(&["Docker", "React", "JavaScript", "MongoDB"]),
        );
        assert_eq!(result.strengths, vec!["JavaScript", "React", "MongoDB", "Docker"]);
        let labels: Vec<&str> = result.strength_groups.iter().map(|g| g.label.as_str()).collect();
        assert_eq!(
            labels,
            vec!["Programming Languages", "Frontend Development", "Databases", "Cloud & DevOps"]
        );
    }

    #[test]
    fn test_category_breakdown_is_explanatory() {
        let result = engine().score_skills("Data Scientist", &skills(&["Python", "Pandas"]));
        let ds = result
            .category_breakdown
            .iter()
            .find(|c| c.category == SkillCategory::DataScience)
            .unwrap();
        assert!(ds.matched.contains(&"Pandas".to_string()));
        assert_eq!(ds.label, "Data Science & ML");
        // 2/4 essential only
        assert!((result.overall_score - 0.25).abs() < 1e-12);
    }

    #[test]
    fn test_level_upgrade_recommended_when_no_gaps() {
        let e = essentials_only_engine();
        let result = e.score_skills(
            "UI Engineer",
            &[
                SkillEntry::new("React", SkillLevel::Advanced),
                SkillEntry::new("TypeScript", SkillLevel::Advanced),
                SkillEntry::new("JavaScript", SkillLevel::Beginner),
            ],
        );
        assert_eq!(result.recommendations.len(), 1);
        assert!(result.recommendations[0].contains("JavaScript"));
    }

    #[test]
    fn test_scoring_is_deterministic() {
        let e = engine();
        let input = skills(&["python", "sql", "pandas", "tableau", "excel"]);
        let a = e.score_skills("Data Analyst", &input);
        let b = e.score_skills("Data Analyst", &input);
        assert_eq!(a, b);
        assert_eq!(a.overall_score.to_bits(), b.overall_score.to_bits());
    }

    #[test]
    fn test_percentage_consistent_with_overall() {
        let e = engine();
        for role in e.registry().role_names() {
            let result = e.score_skills(role, &skills(&["Python", "Git", "Docker", "React"]));
            assert!((0.0..=1.0).contains(&result.overall_score));
            assert_eq!(result.match_percentage, clamp::percent(result.overall_score));
        }
    }
}
