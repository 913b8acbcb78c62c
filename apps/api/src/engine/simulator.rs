//! What-if delta simulator.
//!
//! A `HypotheticalChange` is applied to a clone of the snapshot and readiness
//! is recomputed on both. The caller's snapshot is never touched.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::engine::duration::{format_months, parse_months};
use crate::engine::readiness::ReadinessResult;
use crate::engine::ReadinessEngine;
use crate::models::candidate::{
    CandidateSnapshot, ExperienceEntry, ExperienceKind, Project, SkillEntry, SkillLevel,
};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum HypotheticalChange {
    Noop,
    AddSkill {
        name: String,
        level: Option<SkillLevel>,
    },
    RemoveSkill {
        name: String,
    },
    /// Adds `months` to the experience at `index`.
    ExtendExperience {
        index: usize,
        months: u32,
    },
    AddExperience {
        kind: ExperienceKind,
        duration_text: String,
    },
    AddProject {
        project: Project,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationResult {
    pub baseline: ReadinessResult,
    pub projected: ReadinessResult,
    pub delta: i32,
    pub note: String,
}

/// Outcome of applying a change: the modified copy and a description.
struct Applied {
    snapshot: CandidateSnapshot,
    description: String,
    applied: bool,
}

impl ReadinessEngine {
    pub fn simulate(
        &self,
        candidate: &CandidateSnapshot,
        change: &HypotheticalChange,
        role_name: &str,
    ) -> SimulationResult {
        // No change touches the resume, so both sides share one extraction.
        let resume = self.resume_component(candidate);
        let (baseline, _) = self.readiness_with_resume(role_name, candidate, resume);
        let Applied {
            snapshot,
            description,
            applied,
        } = self.apply_change(candidate, change);
        let (projected, _) = self.readiness_with_resume(role_name, &snapshot, resume);

        let delta = projected.score as i32 - baseline.score as i32;
        debug!(
            "Simulated '{description}' for role '{role_name}': {} -> {} ({delta:+})",
            baseline.score, projected.score
        );

        let note = if !applied {
            format!("{description}; readiness unchanged at {}.", baseline.score)
        } else if delta == 0 {
            format!(
                "{description} leaves readiness for {} at {}.",
                baseline.role_name, baseline.score
            )
        } else {
            let direction = if delta > 0 { "raises" } else { "lowers" };
            format!(
                "{description} {direction} readiness for {} from {} to {} ({delta:+} points).",
                baseline.role_name, baseline.score, projected.score
            )
        };

        SimulationResult {
            baseline,
            projected,
            delta,
            note,
        }
    }

    fn apply_change(&self, candidate: &CandidateSnapshot, change: &HypotheticalChange) -> Applied {
        let mut snapshot = candidate.clone();
        let (description, applied) = match change {
            HypotheticalChange::Noop => ("No change".to_string(), true),
            HypotheticalChange::AddSkill { name, level } => {
                let canonical = self.normalize(name).canonical_name;
                snapshot.skills.push(SkillEntry {
                    name: canonical.clone(),
                    level: *level,
                });
                let description = match level {
                    Some(level) => format!("Adding {canonical} ({})", level.label()),
                    None => format!("Adding {canonical}"),
                };
                (description, true)
            }
            HypotheticalChange::RemoveSkill { name } => {
                let canonical = self.normalize(name).canonical_name;
                let before = snapshot.skills.len();
                snapshot
                    .skills
                    .retain(|s| self.normalize(&s.name).canonical_name != canonical);
                if snapshot.skills.len() == before {
                    (format!("{canonical} is not in the skill list"), false)
                } else {
                    (format!("Removing {canonical}"), true)
                }
            }
            HypotheticalChange::ExtendExperience { index, months } => {
                match snapshot.experiences.get_mut(*index) {
                    Some(entry) => {
                        let total = parse_months(&entry.duration_text).saturating_add(*months);
                        entry.duration_text = format_months(total);
                        (
                            format!("Extending experience #{index} by {}", format_months(*months)),
                            true,
                        )
                    }
                    None => (
                        format!(
                            "Experience #{index} does not exist ({} listed)",
                            snapshot.experiences.len()
                        ),
                        false,
                    ),
                }
            }
            HypotheticalChange::AddExperience {
                kind,
                duration_text,
            } => {
                snapshot
                    .experiences
                    .push(ExperienceEntry::new(*kind, duration_text.clone()));
                (format!("Adding {kind:?} experience of {duration_text}"), true)
            }
            HypotheticalChange::AddProject { project } => {
                snapshot.projects.push(project.clone());
                (format!("Adding project '{}'", project.name), true)
            }
        };
        Applied {
            snapshot,
            description,
            applied,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::readiness::ReadinessStatus;
    use crate::models::candidate::{ProjectComplexity, UserCategory};
    use serde_json::json;

    fn engine() -> ReadinessEngine {
        ReadinessEngine::builtin().unwrap()
    }

    fn candidate() -> CandidateSnapshot {
        let mut c = CandidateSnapshot::new(UserCategory::Student);
        c.skills = vec![
            SkillEntry::new("JavaScript", SkillLevel::Intermediate),
            SkillEntry::new("react", SkillLevel::Beginner),
        ];
        c.experiences = vec![ExperienceEntry::new(ExperienceKind::Internship, "6 months")];
        c
    }

    #[test]
    fn test_noop_delta_is_zero() {
        let e = engine();
        for role in ["Full Stack Developer", "Data Analyst", "Unknown Role"] {
            let result = e.simulate(&candidate(), &HypotheticalChange::Noop, role);
            assert_eq!(result.delta, 0, "role = {role}");
            assert_eq!(result.baseline, result.projected);
        }
    }

    #[test]
    fn test_original_snapshot_not_mutated() {
        let e = engine();
        let original = candidate();
        let copy = original.clone();
        let change = HypotheticalChange::AddSkill {
            name: "node".to_string(),
            level: Some(SkillLevel::Advanced),
        };
        e.simulate(&original, &change, "Full Stack Developer");
        assert_eq!(original, copy);
    }

    #[test]
    fn test_adding_essential_skill_raises_score() {
        let e = engine();
        let change = HypotheticalChange::AddSkill {
            name: "nodejs".to_string(),
            level: None,
        };
        let result = e.simulate(&candidate(), &change, "Full Stack Developer");
        assert!(result.delta > 0);
        assert!(result.note.contains("Adding Node.js"));
        assert!(result.note.contains("raises"));
        assert!(!result.projected.gaps.contains(&"Node.js".to_string()));
    }

    #[test]
    fn test_removing_skill_lowers_score() {
        let e = engine();
        let change = HypotheticalChange::RemoveSkill {
            name: "js".to_string(),
        };
        let result = e.simulate(&candidate(), &change, "Full Stack Developer");
        assert!(result.delta < 0);
        assert!(result.note.contains("lowers"));
    }

    #[test]
    fn test_removing_absent_skill_is_reported() {
        let e = engine();
        let change = HypotheticalChange::RemoveSkill {
            name: "Rust".to_string(),
        };
        let result = e.simulate(&candidate(), &change, "Full Stack Developer");
        assert_eq!(result.delta, 0);
        assert!(result.note.contains("not in the skill list"));
    }

    #[test]
    fn test_extend_experience_rewrites_duration() {
        let e = engine();
        let applied = e.apply_change(
            &candidate(),
            &HypotheticalChange::ExtendExperience {
                index: 0,
                months: 24,
            },
        );
        assert_eq!(applied.snapshot.experiences[0].duration_text, "2 years 6 months");
    }

    #[test]
    fn test_extend_missing_experience_is_noop_with_note() {
        let e = engine();
        let result = e.simulate(
            &candidate(),
            &HypotheticalChange::ExtendExperience {
                index: 3,
                months: 12,
            },
            "Frontend Developer",
        );
        assert_eq!(result.delta, 0);
        assert!(result.note.contains("does not exist"));
    }

    #[test]
    fn test_professional_job_moves_the_needle() {
        let e = engine();
        let mut c = candidate();
        c.user_category = UserCategory::Professional;
        let change = HypotheticalChange::AddExperience {
            kind: ExperienceKind::Job,
            duration_text: "3 years".to_string(),
        };
        let result = e.simulate(&c, &change, "Frontend Developer");
        assert!(result.delta > 0);
        assert_eq!(result.projected.component_scores.experience, 1.0);
    }

    #[test]
    fn test_add_project() {
        let e = engine();
        let change = HypotheticalChange::AddProject {
            project: Project {
                name: "Shop".to_string(),
                tags: vec!["production".to_string()],
                complexity: Some(ProjectComplexity::Advanced),
            },
        };
        let result = e.simulate(&candidate(), &change, "Frontend Developer");
        assert!(result.projected.component_scores.project > result.baseline.component_scores.project);
        assert_ne!(result.projected.status, ReadinessStatus::Strong);
    }

    #[test]
    fn test_simulation_is_idempotent() {
        let e = engine();
        let change = HypotheticalChange::AddSkill {
            name: "SQL".to_string(),
            level: Some(SkillLevel::Intermediate),
        };
        let a = e.simulate(&candidate(), &change, "Full Stack Developer");
        let b = e.simulate(&candidate(), &change, "Full Stack Developer");
        assert_eq!(a, b);
    }

    #[test]
    fn test_change_deserializes_from_tagged_json() {
        let change: HypotheticalChange = serde_json::from_value(json!({
            "type": "add_skill",
            "name": "k8s",
            "level": "advanced"
        }))
        .unwrap();
        assert_eq!(
            change,
            HypotheticalChange::AddSkill {
                name: "k8s".to_string(),
                level: Some(SkillLevel::Advanced),
            }
        );
        let noop: HypotheticalChange = serde_json::from_value(json!({ "type": "noop" })).unwrap();
        assert_eq!(noop, HypotheticalChange::Noop);
    }
}
