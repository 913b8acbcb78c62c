//! Candidate profile report: completeness, quality band, experience level
//! and improvement suggestions derived from a snapshot.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::engine::clamp;
use crate::engine::duration::parse_months;
use crate::engine::skill_match::SkillGroup;
use crate::engine::taxonomy::SkillCategory;
use crate::engine::ReadinessEngine;
use crate::models::candidate::{CandidateSnapshot, EducationEntry};

const FULL_SKILLS: f64 = 10.0;
const FULL_EXPERIENCE_MONTHS: f64 = 120.0;
const FULL_PROJECTS: f64 = 5.0;
const MIN_SKILLS: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProfileQuality {
    Excellent,
    #[serde(rename = "Very Good")]
    VeryGood,
    Good,
    Fair,
    #[serde(rename = "Needs Improvement")]
    NeedsImprovement,
}

impl ProfileQuality {
    pub fn from_completeness(completeness: f64) -> Self {
        match completeness {
            c if c >= 0.95 => ProfileQuality::Excellent,
            c if c >= 0.85 => ProfileQuality::VeryGood,
            c if c >= 0.75 => ProfileQuality::Good,
            c if c >= 0.60 => ProfileQuality::Fair,
            _ => ProfileQuality::NeedsImprovement,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExperienceLevel {
    #[serde(rename = "Entry Level")]
    EntryLevel,
    Junior,
    #[serde(rename = "Mid-Level")]
    MidLevel,
    Senior,
    #[serde(rename = "Principal/Lead")]
    PrincipalLead,
}

impl ExperienceLevel {
    pub fn from_months(months: u32) -> Self {
        match months {
            m if m < 12 => ExperienceLevel::EntryLevel,
            m if m < 36 => ExperienceLevel::Junior,
            m if m < 60 => ExperienceLevel::MidLevel,
            m if m < 120 => ExperienceLevel::Senior,
            _ => ExperienceLevel::PrincipalLead,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SuggestionKind {
    Skills,
    Education,
    Experience,
    Projects,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Suggestion {
    pub kind: SuggestionKind,
    pub message: String,
    pub action: String,
}

impl Suggestion {
    fn new(kind: SuggestionKind, message: &str, action: &str) -> Self {
        Self {
            kind,
            message: message.to_string(),
            action: action.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfileReport {
    pub candidate_id: Option<Uuid>,
    pub completeness: f64,
    pub quality: ProfileQuality,
    pub total_skills: usize,
    pub skill_groups: Vec<SkillGroup>,
    pub education: Vec<EducationEntry>,
    pub experience_months: u32,
    pub experience_years: f64,
    pub experience_level: ExperienceLevel,
    pub projects: usize,
    pub project_summary: String,
    pub suggestions: Vec<Suggestion>,
    pub next_steps: Vec<String>,
    pub generated_at: DateTime<Utc>,
}

pub fn project_summary(count: usize) -> &'static str {
    match count {
        0 => "No projects listed",
        1 => "One project listed",
        n if n < 5 => "Few projects highlighted",
        _ => "Multiple projects showcased",
    }
}

/// Completeness in `[0, 1]`, rounded to two decimals.
pub fn completeness(skills: usize, has_education: bool, months: u32, projects: usize) -> f64 {
    let skills = (skills as f64 / FULL_SKILLS).min(1.0);
    let education = if has_education { 1.0 } else { 0.0 };
    let experience = (months as f64 / FULL_EXPERIENCE_MONTHS).min(1.0);
    let projects = (projects as f64 / FULL_PROJECTS).min(1.0);
    clamp::round2(clamp::unit(
        0.25 * skills + 0.25 * education + 0.25 * experience + 0.25 * projects,
    ))
}

fn suggestions(skills: usize, has_education: bool, months: u32, projects: usize) -> Vec<Suggestion> {
    let mut out = Vec::new();
    if skills < MIN_SKILLS {
        out.push(Suggestion::new(
            SuggestionKind::Skills,
            "Add more technical skills to improve visibility",
            "Add at least 10 relevant skills",
        ));
    }
    if !has_education {
        out.push(Suggestion::new(
            SuggestionKind::Education,
            "Add your education details",
            "Upload a resume with an education section",
        ));
    }
    if months == 0 {
        out.push(Suggestion::new(
            SuggestionKind::Experience,
            "Add your work experience",
            "Upload a resume with an experience section",
        ));
    }
    if projects == 0 {
        out.push(Suggestion::new(
            SuggestionKind::Projects,
            "Highlight your projects and achievements",
            "Add a projects section to your resume",
        ));
    }
    out
}

fn next_steps(completeness: f64) -> Vec<String> {
    [
        (0.6, "Complete the basic resume sections"),
        (0.8, "Add quantifiable metrics to achievements"),
        (0.9, "Include certifications and awards"),
    ]
    .into_iter()
    .filter(|(threshold, _)| completeness < *threshold)
    .map(|(_, step)| step.to_string())
    .collect()
}

impl ReadinessEngine {
    /// Skills grouped by category in taxonomy order, unknown skills last
    /// under "Other". Duplicates after normalization are dropped.
    pub fn group_skills(&self, candidate: &CandidateSnapshot) -> Vec<SkillGroup> {
        let mut known: Vec<(SkillCategory, String)> = Vec::new();
        let mut other: Vec<String> = Vec::new();
        for entry in &candidate.skills {
            if entry.name.trim().is_empty() {
                continue;
            }
            let normalized = self.normalize(&entry.name);
            let name = normalized.canonical_name;
            match normalized.category {
                Some(category) => {
                    if !known.iter().any(|(_, n)| *n == name) {
                        known.push((category, name));
                    }
                }
                None => {
                    if !other.contains(&name) {
                        other.push(name);
                    }
                }
            }
        }

        let mut groups: Vec<SkillGroup> = SkillCategory::ALL
            .iter()
            .filter_map(|category| {
                let skills: Vec<String> = known
                    .iter()
                    .filter(|(c, _)| c == category)
                    .map(|(_, n)| n.clone())
                    .collect();
                (!skills.is_empty()).then(|| SkillGroup {
                    category: Some(*category),
                    label: category.label().to_string(),
                    skills,
                })
            })
            .collect();
        if !other.is_empty() {
            groups.push(SkillGroup {
                category: None,
                label: "Other".to_string(),
                skills: other,
            });
        }
        groups
    }

    pub fn profile_report(&self, candidate: &CandidateSnapshot) -> ProfileReport {
        let skill_groups = self.group_skills(candidate);
        let total_skills: usize = skill_groups.iter().map(|g| g.skills.len()).sum();
        let has_education = !candidate.education.is_empty();
        let months = candidate
            .experiences
            .iter()
            .fold(0u32, |acc, e| acc.saturating_add(parse_months(&e.duration_text)));
        let projects = candidate.projects.len();

        let completeness = completeness(total_skills, has_education, months, projects);

        ProfileReport {
            candidate_id: candidate.candidate_id,
            completeness,
            quality: ProfileQuality::from_completeness(completeness),
            total_skills,
            skill_groups,
            education: candidate.education.clone(),
            experience_months: months,
            experience_years: (months as f64 / 12.0 * 10.0).round() / 10.0,
            experience_level: ExperienceLevel::from_months(months),
            projects,
            project_summary: project_summary(projects).to_string(),
            suggestions: suggestions(total_skills, has_education, months, projects),
            next_steps: next_steps(completeness),
            generated_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::candidate::{
        ExperienceEntry, ExperienceKind, Project, SkillEntry, UserCategory,
    };

    fn engine() -> ReadinessEngine {
        ReadinessEngine::builtin().unwrap()
    }

    fn full_candidate() -> CandidateSnapshot {
        let mut c = CandidateSnapshot::new(UserCategory::Professional);
        c.skills = [
            "Python", "JavaScript", "React", "Django", "PostgreSQL", "Docker", "AWS", "Git",
            "Kubernetes", "Redis", "TypeScript", "Node.js",
        ]
        .iter()
        .map(|s| SkillEntry::untracked(*s))
        .collect();
        c.education = vec![EducationEntry {
            degree: "Bachelor".to_string(),
            institution: "State University".to_string(),
            year: "2020".to_string(),
            ..EducationEntry::default()
        }];
        c.experiences = vec![ExperienceEntry::new(ExperienceKind::Job, "4 years")];
        c.projects = (0..5)
            .map(|i| Project {
                name: format!("project {i}"),
                tags: Vec::new(),
                complexity: None,
            })
            .collect();
        c
    }

    #[test]
    fn test_quality_bands() {
        assert_eq!(ProfileQuality::from_completeness(1.0), ProfileQuality::Excellent);
        assert_eq!(ProfileQuality::from_completeness(0.87), ProfileQuality::VeryGood);
        assert_eq!(ProfileQuality::from_completeness(0.75), ProfileQuality::Good);
        assert_eq!(ProfileQuality::from_completeness(0.6), ProfileQuality::Fair);
        assert_eq!(
            ProfileQuality::from_completeness(0.59),
            ProfileQuality::NeedsImprovement
        );
    }

    #[test]
    fn test_experience_levels() {
        assert_eq!(ExperienceLevel::from_months(0), ExperienceLevel::EntryLevel);
        assert_eq!(ExperienceLevel::from_months(12), ExperienceLevel::Junior);
        assert_eq!(ExperienceLevel::from_months(36), ExperienceLevel::MidLevel);
        assert_eq!(ExperienceLevel::from_months(60), ExperienceLevel::Senior);
        assert_eq!(ExperienceLevel::from_months(120), ExperienceLevel::PrincipalLead);
    }

    #[test]
    fn test_project_summaries() {
        assert_eq!(project_summary(0), "No projects listed");
        assert_eq!(project_summary(1), "One project listed");
        assert_eq!(project_summary(4), "Few projects highlighted");
        assert_eq!(project_summary(9), "Multiple projects showcased");
    }

    #[test]
    fn test_full_profile_report() {
        let report = engine().profile_report(&full_candidate());
        // skills 1.0, education 1.0, experience 48/120, projects 1.0
        assert_eq!(report.completeness, 0.85);
        assert_eq!(report.quality, ProfileQuality::VeryGood);
        assert_eq!(report.experience_level, ExperienceLevel::MidLevel);
        assert_eq!(report.experience_years, 4.0);
        assert_eq!(report.project_summary, "Multiple projects showcased");
        assert!(report.suggestions.is_empty());
        assert_eq!(report.next_steps, vec!["Include certifications and awards"]);
    }

    #[test]
    fn test_empty_profile_gets_every_suggestion() {
        let report = engine().profile_report(&CandidateSnapshot::new(UserCategory::Student));
        assert_eq!(report.completeness, 0.0);
        assert_eq!(report.quality, ProfileQuality::NeedsImprovement);
        let kinds: Vec<SuggestionKind> = report.suggestions.iter().map(|s| s.kind).collect();
        assert_eq!(
            kinds,
            vec![
                SuggestionKind::Skills,
                SuggestionKind::Education,
                SuggestionKind::Experience,
                SuggestionKind::Projects
            ]
        );
        assert_eq!(report.next_steps.len(), 3);
    }

    #[test]
    fn test_skill_groups_follow_taxonomy_order() {
        let mut c = CandidateSnapshot::new(UserCategory::Student);
        c.skills = ["postgres", "Basket Weaving", "py", "reactjs", "python3"]
            .iter()
            .map(|s| SkillEntry::untracked(*s))
            .collect();
        let groups = engine().group_skills(&c);
        let labels: Vec<&str> = groups.iter().map(|g| g.label.as_str()).collect();
        assert_eq!(
            labels,
            vec!["Programming Languages", "Frontend Development", "Databases", "Other"]
        );
        assert_eq!(groups[0].skills, vec!["Python"]);
        assert_eq!(groups[3].skills, vec!["Basket Weaving"]);
    }

    #[test]
    fn test_quality_labels_serialize_as_display_text() {
        let json = serde_json::to_value(ProfileQuality::VeryGood).unwrap();
        assert_eq!(json, "Very Good");
        let json = serde_json::to_value(ExperienceLevel::PrincipalLead).unwrap();
        assert_eq!(json, "Principal/Lead");
    }
}
