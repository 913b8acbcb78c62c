use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Self-declared proficiency. Scales a matched skill's contribution to its tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkillLevel {
    Beginner,
    Intermediate,
    Advanced,
}

impl SkillLevel {
    pub fn label(self) -> &'static str {
        match self {
            SkillLevel::Beginner => "Beginner",
            SkillLevel::Intermediate => "Intermediate",
            SkillLevel::Advanced => "Advanced",
        }
    }
}

/// A skill as declared by the candidate or extracted from their resume.
/// `level = None` means proficiency is not tracked and counts as full credit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillEntry {
    pub name: String,
    #[serde(default)]
    pub level: Option<SkillLevel>,
}

impl SkillEntry {
    pub fn new(name: impl Into<String>, level: SkillLevel) -> Self {
        Self {
            name: name.into(),
            level: Some(level),
        }
    }

    pub fn untracked(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            level: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExperienceKind {
    Job,
    Internship,
    Freelance,
}

/// One stint of work. `duration_text` is kept unparsed ("1 year 6 months").
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExperienceEntry {
    pub kind: ExperienceKind,
    pub duration_text: String,
}

impl ExperienceEntry {
    pub fn new(kind: ExperienceKind, duration_text: impl Into<String>) -> Self {
        Self {
            kind,
            duration_text: duration_text.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProjectComplexity {
    Basic,
    Intermediate,
    Advanced,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    pub name: String,
    #[serde(default)]
    pub tags: Vec<String>,
    /// Explicit complexity; inferred from `tags` when absent.
    #[serde(default)]
    pub complexity: Option<ProjectComplexity>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EducationEntry {
    #[serde(default)]
    pub degree: String,
    #[serde(default)]
    pub field: String,
    #[serde(default)]
    pub institution: String,
    #[serde(default)]
    pub year: String,
}

/// Selects the component weight table used by the readiness aggregator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UserCategory {
    #[serde(alias = "fresher")]
    Student,
    Professional,
}

/// Immutable input to every scoring call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandidateSnapshot {
    #[serde(default)]
    pub candidate_id: Option<Uuid>,
    #[serde(default)]
    pub skills: Vec<SkillEntry>,
    #[serde(default)]
    pub projects: Vec<Project>,
    #[serde(default)]
    pub experiences: Vec<ExperienceEntry>,
    #[serde(default)]
    pub education: Vec<EducationEntry>,
    #[serde(default)]
    pub resume_bytes: Option<Vec<u8>>,
    #[serde(default)]
    pub resume_file_name: Option<String>,
    pub user_category: UserCategory,
}

impl CandidateSnapshot {
    pub fn new(user_category: UserCategory) -> Self {
        Self {
            candidate_id: None,
            skills: Vec::new(),
            projects: Vec::new(),
            experiences: Vec::new(),
            education: Vec::new(),
            resume_bytes: None,
            resume_file_name: None,
            user_category,
        }
    }
}
