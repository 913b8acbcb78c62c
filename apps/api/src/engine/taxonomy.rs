//! Skill taxonomy: canonical names, categories and the alias table.
//!
//! Lookups are case-insensitive and whitespace-tolerant. A second, compact
//! key (spaces, dots, hyphens and underscores removed) catches spellings such
//! as "Node JS" or "react-js". Anything that misses both maps is kept verbatim
//! as an unknown skill; it never matches a role requirement.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::engine::error::EngineConfigError;

/// Closed set of skill categories. Used for explanatory grouping only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkillCategory {
    ProgrammingLanguage,
    Frontend,
    Backend,
    Database,
    CloudDevops,
    DataScience,
    Mobile,
    Design,
    Tools,
    SoftSkill,
}

impl SkillCategory {
    pub const ALL: [SkillCategory; 10] = [
        SkillCategory::ProgrammingLanguage,
        SkillCategory::Frontend,
        SkillCategory::Backend,
        SkillCategory::Database,
        SkillCategory::CloudDevops,
        SkillCategory::DataScience,
        SkillCategory::Mobile,
        SkillCategory::Design,
        SkillCategory::Tools,
        SkillCategory::SoftSkill,
    ];

    /// Human-readable name shown in breakdowns and reports.
    pub fn label(self) -> &'static str {
        match self {
            SkillCategory::ProgrammingLanguage => "Programming Languages",
            SkillCategory::Frontend => "Frontend Development",
            SkillCategory::Backend => "Backend Development",
            SkillCategory::Database => "Databases",
            SkillCategory::CloudDevops => "Cloud & DevOps",
            SkillCategory::DataScience => "Data Science & ML",
            SkillCategory::Mobile => "Mobile Development",
            SkillCategory::Design => "Design",
            SkillCategory::Tools => "Tools & Workflow",
            SkillCategory::SoftSkill => "Soft Skills",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaxonomyEntry {
    pub canonical_name: String,
    pub category: SkillCategory,
    #[serde(default)]
    pub aliases: Vec<String>,
}

/// Result of normalizing one raw skill string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NormalizedSkill {
    pub raw_name: String,
    pub canonical_name: String,
    /// `None` for skills the taxonomy does not know.
    pub category: Option<SkillCategory>,
}

#[derive(Debug, Clone)]
pub struct SkillTaxonomy {
    entries: Vec<TaxonomyEntry>,
    by_key: HashMap<String, usize>,
    by_compact_key: HashMap<String, usize>,
}

impl SkillTaxonomy {
    /// Builds the lookup tables. Fails if one alias points at two canonical names.
    pub fn new(entries: Vec<TaxonomyEntry>) -> Result<Self, EngineConfigError> {
        let mut by_key: HashMap<String, usize> = HashMap::new();
        let mut by_compact_key: HashMap<String, usize> = HashMap::new();

        for (idx, entry) in entries.iter().enumerate() {
            let names = std::iter::once(&entry.canonical_name).chain(entry.aliases.iter());
            for name in names {
                let key = lookup_key(name);
                if let Some(&existing) = by_key.get(&key) {
                    if existing != idx {
                        return Err(EngineConfigError::AliasConflict {
                            alias: name.clone(),
                            first: entries[existing].canonical_name.clone(),
                            second: entry.canonical_name.clone(),
                        });
                    }
                    continue;
                }
                by_key.insert(key, idx);
                // Compact collisions are tolerated; the first entry keeps the key.
                by_compact_key.entry(compact_key(name)).or_insert(idx);
            }
        }

        Ok(Self {
            entries,
            by_key,
            by_compact_key,
        })
    }

    /// The built-in taxonomy.
    pub fn builtin() -> Result<Self, EngineConfigError> {
        let entries = BUILTIN_SKILLS
            .iter()
            .map(|(canonical, category, aliases)| TaxonomyEntry {
                canonical_name: canonical.to_string(),
                category: *category,
                aliases: aliases.iter().map(|a| a.to_string()).collect(),
            })
            .collect();
        Self::new(entries)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn find(&self, raw: &str) -> Option<&TaxonomyEntry> {
        self.by_key
            .get(&lookup_key(raw))
            .or_else(|| self.by_compact_key.get(&compact_key(raw)))
            .map(|&idx| &self.entries[idx])
    }

    /// Total and deterministic: unknown names come back trimmed but otherwise verbatim.
    pub fn normalize(&self, raw: &str) -> NormalizedSkill {
        match self.find(raw) {
            Some(entry) => NormalizedSkill {
                raw_name: raw.to_string(),
                canonical_name: entry.canonical_name.clone(),
                category: Some(entry.category),
            },
            None => NormalizedSkill {
                raw_name: raw.to_string(),
                canonical_name: raw.trim().to_string(),
                category: None,
            },
        }
    }

    pub fn category_of(&self, canonical_name: &str) -> Option<SkillCategory> {
        self.find(canonical_name).map(|e| e.category)
    }
}

fn lookup_key(raw: &str) -> String {
    raw.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

fn compact_key(raw: &str) -> String {
    raw.chars()
        .filter(|c| !c.is_whitespace() && !matches!(c, '.' | '-' | '_'))
        .flat_map(char::to_lowercase)
        .collect()
}

type BuiltinSkill = (&'static str, SkillCategory, &'static [&'static str]);

const BUILTIN_SKILLS: &[BuiltinSkill] = &[
    // Languages
    ("Python", SkillCategory::ProgrammingLanguage, &["py", "python3", "python 3", "python2"]),
    ("JavaScript", SkillCategory::ProgrammingLanguage, &["js", "es6", "ecmascript", "java script"]),
    ("TypeScript", SkillCategory::ProgrammingLanguage, &["ts", "type script"]),
    ("Java", SkillCategory::ProgrammingLanguage, &["core java", "java se"]),
    ("C++", SkillCategory::ProgrammingLanguage, &["cpp", "c plus plus"]),
    ("C#", SkillCategory::ProgrammingLanguage, &["csharp", "c sharp"]),
    ("Go", SkillCategory::ProgrammingLanguage, &["golang"]),
    ("Rust", SkillCategory::ProgrammingLanguage, &["rust-lang", "rustlang"]),
    ("Kotlin", SkillCategory::ProgrammingLanguage, &[]),
    ("Swift", SkillCategory::ProgrammingLanguage, &[]),
    ("Dart", SkillCategory::ProgrammingLanguage, &[]),
    ("PHP", SkillCategory::ProgrammingLanguage, &[]),
    ("Ruby", SkillCategory::ProgrammingLanguage, &[]),
    ("SQL", SkillCategory::ProgrammingLanguage, &["structured query language"]),
    ("R", SkillCategory::ProgrammingLanguage, &["r language", "rlang"]),
    // Frontend
    ("HTML", SkillCategory::Frontend, &["html5"]),
    ("CSS", SkillCategory::Frontend, &["css3"]),
    ("React", SkillCategory::Frontend, &["reactjs", "react.js", "react js"]),
    ("Angular", SkillCategory::Frontend, &["angularjs", "angular.js"]),
    ("Vue", SkillCategory::Frontend, &["vue.js", "vuejs"]),
    ("Next.js", SkillCategory::Frontend, &["nextjs", "next js"]),
    ("Redux", SkillCategory::Frontend, &["redux toolkit"]),
    ("Tailwind CSS", SkillCategory::Frontend, &["tailwind", "tailwindcss"]),
    // Backend
    ("Node.js", SkillCategory::Backend, &["node", "nodejs", "node js"]),
    ("Express", SkillCategory::Backend, &["express.js", "expressjs"]),
    ("Django", SkillCategory::Backend, &["django rest framework", "drf"]),
    ("Flask", SkillCategory::Backend, &[]),
    ("FastAPI", SkillCategory::Backend, &["fast api"]),
    ("Spring Boot", SkillCategory::Backend, &["spring", "springboot"]),
    ("REST APIs", SkillCategory::Backend, &["rest", "rest api", "restful", "restful apis"]),
    ("GraphQL", SkillCategory::Backend, &[]),
    ("Microservices", SkillCategory::Backend, &["microservice architecture"]),
    // Databases
    ("PostgreSQL", SkillCategory::Database, &["postgres", "pg"]),
    ("MySQL", SkillCategory::Database, &["my sql"]),
    ("MongoDB", SkillCategory::Database, &["mongo", "mongo db"]),
    ("Redis", SkillCategory::Database, &[]),
    ("Elasticsearch", SkillCategory::Database, &["elastic search"]),
    ("SQLite", SkillCategory::Database, &["sqlite3"]),
    // Cloud and DevOps
    ("AWS", SkillCategory::CloudDevops, &["amazon web services"]),
    ("Azure", SkillCategory::CloudDevops, &["microsoft azure"]),
    ("GCP", SkillCategory::CloudDevops, &["google cloud", "google cloud platform"]),
    ("Docker", SkillCategory::CloudDevops, &["containers"]),
    ("Kubernetes", SkillCategory::CloudDevops, &["k8s"]),
    ("Terraform", SkillCategory::CloudDevops, &[]),
    ("CI/CD", SkillCategory::CloudDevops, &["cicd", "ci cd", "continuous integration"]),
    ("Jenkins", SkillCategory::CloudDevops, &[]),
    ("Linux", SkillCategory::CloudDevops, &["unix"]),
    // Data science and ML
    ("Machine Learning", SkillCategory::DataScience, &["ml"]),
    ("Deep Learning", SkillCategory::DataScience, &["dl", "neural networks"]),
    ("TensorFlow", SkillCategory::DataScience, &["tf"]),
    ("PyTorch", SkillCategory::DataScience, &["torch"]),
    ("Pandas", SkillCategory::DataScience, &[]),
    ("NumPy", SkillCategory::DataScience, &[]),
    ("Scikit-learn", SkillCategory::DataScience, &["sklearn", "scikit learn"]),
    ("NLP", SkillCategory::DataScience, &["natural language processing"]),
    ("Statistics", SkillCategory::DataScience, &["stats"]),
    ("Data Visualization", SkillCategory::DataScience, &["data viz", "dataviz"]),
    ("Tableau", SkillCategory::DataScience, &[]),
    ("Power BI", SkillCategory::DataScience, &["powerbi"]),
    // Mobile
    ("React Native", SkillCategory::Mobile, &["react-native", "rn"]),
    ("Flutter", SkillCategory::Mobile, &[]),
    ("Android", SkillCategory::Mobile, &["android development"]),
    ("iOS", SkillCategory::Mobile, &["ios development"]),
    // Design
    ("Figma", SkillCategory::Design, &[]),
    ("UI/UX Design", SkillCategory::Design, &["ui/ux", "ux", "ui design", "ux design"]),
    // Tools
    ("Git", SkillCategory::Tools, &["github", "gitlab", "version control"]),
    ("Jira", SkillCategory::Tools, &[]),
    ("Agile", SkillCategory::Tools, &["scrum"]),
    ("Testing", SkillCategory::Tools, &["unit testing", "jest", "pytest"]),
    // Soft skills
    ("Communication", SkillCategory::SoftSkill, &["communication skills"]),
    ("Problem Solving", SkillCategory::SoftSkill, &["problem-solving"]),
    ("Teamwork", SkillCategory::SoftSkill, &["collaboration"]),
];
