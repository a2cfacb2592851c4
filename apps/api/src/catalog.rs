//! Closed option lists and suggestion tables used by the section forms.
//!
//! Category values on stored items are free strings. These tables only drive grouping labels
//! and display info; a value outside a table resolves to that table's default entry.

use serde::Serialize;

#[derive(Debug, Clone, Copy, Serialize, PartialEq)]
pub struct CategoryInfo {
    pub value: &'static str,
    pub color: &'static str,
    pub description: &'static str,
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq)]
pub struct ProficiencyLevel {
    pub value: &'static str,
    pub description: &'static str,
    /// Fill percentage for progress bars.
    pub percent: u8,
}

pub const SKILL_CATEGORIES: &[CategoryInfo] = &[
    CategoryInfo {
        value: "Technical",
        color: "blue",
        description: "Programming languages and core engineering skills",
    },
    CategoryInfo {
        value: "Soft Skills",
        color: "green",
        description: "Communication, leadership and collaboration",
    },
    CategoryInfo {
        value: "Tools",
        color: "purple",
        description: "Developer tools, platforms and services",
    },
    CategoryInfo {
        value: "Frameworks",
        color: "orange",
        description: "Libraries and application frameworks",
    },
    CategoryInfo {
        value: "Languages",
        color: "pink",
        description: "Spoken and written languages",
    },
];

pub const PROFICIENCY_LEVELS: &[ProficiencyLevel] = &[
    ProficiencyLevel {
        value: "Beginner",
        description: "Basic understanding, learning fundamentals",
        percent: 25,
    },
    ProficiencyLevel {
        value: "Intermediate",
        description: "Comfortable with common tasks",
        percent: 50,
    },
    ProficiencyLevel {
        value: "Advanced",
        description: "Deep knowledge, works independently",
        percent: 75,
    },
    ProficiencyLevel {
        value: "Expert",
        description: "Mastery, mentors others",
        percent: 100,
    },
];

pub const ACHIEVEMENT_CATEGORIES: &[CategoryInfo] = &[
    CategoryInfo {
        value: "Academic",
        color: "blue",
        description: "Scholarships, honours and academic awards",
    },
    CategoryInfo {
        value: "Professional",
        color: "green",
        description: "Recognition earned at work",
    },
    CategoryInfo {
        value: "Competition",
        color: "yellow",
        description: "Contests, olympiads and hackathon placings",
    },
    CategoryInfo {
        value: "Leadership",
        color: "purple",
        description: "Roles leading teams, clubs or initiatives",
    },
    CategoryInfo {
        value: "Community",
        color: "pink",
        description: "Volunteering and open community work",
    },
    CategoryInfo {
        value: "Other",
        color: "gray",
        description: "Anything that does not fit elsewhere",
    },
];

pub const LANGUAGE_PROFICIENCIES: &[CategoryInfo] = &[
    CategoryInfo {
        value: "Basic",
        color: "gray",
        description: "Simple phrases and everyday expressions",
    },
    CategoryInfo {
        value: "Intermediate",
        color: "yellow",
        description: "Handles familiar topics in conversation",
    },
    CategoryInfo {
        value: "Professional",
        color: "blue",
        description: "Works effectively in a professional setting",
    },
    CategoryInfo {
        value: "Fluent",
        color: "green",
        description: "Expresses ideas spontaneously and precisely",
    },
    CategoryInfo {
        value: "Native",
        color: "purple",
        description: "First language or equivalent",
    },
];

pub const PROJECT_CATEGORIES: &[CategoryInfo] = &[
    CategoryInfo {
        value: "Web",
        color: "blue",
        description: "Web applications and sites",
    },
    CategoryInfo {
        value: "Mobile",
        color: "green",
        description: "iOS and Android applications",
    },
    CategoryInfo {
        value: "Data",
        color: "orange",
        description: "Data science, ML and analytics",
    },
    CategoryInfo {
        value: "Systems",
        color: "purple",
        description: "Infrastructure, tooling and low-level work",
    },
    CategoryInfo {
        value: "Other",
        color: "gray",
        description: "Everything else",
    },
];

pub const SKILL_SUGGESTIONS: &[(&str, &[&str])] = &[
    (
        "Technical",
        &[
            "JavaScript", "TypeScript", "Python", "Java", "Go", "Rust", "C++", "SQL",
        ],
    ),
    (
        "Soft Skills",
        &[
            "Communication",
            "Leadership",
            "Teamwork",
            "Problem Solving",
            "Time Management",
        ],
    ),
    (
        "Tools",
        &["Git", "Docker", "Kubernetes", "AWS", "Figma", "Jira"],
    ),
    (
        "Frameworks",
        &["React", "Next.js", "Node.js", "Django", "Spring Boot", "Axum"],
    ),
    ("Languages", &["English", "Spanish", "French", "German", "Hindi"]),
];

pub const LANGUAGE_CERTIFICATIONS: &[(&str, &[&str])] = &[
    ("English", &["IELTS", "TOEFL", "Cambridge C1 Advanced"]),
    ("Spanish", &["DELE", "SIELE"]),
    ("French", &["DELF", "DALF", "TCF"]),
    ("German", &["Goethe-Zertifikat", "TestDaF"]),
    ("Japanese", &["JLPT N1", "JLPT N2", "JLPT N3"]),
    ("Chinese", &["HSK 4", "HSK 5", "HSK 6"]),
];

pub const POPULAR_LANGUAGES: &[&str] = &[
    "English", "Spanish", "French", "German", "Hindi", "Japanese", "Chinese", "Arabic",
];

pub const TECH_STACKS: &[&str] = &[
    "React", "Node.js", "TypeScript", "Python", "Django", "PostgreSQL", "MongoDB", "Docker",
    "AWS", "Rust", "Go", "GraphQL",
];

/// Resolves `value` in `table`, falling back to the first entry.
fn lookup(table: &'static [CategoryInfo], value: &str) -> &'static CategoryInfo {
    table
        .iter()
        .find(|info| info.value == value)
        .unwrap_or(&table[0])
}

pub fn skill_category_info(value: &str) -> &'static CategoryInfo {
    lookup(SKILL_CATEGORIES, value)
}

pub fn achievement_category_info(value: &str) -> &'static CategoryInfo {
    lookup(ACHIEVEMENT_CATEGORIES, value)
}

pub fn language_proficiency_info(value: &str) -> &'static CategoryInfo {
    lookup(LANGUAGE_PROFICIENCIES, value)
}

pub fn project_category_info(value: &str) -> &'static CategoryInfo {
    lookup(PROJECT_CATEGORIES, value)
}

pub fn skill_suggestions(category: &str) -> &'static [&'static str] {
    SKILL_SUGGESTIONS
        .iter()
        .find(|(c, _)| *c == category)
        .map(|(_, names)| *names)
        .unwrap_or(&[])
}

pub fn language_certifications(language: &str) -> &'static [&'static str] {
    LANGUAGE_CERTIFICATIONS
        .iter()
        .find(|(l, _)| l.eq_ignore_ascii_case(language.trim()))
        .map(|(_, certs)| *certs)
        .unwrap_or(&[])
}

#[derive(Debug, Serialize)]
pub struct SuggestionCatalog {
    pub skill_categories: &'static [CategoryInfo],
    pub proficiency_levels: &'static [ProficiencyLevel],
    pub achievement_categories: &'static [CategoryInfo],
    pub language_proficiencies: &'static [CategoryInfo],
    pub project_categories: &'static [CategoryInfo],
    pub skill_suggestions: Vec<SkillSuggestionGroup>,
    pub popular_languages: &'static [&'static str],
    pub tech_stacks: &'static [&'static str],
}

#[derive(Debug, Serialize)]
pub struct SkillSuggestionGroup {
    pub category: &'static str,
    pub names: &'static [&'static str],
}

pub fn suggestion_catalog() -> SuggestionCatalog {
    SuggestionCatalog {
        skill_categories: SKILL_CATEGORIES,
        proficiency_levels: PROFICIENCY_LEVELS,
        achievement_categories: ACHIEVEMENT_CATEGORIES,
        language_proficiencies: LANGUAGE_PROFICIENCIES,
        project_categories: PROJECT_CATEGORIES,
        skill_suggestions: SKILL_SUGGESTIONS
            .iter()
            .map(|&(category, names)| SkillSuggestionGroup {
                category,
                names,
            })
            .collect(),
        popular_languages: POPULAR_LANGUAGES,
        tech_stacks: TECH_STACKS,
    }
}
