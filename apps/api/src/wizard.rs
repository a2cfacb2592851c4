use serde::{Deserialize, Serialize};

use crate::store::ResumeStore;

/// Wizard sections in the order the builder walks through them.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Section {
    PersonalInfo,
    Education,
    Skills,
    Projects,
    Certifications,
    Hackathons,
    Internships,
    Achievements,
    Languages,
}

impl Section {
    pub const ALL: [Section; 9] = [
        Section::PersonalInfo,
        Section::Education,
        Section::Skills,
        Section::Projects,
        Section::Certifications,
        Section::Hackathons,
        Section::Internships,
        Section::Achievements,
        Section::Languages,
    ];

    /// Wizard step index owned by this section's form.
    pub fn step(self) -> u32 {
        match self {
            Section::PersonalInfo => 0,
            Section::Education => 1,
            Section::Skills => 2,
            Section::Projects => 3,
            Section::Certifications => 4,
            Section::Hackathons => 5,
            Section::Internships => 6,
            Section::Achievements => 7,
            Section::Languages => 8,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Section::PersonalInfo => "personal_info",
            Section::Education => "education",
            Section::Skills => "skills",
            Section::Projects => "projects",
            Section::Certifications => "certifications",
            Section::Hackathons => "hackathons",
            Section::Internships => "internships",
            Section::Achievements => "achievements",
            Section::Languages => "languages",
        }
    }

    /// Singular noun used in notifications ("Skill added successfully").
    pub fn item_label(self) -> &'static str {
        match self {
            Section::PersonalInfo => "Personal information",
            Section::Education => "Education",
            Section::Skills => "Skill",
            Section::Projects => "Project",
            Section::Certifications => "Certification",
            Section::Hackathons => "Hackathon",
            Section::Internships => "Internship",
            Section::Achievements => "Achievement",
            Section::Languages => "Language",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "snake_case")]
pub enum SectionStatus {
    Saved,
    Empty,
    Pending,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SectionProgress {
    pub section: Section,
    pub step: u32,
    pub entry_count: usize,
    pub status: SectionStatus,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProgressReport {
    pub current_step: u32,
    pub completed_steps: Vec<u32>,
    pub total_steps: u32,
    pub percent_complete: f64,
    pub sections: Vec<SectionProgress>,
    pub missing_sections: Vec<Section>,
}

/// Summarizes wizard position and what the store currently holds per section.
///
/// A section is `Saved` once its step is marked complete, `Empty` when completed with no
/// entries, and `Pending` otherwise. Counts reflect the store, not unsaved form state.
pub fn compute_progress(store: &ResumeStore) -> ProgressReport {
    let data = store.resume_data();
    let completed = store.completed_steps();

    let mut sections = Vec::with_capacity(Section::ALL.len());
    let mut missing_sections = Vec::new();

    for section in Section::ALL {
        let entry_count = match section {
            Section::PersonalInfo => usize::from(!data.personal_info.full_name.trim().is_empty()),
            Section::Education => data.education.len(),
            Section::Skills => data.skills.len(),
            Section::Projects => data.projects.len(),
            Section::Certifications => data.certifications.len(),
            Section::Hackathons => data.hackathons.len(),
            Section::Internships => data.internships.len(),
            Section::Achievements => data.achievements.len(),
            Section::Languages => data.languages.len(),
        };

        if entry_count == 0 {
            missing_sections.push(section);
        }

        let status = match (completed.contains(&section.step()), entry_count) {
            (true, 0) => SectionStatus::Empty,
            (true, _) => SectionStatus::Saved,
            (false, _) => SectionStatus::Pending,
        };

        sections.push(SectionProgress {
            section,
            step: section.step(),
            entry_count,
            status,
        });
    }

    let total_steps = Section::ALL.len() as u32;
    // Steps outside the table can be marked complete but never count toward progress.
    let known_completed = completed.iter().filter(|s| **s < total_steps).count();
    let percent_complete = (known_completed as f64 / total_steps as f64 * 100.0).clamp(0.0, 100.0);

    ProgressReport {
        current_step: store.current_step(),
        completed_steps: completed.iter().copied().collect(),
        total_steps,
        percent_complete,
        sections,
        missing_sections,
    }
}
