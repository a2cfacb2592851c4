// Section forms: local edit state per wizard step, validated and pushed to the store on
// "save & continue".

pub mod handlers;
pub mod personal_info;
pub mod section;
pub mod sections;
pub mod validation;

pub use personal_info::PersonalInfoForm;
pub use section::{ContinueOutcome, FormItem, FormView, SectionForm};

use crate::models::resume::{
    Achievement, Certification, Education, Hackathon, Internship, Language, Project, ResumeData,
    Skill,
};

/// Every form of one session, each seeded from the store when the session starts.
#[derive(Debug, Clone)]
pub struct FormSet {
    pub personal_info: PersonalInfoForm,
    pub education: SectionForm<Education>,
    pub skills: SectionForm<Skill>,
    pub projects: SectionForm<Project>,
    pub certifications: SectionForm<Certification>,
    pub hackathons: SectionForm<Hackathon>,
    pub internships: SectionForm<Internship>,
    pub achievements: SectionForm<Achievement>,
    pub languages: SectionForm<Language>,
}

impl FormSet {
    pub fn seeded_from(data: &ResumeData) -> Self {
        Self {
            personal_info: PersonalInfoForm::new(data.personal_info.clone()),
            education: SectionForm::new(Education::seed(data)),
            skills: SectionForm::new(Skill::seed(data)),
            projects: SectionForm::new(Project::seed(data)),
            certifications: SectionForm::new(Certification::seed(data)),
            hackathons: SectionForm::new(Hackathon::seed(data)),
            internships: SectionForm::new(Internship::seed(data)),
            achievements: SectionForm::new(Achievement::seed(data)),
            languages: SectionForm::new(Language::seed(data)),
        }
    }
}
