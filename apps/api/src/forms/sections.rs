//! `FormItem` bindings for every list section of the resume.

use uuid::Uuid;

use crate::catalog::{
    achievement_category_info, language_proficiency_info, project_category_info,
    skill_category_info, CategoryInfo,
};
use crate::forms::section::{FormItem, SectionForm};
use crate::forms::validation::require;
use crate::forms::FormSet;
use crate::models::resume::{
    Achievement, Certification, Education, Hackathon, Internship, Language, Project, ResumeData,
    Skill,
};
use crate::store::ResumeStore;
use crate::wizard::Section;

/// Implements the plumbing half of `FormItem`: id access, seeding, commit and form lookup.
macro_rules! section_plumbing {
    ($list:ident, $update:ident) => {
        fn id(&self) -> Uuid {
            self.id
        }

        fn set_id(&mut self, id: Uuid) {
            self.id = id;
        }

        fn seed(data: &ResumeData) -> Vec<Self> {
            data.$list.clone()
        }

        fn commit(store: &mut ResumeStore, items: Vec<Self>) {
            store.$update(items);
        }

        fn form(forms: &FormSet) -> &SectionForm<Self> {
            &forms.$list
        }

        fn form_mut(forms: &mut FormSet) -> &mut SectionForm<Self> {
            &mut forms.$list
        }
    };
}

impl FormItem for Education {
    const SECTION: Section = Section::Education;

    section_plumbing!(education, update_education);

    fn validate(&self, _existing: &[Self], _editing: Option<Uuid>) -> Result<(), String> {
        require(&self.institution, "the institution name")?;
        require(&self.degree, "the degree")
    }
}

impl FormItem for Skill {
    const SECTION: Section = Section::Skills;

    section_plumbing!(skills, update_skills);

    fn category(&self) -> &str {
        &self.category
    }

    fn category_info(category: &str) -> Option<&'static CategoryInfo> {
        Some(skill_category_info(category))
    }

    fn validate(&self, _existing: &[Self], _editing: Option<Uuid>) -> Result<(), String> {
        require(&self.name, "a skill name")
    }

    fn normalize(&mut self) {
        self.name = self.name.trim().to_string();
    }

    fn apply_suggestion(&mut self, field: &str, value: &str) -> Result<(), String> {
        match field {
            "name" => self.name = value.to_string(),
            "level" => self.level = value.to_string(),
            "category" => self.category = value.to_string(),
            _ => return Err(format!("No suggestions for field '{field}'")),
        }
        Ok(())
    }
}

impl FormItem for Project {
    const SECTION: Section = Section::Projects;

    section_plumbing!(projects, update_projects);

    fn category(&self) -> &str {
        &self.category
    }

    fn category_info(category: &str) -> Option<&'static CategoryInfo> {
        Some(project_category_info(category))
    }

    fn validate(&self, _existing: &[Self], _editing: Option<Uuid>) -> Result<(), String> {
        require(&self.title, "a project title")?;
        require(&self.description, "a project description")
    }

    fn normalize(&mut self) {
        self.tech_stack = self
            .tech_stack
            .iter()
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty())
            .collect();
    }

    /// A tech stack suggestion is appended; repeats are kept as-is.
    fn apply_suggestion(&mut self, field: &str, value: &str) -> Result<(), String> {
        match field {
            "tech_stack" => self.tech_stack.push(value.to_string()),
            "category" => self.category = value.to_string(),
            _ => return Err(format!("No suggestions for field '{field}'")),
        }
        Ok(())
    }
}

impl FormItem for Certification {
    const SECTION: Section = Section::Certifications;

    section_plumbing!(certifications, update_certifications);

    fn validate(&self, _existing: &[Self], _editing: Option<Uuid>) -> Result<(), String> {
        require(&self.name, "the certification name")?;
        require(&self.issuer, "the issuing organization")
    }
}

impl FormItem for Hackathon {
    const SECTION: Section = Section::Hackathons;

    section_plumbing!(hackathons, update_hackathons);

    fn validate(&self, _existing: &[Self], _editing: Option<Uuid>) -> Result<(), String> {
        require(&self.name, "the hackathon name")
    }
}

impl FormItem for Internship {
    const SECTION: Section = Section::Internships;

    section_plumbing!(internships, update_internships);

    fn validate(&self, _existing: &[Self], _editing: Option<Uuid>) -> Result<(), String> {
        require(&self.company, "the company name")?;
        require(&self.role, "your role")
    }
}

impl FormItem for Achievement {
    const SECTION: Section = Section::Achievements;

    section_plumbing!(achievements, update_achievements);

    fn category(&self) -> &str {
        &self.category
    }

    fn category_info(category: &str) -> Option<&'static CategoryInfo> {
        Some(achievement_category_info(category))
    }

    fn validate(&self, _existing: &[Self], _editing: Option<Uuid>) -> Result<(), String> {
        require(&self.title, "an achievement title")?;
        require(&self.description, "an achievement description")
    }
}

impl FormItem for Language {
    const SECTION: Section = Section::Languages;

    section_plumbing!(languages, update_languages);

    fn category(&self) -> &str {
        &self.proficiency
    }

    fn category_info(category: &str) -> Option<&'static CategoryInfo> {
        Some(language_proficiency_info(category))
    }

    /// Names are unique case-insensitively; the record being edited may keep its own name.
    fn validate(&self, existing: &[Self], editing: Option<Uuid>) -> Result<(), String> {
        require(&self.name, "a language name")?;

        let name = self.name.trim().to_lowercase();
        let duplicate = existing
            .iter()
            .filter(|l| Some(l.id) != editing)
            .any(|l| l.name.trim().to_lowercase() == name);

        if duplicate {
            return Err(format!("{} is already in your languages", self.name.trim()));
        }
        Ok(())
    }

    fn normalize(&mut self) {
        self.name = self.name.trim().to_string();
    }

    fn apply_suggestion(&mut self, field: &str, value: &str) -> Result<(), String> {
        match field {
            "name" => self.name = value.to_string(),
            "proficiency" => self.proficiency = value.to_string(),
            "certification" => self.certification = value.to_string(),
            _ => return Err(format!("No suggestions for field '{field}'")),
        }
        Ok(())
    }
}
