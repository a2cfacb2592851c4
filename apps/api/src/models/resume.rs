use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The single in-memory aggregate holding every resume section for one session.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ResumeData {
    pub personal_info: PersonalInfo,
    pub education: Vec<Education>,
    pub skills: Vec<Skill>,
    pub projects: Vec<Project>,
    pub certifications: Vec<Certification>,
    pub hackathons: Vec<Hackathon>,
    pub internships: Vec<Internship>,
    pub achievements: Vec<Achievement>,
    pub languages: Vec<Language>,
    pub roadmap: Option<RoadmapData>,
    pub selected_job_role: String,
    pub is_premium: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct PersonalInfo {
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub location: String,
    pub linkedin: String,
    pub github: String,
    pub website: String,
    pub summary: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Education {
    pub id: Uuid,
    pub institution: String,
    pub degree: String,
    pub field_of_study: String,
    pub start_date: String,
    pub end_date: String,
    pub grade: String,
    pub description: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Skill {
    pub id: Uuid,
    pub name: String,
    pub level: String,
    pub category: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Project {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub tech_stack: Vec<String>,
    pub link: String,
    pub github: String,
    pub start_date: String,
    pub end_date: String,
    pub category: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Certification {
    pub id: Uuid,
    pub name: String,
    pub issuer: String,
    pub issue_date: String,
    pub credential_id: String,
    pub link: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Hackathon {
    pub id: Uuid,
    pub name: String,
    pub organizer: String,
    pub date: String,
    pub position: String,
    pub project: String,
    pub description: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Internship {
    pub id: Uuid,
    pub company: String,
    pub role: String,
    pub start_date: String,
    pub end_date: String,
    pub location: String,
    pub description: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Achievement {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub date: String,
    pub category: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Language {
    pub id: Uuid,
    pub name: String,
    pub proficiency: String,
    pub certification: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct RoadmapData {
    pub job_role: String,
    pub milestones: Vec<RoadmapMilestone>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct RoadmapMilestone {
    pub title: String,
    pub description: String,
    pub duration: String,
    pub completed: bool,
}
