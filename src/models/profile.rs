use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::{ProjectDetail, Skill};

#[derive(Debug, Clone, sqlx::FromRow, Serialize, Deserialize)]
pub struct Profile {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub education: String,
    pub work: String,
    pub github: String,
    pub linkedin: String,
    pub portfolio: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileDetail {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub education: String,
    pub work: String,
    pub github: String,
    pub linkedin: String,
    pub portfolio: String,
    pub skills: Vec<Skill>,
    pub projects: Vec<ProjectDetail>,
}

impl ProfileDetail {
    pub fn new(profile: Profile, skills: Vec<Skill>, projects: Vec<ProjectDetail>) -> Self {
        Self {
            id: profile.id,
            name: profile.name,
            email: profile.email,
            education: profile.education,
            work: profile.work,
            github: profile.github,
            linkedin: profile.linkedin,
            portfolio: profile.portfolio,
            skills,
            projects,
        }
    }
}
