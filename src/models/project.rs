use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::Skill;

#[derive(Debug, Clone, sqlx::FromRow, Serialize, Deserialize)]
pub struct Project {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub links: serde_json::Value,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Wire shape of a project: the stored fields plus its skills in full.
/// Also used, unchanged, for projects nested inside a profile.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectDetail {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub links: serde_json::Value,
    pub skills: Vec<Skill>,
}

impl ProjectDetail {
    pub fn new(project: Project, skills: Vec<Skill>) -> Self {
        Self {
            id: project.id,
            title: project.title,
            description: project.description,
            links: project.links,
            skills,
        }
    }
}
