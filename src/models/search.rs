use serde::Serialize;

use crate::models::{Profile, Project, Skill};

const DESCRIPTION_PREVIEW_CHARS: usize = 100;

#[derive(Debug, Serialize)]
pub struct SearchResponse {
    pub query: String,
    pub results: SearchResults,
}

#[derive(Debug, Default, Serialize)]
pub struct SearchResults {
    pub profiles: Vec<ProfileHit>,
    pub skills: Vec<Skill>,
    pub projects: Vec<ProjectHit>,
}

#[derive(Debug, Serialize)]
pub struct ProfileHit {
    pub id: i64,
    pub name: String,
    pub email: String,
}

impl From<Profile> for ProfileHit {
    fn from(profile: Profile) -> Self {
        Self {
            id: profile.id,
            name: profile.name,
            email: profile.email,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ProjectHit {
    pub id: i64,
    pub title: String,
    pub description: String,
}

impl From<Project> for ProjectHit {
    fn from(project: Project) -> Self {
        Self {
            id: project.id,
            title: project.title,
            description: preview(&project.description),
        }
    }
}

/// First 100 characters of `text`, with "..." appended when anything was cut.
pub fn preview(text: &str) -> String {
    match text.char_indices().nth(DESCRIPTION_PREVIEW_CHARS) {
        Some((cut, _)) => format!("{}...", &text[..cut]),
        None => text.to_string(),
    }
}
