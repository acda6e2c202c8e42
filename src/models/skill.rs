use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, sqlx::FromRow, Serialize, Deserialize)]
pub struct Skill {
    pub id: i64,
    pub name: String,
}

/// A skill annotated with the number of projects linked to it.
#[derive(Debug, Clone, sqlx::FromRow, Serialize, Deserialize)]
pub struct SkillWithCount {
    pub id: i64,
    pub name: String,
    pub project_count: i64,
}
