use axum::Json;
use axum::extract::State;

use crate::db;
use crate::error::AppError;
use crate::models::{Skill, SkillWithCount};
use crate::state::SharedState;

pub async fn list(State(state): State<SharedState>) -> Result<Json<Vec<Skill>>, AppError> {
    let skills = db::skills::list(&state.pool).await?;
    Ok(Json(skills))
}

/// Skills ranked by how many projects use them.
pub async fn top(
    State(state): State<SharedState>,
) -> Result<Json<Vec<SkillWithCount>>, AppError> {
    let skills = db::skills::list_with_project_counts(&state.pool).await?;
    Ok(Json(skills))
}
