use axum::Json;
use axum::extract::{Query, State};
use serde::Deserialize;

use crate::db;
use crate::error::AppError;
use crate::models::{SearchResponse, SearchResults};
use crate::state::SharedState;

#[derive(Deserialize)]
pub struct SearchParams {
    pub q: Option<String>,
}

pub async fn search(
    State(state): State<SharedState>,
    Query(params): Query<SearchParams>,
) -> Result<Json<SearchResponse>, AppError> {
    let query = params.q.as_deref().map(str::trim).unwrap_or_default();
    if query.is_empty() {
        return Err(AppError::BadRequest(
            "Query parameter 'q' is required.".to_string(),
        ));
    }

    let (profiles, skills, projects) = tokio::try_join!(
        db::profiles::search(&state.pool, query),
        db::skills::search(&state.pool, query),
        db::projects::search(&state.pool, query),
    )?;

    tracing::debug!(
        query,
        profiles = profiles.len(),
        skills = skills.len(),
        projects = projects.len(),
        "Search completed"
    );

    Ok(Json(SearchResponse {
        query: query.to_string(),
        results: SearchResults {
            profiles: profiles.into_iter().map(Into::into).collect(),
            skills,
            projects: projects.into_iter().map(Into::into).collect(),
        },
    }))
}
