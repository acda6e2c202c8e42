use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use serde::Deserialize;
use sqlx::PgExecutor;

use crate::db;
use crate::error::{ApiJson, AppError};
use crate::models::{Project, ProjectDetail, ProjectPayload, Relation};
use crate::state::SharedState;

#[derive(Deserialize)]
pub struct ListParams {
    pub skill: Option<String>,
}

pub async fn list(
    State(state): State<SharedState>,
    Query(params): Query<ListParams>,
) -> Result<Json<Vec<ProjectDetail>>, AppError> {
    let projects = match params.skill.as_deref().filter(|s| !s.is_empty()) {
        Some(skill) => db::projects::list_by_skill(&state.pool, skill).await?,
        None => db::projects::list(&state.pool).await?,
    };
    Ok(Json(with_skills(&state.pool, projects).await?))
}

pub async fn get(
    State(state): State<SharedState>,
    Path(id): Path<i64>,
) -> Result<Json<ProjectDetail>, AppError> {
    let project = db::projects::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(project_not_found)?;
    Ok(Json(detail(&state.pool, project).await?))
}

pub async fn create(
    State(state): State<SharedState>,
    ApiJson(payload): ApiJson<ProjectPayload>,
) -> Result<(StatusCode, Json<ProjectDetail>), AppError> {
    let new = payload.into_new()?;

    let mut tx = state.pool.begin().await?;
    let project = db::projects::create(&mut *tx, &new).await?;
    let skills = db::skills::get_or_create_all(&mut tx, &new.skill_names).await?;
    let skill_ids: Vec<i64> = skills.iter().map(|s| s.id).collect();
    db::projects::set_skills(&mut tx, project.id, &skill_ids).await?;
    tx.commit().await?;

    tracing::info!(project_id = project.id, skills = skill_ids.len(), "Project created");

    Ok((StatusCode::CREATED, Json(detail(&state.pool, project).await?)))
}

pub async fn update(
    State(state): State<SharedState>,
    Path(id): Path<i64>,
    ApiJson(payload): ApiJson<ProjectPayload>,
) -> Result<Json<ProjectDetail>, AppError> {
    db::projects::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(project_not_found)?;

    let changes = payload.into_changes()?;

    let mut tx = state.pool.begin().await?;
    let project = db::projects::update(&mut *tx, id, &changes)
        .await
        .map_err(|e| match e {
            sqlx::Error::RowNotFound => project_not_found(),
            _ => AppError::Database(e),
        })?;
    if let Relation::Replace(names) = &changes.skill_names {
        let skills = db::skills::get_or_create_all(&mut tx, names).await?;
        let skill_ids: Vec<i64> = skills.iter().map(|s| s.id).collect();
        db::projects::set_skills(&mut tx, project.id, &skill_ids).await?;
    }
    tx.commit().await?;

    tracing::info!(project_id = project.id, "Project updated");

    Ok(Json(detail(&state.pool, project).await?))
}

fn project_not_found() -> AppError {
    AppError::NotFound("Project not found.".to_string())
}

async fn detail<'e, E: PgExecutor<'e>>(
    executor: E,
    project: Project,
) -> Result<ProjectDetail, AppError> {
    let mut skills = db::skills::for_projects(executor, &[project.id]).await?;
    let project_skills = skills.remove(&project.id).unwrap_or_default();
    Ok(ProjectDetail::new(project, project_skills))
}

/// Attach each project's skills using a single lookup.
pub(crate) async fn with_skills<'e, E: PgExecutor<'e>>(
    executor: E,
    projects: Vec<Project>,
) -> Result<Vec<ProjectDetail>, AppError> {
    if projects.is_empty() {
        return Ok(Vec::new());
    }
    let ids: Vec<i64> = projects.iter().map(|p| p.id).collect();
    let mut skills = db::skills::for_projects(executor, &ids).await?;
    Ok(projects
        .into_iter()
        .map(|p| {
            let project_skills = skills.remove(&p.id).unwrap_or_default();
            ProjectDetail::new(p, project_skills)
        })
        .collect())
}
