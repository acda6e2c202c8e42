use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use sqlx::PgPool;

use crate::db;
use crate::error::{ApiJson, AppError};
use crate::models::{Profile, ProfileDetail, ProfilePayload, Relation};
use crate::routes::projects::with_skills;
use crate::state::SharedState;

pub async fn get(State(state): State<SharedState>) -> Result<Json<ProfileDetail>, AppError> {
    let profile = db::profiles::first(&state.pool).await?.ok_or_else(|| {
        AppError::NotFound("No profile found. Create one first.".to_string())
    })?;
    Ok(Json(detail(&state.pool, profile).await?))
}

/// Create the profile. Only one may ever exist; the existence check runs
/// under a transaction-scoped advisory lock so concurrent creates cannot race.
pub async fn create(
    State(state): State<SharedState>,
    ApiJson(payload): ApiJson<ProfilePayload>,
) -> Result<(StatusCode, Json<ProfileDetail>), AppError> {
    let mut tx = state.pool.begin().await?;
    db::profiles::lock_for_create(&mut tx).await?;

    if db::profiles::exists(&mut *tx).await? {
        return Err(AppError::BadRequest(
            "Profile already exists. Use PUT to update.".to_string(),
        ));
    }

    let new = payload.into_new()?;

    let profile = db::profiles::create(&mut *tx, &new).await?;
    let skills = db::skills::get_or_create_all(&mut tx, &new.skill_names).await?;
    let skill_ids: Vec<i64> = skills.iter().map(|s| s.id).collect();
    db::profiles::set_skills(&mut tx, profile.id, &skill_ids).await?;
    db::profiles::set_projects(&mut tx, profile.id, &new.project_ids).await?;
    tx.commit().await?;

    tracing::info!(profile_id = profile.id, "Profile created");

    Ok((StatusCode::CREATED, Json(detail(&state.pool, profile).await?)))
}

/// Partial update of the sole profile. Relation fields replace the stored
/// set when present and leave it alone when absent.
pub async fn update(
    State(state): State<SharedState>,
    ApiJson(payload): ApiJson<ProfilePayload>,
) -> Result<Json<ProfileDetail>, AppError> {
    let current = db::profiles::first(&state.pool).await?.ok_or_else(|| {
        AppError::NotFound("No profile found. Create one first with POST.".to_string())
    })?;

    let changes = payload.into_changes()?;

    let mut tx = state.pool.begin().await?;
    let profile = db::profiles::update(&mut *tx, current.id, &changes).await?;
    if let Relation::Replace(names) = &changes.skill_names {
        let skills = db::skills::get_or_create_all(&mut tx, names).await?;
        let skill_ids: Vec<i64> = skills.iter().map(|s| s.id).collect();
        db::profiles::set_skills(&mut tx, profile.id, &skill_ids).await?;
    }
    if let Relation::Replace(ids) = &changes.project_ids {
        db::profiles::set_projects(&mut tx, profile.id, ids).await?;
    }
    tx.commit().await?;

    tracing::info!(profile_id = profile.id, "Profile updated");

    Ok(Json(detail(&state.pool, profile).await?))
}

async fn detail(pool: &PgPool, profile: Profile) -> Result<ProfileDetail, AppError> {
    let skills = db::skills::for_profile(pool, profile.id).await?;
    let projects = db::projects::for_profile(pool, profile.id).await?;
    let projects = with_skills(pool, projects).await?;
    Ok(ProfileDetail::new(profile, skills, projects))
}
