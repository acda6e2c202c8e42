use sqlx::{PgConnection, PgPool};

use crate::db::contains_pattern;
use crate::models::{NewProfile, Profile, ProfileChanges};

/// The profile the API serves: the earliest one created.
pub async fn first<'e, E: sqlx::PgExecutor<'e>>(executor: E) -> Result<Option<Profile>, sqlx::Error> {
    sqlx::query_as::<_, Profile>("SELECT * FROM profiles ORDER BY id LIMIT 1")
        .fetch_optional(executor)
        .await
}

pub async fn exists<'e, E: sqlx::PgExecutor<'e>>(executor: E) -> Result<bool, sqlx::Error> {
    let row: (bool,) = sqlx::query_as("SELECT EXISTS (SELECT 1 FROM profiles)")
        .fetch_one(executor)
        .await?;
    Ok(row.0)
}

pub async fn search(pool: &PgPool, query: &str) -> Result<Vec<Profile>, sqlx::Error> {
    sqlx::query_as::<_, Profile>("SELECT * FROM profiles WHERE name ILIKE $1 ORDER BY id")
        .bind(contains_pattern(query))
        .fetch_all(pool)
        .await
}

pub async fn create<'e, E: sqlx::PgExecutor<'e>>(
    executor: E,
    profile: &NewProfile,
) -> Result<Profile, sqlx::Error> {
    sqlx::query_as::<_, Profile>(
        "INSERT INTO profiles (name, email, education, work, github, linkedin, portfolio)
         VALUES ($1, $2, $3, $4, $5, $6, $7) RETURNING *",
    )
    .bind(&profile.name)
    .bind(&profile.email)
    .bind(&profile.education)
    .bind(&profile.work)
    .bind(&profile.github)
    .bind(&profile.linkedin)
    .bind(&profile.portfolio)
    .fetch_one(executor)
    .await
}

pub async fn update<'e, E: sqlx::PgExecutor<'e>>(
    executor: E,
    id: i64,
    changes: &ProfileChanges,
) -> Result<Profile, sqlx::Error> {
    sqlx::query_as::<_, Profile>(
        "UPDATE profiles SET
             name = COALESCE($2, name),
             email = COALESCE($3, email),
             education = COALESCE($4, education),
             work = COALESCE($5, work),
             github = COALESCE($6, github),
             linkedin = COALESCE($7, linkedin),
             portfolio = COALESCE($8, portfolio),
             updated_at = now()
         WHERE id = $1 RETURNING *",
    )
    .bind(id)
    .bind(changes.name.as_deref())
    .bind(changes.email.as_deref())
    .bind(changes.education.as_deref())
    .bind(changes.work.as_deref())
    .bind(changes.github.as_deref())
    .bind(changes.linkedin.as_deref())
    .bind(changes.portfolio.as_deref())
    .fetch_one(executor)
    .await
}

pub async fn set_skills(
    conn: &mut PgConnection,
    profile_id: i64,
    skill_ids: &[i64],
) -> Result<(), sqlx::Error> {
    sqlx::query("DELETE FROM profile_skills WHERE profile_id = $1")
        .bind(profile_id)
        .execute(&mut *conn)
        .await?;

    sqlx::query(
        "INSERT INTO profile_skills (profile_id, skill_id)
         SELECT $1, UNNEST($2::bigint[])
         ON CONFLICT DO NOTHING",
    )
    .bind(profile_id)
    .bind(skill_ids)
    .execute(&mut *conn)
    .await?;
    Ok(())
}

/// Ids that match no project are skipped.
pub async fn set_projects(
    conn: &mut PgConnection,
    profile_id: i64,
    project_ids: &[i64],
) -> Result<(), sqlx::Error> {
    sqlx::query("DELETE FROM profile_projects WHERE profile_id = $1")
        .bind(profile_id)
        .execute(&mut *conn)
        .await?;

    sqlx::query(
        "INSERT INTO profile_projects (profile_id, project_id)
         SELECT $1, id FROM projects WHERE id = ANY($2)
         ON CONFLICT DO NOTHING",
    )
    .bind(profile_id)
    .bind(project_ids)
    .execute(&mut *conn)
    .await?;
    Ok(())
}

/// Serializes profile creation across connections for the current transaction.
pub async fn lock_for_create(conn: &mut PgConnection) -> Result<(), sqlx::Error> {
    sqlx::query("SELECT pg_advisory_xact_lock(hashtext('profiles.create'))")
        .execute(conn)
        .await?;
    Ok(())
}
