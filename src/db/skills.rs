use std::collections::HashMap;

use sqlx::{PgConnection, PgPool};

use crate::db::contains_pattern;
use crate::models::{Skill, SkillWithCount};

pub async fn list(pool: &PgPool) -> Result<Vec<Skill>, sqlx::Error> {
    sqlx::query_as::<_, Skill>("SELECT id, name FROM skills ORDER BY name")
        .fetch_all(pool)
        .await
}

/// Every skill with its linked-project count, highest count first.
pub async fn list_with_project_counts(pool: &PgPool) -> Result<Vec<SkillWithCount>, sqlx::Error> {
    sqlx::query_as::<_, SkillWithCount>(
        "SELECT s.id, s.name, COUNT(ps.project_id) AS project_count
         FROM skills s
         LEFT JOIN project_skills ps ON ps.skill_id = s.id
         GROUP BY s.id, s.name
         ORDER BY project_count DESC, s.name",
    )
    .fetch_all(pool)
    .await
}

pub async fn search(pool: &PgPool, query: &str) -> Result<Vec<Skill>, sqlx::Error> {
    sqlx::query_as::<_, Skill>("SELECT id, name FROM skills WHERE name ILIKE $1 ORDER BY name")
        .bind(contains_pattern(query))
        .fetch_all(pool)
        .await
}

/// Resolve each name to a skill, creating the missing ones, in input order.
/// Names must already be trimmed.
///
/// Missing names go in through one sorted `ON CONFLICT DO NOTHING` insert:
/// existing rows are never locked, and writers racing on the same new names
/// wait on them in the same order.
pub async fn get_or_create_all(
    conn: &mut PgConnection,
    names: &[String],
) -> Result<Vec<Skill>, sqlx::Error> {
    if names.is_empty() {
        return Ok(Vec::new());
    }

    sqlx::query(
        "INSERT INTO skills (name)
         SELECT name FROM UNNEST($1::text[]) AS t(name) ORDER BY name
         ON CONFLICT (name) DO NOTHING",
    )
    .bind(names)
    .execute(&mut *conn)
    .await?;

    let found = sqlx::query_as::<_, Skill>("SELECT id, name FROM skills WHERE name = ANY($1)")
        .bind(names)
        .fetch_all(&mut *conn)
        .await?;

    let mut by_name: HashMap<String, Skill> =
        found.into_iter().map(|s| (s.name.clone(), s)).collect();
    Ok(names.iter().filter_map(|name| by_name.remove(name)).collect())
}

pub async fn for_profile<'e, E: sqlx::PgExecutor<'e>>(
    executor: E,
    profile_id: i64,
) -> Result<Vec<Skill>, sqlx::Error> {
    sqlx::query_as::<_, Skill>(
        "SELECT s.id, s.name FROM skills s
         JOIN profile_skills ps ON ps.skill_id = s.id
         WHERE ps.profile_id = $1
         ORDER BY s.name",
    )
    .bind(profile_id)
    .fetch_all(executor)
    .await
}

/// Skills of several projects at once, keyed by project id.
pub async fn for_projects<'e, E: sqlx::PgExecutor<'e>>(
    executor: E,
    project_ids: &[i64],
) -> Result<HashMap<i64, Vec<Skill>>, sqlx::Error> {
    let rows: Vec<(i64, i64, String)> = sqlx::query_as(
        "SELECT ps.project_id, s.id, s.name FROM project_skills ps
         JOIN skills s ON s.id = ps.skill_id
         WHERE ps.project_id = ANY($1)
         ORDER BY s.name",
    )
    .bind(project_ids)
    .fetch_all(executor)
    .await?;

    let mut by_project: HashMap<i64, Vec<Skill>> = HashMap::new();
    for (project_id, id, name) in rows {
        by_project
            .entry(project_id)
            .or_default()
            .push(Skill { id, name });
    }
    Ok(by_project)
}
