use sqlx::PgPool;

use crate::db::contains_pattern;
use crate::models::{NewProject, Project, ProjectChanges};

pub async fn list(pool: &PgPool) -> Result<Vec<Project>, sqlx::Error> {
    sqlx::query_as::<_, Project>("SELECT * FROM projects ORDER BY id DESC")
        .fetch_all(pool)
        .await
}

/// Projects linked to a skill whose name equals `skill_name`, ignoring case.
/// Exact match only: "script" does not select a project tagged "JavaScript".
pub async fn list_by_skill(pool: &PgPool, skill_name: &str) -> Result<Vec<Project>, sqlx::Error> {
    sqlx::query_as::<_, Project>(
        "SELECT p.* FROM projects p
         WHERE EXISTS (
             SELECT 1 FROM project_skills ps
             JOIN skills s ON s.id = ps.skill_id
             WHERE ps.project_id = p.id AND lower(s.name) = lower($1)
         )
         ORDER BY p.id DESC",
    )
    .bind(skill_name)
    .fetch_all(pool)
    .await
}

pub async fn find_by_id(pool: &PgPool, id: i64) -> Result<Option<Project>, sqlx::Error> {
    sqlx::query_as::<_, Project>("SELECT * FROM projects WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await
}

pub async fn search(pool: &PgPool, query: &str) -> Result<Vec<Project>, sqlx::Error> {
    sqlx::query_as::<_, Project>("SELECT * FROM projects WHERE title ILIKE $1 ORDER BY id DESC")
        .bind(contains_pattern(query))
        .fetch_all(pool)
        .await
}

pub async fn for_profile<'e, E: sqlx::PgExecutor<'e>>(
    executor: E,
    profile_id: i64,
) -> Result<Vec<Project>, sqlx::Error> {
    sqlx::query_as::<_, Project>(
        "SELECT p.* FROM projects p
         JOIN profile_projects pp ON pp.project_id = p.id
         WHERE pp.profile_id = $1
         ORDER BY p.id DESC",
    )
    .bind(profile_id)
    .fetch_all(executor)
    .await
}

pub async fn create<'e, E: sqlx::PgExecutor<'e>>(
    executor: E,
    project: &NewProject,
) -> Result<Project, sqlx::Error> {
    sqlx::query_as::<_, Project>(
        "INSERT INTO projects (title, description, links) VALUES ($1, $2, $3) RETURNING *",
    )
    .bind(&project.title)
    .bind(&project.description)
    .bind(&project.links)
    .fetch_one(executor)
    .await
}

/// Apply the scalar part of `changes`; absent fields keep their stored value.
pub async fn update<'e, E: sqlx::PgExecutor<'e>>(
    executor: E,
    id: i64,
    changes: &ProjectChanges,
) -> Result<Project, sqlx::Error> {
    sqlx::query_as::<_, Project>(
        "UPDATE projects SET
             title = COALESCE($2, title),
             description = COALESCE($3, description),
             links = COALESCE($4, links),
             updated_at = now()
         WHERE id = $1 RETURNING *",
    )
    .bind(id)
    .bind(changes.title.as_deref())
    .bind(changes.description.as_deref())
    .bind(changes.links.as_ref())
    .fetch_one(executor)
    .await
}

/// Make the project's skill set exactly `skill_ids`.
pub async fn set_skills(
    conn: &mut sqlx::PgConnection,
    project_id: i64,
    skill_ids: &[i64],
) -> Result<(), sqlx::Error> {
    sqlx::query("DELETE FROM project_skills WHERE project_id = $1")
        .bind(project_id)
        .execute(&mut *conn)
        .await?;

    sqlx::query(
        "INSERT INTO project_skills (project_id, skill_id)
         SELECT $1, UNNEST($2::bigint[])
         ON CONFLICT DO NOTHING",
    )
    .bind(project_id)
    .bind(skill_ids)
    .execute(&mut *conn)
    .await?;
    Ok(())
}
