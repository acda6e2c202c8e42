pub mod profile;
pub mod projects;
pub mod search;
pub mod skills;

use axum::Router;
use axum::routing::get;

use crate::state::SharedState;

pub fn api_routes() -> Router<SharedState> {
    Router::new()
        // Profile
        .route(
            "/api/profile",
            get(profile::get).post(profile::create).put(profile::update),
        )
        // Projects
        .route("/api/projects", get(projects::list).post(projects::create))
        .route(
            "/api/projects/{id}",
            get(projects::get).put(projects::update),
        )
        // Skills
        .route("/api/skills", get(skills::list))
        .route("/api/skills/top", get(skills::top))
        // Search
        .route("/api/search", get(search::search))
}
