pub mod payload;
pub mod profile;
pub mod project;
pub mod search;
pub mod skill;

pub use payload::{
    NewProfile, NewProject, ProfileChanges, ProfilePayload, ProjectChanges, ProjectPayload,
    Relation,
};
pub use profile::{Profile, ProfileDetail};
pub use project::{Project, ProjectDetail};
pub use search::{ProfileHit, ProjectHit, SearchResponse, SearchResults};
pub use skill::{Skill, SkillWithCount};
