mod entity;
mod error;
mod event;
mod group;
mod skills;
mod user;

pub use entity::{is_empty_id, Entity, EntityKind, EMPTY_ID};
pub use error::ModelError;
pub use event::{Event, EventDetails};
pub use group::{Group, GroupDetails, GroupType, NewGroup};
pub use skills::{Skill, SkillSet};
pub use user::{GroupAssignment, User, UserDetails};
