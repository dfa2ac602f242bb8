//! Navigation: waypoint following on top of an external navmesh service.

pub mod navmesh;
pub mod path;
pub mod steering;
pub mod trace;
pub mod wander;

pub use navmesh::{GroupId, NavMesh, NavZone};
pub use path::{PathFollower, PathRequest, StepOutcome};
pub use trace::PathTrace;
pub use wander::{Autonomy, DEFAULT_WANDER_SEED, Wanderer};
