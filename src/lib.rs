#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::too_many_arguments)]

pub mod agent;
pub mod animation;
pub mod clock;
pub mod config;
pub mod errors;
pub mod navigation;
pub mod rig;
pub mod world;

pub use agent::{Agent, AgentContext, AgentType, ClipSource};
pub use animation::{
    ActionId, ActionState, AnimationAction, AnimationClip, AnimationMixer, ClipRegistry, LoopMode,
    SubclipSpec,
};
pub use clock::{FrameClock, MAX_FRAME_DT};
pub use config::{AgentConfig, DebugSettings, SceneConfig};
pub use errors::{AgentError, Result};
pub use navigation::{GroupId, NavMesh, NavZone, PathRequest, PathTrace, Wanderer};
pub use rig::{Rig, RigNode, Skeleton, Transform, clone_rig};
pub use world::World;
