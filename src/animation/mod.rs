//! Animation: keyframe clips, per-rig mixers and the per-agent action state.

mod values;
pub mod action;
pub mod action_id;
pub mod binder;
pub mod binding;
pub mod clip;
pub mod mixer;
pub mod registry;
pub mod state;
pub mod tracks;

pub use action::{AnimationAction, LoopMode, TrackValue};
pub use action_id::ActionId;
pub use binder::Binder;
pub use binding::{PropertyBinding, TargetPath};
pub use clip::{AnimationClip, DEFAULT_FPS, Track, TrackData, TrackMeta};
pub use mixer::{ActionKey, AnimationMixer};
pub use registry::{ClipRegistry, SubclipSpec};
pub use state::{ACTION_FADE_IN, ActionState};
pub use tracks::{InterpolationMode, KeyframeCursor, KeyframeTrack};
pub use values::Interpolatable;
