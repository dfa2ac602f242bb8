//! Skinned character rigs.
//!
//! - [`Rig`]: node hierarchy (groups, bones, skinned meshes) and skeletons
//! - [`Skeleton`]: ordered bones, shared inverse bind matrices, joint matrices
//! - [`clone_rig`]: cheap independent instances of a loaded rig

pub mod clone;
pub mod geometry;
pub mod graph;
pub mod node;
pub mod skeleton;
pub mod transform;

pub use clone::clone_rig;
pub use geometry::Geometry;
pub use graph::Rig;
pub use node::{NodeKind, RigNode, SkinBinding, SkinnedMesh};
pub use skeleton::Skeleton;
pub use transform::Transform;

use slotmap::new_key_type;

new_key_type! {
    pub struct NodeHandle;
    pub struct SkeletonKey;
}
