use std::sync::Arc;

use glam::Affine3A;

use crate::rig::geometry::Geometry;
use crate::rig::transform::Transform;
use crate::rig::{NodeHandle, SkeletonKey};

/// Skin attachment of a mesh node.
#[derive(Debug, Clone, Copy)]
pub struct SkinBinding {
    pub skeleton: SkeletonKey,
    /// World matrix of the mesh at bind time.
    pub bind_matrix: Affine3A,
}

#[derive(Debug, Clone)]
pub struct SkinnedMesh {
    pub geometry: Arc<Geometry>,
    pub skin: Option<SkinBinding>,
}

#[derive(Debug, Clone)]
pub enum NodeKind {
    Group,
    Bone,
    SkinnedMesh(SkinnedMesh),
}

/// A node of a character rig.
#[derive(Debug, Clone)]
pub struct RigNode {
    pub name: String,
    pub(crate) children: Vec<NodeHandle>,
    pub transform: Transform,
    pub kind: NodeKind,
}

impl RigNode {
    #[must_use]
    pub fn new(name: &str, kind: NodeKind) -> Self {
        Self {
            name: name.to_string(),
            children: Vec::new(),
            transform: Transform::new(),
            kind,
        }
    }

    #[must_use]
    pub fn group(name: &str) -> Self {
        Self::new(name, NodeKind::Group)
    }

    #[must_use]
    pub fn bone(name: &str) -> Self {
        Self::new(name, NodeKind::Bone)
    }

    #[must_use]
    pub fn skinned_mesh(name: &str, geometry: Arc<Geometry>) -> Self {
        Self::new(name, NodeKind::SkinnedMesh(SkinnedMesh { geometry, skin: None }))
    }

    #[must_use]
    pub fn with_transform(mut self, transform: Transform) -> Self {
        self.transform = transform;
        self
    }

    #[inline]
    #[must_use]
    pub fn is_bone(&self) -> bool {
        matches!(self.kind, NodeKind::Bone)
    }

    #[inline]
    #[must_use]
    pub fn as_skinned_mesh(&self) -> Option<&SkinnedMesh> {
        match &self.kind {
            NodeKind::SkinnedMesh(mesh) => Some(mesh),
            _ => None,
        }
    }

    #[inline]
    #[must_use]
    pub fn world_matrix(&self) -> &Affine3A {
        &self.transform.world_matrix
    }
}
