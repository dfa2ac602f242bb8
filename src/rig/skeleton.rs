use std::sync::Arc;

use glam::{Affine3A, Mat4, Vec3};
use slotmap::SlotMap;

use crate::rig::NodeHandle;
use crate::rig::geometry::Geometry;
use crate::rig::node::RigNode;

#[derive(Debug, Clone)]
pub struct Skeleton {
    pub name: String,

    // Ordered bone list: bones[i] is joint index i in the skin weights.
    pub bones: Vec<NodeHandle>,

    // Pose-independent, so every clone of a rig points at the same slice.
    inverse_bind_matrices: Arc<[Affine3A]>,

    // Per-instance output, recomputed every frame.
    joint_matrices: Vec<Mat4>,
}

impl Skeleton {
    #[must_use]
    pub fn new(name: &str, bones: Vec<NodeHandle>, inverse_bind_matrices: Arc<[Affine3A]>) -> Self {
        debug_assert_eq!(bones.len(), inverse_bind_matrices.len());
        let count = bones.len();
        Self {
            name: name.to_string(),
            bones,
            inverse_bind_matrices,
            joint_matrices: vec![Mat4::IDENTITY; count],
        }
    }

    /// Builds the inverse bind matrices from the bones' current world matrices.
    #[must_use]
    pub fn from_current_pose(name: &str, bones: Vec<NodeHandle>, nodes: &SlotMap<NodeHandle, RigNode>) -> Self {
        let inverses: Arc<[Affine3A]> = bones
            .iter()
            .map(|&b| nodes.get(b).map_or(Affine3A::IDENTITY, |n| n.world_matrix().inverse()))
            .collect();
        Self::new(name, bones, inverses)
    }

    #[inline]
    #[must_use]
    pub fn inverse_bind_matrices(&self) -> &Arc<[Affine3A]> {
        &self.inverse_bind_matrices
    }

    #[inline]
    #[must_use]
    pub fn joint_matrices(&self) -> &[Mat4] {
        &self.joint_matrices
    }

    /// Updates joint matrices from the bones' world matrices.
    ///
    /// `root_matrix_inv` is the inverse world matrix of the skinned mesh,
    /// which brings the result back into mesh space.
    pub fn compute_joint_matrices(&mut self, nodes: &SlotMap<NodeHandle, RigNode>, root_matrix_inv: Affine3A) {
        for (i, &bone) in self.bones.iter().enumerate() {
            let Some(bone_node) = nodes.get(bone) else {
                continue;
            };
            let ibm = self.inverse_bind_matrices[i];
            self.joint_matrices[i] = (root_matrix_inv * *bone_node.world_matrix() * ibm).into();
        }
    }

    /// CPU skinning of `geometry` with the current joint matrices.
    #[must_use]
    pub fn skin_vertices(&self, geometry: &Geometry, bind_matrix: &Affine3A) -> Vec<Vec3> {
        geometry
            .positions
            .iter()
            .zip(geometry.joints.iter().zip(&geometry.weights))
            .map(|(&position, (joints, weights))| {
                let bound = bind_matrix.transform_point3(position);
                joints
                    .iter()
                    .zip(weights.to_array())
                    .filter(|(_, w)| *w > 0.0)
                    .map(|(&j, w)| {
                        self.joint_matrices
                            .get(usize::from(j))
                            .map_or(Vec3::ZERO, |m| m.transform_point3(bound) * w)
                    })
                    .sum()
            })
            .collect()
    }
}
