use std::sync::Arc;

use glam::{Affine3A, Vec3};
use rustc_hash::FxHashMap;
use slotmap::SlotMap;

use crate::rig::geometry::Geometry;
use crate::rig::node::{NodeKind, RigNode, SkinBinding};
use crate::rig::skeleton::Skeleton;
use crate::rig::{NodeHandle, SkeletonKey};

/// A skinned character: node hierarchy plus skeletons.
#[derive(Debug, Clone, Default)]
pub struct Rig {
    pub(crate) nodes: SlotMap<NodeHandle, RigNode>,
    pub(crate) roots: Vec<NodeHandle>,
    pub(crate) skeletons: SlotMap<SkeletonKey, Skeleton>,
}

impl Rig {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a node at the root level.
    pub fn add_node(&mut self, node: RigNode) -> NodeHandle {
        let handle = self.nodes.insert(node);
        self.roots.push(handle);
        handle
    }

    /// Adds a node under `parent`; falls back to the root level if `parent`
    /// is not part of this rig.
    pub fn add_child(&mut self, parent: NodeHandle, node: RigNode) -> NodeHandle {
        if !self.nodes.contains_key(parent) {
            log::warn!("Parent of '{}' not found, adding at root", node.name);
            return self.add_node(node);
        }
        let handle = self.nodes.insert(node);
        if let Some(p) = self.nodes.get_mut(parent) {
            p.children.push(handle);
        }
        handle
    }

    #[inline]
    #[must_use]
    pub fn node(&self, handle: NodeHandle) -> Option<&RigNode> {
        self.nodes.get(handle)
    }

    #[inline]
    pub fn node_mut(&mut self, handle: NodeHandle) -> Option<&mut RigNode> {
        self.nodes.get_mut(handle)
    }

    #[inline]
    #[must_use]
    pub fn roots(&self) -> &[NodeHandle] {
        &self.roots
    }

    #[inline]
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Depth-first, pre-order walk over the hierarchy.
    #[must_use]
    pub fn traverse(&self) -> Vec<NodeHandle> {
        let mut order = Vec::with_capacity(self.nodes.len());
        let mut stack: Vec<NodeHandle> = self.roots.iter().rev().copied().collect();
        while let Some(handle) = stack.pop() {
            let Some(node) = self.nodes.get(handle) else {
                continue;
            };
            order.push(handle);
            stack.extend(node.children.iter().rev().copied());
        }
        order
    }

    /// First node named `name` in traversal order.
    #[must_use]
    pub fn find_node(&self, name: &str) -> Option<NodeHandle> {
        self.traverse()
            .into_iter()
            .find(|&h| self.nodes.get(h).is_some_and(|n| n.name == name))
    }

    /// Bone nodes indexed by name.
    #[must_use]
    pub fn bones_by_name(&self) -> FxHashMap<String, NodeHandle> {
        self.index_by_name(RigNode::is_bone)
    }

    /// Skinned mesh nodes indexed by name.
    #[must_use]
    pub fn skinned_meshes_by_name(&self) -> FxHashMap<String, NodeHandle> {
        self.index_by_name(|n| n.as_skinned_mesh().is_some())
    }

    fn index_by_name(&self, filter: impl Fn(&RigNode) -> bool) -> FxHashMap<String, NodeHandle> {
        self.traverse()
            .into_iter()
            .filter_map(|h| {
                let node = self.nodes.get(h)?;
                filter(node).then(|| (node.name.clone(), h))
            })
            .collect()
    }

    pub fn add_skeleton(&mut self, skeleton: Skeleton) -> SkeletonKey {
        self.skeletons.insert(skeleton)
    }

    /// Builds a skeleton whose inverse bind matrices capture the bones'
    /// current rest pose.
    pub fn add_skeleton_from_pose(&mut self, name: &str, bones: Vec<NodeHandle>) -> SkeletonKey {
        self.update_world_matrices(&Affine3A::IDENTITY);
        let skeleton = Skeleton::from_current_pose(name, bones, &self.nodes);
        self.add_skeleton(skeleton)
    }

    #[inline]
    #[must_use]
    pub fn skeleton_count(&self) -> usize {
        self.skeletons.len()
    }

    #[inline]
    #[must_use]
    pub fn skeleton(&self, key: SkeletonKey) -> Option<&Skeleton> {
        self.skeletons.get(key)
    }

    /// Skin binding of a skinned mesh node, if it has been bound.
    #[must_use]
    pub fn skin_of(&self, mesh: NodeHandle) -> Option<SkinBinding> {
        self.nodes.get(mesh)?.as_skinned_mesh()?.skin
    }

    /// Skeleton driving a skinned mesh node.
    #[must_use]
    pub fn skeleton_of(&self, mesh: NodeHandle) -> Option<&Skeleton> {
        self.skeletons.get(self.skin_of(mesh)?.skeleton)
    }

    /// Attaches `skeleton` to a skinned mesh node. Returns `false` if the
    /// node is not a skinned mesh.
    pub fn bind_skin(&mut self, mesh: NodeHandle, skeleton: SkeletonKey, bind_matrix: Affine3A) -> bool {
        match self.nodes.get_mut(mesh).map(|n| &mut n.kind) {
            Some(NodeKind::SkinnedMesh(skinned)) => {
                skinned.skin = Some(SkinBinding {
                    skeleton,
                    bind_matrix,
                });
                true
            }
            _ => false,
        }
    }

    /// Copies the node hierarchy into a fresh rig.
    ///
    /// Geometry is shared; skeletons are not copied and the copied meshes
    /// come out unbound. Handles in the copy are unrelated to the source's.
    #[must_use]
    pub fn copy_hierarchy(&self) -> Rig {
        let mut copy = Rig::new();
        let mut stack: Vec<(NodeHandle, Option<NodeHandle>)> =
            self.roots.iter().rev().map(|&h| (h, None)).collect();

        while let Some((handle, new_parent)) = stack.pop() {
            let Some(node) = self.nodes.get(handle) else {
                continue;
            };

            let mut fresh = RigNode::new(&node.name, node.kind.clone())
                .with_transform(node.transform.clone());
            if let NodeKind::SkinnedMesh(skinned) = &mut fresh.kind {
                skinned.skin = None;
            }

            let new_handle = match new_parent {
                Some(parent) => copy.add_child(parent, fresh),
                None => copy.add_node(fresh),
            };
            stack.extend(node.children.iter().rev().map(|&c| (c, Some(new_handle))));
        }

        copy
    }

    /// Propagates world matrices down from `parent`, the world transform of
    /// the object carrying the rig.
    pub fn update_world_matrices(&mut self, parent: &Affine3A) {
        let mut stack: Vec<(NodeHandle, Affine3A)> =
            self.roots.iter().map(|&h| (h, *parent)).collect();

        while let Some((handle, parent_world)) = stack.pop() {
            let Some(node) = self.nodes.get_mut(handle) else {
                continue;
            };
            node.transform.update_local_matrix();
            let world = parent_world * node.transform.local_matrix;
            node.transform.set_world_matrix(world);
            stack.extend(node.children.iter().map(|&c| (c, world)));
        }
    }

    /// Recomputes joint matrices of every bound skeleton.
    pub fn update_skeletons(&mut self) {
        let tasks: Vec<(SkeletonKey, Affine3A)> = self
            .nodes
            .values()
            .filter_map(|node| {
                let skin = node.as_skinned_mesh()?.skin?;
                Some((skin.skeleton, node.world_matrix().inverse()))
            })
            .collect();

        let nodes = &self.nodes;
        for (key, root_inv) in tasks {
            if let Some(skeleton) = self.skeletons.get_mut(key) {
                skeleton.compute_joint_matrices(nodes, root_inv);
            }
        }
    }

    /// World matrices, then joint matrices.
    pub fn update(&mut self, parent: &Affine3A) {
        self.update_world_matrices(parent);
        self.update_skeletons();
    }

    /// Deformed vertices of a bound skinned mesh.
    #[must_use]
    pub fn skinned_positions(&self, mesh: NodeHandle) -> Option<Vec<Vec3>> {
        let node = self.nodes.get(mesh)?;
        let skinned = node.as_skinned_mesh()?;
        let skin = skinned.skin?;
        let skeleton = self.skeletons.get(skin.skeleton)?;
        Some(skeleton.skin_vertices(&skinned.geometry, &skin.bind_matrix))
    }

    /// Geometry shared by a skinned mesh node.
    #[must_use]
    pub fn geometry_of(&self, mesh: NodeHandle) -> Option<&Arc<Geometry>> {
        Some(&self.nodes.get(mesh)?.as_skinned_mesh()?.geometry)
    }
}
