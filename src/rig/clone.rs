//! Rig instancing.
//!
//! Copies a loaded character so several agents can be animated
//! independently while sharing geometry, inverse bind matrices and clips.

use std::sync::Arc;

use glam::Affine3A;

use crate::errors::{AgentError, Result};
use crate::rig::graph::Rig;
use crate::rig::skeleton::Skeleton;

/// Produces an independent instance of `source`.
///
/// The hierarchy is copied, then every skinned mesh of the copy is rebound
/// to a new skeleton whose bone list follows the source skeleton's order.
/// Bones are matched by name: the copy's handles and traversal positions
/// carry no relation to the source's.
pub fn clone_rig(source: &Rig) -> Result<Rig> {
    let mut clone = source.copy_hierarchy();
    clone.update_world_matrices(&Affine3A::IDENTITY);

    let clone_bones = clone.bones_by_name();
    let clone_meshes = clone.skinned_meshes_by_name();

    for (mesh_name, source_mesh) in source.skinned_meshes_by_name() {
        let Some(skeleton) = source.skeleton_of(source_mesh) else {
            continue;
        };

        let ordered_bones = skeleton
            .bones
            .iter()
            .map(|&bone| {
                let bone_name = source.node(bone).map_or("", |n| n.name.as_str());
                clone_bones
                    .get(bone_name)
                    .copied()
                    .ok_or_else(|| AgentError::MissingBone {
                        mesh: mesh_name.clone(),
                        bone: bone_name.to_string(),
                    })
            })
            .collect::<Result<Vec<_>>>()?;

        let clone_mesh = *clone_meshes
            .get(&mesh_name)
            .ok_or_else(|| AgentError::MissingSkinnedMesh(mesh_name.clone()))?;

        let key = clone.add_skeleton(Skeleton::new(
            &skeleton.name,
            ordered_bones,
            Arc::clone(skeleton.inverse_bind_matrices()),
        ));
        let bind_matrix = clone
            .node(clone_mesh)
            .map_or(Affine3A::IDENTITY, |n| *n.world_matrix());
        clone.bind_skin(clone_mesh, key, bind_matrix);
    }

    clone.update_skeletons();
    log::info!(
        "Cloned rig: {} nodes, {} skeletons",
        clone.node_count(),
        clone.skeleton_count()
    );
    Ok(clone)
}
