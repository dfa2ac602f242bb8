//! Rig Tests
//!
//! Tests for:
//! - Transform dirty checking
//! - Rig hierarchy: traversal order, world matrix propagation, name lookup
//! - Skeleton: joint matrices and CPU skinning
//! - clone_rig: bone order, shared bind data, independent poses

use std::sync::Arc;

use glam::{Affine3A, Mat4, Quat, Vec3};

use myth_agents::animation::{
    AnimationClip, AnimationMixer, InterpolationMode, KeyframeTrack, TargetPath, Track, TrackData,
    TrackMeta,
};
use myth_agents::errors::AgentError;
use myth_agents::rig::{Geometry, NodeHandle, Rig, RigNode, Transform, clone_rig};

const EPSILON: f32 = 1e-4;

fn approx_vec3(a: Vec3, b: Vec3) -> bool {
    a.abs_diff_eq(b, EPSILON)
}

fn rest_positions() -> Vec<Vec3> {
    vec![
        Vec3::new(0.5, 0.0, 0.0),
        Vec3::new(0.5, 1.0, 0.0),
        Vec3::new(0.5, 2.0, 0.0),
    ]
}

/// root -> spine -> head, one vertex rigidly bound to each bone.
fn humanoid() -> (Rig, NodeHandle) {
    let mut rig = Rig::new();
    let root = rig.add_node(RigNode::bone("root"));
    let spine = rig.add_child(
        root,
        RigNode::bone("spine").with_transform(Transform::from_position(Vec3::Y)),
    );
    let head = rig.add_child(
        spine,
        RigNode::bone("head").with_transform(Transform::from_position(Vec3::Y)),
    );

    let geometry = Arc::new(Geometry::rigid(rest_positions(), &[0, 1, 2]));
    let mesh = rig.add_node(RigNode::skinned_mesh("body", geometry));

    let skeleton = rig.add_skeleton_from_pose("body", vec![root, spine, head]);
    rig.bind_skin(mesh, skeleton, Affine3A::IDENTITY);
    rig.update(&Affine3A::IDENTITY);
    (rig, mesh)
}

fn bone_names(rig: &Rig, mesh: NodeHandle) -> Vec<String> {
    let skeleton = rig.skeleton_of(mesh).unwrap();
    skeleton
        .bones
        .iter()
        .map(|&b| rig.node(b).unwrap().name.clone())
        .collect()
}

fn spine_sway_clip() -> Arc<AnimationClip> {
    Arc::new(AnimationClip::new(
        "sway".to_string(),
        vec![Track {
            meta: TrackMeta {
                node_name: "spine".to_string(),
                target: TargetPath::Rotation,
            },
            data: TrackData::Quaternion(KeyframeTrack::new(
                vec![0.0, 1.0],
                vec![Quat::IDENTITY, Quat::from_rotation_z(1.0)],
                InterpolationMode::Linear,
            )),
        }],
    ))
}

// ============================================================================
// Transform
// ============================================================================

#[test]
fn transform_update_local_matrix_dirty_check() {
    let mut t = Transform::new();

    // First call always rebuilds
    assert!(t.update_local_matrix());
    assert!(!t.update_local_matrix());

    t.position = Vec3::new(1.0, 2.0, 3.0);
    assert!(t.update_local_matrix());
    assert!(!t.update_local_matrix());

    t.rotation = Quat::from_rotation_y(1.0);
    assert!(t.update_local_matrix());

    t.mark_dirty();
    assert!(t.update_local_matrix());
    assert!(approx_vec3(Vec3::from(t.local_matrix().translation), Vec3::new(1.0, 2.0, 3.0)));
}

// ============================================================================
// Hierarchy
// ============================================================================

#[test]
fn traverse_is_depth_first_preorder() {
    let (rig, _) = humanoid();
    let names: Vec<&str> = rig
        .traverse()
        .into_iter()
        .map(|h| rig.node(h).unwrap().name.as_str())
        .collect();
    assert_eq!(names, ["root", "spine", "head", "body"]);
}

#[test]
fn world_matrices_accumulate_down_the_chain() {
    let (mut rig, _) = humanoid();
    rig.update(&Affine3A::from_translation(Vec3::new(5.0, 0.0, 0.0)));

    let head = rig.find_node("head").unwrap();
    let world = rig.node(head).unwrap().world_matrix().translation;
    assert!(approx_vec3(Vec3::from(world), Vec3::new(5.0, 2.0, 0.0)), "got {world}");
}

#[test]
fn add_child_with_unknown_parent_falls_back_to_root() {
    let (source, _) = humanoid();
    let foreign = source.find_node("spine").unwrap();

    let mut rig = Rig::new();
    let node = rig.add_child(foreign, RigNode::group("orphan"));
    assert!(rig.roots().contains(&node));
    assert_eq!(rig.traverse(), [node]);
}

#[test]
fn skinned_mesh_nodes_expose_their_geometry() {
    let (rig, mesh) = humanoid();

    let body = rig.node(mesh).unwrap().as_skinned_mesh().unwrap();
    assert_eq!(body.geometry.positions.len(), 3);
    assert!(body.skin.is_some());

    let root = rig.find_node("root").unwrap();
    assert!(rig.node(root).unwrap().as_skinned_mesh().is_none());
    assert_eq!(rig.skinned_meshes_by_name().len(), 1);
}

// ============================================================================
// Skinning
// ============================================================================

#[test]
fn bind_pose_joint_matrices_are_identity() {
    let (rig, mesh) = humanoid();
    for joint in rig.skeleton_of(mesh).unwrap().joint_matrices() {
        assert!(joint.abs_diff_eq(Mat4::IDENTITY, EPSILON), "got {joint}");
    }
}

#[test]
fn bind_pose_skinning_returns_rest_positions() {
    let (rig, mesh) = humanoid();
    let skinned = rig.skinned_positions(mesh).unwrap();
    for (a, b) in skinned.iter().zip(rest_positions()) {
        assert!(approx_vec3(*a, b), "{a} != {b}");
    }
}

#[test]
fn posed_bone_moves_its_vertices_and_descendants() {
    let (mut rig, mesh) = humanoid();
    let spine = rig.find_node("spine").unwrap();
    rig.node_mut(spine).unwrap().transform.position = Vec3::new(1.0, 1.0, 0.0);
    rig.update(&Affine3A::IDENTITY);

    let skinned = rig.skinned_positions(mesh).unwrap();
    assert!(approx_vec3(skinned[0], Vec3::new(0.5, 0.0, 0.0)));
    assert!(approx_vec3(skinned[1], Vec3::new(1.5, 1.0, 0.0)));
    assert!(approx_vec3(skinned[2], Vec3::new(1.5, 2.0, 0.0)));
}

#[test]
fn skinning_is_relative_to_the_mesh() {
    let (mut rig, mesh) = humanoid();
    rig.update(&Affine3A::from_rotation_translation(
        Quat::from_rotation_y(1.0),
        Vec3::new(3.0, 0.0, -2.0),
    ));

    let skinned = rig.skinned_positions(mesh).unwrap();
    for (a, b) in skinned.iter().zip(rest_positions()) {
        assert!(approx_vec3(*a, b), "{a} != {b}");
    }
}

// ============================================================================
// Cloning
// ============================================================================

#[test]
fn clone_keeps_source_bone_order() {
    // Scene-graph order head, root, spine; skeleton order root, spine, head.
    let mut rig = Rig::new();
    let head = rig.add_node(RigNode::bone("head"));
    let root = rig.add_node(RigNode::bone("root"));
    let spine = rig.add_child(root, RigNode::bone("spine"));
    let geometry = Arc::new(Geometry::rigid(rest_positions(), &[0, 1, 2]));
    let mesh = rig.add_node(RigNode::skinned_mesh("body", geometry));
    let skeleton = rig.add_skeleton_from_pose("body", vec![root, spine, head]);
    rig.bind_skin(mesh, skeleton, Affine3A::IDENTITY);

    let clone = clone_rig(&rig).unwrap();
    let clone_mesh = clone.find_node("body").unwrap();

    let traversal: Vec<&str> = clone
        .traverse()
        .into_iter()
        .filter(|&h| clone.node(h).unwrap().is_bone())
        .map(|h| clone.node(h).unwrap().name.as_str())
        .collect();
    assert_eq!(traversal, ["head", "root", "spine"]);
    assert_eq!(bone_names(&clone, clone_mesh), ["root", "spine", "head"]);
}

#[test]
fn clone_shares_inverse_bind_matrices() {
    let (rig, mesh) = humanoid();
    let clone = clone_rig(&rig).unwrap();
    let clone_mesh = clone.find_node("body").unwrap();

    let source_ibm = rig.skeleton_of(mesh).unwrap().inverse_bind_matrices();
    let clone_ibm = clone.skeleton_of(clone_mesh).unwrap().inverse_bind_matrices();
    assert!(Arc::ptr_eq(source_ibm, clone_ibm));
    assert!(Arc::ptr_eq(
        rig.geometry_of(mesh).unwrap(),
        clone.geometry_of(clone_mesh).unwrap()
    ));
}

#[test]
fn clone_pose_is_independent_of_source() {
    let (rig, mesh) = humanoid();
    let mut clone = clone_rig(&rig).unwrap();

    let spine = clone.find_node("spine").unwrap();
    clone.node_mut(spine).unwrap().transform.position = Vec3::new(1.0, 1.0, 0.0);
    clone.update(&Affine3A::IDENTITY);

    let clone_mesh = clone.find_node("body").unwrap();
    let moved = clone.skinned_positions(clone_mesh).unwrap();
    let untouched = rig.skinned_positions(mesh).unwrap();

    assert!(approx_vec3(moved[1], Vec3::new(1.5, 1.0, 0.0)));
    assert!(approx_vec3(untouched[1], Vec3::new(0.5, 1.0, 0.0)));
}

#[test]
fn clone_bind_pose_matches_source() {
    let (rig, _) = humanoid();
    let clone = clone_rig(&rig).unwrap();
    let clone_mesh = clone.find_node("body").unwrap();

    let skinned = clone.skinned_positions(clone_mesh).unwrap();
    for (a, b) in skinned.iter().zip(rest_positions()) {
        assert!(approx_vec3(*a, b), "{a} != {b}");
    }
}

#[test]
fn clones_driven_by_one_clip_stay_in_step() {
    let (rig, mesh) = humanoid();
    let clip = spine_sway_clip();

    let mut clones: Vec<(Rig, AnimationMixer)> = (0..3)
        .map(|_| (clone_rig(&rig).unwrap(), AnimationMixer::new()))
        .collect();

    for (clone, mixer) in &mut clones {
        let key = mixer.clip_action(&clip, clone);
        mixer.action_mut(key).unwrap().play();
    }
    for _ in 0..5 {
        for (clone, mixer) in &mut clones {
            mixer.update(0.1, clone);
            clone.update(&Affine3A::IDENTITY);
        }
    }

    let joints: Vec<Vec<Mat4>> = clones
        .iter()
        .map(|(clone, _)| {
            let m = clone.find_node("body").unwrap();
            clone.skeleton_of(m).unwrap().joint_matrices().to_vec()
        })
        .collect();

    assert!(!joints[0][1].abs_diff_eq(Mat4::IDENTITY, EPSILON), "spine is posed");
    for other in &joints[1..] {
        for (a, b) in joints[0].iter().zip(other) {
            assert!(a.abs_diff_eq(*b, EPSILON));
        }
    }

    // The source rig never moved.
    let source_spine = rig.skeleton_of(mesh).unwrap().joint_matrices()[1];
    assert!(source_spine.abs_diff_eq(Mat4::IDENTITY, EPSILON));
}

#[test]
fn clone_reports_missing_bone() {
    let mut rig = Rig::new();
    let root = rig.add_node(RigNode::bone("root"));
    // A non-bone node in the skeleton cannot be matched by name.
    let socket = rig.add_child(root, RigNode::group("socket"));
    let geometry = Arc::new(Geometry::rigid(vec![Vec3::ZERO, Vec3::Y], &[0, 1]));
    let mesh = rig.add_node(RigNode::skinned_mesh("body", geometry));
    let skeleton = rig.add_skeleton_from_pose("body", vec![root, socket]);
    rig.bind_skin(mesh, skeleton, Affine3A::IDENTITY);

    let err = clone_rig(&rig).unwrap_err();
    assert!(matches!(
        err,
        AgentError::MissingBone { ref mesh, ref bone } if mesh == "body" && bone == "socket"
    ));
}

#[test]
fn clone_of_unskinned_rig_copies_hierarchy() {
    let mut rig = Rig::new();
    let group = rig.add_node(RigNode::group("props"));
    rig.add_child(group, RigNode::group("lantern"));

    let clone = clone_rig(&rig).unwrap();
    assert_eq!(clone.node_count(), 2);
    assert_eq!(clone.skeleton_count(), 0);
    assert!(clone.find_node("lantern").is_some());
}
