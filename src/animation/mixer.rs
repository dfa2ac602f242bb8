use std::sync::Arc;

use rustc_hash::FxHashMap;
use slotmap::{SlotMap, new_key_type};

use crate::animation::action::{AnimationAction, TrackValue};
use crate::animation::binder::Binder;
use crate::animation::binding::TargetPath;
use crate::animation::clip::AnimationClip;
use crate::rig::Rig;

new_key_type! {
    pub struct ActionKey;
}

/// Plays actions on exactly one rig.
///
/// Each agent owns its own mixer, so the per-action time and keyframe
/// cursors are per-instance while the clips themselves stay shared.
#[derive(Debug, Default)]
pub struct AnimationMixer {
    actions: SlotMap<ActionKey, AnimationAction>,
    by_clip: FxHashMap<String, ActionKey>,
    /// Seconds accumulated through `update`.
    time: f64,
}

impl AnimationMixer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the cached action for `clip`, creating and binding it to
    /// `rig` on first use.
    pub fn clip_action(&mut self, clip: &Arc<AnimationClip>, rig: &Rig) -> ActionKey {
        if let Some(&key) = self.by_clip.get(&clip.name) {
            return key;
        }

        let mut action = AnimationAction::new(Arc::clone(clip));
        action.bindings = Binder::bind(rig, clip);
        if action.bindings.len() < clip.tracks.len() {
            log::debug!(
                "Clip '{}': {} of {} tracks bound",
                clip.name,
                action.bindings.len(),
                clip.tracks.len()
            );
        }

        let key = self.actions.insert(action);
        self.by_clip.insert(clip.name.clone(), key);
        key
    }

    #[must_use]
    pub fn action(&self, key: ActionKey) -> Option<&AnimationAction> {
        self.actions.get(key)
    }

    pub fn action_mut(&mut self, key: ActionKey) -> Option<&mut AnimationAction> {
        self.actions.get_mut(key)
    }

    pub fn stop_all_actions(&mut self) {
        for action in self.actions.values_mut() {
            action.stop();
        }
    }

    /// Number of actions currently enabled.
    #[must_use]
    pub fn active_count(&self) -> usize {
        self.actions.values().filter(|a| a.enabled).count()
    }

    #[inline]
    #[must_use]
    pub fn time(&self) -> f64 {
        self.time
    }

    /// Advances every action and writes the sampled values into `rig`.
    ///
    /// While an action fades in, values are blended from the rig's current
    /// pose by the action weight.
    pub fn update(&mut self, dt: f32, rig: &mut Rig) {
        self.time += f64::from(dt);

        for action in self.actions.values_mut() {
            action.update(dt);

            if !action.enabled || action.weight <= 0.0 {
                continue;
            }
            let weight = action.weight;

            for i in 0..action.bindings.len() {
                let binding = action.bindings[i];
                let Some(value) = action.sample_track(binding.track_index) else {
                    continue;
                };
                let Some(node) = rig.node_mut(binding.node) else {
                    continue;
                };
                let transform = &mut node.transform;

                match (value, binding.target) {
                    (TrackValue::Vector3(v), TargetPath::Translation) => {
                        transform.position = transform.position.lerp(v, weight);
                    }
                    (TrackValue::Vector3(v), TargetPath::Scale) => {
                        transform.scale = transform.scale.lerp(v, weight);
                    }
                    (TrackValue::Quaternion(q), TargetPath::Rotation) => {
                        transform.rotation = transform.rotation.slerp(q, weight);
                    }
                    _ => {}
                }
            }
        }
    }
}
