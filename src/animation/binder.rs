use crate::animation::binding::PropertyBinding;
use crate::animation::clip::AnimationClip;
use crate::rig::Rig;

pub struct Binder;

impl Binder {
    /// Resolves every track of `clip` to a node of `rig` by name.
    ///
    /// Tracks naming nodes the rig does not have are skipped.
    #[must_use]
    pub fn bind(rig: &Rig, clip: &AnimationClip) -> Vec<PropertyBinding> {
        clip.tracks
            .iter()
            .enumerate()
            .filter_map(|(track_index, track)| {
                let node = rig.find_node(&track.meta.node_name)?;
                Some(PropertyBinding {
                    track_index,
                    node,
                    target: track.meta.target,
                })
            })
            .collect()
    }
}
