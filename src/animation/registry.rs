use std::sync::Arc;

use rustc_hash::FxHashMap;
use serde::Deserialize;

use crate::animation::action_id::ActionId;
use crate::animation::clip::AnimationClip;
use crate::errors::Result;

/// One logical action cut out of a shared source timeline.
#[derive(Debug, Clone, Deserialize)]
pub struct SubclipSpec {
    pub name: String,
    /// First frame (inclusive).
    pub start: u32,
    /// Last frame (exclusive).
    pub end: u32,
    #[serde(rename = "loop", default)]
    pub looping: bool,
}

impl SubclipSpec {
    #[must_use]
    pub fn new(name: &str, start: u32, end: u32, looping: bool) -> Self {
        Self {
            name: name.to_string(),
            start,
            end,
            looping,
        }
    }
}

/// Named clips available to one agent type.
///
/// Built once when the agent type is registered and shared read-only by
/// every agent of that type.
#[derive(Debug, Default, Clone)]
pub struct ClipRegistry {
    clips: FxHashMap<ActionId, Arc<AnimationClip>>,
}

impl ClipRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Cropped mode: slices `source` into one clip per descriptor.
    ///
    /// Ranges may overlap. A later descriptor with the same (normalized)
    /// name replaces an earlier one.
    pub fn from_subclips(source: &AnimationClip, specs: &[SubclipSpec], fps: f32) -> Result<Self> {
        let mut registry = Self::new();
        for spec in specs {
            let clip = source.subclip(&spec.name, spec.start, spec.end, fps, spec.looping)?;
            registry.insert(clip);
        }
        log::debug!(
            "Cropped {} clips from '{}' at {fps} fps",
            registry.len(),
            source.name
        );
        Ok(registry)
    }

    /// Pre-split mode: registers each clip under its own name.
    #[must_use]
    pub fn from_clips(clips: impl IntoIterator<Item = AnimationClip>) -> Self {
        let mut registry = Self::new();
        for clip in clips {
            registry.insert(clip);
        }
        registry
    }

    /// Registers `clip` under its normalized name.
    pub fn insert(&mut self, clip: AnimationClip) -> ActionId {
        let id = ActionId::from_name(&clip.name);
        if self.clips.insert(id, Arc::new(clip)).is_some() {
            log::debug!("Clip '{id}' replaced");
        }
        id
    }

    #[must_use]
    pub fn get(&self, id: ActionId) -> Option<&Arc<AnimationClip>> {
        self.clips.get(&id)
    }

    #[must_use]
    pub fn contains(&self, id: ActionId) -> bool {
        self.clips.contains_key(&id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.clips.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.clips.is_empty()
    }
}
