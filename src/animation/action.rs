use std::sync::Arc;

use glam::{Quat, Vec3};
use smallvec::SmallVec;

use crate::animation::{
    binding::PropertyBinding,
    clip::{AnimationClip, TrackData},
    tracks::KeyframeCursor,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopMode {
    Once,
    Loop,
}

impl LoopMode {
    #[inline]
    #[must_use]
    pub fn for_clip(clip: &AnimationClip) -> Self {
        if clip.looping { LoopMode::Loop } else { LoopMode::Once }
    }
}

/// Linear weight ramp from 0 to 1.
#[derive(Debug, Clone, Copy)]
struct Fade {
    elapsed: f32,
    duration: f32,
}

/// A clip being played on one rig.
#[derive(Debug, Clone)]
pub struct AnimationAction {
    clip: Arc<AnimationClip>,

    pub time: f32,
    pub weight: f32,
    pub loop_mode: LoopMode,
    pub paused: bool,
    pub enabled: bool,

    pub bindings: Vec<PropertyBinding>,

    fade: Option<Fade>,
    pub(crate) track_cursors: SmallVec<[KeyframeCursor; 16]>,
}

impl AnimationAction {
    #[must_use]
    pub fn new(clip: Arc<AnimationClip>) -> Self {
        let track_count = clip.tracks.len();
        Self {
            loop_mode: LoopMode::for_clip(&clip),
            clip,
            time: 0.0,
            weight: 1.0,
            paused: false,
            // Created stopped; `play` enables it.
            enabled: false,
            bindings: Vec::new(),
            fade: None,
            track_cursors: SmallVec::from_elem(KeyframeCursor::default(), track_count),
        }
    }

    #[must_use]
    pub fn clip(&self) -> &Arc<AnimationClip> {
        &self.clip
    }

    /// Rewinds to time zero and starts playing.
    pub fn play(&mut self) {
        self.time = 0.0;
        self.enabled = true;
        self.paused = false;
        for cursor in &mut self.track_cursors {
            *cursor = KeyframeCursor::default();
        }
    }

    pub fn stop(&mut self) {
        self.enabled = false;
        self.fade = None;
        self.weight = 1.0;
    }

    /// Ramps the weight from zero to one over `duration` seconds.
    pub fn fade_in(&mut self, duration: f32) {
        if duration <= 0.0 {
            self.fade = None;
            self.weight = 1.0;
            return;
        }
        self.weight = 0.0;
        self.fade = Some(Fade { elapsed: 0.0, duration });
    }

    #[must_use]
    pub fn is_fading(&self) -> bool {
        self.fade.is_some()
    }

    /// Core logic: advance fade and time.
    ///
    /// The fade runs whenever the action is enabled, so a `Once` clip that
    /// ends before its fade-in still reaches full weight on its last pose.
    pub fn update(&mut self, dt: f32) {
        if !self.enabled {
            return;
        }

        if let Some(fade) = &mut self.fade {
            fade.elapsed += dt;
            self.weight = (fade.elapsed / fade.duration).min(1.0);
            if fade.elapsed >= fade.duration {
                self.fade = None;
            }
        }

        let duration = self.clip.duration;
        if self.paused || duration <= 0.0 {
            return;
        }

        self.time += dt;

        match self.loop_mode {
            LoopMode::Once => {
                if self.time >= duration {
                    self.time = duration;
                    self.paused = true;
                }
            }
            LoopMode::Loop => {
                self.time %= duration;
            }
        }
    }

    /// Gets the value of the specified track at the current time.
    pub fn sample_track(&mut self, track_index: usize) -> Option<TrackValue> {
        let track = self.clip.tracks.get(track_index)?;
        let cursor = self.track_cursors.get_mut(track_index)?;

        match &track.data {
            TrackData::Vector3(t) => t.sample_with_cursor(self.time, cursor).map(TrackValue::Vector3),
            TrackData::Quaternion(t) => {
                t.sample_with_cursor(self.time, cursor).map(TrackValue::Quaternion)
            }
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub enum TrackValue {
    Vector3(Vec3),
    Quaternion(Quat),
}
