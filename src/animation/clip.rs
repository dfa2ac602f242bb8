use glam::{Quat, Vec3};

use crate::animation::binding::TargetPath;
use crate::animation::tracks::KeyframeTrack;
use crate::errors::{AgentError, Result};

/// Frame rate used to interpret subclip frame numbers when none is configured.
pub const DEFAULT_FPS: f32 = 30.0;

#[derive(Debug, Clone)]
pub struct TrackMeta {
    /// Name of the rig node the track drives. Names, not handles, so one
    /// clip can drive any number of cloned rigs.
    pub node_name: String,
    pub target: TargetPath,
}

#[derive(Debug, Clone)]
pub enum TrackData {
    Vector3(KeyframeTrack<Vec3>),
    Quaternion(KeyframeTrack<Quat>),
}

impl TrackData {
    fn end_time(&self) -> f32 {
        match self {
            TrackData::Vector3(t) => t.end_time(),
            TrackData::Quaternion(t) => t.end_time(),
        }
    }

    fn start_time(&self) -> Option<f32> {
        match self {
            TrackData::Vector3(t) => t.times.first().copied(),
            TrackData::Quaternion(t) => t.times.first().copied(),
        }
    }

    fn crop_frames(&self, start: f32, end: f32, fps: f32) -> Self {
        match self {
            TrackData::Vector3(t) => TrackData::Vector3(t.crop_frames(start, end, fps)),
            TrackData::Quaternion(t) => TrackData::Quaternion(t.crop_frames(start, end, fps)),
        }
    }

    fn shift(&mut self, delta: f32) {
        match self {
            TrackData::Vector3(t) => t.shift(delta),
            TrackData::Quaternion(t) => t.shift(delta),
        }
    }

    fn is_empty(&self) -> bool {
        match self {
            TrackData::Vector3(t) => t.is_empty(),
            TrackData::Quaternion(t) => t.is_empty(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Track {
    pub meta: TrackMeta,
    pub data: TrackData,
}

/// Immutable keyframe data for one logical action.
///
/// Clips are shared across agents and cloned rigs behind an `Arc`; nothing
/// mutates a clip after it has been registered.
#[derive(Debug, Clone)]
pub struct AnimationClip {
    pub name: String,
    pub duration: f32,
    /// Whether an action playing this clip wraps around at the end.
    pub looping: bool,
    pub tracks: Vec<Track>,
}

impl AnimationClip {
    /// Creates a looping clip whose duration is the latest keyframe of any track.
    #[must_use]
    pub fn new(name: String, tracks: Vec<Track>) -> Self {
        let duration = tracks
            .iter()
            .map(|t| t.data.end_time())
            .fold(0.0_f32, f32::max);

        Self {
            name,
            duration,
            looping: true,
            tracks,
        }
    }

    #[must_use]
    pub fn with_looping(mut self, looping: bool) -> Self {
        self.looping = looping;
        self
    }

    /// Cuts the frame range `[start_frame, end_frame)` out of this clip.
    ///
    /// Tracks without keys in range are dropped. The remaining tracks are
    /// shifted so the earliest kept key lands at time zero, and the duration
    /// is recomputed.
    pub fn subclip(
        &self,
        name: &str,
        start_frame: u32,
        end_frame: u32,
        fps: f32,
        looping: bool,
    ) -> Result<AnimationClip> {
        if end_frame <= start_frame {
            return Err(AgentError::InvalidFrameRange {
                name: name.to_string(),
                start: start_frame,
                end: end_frame,
            });
        }

        let (start, end) = (start_frame as f32, end_frame as f32);
        let mut tracks: Vec<Track> = self
            .tracks
            .iter()
            .map(|track| Track {
                meta: track.meta.clone(),
                data: track.data.crop_frames(start, end, fps),
            })
            .filter(|track| !track.data.is_empty())
            .collect();

        let min_start = tracks
            .iter()
            .filter_map(|t| t.data.start_time())
            .fold(f32::INFINITY, f32::min);
        if !min_start.is_finite() {
            return Err(AgentError::EmptySubclip(name.to_string()));
        }

        for track in &mut tracks {
            track.data.shift(-min_start);
        }

        Ok(AnimationClip::new(name.to_string(), tracks).with_looping(looping))
    }
}
