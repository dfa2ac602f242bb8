use crate::animation::values::Interpolatable;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InterpolationMode {
    Linear,
    Step,
    CubicSpline,
}

impl InterpolationMode {
    /// Number of stored values per keyframe (cubic splines carry in/out tangents).
    #[inline]
    #[must_use]
    pub fn stride(self) -> usize {
        match self {
            InterpolationMode::CubicSpline => 3,
            _ => 1,
        }
    }
}

/// Keyframes scanned linearly from the cursor before falling back to binary search.
const MAX_SCAN_OFFSET: usize = 3;

/// Remembers the last keyframe interval a track was sampled in, so that
/// sequential playback finds the next interval in O(1).
#[derive(Debug, Clone, Copy, Default)]
pub struct KeyframeCursor {
    pub last_index: usize,
}

#[derive(Debug, Clone)]
pub struct KeyframeTrack<T: Interpolatable> {
    pub times: Vec<f32>,
    /// For `CubicSpline`, length is `times.len() * 3` laid out as
    /// `[in_tangent, value, out_tangent]` per key.
    pub values: Vec<T>,
    pub interpolation: InterpolationMode,
}

impl<T: Interpolatable> KeyframeTrack<T> {
    #[must_use]
    pub fn new(times: Vec<f32>, values: Vec<T>, interpolation: InterpolationMode) -> Self {
        Self {
            times,
            values,
            interpolation,
        }
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.times.is_empty()
    }

    /// Time of the last keyframe, or zero for an empty track.
    #[inline]
    #[must_use]
    pub fn end_time(&self) -> f32 {
        self.times.last().copied().unwrap_or(0.0)
    }

    /// Stateless sampling via binary search.
    #[must_use]
    pub fn sample(&self, time: f32) -> Option<T> {
        if self.times.is_empty() {
            return None;
        }
        let next_idx = self.times.partition_point(|&t| t <= time);
        Some(self.sample_at_frame(next_idx.saturating_sub(1), time))
    }

    /// Sampling that starts its search from `cursor` and updates it.
    pub fn sample_with_cursor(&self, time: f32, cursor: &mut KeyframeCursor) -> Option<T> {
        let len = self.times.len();
        match len {
            0 => return None,
            1 => return Some(self.value_at(0)),
            _ => {}
        }

        let index = self
            .scan_from(cursor.last_index.min(len - 1), time)
            .unwrap_or_else(|| self.times.partition_point(|&t| t <= time).saturating_sub(1));

        cursor.last_index = index;
        Some(self.sample_at_frame(index, time))
    }

    /// Local search around `start`; `None` when `time` is further away than
    /// `MAX_SCAN_OFFSET` keys (a scrub or a loop wrap).
    fn scan_from(&self, start: usize, time: f32) -> Option<usize> {
        let len = self.times.len();

        if time >= self.times[start] {
            for idx in start..=(start + MAX_SCAN_OFFSET) {
                if idx >= len - 1 {
                    return (time >= self.times[len - 1]).then_some(len - 1);
                }
                if time < self.times[idx + 1] {
                    return Some(idx);
                }
            }
            None
        } else {
            (start.saturating_sub(MAX_SCAN_OFFSET)..start)
                .rev()
                .find(|&idx| time >= self.times[idx])
        }
    }

    #[inline]
    fn value_at(&self, index: usize) -> T {
        match self.interpolation {
            InterpolationMode::CubicSpline => self.values[index * 3 + 1],
            _ => self.values[index],
        }
    }

    fn sample_at_frame(&self, index: usize, time: f32) -> T {
        let len = self.times.len();
        if index >= len - 1 {
            return self.value_at(len - 1);
        }

        let next = index + 1;
        let t0 = self.times[index];
        let dt = self.times[next] - t0;
        let t = if dt > 1e-6 { ((time - t0) / dt).clamp(0.0, 1.0) } else { 0.0 };

        match self.interpolation {
            InterpolationMode::Step => self.value_at(index),
            InterpolationMode::Linear => {
                T::interpolate_linear(self.value_at(index), self.value_at(next), t)
            }
            InterpolationMode::CubicSpline => {
                let a = index * 3;
                let b = next * 3;
                T::interpolate_cubic(
                    self.values[a + 1],
                    self.values[a + 2],
                    self.values[b],
                    self.values[b + 1],
                    t,
                    dt,
                )
            }
        }
    }

    /// Keeps the keyframes whose frame number `time * fps` lies in
    /// `[start_frame, end_frame)`. Times are left unshifted.
    #[must_use]
    pub fn crop_frames(&self, start_frame: f32, end_frame: f32, fps: f32) -> Self {
        let stride = self.interpolation.stride();
        let mut times = Vec::new();
        let mut values = Vec::new();

        for (i, &time) in self.times.iter().enumerate() {
            let frame = time * fps;
            if frame < start_frame || frame >= end_frame {
                continue;
            }
            times.push(time);
            values.extend_from_slice(&self.values[i * stride..(i + 1) * stride]);
        }

        Self::new(times, values, self.interpolation)
    }

    /// Offsets every keyframe time by `delta` seconds.
    pub fn shift(&mut self, delta: f32) {
        for time in &mut self.times {
            *time += delta;
        }
    }
}
