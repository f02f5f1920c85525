use serde::{Deserialize, Serialize};

use crate::animation::values::Interpolatable;
use crate::errors::{AnimationError, Result};

/// How a track resolves a time that falls between two keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SampleMode {
    /// Hold the next key: the value of the first key at or after the time.
    #[default]
    Step,
    /// Blend the two keys bracketing the time (lerp / slerp).
    Linear,
}

const MAX_SCAN_OFFSET: usize = 3;

/// Remembers the key index resolved by the previous sample so that a clock
/// moving forward frame by frame finds the next key in O(1).
#[derive(Debug, Clone, Copy, Default)]
pub struct KeyframeCursor {
    pub last_index: usize,
}

/// An ordered, non-empty time → value sequence for one transform attribute.
///
/// Times are finite and strictly increasing. The track is immutable once
/// built, which is what lets every sampling path assume at least one key.
#[derive(Debug, Clone, PartialEq)]
pub struct KeyedTrack<T: Interpolatable> {
    times: Vec<f64>,
    values: Vec<T>,
}

impl<T: Interpolatable> KeyedTrack<T> {
    /// Builds a track, rejecting empty, mismatched or unsorted key data.
    pub fn new(times: Vec<f64>, values: Vec<T>) -> Result<Self> {
        if times.len() != values.len() {
            return Err(AnimationError::KeyCountMismatch {
                times: times.len(),
                values: values.len(),
            });
        }
        if times.is_empty() {
            return Err(AnimationError::EmptyTrack);
        }
        if let Some(index) = times.iter().position(|t| !t.is_finite()) {
            return Err(AnimationError::UnsortedKeys { index });
        }
        if let Some(index) = times.windows(2).position(|w| w[1] <= w[0]) {
            return Err(AnimationError::UnsortedKeys { index: index + 1 });
        }

        Ok(Self { times, values })
    }

    /// Builds a track from `(time, value)` pairs.
    pub fn from_keys(keys: impl IntoIterator<Item = (f64, T)>) -> Result<Self> {
        let (times, values) = keys.into_iter().unzip();
        Self::new(times, values)
    }

    /// A single key at time zero.
    #[must_use]
    pub fn constant(value: T) -> Self {
        Self {
            times: vec![0.0],
            values: vec![value],
        }
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.times.len()
    }

    /// Whether the track has no keys. Validated tracks always have one.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.times.is_empty()
    }

    #[inline]
    #[must_use]
    pub fn times(&self) -> &[f64] {
        &self.times
    }

    #[inline]
    #[must_use]
    pub fn values(&self) -> &[T] {
        &self.values
    }

    /// Time of the last key.
    #[must_use]
    pub fn end_time(&self) -> f64 {
        self.times[self.times.len() - 1]
    }

    /// Samples with the default step mode.
    ///
    /// Returns the value of the first key whose time is `>= time`, or `None`
    /// once `time` is past the last key.
    #[must_use]
    pub fn sample(&self, time: f64) -> Option<T> {
        self.sample_with_mode(time, SampleMode::Step)
    }

    /// Stateless sampling with an explicit mode.
    #[must_use]
    pub fn sample_with_mode(&self, time: f64, mode: SampleMode) -> Option<T> {
        if time.is_nan() {
            return None;
        }
        let index = self.ceil_index(time)?;
        Some(self.resolve(index, time, mode))
    }

    /// Cursor-accelerated sampling. Yields exactly what
    /// [`sample_with_mode`](Self::sample_with_mode) yields.
    pub fn sample_with_cursor(
        &self,
        time: f64,
        cursor: &mut KeyframeCursor,
        mode: SampleMode,
    ) -> Option<T> {
        if time.is_nan() {
            return None;
        }
        let index = self.locate_with_cursor(time, cursor)?;
        Some(self.resolve(index, time, mode))
    }

    /// Index of the first key with `times[i] >= time`.
    fn ceil_index(&self, time: f64) -> Option<usize> {
        let index = self.times.partition_point(|&t| t < time);
        (index < self.times.len()).then_some(index)
    }

    fn locate_with_cursor(&self, time: f64, cursor: &mut KeyframeCursor) -> Option<usize> {
        let len = self.times.len();
        let i = cursor.last_index.min(len - 1);

        let scanned = if self.times[i] >= time {
            // Ceiling is at or before the cursor: walk back while the
            // previous key still satisfies the bound.
            (0..=MAX_SCAN_OFFSET.min(i))
                .map(|offset| i - offset)
                .find(|&idx| idx == 0 || self.times[idx - 1] < time)
                .map(Some)
        } else {
            (i + 1..=i + 1 + MAX_SCAN_OFFSET).find_map(|idx| {
                if idx >= len {
                    Some(None)
                } else if self.times[idx] >= time {
                    Some(Some(idx))
                } else {
                    None
                }
            })
        };

        // Large jump (scrub or loop reset): binary search
        let found = scanned.unwrap_or_else(|| self.ceil_index(time));
        cursor.last_index = found.unwrap_or(len - 1);
        found
    }

    fn resolve(&self, index: usize, time: f64, mode: SampleMode) -> T {
        match mode {
            SampleMode::Step => self.values[index],
            SampleMode::Linear => {
                if index == 0 || time >= self.times[index] {
                    return self.values[index];
                }
                let t0 = self.times[index - 1];
                let t1 = self.times[index];
                let t = ((time - t0) / (t1 - t0)).clamp(0.0, 1.0) as f32;
                T::interpolate_linear(self.values[index - 1], self.values[index], t)
            }
        }
    }
}
