use rustc_hash::{FxBuildHasher, FxHashMap};
use serde::Serialize;

use crate::animation::channel::Channel;
use crate::errors::{AnimationError, Result};

/// An immutable animation asset: one channel per bone plus timing metadata.
///
/// Clips are shared as `Arc<AnimationClip>` between every player using them
/// and are never mutated after construction.
#[derive(Debug, Clone)]
pub struct AnimationClip {
    pub name: String,
    duration_ticks: f64,
    ticks_per_second: f64,
    channels: FxHashMap<String, Channel>,
}

/// Read-only clip metadata for display.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClipInfo {
    pub name: String,
    pub duration_ticks: f64,
    pub ticks_per_second: f64,
    pub channel_count: usize,
}

impl AnimationClip {
    /// Builds a clip, validating timing metadata and channel uniqueness.
    pub fn new(
        name: impl Into<String>,
        duration_ticks: f64,
        ticks_per_second: f64,
        channels: Vec<Channel>,
    ) -> Result<Self> {
        if !duration_ticks.is_finite() || duration_ticks < 0.0 {
            return Err(AnimationError::InvalidDuration(duration_ticks));
        }
        if !ticks_per_second.is_finite() || ticks_per_second <= 0.0 {
            return Err(AnimationError::InvalidTickRate(ticks_per_second));
        }

        let mut map = FxHashMap::with_capacity_and_hasher(channels.len(), FxBuildHasher);
        for channel in channels {
            if map.contains_key(&channel.bone_name) {
                return Err(AnimationError::DuplicateChannel(channel.bone_name));
            }
            map.insert(channel.bone_name.clone(), channel);
        }

        Ok(Self {
            name: name.into(),
            duration_ticks,
            ticks_per_second,
            channels: map,
        })
    }

    /// Builds a clip whose duration is the latest key time of any channel.
    pub fn with_computed_duration(
        name: impl Into<String>,
        ticks_per_second: f64,
        channels: Vec<Channel>,
    ) -> Result<Self> {
        let duration = channels
            .iter()
            .map(Channel::end_time)
            .fold(0.0_f64, f64::max);
        Self::new(name, duration, ticks_per_second, channels)
    }

    #[inline]
    #[must_use]
    pub fn duration_ticks(&self) -> f64 {
        self.duration_ticks
    }

    #[inline]
    #[must_use]
    pub fn ticks_per_second(&self) -> f64 {
        self.ticks_per_second
    }

    #[inline]
    #[must_use]
    pub fn duration_seconds(&self) -> f64 {
        self.duration_ticks / self.ticks_per_second
    }

    #[must_use]
    pub fn channel(&self, bone_name: &str) -> Option<&Channel> {
        self.channels.get(bone_name)
    }

    #[must_use]
    pub fn has_channel(&self, bone_name: &str) -> bool {
        self.channels.contains_key(bone_name)
    }

    #[inline]
    #[must_use]
    pub fn channel_count(&self) -> usize {
        self.channels.len()
    }

    pub fn channels(&self) -> impl Iterator<Item = &Channel> {
        self.channels.values()
    }

    #[must_use]
    pub fn info(&self) -> ClipInfo {
        ClipInfo {
            name: self.name.clone(),
            duration_ticks: self.duration_ticks,
            ticks_per_second: self.ticks_per_second,
            channel_count: self.channels.len(),
        }
    }
}
