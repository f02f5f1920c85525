use glam::{Quat, Vec3};

use crate::animation::tracks::{KeyedTrack, KeyframeCursor, SampleMode};

/// One bone's three keyed tracks inside a clip.
#[derive(Debug, Clone, PartialEq)]
pub struct Channel {
    pub bone_name: String,
    pub position: KeyedTrack<Vec3>,
    pub rotation: KeyedTrack<Quat>,
    pub scale: KeyedTrack<Vec3>,
}

/// The attributes a channel produced at one tick.
///
/// Each attribute is sampled independently; `None` means "leave the node's
/// current value alone".
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ChannelPose {
    pub position: Option<Vec3>,
    pub rotation: Option<Quat>,
    pub scale: Option<Vec3>,
}

impl ChannelPose {
    /// Whether any attribute was produced.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.position.is_none() && self.rotation.is_none() && self.scale.is_none()
    }
}

/// Per-channel sampling cursors, one per track.
#[derive(Debug, Clone, Copy, Default)]
pub struct ChannelCursors {
    pub position: KeyframeCursor,
    pub rotation: KeyframeCursor,
    pub scale: KeyframeCursor,
}

impl Channel {
    #[must_use]
    pub fn new(
        bone_name: impl Into<String>,
        position: KeyedTrack<Vec3>,
        rotation: KeyedTrack<Quat>,
        scale: KeyedTrack<Vec3>,
    ) -> Self {
        Self {
            bone_name: bone_name.into(),
            position,
            rotation,
            scale,
        }
    }

    /// Samples all three tracks at `tick`.
    #[must_use]
    pub fn sample(&self, tick: f64, mode: SampleMode) -> ChannelPose {
        ChannelPose {
            position: self.position.sample_with_mode(tick, mode),
            rotation: self.rotation.sample_with_mode(tick, mode),
            scale: self.scale.sample_with_mode(tick, mode),
        }
    }

    /// Same as [`sample`](Self::sample), reusing per-track cursors.
    pub fn sample_with_cursors(
        &self,
        tick: f64,
        cursors: &mut ChannelCursors,
        mode: SampleMode,
    ) -> ChannelPose {
        ChannelPose {
            position: self
                .position
                .sample_with_cursor(tick, &mut cursors.position, mode),
            rotation: self
                .rotation
                .sample_with_cursor(tick, &mut cursors.rotation, mode),
            scale: self.scale.sample_with_cursor(tick, &mut cursors.scale, mode),
        }
    }

    /// Latest key time over the three tracks.
    #[must_use]
    pub fn end_time(&self) -> f64 {
        self.position
            .end_time()
            .max(self.rotation.end_time())
            .max(self.scale.end_time())
    }
}
