use std::sync::Arc;

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::animation::binder::{Binder, SkeletonRoot};
use crate::animation::binding::Binding;
use crate::animation::channel::ChannelCursors;
use crate::animation::clip::{AnimationClip, ClipInfo};
use crate::animation::clock::PlaybackClock;
use crate::animation::settings::PlayerSettings;
use crate::assets::{ClipId, ClipLibrary};
use crate::errors::Result;
use crate::scene::{NodeHandle, SceneGraph};

/// Binding lifecycle of a player.
///
/// The transition `Unbound → Bound` happens on the first update that has a
/// clip attached. Only an explicit [`AnimationPlayer::rebind`] goes back.
#[derive(Debug, Clone, Default)]
pub enum BindState {
    #[default]
    Unbound,
    Bound(Binding),
}

/// Component kind tag written into persisted records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ComponentKind {
    Animation,
}

/// Persisted form of a player: which clip it plays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerRecord {
    #[serde(rename = "Type")]
    pub kind: ComponentKind,
    #[serde(rename = "AnimationID")]
    pub clip: Option<ClipId>,
}

#[derive(Debug)]
struct ActiveClip {
    id: ClipId,
    clip: Arc<AnimationClip>,
}

/// Plays one clip onto one skeleton.
///
/// Collaborators are injected: the clip library at construction, the scene
/// on every [`update`](Self::update). The player holds one use of its clip
/// in the library and gives it back on detach or drop.
#[derive(Debug)]
pub struct AnimationPlayer {
    library: Arc<ClipLibrary>,
    skeleton_root: SkeletonRoot,
    settings: PlayerSettings,
    enabled: bool,

    active: Option<ActiveClip>,
    state: BindState,
    clock: PlaybackClock,

    // Parallel to the binding's entries
    cursors: Vec<ChannelCursors>,
}

impl AnimationPlayer {
    #[must_use]
    pub fn new(library: Arc<ClipLibrary>, skeleton_root: SkeletonRoot) -> Self {
        Self {
            library,
            skeleton_root,
            settings: PlayerSettings::default(),
            enabled: true,
            active: None,
            state: BindState::Unbound,
            clock: PlaybackClock::new(),
            cursors: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_settings(mut self, settings: PlayerSettings) -> Self {
        self.settings = settings;
        self
    }

    // ========================================================================
    // Clip attachment
    // ========================================================================

    /// Attaches a clip from the library, releasing the previous one.
    ///
    /// On error the previous clip stays attached. The clock restarts; an
    /// existing binding is kept, since it maps every named node of the
    /// skeleton regardless of clip.
    pub fn set_clip(&mut self, id: ClipId) -> Result<()> {
        let clip = self.library.acquire(id)?;
        log::debug!("Player attached clip '{}' ({id})", clip.name);

        self.release_active();
        self.active = Some(ActiveClip { id, clip });
        self.restart();
        Ok(())
    }

    /// Detaches and releases the current clip, if any.
    pub fn clear_clip(&mut self) {
        self.release_active();
        self.restart();
    }

    fn release_active(&mut self) {
        if let Some(old) = self.active.take()
            && let Err(err) = self.library.release(old.id)
        {
            log::warn!("Failed to release clip '{}': {err}", old.clip.name);
        }
    }

    /// Rewinds playback to the start. Stopping is otherwise just not calling
    /// [`update`](Self::update).
    pub fn stop(&mut self) {
        self.restart();
    }

    fn restart(&mut self) {
        self.clock.reset();
        self.cursors.fill(ChannelCursors::default());
    }

    /// Pauses or resumes playback. A disabled player ignores
    /// [`update`](Self::update) and keeps its clock where it is.
    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    #[inline]
    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Drops the binding so the next update walks the hierarchy again.
    pub fn rebind(&mut self) {
        self.state = BindState::Unbound;
        self.cursors.clear();
    }

    // ========================================================================
    // Frame update
    // ========================================================================

    /// Advances playback by `dt` seconds and poses the bound nodes.
    ///
    /// Without a clip, or while disabled, this is a no-op. Bones missing
    /// from the clip or the hierarchy are skipped, and exhausted tracks leave
    /// their attribute untouched.
    pub fn update<S: SceneGraph + ?Sized>(&mut self, scene: &mut S, dt: f64) {
        if !self.enabled {
            return;
        }
        let Some(active) = &self.active else {
            return;
        };
        let clip = Arc::clone(&active.clip);

        if matches!(self.state, BindState::Unbound) {
            let binding = Binder::bind(&*scene, self.skeleton_root, &clip);
            self.cursors = vec![ChannelCursors::default(); binding.len()];
            self.state = BindState::Bound(binding);
        }
        let BindState::Bound(binding) = &self.state else {
            return;
        };

        let tick = self
            .clock
            .advance(dt, clip.ticks_per_second(), clip.duration_ticks());
        let mode = self.settings.sample_mode;

        let mut posed: SmallVec<[NodeHandle; 32]> = SmallVec::new();
        for ((bone, node), cursors) in binding.iter().zip(self.cursors.iter_mut()) {
            let Some(channel) = clip.channel(bone) else {
                continue;
            };

            let pose = channel.sample_with_cursors(tick, cursors, mode);
            if pose.is_empty() {
                continue;
            }
            if let Some(position) = pose.position {
                scene.set_local_position(node, position);
            }
            if let Some(rotation) = pose.rotation {
                scene.set_local_rotation(node, rotation);
            }
            if let Some(scale) = pose.scale {
                scene.set_local_scale(node, scale);
            }
            posed.push(node);
        }

        for node in posed {
            scene.refresh_world_transform(node);
        }
    }

    // ========================================================================
    // Persistence
    // ========================================================================

    #[must_use]
    pub fn serialize(&self) -> PlayerRecord {
        PlayerRecord {
            kind: ComponentKind::Animation,
            clip: self.clip_id(),
        }
    }

    /// Reattaches to the clip named in `record`.
    pub fn deserialize(&mut self, record: &PlayerRecord) -> Result<()> {
        match record.clip {
            Some(id) => self.set_clip(id),
            None => {
                self.clear_clip();
                Ok(())
            }
        }
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(&self.serialize())?)
    }

    pub fn load_json(&mut self, json: &str) -> Result<()> {
        let record: PlayerRecord = serde_json::from_str(json)?;
        self.deserialize(&record)
    }

    // ========================================================================
    // Inspection
    // ========================================================================

    #[must_use]
    pub fn clip_id(&self) -> Option<ClipId> {
        self.active.as_ref().map(|a| a.id)
    }

    #[must_use]
    pub fn clip(&self) -> Option<&Arc<AnimationClip>> {
        self.active.as_ref().map(|a| &a.clip)
    }

    #[must_use]
    pub fn clip_info(&self) -> Option<ClipInfo> {
        self.active.as_ref().map(|a| a.clip.info())
    }

    #[inline]
    #[must_use]
    pub fn current_tick(&self) -> f64 {
        self.clock.current_tick()
    }

    #[inline]
    #[must_use]
    pub fn elapsed_seconds(&self) -> f64 {
        self.clock.elapsed_seconds()
    }

    #[must_use]
    pub fn is_bound(&self) -> bool {
        matches!(self.state, BindState::Bound(_))
    }

    #[must_use]
    pub fn binding(&self) -> Option<&Binding> {
        match &self.state {
            BindState::Bound(binding) => Some(binding),
            BindState::Unbound => None,
        }
    }

    #[must_use]
    pub fn state(&self) -> &BindState {
        &self.state
    }

    #[must_use]
    pub fn settings(&self) -> PlayerSettings {
        self.settings
    }

    #[must_use]
    pub fn skeleton_root(&self) -> SkeletonRoot {
        self.skeleton_root
    }
}

impl Drop for AnimationPlayer {
    fn drop(&mut self) {
        self.release_active();
    }
}
