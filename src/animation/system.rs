use slotmap::{SlotMap, new_key_type};

use crate::animation::player::AnimationPlayer;
use crate::scene::SceneGraph;

new_key_type! {
    pub struct PlayerHandle;
}

/// Animation system.
///
/// Owns every player animating one scene and steps them once per frame.
#[derive(Debug, Default)]
pub struct AnimationSystem {
    players: SlotMap<PlayerHandle, AnimationPlayer>,
}

impl AnimationSystem {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_player(&mut self, player: AnimationPlayer) -> PlayerHandle {
        self.players.insert(player)
    }

    /// Removes a player; dropping it releases its clip.
    pub fn remove_player(&mut self, handle: PlayerHandle) -> Option<AnimationPlayer> {
        self.players.remove(handle)
    }

    #[must_use]
    pub fn get(&self, handle: PlayerHandle) -> Option<&AnimationPlayer> {
        self.players.get(handle)
    }

    pub fn get_mut(&mut self, handle: PlayerHandle) -> Option<&mut AnimationPlayer> {
        self.players.get_mut(handle)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.players.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }

    /// Updates all players.
    ///
    /// # Arguments
    /// * `scene` - Scene the players write into
    /// * `dt` - Delta time of this frame (in seconds)
    pub fn update<S: SceneGraph + ?Sized>(&mut self, scene: &mut S, dt: f64) {
        for (_handle, player) in &mut self.players {
            player.update(&mut *scene, dt);
        }
    }
}
