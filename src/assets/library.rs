//! Clip Library
//!
//! Reference-counted registry of shared animation clips.
//!
//! # Design Principles
//! - Clips are handed out as `Arc<AnimationClip>`; the library never gives
//!   out mutable access.
//! - Every [`acquire`](ClipLibrary::acquire) must be paired with a
//!   [`release`](ClipLibrary::release). When the use count returns to zero
//!   the library drops its entry; players still holding the `Arc` keep the
//!   clip data alive until they let go of it.
//! - Interior locking lets one `Arc<ClipLibrary>` be shared by every player.

use std::fmt;
use std::sync::Arc;

use parking_lot::RwLock;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::animation::AnimationClip;
use crate::errors::{AnimationError, Result};

/// Stable identifier of a clip in a [`ClipLibrary`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ClipId(Uuid);

impl ClipId {
    /// Allocates a fresh random identifier.
    #[must_use]
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    #[must_use]
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    #[must_use]
    pub fn uuid(&self) -> Uuid {
        self.0
    }
}

impl fmt::Display for ClipId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

struct TrackedClip {
    clip: Arc<AnimationClip>,
    uses: u32,
}

/// Thread-safe, reference-counted clip registry.
#[derive(Default)]
pub struct ClipLibrary {
    inner: RwLock<FxHashMap<ClipId, TrackedClip>>,
}

impl fmt::Debug for ClipLibrary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClipLibrary")
            .field("clips", &self.inner.read().len())
            .finish()
    }
}

impl ClipLibrary {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// [Write] Adds a clip under a freshly generated id. Its use count
    /// starts at zero.
    pub fn register(&self, clip: AnimationClip) -> ClipId {
        let id = ClipId::generate();
        self.register_with_id(id, clip)
    }

    /// [Write] Adds a clip under a known id.
    ///
    /// If the id is already registered the existing clip is kept and the
    /// new one is discarded.
    pub fn register_with_id(&self, id: ClipId, clip: AnimationClip) -> ClipId {
        let mut guard = self.inner.write();
        guard.entry(id).or_insert_with(|| {
            log::debug!("Registered clip '{}' as {id}", clip.name);
            TrackedClip {
                clip: Arc::new(clip),
                uses: 0,
            }
        });
        id
    }

    /// [Write] Hands out the clip and increments its use count.
    pub fn acquire(&self, id: ClipId) -> Result<Arc<AnimationClip>> {
        let mut guard = self.inner.write();
        let entry = guard.get_mut(&id).ok_or(AnimationError::ClipNotFound(id))?;
        entry.uses += 1;
        Ok(Arc::clone(&entry.clip))
    }

    /// [Write] Decrements the use count and returns the remaining uses.
    ///
    /// The entry is dropped from the library when no uses remain.
    pub fn release(&self, id: ClipId) -> Result<u32> {
        let mut guard = self.inner.write();
        let entry = guard.get_mut(&id).ok_or(AnimationError::ClipNotFound(id))?;
        if entry.uses == 0 {
            return Err(AnimationError::ClipNotAcquired(id));
        }

        entry.uses -= 1;
        let remaining = entry.uses;
        if remaining == 0
            && let Some(freed) = guard.remove(&id)
        {
            log::debug!("Freed clip '{}' ({id})", freed.clip.name);
        }
        Ok(remaining)
    }

    /// [Read] Looks at a clip without touching its use count.
    #[must_use]
    pub fn get(&self, id: ClipId) -> Option<Arc<AnimationClip>> {
        self.inner.read().get(&id).map(|e| Arc::clone(&e.clip))
    }

    #[must_use]
    pub fn use_count(&self, id: ClipId) -> Option<u32> {
        self.inner.read().get(&id).map(|e| e.uses)
    }

    #[must_use]
    pub fn contains(&self, id: ClipId) -> bool {
        self.inner.read().contains_key(&id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.read().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inner.read().is_empty()
    }

    /// Snapshot of the registered ids.
    #[must_use]
    pub fn ids(&self) -> Vec<ClipId> {
        self.inner.read().keys().copied().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn empty_clip(name: &str) -> AnimationClip {
        AnimationClip::new(name, 10.0, 1.0, Vec::new()).unwrap()
    }

    #[test]
    fn test_acquire_release_counts() {
        let library = ClipLibrary::new();
        let id = library.register(empty_clip("walk"));
        assert_eq!(library.use_count(id), Some(0));

        let a = library.acquire(id).unwrap();
        let _b = library.acquire(id).unwrap();
        assert_eq!(library.use_count(id), Some(2));
        assert_eq!(a.name, "walk");

        assert_eq!(library.release(id).unwrap(), 1);
        assert!(library.contains(id));
        assert_eq!(library.release(id).unwrap(), 0);
        assert!(!library.contains(id));

        // Outstanding Arc keeps the data alive
        assert_eq!(a.name, "walk");
    }

    #[test]
    fn test_register_with_id_dedups() {
        let library = ClipLibrary::new();
        let id = ClipId::generate();
        library.register_with_id(id, empty_clip("first"));
        library.register_with_id(id, empty_clip("second"));

        assert_eq!(library.len(), 1);
        assert_eq!(library.get(id).unwrap().name, "first");
    }

    #[test]
    fn test_release_misuse() {
        let library = ClipLibrary::new();
        let id = library.register(empty_clip("idle"));

        assert!(matches!(
            library.release(id),
            Err(AnimationError::ClipNotAcquired(_))
        ));
        assert!(matches!(
            library.release(ClipId::generate()),
            Err(AnimationError::ClipNotFound(_))
        ));
        assert!(library.acquire(ClipId::generate()).is_err());
    }
}
