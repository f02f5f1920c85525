use rustc_hash::FxHashMap;

use crate::scene::NodeHandle;

/// Resolved bone name → scene node mapping.
///
/// Built once by the [`Binder`](crate::animation::Binder) and then read every
/// frame, so the player never resolves names on the hot path. Entries keep
/// the order in which their bone was first bound; re-binding a bone replaces
/// the node in place.
#[derive(Debug, Clone, Default)]
pub struct Binding {
    entries: Vec<(String, NodeHandle)>,
    index: FxHashMap<String, usize>,
}

impl Binding {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records `bone → node`, returning the node it replaced.
    pub fn insert(&mut self, bone: impl Into<String>, node: NodeHandle) -> Option<NodeHandle> {
        let bone = bone.into();
        if let Some(&slot) = self.index.get(&bone) {
            return Some(std::mem::replace(&mut self.entries[slot].1, node));
        }
        self.index.insert(bone.clone(), self.entries.len());
        self.entries.push((bone, node));
        None
    }

    #[must_use]
    pub fn get(&self, bone: &str) -> Option<NodeHandle> {
        self.index.get(bone).map(|&slot| self.entries[slot].1)
    }

    #[must_use]
    pub fn contains(&self, bone: &str) -> bool {
        self.index.contains_key(bone)
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates `(bone, node)` pairs in binding order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, NodeHandle)> {
        self.entries.iter().map(|(bone, node)| (bone.as_str(), *node))
    }
}
