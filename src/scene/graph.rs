//! Scene collaborator seam.
//!
//! The animation player never reaches into a concrete scene type. It reads
//! and writes nodes exclusively through [`SceneGraph`], which [`Scene`]
//! implements and which tests can wrap to observe traffic (for example to
//! count hierarchy traversals).
//!
//! [`Scene`]: crate::scene::Scene

use glam::{Affine3A, Quat, Vec3};

use crate::scene::NodeHandle;

/// Node access required by the binder and the player.
///
/// All lookups of a stale handle return `None` / do nothing.
pub trait SceneGraph {
    /// Collects `root` and every descendant in pre-order into `out`.
    ///
    /// Children are visited in insertion order. `out` is cleared first.
    fn collect_preorder(&self, root: NodeHandle, out: &mut Vec<NodeHandle>);

    fn node_name(&self, node: NodeHandle) -> Option<&str>;

    fn children(&self, node: NodeHandle) -> &[NodeHandle];

    fn child_count(&self, node: NodeHandle) -> usize {
        self.children(node).len()
    }

    fn child_at(&self, node: NodeHandle, index: usize) -> Option<NodeHandle> {
        self.children(node).get(index).copied()
    }

    /// Returns the local `(position, rotation, scale)` of a node.
    fn local_trs(&self, node: NodeHandle) -> Option<(Vec3, Quat, Vec3)>;

    fn set_local_position(&mut self, node: NodeHandle, position: Vec3);

    fn set_local_rotation(&mut self, node: NodeHandle, rotation: Quat);

    fn set_local_scale(&mut self, node: NodeHandle, scale: Vec3);

    fn world_matrix(&self, node: NodeHandle) -> Option<Affine3A>;

    /// Recomputes the world matrix of `node` (and its descendants) from the
    /// current local TRS.
    fn refresh_world_transform(&mut self, node: NodeHandle);
}
