//! Transform System
//!
//! World-matrix propagation for the scene hierarchy, decoupled from [`Scene`]
//! so it only borrows the node map and the handles it needs.
//!
//! All walks use an explicit stack instead of recursion so deep skeletons
//! cannot overflow the call stack.
//!
//! [`Scene`]: crate::scene::Scene

use glam::Affine3A;
use slotmap::SlotMap;

use crate::scene::NodeHandle;
use crate::scene::node::Node;

/// Updates the world matrices of every hierarchy under `roots`.
///
/// Local matrices are rebuilt only for nodes whose TRS changed; world
/// matrices are rebuilt for those nodes and every descendant of them.
pub fn update_hierarchy_iterative(nodes: &mut SlotMap<NodeHandle, Node>, roots: &[NodeHandle]) {
    let mut stack: Vec<(NodeHandle, Affine3A, bool)> = Vec::with_capacity(64);

    for &root_handle in roots.iter().rev() {
        stack.push((root_handle, Affine3A::IDENTITY, false));
    }

    propagate(nodes, &mut stack);
}

/// Forces a world-matrix rebuild for `root_handle` and its whole subtree.
///
/// The parent's cached world matrix is taken as-is, so callers refreshing
/// several nodes of one chain should expect the last refresh to win.
pub fn update_subtree(nodes: &mut SlotMap<NodeHandle, Node>, root_handle: NodeHandle) {
    let Some(node) = nodes.get(root_handle) else {
        return;
    };

    let parent_world = node
        .parent
        .and_then(|p| nodes.get(p))
        .map_or(Affine3A::IDENTITY, |p| p.transform.world_matrix);

    let mut stack = vec![(root_handle, parent_world, true)];
    propagate(nodes, &mut stack);
}

fn propagate(nodes: &mut SlotMap<NodeHandle, Node>, stack: &mut Vec<(NodeHandle, Affine3A, bool)>) {
    while let Some((node_handle, parent_world_matrix, parent_changed)) = stack.pop() {
        let Some(node) = nodes.get_mut(node_handle) else {
            continue;
        };

        let local_changed = node.transform.update_local_matrix();
        let world_needs_update = local_changed || parent_changed;

        if world_needs_update {
            let new_world = parent_world_matrix * *node.transform.local_matrix();
            node.transform.set_world_matrix(new_world);
        }

        let current_world = node.transform.world_matrix;

        // Reverse push keeps children processed in insertion order
        for &child_handle in node.children.iter().rev() {
            stack.push((child_handle, current_world, world_needs_update));
        }
    }
}

/// Collects `root` and all of its descendants in pre-order.
///
/// Children are visited in insertion order. `out` is cleared first so the
/// buffer can be reused across calls.
pub fn collect_preorder(
    nodes: &SlotMap<NodeHandle, Node>,
    root: NodeHandle,
    out: &mut Vec<NodeHandle>,
) {
    out.clear();

    let mut stack = vec![root];
    while let Some(handle) = stack.pop() {
        let Some(node) = nodes.get(handle) else {
            continue;
        };
        out.push(handle);
        stack.extend(node.children.iter().rev().copied());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;

    fn link(nodes: &mut SlotMap<NodeHandle, Node>, parent: NodeHandle, child: NodeHandle) {
        nodes.get_mut(parent).unwrap().children.push(child);
        nodes.get_mut(child).unwrap().parent = Some(parent);
    }

    #[test]
    fn test_hierarchy_update() {
        let mut nodes: SlotMap<NodeHandle, Node> = SlotMap::with_key();

        let mut parent = Node::new();
        parent.transform.position = Vec3::new(1.0, 0.0, 0.0);
        let parent_handle = nodes.insert(parent);

        let mut child = Node::new();
        child.transform.position = Vec3::new(0.0, 1.0, 0.0);
        let child_handle = nodes.insert(child);

        link(&mut nodes, parent_handle, child_handle);

        update_hierarchy_iterative(&mut nodes, &[parent_handle]);

        let child_world_pos = nodes[child_handle].transform.world_matrix.translation;
        assert!((child_world_pos.x - 1.0).abs() < 1e-5);
        assert!((child_world_pos.y - 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_subtree_refresh_picks_up_new_local() {
        let mut nodes: SlotMap<NodeHandle, Node> = SlotMap::with_key();
        let root = nodes.insert(Node::new());
        let bone = nodes.insert(Node::new());
        let tip = nodes.insert(Node::new());
        link(&mut nodes, root, bone);
        link(&mut nodes, bone, tip);
        update_hierarchy_iterative(&mut nodes, &[root]);

        nodes[bone].transform.position = Vec3::new(0.0, 2.0, 0.0);
        update_subtree(&mut nodes, bone);

        assert!((nodes[bone].transform.world_matrix.translation.y - 2.0).abs() < 1e-5);
        assert!((nodes[tip].transform.world_matrix.translation.y - 2.0).abs() < 1e-5);
    }

    #[test]
    fn test_collect_preorder_order() {
        let mut nodes: SlotMap<NodeHandle, Node> = SlotMap::with_key();
        let a = nodes.insert(Node::new());
        let b = nodes.insert(Node::new());
        let c = nodes.insert(Node::new());
        let d = nodes.insert(Node::new());
        link(&mut nodes, a, b);
        link(&mut nodes, b, c);
        link(&mut nodes, a, d);

        let mut out = vec![d];
        collect_preorder(&nodes, a, &mut out);
        assert_eq!(out, vec![a, b, c, d]);
    }
}
