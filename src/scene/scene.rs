use glam::{Affine3A, Quat, Vec3};
use slotmap::{SecondaryMap, SlotMap};

use crate::scene::NodeHandle;
use crate::scene::graph::SceneGraph;
use crate::scene::node::Node;
use crate::scene::transform_system;

/// Scene graph container.
///
/// Owns the node hierarchy and per-node component data (currently names).
/// Nodes are addressed by [`NodeHandle`]; handles of removed nodes go stale
/// and every accessor tolerates them.
#[derive(Debug, Default)]
pub struct Scene {
    pub nodes: SlotMap<NodeHandle, Node>,
    pub root_nodes: Vec<NodeHandle>,

    names: SecondaryMap<NodeHandle, String>,
}

impl Scene {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts building a named node.
    pub fn build_node(&mut self, name: &str) -> NodeBuilder<'_> {
        NodeBuilder::new(self, name)
    }

    /// Creates a detached, unnamed node. It is not a root until attached or
    /// added with [`add_node`](Self::add_node).
    pub fn create_node(&mut self) -> NodeHandle {
        self.nodes.insert(Node::new())
    }

    /// Creates a detached node with the given name.
    pub fn create_node_with_name(&mut self, name: &str) -> NodeHandle {
        let handle = self.create_node();
        self.names.insert(handle, name.to_string());
        handle
    }

    /// Adds a node as a new root.
    pub fn add_node(&mut self, node: Node) -> NodeHandle {
        let handle = self.nodes.insert(node);
        self.root_nodes.push(handle);
        handle
    }

    /// Inserts `child` and appends it to `parent`'s children.
    pub fn add_to_parent(&mut self, child: Node, parent: NodeHandle) -> NodeHandle {
        let handle = self.nodes.insert(child);
        self.attach(handle, parent);
        handle
    }

    /// Re-parents `child` under `parent`, detaching it from its old parent
    /// or from the root list.
    pub fn attach(&mut self, child: NodeHandle, parent: NodeHandle) {
        if child == parent {
            log::warn!("Cannot attach node to itself!");
            return;
        }
        if !self.nodes.contains_key(child) {
            log::error!("Child node not found during attach!");
            return;
        }
        if self.is_ancestor(child, parent) {
            log::warn!("Cannot attach node under its own descendant!");
            return;
        }

        // 1. Detach from old
        let old_parent = self.nodes.get(child).and_then(|n| n.parent);
        if let Some(p) = old_parent {
            if let Some(n) = self.nodes.get_mut(p)
                && let Some(i) = n.children.iter().position(|&x| x == child)
            {
                n.children.remove(i);
            }
        } else if let Some(i) = self.root_nodes.iter().position(|&x| x == child) {
            self.root_nodes.remove(i);
        }

        // 2. Attach to new
        if let Some(p) = self.nodes.get_mut(parent) {
            p.children.push(child);
        } else {
            log::error!("Parent node not found during attach!");
            self.root_nodes.push(child);
            if let Some(c) = self.nodes.get_mut(child) {
                c.parent = None;
            }
            return;
        }

        // 3. Update child
        if let Some(c) = self.nodes.get_mut(child) {
            c.parent = Some(parent);
            c.transform.mark_dirty();
        }
    }

    /// Whether `ancestor` is `node` or lies on its parent chain.
    fn is_ancestor(&self, ancestor: NodeHandle, node: NodeHandle) -> bool {
        let mut current = Some(node);
        while let Some(handle) = current {
            if handle == ancestor {
                return true;
            }
            current = self.nodes.get(handle).and_then(|n| n.parent);
        }
        false
    }

    /// Removes a node and its whole subtree.
    pub fn remove_node(&mut self, handle: NodeHandle) {
        let mut subtree = Vec::new();
        transform_system::collect_preorder(&self.nodes, handle, &mut subtree);
        if subtree.is_empty() {
            return;
        }

        let parent = self.nodes.get(handle).and_then(|n| n.parent);
        if let Some(p) = parent {
            if let Some(n) = self.nodes.get_mut(p)
                && let Some(i) = n.children.iter().position(|&x| x == handle)
            {
                n.children.remove(i);
            }
        } else if let Some(i) = self.root_nodes.iter().position(|&x| x == handle) {
            self.root_nodes.remove(i);
        }

        for h in subtree {
            self.names.remove(h);
            self.nodes.remove(h);
        }
    }

    #[must_use]
    pub fn get_node(&self, handle: NodeHandle) -> Option<&Node> {
        self.nodes.get(handle)
    }

    pub fn get_node_mut(&mut self, handle: NodeHandle) -> Option<&mut Node> {
        self.nodes.get_mut(handle)
    }

    #[must_use]
    pub fn get_name(&self, handle: NodeHandle) -> Option<&str> {
        self.names.get(handle).map(String::as_str)
    }

    pub fn set_name(&mut self, handle: NodeHandle, name: &str) {
        if self.nodes.contains_key(handle) {
            self.names.insert(handle, name.to_string());
        }
    }

    /// Finds the first node named `name` in a pre-order walk of all roots.
    #[must_use]
    pub fn find_node_by_name(&self, name: &str) -> Option<NodeHandle> {
        let mut visited = Vec::new();
        self.root_nodes.iter().find_map(|&root| {
            transform_system::collect_preorder(&self.nodes, root, &mut visited);
            visited
                .iter()
                .copied()
                .find(|&h| self.get_name(h) == Some(name))
        })
    }

    #[must_use]
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    // ========================================================================
    // Matrix update pipeline
    // ========================================================================

    /// Updates the world matrices of the entire scene.
    pub fn update_matrix_world(&mut self) {
        transform_system::update_hierarchy_iterative(&mut self.nodes, &self.root_nodes);
    }

    /// Forces a world-matrix rebuild of one subtree.
    pub fn update_subtree(&mut self, root: NodeHandle) {
        transform_system::update_subtree(&mut self.nodes, root);
    }
}

impl SceneGraph for Scene {
    fn collect_preorder(&self, root: NodeHandle, out: &mut Vec<NodeHandle>) {
        transform_system::collect_preorder(&self.nodes, root, out);
    }

    fn node_name(&self, node: NodeHandle) -> Option<&str> {
        self.get_name(node)
    }

    fn children(&self, node: NodeHandle) -> &[NodeHandle] {
        self.nodes
            .get(node)
            .map_or(&[][..], |n| n.children.as_slice())
    }

    fn local_trs(&self, node: NodeHandle) -> Option<(Vec3, Quat, Vec3)> {
        let t = &self.nodes.get(node)?.transform;
        Some((t.position, t.rotation, t.scale))
    }

    fn set_local_position(&mut self, node: NodeHandle, position: Vec3) {
        if let Some(n) = self.nodes.get_mut(node) {
            n.transform.position = position;
        }
    }

    fn set_local_rotation(&mut self, node: NodeHandle, rotation: Quat) {
        if let Some(n) = self.nodes.get_mut(node) {
            n.transform.rotation = rotation;
        }
    }

    fn set_local_scale(&mut self, node: NodeHandle, scale: Vec3) {
        if let Some(n) = self.nodes.get_mut(node) {
            n.transform.scale = scale;
        }
    }

    fn world_matrix(&self, node: NodeHandle) -> Option<Affine3A> {
        self.nodes.get(node).map(|n| n.transform.world_matrix)
    }

    fn refresh_world_transform(&mut self, node: NodeHandle) {
        self.update_subtree(node);
    }
}

/// Chainable node construction.
///
/// ```rust,ignore
/// let hips = scene.build_node("Hips").with_parent(armature).build();
/// ```
pub struct NodeBuilder<'a> {
    scene: &'a mut Scene,
    name: String,
    node: Node,
    parent: Option<NodeHandle>,
}

impl<'a> NodeBuilder<'a> {
    pub fn new(scene: &'a mut Scene, name: &str) -> Self {
        Self {
            scene,
            name: name.to_string(),
            node: Node::new(),
            parent: None,
        }
    }

    #[must_use]
    pub fn with_position(mut self, x: f32, y: f32, z: f32) -> Self {
        self.node.transform.position = Vec3::new(x, y, z);
        self
    }

    #[must_use]
    pub fn with_rotation(mut self, rotation: Quat) -> Self {
        self.node.transform.rotation = rotation;
        self
    }

    #[must_use]
    pub fn with_scale(mut self, s: f32) -> Self {
        self.node.transform.scale = Vec3::splat(s);
        self
    }

    #[must_use]
    pub fn with_parent(mut self, parent: NodeHandle) -> Self {
        self.parent = Some(parent);
        self
    }

    /// Inserts the node, attaching it to the parent or to the root list.
    pub fn build(self) -> NodeHandle {
        let handle = self.scene.nodes.insert(self.node);
        self.scene.names.insert(handle, self.name);

        if let Some(parent) = self.parent {
            self.scene.attach(handle, parent);
        } else {
            self.scene.root_nodes.push(handle);
        }

        handle
    }
}
