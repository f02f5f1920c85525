use crate::animation::binding::Binding;
use crate::animation::clip::AnimationClip;
use crate::scene::{NodeHandle, SceneGraph};

/// Where the skeleton a player animates starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkeletonRoot {
    /// An explicit root node supplied by the scene owner.
    Node(NodeHandle),
    /// Imported-model layout: the first child of the owner's second child.
    OwnerConvention(NodeHandle),
}

impl SkeletonRoot {
    /// Resolves the root node, or `None` if the hierarchy does not have the
    /// expected shape.
    pub fn resolve<S: SceneGraph + ?Sized>(self, scene: &S) -> Option<NodeHandle> {
        match self {
            Self::Node(node) => Some(node),
            Self::OwnerConvention(owner) => {
                let armature = scene.child_at(owner, 1)?;
                scene.child_at(armature, 0)
            }
        }
    }
}

/// Binds clip channels to live scene nodes by name.
pub struct Binder;

impl Binder {
    /// Walks the skeleton in pre-order and maps every named node.
    ///
    /// `clip` is only used for diagnostics; bones are filtered against the
    /// active clip at sample time. Nodes sharing a name overwrite each other,
    /// so the node visited last wins.
    pub fn bind<S: SceneGraph + ?Sized>(
        scene: &S,
        root: SkeletonRoot,
        clip: &AnimationClip,
    ) -> Binding {
        let mut binding = Binding::new();

        let Some(root_node) = root.resolve(scene) else {
            log::debug!(
                "Skeleton root {root:?} not found, clip '{}' left unbound",
                clip.name
            );
            return binding;
        };

        let mut nodes = Vec::new();
        scene.collect_preorder(root_node, &mut nodes);

        for node in nodes {
            if let Some(name) = scene.node_name(node) {
                binding.insert(name, node);
            }
        }

        let matched = clip
            .channels()
            .filter(|channel| binding.contains(&channel.bone_name))
            .count();
        log::debug!(
            "Bound {} named nodes, {matched} of {} channels of clip '{}' matched",
            binding.len(),
            clip.channel_count(),
            clip.name
        );

        binding
    }
}
