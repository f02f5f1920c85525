//! Scene graph module
//!
//! Manages the node hierarchy the animation player writes into:
//! - Node: hierarchy links and transform
//! - Transform: local TRS with cached local/world matrices
//! - Scene: node container with names and hierarchy editing
//! - SceneGraph: the trait the animation code consumes
//! - `transform_system`: world-matrix propagation decoupled from Scene

pub mod graph;
pub mod node;
pub mod scene;
pub mod transform;
pub mod transform_system;

pub use graph::SceneGraph;
pub use node::Node;
pub use scene::{NodeBuilder, Scene};
pub use transform::Transform;

use slotmap::new_key_type;

new_key_type! {
    pub struct NodeHandle;
}
