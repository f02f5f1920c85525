//! Keyframed skeletal clip playback bound onto a named scene hierarchy.
//!
//! A clip holds one [`Channel`](animation::Channel) per bone. An
//! [`AnimationPlayer`] binds those channels to scene nodes by name once, then
//! every frame advances its clock, samples each channel and writes the pose
//! into the bound node's local transform before refreshing its world matrix.
//!
//! ```rust,ignore
//! let library = Arc::new(ClipLibrary::new());
//! let walk = library.register(clip);
//!
//! let mut player = AnimationPlayer::new(library, SkeletonRoot::Node(hips));
//! player.set_clip(walk)?;
//!
//! // every frame
//! player.update(&mut scene, dt);
//! ```

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

pub mod animation;
pub mod assets;
pub mod errors;
pub mod scene;

pub use animation::{
    AnimationClip, AnimationPlayer, AnimationSystem, Binder, SampleMode, SkeletonRoot,
};
pub use assets::{ClipId, ClipLibrary};
pub use errors::{AnimationError, Result};
pub use scene::{Node, NodeHandle, Scene, SceneGraph, Transform};
