//! Shared clip resources.

pub mod library;

pub use library::{ClipId, ClipLibrary};
