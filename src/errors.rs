//! Error Types
//!
//! This module defines the error types used throughout the crate.
//!
//! # Overview
//!
//! The main error type [`AnimationError`] covers construction-time validation
//! of clip data and misuse of the clip library. The per-frame update path is
//! infallible: missing clips, unmatched bones and exhausted tracks degrade to
//! "leave the attribute unchanged" instead of surfacing an error.
//!
//! # Usage
//!
//! All fallible public APIs return [`Result<T>`] which is an alias for
//! `std::result::Result<T, AnimationError>`.
//!
//! ```rust,ignore
//! use skeletal_player::errors::Result;
//!
//! fn build() -> Result<()> {
//!     let track = KeyedTrack::new(vec![0.0, 1.0], vec![Vec3::ZERO, Vec3::X])?;
//!     Ok(())
//! }
//! ```

use thiserror::Error;

use crate::assets::ClipId;

/// The main error type for clip construction and library access.
#[derive(Error, Debug)]
pub enum AnimationError {
    // ========================================================================
    // Track & Clip Validation
    // ========================================================================
    /// A keyed track was built without any keys.
    #[error("Keyed track has no keys")]
    EmptyTrack,

    /// The time and value arrays of a track differ in length.
    #[error("Keyed track has {times} key times but {values} values")]
    KeyCountMismatch {
        /// Number of key times
        times: usize,
        /// Number of key values
        values: usize,
    },

    /// Key times are not finite and strictly increasing.
    #[error("Keyed track times must be finite and strictly increasing (key {index})")]
    UnsortedKeys {
        /// Index of the first offending key
        index: usize,
    },

    /// Two channels of one clip target the same bone.
    #[error("Duplicate channel for bone '{0}'")]
    DuplicateChannel(String),

    /// Tick rate is not a positive finite number.
    #[error("Invalid ticks per second: {0}")]
    InvalidTickRate(f64),

    /// Duration is negative or not finite.
    #[error("Invalid clip duration: {0} ticks")]
    InvalidDuration(f64),

    // ========================================================================
    // Library Errors
    // ========================================================================
    /// The requested clip is not registered in the library.
    #[error("Clip not found: {0}")]
    ClipNotFound(ClipId),

    /// A clip was released more often than it was acquired.
    #[error("Clip released without being acquired: {0}")]
    ClipNotAcquired(ClipId),

    // ========================================================================
    // Persistence Errors
    // ========================================================================
    /// JSON encoding or decoding error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Alias for `Result<T, AnimationError>`.
pub type Result<T> = std::result::Result<T, AnimationError>;
