//! Player configuration.
//!
//! ```rust,ignore
//! use skeletal_player::animation::{PlayerSettings, SampleMode};
//!
//! // Default: stepped sampling, holding the next keyframe
//! let settings = PlayerSettings::default();
//!
//! // Smooth playback between keys
//! let settings = PlayerSettings::default().with_sample_mode(SampleMode::Linear);
//! ```

use serde::{Deserialize, Serialize};

use crate::animation::tracks::SampleMode;
use crate::errors::Result;

/// Tunables of an [`AnimationPlayer`](crate::animation::AnimationPlayer).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerSettings {
    /// How tracks resolve times between keys. Step is the reference
    /// behaviour; linear is opt-in.
    pub sample_mode: SampleMode,
}

impl PlayerSettings {
    #[must_use]
    pub fn with_sample_mode(mut self, sample_mode: SampleMode) -> Self {
        self.sample_mode = sample_mode;
        self
    }

    /// Reads settings from JSON. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}
