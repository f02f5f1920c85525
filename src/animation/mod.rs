//! Skeletal clip playback.
//!
//! Data flow per frame:
//! `AnimationPlayer::update` → clock advance → for each bound bone:
//! `Channel` sample → local TRS write → world transform refresh.

pub mod binder;
pub mod binding;
pub mod channel;
pub mod clip;
pub mod clock;
pub mod player;
pub mod settings;
pub mod system;
pub mod tracks;
pub mod values;

pub use binder::{Binder, SkeletonRoot};
pub use binding::Binding;
pub use channel::{Channel, ChannelCursors, ChannelPose};
pub use clip::{AnimationClip, ClipInfo};
pub use clock::PlaybackClock;
pub use player::{AnimationPlayer, BindState, ComponentKind, PlayerRecord};
pub use settings::PlayerSettings;
pub use system::{AnimationSystem, PlayerHandle};
pub use tracks::{KeyedTrack, KeyframeCursor, SampleMode};
pub use values::Interpolatable;
