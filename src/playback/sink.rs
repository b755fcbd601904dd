//! Playback sink trait and view identity

use serde::{Deserialize, Serialize};

/// Which eye a playback surface renders
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ViewId {
    Left,
    Right,
}

impl std::fmt::Display for ViewId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ViewId::Left => write!(f, "left"),
            ViewId::Right => write!(f, "right"),
        }
    }
}

/// One rendering surface receiving playback commands
///
/// Sinks never decide their own play state: the controller broadcasts a
/// single play intent to every attached sink, which is what keeps the
/// stereo pair from diverging. A real stereo decoder producing genuinely
/// distinct streams would slot in behind this same trait.
pub trait PlaybackSink: Send + Sync {
    /// Apply the shared play intent to this surface
    fn set_playing(&self, playing: bool);

    /// Report the play state this surface currently renders
    fn is_playing(&self) -> bool;
}
