use crate::error::BridgeError;
use crate::models::{PlaybackState, RepeatMode, TagKind};

/// The upstream collaborator: the media player whose state the bridge
/// mirrors onto the control surface.
///
/// Query operations hand back the player's current values directly and are
/// infallible; an implementation with nothing playing returns empty/zero
/// values. Mutations go through the player's own command path and may fail.
/// All calls are assumed synchronous and fast; implementations must be
/// callable from the notification, key-hook and ticker threads.
pub trait Player: Send + Sync {
    fn play_state(&self) -> PlaybackState;
    fn shuffle(&self) -> bool;
    fn repeat(&self) -> RepeatMode;
    /// Playback position of the current track, in milliseconds.
    fn position_ms(&self) -> u64;
    /// Duration of the current track in milliseconds; 0 between tracks.
    fn duration_ms(&self) -> u64;
    /// Volume on a 0.0-1.0 scale.
    fn volume(&self) -> f32;
    /// URL of the current track, or None when nothing is loaded.
    fn file_url(&self) -> Option<String>;
    /// Tag value for the current track; empty string when the tag is unset.
    fn file_tag(&self, kind: TagKind) -> String;
    /// Raw artwork bytes for the current track, if any.
    fn artwork(&self) -> Option<Vec<u8>>;

    /// Toggles between playing and paused.
    fn play_pause(&self) -> Result<(), BridgeError>;
    fn stop(&self) -> Result<(), BridgeError>;
    fn play_previous(&self) -> Result<(), BridgeError>;
    fn play_next(&self) -> Result<(), BridgeError>;
    fn set_position_ms(&self, position_ms: u64) -> Result<(), BridgeError>;
    fn set_volume(&self, volume: f32) -> Result<(), BridgeError>;
    fn set_shuffle(&self, enabled: bool) -> Result<(), BridgeError>;
    fn set_repeat(&self, mode: RepeatMode) -> Result<(), BridgeError>;
}
