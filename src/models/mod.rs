use serde::{Deserialize, Serialize};

/// Playback state as reported by the player. The bridge only ever reads it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum PlaybackState {
    Playing,
    Paused,
    Stopped,
    Loading,
    #[default]
    Undefined,
}

/// Repeat mode on the player side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum RepeatMode {
    #[default]
    None,
    One,
    All,
}

impl std::fmt::Display for RepeatMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RepeatMode::None => write!(f, "none"),
            RepeatMode::One => write!(f, "one"),
            RepeatMode::All => write!(f, "all"),
        }
    }
}

impl std::str::FromStr for RepeatMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "none" => Ok(RepeatMode::None),
            "one" => Ok(RepeatMode::One),
            "all" => Ok(RepeatMode::All),
            _ => Err(format!("Invalid repeat mode: {s}")),
        }
    }
}

/// Repeat mode as the control surface models it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum SurfaceRepeatMode {
    #[default]
    None,
    Track,
    List,
}

impl From<RepeatMode> for SurfaceRepeatMode {
    fn from(mode: RepeatMode) -> Self {
        match mode {
            RepeatMode::None => SurfaceRepeatMode::None,
            RepeatMode::One => SurfaceRepeatMode::Track,
            RepeatMode::All => SurfaceRepeatMode::List,
        }
    }
}

impl From<SurfaceRepeatMode> for RepeatMode {
    fn from(mode: SurfaceRepeatMode) -> Self {
        match mode {
            SurfaceRepeatMode::None => RepeatMode::None,
            SurfaceRepeatMode::Track => RepeatMode::One,
            SurfaceRepeatMode::List => RepeatMode::All,
        }
    }
}

/// Transport status shown on the control surface. Loading/Undefined player
/// states have no counterpart; the surface keeps its last known status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum SurfaceStatus {
    Playing,
    Paused,
    #[default]
    Stopped,
}

/// Debounce key: commands of the same class share one suppression window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CommandClass {
    PlayPause,
    Stop,
    Previous,
    Next,
}

/// Raw hardware media-key press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaKey {
    PlayPause,
    Stop,
    PreviousTrack,
    NextTrack,
}

impl MediaKey {
    pub fn command_class(self) -> CommandClass {
        match self {
            MediaKey::PlayPause => CommandClass::PlayPause,
            MediaKey::Stop => CommandClass::Stop,
            MediaKey::PreviousTrack => CommandClass::Previous,
            MediaKey::NextTrack => CommandClass::Next,
        }
    }
}

/// Metadata tag kinds the bridge reads off the current track.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TagKind {
    Title,
    Artist,
    Album,
    AlbumArtist,
    TrackNumber,
    TrackCount,
}

/// Typed notifications delivered by the player.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerEvent {
    Startup,
    PlayStateChanged,
    TrackChanged,
    ShuffleChanged,
    RepeatChanged,
}

/// Commands emitted by the control surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SurfaceCommand {
    Play,
    Pause,
    Stop,
    Next,
    Previous,
    Rewind,
    FastForward,
    VolumeUp,
    VolumeDown,
    Seek { position_ms: u64 },
    SetShuffle { enabled: bool },
    SetRepeat { mode: SurfaceRepeatMode },
}

/// Display fields pushed to the control surface for the current track.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DisplayMetadata {
    pub title: String,
    pub artist: String,
    pub album: String,
    pub album_artist: String,
    pub track_number: Option<u32>,
    pub track_count: Option<u32>,
}

/// Point-in-time copy of the current track, derived fresh on every
/// track-changed event and never kept in sync afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackSnapshot {
    pub display: DisplayMetadata,
    pub artwork: Option<Vec<u8>>,
}

impl TrackSnapshot {
    /// Filename component of a track URL, used when the title tag is empty.
    /// Handles both separator styles since URLs come straight from the player.
    pub fn title_from_url(url: &str) -> &str {
        url.rsplit(['/', '\\']).next().unwrap_or(url)
    }
}

/// Position and duration of the current track, in milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PositionSnapshot {
    pub position_ms: u64,
    pub duration_ms: u64,
}

/// Timeline tuple as the control surface consumes it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Timeline {
    pub start_ms: u64,
    pub min_seek_ms: u64,
    pub position_ms: u64,
    pub max_seek_ms: u64,
    pub end_ms: u64,
}

impl From<PositionSnapshot> for Timeline {
    fn from(snapshot: PositionSnapshot) -> Self {
        Self {
            start_ms: 0,
            min_seek_ms: 0,
            position_ms: snapshot.position_ms,
            max_seek_ms: snapshot.duration_ms,
            end_ms: snapshot.duration_ms,
        }
    }
}

/// Capability flags registered on the control surface at startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Capabilities {
    pub play: bool,
    pub pause: bool,
    pub stop: bool,
    pub next: bool,
    pub previous: bool,
    pub rewind: bool,
    pub fast_forward: bool,
}

impl Default for Capabilities {
    fn default() -> Self {
        Self {
            play: true,
            pause: true,
            stop: true,
            next: true,
            previous: true,
            rewind: false,
            fast_forward: false,
        }
    }
}
