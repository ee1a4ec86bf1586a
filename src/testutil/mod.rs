//! Shared test doubles: an in-memory player and a call-recording surface.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use crate::error::BridgeError;
use crate::hook::{HookSubscription, MediaKeyHandler, MediaKeyHook};
use crate::models::{
    Capabilities, DisplayMetadata, MediaKey, PlaybackState, PositionSnapshot, RepeatMode,
    SurfaceRepeatMode, SurfaceStatus, TagKind, Timeline,
};
use crate::player::Player;
use crate::surface::{ControlSurface, SharedSurface};

/// Player mutations recorded by [`MockPlayer`].
#[derive(Debug, Clone, Default)]
pub struct PlayerCalls {
    pub play_pause: usize,
    pub stop: usize,
    pub previous: usize,
    pub next: usize,
    pub set_position: Vec<u64>,
    pub set_volume: Vec<f32>,
    pub set_shuffle: Vec<bool>,
    pub set_repeat: Vec<RepeatMode>,
}

#[derive(Debug, Default)]
struct PlayerData {
    state: PlaybackState,
    shuffle: bool,
    repeat: RepeatMode,
    position: PositionSnapshot,
    volume: f32,
    url: Option<String>,
    title: String,
    artist: String,
    album: String,
    album_artist: String,
    track_number: String,
    track_count: String,
    artwork: Option<Vec<u8>>,
    fail_commands: bool,
    calls: PlayerCalls,
}

/// In-memory player whose mutations behave like the real thing: play/pause
/// toggles the state, stop stops, and every command is recorded.
#[derive(Debug, Default)]
pub struct MockPlayer {
    data: Mutex<PlayerData>,
}

impl MockPlayer {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn set_state(&self, state: PlaybackState) {
        self.data.lock().unwrap().state = state;
    }

    #[allow(clippy::too_many_arguments)]
    pub fn set_track(
        &self,
        url: &str,
        title: &str,
        artist: &str,
        album: &str,
        album_artist: &str,
        track_number: &str,
        track_count: &str,
    ) {
        let mut data = self.data.lock().unwrap();
        data.url = Some(url.to_string());
        data.title = title.to_string();
        data.artist = artist.to_string();
        data.album = album.to_string();
        data.album_artist = album_artist.to_string();
        data.track_number = track_number.to_string();
        data.track_count = track_count.to_string();
    }

    pub fn clear_track(&self) {
        let mut data = self.data.lock().unwrap();
        data.url = None;
        data.artwork = None;
    }

    pub fn set_artwork(&self, artwork: Option<Vec<u8>>) {
        self.data.lock().unwrap().artwork = artwork;
    }

    pub fn set_position(&self, position: PositionSnapshot) {
        self.data.lock().unwrap().position = position;
    }

    pub fn set_volume_state(&self, volume: f32) {
        self.data.lock().unwrap().volume = volume;
    }

    pub fn set_shuffle_state(&self, enabled: bool) {
        self.data.lock().unwrap().shuffle = enabled;
    }

    pub fn set_repeat_state(&self, mode: RepeatMode) {
        self.data.lock().unwrap().repeat = mode;
    }

    pub fn fail_commands(&self, fail: bool) {
        self.data.lock().unwrap().fail_commands = fail;
    }

    pub fn calls(&self) -> PlayerCalls {
        self.data.lock().unwrap().calls.clone()
    }

    fn check_failure(data: &PlayerData) -> Result<(), BridgeError> {
        if data.fail_commands {
            Err(BridgeError::Player("mock command failure".to_string()))
        } else {
            Ok(())
        }
    }
}

impl Player for MockPlayer {
    fn play_state(&self) -> PlaybackState {
        self.data.lock().unwrap().state
    }

    fn shuffle(&self) -> bool {
        self.data.lock().unwrap().shuffle
    }

    fn repeat(&self) -> RepeatMode {
        self.data.lock().unwrap().repeat
    }

    fn position_ms(&self) -> u64 {
        self.data.lock().unwrap().position.position_ms
    }

    fn duration_ms(&self) -> u64 {
        self.data.lock().unwrap().position.duration_ms
    }

    fn volume(&self) -> f32 {
        self.data.lock().unwrap().volume
    }

    fn file_url(&self) -> Option<String> {
        self.data.lock().unwrap().url.clone()
    }

    fn file_tag(&self, kind: TagKind) -> String {
        let data = self.data.lock().unwrap();
        match kind {
            TagKind::Title => data.title.clone(),
            TagKind::Artist => data.artist.clone(),
            TagKind::Album => data.album.clone(),
            TagKind::AlbumArtist => data.album_artist.clone(),
            TagKind::TrackNumber => data.track_number.clone(),
            TagKind::TrackCount => data.track_count.clone(),
        }
    }

    fn artwork(&self) -> Option<Vec<u8>> {
        self.data.lock().unwrap().artwork.clone()
    }

    fn play_pause(&self) -> Result<(), BridgeError> {
        let mut data = self.data.lock().unwrap();
        Self::check_failure(&data)?;
        data.calls.play_pause += 1;
        data.state = match data.state {
            PlaybackState::Playing => PlaybackState::Paused,
            PlaybackState::Paused => PlaybackState::Playing,
            other => other,
        };
        Ok(())
    }

    fn stop(&self) -> Result<(), BridgeError> {
        let mut data = self.data.lock().unwrap();
        Self::check_failure(&data)?;
        data.calls.stop += 1;
        data.state = PlaybackState::Stopped;
        Ok(())
    }

    fn play_previous(&self) -> Result<(), BridgeError> {
        let mut data = self.data.lock().unwrap();
        Self::check_failure(&data)?;
        data.calls.previous += 1;
        Ok(())
    }

    fn play_next(&self) -> Result<(), BridgeError> {
        let mut data = self.data.lock().unwrap();
        Self::check_failure(&data)?;
        data.calls.next += 1;
        Ok(())
    }

    fn set_position_ms(&self, position_ms: u64) -> Result<(), BridgeError> {
        let mut data = self.data.lock().unwrap();
        Self::check_failure(&data)?;
        data.calls.set_position.push(position_ms);
        data.position.position_ms = position_ms;
        Ok(())
    }

    fn set_volume(&self, volume: f32) -> Result<(), BridgeError> {
        let mut data = self.data.lock().unwrap();
        Self::check_failure(&data)?;
        data.calls.set_volume.push(volume);
        data.volume = volume.clamp(0.0, 1.0);
        Ok(())
    }

    fn set_shuffle(&self, enabled: bool) -> Result<(), BridgeError> {
        let mut data = self.data.lock().unwrap();
        Self::check_failure(&data)?;
        data.calls.set_shuffle.push(enabled);
        data.shuffle = enabled;
        Ok(())
    }

    fn set_repeat(&self, mode: RepeatMode) -> Result<(), BridgeError> {
        let mut data = self.data.lock().unwrap();
        Self::check_failure(&data)?;
        data.calls.set_repeat.push(mode);
        data.repeat = mode;
        Ok(())
    }
}

/// One surface update, as recorded by [`RecordingSurface`]. Thumbnail binds
/// record the byte length only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SurfaceCall {
    Capabilities(Capabilities),
    Status(SurfaceStatus),
    Timeline(Timeline),
    Shuffle(bool),
    Repeat(SurfaceRepeatMode),
    ClearDisplay,
    Display(DisplayMetadata),
    Thumbnail(Option<usize>),
}

/// Control surface that applies every update to plain fields and keeps an
/// ordered log of calls.
#[derive(Debug, Default)]
pub struct RecordingSurface {
    pub calls: Vec<SurfaceCall>,
    pub capabilities: Option<Capabilities>,
    pub status: SurfaceStatus,
    pub timeline: Timeline,
    pub shuffle: bool,
    pub repeat: SurfaceRepeatMode,
    pub display: DisplayMetadata,
    pub thumbnail: Option<Vec<u8>>,
    pub fail_updates: bool,
}

impl RecordingSurface {
    /// Returns the same surface both as its concrete type (for assertions)
    /// and as the shared trait object the bridge consumes.
    pub fn shared() -> (Arc<Mutex<RecordingSurface>>, SharedSurface) {
        let typed = Arc::new(Mutex::new(RecordingSurface::default()));
        let shared: SharedSurface = typed.clone();
        (typed, shared)
    }

    pub fn status_updates(&self) -> Vec<SurfaceStatus> {
        self.calls
            .iter()
            .filter_map(|call| match call {
                SurfaceCall::Status(status) => Some(*status),
                _ => None,
            })
            .collect()
    }

    fn check_failure(&self) -> Result<(), BridgeError> {
        if self.fail_updates {
            Err(BridgeError::Surface("mock update failure".to_string()))
        } else {
            Ok(())
        }
    }
}

impl ControlSurface for RecordingSurface {
    fn set_capabilities(&mut self, caps: &Capabilities) -> Result<(), BridgeError> {
        self.check_failure()?;
        self.calls.push(SurfaceCall::Capabilities(*caps));
        self.capabilities = Some(*caps);
        Ok(())
    }

    fn set_status(&mut self, status: SurfaceStatus) -> Result<(), BridgeError> {
        self.check_failure()?;
        self.calls.push(SurfaceCall::Status(status));
        self.status = status;
        Ok(())
    }

    fn set_timeline(&mut self, timeline: &Timeline) -> Result<(), BridgeError> {
        self.check_failure()?;
        self.calls.push(SurfaceCall::Timeline(*timeline));
        self.timeline = *timeline;
        Ok(())
    }

    fn set_shuffle(&mut self, enabled: bool) -> Result<(), BridgeError> {
        self.check_failure()?;
        self.calls.push(SurfaceCall::Shuffle(enabled));
        self.shuffle = enabled;
        Ok(())
    }

    fn set_repeat(&mut self, mode: SurfaceRepeatMode) -> Result<(), BridgeError> {
        self.check_failure()?;
        self.calls.push(SurfaceCall::Repeat(mode));
        self.repeat = mode;
        Ok(())
    }

    fn clear_display(&mut self) -> Result<(), BridgeError> {
        self.check_failure()?;
        self.calls.push(SurfaceCall::ClearDisplay);
        self.display = DisplayMetadata::default();
        Ok(())
    }

    fn set_display(&mut self, metadata: &DisplayMetadata) -> Result<(), BridgeError> {
        self.check_failure()?;
        self.calls.push(SurfaceCall::Display(metadata.clone()));
        self.display = metadata.clone();
        Ok(())
    }

    fn set_thumbnail(&mut self, artwork: Option<&[u8]>) -> Result<(), BridgeError> {
        self.check_failure()?;
        self.calls
            .push(SurfaceCall::Thumbnail(artwork.map(<[u8]>::len)));
        self.thumbnail = artwork.map(<[u8]>::to_vec);
        Ok(())
    }
}

/// Key hook whose handler can be fired manually from tests.
#[derive(Default)]
pub struct MockHook {
    handler: Arc<Mutex<Option<MediaKeyHandler>>>,
    subscribe_failures: bool,
    unsubscribed: Arc<AtomicBool>,
}

impl MockHook {
    /// A hook whose subscribe call always fails.
    pub fn failing() -> Self {
        Self {
            subscribe_failures: true,
            ..Self::default()
        }
    }

    pub fn fire(&self, key: MediaKey) {
        if let Some(handler) = self.handler.lock().unwrap().as_ref() {
            handler(key);
        }
    }

    pub fn is_subscribed(&self) -> bool {
        self.handler.lock().unwrap().is_some()
    }

    pub fn was_unsubscribed(&self) -> bool {
        self.unsubscribed.load(Ordering::SeqCst)
    }
}

impl MediaKeyHook for MockHook {
    fn subscribe(&mut self, handler: MediaKeyHandler) -> Result<HookSubscription, BridgeError> {
        if self.subscribe_failures {
            return Err(BridgeError::Hook("mock subscribe failure".to_string()));
        }
        *self.handler.lock().unwrap() = Some(handler);
        let slot = Arc::clone(&self.handler);
        let unsubscribed = Arc::clone(&self.unsubscribed);
        Ok(HookSubscription::new(move || {
            slot.lock().unwrap().take();
            unsubscribed.store(true, Ordering::SeqCst);
        }))
    }
}
