use std::sync::Arc;
use std::time::Duration;

use crate::error::BridgeError;
use crate::models::{
    Capabilities, DisplayMetadata, PlaybackState, SurfaceStatus, TagKind, TrackSnapshot,
};
use crate::player::Player;
use crate::surface::SharedSurface;

mod ticker;

pub use ticker::PositionTicker;

/// One-way translation of player state into control-surface state.
///
/// Every projection is idempotent: it reads the player fresh and overwrites
/// the surface completely, so calling it twice with unchanged player state
/// leaves the surface identical. The projector never mutates the player.
pub struct StateProjector {
    player: Arc<dyn Player>,
    surface: SharedSurface,
    ticker: PositionTicker,
    /// Buffer currently bound as the surface thumbnail. Released only after
    /// the surface has been unbound from it.
    thumbnail: Option<Vec<u8>>,
}

impl StateProjector {
    pub fn new(player: Arc<dyn Player>, surface: SharedSurface, tick_interval: Duration) -> Self {
        Self {
            player,
            surface,
            ticker: PositionTicker::new(tick_interval),
            thumbnail: None,
        }
    }

    /// Registers the transport capabilities the bridge supports.
    pub fn register_capabilities(&mut self) -> Result<(), BridgeError> {
        self.surface
            .lock()
            .unwrap()
            .set_capabilities(&Capabilities::default())
    }

    /// Pushes the current track's metadata and artwork to the surface.
    ///
    /// All prior display fields and the thumbnail are cleared first so a
    /// track with fewer tags never shows leftovers from the previous one.
    /// With no current track the surface is left cleared.
    pub fn project_display(&mut self) -> Result<(), BridgeError> {
        let snapshot = self.snapshot();
        let mut surface = self.surface.lock().unwrap();

        surface.clear_display()?;
        surface.set_thumbnail(None)?;
        self.thumbnail = None;

        let Some(snapshot) = snapshot else {
            return Ok(());
        };

        surface.set_display(&snapshot.display)?;
        if let Some(bytes) = snapshot.artwork {
            // The buffer is fully materialized before it is bound, and kept
            // alive until the next unbind.
            let bytes = self.thumbnail.insert(bytes);
            surface.set_thumbnail(Some(bytes.as_slice()))?;
        }
        Ok(())
    }

    /// Mirrors the player's play state onto the surface status and keeps the
    /// position ticker alive exactly while the player is playing.
    ///
    /// Loading/Undefined leave the surface at its last known status. The
    /// ticker stop is idempotent, so the first transition to Paused/Stopped
    /// is safe even when the ticker never ran.
    pub fn project_play_state(&mut self) -> Result<(), BridgeError> {
        match self.player.play_state() {
            PlaybackState::Playing => {
                self.surface
                    .lock()
                    .unwrap()
                    .set_status(SurfaceStatus::Playing)?;
                self.ticker
                    .start(Arc::clone(&self.player), Arc::clone(&self.surface));
            }
            PlaybackState::Paused => {
                self.surface
                    .lock()
                    .unwrap()
                    .set_status(SurfaceStatus::Paused)?;
                self.ticker.stop();
            }
            PlaybackState::Stopped => {
                self.surface
                    .lock()
                    .unwrap()
                    .set_status(SurfaceStatus::Stopped)?;
                self.ticker.stop();
            }
            PlaybackState::Loading | PlaybackState::Undefined => {}
        }
        Ok(())
    }

    pub fn project_shuffle(&mut self) -> Result<(), BridgeError> {
        let enabled = self.player.shuffle();
        self.surface.lock().unwrap().set_shuffle(enabled)
    }

    pub fn project_repeat(&mut self) -> Result<(), BridgeError> {
        let mode = self.player.repeat().into();
        self.surface.lock().unwrap().set_repeat(mode)
    }

    /// Pushes the current timeline. Normally driven by the ticker; tolerates
    /// a zero duration between tracks.
    pub fn project_position(&mut self) -> Result<(), BridgeError> {
        ticker::push_position(self.player.as_ref(), &self.surface)
    }

    /// Session teardown: stops the ticker and unbinds the thumbnail.
    pub fn shutdown(&mut self) -> Result<(), BridgeError> {
        self.ticker.stop();
        let mut surface = self.surface.lock().unwrap();
        surface.set_thumbnail(None)?;
        self.thumbnail = None;
        Ok(())
    }

    fn snapshot(&self) -> Option<TrackSnapshot> {
        let url = self.player.file_url()?;
        let mut display = DisplayMetadata {
            title: self.player.file_tag(TagKind::Title),
            artist: self.player.file_tag(TagKind::Artist),
            album: self.player.file_tag(TagKind::Album),
            album_artist: self.player.file_tag(TagKind::AlbumArtist),
            track_number: self.player.file_tag(TagKind::TrackNumber).parse().ok(),
            track_count: self.player.file_tag(TagKind::TrackCount).parse().ok(),
        };
        if display.title.is_empty() {
            display.title = TrackSnapshot::title_from_url(&url).to_string();
        }
        Some(TrackSnapshot {
            display,
            artwork: self.player.artwork(),
        })
    }
}

impl std::fmt::Debug for StateProjector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StateProjector")
            .field("ticker", &self.ticker)
            .field("thumbnail_bytes", &self.thumbnail.as_ref().map(Vec::len))
            .finish()
    }
}
