//! Control-surface adapter backed by the `souvlaki` crate (SMTC on Windows,
//! MPRIS on Linux, MPNowPlayingInfoCenter on macOS).
//!
//! Thin by design: souvlaki has no shuffle/repeat surface and takes artwork
//! as a cover URL rather than bytes, so those updates are dropped here with
//! a debug log. All ordering rules live in the projector.

use std::time::Duration;
use tracing::debug;

use souvlaki::{
    MediaControlEvent, MediaControls, MediaMetadata, MediaPlayback, MediaPosition, SeekDirection,
};

use crate::error::BridgeError;
use crate::models::{
    Capabilities, DisplayMetadata, SurfaceCommand, SurfaceRepeatMode, SurfaceStatus, Timeline,
};
use crate::surface::ControlSurface;

pub struct SouvlakiSurface {
    controls: MediaControls,
    display: DisplayMetadata,
    timeline: Timeline,
    status: SurfaceStatus,
}

impl SouvlakiSurface {
    pub fn new(controls: MediaControls) -> Self {
        Self {
            controls,
            display: DisplayMetadata::default(),
            timeline: Timeline::default(),
            status: SurfaceStatus::Stopped,
        }
    }

    /// Forwards souvlaki events to `handler` as surface commands. Events
    /// with no counterpart in the command set are dropped.
    pub fn attach_commands(
        &mut self,
        handler: impl Fn(SurfaceCommand) + Send + 'static,
    ) -> Result<(), BridgeError> {
        self.controls
            .attach(move |event| {
                if let Some(command) = map_event(event) {
                    handler(command);
                }
            })
            .map_err(|e| BridgeError::Surface(format!("{e:?}")))
    }

    fn push_metadata(&mut self) -> Result<(), BridgeError> {
        let duration = (self.timeline.end_ms > 0)
            .then(|| Duration::from_millis(self.timeline.end_ms));
        let metadata = MediaMetadata {
            title: non_empty(&self.display.title),
            artist: non_empty(&self.display.artist),
            album: non_empty(&self.display.album),
            duration,
            ..Default::default()
        };
        self.controls
            .set_metadata(metadata)
            .map_err(|e| BridgeError::Surface(format!("{e:?}")))
    }

    fn push_playback(&mut self) -> Result<(), BridgeError> {
        let progress = Some(MediaPosition(Duration::from_millis(
            self.timeline.position_ms,
        )));
        let playback = match self.status {
            SurfaceStatus::Playing => MediaPlayback::Playing { progress },
            SurfaceStatus::Paused => MediaPlayback::Paused { progress },
            SurfaceStatus::Stopped => MediaPlayback::Stopped,
        };
        self.controls
            .set_playback(playback)
            .map_err(|e| BridgeError::Surface(format!("{e:?}")))
    }
}

impl ControlSurface for SouvlakiSurface {
    fn set_capabilities(&mut self, _caps: &Capabilities) -> Result<(), BridgeError> {
        // souvlaki derives capabilities from the attached handler.
        Ok(())
    }

    fn set_status(&mut self, status: SurfaceStatus) -> Result<(), BridgeError> {
        self.status = status;
        self.push_playback()
    }

    fn set_timeline(&mut self, timeline: &Timeline) -> Result<(), BridgeError> {
        self.timeline = *timeline;
        self.push_playback()
    }

    fn set_shuffle(&mut self, enabled: bool) -> Result<(), BridgeError> {
        debug!(enabled, "shuffle state not supported by this backend");
        Ok(())
    }

    fn set_repeat(&mut self, mode: SurfaceRepeatMode) -> Result<(), BridgeError> {
        debug!(?mode, "repeat state not supported by this backend");
        Ok(())
    }

    fn clear_display(&mut self) -> Result<(), BridgeError> {
        self.display = DisplayMetadata::default();
        self.push_metadata()
    }

    fn set_display(&mut self, metadata: &DisplayMetadata) -> Result<(), BridgeError> {
        self.display = metadata.clone();
        self.push_metadata()
    }

    fn set_thumbnail(&mut self, artwork: Option<&[u8]>) -> Result<(), BridgeError> {
        if artwork.is_some() {
            debug!("artwork bytes not supported by this backend");
        }
        Ok(())
    }
}

fn non_empty(value: &str) -> Option<&str> {
    (!value.is_empty()).then_some(value)
}

fn map_event(event: MediaControlEvent) -> Option<SurfaceCommand> {
    match event {
        MediaControlEvent::Play => Some(SurfaceCommand::Play),
        MediaControlEvent::Pause => Some(SurfaceCommand::Pause),
        MediaControlEvent::Stop => Some(SurfaceCommand::Stop),
        MediaControlEvent::Next => Some(SurfaceCommand::Next),
        MediaControlEvent::Previous => Some(SurfaceCommand::Previous),
        MediaControlEvent::Seek(SeekDirection::Backward) => Some(SurfaceCommand::Rewind),
        MediaControlEvent::Seek(SeekDirection::Forward) => Some(SurfaceCommand::FastForward),
        MediaControlEvent::SetPosition(MediaPosition(position)) => Some(SurfaceCommand::Seek {
            position_ms: position.as_millis() as u64,
        }),
        _ => None,
    }
}
