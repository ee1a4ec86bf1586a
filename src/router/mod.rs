use std::sync::Arc;
use std::time::Instant;
use tracing::debug;

use crate::error::BridgeError;
use crate::models::{MediaKey, PlaybackState, PlayerEvent, SurfaceCommand};
use crate::player::Player;
use crate::projector::StateProjector;
use crate::sync::{DebounceGate, ReentrancyGuard};

/// Maps inbound surface commands and hardware key presses to player calls,
/// and player notifications to projections.
///
/// Every core-initiated player mutation runs under the reentrancy guard so
/// the echo notification it triggers cannot re-enter the projection path;
/// the command's own explicit refresh is the only one that runs. Hardware
/// key presses additionally pass the debounce gate first.
pub struct CommandRouter {
    player: Arc<dyn Player>,
    projector: StateProjector,
    gate: DebounceGate,
    guard: ReentrancyGuard,
    volume_step: f32,
}

impl CommandRouter {
    pub fn new(
        player: Arc<dyn Player>,
        projector: StateProjector,
        gate: DebounceGate,
        guard: ReentrancyGuard,
        volume_step: f32,
    ) -> Self {
        Self {
            player,
            projector,
            gate,
            guard,
            volume_step,
        }
    }

    /// Startup projection: capability flags, then display, shuffle and
    /// repeat so the surface reflects the player from the first frame.
    pub fn startup(&mut self) -> Result<(), BridgeError> {
        self.projector.register_capabilities()?;
        self.projector.project_display()?;
        self.projector.project_shuffle()?;
        self.projector.project_repeat()?;
        Ok(())
    }

    pub fn handle_event(&mut self, event: PlayerEvent) -> Result<(), BridgeError> {
        match event {
            PlayerEvent::Startup => self.startup(),
            PlayerEvent::PlayStateChanged => self.projector.project_play_state(),
            PlayerEvent::TrackChanged => self.projector.project_display(),
            PlayerEvent::ShuffleChanged => self.projector.project_shuffle(),
            PlayerEvent::RepeatChanged => self.projector.project_repeat(),
        }
    }

    pub fn handle_command(&mut self, command: SurfaceCommand) -> Result<(), BridgeError> {
        match command {
            SurfaceCommand::Play => self.play_pause(false),
            SurfaceCommand::Pause => self.play_pause(true),
            SurfaceCommand::Stop => self.stop(),
            SurfaceCommand::Next => self.next(),
            SurfaceCommand::Previous => self.previous(),
            SurfaceCommand::Rewind | SurfaceCommand::FastForward => {
                // Capabilities report these disabled; drop them if a surface
                // sends one anyway.
                debug!(?command, "unsupported surface command ignored");
                Ok(())
            }
            SurfaceCommand::VolumeUp => self.adjust_volume(self.volume_step),
            SurfaceCommand::VolumeDown => self.adjust_volume(-self.volume_step),
            SurfaceCommand::Seek { position_ms } => {
                // An explicit scrub gesture is never debounced.
                self.guard.with(|| self.player.set_position_ms(position_ms))
            }
            SurfaceCommand::SetShuffle { enabled } => {
                self.guard.with(|| self.player.set_shuffle(enabled))
            }
            SurfaceCommand::SetRepeat { mode } => {
                self.guard.with(|| self.player.set_repeat(mode.into()))
            }
        }
    }

    /// Routes a hardware key press, subject to the debounce gate. A rejected
    /// press is dropped, not queued.
    pub fn handle_media_key(&mut self, key: MediaKey) -> Result<(), BridgeError> {
        self.handle_media_key_at(key, Instant::now())
    }

    pub(crate) fn handle_media_key_at(
        &mut self,
        key: MediaKey,
        now: Instant,
    ) -> Result<(), BridgeError> {
        if !self.gate.allow(key.command_class(), now) {
            debug!(?key, "key press suppressed by debounce gate");
            return Ok(());
        }
        match key {
            MediaKey::PlayPause => {
                let pause = matches!(self.player.play_state(), PlaybackState::Playing);
                self.play_pause(pause)
            }
            MediaKey::Stop => self.stop(),
            MediaKey::PreviousTrack => self.previous(),
            MediaKey::NextTrack => self.next(),
        }
    }

    /// Session teardown, delegated to the projector.
    pub fn shutdown(&mut self) -> Result<(), BridgeError> {
        self.projector.shutdown()
    }

    fn play_pause(&mut self, request_pause: bool) -> Result<(), BridgeError> {
        let _scope = self.guard.enter();
        match self.player.play_state() {
            PlaybackState::Playing if request_pause => self.player.play_pause()?,
            PlaybackState::Paused if !request_pause => self.player.play_pause()?,
            // Stopped/Loading/Undefined, or a redundant request: ignored.
            _ => {}
        }
        // Refresh even on the ignored branches so the surface stays
        // consistent with whatever the player actually did.
        self.projector.project_play_state()
    }

    fn stop(&mut self) -> Result<(), BridgeError> {
        let _scope = self.guard.enter();
        self.player.stop()?;
        self.projector.project_play_state()
    }

    fn previous(&mut self) -> Result<(), BridgeError> {
        let _scope = self.guard.enter();
        self.player.play_previous()?;
        self.projector.project_display()
    }

    fn next(&mut self) -> Result<(), BridgeError> {
        let _scope = self.guard.enter();
        self.player.play_next()?;
        self.projector.project_display()
    }

    fn adjust_volume(&mut self, delta: f32) -> Result<(), BridgeError> {
        let volume = (self.player.volume() + delta).clamp(0.0, 1.0);
        self.guard.with(|| self.player.set_volume(volume))
    }
}
