use std::sync::{Arc, Mutex};
use tracing::{debug, error, info};

use crate::config::Config;
use crate::error::BridgeError;
use crate::hook::{HookSubscription, MediaKeyHook};
use crate::models::{MediaKey, PlayerEvent, SurfaceCommand};
use crate::player::Player;
use crate::projector::StateProjector;
use crate::router::CommandRouter;
use crate::surface::SharedSurface;
use crate::sync::{DebounceGate, ReentrancyGuard};

/// One bridge session: player on one side, control surface on the other,
/// hardware media keys feeding in.
///
/// All three entry points may be called from different threads (the OS
/// event-dispatch thread, the key hook, the player's notification thread);
/// the router mutex keeps their guarded sections single-flight. A failing
/// handler is logged and never tears the session down.
pub struct MediaBridge {
    router: Mutex<CommandRouter>,
    guard: ReentrancyGuard,
    hook_subscription: Mutex<Option<HookSubscription>>,
}

impl MediaBridge {
    pub fn new(player: Arc<dyn Player>, surface: SharedSurface, config: &Config) -> Arc<Self> {
        let guard = ReentrancyGuard::new();
        let projector = StateProjector::new(
            Arc::clone(&player),
            surface,
            config.timeline.tick_interval(),
        );
        let router = CommandRouter::new(
            player,
            projector,
            DebounceGate::new(config.debounce.threshold()),
            guard.clone(),
            config.volume.step,
        );

        Arc::new(Self {
            router: Mutex::new(router),
            guard,
            hook_subscription: Mutex::new(None),
        })
    }

    /// Installs the hardware key hook. The subscription is torn down on
    /// [`shutdown`](Self::shutdown), or when the bridge is dropped.
    pub fn attach_hook(self: &Arc<Self>, hook: &mut dyn MediaKeyHook) -> Result<(), BridgeError> {
        let bridge = Arc::downgrade(self);
        let subscription = hook.subscribe(Box::new(move |key| {
            if let Some(bridge) = bridge.upgrade() {
                bridge.handle_media_key(key);
            }
        }))?;
        *self.hook_subscription.lock().unwrap() = Some(subscription);
        info!("media key hook attached");
        Ok(())
    }

    /// Entry point for player notifications.
    ///
    /// While the guard is active the bridge itself issued the player command
    /// that produced this notification; the command's own projection already
    /// covers it, so the echo is dropped here.
    pub fn handle_player_event(&self, event: PlayerEvent) {
        if event != PlayerEvent::Startup && self.guard.is_active() {
            debug!(?event, "notification suppressed while command in flight");
            return;
        }
        let result = self.router.lock().unwrap().handle_event(event);
        if let Err(e) = result {
            error!("failed to handle player event {event:?}: {e}");
        }
    }

    /// Entry point for commands from the control surface.
    pub fn handle_surface_command(&self, command: SurfaceCommand) {
        let result = self.router.lock().unwrap().handle_command(command);
        if let Err(e) = result {
            error!("failed to handle surface command {command:?}: {e}");
        }
    }

    /// Entry point for hardware media-key presses.
    pub fn handle_media_key(&self, key: MediaKey) {
        let result = self.router.lock().unwrap().handle_media_key(key);
        if let Err(e) = result {
            error!("failed to handle media key {key:?}: {e}");
        }
    }

    /// Tears the session down: unsubscribes the key hook, stops the position
    /// ticker and unbinds the thumbnail.
    pub fn shutdown(&self) {
        self.hook_subscription.lock().unwrap().take();
        if let Err(e) = self.router.lock().unwrap().shutdown() {
            error!("shutdown cleanup failed: {e}");
        }
        info!("media bridge shut down");
    }
}
