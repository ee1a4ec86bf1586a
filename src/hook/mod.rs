use crate::error::BridgeError;
use crate::models::MediaKey;

/// Callback invoked for every hardware media-key press.
pub type MediaKeyHandler = Box<dyn Fn(MediaKey) + Send + Sync>;

/// OS input-hook abstraction for hardware media keys.
///
/// Implementations install whatever process-wide interception the platform
/// needs and invoke the handler for {PlayPause, Stop, PreviousTrack,
/// NextTrack}. The subscription is tied to the session: dropping the
/// returned [`HookSubscription`] must tear the hook down.
pub trait MediaKeyHook {
    fn subscribe(&mut self, handler: MediaKeyHandler) -> Result<HookSubscription, BridgeError>;
}

/// RAII handle for an installed key hook; unsubscribes on drop.
pub struct HookSubscription {
    unsubscribe: Option<Box<dyn FnOnce() + Send>>,
}

impl HookSubscription {
    pub fn new(unsubscribe: impl FnOnce() + Send + 'static) -> Self {
        Self {
            unsubscribe: Some(Box::new(unsubscribe)),
        }
    }

    /// A subscription with no teardown, for hooks that need none.
    pub fn noop() -> Self {
        Self { unsubscribe: None }
    }
}

impl Drop for HookSubscription {
    fn drop(&mut self) {
        if let Some(unsubscribe) = self.unsubscribe.take() {
            unsubscribe();
        }
    }
}

impl std::fmt::Debug for HookSubscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HookSubscription")
            .field("active", &self.unsubscribe.is_some())
            .finish()
    }
}
