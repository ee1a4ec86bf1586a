use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// Flag that suppresses echo notifications while the bridge is itself
/// driving the player.
///
/// Notification handlers check [`is_active`](Self::is_active) at entry and
/// no-op while a command holds the flag; the command's own explicit
/// projection call is the only refresh that runs. The flag is shared between
/// the key-hook, surface-command and player-notification threads, hence the
/// atomic.
#[derive(Debug, Clone, Default)]
pub struct ReentrancyGuard {
    flag: Arc<AtomicBool>,
}

impl ReentrancyGuard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_active(&self) -> bool {
        self.flag.load(Ordering::SeqCst)
    }

    /// Raises the flag until the returned scope is dropped.
    ///
    /// The scope restores the previous value on every exit path, including
    /// panics, so a failing command can never leave the session stuck in the
    /// suppressed state.
    pub fn enter(&self) -> GuardScope {
        let previous = self.flag.swap(true, Ordering::SeqCst);
        GuardScope {
            flag: Arc::clone(&self.flag),
            previous,
        }
    }

    /// Runs `f` with the flag raised.
    pub fn with<T>(&self, f: impl FnOnce() -> T) -> T {
        let _scope = self.enter();
        f()
    }
}

pub struct GuardScope {
    flag: Arc<AtomicBool>,
    previous: bool,
}

impl Drop for GuardScope {
    fn drop(&mut self) {
        self.flag.store(self.previous, Ordering::SeqCst);
    }
}
