use std::collections::HashMap;
use std::time::{Duration, Instant};

use crate::models::CommandClass;

/// Suppresses rapid-fire hardware key presses of the same command class.
///
/// Only the hardware-key path consults the gate; commands coming from the
/// control surface are explicit user gestures on the OS widget and are never
/// dropped. A rejected press is discarded, not queued.
#[derive(Debug)]
pub struct DebounceGate {
    threshold: Duration,
    last_accepted: HashMap<CommandClass, Instant>,
}

impl DebounceGate {
    pub fn new(threshold: Duration) -> Self {
        Self {
            threshold,
            last_accepted: HashMap::new(),
        }
    }

    /// Returns true and records `now` if the press is accepted.
    ///
    /// A press is rejected when the previous accepted press of the same
    /// class is no older than the threshold. The first press per class is
    /// always accepted. Other classes never interfere.
    pub fn allow(&mut self, class: CommandClass, now: Instant) -> bool {
        if let Some(last) = self.last_accepted.get(&class) {
            if now.duration_since(*last) <= self.threshold {
                return false;
            }
        }
        self.last_accepted.insert(class, now);
        true
    }
}
