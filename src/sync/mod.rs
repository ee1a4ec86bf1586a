//! Synchronization primitives of the bridge core: the debounce gate for
//! hardware key presses and the reentrancy guard that keeps command-driven
//! player mutations from echoing back through the notification handlers.

mod debounce;
mod guard;

pub use debounce::DebounceGate;
pub use guard::{GuardScope, ReentrancyGuard};
