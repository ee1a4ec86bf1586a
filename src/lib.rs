//! medialink bridges a media player's playback state to the operating
//! system's media control surface (the "now playing" overlay) and routes
//! hardware media-key presses back into the player.
//!
//! The crate owns the synchronization core only: debouncing rapid key
//! presses, suppressing echo notifications while it is itself driving the
//! player, and projecting player state onto the surface. Audio playback,
//! artwork decoding and the OS widget itself live behind the [`Player`],
//! [`ControlSurface`] and [`MediaKeyHook`] traits.

pub mod config;
pub mod error;
pub mod hook;
pub mod models;
pub mod player;
pub mod projector;
pub mod router;
pub mod session;
pub mod surface;
pub mod sync;

#[cfg(test)]
pub(crate) mod testutil;

pub use config::Config;
pub use error::BridgeError;
pub use hook::{HookSubscription, MediaKeyHook};
pub use player::Player;
pub use session::MediaBridge;
pub use surface::{ControlSurface, SharedSurface};
