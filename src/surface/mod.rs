use std::sync::{Arc, Mutex};

use crate::error::BridgeError;
use crate::models::{Capabilities, DisplayMetadata, SurfaceRepeatMode, SurfaceStatus, Timeline};

#[cfg(feature = "souvlaki-backend")]
pub mod souvlaki_backend;

/// The downstream collaborator: the OS shell widget showing transport
/// controls and now-playing metadata.
///
/// Implementations are thin adapters; ordering and staleness rules live in
/// the projector, which always clears display fields and the thumbnail
/// before pushing replacements.
pub trait ControlSurface: Send {
    fn set_capabilities(&mut self, caps: &Capabilities) -> Result<(), BridgeError>;
    fn set_status(&mut self, status: SurfaceStatus) -> Result<(), BridgeError>;
    fn set_timeline(&mut self, timeline: &Timeline) -> Result<(), BridgeError>;
    fn set_shuffle(&mut self, enabled: bool) -> Result<(), BridgeError>;
    fn set_repeat(&mut self, mode: SurfaceRepeatMode) -> Result<(), BridgeError>;
    /// Resets all display fields to their empty state.
    fn clear_display(&mut self) -> Result<(), BridgeError>;
    fn set_display(&mut self, metadata: &DisplayMetadata) -> Result<(), BridgeError>;
    /// Binds new thumbnail bytes, or unbinds the thumbnail entirely on None.
    /// The caller guarantees the buffer outlives the binding.
    fn set_thumbnail(&mut self, artwork: Option<&[u8]>) -> Result<(), BridgeError>;
}

/// Surface handle shared between the command/notification handlers and the
/// position ticker thread.
pub type SharedSurface = Arc<Mutex<dyn ControlSurface>>;
