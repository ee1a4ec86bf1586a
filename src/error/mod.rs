use thiserror::Error;

/// Failures surfaced by the player or control-surface collaborators.
///
/// None of these are fatal to the session; handlers log them and keep
/// processing subsequent events.
#[derive(Debug, Clone, Error)]
pub enum BridgeError {
    #[error("player request failed: {0}")]
    Player(String),

    #[error("control surface update failed: {0}")]
    Surface(String),

    #[error("media key hook failed: {0}")]
    Hook(String),
}
