// error.rs - Error taxonomy
//
// Capability and permission failures are recoverable: the session records
// them as notices and offers a user-driven way forward.

use thiserror::Error;

use crate::session::SessionMode;

#[derive(Debug, Error)]
pub enum WorldError {
    #[error("device cannot run the AR experience: {0}")]
    CapabilityUnsupported(String),

    #[error("motion sensor permission denied")]
    PermissionDenied,

    #[error("motion sensor permission request failed: {0}")]
    PermissionRequest(String),

    #[error("invalid session transition from {from:?} to {to:?}")]
    InvalidTransition { from: SessionMode, to: SessionMode },

    #[error("invalid placement: {0}")]
    InvalidPlacement(String),

    #[error("no orb with index {0}")]
    UnknownOrb(usize),

    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("failed to parse configuration")]
    ConfigParse(#[from] serde_json::Error),
}

impl WorldError {
    /// Whether the user can recover through a fallback or retry action.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Self::CapabilityUnsupported(_) | Self::PermissionDenied | Self::PermissionRequest(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, WorldError>;
