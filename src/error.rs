//! Error types for the manastack rules engine

use thiserror::Error;

#[derive(Error, Debug)]
pub enum EngineError {
    /// An action failed the legality check. This is a permanent rejection
    /// for the current game state; the caller must choose a different action.
    #[error("Illegal action ({kind}): {reason}")]
    IllegalAction { kind: String, reason: String },

    #[error("Entity not found: {0}")]
    EntityNotFound(u32),

    /// An effect, template, or keyword name was not found in the registry.
    /// Callers at the effect-application boundary log this and continue.
    #[error("Unknown effect descriptor: {0}")]
    UnknownDescriptor(String),

    /// An effect applier failed partway through. Caught at the
    /// effect-application boundary and downgraded to a no-op.
    #[error("Effect application failed: {0}")]
    EffectFailed(String),

    /// Engine invariant violation (e.g. runaway priority loop).
    #[error("Internal engine error: {0}")]
    Internal(String),
}

impl EngineError {
    pub fn illegal(kind: impl Into<String>, reason: impl Into<String>) -> Self {
        EngineError::IllegalAction {
            kind: kind.into(),
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, EngineError>;
