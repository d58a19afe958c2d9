//! manastack: a two-player trading-card-game rules engine.
//!
//! The engine is a deterministic, non-blocking core: actions come in
//! through [`game::RulesEngine::process_action`], get legality-checked,
//! executed, and followed by state-based actions and trigger processing.
//! When a decision is needed from a player who cannot answer
//! synchronously, the engine suspends and can be resumed later from the
//! same state.

pub mod core;
pub mod effects;
pub mod error;
pub mod game;
pub mod zones;

pub use error::{EngineError, Result};
