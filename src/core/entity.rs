//! Game entity ids and card storage
//!
//! Ids are simple contiguous integers for human readability and dense storage.
//! Cards are never deallocated during a game except when a token ceases to
//! exist, so ids stay stable for the whole game.

use crate::core::Card;
use crate::{EngineError, Result};
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier for a card instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CardId(u32);

impl CardId {
    pub const fn new(id: u32) -> Self {
        CardId(id)
    }

    pub fn as_u32(&self) -> u32 {
        self.0
    }
}

impl fmt::Display for CardId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Identifier for a player. Two-player games use 0 and 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PlayerId(u32);

impl PlayerId {
    pub const fn new(id: u32) -> Self {
        PlayerId(id)
    }

    pub fn as_u32(&self) -> u32 {
        self.0
    }

    /// Index into `GameState::players` (player ids are assigned densely).
    pub fn index(&self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "P{}", self.0)
    }
}

/// Central storage for all card instances in one game.
///
/// Uses FxHashMap for fast hashing of integer keys. Cards persist here for
/// the whole game; zone membership is tracked separately by `PlayerZones`.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct CardStore {
    cards: FxHashMap<CardId, Card>,
    next_id: u32,
}

impl CardStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Generate a fresh unique card id.
    pub fn next_id(&mut self) -> CardId {
        let id = CardId::new(self.next_id);
        self.next_id += 1;
        id
    }

    pub fn insert(&mut self, card: Card) {
        self.cards.insert(card.id, card);
    }

    pub fn get(&self, id: CardId) -> Result<&Card> {
        self.cards.get(&id).ok_or(EngineError::EntityNotFound(id.as_u32()))
    }

    pub fn get_mut(&mut self, id: CardId) -> Result<&mut Card> {
        self.cards
            .get_mut(&id)
            .ok_or(EngineError::EntityNotFound(id.as_u32()))
    }

    pub fn contains(&self, id: CardId) -> bool {
        self.cards.contains_key(&id)
    }

    /// Remove a card entity outright. Only used for tokens, which cease to
    /// exist instead of changing zones.
    pub fn remove(&mut self, id: CardId) -> Option<Card> {
        self.cards.remove(&id)
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }
}
