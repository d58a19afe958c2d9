//! Combat sub-state
//!
//! Tracks the current attack: who is attacking whom, the declared attacker
//! list (in declaration order), and the explicit blocker assignments.
//! Blockers are paired with the attacker they were declared against, never
//! inferred positionally.

use crate::core::{CardId, PlayerId};
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::collections::BTreeMap;

/// A declared blocker→attacker pairing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockAssignment {
    pub blocker: CardId,
    pub attacker: CardId,
}

/// Combat state for the current combat phase. Reset at end of combat.
/// BTreeMap keeps iteration deterministic.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CombatState {
    pub attacking_player: Option<PlayerId>,
    pub defending_player: Option<PlayerId>,

    /// Attacking creatures in declaration order.
    pub attackers: Vec<CardId>,

    /// Attacker id → blockers assigned to it, in declaration order.
    pub blocks: BTreeMap<CardId, SmallVec<[CardId; 2]>>,
}

impl CombatState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn begin_attack(&mut self, attacking: PlayerId, defending: PlayerId) {
        self.attacking_player = Some(attacking);
        self.defending_player = Some(defending);
    }

    pub fn declare_attacker(&mut self, attacker: CardId) {
        if !self.attackers.contains(&attacker) {
            self.attackers.push(attacker);
        }
    }

    pub fn assign_block(&mut self, assignment: BlockAssignment) {
        self.blocks
            .entry(assignment.attacker)
            .or_default()
            .push(assignment.blocker);
    }

    pub fn is_attacking(&self, card_id: CardId) -> bool {
        self.attackers.contains(&card_id)
    }

    pub fn is_blocked(&self, attacker: CardId) -> bool {
        self.blocks.get(&attacker).is_some_and(|b| !b.is_empty())
    }

    pub fn blockers_of(&self, attacker: CardId) -> &[CardId] {
        self.blocks
            .get(&attacker)
            .map(|b| b.as_slice())
            .unwrap_or(&[])
    }

    pub fn has_attackers(&self) -> bool {
        !self.attackers.is_empty()
    }

    /// Clear all combat state (end of combat).
    pub fn clear(&mut self) {
        self.attacking_player = None;
        self.defending_player = None;
        self.attackers.clear();
        self.blocks.clear();
    }
}
