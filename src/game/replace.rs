//! Replacement effects
//!
//! Primitive state changes (damage, draws, zone changes) are expressed as
//! `PrimitiveAction` values, rewritten through the registered rules, and
//! only then committed. Rules chain in registration order; a rule that
//! does not match leaves the action untouched.

use crate::core::{CardId, PlayerId};
use crate::effects::Target;
use crate::game::state::GameState;
use crate::zones::Zone;
use crate::Result;
use serde::{Deserialize, Serialize};

/// A state change expressed before it happens, so replacement rules can
/// rewrite it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum PrimitiveAction {
    DealDamage { target: Target, amount: i32 },
    DrawCard { player: PlayerId },
    MoveCard { card: CardId, from: Zone, to: Zone },
    /// A fully prevented action; committing it does nothing.
    Nothing,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DamageScope {
    Any,
    Player(PlayerId),
    Card(CardId),
}

impl DamageScope {
    fn covers(&self, target: Target) -> bool {
        match (self, target) {
            (DamageScope::Any, _) => true,
            (DamageScope::Player(p), Target::Player(t)) => *p == t,
            (DamageScope::Card(c), Target::Card(t)) => *c == t,
            _ => false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ReplacementRule {
    /// Reduce matching damage by up to `amount` each time it applies.
    PreventDamage { scope: DamageScope, amount: i32 },
    /// Skip matching draws entirely.
    SkipDraw { player: PlayerId },
    /// When `card` would move to `when_to`, send it to `to` instead.
    RedirectZoneChange { card: CardId, when_to: Zone, to: Zone },
}

impl ReplacementRule {
    /// The commander rescue rule: when a commander would hit the
    /// graveyard, it goes to the command zone instead.
    pub fn commander_rescue(card: CardId) -> Self {
        ReplacementRule::RedirectZoneChange {
            card,
            when_to: Zone::Graveyard,
            to: Zone::Command,
        }
    }

    fn rewrite(&self, action: PrimitiveAction) -> PrimitiveAction {
        match (self, action) {
            (
                ReplacementRule::PreventDamage { scope, amount },
                PrimitiveAction::DealDamage { target, amount: dmg },
            ) if scope.covers(target) => {
                let remaining = (dmg - amount).max(0);
                if remaining == 0 {
                    PrimitiveAction::Nothing
                } else {
                    PrimitiveAction::DealDamage {
                        target,
                        amount: remaining,
                    }
                }
            }
            (ReplacementRule::SkipDraw { player }, PrimitiveAction::DrawCard { player: p })
                if *player == p =>
            {
                PrimitiveAction::Nothing
            }
            (
                ReplacementRule::RedirectZoneChange { card, when_to, to },
                PrimitiveAction::MoveCard { card: c, from, to: t },
            ) if *card == c && *when_to == t => PrimitiveAction::MoveCard {
                card: c,
                from,
                to: *to,
            },
            (_, other) => other,
        }
    }
}

/// Ordered list of active replacement rules.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReplacementRules {
    rules: Vec<ReplacementRule>,
}

impl ReplacementRules {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, rule: ReplacementRule) {
        self.rules.push(rule);
    }

    pub fn remove(&mut self, rule: &ReplacementRule) {
        self.rules.retain(|r| r != rule);
    }

    /// Rewrite an action through every rule in registration order.
    pub fn rewrite(&self, action: PrimitiveAction) -> PrimitiveAction {
        self.rules
            .iter()
            .fold(action, |acc, rule| rule.rewrite(acc))
    }
}

/// Rewrite then commit a primitive action against the state.
pub fn perform(state: &mut GameState, rules: &ReplacementRules, action: PrimitiveAction) -> Result<()> {
    match rules.rewrite(action) {
        PrimitiveAction::Nothing => Ok(()),
        PrimitiveAction::DealDamage { target, amount } => commit_damage(state, target, amount),
        PrimitiveAction::DrawCard { player } => {
            state.draw_card(player)?;
            Ok(())
        }
        PrimitiveAction::MoveCard { card, from, to } => state.move_card(card, from, to),
    }
}

fn commit_damage(state: &mut GameState, target: Target, amount: i32) -> Result<()> {
    if amount <= 0 {
        return Ok(());
    }
    match target {
        Target::Player(player_id) => {
            state.player_mut(player_id)?.lose_life(amount);
            state
                .logger
                .normal(&format!("{player_id} takes {amount} damage"));
        }
        Target::Card(card_id) => {
            let card = state.cards.get_mut(card_id)?;
            // A shield from a prevention static soaks damage first.
            let soaked = amount.min(card.damage_shield);
            card.damage_shield -= soaked;
            card.damage += amount - soaked;
            if amount > soaked {
                crate::log_verbose!(state.logger, "{card_id} takes {} damage", amount - soaked);
            }
        }
    }
    Ok(())
}
