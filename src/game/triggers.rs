//! Triggered abilities
//!
//! Events are recorded as they happen; each recording scans battlefield
//! permanents for abilities whose condition matches and queues a pending
//! trigger. Pending triggers only become stack items at the next trigger
//! flush, which happens after an action resolves and state-based actions
//! have been checked.

use crate::core::{CardId, PlayerId};
use crate::effects::EffectSpec;
use crate::game::events::GameEvent;
use crate::game::stack_item::StackItem;
use crate::game::state::GameState;
use crate::Result;
use serde::{Deserialize, Serialize};

/// A trigger that has fired but is not yet on the stack.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PendingTrigger {
    pub source: CardId,
    pub controller: PlayerId,
    pub effect: EffectSpec,
    /// Optional triggers resolve unless a decision provider declines;
    /// without a provider hook they resolve.
    pub optional: bool,
}

/// Record an event and queue any triggers it fires.
///
/// Scan order is player order, then battlefield, hand, graveyard within
/// each player, which keeps trigger stacking deterministic for a given
/// state. Hand and graveyard are scanned so zone-conditional abilities
/// (unearth-style cards) can fire from there.
pub fn record_event(state: &mut GameState, event: GameEvent) -> Result<()> {
    state.events.push(event);

    let mut fired: Vec<PendingTrigger> = Vec::new();
    for player in &state.players {
        let scan = [
            &player.zones.battlefield,
            &player.zones.hand,
            &player.zones.graveyard,
        ];
        for zone in scan {
            for &card_id in &zone.cards {
                let card = state.cards.get(card_id)?;
                for ability in &card.abilities {
                    if let Some(triggered) = ability.as_triggered() {
                        if event.matches(triggered.condition) {
                            fired.push(PendingTrigger {
                                source: card_id,
                                controller: player.id,
                                effect: triggered.effect.clone(),
                                optional: triggered.optional,
                            });
                        }
                    }
                }
            }
        }
    }
    if !fired.is_empty() {
        state.logger.verbose(&format!(
            "{} trigger(s) fired on {event:?}",
            fired.len()
        ));
        state.pending_triggers.extend(fired);
    }
    Ok(())
}

/// Move all pending triggers onto the stack in the order they fired.
/// Later stack entries resolve first, so the last trigger to fire
/// resolves before earlier ones.
pub fn flush_pending(state: &mut GameState) {
    if state.pending_triggers.is_empty() {
        return;
    }
    let pending = std::mem::take(&mut state.pending_triggers);
    for trigger in pending {
        state.logger.normal(&format!(
            "triggered ability of {} goes on the stack",
            trigger.source
        ));
        state.stack.push(StackItem::triggered(
            trigger.source,
            trigger.controller,
            trigger.effect,
        ));
    }
}
