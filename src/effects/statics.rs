//! Appliers for static modifications.
//!
//! Statics here are applied once when their source resolves and undone
//! implicitly when the affected permanent leaves the battlefield or, for
//! stat bonuses, at cleanup. There is no continuous layer system.

use crate::core::{CardId, PlayerId, StaticAbility};
use crate::effects::Target;
use crate::error::EngineError;
use crate::game::GameState;
use crate::Result;

pub fn apply(
    state: &mut GameState,
    _controller: PlayerId,
    targets: &[Target],
    ability: &StaticAbility,
) -> Result<()> {
    for target in targets {
        let card_id = expect_card(*target)?;
        let card = state.cards.get_mut(card_id)?;
        match ability {
            StaticAbility::PowerToughnessDelta { power, toughness } => {
                card.power_bonus += power;
                card.toughness_bonus += toughness;
            }
            StaticAbility::PreventDamage(amount) => {
                card.damage_shield += amount;
            }
            StaticAbility::ProtectionFrom(color) => {
                if !card.protections.contains(color) {
                    card.protections.push(*color);
                }
            }
            StaticAbility::CostDelta(delta) => {
                let adjusted = card.mana_cost as i32 + delta;
                card.mana_cost = adjusted.max(0) as u32;
            }
        }
    }
    Ok(())
}

fn expect_card(target: Target) -> Result<CardId> {
    match target {
        Target::Card(id) => Ok(id),
        Target::Player(p) => Err(EngineError::EffectFailed(format!(
            "static abilities apply to permanents, got player {p}"
        ))),
    }
}
