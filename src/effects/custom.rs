//! Named card-specific effects.
//!
//! Some cards do things no template covers. They register a plain function
//! under a stable name; `EffectSpec::Custom(name)` dispatches through the
//! registry at resolution time. An unregistered name surfaces as
//! `UnknownDescriptor`, which the effect-application boundary downgrades
//! to a logged no-op. Appliers receive the active replacement rules so
//! their damage, draws, and zone changes go through the same rewrite
//! pipeline the templates use.

use crate::core::{CardId, Color, PlayerId};
use crate::effects::{EffectRegistry, Target};
use crate::error::EngineError;
use crate::game::replace::{perform, PrimitiveAction, ReplacementRules};
use crate::game::GameState;
use crate::zones::Zone;
use crate::Result;

/// Signature for a registered custom effect. Plain fn pointers keep the
/// registry cloneable and the game state serializable.
pub type CustomEffectFn =
    fn(&mut GameState, &ReplacementRules, CardId, PlayerId, &[Target]) -> Result<()>;

pub fn apply(
    state: &mut GameState,
    registry: &EffectRegistry,
    replacements: &ReplacementRules,
    name: &str,
    source: CardId,
    controller: PlayerId,
    targets: &[Target],
) -> Result<()> {
    let applier = registry
        .lookup(name)
        .ok_or_else(|| EngineError::UnknownDescriptor(name.to_string()))?;
    applier(state, replacements, source, controller, targets)
}

pub fn register_builtins(registry: &mut EffectRegistry) {
    registry.register("lightning_bolt", lightning_bolt);
    registry.register("ancestral_recall", ancestral_recall);
    registry.register("brainstorm", brainstorm);
    registry.register("dark_ritual", dark_ritual);
    registry.register("black_lotus", black_lotus);
    registry.register("sol_ring", sol_ring);
    registry.register("time_walk", time_walk);
}

/// 3 damage to any target; untargeted, it hits the opponent.
fn lightning_bolt(
    state: &mut GameState,
    replacements: &ReplacementRules,
    _source: CardId,
    controller: PlayerId,
    targets: &[Target],
) -> Result<()> {
    let target = targets
        .first()
        .copied()
        .unwrap_or(Target::Player(state.opponent_of(controller)));
    perform(
        state,
        replacements,
        PrimitiveAction::DealDamage { target, amount: 3 },
    )
}

fn ancestral_recall(
    state: &mut GameState,
    replacements: &ReplacementRules,
    _source: CardId,
    controller: PlayerId,
    targets: &[Target],
) -> Result<()> {
    let player = match targets.first() {
        Some(Target::Player(p)) => *p,
        _ => controller,
    };
    for _ in 0..3 {
        perform(state, replacements, PrimitiveAction::DrawCard { player })?;
    }
    Ok(())
}

/// Draw three, then put two cards from hand back on top of the library.
/// Without an ordering decision the last two drawn go back.
fn brainstorm(
    state: &mut GameState,
    replacements: &ReplacementRules,
    _source: CardId,
    controller: PlayerId,
    _targets: &[Target],
) -> Result<()> {
    let mut drawn = Vec::new();
    for _ in 0..3 {
        // The put-back needs the drawn card ids, so rewrite the draw by
        // hand instead of going through `perform`.
        let draw = replacements.rewrite(PrimitiveAction::DrawCard { player: controller });
        if draw == PrimitiveAction::Nothing {
            continue;
        }
        if let Some(card) = state.draw_card(controller)? {
            drawn.push(card);
        }
    }
    for card in drawn.into_iter().rev().take(2) {
        state.move_card(card, Zone::Hand, Zone::Library)?;
    }
    Ok(())
}

fn dark_ritual(
    state: &mut GameState,
    _replacements: &ReplacementRules,
    _source: CardId,
    controller: PlayerId,
    _targets: &[Target],
) -> Result<()> {
    state.player_mut(controller)?.mana_pool.add(Color::Black, 3);
    Ok(())
}

fn black_lotus(
    state: &mut GameState,
    _replacements: &ReplacementRules,
    source: CardId,
    controller: PlayerId,
    _targets: &[Target],
) -> Result<()> {
    state
        .player_mut(controller)?
        .mana_pool
        .add(Color::Colorless, 3);
    // The Lotus sacrifices itself as part of the effect.
    if state.zone_of(source).map(|(_, z)| z) == Some(Zone::Battlefield) {
        state.move_card(source, Zone::Battlefield, Zone::Graveyard)?;
    }
    Ok(())
}

fn sol_ring(
    state: &mut GameState,
    _replacements: &ReplacementRules,
    _source: CardId,
    controller: PlayerId,
    _targets: &[Target],
) -> Result<()> {
    state
        .player_mut(controller)?
        .mana_pool
        .add(Color::Colorless, 2);
    Ok(())
}

fn time_walk(
    state: &mut GameState,
    _replacements: &ReplacementRules,
    _source: CardId,
    controller: PlayerId,
    _targets: &[Target],
) -> Result<()> {
    state.turn.pending_extra_turns += 1;
    state
        .logger
        .normal(&format!("{controller} takes an extra turn after this one"));
    Ok(())
}
