//! Stack resolution
//!
//! The stack resolves strictly LIFO. Resolving a permanent spell puts the
//! card onto its controller's battlefield; an instant or sorcery applies
//! its effects and goes to the graveyard; abilities apply their effect and
//! leave no card behind.

use crate::effects::{apply_effect, EffectRegistry, Target};
use crate::game::events::GameEvent;
use crate::game::replace::ReplacementRules;
use crate::game::stack_item::{StackItem, StackItemKind};
use crate::game::state::GameState;
use crate::game::triggers;
use crate::Result;

/// Resolve the top item of the stack, if any. Returns whether anything
/// resolved.
pub fn resolve_top(
    state: &mut GameState,
    registry: &EffectRegistry,
    replacements: &ReplacementRules,
) -> Result<bool> {
    let item = match state.stack.pop() {
        Some(item) => item,
        None => return Ok(false),
    };
    match item.kind {
        StackItemKind::Spell => resolve_spell(state, registry, replacements, item)?,
        StackItemKind::Ability | StackItemKind::Triggered => {
            if let Some(effect) = &item.effect {
                apply_effect(
                    state,
                    registry,
                    replacements,
                    effect,
                    item.source,
                    item.controller,
                    &item.targets,
                );
            }
        }
    }
    Ok(true)
}

fn resolve_spell(
    state: &mut GameState,
    registry: &EffectRegistry,
    replacements: &ReplacementRules,
    item: StackItem,
) -> Result<()> {
    let card = state.cards.get(item.source)?;
    let name = card.name.clone();
    let controller = item.controller;

    if card.is_permanent_type() {
        let is_creature = card.is_creature();
        let is_aura = card.is_aura();
        // The card belongs to no zone while on the stack; entering the
        // battlefield is a plain add.
        state
            .player_mut(controller)?
            .zones
            .battlefield
            .add(item.source);
        if is_creature {
            state.cards.get_mut(item.source)?.summoning_sick = true;
        }
        if is_aura {
            if let Some(Target::Card(host)) = item.targets.first() {
                state.cards.get_mut(item.source)?.attached_to = Some(*host);
            }
        }
        state
            .logger
            .normal(&format!("{name} enters the battlefield"));
        // Resolution-time effects of permanents (enter-the-battlefield style
        // customs such as Black Lotus) fire now.
        let effects = state.cards.get(item.source)?.effects.clone();
        for effect in &effects {
            apply_effect(
                state,
                registry,
                replacements,
                effect,
                item.source,
                controller,
                &item.targets,
            );
        }
        if is_creature {
            triggers::record_event(
                state,
                GameEvent::CreatureEntersBattlefield {
                    card: item.source,
                    controller,
                },
            )?;
        }
    } else {
        state.logger.normal(&format!("{name} resolves"));
        let effects = state.cards.get(item.source)?.effects.clone();
        for effect in &effects {
            apply_effect(
                state,
                registry,
                replacements,
                effect,
                item.source,
                controller,
                &item.targets,
            );
        }
        // Spent instants and sorceries go to their owner's graveyard.
        let owner = state.cards.get(item.source)?.owner;
        if state.zone_of(item.source).is_none() {
            state.player_mut(owner)?.zones.graveyard.add(item.source);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{CardId, CardType, PlayerId, TypeLine};
    use crate::effects::EffectSpec;

    fn instant(state: &mut GameState, owner: u32, effect: EffectSpec) -> CardId {
        let id = state.mint_card("Test Instant", PlayerId::new(owner));
        let card = state.cards.get_mut(id).unwrap();
        card.type_line = TypeLine::of(CardType::Instant);
        card.effects.push(effect);
        id
    }

    #[test]
    fn test_lifo_resolution_order() {
        let mut state = GameState::new(1, 6, "Alice", "Bob");
        let registry = EffectRegistry::empty();
        let rules = ReplacementRules::new();
        let p0 = PlayerId::new(0);

        let first = instant(&mut state, 0, EffectSpec::GainLife { amount: 1 });
        let second = instant(&mut state, 0, EffectSpec::GainLife { amount: 2 });
        state.stack.push(StackItem::spell(first, p0, vec![]));
        state.stack.push(StackItem::spell(second, p0, vec![]));

        assert!(resolve_top(&mut state, &registry, &rules).unwrap());
        // Last pushed resolves first.
        assert_eq!(state.players[0].life, 22);
        assert!(state.players[0].zones.graveyard.contains(second));
        assert!(resolve_top(&mut state, &registry, &rules).unwrap());
        assert_eq!(state.players[0].life, 23);
        assert!(!resolve_top(&mut state, &registry, &rules).unwrap());
    }

    #[test]
    fn test_creature_enters_summoning_sick() {
        let mut state = GameState::new(1, 6, "Alice", "Bob");
        let registry = EffectRegistry::empty();
        let rules = ReplacementRules::new();
        let bear = state.mint_card("Grizzly Bears", PlayerId::new(0));
        {
            let card = state.cards.get_mut(bear).unwrap();
            card.type_line = TypeLine::of(CardType::Creature);
            card.power = Some(2);
            card.toughness = Some(2);
        }
        state
            .stack
            .push(StackItem::spell(bear, PlayerId::new(0), vec![]));
        resolve_top(&mut state, &registry, &rules).unwrap();
        assert!(state.players[0].zones.battlefield.contains(bear));
        assert!(state.cards.get(bear).unwrap().summoning_sick);
        assert!(state.events.iter().any(|e| matches!(
            e,
            GameEvent::CreatureEntersBattlefield { card, .. } if *card == bear
        )));
    }

    #[test]
    fn test_unknown_custom_effect_is_logged_noop() {
        let mut state = GameState::new(1, 6, "Alice", "Bob");
        let registry = EffectRegistry::empty();
        let rules = ReplacementRules::new();
        let spell = instant(&mut state, 0, EffectSpec::Custom("gizmo".into()));
        state
            .stack
            .push(StackItem::spell(spell, PlayerId::new(0), vec![]));
        resolve_top(&mut state, &registry, &rules).unwrap();
        // The spell still finishes resolving into the graveyard.
        assert!(state.players[0].zones.graveyard.contains(spell));
    }
}
