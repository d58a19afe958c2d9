//! Appliers for the templated effects.
//!
//! Damage, draws, and zone changes go through the replacement pipeline in
//! `game::replace` so prevention and redirection rules see them. Everything
//! else mutates state directly.

use crate::core::{Card, CardId, CardType, Keyword, PlayerId, TypeLine};
use crate::effects::{CardFilter, Target};
use crate::error::EngineError;
use crate::game::replace::{perform, PrimitiveAction, ReplacementRules};
use crate::game::triggers;
use crate::game::GameEvent;
use crate::game::GameState;
use crate::zones::Zone;
use crate::Result;

pub fn damage(
    state: &mut GameState,
    replacements: &ReplacementRules,
    _source: CardId,
    controller: PlayerId,
    targets: &[Target],
    amount: i32,
) -> Result<()> {
    // Untargeted damage hits the opponent's face.
    let resolved: Vec<Target> = if targets.is_empty() {
        vec![Target::Player(state.opponent_of(controller))]
    } else {
        targets.to_vec()
    };
    for target in resolved {
        perform(
            state,
            replacements,
            PrimitiveAction::DealDamage { target, amount },
        )?;
    }
    Ok(())
}

pub fn draw(
    state: &mut GameState,
    replacements: &ReplacementRules,
    player: PlayerId,
    count: u8,
) -> Result<()> {
    for _ in 0..count {
        perform(state, replacements, PrimitiveAction::DrawCard { player })?;
    }
    Ok(())
}

pub fn add_mana(
    state: &mut GameState,
    controller: PlayerId,
    color: crate::core::Color,
    amount: u32,
) -> Result<()> {
    state.player_mut(controller)?.mana_pool.add(color, amount);
    crate::log_verbose!(state.logger, "{controller} adds {amount} {color} mana");
    Ok(())
}

pub fn destroy(
    state: &mut GameState,
    replacements: &ReplacementRules,
    targets: &[Target],
) -> Result<()> {
    for target in targets {
        let card_id = expect_card(*target)?;
        let card = state.cards.get(card_id)?;
        if card.has_keyword(Keyword::Indestructible) {
            state
                .logger
                .normal(&format!("{} is indestructible, destroy fizzles", card.name));
            continue;
        }
        let was_creature = card.is_creature();
        // The event reports whose battlefield the card left, not who owns
        // the card.
        let controller = match state.zone_of(card_id) {
            Some((player, Zone::Battlefield)) => player,
            _ => continue,
        };
        perform(
            state,
            replacements,
            PrimitiveAction::MoveCard {
                card: card_id,
                from: Zone::Battlefield,
                to: Zone::Graveyard,
            },
        )?;
        if was_creature {
            triggers::record_event(
                state,
                GameEvent::CreatureDies {
                    card: card_id,
                    controller,
                },
            )?;
        }
    }
    Ok(())
}

pub fn bounce(
    state: &mut GameState,
    replacements: &ReplacementRules,
    targets: &[Target],
) -> Result<()> {
    for target in targets {
        let card_id = expect_card(*target)?;
        if state.zone_of(card_id).map(|(_, z)| z) != Some(Zone::Battlefield) {
            continue;
        }
        if state.cards.get(card_id)?.is_token {
            // Tokens cease to exist outside the battlefield.
            let owner = state.cards.get(card_id)?.owner;
            state.player_mut(owner)?.zones.battlefield.remove(card_id);
            state.cards.remove(card_id);
            continue;
        }
        perform(
            state,
            replacements,
            PrimitiveAction::MoveCard {
                card: card_id,
                from: Zone::Battlefield,
                to: Zone::Hand,
            },
        )?;
    }
    Ok(())
}

pub fn gain_life(state: &mut GameState, controller: PlayerId, amount: i32) -> Result<()> {
    state.player_mut(controller)?.gain_life(amount);
    state
        .logger
        .normal(&format!("{controller} gains {amount} life"));
    Ok(())
}

pub fn create_token(
    state: &mut GameState,
    controller: PlayerId,
    count: u8,
    power: i32,
    toughness: i32,
    name: &str,
) -> Result<()> {
    for _ in 0..count {
        let id = state.cards.next_id();
        let mut token = Card::new(id, name, controller);
        token.type_line = TypeLine::of(CardType::Creature);
        token.power = Some(power);
        token.toughness = Some(toughness);
        token.is_token = true;
        token.summoning_sick = true;
        state.cards.insert(token);
        state.player_mut(controller)?.zones.battlefield.add(id);
        triggers::record_event(
            state,
            GameEvent::CreatureEntersBattlefield {
                card: id,
                controller,
            },
        )?;
    }
    state.logger.normal(&format!(
        "{controller} creates {count} {power}/{toughness} {name} token(s)"
    ));
    Ok(())
}

pub fn search_library(
    state: &mut GameState,
    controller: PlayerId,
    filter: &CardFilter,
    max_count: u8,
) -> Result<()> {
    let library: Vec<CardId> = state.player(controller)?.zones.library.cards.clone();
    let mut found = Vec::new();
    for card_id in library {
        if found.len() >= max_count as usize {
            break;
        }
        if filter.matches(state.cards.get(card_id)?) {
            found.push(card_id);
        }
    }
    for card_id in &found {
        state.move_card(*card_id, Zone::Library, Zone::Hand)?;
    }
    state.shuffle_library(controller)?;
    state.logger.normal(&format!(
        "{controller} searches the library, finds {} card(s), shuffles",
        found.len()
    ));
    Ok(())
}

pub fn mill(
    state: &mut GameState,
    replacements: &ReplacementRules,
    controller: PlayerId,
    targets: &[Target],
    count: u8,
) -> Result<()> {
    let player = match targets.first() {
        Some(Target::Player(p)) => *p,
        Some(Target::Card(id)) => {
            return Err(EngineError::EffectFailed(format!(
                "mill targets a player, got {id}"
            )))
        }
        None => controller,
    };
    for _ in 0..count {
        let top = state.player(player)?.zones.library.peek_top();
        match top {
            Some(card_id) => perform(
                state,
                replacements,
                PrimitiveAction::MoveCard {
                    card: card_id,
                    from: Zone::Library,
                    to: Zone::Graveyard,
                },
            )?,
            None => break,
        }
    }
    Ok(())
}

/// Look at the top cards. Without an ordering decision from the player the
/// cards stay where they are; the look itself is logged, and providers can
/// read the same cards through `GameStateView::library_top`.
pub fn scry(state: &mut GameState, controller: PlayerId, count: u8) -> Result<()> {
    let library = &state.player(controller)?.zones.library;
    let seen: Vec<CardId> = library
        .cards
        .iter()
        .rev()
        .take(count as usize)
        .copied()
        .collect();
    let names: Vec<String> = seen
        .iter()
        .filter_map(|&id| state.cards.get(id).ok())
        .map(|card| card.name.to_string())
        .collect();
    state.logger.verbose(&format!(
        "{controller} scries {}: {}",
        names.len(),
        names.join(", ")
    ));
    Ok(())
}

pub fn counter(state: &mut GameState, targets: &[Target]) -> Result<()> {
    let target_id = expect_card(
        *targets
            .first()
            .ok_or_else(|| EngineError::EffectFailed("counter requires a target".into()))?,
    )?;
    let pos = state
        .stack
        .iter()
        .position(|item| item.source == target_id)
        .ok_or_else(|| {
            EngineError::EffectFailed(format!("{target_id} is not on the stack"))
        })?;
    let item = state.stack.remove(pos);
    state
        .logger
        .normal(&format!("{} on the stack is countered", item.source));
    // Countered spells go to the graveyard; countered abilities vanish.
    // A spell on the stack belongs to no zone, so this is a plain add.
    if item.kind == crate::game::StackItemKind::Spell && state.zone_of(item.source).is_none() {
        let owner = state.cards.get(item.source)?.owner;
        state.player_mut(owner)?.zones.graveyard.add(item.source);
    }
    Ok(())
}

pub fn pump(
    state: &mut GameState,
    targets: &[Target],
    power: i32,
    toughness: i32,
) -> Result<()> {
    for target in targets {
        let card_id = expect_card(*target)?;
        let card = state.cards.get_mut(card_id)?;
        card.power_bonus += power;
        card.toughness_bonus += toughness;
    }
    Ok(())
}

fn expect_card(target: Target) -> Result<CardId> {
    match target {
        Target::Card(id) => Ok(id),
        Target::Player(p) => Err(EngineError::EffectFailed(format!(
            "expected a card target, got player {p}"
        ))),
    }
}
