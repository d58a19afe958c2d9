//! State-based actions
//!
//! Run to a fixpoint after every action and every resolution. Each pass
//! applies every applicable check, then repeats until a pass changes
//! nothing. The checks themselves are infallible against a consistent
//! state; an inconsistency surfaces as `EngineError::Internal`.

use crate::core::{CardId, PlayerId};
use crate::game::events::GameEvent;
use crate::game::state::GameState;
use crate::game::triggers;
use crate::zones::Zone;
use crate::Result;

pub fn check(state: &mut GameState) -> Result<()> {
    loop {
        let mut changed = false;
        changed |= check_lethal_damage(state)?;
        changed |= check_player_loss(state)?;
        changed |= check_zero_toughness(state)?;
        changed |= check_orphaned_auras(state)?;
        if !changed {
            return Ok(());
        }
    }
}

fn battlefield_cards(state: &GameState) -> Vec<(PlayerId, CardId)> {
    state
        .players
        .iter()
        .flat_map(|p| p.zones.battlefield.cards.iter().map(move |&c| (p.id, c)))
        .collect()
}

/// Creatures with lethal damage die (indestructible ignores damage).
fn check_lethal_damage(state: &mut GameState) -> Result<bool> {
    let mut changed = false;
    for (controller, card_id) in battlefield_cards(state) {
        let card = state.cards.get(card_id)?;
        if card.has_lethal_damage() && !card.has_keyword(crate::core::Keyword::Indestructible) {
            let name = card.name.clone();
            destroy_to_graveyard(state, card_id, controller)?;
            state.logger.normal(&format!("{name} dies to lethal damage"));
            changed = true;
        }
    }
    Ok(changed)
}

/// Creatures with toughness zero or less die regardless of damage or
/// indestructibility.
fn check_zero_toughness(state: &mut GameState) -> Result<bool> {
    let mut changed = false;
    for (controller, card_id) in battlefield_cards(state) {
        let card = state.cards.get(card_id)?;
        if card.is_creature() && card.current_toughness() <= 0 {
            destroy_to_graveyard(state, card_id, controller)?;
            changed = true;
        }
    }
    Ok(changed)
}

/// Auras whose attachment target is gone fall off to the graveyard.
fn check_orphaned_auras(state: &mut GameState) -> Result<bool> {
    let mut changed = false;
    for (_, card_id) in battlefield_cards(state) {
        let card = state.cards.get(card_id)?;
        if !card.is_aura() {
            continue;
        }
        let orphaned = match card.attached_to {
            None => true,
            Some(host) => {
                state.zone_of(host).map(|(_, z)| z) != Some(Zone::Battlefield)
            }
        };
        if orphaned {
            state.move_card(card_id, Zone::Battlefield, Zone::Graveyard)?;
            changed = true;
        }
    }
    Ok(changed)
}

fn check_player_loss(state: &mut GameState) -> Result<bool> {
    let mut losers = Vec::new();
    for player in &mut state.players {
        if player.life <= 0 && !player.has_lost {
            player.has_lost = true;
            losers.push(player.id);
        }
    }
    for player_id in &losers {
        state
            .logger
            .normal(&format!("{player_id} loses the game"));
        triggers::record_event(state, GameEvent::PlayerLoses { player: *player_id })?;
    }
    Ok(!losers.is_empty())
}

/// Put a dying creature where it belongs: graveyard for real cards, out of
/// existence for tokens. Fires the death event either way.
fn destroy_to_graveyard(
    state: &mut GameState,
    card_id: CardId,
    controller: PlayerId,
) -> Result<()> {
    let is_token = state.cards.get(card_id)?.is_token;
    if is_token {
        let owner = state.cards.get(card_id)?.owner;
        state.player_mut(owner)?.zones.battlefield.remove(card_id);
        state.cards.remove(card_id);
    } else {
        state.move_card(card_id, Zone::Battlefield, Zone::Graveyard)?;
    }
    triggers::record_event(
        state,
        GameEvent::CreatureDies {
            card: card_id,
            controller,
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{CardType, TypeLine};

    fn creature(state: &mut GameState, owner: u32, power: i32, toughness: i32) -> CardId {
        let id = state.mint_card("Test Creature", PlayerId::new(owner));
        let card = state.cards.get_mut(id).unwrap();
        card.type_line = TypeLine::of(CardType::Creature);
        card.power = Some(power);
        card.toughness = Some(toughness);
        state.players[owner as usize].zones.battlefield.add(id);
        id
    }

    #[test]
    fn test_lethal_damage_kills() {
        let mut state = GameState::new(1, 9, "Alice", "Bob");
        let bear = creature(&mut state, 0, 2, 2);
        state.cards.get_mut(bear).unwrap().damage = 2;
        check(&mut state).unwrap();
        assert!(state.players[0].zones.graveyard.contains(bear));
        assert!(state
            .events
            .iter()
            .any(|e| matches!(e, GameEvent::CreatureDies { card, .. } if *card == bear)));
    }

    #[test]
    fn test_indestructible_survives_damage() {
        let mut state = GameState::new(1, 9, "Alice", "Bob");
        let gideon = creature(&mut state, 0, 4, 4);
        {
            let card = state.cards.get_mut(gideon).unwrap();
            card.grant_keyword(crate::core::Keyword::Indestructible);
            card.damage = 10;
        }
        check(&mut state).unwrap();
        assert!(state.players[0].zones.battlefield.contains(gideon));
    }

    #[test]
    fn test_zero_toughness_token_ceases_to_exist() {
        let mut state = GameState::new(1, 9, "Alice", "Bob");
        let token = creature(&mut state, 0, 1, 1);
        {
            let card = state.cards.get_mut(token).unwrap();
            card.is_token = true;
            card.toughness_bonus = -1;
        }
        check(&mut state).unwrap();
        assert!(!state.players[0].zones.graveyard.contains(token));
        assert!(!state.cards.contains(token));
    }

    #[test]
    fn test_life_zero_loses() {
        let mut state = GameState::new(1, 9, "Alice", "Bob");
        state.players[1].life = 0;
        check(&mut state).unwrap();
        assert!(state.players[1].has_lost);
    }

    #[test]
    fn test_fixpoint_cascades() {
        // An aura attached to a creature that dies falls off in the same call.
        let mut state = GameState::new(1, 9, "Alice", "Bob");
        let bear = creature(&mut state, 0, 2, 2);
        let aura = state.mint_card("Weakness", PlayerId::new(0));
        {
            let card = state.cards.get_mut(aura).unwrap();
            card.type_line = TypeLine {
                supertypes: Default::default(),
                types: smallvec::smallvec![CardType::Enchantment],
                subtypes: smallvec::smallvec!["Aura".to_string()],
            };
            card.attached_to = Some(bear);
        }
        state.players[0].zones.battlefield.add(aura);
        state.cards.get_mut(bear).unwrap().damage = 5;
        check(&mut state).unwrap();
        assert!(state.players[0].zones.graveyard.contains(bear));
        assert!(state.players[0].zones.graveyard.contains(aura));
    }
}
