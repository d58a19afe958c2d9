//! Action legality
//!
//! `check_legal` is a pure predicate over the current state: it never
//! mutates and never pays costs. Execution re-derives everything it
//! needs, so a stale check can reject but never corrupt.

use crate::core::{AbilityCost, Card, CardId, Keyword, PlayerId};
use crate::error::EngineError;
use crate::game::action::PlayerAction;
use crate::game::combat::BlockAssignment;
use crate::game::phase::Step;
use crate::game::state::GameState;
use crate::zones::Zone;
use crate::Result;
use std::collections::BTreeMap;

pub fn check_legal(state: &GameState, player_id: PlayerId, action: &PlayerAction) -> Result<()> {
    match action {
        PlayerAction::PlayLand { card } => check_play_land(state, player_id, *card),
        PlayerAction::CastSpell {
            card,
            from_command_zone,
            ..
        } => check_cast_spell(state, player_id, *card, *from_command_zone),
        PlayerAction::ActivateAbility {
            card,
            ability_index,
            targets,
        } => check_activate(state, player_id, *card, *ability_index, targets.len()),
        PlayerAction::DeclareAttackers { attackers } => {
            check_attackers(state, player_id, attackers)
        }
        PlayerAction::DeclareBlockers { assignments } => {
            check_blockers(state, player_id, assignments)
        }
        PlayerAction::Pass => Ok(()),
    }
}

fn illegal(action: &str, reason: impl Into<String>) -> EngineError {
    EngineError::illegal(action, reason)
}

fn check_play_land(state: &GameState, player_id: PlayerId, card_id: CardId) -> Result<()> {
    let card = state.cards.get(card_id)?;
    let player = state.player(player_id)?;
    if !player.zones.hand.contains(card_id) {
        return Err(illegal("play land", format!("{card_id} is not in hand")));
    }
    if !card.is_land() {
        return Err(illegal("play land", format!("{} is not a land", card.name)));
    }
    if !player.can_play_land() {
        return Err(illegal("play land", "already played a land this turn"));
    }
    if !state.sorcery_speed_ok(player_id) {
        return Err(illegal(
            "play land",
            "lands can only be played during your main step with an empty stack",
        ));
    }
    Ok(())
}

fn check_cast_spell(
    state: &GameState,
    player_id: PlayerId,
    card_id: CardId,
    from_command_zone: bool,
) -> Result<()> {
    let card = state.cards.get(card_id)?;
    let player = state.player(player_id)?;

    let expected_zone = if from_command_zone { Zone::Command } else { Zone::Hand };
    if !player.zones.get(expected_zone).contains(card_id) {
        return Err(illegal(
            "cast spell",
            format!("{card_id} is not in {expected_zone:?}"),
        ));
    }
    if from_command_zone && !card.is_commander {
        return Err(illegal(
            "cast spell",
            "only the commander can be cast from the command zone",
        ));
    }
    if card.is_land() {
        return Err(illegal("cast spell", "lands are played, not cast"));
    }

    let instant_speed =
        card.is_type(crate::core::CardType::Instant) || card.has_keyword(Keyword::Flash);
    if !instant_speed && !state.sorcery_speed_ok(player_id) {
        return Err(illegal(
            "cast spell",
            format!("{} can only be cast at sorcery speed", card.name),
        ));
    }

    let cost = if from_command_zone {
        player.commander_cost(card.mana_cost)
    } else {
        card.mana_cost
    };
    if !player.mana_pool.can_pay(cost) {
        return Err(illegal(
            "cast spell",
            format!(
                "cannot pay {cost} mana (pool holds {})",
                player.mana_pool.total()
            ),
        ));
    }
    Ok(())
}

fn check_activate(
    state: &GameState,
    player_id: PlayerId,
    card_id: CardId,
    ability_index: usize,
    target_count: usize,
) -> Result<()> {
    let card = state.cards.get(card_id)?;
    let player = state.player(player_id)?;
    if !player.zones.battlefield.contains(card_id) {
        return Err(illegal(
            "activate ability",
            format!("{card_id} is not on your battlefield"),
        ));
    }
    let ability = card
        .abilities
        .get(ability_index)
        .and_then(|a| a.as_activated())
        .ok_or_else(|| {
            illegal(
                "activate ability",
                format!("{} has no activated ability #{ability_index}", card.name),
            )
        })?;

    if let Some(steps) = &ability.allowed_steps {
        if !steps.contains(&state.current_step()) {
            return Err(illegal(
                "activate ability",
                format!("ability not usable during {:?}", state.current_step()),
            ));
        }
    }
    if ability.requires_target && target_count == 0 {
        return Err(illegal("activate ability", "ability requires a target"));
    }

    for cost in &ability.costs {
        check_cost_payable(state, player_id, card, cost)?;
    }
    Ok(())
}

/// Cost payability check. Life payment is a hard precondition here, not a
/// pay-then-die allowance.
fn check_cost_payable(
    state: &GameState,
    player_id: PlayerId,
    source: &Card,
    cost: &AbilityCost,
) -> Result<()> {
    let player = state.player(player_id)?;
    match cost {
        AbilityCost::Tap => {
            if source.tapped {
                return Err(illegal("activate ability", "source is already tapped"));
            }
            if source.is_creature()
                && source.summoning_sick
                && !source.has_keyword(Keyword::Haste)
            {
                return Err(illegal(
                    "activate ability",
                    "summoning sickness prevents tap abilities",
                ));
            }
        }
        AbilityCost::Mana(amount) => {
            if !player.mana_pool.can_pay(*amount) {
                return Err(illegal(
                    "activate ability",
                    format!("cannot pay {amount} mana"),
                ));
            }
        }
        AbilityCost::Life(amount) => {
            if player.life < *amount {
                return Err(illegal(
                    "activate ability",
                    format!("cannot pay {amount} life with {} remaining", player.life),
                ));
            }
        }
        AbilityCost::Sacrifice(filter) => {
            let found = player.zones.battlefield.cards.iter().any(|&id| {
                state
                    .cards
                    .get(id)
                    .map(|c| sacrifice_matches(c, filter))
                    .unwrap_or(false)
            });
            if !found {
                return Err(illegal(
                    "activate ability",
                    "no permanent available to sacrifice",
                ));
            }
        }
        AbilityCost::Discard => {
            if player.zones.hand.is_empty() {
                return Err(illegal("activate ability", "no card in hand to discard"));
            }
        }
    }
    Ok(())
}

pub(crate) fn sacrifice_matches(
    card: &Card,
    filter: &Option<crate::core::SacrificeFilter>,
) -> bool {
    match filter {
        None => true,
        Some(f) => {
            f.card_type.map_or(true, |t| card.is_type(t))
                && f.color.map_or(true, |c| card.colors.contains(&c))
                && f.name.as_ref().map_or(true, |n| card.name.as_str() == n)
        }
    }
}

fn check_attackers(state: &GameState, player_id: PlayerId, attackers: &[CardId]) -> Result<()> {
    if state.current_step() != Step::DeclareAttackers {
        return Err(illegal(
            "declare attackers",
            "not the declare attackers step",
        ));
    }
    if state.active_player_id() != player_id {
        return Err(illegal("declare attackers", "not the active player"));
    }
    let player = state.player(player_id)?;
    for &attacker in attackers {
        let card = state.cards.get(attacker)?;
        if !player.zones.battlefield.contains(attacker) || !card.is_creature() {
            return Err(illegal(
                "declare attackers",
                format!("{attacker} is not a creature you control"),
            ));
        }
        if card.tapped {
            return Err(illegal(
                "declare attackers",
                format!("{} is tapped", card.name),
            ));
        }
        if card.summoning_sick && !card.has_keyword(Keyword::Haste) {
            return Err(illegal(
                "declare attackers",
                format!("{} has summoning sickness", card.name),
            ));
        }
        if card.current_power() <= 0 {
            return Err(illegal(
                "declare attackers",
                format!("{} has no power to attack with", card.name),
            ));
        }
        if card.has_keyword(Keyword::Defender) || card.has_keyword(Keyword::CannotAttack) {
            return Err(illegal(
                "declare attackers",
                format!("{} cannot attack", card.name),
            ));
        }
    }
    Ok(())
}

fn check_blockers(
    state: &GameState,
    player_id: PlayerId,
    assignments: &[BlockAssignment],
) -> Result<()> {
    if state.current_step() != Step::DeclareBlockers {
        return Err(illegal("declare blockers", "not the declare blockers step"));
    }
    if state.combat.defending_player != Some(player_id) {
        return Err(illegal("declare blockers", "you are not the defender"));
    }
    let player = state.player(player_id)?;

    let mut per_attacker: BTreeMap<CardId, u32> = BTreeMap::new();
    for assignment in assignments {
        let blocker = state.cards.get(assignment.blocker)?;
        let attacker = state.cards.get(assignment.attacker)?;
        if !player.zones.battlefield.contains(assignment.blocker) || !blocker.is_creature() {
            return Err(illegal(
                "declare blockers",
                format!("{} is not a creature you control", assignment.blocker),
            ));
        }
        if blocker.tapped {
            return Err(illegal(
                "declare blockers",
                format!("{} is tapped", blocker.name),
            ));
        }
        if blocker.has_keyword(Keyword::CannotBlock) {
            return Err(illegal(
                "declare blockers",
                format!("{} cannot block", blocker.name),
            ));
        }
        if !state.combat.is_attacking(assignment.attacker) {
            return Err(illegal(
                "declare blockers",
                format!("{} is not attacking", assignment.attacker),
            ));
        }
        check_evasion(blocker, attacker)?;
        *per_attacker.entry(assignment.attacker).or_insert(0) += 1;
    }

    // Menace needs zero or at least two blockers.
    for (&attacker_id, &count) in &per_attacker {
        let attacker = state.cards.get(attacker_id)?;
        if attacker.has_keyword(Keyword::Menace) && count == 1 {
            return Err(illegal(
                "declare blockers",
                format!("{} has menace and needs two blockers", attacker.name),
            ));
        }
    }
    Ok(())
}

fn check_evasion(blocker: &Card, attacker: &Card) -> Result<()> {
    if attacker.has_keyword(Keyword::Flying)
        && !blocker.has_keyword(Keyword::Flying)
        && !blocker.has_keyword(Keyword::Reach)
    {
        return Err(illegal(
            "declare blockers",
            format!("{} can only be blocked by flying or reach", attacker.name),
        ));
    }
    if attacker.has_keyword(Keyword::Intimidate) {
        let shares_color = attacker.colors.iter().any(|c| blocker.colors.contains(c));
        let is_artifact = blocker.is_type(crate::core::CardType::Artifact);
        if !shares_color && !is_artifact {
            return Err(illegal(
                "declare blockers",
                format!(
                    "{} has intimidate and this blocker shares no color",
                    attacker.name
                ),
            ));
        }
    }
    Ok(())
}
