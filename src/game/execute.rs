//! Action execution
//!
//! Runs only after `legal::check_legal` has accepted the action. Pays
//! costs, moves cards, and pushes stack items; it never resolves the
//! stack itself (that belongs to the priority loop).

use crate::core::{AbilityCost, CardId, Color, Keyword, PlayerId};
use crate::effects::{EffectRegistry, Target};
use crate::error::EngineError;
use crate::game::action::PlayerAction;
use crate::game::combat::BlockAssignment;
use crate::game::events::GameEvent;
use crate::game::legal;
use crate::game::phase::Step;
use crate::game::replace::{perform, PrimitiveAction, ReplacementRules};
use crate::game::stack_item::StackItem;
use crate::game::state::GameState;
use crate::game::triggers;
use crate::zones::Zone;
use crate::Result;

pub fn execute(
    state: &mut GameState,
    _registry: &EffectRegistry,
    replacements: &ReplacementRules,
    player_id: PlayerId,
    action: &PlayerAction,
) -> Result<()> {
    match action {
        PlayerAction::PlayLand { card } => play_land(state, player_id, *card),
        PlayerAction::CastSpell {
            card,
            from_command_zone,
            targets,
        } => cast_spell(state, player_id, *card, *from_command_zone, targets.clone()),
        PlayerAction::ActivateAbility {
            card,
            ability_index,
            targets,
        } => activate_ability(state, player_id, *card, *ability_index, targets.clone()),
        PlayerAction::DeclareAttackers { attackers } => {
            declare_attackers(state, player_id, attackers)
        }
        PlayerAction::DeclareBlockers { assignments } => {
            declare_blockers(state, replacements, player_id, assignments)
        }
        PlayerAction::Pass => Ok(()),
    }
}

fn play_land(state: &mut GameState, player_id: PlayerId, card_id: CardId) -> Result<()> {
    state.move_card(card_id, Zone::Hand, Zone::Battlefield)?;
    state.player_mut(player_id)?.lands_played_this_turn += 1;
    let name = state.cards.get(card_id)?.name.clone();
    state.logger.normal(&format!("{player_id} plays {name}"));
    triggers::record_event(
        state,
        GameEvent::LandPlayed {
            card: card_id,
            player: player_id,
        },
    )
}

fn cast_spell(
    state: &mut GameState,
    player_id: PlayerId,
    card_id: CardId,
    from_command_zone: bool,
    targets: Vec<Target>,
) -> Result<()> {
    let base_cost = state.cards.get(card_id)?.mana_cost;
    let (cost, from_zone) = if from_command_zone {
        (state.player(player_id)?.commander_cost(base_cost), Zone::Command)
    } else {
        (base_cost, Zone::Hand)
    };

    let player = state.player_mut(player_id)?;
    player
        .mana_pool
        .pay(cost)
        .map_err(|short| EngineError::Internal(format!("mana pool short by {short} after legality check")))?;
    if from_command_zone {
        player.commander_tax += 1;
    }
    // The card leaves its zone and is held by the stack item until it
    // resolves or is countered.
    if !player.zones.get_mut(from_zone).remove(card_id) {
        return Err(EngineError::Internal(format!(
            "{card_id} missing from {from_zone:?} during cast"
        )));
    }

    let name = state.cards.get(card_id)?.name.clone();
    state
        .logger
        .normal(&format!("{player_id} casts {name} for {cost}"));
    state.stack.push(StackItem::spell(card_id, player_id, targets));
    triggers::record_event(
        state,
        GameEvent::SpellCast {
            card: card_id,
            controller: player_id,
        },
    )
}

fn activate_ability(
    state: &mut GameState,
    player_id: PlayerId,
    card_id: CardId,
    ability_index: usize,
    targets: Vec<Target>,
) -> Result<()> {
    let ability = state
        .cards
        .get(card_id)?
        .abilities
        .get(ability_index)
        .and_then(|a| a.as_activated())
        .cloned()
        .ok_or_else(|| {
            EngineError::Internal(format!(
                "ability #{ability_index} on {card_id} vanished after legality check"
            ))
        })?;

    for cost in &ability.costs {
        pay_cost(state, player_id, card_id, cost)?;
    }

    state.logger.normal(&format!(
        "{player_id} activates {card_id}: {}",
        ability.description
    ));
    state
        .stack
        .push(StackItem::ability(card_id, player_id, targets, ability.effect));
    triggers::record_event(
        state,
        GameEvent::AbilityActivated {
            card: card_id,
            player: player_id,
        },
    )
}

fn pay_cost(
    state: &mut GameState,
    player_id: PlayerId,
    source: CardId,
    cost: &AbilityCost,
) -> Result<()> {
    match cost {
        AbilityCost::Tap => {
            state.cards.get_mut(source)?.tap();
        }
        AbilityCost::Mana(amount) => {
            state
                .player_mut(player_id)?
                .mana_pool
                .pay(*amount)
                .map_err(|short| {
                    EngineError::Internal(format!("mana pool short by {short} after legality check"))
                })?;
        }
        AbilityCost::Life(amount) => {
            state.player_mut(player_id)?.lose_life(*amount);
            state
                .logger
                .verbose(&format!("{player_id} pays {amount} life"));
        }
        AbilityCost::Sacrifice(filter) => {
            let victim = state
                .player(player_id)?
                .zones
                .battlefield
                .cards
                .iter()
                .copied()
                .find(|&id| {
                    state
                        .cards
                        .get(id)
                        .map(|c| legal::sacrifice_matches(c, filter))
                        .unwrap_or(false)
                })
                .ok_or_else(|| {
                    EngineError::Internal("sacrifice target vanished after legality check".into())
                })?;
            let was_creature = state.cards.get(victim)?.is_creature();
            state.move_card(victim, Zone::Battlefield, Zone::Graveyard)?;
            if was_creature {
                triggers::record_event(
                    state,
                    GameEvent::CreatureDies {
                        card: victim,
                        controller: player_id,
                    },
                )?;
            }
        }
        AbilityCost::Discard => {
            let card = state
                .player(player_id)?
                .zones
                .hand
                .peek_top()
                .ok_or_else(|| {
                    EngineError::Internal("hand emptied after legality check".into())
                })?;
            state.move_card(card, Zone::Hand, Zone::Graveyard)?;
        }
    }
    Ok(())
}

fn declare_attackers(
    state: &mut GameState,
    player_id: PlayerId,
    attackers: &[CardId],
) -> Result<()> {
    let defender = state.opponent_of(player_id);
    state.combat.begin_attack(player_id, defender);
    for &attacker in attackers {
        let card = state.cards.get_mut(attacker)?;
        if !card.has_keyword(Keyword::Vigilance) {
            card.tap();
        }
        state.combat.declare_attacker(attacker);
    }
    state.logger.normal(&format!(
        "{player_id} attacks with {} creature(s)",
        attackers.len()
    ));
    state.turn.current_step = Step::DeclareBlockers;
    Ok(())
}

fn declare_blockers(
    state: &mut GameState,
    replacements: &ReplacementRules,
    player_id: PlayerId,
    assignments: &[BlockAssignment],
) -> Result<()> {
    for assignment in assignments {
        state.combat.assign_block(*assignment);
    }
    state.logger.normal(&format!(
        "{player_id} blocks with {} creature(s)",
        assignments.len()
    ));
    state.turn.current_step = Step::CombatDamage;
    resolve_combat_damage(state, replacements)?;
    state.combat.clear();
    state.turn.current_step = Step::EndCombat;
    Ok(())
}

/// Per-creature snapshot taken before any damage lands, so one creature's
/// death mid-resolution cannot change another's assignment.
#[derive(Clone)]
struct Combatant {
    id: CardId,
    controller: PlayerId,
    power: i32,
    toughness: i32,
    damage: i32,
    keywords: ControlFlags,
    colors: Vec<Color>,
    protections: Vec<Color>,
}

#[derive(Clone, Copy, Default)]
struct ControlFlags {
    first_strike: bool,
    double_strike: bool,
    deathtouch: bool,
    lifelink: bool,
    trample: bool,
}

fn snapshot(state: &GameState, id: CardId) -> Result<Combatant> {
    let card = state.cards.get(id)?;
    let (controller, _) = state
        .zone_of(id)
        .ok_or(EngineError::EntityNotFound(id.as_u32()))?;
    Ok(Combatant {
        id,
        controller,
        power: card.current_power(),
        toughness: card.current_toughness(),
        damage: card.damage,
        keywords: ControlFlags {
            first_strike: card.has_keyword(Keyword::FirstStrike),
            double_strike: card.has_keyword(Keyword::DoubleStrike),
            deathtouch: card.has_keyword(Keyword::Deathtouch),
            lifelink: card.has_keyword(Keyword::Lifelink),
            trample: card.has_keyword(Keyword::Trample),
        },
        colors: card.colors.to_vec(),
        protections: card.protections.to_vec(),
    })
}

/// Combat damage with a first-strike pass and a regular pass. Creatures
/// dealt lethal damage in the first pass do not deal regular damage.
pub(crate) fn resolve_combat_damage(
    state: &mut GameState,
    replacements: &ReplacementRules,
) -> Result<()> {
    let defender = state
        .combat
        .defending_player
        .ok_or_else(|| EngineError::Internal("combat damage with no defender".into()))?;

    let attackers = state.combat.attackers.clone();
    let mut pairings: Vec<(Combatant, Vec<Combatant>)> = Vec::new();
    for attacker_id in attackers {
        let attacker = snapshot(state, attacker_id)?;
        let blockers = state
            .combat
            .blockers_of(attacker_id)
            .iter()
            .map(|&b| snapshot(state, b))
            .collect::<Result<Vec<_>>>()?;
        pairings.push((attacker, blockers));
    }

    let any_first_strike = pairings.iter().any(|(a, bs)| {
        a.keywords.first_strike
            || a.keywords.double_strike
            || bs
                .iter()
                .any(|b| b.keywords.first_strike || b.keywords.double_strike)
    });

    if any_first_strike {
        deal_pass(state, replacements, defender, &mut pairings, true)?;
    }
    deal_pass(state, replacements, defender, &mut pairings, false)?;
    Ok(())
}

fn strikes_in(flags: ControlFlags, first_strike_pass: bool) -> bool {
    if first_strike_pass {
        flags.first_strike || flags.double_strike
    } else {
        !flags.first_strike || flags.double_strike
    }
}

fn deal_pass(
    state: &mut GameState,
    replacements: &ReplacementRules,
    defender: PlayerId,
    pairings: &mut [(Combatant, Vec<Combatant>)],
    first_strike_pass: bool,
) -> Result<()> {
    for (attacker, blockers) in pairings.iter_mut() {
        let attacker_alive = attacker.damage < attacker.toughness;
        if attacker_alive && strikes_in(attacker.keywords, first_strike_pass) {
            deal_attacker_damage(state, replacements, defender, attacker, blockers)?;
        }
        for blocker in blockers.iter_mut() {
            let blocker_alive = blocker.damage < blocker.toughness;
            if blocker_alive && strikes_in(blocker.keywords, first_strike_pass) {
                creature_hits_creature(state, blocker, attacker)?;
            }
        }
    }
    Ok(())
}

fn deal_attacker_damage(
    state: &mut GameState,
    replacements: &ReplacementRules,
    defender: PlayerId,
    attacker: &Combatant,
    blockers: &mut [Combatant],
) -> Result<()> {
    let mut remaining = attacker.power.max(0);
    if remaining == 0 {
        return Ok(());
    }
    if blockers.is_empty() {
        perform(
            state,
            replacements,
            PrimitiveAction::DealDamage {
                target: Target::Player(defender),
                amount: remaining,
            },
        )?;
        heal_lifelink(state, attacker, remaining)?;
        return Ok(());
    }

    // Assign lethal to each blocker in declared order; deathtouch makes
    // one damage lethal. Trample sends the leftover at the player.
    for blocker in blockers.iter_mut() {
        if remaining == 0 {
            break;
        }
        let lethal = if attacker.keywords.deathtouch {
            1
        } else {
            (blocker.toughness - blocker.damage).max(1)
        };
        let assigned = remaining.min(lethal);
        creature_hits_creature_amount(state, attacker, blocker, assigned)?;
        remaining -= assigned;
    }
    if remaining > 0 && attacker.keywords.trample {
        perform(
            state,
            replacements,
            PrimitiveAction::DealDamage {
                target: Target::Player(defender),
                amount: remaining,
            },
        )?;
        heal_lifelink(state, attacker, remaining)?;
    }
    Ok(())
}

fn creature_hits_creature(
    state: &mut GameState,
    source: &Combatant,
    target: &mut Combatant,
) -> Result<()> {
    let amount = source.power.max(0);
    creature_hits_creature_amount(state, source, target, amount)
}

fn creature_hits_creature_amount(
    state: &mut GameState,
    source: &Combatant,
    target: &mut Combatant,
    amount: i32,
) -> Result<()> {
    if amount <= 0 {
        return Ok(());
    }
    // Protection from the source's color prevents the damage entirely.
    if source.colors.iter().any(|c| target.protections.contains(c)) {
        crate::log_verbose!(
            state.logger,
            "{} prevents combat damage from {}",
            target.id,
            source.id
        );
        return Ok(());
    }
    let dealt;
    {
        let card = state.cards.get_mut(target.id)?;
        let soaked = amount.min(card.damage_shield);
        card.damage_shield -= soaked;
        dealt = amount - soaked;
        card.damage += dealt;
        if source.keywords.deathtouch && dealt > 0 && card.damage < card.current_toughness() {
            // Deathtouch marks the damage as lethal.
            card.damage = card.current_toughness();
        }
    }
    target.damage += dealt;
    if source.keywords.deathtouch && dealt > 0 {
        target.damage = target.damage.max(target.toughness);
    }
    heal_lifelink(state, source, dealt)?;
    Ok(())
}

fn heal_lifelink(state: &mut GameState, source: &Combatant, amount: i32) -> Result<()> {
    if source.keywords.lifelink && amount > 0 {
        state.player_mut(source.controller)?.gain_life(amount);
        state.logger.verbose(&format!(
            "lifelink: {} gains {amount} life",
            source.controller
        ));
    }
    Ok(())
}
