//! Stack ordering and triggered abilities through the full engine.

mod common;

use common::*;
use manastack::core::{Ability, TriggerCondition, TriggeredAbility};
use manastack::effects::{EffectSpec, Target};
use manastack::game::{HumanProvider, Outcome, PlayerAction, StackItem};

/// Casting a counterspell in response demonstrates LIFO: the counter was
/// pushed last, resolves first, and removes the earlier spell.
#[test]
fn test_counterspell_resolves_before_its_target() {
    let mut engine = engine_with_bots(2);
    main_phase(&mut engine);

    let fireball = instant_in_hand(
        &mut engine,
        ALICE,
        "Fireball",
        0,
        vec![EffectSpec::Damage { amount: 5 }],
    );
    let negate = instant_in_hand(&mut engine, BOB, "Negate", 0, vec![EffectSpec::Counter]);

    // Suspend after Alice casts so Bob can respond by hand.
    engine.set_provider(ALICE, Box::new(HumanProvider));
    engine.set_provider(BOB, Box::new(HumanProvider));
    let outcome = engine
        .process_action(
            ALICE,
            &PlayerAction::CastSpell {
                card: fireball,
                from_command_zone: false,
                targets: vec![Target::Player(BOB)],
            },
        )
        .unwrap();
    assert_eq!(outcome, Outcome::Suspended);
    assert_eq!(engine.game.stack.len(), 1);

    // Bob responds; bots then pass everything through.
    engine.set_provider(ALICE, Box::new(manastack::game::PassBot));
    engine.set_provider(BOB, Box::new(manastack::game::PassBot));
    let outcome = engine
        .process_action(
            BOB,
            &PlayerAction::CastSpell {
                card: negate,
                from_command_zone: false,
                targets: vec![Target::Card(fireball)],
            },
        )
        .unwrap();
    assert_eq!(outcome, Outcome::Completed);

    // The fireball never resolved: Bob took no damage, both spells are in
    // their owners' graveyards.
    assert_eq!(engine.game.players[1].life, 20);
    assert!(engine.game.players[0].zones.graveyard.contains(fireball));
    assert!(engine.game.players[1].zones.graveyard.contains(negate));
}

/// Both seats stay human for the whole exchange: every pass arrives
/// through `process_action`, and two passes with nothing in response
/// must complete the scan and resolve the spell.
#[test]
fn test_all_human_passes_resolve_the_stack() {
    let mut engine = engine_with_bots(2);
    main_phase(&mut engine);
    let bolt = instant_in_hand(
        &mut engine,
        ALICE,
        "Lava Spike",
        0,
        vec![EffectSpec::Damage { amount: 3 }],
    );
    engine.set_provider(ALICE, Box::new(HumanProvider));
    engine.set_provider(BOB, Box::new(HumanProvider));

    let outcome = engine
        .process_action(
            ALICE,
            &PlayerAction::CastSpell {
                card: bolt,
                from_command_zone: false,
                targets: vec![Target::Player(BOB)],
            },
        )
        .unwrap();
    assert_eq!(outcome, Outcome::Suspended);
    assert_eq!(engine.game.stack.len(), 1);

    assert_eq!(
        engine.process_action(ALICE, &PlayerAction::Pass).unwrap(),
        Outcome::Suspended
    );
    // Bob's pass finishes the all-pass scan; the bolt resolves.
    engine.process_action(BOB, &PlayerAction::Pass).unwrap();
    assert!(engine.game.stack.is_empty());
    assert_eq!(engine.game.players[1].life, 17);
    assert!(engine.game.players[0].zones.graveyard.contains(bolt));
}

#[test]
fn test_stack_resolves_in_reverse_push_order() {
    let mut engine = engine_with_bots(2);
    let a = engine.game.mint_card("A", ALICE);
    let b = engine.game.mint_card("B", ALICE);
    let c = engine.game.mint_card("C", ALICE);
    // Abilities that each add one life, pushed A then B then C.
    for id in [a, b, c] {
        engine.game.stack.push(StackItem::ability(
            id,
            ALICE,
            vec![],
            EffectSpec::GainLife { amount: 1 },
        ));
    }
    assert_eq!(engine.game.stack[2].source, c);
    engine.run_priority().unwrap();
    assert!(engine.game.stack.is_empty());
    assert_eq!(engine.game.players[0].life, 23);
}

#[test]
fn test_enter_the_battlefield_trigger_gains_life() {
    let mut engine = engine_with_bots(2);
    main_phase(&mut engine);

    // A Soul Warden style permanent for Alice.
    let warden = creature_on_battlefield(&mut engine, ALICE, "Soul Warden", 1, 1);
    engine
        .game
        .cards
        .get_mut(warden)
        .unwrap()
        .abilities
        .push(Ability::Triggered(TriggeredAbility {
            condition: TriggerCondition::WhenCreatureEnters,
            effect: EffectSpec::GainLife { amount: 1 },
            optional: false,
        }));

    let bear = creature_in_hand(&mut engine, ALICE, "Grizzly Bears", 0, 2, 2);
    engine
        .process_action(
            ALICE,
            &PlayerAction::CastSpell {
                card: bear,
                from_command_zone: false,
                targets: vec![],
            },
        )
        .unwrap();

    assert!(engine.game.players[0].zones.battlefield.contains(bear));
    assert_eq!(engine.game.players[0].life, 21);
}

#[test]
fn test_death_trigger_fires_from_state_based_action() {
    let mut engine = engine_with_bots(2);
    main_phase(&mut engine);

    // Blood Artist style: whenever a creature dies, the opponent loses 1.
    let artist = creature_on_battlefield(&mut engine, ALICE, "Blood Artist", 0, 1);
    engine
        .game
        .cards
        .get_mut(artist)
        .unwrap()
        .abilities
        .push(Ability::Triggered(TriggeredAbility {
            condition: TriggerCondition::WhenCreatureDies,
            effect: EffectSpec::Damage { amount: 1 },
            optional: false,
        }));

    let victim = creature_on_battlefield(&mut engine, ALICE, "Grizzly Bears", 2, 2);
    let bolt = instant_in_hand(
        &mut engine,
        ALICE,
        "Shock",
        0,
        vec![EffectSpec::Damage { amount: 2 }],
    );
    engine
        .process_action(
            ALICE,
            &PlayerAction::CastSpell {
                card: bolt,
                from_command_zone: false,
                targets: vec![Target::Card(victim)],
            },
        )
        .unwrap();

    assert!(engine.game.players[0].zones.graveyard.contains(victim));
    // The death trigger resolved and hit Bob (untargeted damage defaults
    // to the opponent).
    assert_eq!(engine.game.players[1].life, 19);
}

#[test]
fn test_upkeep_trigger_goes_on_stack() {
    let mut engine = engine_with_bots(2);
    let howling = creature_on_battlefield(&mut engine, ALICE, "Howling Mine", 0, 1);
    engine
        .game
        .cards
        .get_mut(howling)
        .unwrap()
        .abilities
        .push(Ability::Triggered(TriggeredAbility {
            condition: TriggerCondition::AtBeginningOfUpkeep,
            effect: EffectSpec::Draw { count: 1 },
            optional: false,
        }));
    let card = engine.game.mint_card("Island", ALICE);
    engine.game.players[0].zones.library.add(card);

    // Untap -> Upkeep; the trigger resolves during priority.
    engine.advance_step().unwrap();
    assert_eq!(engine.game.current_step(), manastack::game::Step::Upkeep);
    assert!(engine.game.players[0].zones.hand.contains(card));
}

#[test]
fn test_end_of_turn_trigger_resolves_at_the_end_step() {
    let mut engine = engine_with_bots(2);
    let angel = creature_on_battlefield(&mut engine, ALICE, "Twilight Healer", 2, 2);
    engine
        .game
        .cards
        .get_mut(angel)
        .unwrap()
        .abilities
        .push(Ability::Triggered(TriggeredAbility {
            condition: TriggerCondition::AtEndOfTurn,
            effect: EffectSpec::GainLife { amount: 2 },
            optional: false,
        }));

    while engine.game.current_step() != manastack::game::Step::End {
        engine.advance_step().unwrap();
    }

    // Entering the end step recorded the turn-end event and the trigger
    // resolved during that same driver call.
    assert_eq!(engine.game.players[0].life, 22);
}
