//! Demo driver: plays out a short scripted exchange between two players
//! and prints the resulting public game state as JSON.

use anyhow::Result;
use clap::Parser;
use manastack::core::{
    Ability, AbilityCost, ActivatedAbility, CardId, CardType, Color, PlayerId, TypeLine,
};
use manastack::effects::{EffectSpec, Target};
use manastack::game::{
    GameState, Outcome, PassBot, PlayerAction, PublicState, RulesEngine, Step, VerbosityLevel,
};
use smallvec::smallvec;

#[derive(Parser, Debug)]
#[command(name = "manastack", about = "Card game rules engine demo")]
struct Args {
    /// RNG seed for deterministic shuffles.
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Log verbosity: silent, minimal, normal, verbose.
    #[arg(long, default_value = "normal")]
    verbosity: String,

    /// Print the final public state as JSON.
    #[arg(long, default_value_t = true)]
    json: bool,
}

fn parse_verbosity(s: &str) -> VerbosityLevel {
    match s {
        "silent" => VerbosityLevel::Silent,
        "minimal" => VerbosityLevel::Minimal,
        "verbose" => VerbosityLevel::Verbose,
        _ => VerbosityLevel::Normal,
    }
}

fn basic_land(state: &mut GameState, name: &str, color: Color, owner: PlayerId) -> CardId {
    let id = state.mint_card(name, owner);
    let card = state.cards.get_mut(id).expect("just minted");
    card.type_line = TypeLine::of(CardType::Land);
    card.abilities.push(Ability::Activated(ActivatedAbility {
        costs: smallvec![AbilityCost::Tap],
        effect: EffectSpec::AddMana { color, amount: 1 },
        allowed_steps: None,
        requires_target: false,
        description: format!("tap: add one {color} mana"),
    }));
    id
}

fn lightning_bolt(state: &mut GameState, owner: PlayerId) -> CardId {
    let id = state.mint_card("Lightning Bolt", owner);
    let card = state.cards.get_mut(id).expect("just minted");
    card.type_line = TypeLine::of(CardType::Instant);
    card.mana_cost = 1;
    card.colors.push(Color::Red);
    card.effects.push(EffectSpec::Custom("lightning_bolt".into()));
    id
}

fn main() -> Result<()> {
    let args = Args::parse();

    let mut state = GameState::new(1, args.seed, "Alice", "Bob");
    state.logger.set_verbosity(parse_verbosity(&args.verbosity));

    let alice = PlayerId::new(0);
    let bob = PlayerId::new(1);

    let mountain = basic_land(&mut state, "Mountain", Color::Red, alice);
    let bolt = lightning_bolt(&mut state, alice);
    state.players[0].zones.hand.add(mountain);
    state.players[0].zones.hand.add(bolt);

    let mut engine = RulesEngine::new(state);
    engine.set_provider(alice, Box::new(PassBot));
    engine.set_provider(bob, Box::new(PassBot));

    // Walk the turn to the first main step.
    while engine.game.current_step() != Step::Main1 {
        engine.advance_step()?;
    }

    engine.process_action(alice, &PlayerAction::PlayLand { card: mountain })?;
    engine.process_action(
        alice,
        &PlayerAction::ActivateAbility {
            card: mountain,
            ability_index: 0,
            targets: vec![],
        },
    )?;
    let outcome = engine.process_action(
        alice,
        &PlayerAction::CastSpell {
            card: bolt,
            from_command_zone: false,
            targets: vec![Target::Player(bob)],
        },
    )?;
    assert_eq!(outcome, Outcome::Completed);

    if args.json {
        let public = PublicState::snapshot(&engine.game);
        println!("{}", serde_json::to_string_pretty(&public)?);
    }
    Ok(())
}
