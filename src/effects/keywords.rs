//! Keyword-granting effects.

use crate::core::{CardId, Keyword};
use crate::effects::Target;
use crate::error::EngineError;
use crate::game::GameState;
use crate::Result;

/// Grant a keyword to each targeted permanent; with no targets, the
/// source grants it to itself.
pub fn grant(
    state: &mut GameState,
    source: CardId,
    targets: &[Target],
    keyword: Keyword,
) -> Result<()> {
    let recipients: Vec<CardId> = if targets.is_empty() {
        vec![source]
    } else {
        targets
            .iter()
            .map(|t| match t {
                Target::Card(id) => Ok(*id),
                Target::Player(p) => Err(EngineError::EffectFailed(format!(
                    "cannot grant {keyword} to player {p}"
                ))),
            })
            .collect::<Result<_>>()?
    };
    for card_id in recipients {
        let card = state.cards.get_mut(card_id)?;
        card.grant_keyword(keyword);
        state
            .logger
            .verbose(&format!("{card_id} gains {keyword}"));
    }
    Ok(())
}
