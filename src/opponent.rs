//! The opponent seam: one interface over the local AI and the remote peer,
//! so the rest of the engine never branches on which it is talking to.

use async_trait::async_trait;

use crate::ability::AbilityRequest;
use crate::grid::Coord;
use crate::state::{MatchState, TurnReport};

/// An action taken by the local player on their turn.
#[derive(Debug, Clone, PartialEq)]
pub enum PlayerAction {
    Fire(Coord),
    Ability(AbilityRequest),
}

/// Receives local actions and eventually produces outcomes.
///
/// `submit` carries the local player's action to resolution; `respond`
/// produces the opposing side's next move against the local board.
/// `respond` returning `Ok(None)` means the deferred work went stale (match
/// reset, phase change) or the match ended without a countermove; nothing
/// was mutated in the stale case.
#[async_trait]
pub trait Opponent: Send {
    async fn submit(
        &mut self,
        state: &mut MatchState,
        action: PlayerAction,
    ) -> anyhow::Result<TurnReport>;

    async fn respond(&mut self, state: &mut MatchState) -> anyhow::Result<Option<TurnReport>>;
}
