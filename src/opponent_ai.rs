//! The computer opponent: synchronous resolution for the player's actions,
//! a cancelable "thinking" delay before its own.

use std::time::Duration;

use async_trait::async_trait;
use rand::rngs::SmallRng;
use rand::SeedableRng;

use crate::ai::{self, Difficulty};
use crate::error::GameError;
use crate::opponent::{Opponent, PlayerAction};
use crate::state::{MatchState, Phase, Side, TurnReport};

const DEFAULT_THINKING_DELAY: Duration = Duration::from_secs(1);

pub struct LocalAi {
    difficulty: Difficulty,
    rng: SmallRng,
    delay: Duration,
}

impl LocalAi {
    pub fn new(difficulty: Difficulty, seed: u64) -> Self {
        Self {
            difficulty,
            rng: SmallRng::seed_from_u64(seed),
            delay: DEFAULT_THINKING_DELAY,
        }
    }

    /// Tests shrink the thinking delay to nothing.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    /// Place and lock the AI fleet during setup.
    pub fn place_fleet(&mut self, state: &mut MatchState) -> Result<(), GameError> {
        state.place_random_fleet(Side::Opponent, &mut self.rng)?;
        state.confirm_fleet(Side::Opponent)
    }
}

#[async_trait]
impl Opponent for LocalAi {
    /// The player's action resolves against the AI's fleet immediately;
    /// both fleets live in the local match state.
    async fn submit(
        &mut self,
        state: &mut MatchState,
        action: PlayerAction,
    ) -> anyhow::Result<TurnReport> {
        let report = match action {
            PlayerAction::Fire(target) => state.fire(Side::Player, target)?,
            PlayerAction::Ability(request) => state.use_ability(Side::Player, request)?,
        };
        Ok(report)
    }

    /// Exactly one resolved shot per AI turn. The session token is captured
    /// before the delay and re-validated after it; a reset match drops the
    /// move on the floor instead of mutating a dead board.
    async fn respond(&mut self, state: &mut MatchState) -> anyhow::Result<Option<TurnReport>> {
        let token = state.session();
        tokio::time::sleep(self.delay).await;

        if state.session() != token
            || state.phase() != Phase::Playing
            || state.turn() != Side::Opponent
        {
            log::debug!("stale AI move discarded (session {token})");
            return Ok(None);
        }

        let target = {
            let shots = state.side(Side::Opponent).shots();
            ai::choose_target(
                &mut self.rng,
                self.difficulty,
                shots,
                state.config().board_size,
            )
        };
        let Some(target) = target else {
            return Ok(None);
        };

        let report = state.fire(Side::Opponent, target)?;
        Ok(Some(report))
    }
}
