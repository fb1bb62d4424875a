//! The remote peer adapter: local actions become protocol messages, inbound
//! messages become state transitions. Unexpected or unusable messages are
//! logged and dropped; the match continues from its last valid state and
//! resynchronizes on the next valid one.

use async_trait::async_trait;

use crate::opponent::{Opponent, PlayerAction};
use crate::protocol::Message;
use crate::ship::ShipPlacements;
use crate::state::{ActionOutcome, MatchState, Phase, TurnReport};
use crate::transport::Transport;

pub struct RemotePeer {
    transport: Box<dyn Transport>,
    player_id: Option<String>,
    opponent_id: Option<String>,
}

impl RemotePeer {
    pub fn new(transport: Box<dyn Transport>) -> Self {
        Self {
            transport,
            player_id: None,
            opponent_id: None,
        }
    }

    /// Identity assigned by the server on `connected`.
    pub fn player_id(&self) -> Option<&str> {
        self.player_id.as_deref()
    }

    pub fn opponent_id(&self) -> Option<&str> {
        self.opponent_id.as_deref()
    }

    pub async fn create_room(&mut self, room_name: &str) -> anyhow::Result<()> {
        self.transport
            .send(Message::CreateRoom {
                room_name: room_name.to_owned(),
            })
            .await
    }

    pub async fn join_room(&mut self, room_id: &str) -> anyhow::Result<()> {
        self.transport
            .send(Message::JoinRoom {
                room_id: room_id.to_owned(),
            })
            .await
    }

    /// Drive the pre-game flow until the server opens ship placement.
    /// Handles `connected`, room confirmations and `setup_phase`; lobby
    /// noise (`rooms_list` and friends) is display-only and skipped.
    pub async fn await_setup(&mut self, state: &mut MatchState) -> anyhow::Result<()> {
        loop {
            match self.transport.recv().await? {
                Message::Connected { player_id } => {
                    log::info!("connected as {player_id}");
                    self.player_id = Some(player_id);
                }
                Message::RoomCreated { room_name, .. } | Message::RoomJoined { room_name, .. } => {
                    log::info!("entered room {room_name}");
                    state.room_joined()?;
                }
                Message::SetupPhase {
                    board_size,
                    ships_to_place,
                } => {
                    state.begin_setup(board_size, ships_to_place)?;
                    return Ok(());
                }
                Message::Error { message } => log::warn!("server error: {message}"),
                other => log::debug!("ignoring {} before setup", other.kind()),
            }
        }
    }

    /// Submit the confirmed fleet, then wait for `game_started`.
    pub async fn start_game(&mut self, state: &mut MatchState) -> anyhow::Result<()> {
        let ships = ShipPlacements::from(state.side(crate::state::Side::Player).fleet());
        self.transport.send(Message::PlaceShips { ships }).await?;
        loop {
            match self.transport.recv().await? {
                Message::ShipsPlaced { message } => log::debug!("ships placed: {message}"),
                Message::GameStarted {
                    your_turn,
                    opponent_id,
                    abilities,
                    ..
                } => {
                    self.opponent_id = Some(opponent_id);
                    state.apply_game_started(your_turn, abilities);
                    return Ok(());
                }
                Message::Error { message } => log::warn!("server error: {message}"),
                other => log::debug!("ignoring {} before game start", other.kind()),
            }
        }
    }

    /// Request a new match in the same room after `gameover`.
    pub async fn play_again(&mut self) -> anyhow::Result<()> {
        self.transport.send(Message::PlayAgain).await
    }

    pub async fn leave(&mut self) -> anyhow::Result<()> {
        self.transport.send(Message::LeaveRoom).await
    }
}

#[async_trait]
impl Opponent for RemotePeer {
    /// Emit the action, then wait for the server's resolution of it.
    /// Messages are applied strictly in arrival order; anything that is not
    /// the pending resolution is handled or discarded in place.
    async fn submit(
        &mut self,
        state: &mut MatchState,
        action: PlayerAction,
    ) -> anyhow::Result<TurnReport> {
        let msg = match &action {
            PlayerAction::Fire(target) => Message::FireShot { position: *target },
            PlayerAction::Ability(request) => Message::UseSpecial {
                ability: request.clone(),
            },
        };
        self.transport.send(msg).await?;

        loop {
            match self.transport.recv().await? {
                Message::ShotResult {
                    result,
                    your_turn,
                    game_over,
                } => {
                    state.apply_shot_result(&result, your_turn, game_over)?;
                    return Ok(TurnReport {
                        outcome: ActionOutcome::Shot(result),
                        your_turn,
                        game_over,
                    });
                }
                Message::AbilityResult {
                    results,
                    ability_type,
                    your_turn,
                    game_over,
                } => {
                    state.apply_ability_result(ability_type, &results, your_turn, game_over)?;
                    return Ok(TurnReport {
                        outcome: ActionOutcome::Ability {
                            kind: ability_type,
                            results,
                        },
                        your_turn,
                        game_over,
                    });
                }
                Message::Error { message } => {
                    return Err(anyhow::anyhow!("action rejected: {message}"));
                }
                other => log::debug!("ignoring {} while awaiting result", other.kind()),
            }
        }
    }

    /// Wait for the peer's move against our board, or the match ending.
    /// `Ok(None)` after `game_over` (the caller reads the phase) or when the
    /// match was reset while waiting.
    async fn respond(&mut self, state: &mut MatchState) -> anyhow::Result<Option<TurnReport>> {
        loop {
            let token = state.session();
            let msg = self.transport.recv().await?;
            if state.session() != token || state.phase() != Phase::Playing {
                log::debug!("stale peer message discarded: {}", msg.kind());
                return Ok(None);
            }
            match msg {
                Message::OpponentShot {
                    result,
                    your_turn,
                    game_over,
                } => {
                    state.apply_opponent_shot(&result, your_turn, game_over)?;
                    return Ok(Some(TurnReport {
                        outcome: ActionOutcome::Shot(result),
                        your_turn,
                        game_over,
                    }));
                }
                Message::OpponentAbility {
                    results,
                    ability_type,
                    your_turn,
                    game_over,
                } => {
                    state.apply_opponent_ability(ability_type, &results, your_turn, game_over)?;
                    return Ok(Some(TurnReport {
                        outcome: ActionOutcome::Ability {
                            kind: ability_type,
                            results,
                        },
                        your_turn,
                        game_over,
                    }));
                }
                Message::GameOver {
                    opponent_ships,
                    winner,
                } => {
                    state.apply_game_over(opponent_ships, winner)?;
                    return Ok(None);
                }
                Message::OpponentLeft => {
                    log::info!("opponent left the room");
                    return Ok(None);
                }
                other => log::debug!("ignoring {} while awaiting opponent", other.kind()),
            }
        }
    }
}
