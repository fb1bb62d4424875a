//! The match aggregate and its turn/game state machine. Every mutation of
//! live match data goes through the transition methods here; everything
//! else holds `&`-views.

use rand::Rng;

use crate::ability::{
    bomb_area, scan_area, AbilityCellResult, AbilityKind, AbilityRequest, ChargeBank,
};
use crate::config::{FleetConfig, MatchConfig};
use crate::error::{ConfigError, GameError, SelectionError, TurnError};
use crate::grid::{Board, Cell, Coord};
use crate::placement;
use crate::ship::{Fleet, Orientation, Ship, ShipClass, ShipPlacements};
use crate::shot::{self, Shot, ShotOutcome};

/// Match phases. `Idle` is initial; `GameOver` is terminal for the
/// aggregate (a rematch builds a fresh one). `Lobby` and `Waiting` only
/// occur in remote-peer mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Lobby,
    Waiting,
    Setup,
    Playing,
    GameOver,
}

impl core::fmt::Display for Phase {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(match self {
            Phase::Idle => "idle",
            Phase::Lobby => "lobby",
            Phase::Waiting => "waiting",
            Phase::Setup => "setup",
            Phase::Playing => "playing",
            Phase::GameOver => "gameover",
        })
    }
}

/// The two sides of a match. `Opponent` is the local AI or the remote peer;
/// the state machine does not care which.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Player,
    Opponent,
}

impl Side {
    pub fn other(self) -> Side {
        match self {
            Side::Player => Side::Opponent,
            Side::Opponent => Side::Player,
        }
    }
}

/// Everything one side owns: its waters, its fleet, what it knows about
/// the enemy waters, its shot history and remaining ability charges.
#[derive(Debug, Clone)]
pub struct SideState {
    board: Board,
    fleet: Fleet,
    view: Board,
    shots: Vec<Shot>,
    charges: ChargeBank,
    ready: bool,
}

impl SideState {
    fn new(board_size: u8, charges: ChargeBank) -> Self {
        Self {
            board: Board::new(board_size),
            fleet: Fleet::new(),
            view: Board::new(board_size),
            shots: Vec::new(),
            charges,
            ready: false,
        }
    }

    /// Own waters: placed ships plus incoming hits and misses.
    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn fleet(&self) -> &Fleet {
        &self.fleet
    }

    /// Knowledge of the enemy waters: own hits, misses and scan marks.
    pub fn view(&self) -> &Board {
        &self.view
    }

    /// Append-only shot history, most recent last.
    pub fn shots(&self) -> &[Shot] {
        &self.shots
    }

    pub fn charges(&self) -> &ChargeBank {
        &self.charges
    }

    pub fn is_ready(&self) -> bool {
        self.ready
    }
}

/// Outcome of one resolved player action.
#[derive(Debug, Clone, PartialEq)]
pub enum ActionOutcome {
    Shot(ShotOutcome),
    Ability {
        kind: AbilityKind,
        results: Vec<AbilityCellResult>,
    },
}

/// What a resolved action did to the turn order and the match.
/// `your_turn` is from the local player's perspective, as on the wire.
#[derive(Debug, Clone, PartialEq)]
pub struct TurnReport {
    pub outcome: ActionOutcome,
    pub your_turn: bool,
    pub game_over: bool,
}

/// One live match. Created when a mode is selected, discarded on leave.
#[derive(Debug, Clone)]
pub struct MatchState {
    config: MatchConfig,
    phase: Phase,
    turn: Side,
    winner: Option<Side>,
    session: u64,
    player: SideState,
    opponent: SideState,
}

impl MatchState {
    /// Rejects configurations that no match could play out on.
    pub fn new(config: MatchConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::from_config(config))
    }

    fn from_config(config: MatchConfig) -> Self {
        let player = SideState::new(config.board_size, config.charges);
        let opponent = SideState::new(config.board_size, config.charges);
        Self {
            config,
            phase: Phase::Idle,
            turn: Side::Player,
            winner: None,
            session: 1,
            player,
            opponent,
        }
    }

    pub fn config(&self) -> &MatchConfig {
        &self.config
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// The side currently permitted to act.
    pub fn turn(&self) -> Side {
        self.turn
    }

    pub fn winner(&self) -> Option<Side> {
        self.winner
    }

    /// Monotonically increasing token deferred work must capture before
    /// suspending and re-validate before mutating; see [`Self::abort`].
    pub fn session(&self) -> u64 {
        self.session
    }

    pub fn side(&self, side: Side) -> &SideState {
        match side {
            Side::Player => &self.player,
            Side::Opponent => &self.opponent,
        }
    }

    fn side_mut(&mut self, side: Side) -> &mut SideState {
        match side {
            Side::Player => &mut self.player,
            Side::Opponent => &mut self.opponent,
        }
    }

    fn require_phase(&self, phase: Phase) -> Result<(), GameError> {
        if self.phase != phase {
            return Err(GameError::Phase(self.phase));
        }
        Ok(())
    }

    fn require_turn(&self, side: Side) -> Result<(), GameError> {
        if self.turn != side {
            return Err(TurnError::NotYourTurn.into());
        }
        Ok(())
    }

    // ---- mode entry ------------------------------------------------------

    /// Computer-opponent mode: straight to ship placement.
    pub fn start_local(&mut self) -> Result<(), GameError> {
        self.require_phase(Phase::Idle)?;
        self.phase = Phase::Setup;
        Ok(())
    }

    /// Remote-peer mode: room discovery first.
    pub fn start_remote(&mut self) -> Result<(), GameError> {
        self.require_phase(Phase::Idle)?;
        self.phase = Phase::Lobby;
        Ok(())
    }

    /// A room was created or joined; wait for the server's setup phase.
    pub fn room_joined(&mut self) -> Result<(), GameError> {
        self.require_phase(Phase::Lobby)?;
        self.phase = Phase::Waiting;
        Ok(())
    }

    /// Server-driven `setup_phase`: adopt the served board size and fleet
    /// configuration and reinitialize both sides. An unplayable served
    /// configuration is rejected with the aggregate untouched.
    pub fn begin_setup(&mut self, board_size: u8, ships: FleetConfig) -> Result<(), GameError> {
        if self.phase != Phase::Waiting && self.phase != Phase::Lobby {
            return Err(GameError::Phase(self.phase));
        }
        let config = MatchConfig {
            board_size,
            ships,
            charges: self.config.charges,
        };
        config.validate()?;
        self.config = config;
        self.player = SideState::new(board_size, self.config.charges);
        self.opponent = SideState::new(board_size, self.config.charges);
        self.phase = Phase::Setup;
        Ok(())
    }

    // ---- setup -----------------------------------------------------------

    /// Validate and commit one ship placement.
    pub fn place_ship(
        &mut self,
        side: Side,
        class: ShipClass,
        anchor: Coord,
        orientation: Orientation,
    ) -> Result<&Ship, GameError> {
        self.require_phase(Phase::Setup)?;
        let board_size = self.config.board_size;
        let state = self.side(side);
        let positions = placement::plan(
            &self.config.ships,
            &state.fleet,
            class,
            anchor,
            orientation,
            board_size,
        )?;
        let state = self.side_mut(side);
        let id = state.fleet.add(Ship::new(class, positions.clone()));
        for pos in positions {
            state.board.put_ship(pos, id)?;
        }
        Ok(state.fleet.ship(id).ok_or(crate::error::GridError::UnknownShip)?)
    }

    /// Random full placement for one side, the way the AI sets up.
    pub fn place_random_fleet<R: Rng + ?Sized>(
        &mut self,
        side: Side,
        rng: &mut R,
    ) -> Result<(), GameError> {
        self.require_phase(Phase::Setup)?;
        let (board, fleet) = placement::random_fleet(rng, &self.config.ships, self.config.board_size)?;
        let state = self.side_mut(side);
        state.board = board;
        state.fleet = fleet;
        Ok(())
    }

    /// Lock a side's fleet in. Once both sides are ready the match enters
    /// `Playing` with the local player holding the first turn.
    pub fn confirm_fleet(&mut self, side: Side) -> Result<(), GameError> {
        self.require_phase(Phase::Setup)?;
        placement::confirm(&self.config.ships, &self.side(side).fleet)?;
        self.side_mut(side).ready = true;
        if self.player.ready && self.opponent.ready {
            self.phase = Phase::Playing;
            self.turn = Side::Player;
        }
        Ok(())
    }

    // ---- play ------------------------------------------------------------

    /// Resolve an ordinary shot by `side` at the other side's waters.
    pub fn fire(&mut self, side: Side, target: Coord) -> Result<TurnReport, GameError> {
        self.require_phase(Phase::Playing)?;
        self.require_turn(side)?;

        let defender = self.side_mut(side.other());
        let (outcome, fleet_sunk) = shot::resolve(&mut defender.board, &defender.fleet, target)?;

        let firer = self.side_mut(side);
        firer.view.apply_shot(target, outcome.hit)?;
        firer.shots.push(outcome.as_shot());

        self.finish_turn_action(side, fleet_sunk);
        Ok(TurnReport {
            outcome: ActionOutcome::Shot(outcome),
            your_turn: self.turn == Side::Player && self.phase == Phase::Playing,
            game_over: self.phase == Phase::GameOver,
        })
    }

    /// Resolve an ability use by `side`.
    ///
    /// Scan reveals without firing and keeps the turn; multi-shot and bomb
    /// resolve each not-yet-fired cell as an ordinary shot, silently skip
    /// the rest, and end the turn. Any resolved use costs one charge; a
    /// rejected request costs nothing and changes nothing.
    pub fn use_ability(
        &mut self,
        side: Side,
        request: AbilityRequest,
    ) -> Result<TurnReport, GameError> {
        self.require_phase(Phase::Playing)?;
        self.require_turn(side)?;
        let kind = request.kind();
        if self.side(side).charges.remaining(kind) == 0 {
            return Err(GameError::NoCharges(kind));
        }

        let board_size = self.config.board_size;
        let (cells, is_scan) = match &request {
            AbilityRequest::Scan { position } => {
                if position.x >= board_size || position.y >= board_size {
                    return Err(crate::error::GridError::OutOfBounds {
                        x: position.x,
                        y: position.y,
                        size: board_size,
                    }
                    .into());
                }
                (scan_area(*position, board_size), true)
            }
            AbilityRequest::MultiShot { positions } => {
                (validate_line(positions, board_size)?.to_vec(), false)
            }
            AbilityRequest::Bomb { position } => {
                if position.x >= board_size || position.y >= board_size {
                    return Err(crate::error::GridError::OutOfBounds {
                        x: position.x,
                        y: position.y,
                        size: board_size,
                    }
                    .into());
                }
                (bomb_area(*position, board_size), false)
            }
        };

        let mut results = Vec::with_capacity(cells.len());
        let mut any_hit = false;

        if is_scan {
            for cell in cells {
                let has_ship = matches!(
                    self.side(side.other()).board.cell(cell)?,
                    Cell::Ship(_)
                );
                self.side_mut(side).view.mark_scan(cell, has_ship)?;
                results.push(AbilityCellResult::scanned(cell, has_ship));
            }
        } else {
            for cell in cells {
                if self.side(side.other()).board.fired(cell) {
                    continue;
                }
                let defender = self.side_mut(side.other());
                let (outcome, _) = shot::resolve(&mut defender.board, &defender.fleet, cell)?;
                let firer = self.side_mut(side);
                firer.view.apply_shot(cell, outcome.hit)?;
                firer.shots.push(outcome.as_shot());
                any_hit |= outcome.hit;
                results.push(AbilityCellResult::fired(cell, outcome.hit, outcome.ship_class));
            }
        }

        self.side_mut(side).charges.take(kind)?;

        if !is_scan {
            let defender = self.side(side.other());
            let fleet_sunk = any_hit && defender.fleet.all_sunk(&defender.board, None);
            self.finish_turn_action(side, fleet_sunk);
        }

        Ok(TurnReport {
            outcome: ActionOutcome::Ability { kind, results },
            your_turn: self.turn == Side::Player && self.phase == Phase::Playing,
            game_over: self.phase == Phase::GameOver,
        })
    }

    /// Shared tail of every turn-ending action: either the match ends with
    /// the actor as winner, or the turn passes to the other side.
    fn finish_turn_action(&mut self, side: Side, fleet_sunk: bool) {
        if fleet_sunk {
            self.phase = Phase::GameOver;
            self.winner = Some(side);
        } else {
            self.turn = side.other();
        }
    }

    // ---- remote outcome appliers ----------------------------------------

    /// `game_started`: the server opened play and assigned the first turn.
    pub fn apply_game_started(&mut self, your_turn: bool, charges: ChargeBank) {
        self.phase = Phase::Playing;
        self.turn = if your_turn { Side::Player } else { Side::Opponent };
        self.player.charges = charges;
    }

    /// `shot_result`: outcome of our own shot, resolved by the server.
    pub fn apply_shot_result(
        &mut self,
        outcome: &ShotOutcome,
        your_turn: bool,
        game_over: bool,
    ) -> Result<(), GameError> {
        self.player.view.apply_shot(outcome.position, outcome.hit)?;
        self.player.shots.push(outcome.as_shot());
        self.set_remote_turn(your_turn, game_over, Side::Player);
        Ok(())
    }

    /// `opponent_shot`: the peer fired at our waters.
    pub fn apply_opponent_shot(
        &mut self,
        outcome: &ShotOutcome,
        your_turn: bool,
        game_over: bool,
    ) -> Result<(), GameError> {
        self.player.board.apply_shot(outcome.position, outcome.hit)?;
        self.set_remote_turn(your_turn, game_over, Side::Opponent);
        Ok(())
    }

    /// `ability_result`: outcome of our own ability use.
    pub fn apply_ability_result(
        &mut self,
        kind: AbilityKind,
        results: &[AbilityCellResult],
        your_turn: bool,
        game_over: bool,
    ) -> Result<(), GameError> {
        for result in results {
            match kind {
                AbilityKind::Scan => {
                    self.player
                        .view
                        .mark_scan(result.position, result.has_ship.unwrap_or(false))?;
                }
                _ => {
                    let hit = result.hit.unwrap_or(false);
                    self.player.view.apply_shot(result.position, hit)?;
                    self.player.shots.push(Shot {
                        x: result.position.x,
                        y: result.position.y,
                        hit,
                        ship_class: result.ship_class,
                        sunk: false,
                    });
                }
            }
        }
        if let Err(err) = self.player.charges.take(kind) {
            log::debug!("charge ledger behind the server: {err}");
        }
        self.set_remote_turn(your_turn, game_over, Side::Player);
        Ok(())
    }

    /// `opponent_ability`: the peer's ability touched our waters. Scan
    /// reveals nothing on our side, so only attack cells land here.
    pub fn apply_opponent_ability(
        &mut self,
        kind: AbilityKind,
        results: &[AbilityCellResult],
        your_turn: bool,
        game_over: bool,
    ) -> Result<(), GameError> {
        if kind != AbilityKind::Scan {
            for result in results {
                self.player
                    .board
                    .apply_shot(result.position, result.hit.unwrap_or(false))?;
            }
        }
        self.set_remote_turn(your_turn, game_over, Side::Opponent);
        Ok(())
    }

    /// `game_over`: terminal, with the opponent's fleet revealed.
    pub fn apply_game_over(
        &mut self,
        opponent_ships: ShipPlacements,
        you_won: bool,
    ) -> Result<(), GameError> {
        let mut board = Board::new(self.config.board_size);
        self.opponent.fleet = opponent_ships.into_fleet(&mut board)?;
        self.phase = Phase::GameOver;
        self.winner = Some(if you_won { Side::Player } else { Side::Opponent });
        Ok(())
    }

    fn set_remote_turn(&mut self, your_turn: bool, game_over: bool, actor: Side) {
        if game_over {
            self.phase = Phase::GameOver;
            self.winner = Some(actor);
        } else {
            self.turn = if your_turn { Side::Player } else { Side::Opponent };
        }
    }

    // ---- teardown --------------------------------------------------------

    /// Leave the match from any phase: back to `Idle`, all match data
    /// discarded, session bumped so stale deferred work cannot land.
    pub fn abort(&mut self) {
        self.session += 1;
        self.phase = Phase::Idle;
        self.turn = Side::Player;
        self.winner = None;
        self.player = SideState::new(self.config.board_size, self.config.charges);
        self.opponent = SideState::new(self.config.board_size, self.config.charges);
    }

    /// A rematch is a fresh aggregate in `Setup`, never a re-transition of
    /// a finished one.
    pub fn rematch(&self) -> MatchState {
        let mut next = MatchState::from_config(self.config.clone());
        next.session = self.session + 1;
        next.phase = Phase::Setup;
        next
    }
}

/// Accept a multi-shot position list: two points get the third derived,
/// three points are re-derived and must agree.
fn validate_line(positions: &[Coord], board_size: u8) -> Result<[Coord; 3], GameError> {
    match positions {
        [p0, p1] => Ok(crate::ability::derive_line(*p0, *p1, board_size)?),
        [p0, p1, p2] => {
            let line = crate::ability::derive_line(*p0, *p1, board_size)?;
            if line[2] != *p2 {
                return Err(SelectionError::InvalidLine.into());
            }
            Ok(line)
        }
        _ => Err(SelectionError::InvalidLine.into()),
    }
}
