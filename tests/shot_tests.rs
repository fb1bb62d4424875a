use std::collections::BTreeMap;

use armada::{
    ActionOutcome, Cell, Coord, FleetConfig, GameError, MatchConfig, MatchState, Orientation,
    Phase, ShipClass, ShipSpec, Side, TurnError,
};

/// A minimal match in the playing phase: one destroyer per side, player's
/// and opponent's both on (0,0)-(1,0). Player holds the first turn.
fn playing_state() -> MatchState {
    let mut config = MatchConfig::default();
    config.ships = FleetConfig(BTreeMap::from([(
        ShipClass::Destroyer,
        ShipSpec { size: 2, count: 1 },
    )]));
    let mut state = MatchState::new(config).unwrap();
    state.start_local().unwrap();
    for side in [Side::Player, Side::Opponent] {
        state
            .place_ship(side, ShipClass::Destroyer, Coord::new(0, 0), Orientation::Horizontal)
            .unwrap();
        state.confirm_fleet(side).unwrap();
    }
    assert_eq!(state.phase(), Phase::Playing);
    assert_eq!(state.turn(), Side::Player);
    state
}

#[test]
fn test_miss_reports_and_passes_turn() {
    let mut state = playing_state();
    let report = state.fire(Side::Player, Coord::new(5, 5)).unwrap();

    let ActionOutcome::Shot(outcome) = report.outcome else {
        panic!("expected a shot outcome");
    };
    assert!(!outcome.hit);
    assert_eq!(outcome.ship_class, None);
    assert!(!outcome.sunk);
    assert!(!report.your_turn);
    assert!(!report.game_over);
    assert_eq!(state.turn(), Side::Opponent);

    // mirrored onto the firer's view, not the firer's own waters
    assert_eq!(
        state.side(Side::Player).view().cell(Coord::new(5, 5)).unwrap(),
        Cell::Miss
    );
    assert_eq!(
        state.side(Side::Player).board().cell(Coord::new(5, 5)).unwrap(),
        Cell::Empty
    );
}

#[test]
fn test_hit_reports_ship_class() {
    let mut state = playing_state();
    let report = state.fire(Side::Player, Coord::new(0, 0)).unwrap();

    let ActionOutcome::Shot(outcome) = report.outcome else {
        panic!("expected a shot outcome");
    };
    assert!(outcome.hit);
    assert_eq!(outcome.ship_class, Some(ShipClass::Destroyer));
    assert!(!outcome.sunk, "one of two cells is not a sink");
    assert_eq!(state.turn(), Side::Opponent);

    let shots = state.side(Side::Player).shots();
    assert_eq!(shots.len(), 1);
    assert!(shots[0].hit);
}

#[test]
fn test_final_hit_sinks_and_ends_match() {
    let mut state = playing_state();
    state.fire(Side::Player, Coord::new(0, 0)).unwrap();
    state.fire(Side::Opponent, Coord::new(9, 9)).unwrap();
    let report = state.fire(Side::Player, Coord::new(1, 0)).unwrap();

    let ActionOutcome::Shot(outcome) = report.outcome else {
        panic!("expected a shot outcome");
    };
    assert!(outcome.sunk);
    assert!(report.game_over);
    assert_eq!(state.phase(), Phase::GameOver);
    assert_eq!(state.winner(), Some(Side::Player));

    // terminal: no further actions resolve
    assert_eq!(
        state.fire(Side::Opponent, Coord::new(3, 3)).unwrap_err(),
        GameError::Phase(Phase::GameOver)
    );
}

#[test]
fn test_refire_is_rejected_without_side_effects() {
    let mut state = playing_state();
    state.fire(Side::Player, Coord::new(5, 5)).unwrap();
    state.fire(Side::Opponent, Coord::new(9, 9)).unwrap();

    assert_eq!(
        state.fire(Side::Player, Coord::new(5, 5)).unwrap_err(),
        GameError::Turn(TurnError::AlreadyFired)
    );
    // rejection keeps the turn and the history
    assert_eq!(state.turn(), Side::Player);
    assert_eq!(state.side(Side::Player).shots().len(), 1);
}

#[test]
fn test_out_of_bounds_shot_is_rejected() {
    let mut state = playing_state();
    assert!(matches!(
        state.fire(Side::Player, Coord::new(10, 0)).unwrap_err(),
        GameError::Grid(_)
    ));
    assert_eq!(state.turn(), Side::Player);
}
