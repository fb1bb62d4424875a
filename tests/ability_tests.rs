use std::collections::BTreeMap;

use armada::{
    derive_line, AbilityKind, AbilityRequest, ActionOutcome, Cell, Coord, FleetConfig, GameError,
    MatchConfig, MatchState, Orientation, Phase, SelectionError, ShipClass, ShipSpec, Side,
};

/// One destroyer per side on (0,0)-(1,0), match live, player to act.
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
    state
}

#[test]
fn test_scan_reveals_and_keeps_turn() {
    let mut state = playing_state();
    let report = state
        .use_ability(Side::Player, AbilityRequest::Scan { position: Coord::new(5, 5) })
        .unwrap();

    let ActionOutcome::Ability { kind, results } = report.outcome else {
        panic!("expected an ability outcome");
    };
    assert_eq!(kind, AbilityKind::Scan);
    assert_eq!(results.len(), 9);
    assert!(results.iter().all(|r| r.has_ship == Some(false)));

    // scanning does not spend the turn
    assert!(report.your_turn);
    assert_eq!(state.turn(), Side::Player);
    assert_eq!(state.side(Side::Player).charges().scan, 0);
    assert_eq!(
        state.side(Side::Player).view().cell(Coord::new(5, 5)).unwrap(),
        Cell::ScanEmpty
    );
}

#[test]
fn test_scan_clips_at_corner_and_finds_ships() {
    let mut state = playing_state();
    let report = state
        .use_ability(Side::Player, AbilityRequest::Scan { position: Coord::new(0, 0) })
        .unwrap();

    let ActionOutcome::Ability { results, .. } = report.outcome else {
        panic!("expected an ability outcome");
    };
    assert_eq!(results.len(), 4);
    let flagged: Vec<Coord> = results
        .iter()
        .filter(|r| r.has_ship == Some(true))
        .map(|r| r.position)
        .collect();
    assert_eq!(flagged, vec![Coord::new(0, 0), Coord::new(1, 0)]);
    assert_eq!(
        state.side(Side::Player).view().cell(Coord::new(1, 0)).unwrap(),
        Cell::ScanShip
    );
    // own waters stay untouched
    assert!(matches!(
        state.side(Side::Player).board().cell(Coord::new(0, 0)).unwrap(),
        Cell::Ship(_)
    ));
}

#[test]
fn test_second_scan_has_no_charge() {
    let mut state = playing_state();
    state
        .use_ability(Side::Player, AbilityRequest::Scan { position: Coord::new(4, 4) })
        .unwrap();
    assert_eq!(
        state
            .use_ability(Side::Player, AbilityRequest::Scan { position: Coord::new(4, 4) })
            .unwrap_err(),
        GameError::NoCharges(AbilityKind::Scan)
    );
}

#[test]
fn test_bomb_clips_at_far_corner() {
    let mut state = playing_state();
    let report = state
        .use_ability(Side::Player, AbilityRequest::Bomb { position: Coord::new(9, 9) })
        .unwrap();

    let ActionOutcome::Ability { results, .. } = report.outcome else {
        panic!("expected an ability outcome");
    };
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].position, Coord::new(9, 9));
    assert_eq!(results[0].hit, Some(false));
    // attacks end the turn
    assert!(!report.your_turn);
    assert_eq!(state.turn(), Side::Opponent);
    assert_eq!(state.side(Side::Player).charges().bomb, 0);
}

#[test]
fn test_bomb_can_win_outright() {
    let mut state = playing_state();
    let report = state
        .use_ability(Side::Player, AbilityRequest::Bomb { position: Coord::new(0, 0) })
        .unwrap();

    assert!(report.game_over);
    assert_eq!(state.phase(), Phase::GameOver);
    assert_eq!(state.winner(), Some(Side::Player));
}

#[test]
fn test_multi_shot_derives_third_point() {
    let request = AbilityRequest::multi_shot(Coord::new(2, 2), Coord::new(2, 3), 10).unwrap();
    assert_eq!(
        request,
        AbilityRequest::MultiShot {
            positions: vec![Coord::new(2, 2), Coord::new(2, 3), Coord::new(2, 4)],
        }
    );
    let line = derive_line(Coord::new(2, 2), Coord::new(3, 2), 10).unwrap();
    assert_eq!(line[2], Coord::new(4, 2));
}

#[test]
fn test_multi_shot_rejects_bad_lines() {
    // gap of two
    assert_eq!(
        AbilityRequest::multi_shot(Coord::new(2, 2), Coord::new(4, 2), 10).unwrap_err(),
        SelectionError::InvalidLine
    );
    // diagonal
    assert_eq!(
        AbilityRequest::multi_shot(Coord::new(2, 2), Coord::new(3, 3), 10).unwrap_err(),
        SelectionError::InvalidLine
    );
    // same point twice
    assert_eq!(
        AbilityRequest::multi_shot(Coord::new(2, 2), Coord::new(2, 2), 10).unwrap_err(),
        SelectionError::InvalidLine
    );
    // reflection leaves the grid
    assert_eq!(
        AbilityRequest::multi_shot(Coord::new(8, 0), Coord::new(9, 0), 10).unwrap_err(),
        SelectionError::OutOfBounds
    );
}

#[test]
fn test_rejected_multi_shot_costs_nothing() {
    let mut state = playing_state();
    let err = state
        .use_ability(
            Side::Player,
            AbilityRequest::MultiShot {
                positions: vec![Coord::new(2, 2), Coord::new(4, 2)],
            },
        )
        .unwrap_err();
    assert_eq!(err, GameError::Selection(SelectionError::InvalidLine));
    assert_eq!(state.side(Side::Player).charges().multi_shot, 1);
    assert_eq!(state.turn(), Side::Player);
    assert!(state.side(Side::Player).shots().is_empty());
}

#[test]
fn test_multi_shot_skips_already_fired_cells() {
    let mut state = playing_state();
    state.fire(Side::Player, Coord::new(4, 0)).unwrap();
    state.fire(Side::Opponent, Coord::new(9, 9)).unwrap();

    let request = AbilityRequest::multi_shot(Coord::new(3, 0), Coord::new(4, 0), 10).unwrap();
    let report = state.use_ability(Side::Player, request).unwrap();

    let ActionOutcome::Ability { results, .. } = report.outcome else {
        panic!("expected an ability outcome");
    };
    // (4,0) was already resolved; only the other two fire
    assert_eq!(results.len(), 2);
    assert_eq!(results[0].position, Coord::new(3, 0));
    assert_eq!(results[1].position, Coord::new(5, 0));
    assert_eq!(state.side(Side::Player).shots().len(), 3);
    // the turn still passes and the charge is still spent
    assert_eq!(state.turn(), Side::Opponent);
    assert_eq!(state.side(Side::Player).charges().multi_shot, 0);
}

#[test]
fn test_ability_needs_the_turn() {
    let mut state = playing_state();
    state.fire(Side::Player, Coord::new(5, 5)).unwrap();
    assert!(matches!(
        state.use_ability(Side::Player, AbilityRequest::Bomb { position: Coord::new(3, 3) }),
        Err(GameError::Turn(_))
    ));
}
