use armada::{
    Board, Cell, Coord, Fleet, GridError, MatchConfig, MatchState, Orientation, ShipClass,
    ShipPlacements, Side,
};

#[test]
fn test_new_board_is_empty() {
    let board = Board::new(7);
    assert_eq!(board.size(), 7);
    for y in 0..7 {
        for x in 0..7 {
            let c = Coord::new(x, y);
            assert_eq!(board.cell(c).unwrap(), Cell::Empty);
            assert!(!board.fired(c));
        }
    }
}

#[test]
fn test_out_of_bounds_cell_is_an_error() {
    let board = Board::new(5);
    assert_eq!(
        board.cell(Coord::new(5, 0)).unwrap_err(),
        GridError::OutOfBounds { x: 5, y: 0, size: 5 }
    );
    assert!(!board.in_bounds(Coord::new(0, 5)));
    assert!(board.in_bounds(Coord::new(4, 4)));
}

#[test]
fn test_coord_offset_respects_bounds() {
    let c = Coord::new(0, 0);
    assert_eq!(c.offset(-1, 0, 10), None);
    assert_eq!(c.offset(0, -1, 10), None);
    assert_eq!(c.offset(1, 1, 10), Some(Coord::new(1, 1)));

    let edge = Coord::new(9, 9);
    assert_eq!(edge.offset(1, 0, 10), None);
    assert_eq!(edge.offset(0, 1, 10), None);
    assert_eq!(edge.offset(-1, -1, 10), Some(Coord::new(8, 8)));
}

#[test]
fn test_place_ship_marks_board_cells() {
    let mut state = MatchState::new(MatchConfig::default()).unwrap();
    state.start_local().unwrap();
    state
        .place_ship(
            Side::Player,
            ShipClass::Cruiser,
            Coord::new(2, 3),
            Orientation::Vertical,
        )
        .unwrap();

    let board = state.side(Side::Player).board();
    for y in 3..6 {
        assert!(matches!(board.cell(Coord::new(2, y)).unwrap(), Cell::Ship(_)));
    }
    assert_eq!(board.cell(Coord::new(2, 6)).unwrap(), Cell::Empty);
    assert_eq!(board.cell(Coord::new(3, 3)).unwrap(), Cell::Empty);
}

#[test]
fn test_ship_placements_roundtrip() {
    let mut state = MatchState::new(MatchConfig::default()).unwrap();
    state.start_local().unwrap();
    state
        .place_ship(
            Side::Player,
            ShipClass::Battleship,
            Coord::new(0, 0),
            Orientation::Horizontal,
        )
        .unwrap();
    state
        .place_ship(
            Side::Player,
            ShipClass::Submarine,
            Coord::new(5, 5),
            Orientation::Horizontal,
        )
        .unwrap();

    let placements = ShipPlacements::from(state.side(Side::Player).fleet());
    let mut board = Board::new(10);
    let rebuilt: Fleet = placements.into_fleet(&mut board).unwrap();

    assert_eq!(rebuilt.ships().len(), 2);
    assert!(matches!(board.cell(Coord::new(3, 0)).unwrap(), Cell::Ship(_)));
    assert!(matches!(board.cell(Coord::new(5, 5)).unwrap(), Cell::Ship(_)));
    assert_eq!(board.cell(Coord::new(4, 0)).unwrap(), Cell::Empty);
}
