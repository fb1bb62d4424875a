use std::time::Duration;

use armada::{
    choose_target, Difficulty, LocalAi, MatchConfig, MatchState, Opponent, Phase, PlayerAction,
    Side,
};
use rand::rngs::SmallRng;
use rand::SeedableRng;

fn ready_match(seed: u64) -> MatchState {
    let mut state = MatchState::new(MatchConfig::default()).unwrap();
    state.start_local().unwrap();
    let mut rng = SmallRng::seed_from_u64(seed);
    state.place_random_fleet(Side::Player, &mut rng).unwrap();
    state.place_random_fleet(Side::Opponent, &mut rng).unwrap();
    state.confirm_fleet(Side::Player).unwrap();
    state.confirm_fleet(Side::Opponent).unwrap();
    state
}

#[tokio::test]
async fn test_ai_vs_ai_match_ends_with_a_winner() {
    let mut state = MatchState::new(MatchConfig::default()).unwrap();
    state.start_local().unwrap();
    let mut ai = LocalAi::new(Difficulty::Hard, 123).with_delay(Duration::ZERO);
    let mut player_rng = SmallRng::seed_from_u64(321);
    state.place_random_fleet(Side::Player, &mut player_rng).unwrap();
    ai.place_fleet(&mut state).unwrap();
    state.confirm_fleet(Side::Player).unwrap();
    assert_eq!(state.phase(), Phase::Playing);

    let mut turns = 0;
    while state.phase() == Phase::Playing {
        turns += 1;
        if turns > 400 {
            panic!("match took too many turns");
        }
        match state.turn() {
            Side::Player => {
                let target = choose_target(
                    &mut player_rng,
                    Difficulty::Hard,
                    state.side(Side::Player).shots(),
                    state.config().board_size,
                )
                .unwrap();
                ai.submit(&mut state, PlayerAction::Fire(target)).await.unwrap();
            }
            Side::Opponent => {
                let report = ai.respond(&mut state).await.unwrap();
                assert!(report.is_some(), "AI must move on its own turn");
            }
        }
    }

    assert_eq!(state.phase(), Phase::GameOver);
    let winner = state.winner().unwrap();
    let loser = state.side(winner.other());
    assert!(loser.fleet().all_sunk(loser.board(), None));
}

#[tokio::test]
async fn test_matches_terminate_across_seeds_and_difficulties() {
    for (seed, difficulty) in [(1, Difficulty::Easy), (2, Difficulty::Normal), (3, Difficulty::Hard)] {
        let mut state = ready_match(seed);
        let mut ai = LocalAi::new(difficulty, seed).with_delay(Duration::ZERO);
        let mut player_rng = SmallRng::seed_from_u64(seed + 1000);
        let mut turns = 0;
        while state.phase() == Phase::Playing {
            turns += 1;
            if turns > 400 {
                panic!("match took too many turns at difficulty {difficulty:?}");
            }
            match state.turn() {
                Side::Player => {
                    let target = choose_target(
                        &mut player_rng,
                        difficulty,
                        state.side(Side::Player).shots(),
                        10,
                    )
                    .unwrap();
                    ai.submit(&mut state, PlayerAction::Fire(target)).await.unwrap();
                }
                Side::Opponent => {
                    ai.respond(&mut state).await.unwrap();
                }
            }
        }
        assert!(state.winner().is_some());
    }
}

#[tokio::test]
async fn test_respond_outside_its_turn_is_a_no_op() {
    let mut state = ready_match(7);
    let mut ai = LocalAi::new(Difficulty::Normal, 7).with_delay(Duration::ZERO);

    // player to act: the deferred move must drop itself
    assert_eq!(state.turn(), Side::Player);
    let report = ai.respond(&mut state).await.unwrap();
    assert!(report.is_none());
    assert_eq!(state.side(Side::Player).board().size(), 10);
    assert!(state.side(Side::Opponent).shots().is_empty());
}

#[tokio::test]
async fn test_respond_after_abort_is_a_no_op() {
    let mut state = ready_match(8);
    let mut ai = LocalAi::new(Difficulty::Normal, 8).with_delay(Duration::ZERO);
    state.fire(Side::Player, armada::Coord::new(0, 0)).unwrap();
    state.abort();

    let report = ai.respond(&mut state).await.unwrap();
    assert!(report.is_none());
    assert_eq!(state.phase(), Phase::Idle);
}
