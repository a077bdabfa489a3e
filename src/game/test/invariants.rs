//! Properties that hold across random legal play

use super::super::card::CardKind;
use super::super::Phase;
use super::test_utils::*;
use proptest::prelude::*;

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn random_play_preserves_invariants(
        num_players in 3usize..=10,
        seed in any::<u64>(),
        choices in proptest::collection::vec(any::<usize>(), 0..200),
    ) {
        let mut game = create_test_game(num_players, seed);
        let kinds = |game: &crate::game::Game| {
            CardKind::ALL.map(|kind| count_kind(game, kind))
        };
        let initial_kinds = kinds(&game);
        let mut winner = None;

        for choice in choices {
            if game.game_over() {
                break;
            }
            let seat = game.current_player().unwrap();
            match game.phase().unwrap() {
                Phase::Claims => game.set_claim(seat, 0, 0, 0).unwrap(),
                Phase::Investigation => {
                    let targets = (0..num_players)
                        .filter(|&t| t != seat)
                        .filter(|&t| game.players()[t].hand().iter().any(|c| !c.is_face_up()))
                        .collect::<Vec<_>>();
                    let target = targets[choice % targets.len()];
                    game.investigate(seat, target, None).unwrap();
                }
            }

            prop_assert_eq!(total_cards(&game), 5 * num_players);
            prop_assert_eq!(kinds(&game), initial_kinds);
            let holders = game.active_players().filter(|p| p.has_flashlight()).count();
            prop_assert_eq!(holders, 1);
            if winner.is_some() {
                prop_assert_eq!(game.outcome(), winner);
            }
            winner = game.outcome();
        }
    }
}
