//! Game setup: roles, the deck, and the flashlight

use super::super::card::{CardInfo, CardKind};
use super::super::player::{Player, Role};
use super::super::rules::{CardCatalog, RoleCounts, RoleTable, StandardRules};
use super::super::{GameState, GameStatus, Phase};
use super::test_utils::*;
use crate::error::GameError;
use crate::game::{Game, GameOptions};
use std::sync::Arc;

#[derive(Debug)]
struct NoRoles;

impl RoleTable for NoRoles {
    fn role_counts(&self, _: usize) -> Option<RoleCounts> {
        None
    }
}

#[derive(Debug)]
struct NoElderSigns;

impl CardCatalog for NoElderSigns {
    fn card_info(&self, kind: CardKind) -> Result<CardInfo, GameError> {
        match kind {
            CardKind::ElderSign => Err(GameError::Lookup(kind.to_string())),
            _ => StandardRules.card_info(kind),
        }
    }
}

fn seat_players(game: &mut Game, num_players: usize) {
    for i in 0..num_players {
        game.add_player(Player::new(format!("Player{}", i), None), true)
            .unwrap();
    }
}

#[test]
fn five_player_game_deals_twenty_five_cards() {
    let game = create_standard_5_player_game();

    assert_eq!(total_cards(&game), 25);
    assert_eq!(count_kind(&game, CardKind::Cthulhu), 1);
    assert_eq!(count_kind(&game, CardKind::ElderSign), 5);
    assert_eq!(count_kind(&game, CardKind::Blank), 19);
    assert_eq!(game.deck_len(), 0);
    assert_eq!(game.discard_len(), 0);
    for player in game.active_players() {
        assert_eq!(player.hand().len(), 5);
        assert!(player.hand().iter().all(|c| !c.is_face_up()));
    }
}

#[test]
fn large_tables_get_a_second_cthulhu() {
    for num_players in 3..=10 {
        let game = create_test_game(num_players, num_players as u64);
        let expected = if num_players > 8 { 2 } else { 1 };
        assert_eq!(count_kind(&game, CardKind::Cthulhu), expected);
        assert_eq!(count_kind(&game, CardKind::ElderSign), num_players);
        assert_eq!(total_cards(&game), 5 * num_players);
    }
}

#[test]
fn game_starts_in_the_claims_phase() {
    let game = create_standard_5_player_game();

    assert_eq!(game.status(), GameStatus::Ongoing);
    assert_eq!(game.phase(), Some(Phase::Claims));
    assert_eq!(game.round(), 1);
    assert_eq!(game.turn(), 1);
    assert_eq!(game.winner(), None);
}

#[test]
fn exactly_one_player_holds_the_flashlight() {
    for seed in 0..20 {
        let game = create_test_game(6, seed);
        let holders = game.active_players().filter(|p| p.has_flashlight()).count();
        assert_eq!(holders, 1);
    }
}

#[test]
fn flashlight_holder_makes_the_first_claim() {
    let game = create_standard_5_player_game();
    let holder = flashlight_holder(&game);

    assert_eq!(game.current_player(), Some(holder));
    for (seat, player) in game.players().iter().enumerate() {
        assert_eq!(player.can_claim(), seat == holder);
    }
}

#[test]
fn roles_follow_the_role_table() {
    for num_players in 3..=10 {
        let game = create_test_game(num_players, 7);
        let counts = StandardRules.role_counts(num_players).unwrap();
        let cultists = game
            .active_players()
            .filter(|p| p.role() == Some(Role::Cultist))
            .count();
        let investigators = game
            .active_players()
            .filter(|p| p.role() == Some(Role::Investigator))
            .count();

        assert_eq!(cultists + investigators, num_players);
        assert!(cultists <= counts.cultists);
        assert!(investigators <= counts.investigators);
    }
}

#[test]
fn cannot_start_twice() {
    let mut game = create_standard_5_player_game();
    assert_eq!(game.start_game(), Err(GameError::AlreadyStarted));
    assert_eq!(game.round(), 1);
}

#[test]
fn too_few_players_is_a_configuration_error() {
    let mut game = create_unstarted_game(2, 0);

    assert!(matches!(game.start_game(), Err(GameError::Configuration(_))));
    assert!(matches!(game.state, GameState::Unstarted));
    assert!(game.players().iter().all(|p| p.role().is_none()));
}

#[test]
fn table_is_full_at_ten_players() {
    let mut game = create_unstarted_game(10, 0);
    let result = game.add_player(Player::new("Player10", None), true);

    assert!(matches!(result, Err(GameError::Configuration(_))));
    assert_eq!(game.count_active_players(), 10);
}

#[test]
fn options_can_narrow_the_table() {
    let opts = GameOptions {
        min_players: 5,
        max_players: 6,
    };
    let mut game = Game::new(opts, 0);
    seat_players(&mut game, 4);

    assert!(matches!(game.start_game(), Err(GameError::Configuration(_))));
}

#[test]
fn missing_role_setup_is_a_configuration_error() {
    let mut game = Game::with_rules(GameOptions::default(), 0, Arc::new(StandardRules), Arc::new(NoRoles));
    seat_players(&mut game, 5);

    assert!(matches!(game.start_game(), Err(GameError::Configuration(_))));
    assert_eq!(game.status(), GameStatus::Unstarted);
}

#[test]
fn missing_card_metadata_is_a_lookup_error() {
    let mut game = Game::with_rules(GameOptions::default(), 0, Arc::new(NoElderSigns), Arc::new(StandardRules));
    seat_players(&mut game, 5);

    assert_eq!(game.start_game(), Err(GameError::Lookup("Elder Sign".into())));
    assert_eq!(game.status(), GameStatus::Unstarted);
    assert!(game.players().iter().all(|p| p.hand().is_empty()));
}

#[test]
fn spectators_are_not_dealt_in() {
    let mut game = create_unstarted_game(4, 3);
    game.add_player(Player::new("Watcher", None), false).unwrap();
    game.start_game().unwrap();

    let watcher = &game.players()[game.find_player("Watcher").unwrap()];
    assert!(watcher.hand().is_empty());
    assert!(watcher.role().is_none());
    assert!(!watcher.has_flashlight());
    assert_eq!(total_cards(&game), 20);
}

#[test]
fn same_seed_same_game() {
    let a = create_test_game(7, 99);
    let b = create_test_game(7, 99);

    assert_eq!(flashlight_holder(&a), flashlight_holder(&b));
    for (pa, pb) in a.players().iter().zip(b.players()) {
        assert_eq!(pa.role(), pb.role());
        assert_eq!(pa.hand(), pb.hand());
    }
}
