use self::card::{Card, CardKind};
use self::claim::Claim;
use self::deck::Deck;
pub use self::options::GameOptions;
use self::player::{assign_roles, Participation, Player, Role};
use self::rules::{CardCatalog, RoleTable, StandardRules};
use crate::error::GameError;
use chrono::{DateTime, Utc};
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

pub mod card;
pub mod claim;
pub mod deck;
mod json;
pub mod options;
pub mod player;
pub mod rules;
mod test;

/// A game of Don't Mess with Cthulhu.
#[derive(Clone, Debug)]
pub struct Game {
    opts: GameOptions,
    catalog: Arc<dyn CardCatalog>,
    role_table: Arc<dyn RoleTable>,
    /// Everyone at the table in seating order, spectators included.
    players: Vec<Player>,
    deck: Deck,
    state: GameState,
    round: usize,
    turn: usize,
    outcome: Option<WinCondition>,
    rng: rand_chacha::ChaCha8Rng,
}

/// Coarse lifecycle of a game.
#[derive(Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Debug)]
pub enum GameStatus {
    Unstarted,
    Ongoing,
    Ended,
}

/// The two alternating phases of a round.
#[derive(Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Debug)]
pub enum Phase {
    /// Each player in turn declares what they hold.
    Claims,
    /// The flashlight holder reveals a card from another player's hand.
    Investigation,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
enum GameState {
    Unstarted,
    Ongoing { phase: Phase },
    Ended,
}

/// How the game was decided.
#[derive(Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Debug)]
pub enum WinCondition {
    /// A Cthulhu card was revealed.
    CthulhuRevealed,
    /// As many Elder Signs as players were revealed.
    ElderSignsFound,
    /// Four cards per player were revealed without finding every Elder Sign.
    CardsExhausted,
}

impl WinCondition {
    /// The team that wins under this condition.
    pub fn winner(self) -> Role {
        match self {
            WinCondition::CthulhuRevealed | WinCondition::CardsExhausted => Role::Cultist,
            WinCondition::ElderSignsFound => Role::Investigator,
        }
    }
}

impl ToString for WinCondition {
    fn to_string(&self) -> String {
        match self {
            WinCondition::CthulhuRevealed => "CthulhuRevealed",
            WinCondition::ElderSignsFound => "ElderSignsFound",
            WinCondition::CardsExhausted => "CardsExhausted",
        }
        .to_string()
    }
}

/// One seat in a finished game's final roster.
#[derive(Clone, Serialize, Deserialize, PartialEq, Eq, Debug)]
pub struct PlayerResult {
    pub id: String,
    pub name: String,
    pub role: Role,
}

/// Everything a statistics keeper needs to know about a finished game.
#[derive(Clone, Serialize, Deserialize, Debug)]
pub struct GameResult {
    pub players: Vec<PlayerResult>,
    pub outcome: Option<WinCondition>,
    pub winner: Option<Role>,
    pub rounds: usize,
    pub ended_at: DateTime<Utc>,
}

impl GameResult {
    /// Returns whether the player with the given id was on the winning team.
    pub fn player_has_won(&self, id: &str) -> bool {
        let Some(winner) = self.winner else {
            return false;
        };
        self.players.iter().any(|p| p.id == id && p.role == winner)
    }
}

impl Game {
    /// Creates an empty, unstarted game using the standard card and role tables.
    pub fn new(opts: GameOptions, seed: u64) -> Self {
        Self::with_rules(opts, seed, Arc::new(StandardRules), Arc::new(StandardRules))
    }

    /// Creates an empty, unstarted game with custom lookup tables.
    pub fn with_rules(
        opts: GameOptions,
        seed: u64,
        catalog: Arc<dyn CardCatalog>,
        role_table: Arc<dyn RoleTable>,
    ) -> Self {
        Game {
            opts,
            catalog,
            role_table,
            players: vec![],
            deck: Deck::default(),
            state: GameState::Unstarted,
            round: 0,
            turn: 0,
            outcome: None,
            rng: rand_chacha::ChaCha8Rng::seed_from_u64(seed),
        }
    }

    /// Seats a player, either as a participant or a spectator, and returns their seat.
    /// Participants may only join before the game starts.
    pub fn add_player(&mut self, mut player: Player, is_playing: bool) -> Result<usize, GameError> {
        match self.state {
            GameState::Ended => return Err(GameError::GameNotInProgress),
            GameState::Ongoing { .. } if is_playing => return Err(GameError::AlreadyStarted),
            _ => {}
        }
        if self.players.iter().any(|p| p.id() == player.id()) {
            return Err(GameError::AlreadyJoined);
        }
        if is_playing && self.count_active_players() >= self.opts.max_players.min(options::MAX_PLAYERS) {
            return Err(GameError::Configuration("the table is full".into()));
        }

        player.reset();
        player.set_status(if is_playing {
            Participation::Playing
        } else {
            Participation::Spectating
        });
        log::info!("{} joined as a {}", player, if is_playing { "player" } else { "spectator" });
        self.players.push(player);
        Ok(self.players.len() - 1)
    }

    /// Removes a player from the table and returns them, idle.
    /// Participants cannot leave a game in progress, and nobody leaves a finished one.
    pub fn remove_player(&mut self, id: &str) -> Result<Player, GameError> {
        if self.state == GameState::Ended {
            return Err(GameError::GameNotInProgress);
        }
        let seat = self.find_player(id)?;
        if matches!(self.state, GameState::Ongoing { .. }) && self.players[seat].is_playing() {
            return Err(GameError::AlreadyStarted);
        }
        let mut player = self.players.remove(seat);
        player.reset();
        log::info!("{} left the game", player);
        Ok(player)
    }

    /// Assigns roles, deals the deck, and hands the flashlight to a random player.
    pub fn start_game(&mut self) -> Result<(), GameError> {
        if self.state != GameState::Unstarted {
            return Err(GameError::AlreadyStarted);
        }

        let num_players = self.count_active_players();
        self.opts.validate_player_count(num_players)?;
        let counts = self.role_table.role_counts(num_players).ok_or_else(|| {
            GameError::Configuration(format!("no role setup for {} players", num_players))
        })?;
        let deck = Deck::new(num_players, self.catalog.as_ref())?;
        let roles = assign_roles(counts, num_players, &mut self.rng)?;

        for (seat, role) in self.active_seats().into_iter().zip(roles) {
            self.players[seat].start_playing(role)?;
        }
        self.deck = deck;
        self.deal_cards()?;

        let active = self.active_seats();
        let holder = active[self.rng.gen_range(0..active.len())];
        self.players[holder].toggle_flashlight();
        for &seat in &active {
            self.players[seat].set_can_claim(seat == holder);
        }

        self.state = GameState::Ongoing { phase: Phase::Claims };
        self.round = 1;
        self.turn = 1;
        log::info!(
            "Game started with {} players; {} holds the flashlight",
            num_players,
            self.players[holder]
        );
        Ok(())
    }

    /// Records a player's claim. During the claims phase this passes the turn to the next player.
    pub fn set_claim(
        &mut self,
        player: usize,
        blank: usize,
        elder_sign: usize,
        cthulhu: usize,
    ) -> Result<(), GameError> {
        let phase = self.check_in_play(player)?;
        let claim = Claim::new(blank, elder_sign, cthulhu);
        let shown = claim.cards(self.catalog.as_ref())?;

        self.players[player].set_claim(claim)?;
        log::debug!(
            "{} claims {}",
            self.players[player],
            shown.iter().map(|c| c.kind().to_string()).collect::<Vec<_>>().join(", ")
        );

        if phase == Phase::Claims {
            let next = self.next_player(player);
            self.players[next].set_can_claim(true);
            self.new_turn()?;
        }
        Ok(())
    }

    /// The flashlight holder reveals a card from `target`'s hand, then passes them the flashlight.
    /// Reveals the card at `position`, or the first face-down card if no position is given.
    pub fn investigate(
        &mut self,
        user: usize,
        target: usize,
        position: Option<usize>,
    ) -> Result<CardKind, GameError> {
        let phase = self.check_in_play(user)?;
        self.check_player_index(target)?;
        if !self.players[user].has_flashlight() {
            return Err(GameError::NoFlashlight);
        }
        if phase != Phase::Investigation {
            return Err(GameError::NotYourTurn);
        }
        if user == target || !self.players[target].is_playing() {
            return Err(GameError::InvalidPlayerChoice);
        }
        self.players[target].revealable(position)?;

        self.players[user].set_flashlight(false);
        let kind = self.players[target].reveal_card(position)?;
        self.players[target].set_flashlight(true);
        log::debug!("{} investigated {} and found {}", self.players[user], self.players[target], kind);

        self.new_turn()?;
        Ok(kind)
    }

    /// Ends a game in progress and reports the final roster.
    pub fn end_game(&mut self) -> Result<GameResult, GameError> {
        if !matches!(self.state, GameState::Ongoing { .. }) {
            return Err(GameError::GameNotInProgress);
        }
        self.state = GameState::Ended;
        let result = GameResult {
            players: self
                .active_players()
                .filter_map(|p| {
                    Some(PlayerResult {
                        id: p.id().to_string(),
                        name: p.display_name().to_string(),
                        role: p.role()?,
                    })
                })
                .collect(),
            outcome: self.outcome,
            winner: self.winner(),
            rounds: self.round,
            ended_at: Utc::now(),
        };
        match result.winner {
            Some(winner) => log::info!("Game over: {} victory after {} rounds", winner, self.round),
            None => log::info!("Game abandoned after {} rounds", self.round),
        }
        Ok(result)
    }

    /// Determines whether either team has won, based on every face-up card in play or discarded.
    /// A revealed Cthulhu takes precedence over the Elder Sign count.
    pub fn check_winner(&self) -> Option<WinCondition> {
        let num_players = self.count_active_players();
        let revealed = self
            .active_players()
            .flat_map(|p| p.hand().iter())
            .chain(self.deck.discard().iter())
            .filter(|c| c.is_face_up());

        let (mut cards, mut signs, mut cthulhu) = (0, 0, false);
        for card in revealed {
            cards += 1;
            match card.kind() {
                CardKind::Cthulhu => cthulhu = true,
                CardKind::ElderSign => signs += 1,
                CardKind::Blank => {}
            }
        }

        if cthulhu {
            Some(WinCondition::CthulhuRevealed)
        } else if signs >= num_players {
            Some(WinCondition::ElderSignsFound)
        } else if cards >= num_players * 4 {
            Some(WinCondition::CardsExhausted)
        } else {
            None
        }
    }

    /// Checks for a winner, then advances the turn. Play stops advancing once the game is decided.
    fn new_turn(&mut self) -> Result<(), GameError> {
        if self.outcome.is_some() {
            return Ok(());
        }
        if let Some(outcome) = self.check_winner() {
            log::info!("{} win: {}", outcome.winner(), outcome.to_string());
            self.outcome = Some(outcome);
            return Ok(());
        }
        self.turn += 1;
        if self.turn > self.count_active_players() {
            match self.phase() {
                Some(Phase::Claims) => self.new_phase(),
                Some(Phase::Investigation) => self.new_round()?,
                None => {}
            }
        }
        Ok(())
    }

    /// Moves from claims to investigation. Claims may be revised freely from here on.
    fn new_phase(&mut self) {
        self.state = GameState::Ongoing { phase: Phase::Investigation };
        self.turn = 1;
        for seat in self.active_seats() {
            self.players[seat].set_can_claim(true);
        }
        log::info!("Round {}: investigation phase", self.round);
    }

    /// Collects every hand into the deck or discard pile and deals a fresh round.
    fn new_round(&mut self) -> Result<(), GameError> {
        self.state = GameState::Ongoing { phase: Phase::Claims };
        self.round += 1;
        self.turn = 1;
        for seat in self.active_seats() {
            let player = &mut self.players[seat];
            self.deck.recollect(player.take_hand());
            player.clear_claim();
            let holds_flashlight = player.has_flashlight();
            player.set_can_claim(holds_flashlight);
        }
        self.deal_cards()?;
        log::info!("Round {}: claims phase", self.round);
        Ok(())
    }

    fn deal_cards(&mut self) -> Result<(), GameError> {
        let seats = self.active_seats();
        let hands = self.deck.deal(seats.len(), &mut self.rng);
        for (seat, hand) in seats.into_iter().zip(hands) {
            self.players[seat].set_hand(hand)?;
        }
        Ok(())
    }

    /// Checks that `player` is a participant in a game still being played, and returns the phase.
    fn check_in_play(&self, player: usize) -> Result<Phase, GameError> {
        self.check_player_index(player)?;
        let GameState::Ongoing { phase } = self.state else {
            return Err(GameError::GameNotInProgress);
        };
        if self.outcome.is_some() {
            return Err(GameError::GameOver);
        }
        if !self.players[player].is_playing() {
            return Err(GameError::NotInGame);
        }
        Ok(phase)
    }

    /// Returns `Ok` if the given player index is valid, and an `Err` otherwise.
    fn check_player_index(&self, player: usize) -> Result<(), GameError> {
        if player < self.players.len() {
            Ok(())
        } else {
            Err(GameError::InvalidPlayerIndex)
        }
    }

    fn active_seats(&self) -> Vec<usize> {
        (0..self.players.len()).filter(|&i| self.players[i].is_playing()).collect()
    }

    /// Finds the next active player in seating order, wrapping around the table.
    /// Returns `player` itself if nobody else is playing.
    pub fn next_player(&self, player: usize) -> usize {
        (player + 1..self.players.len())
            .chain(0..player)
            .find(|idx| self.players.get(*idx).is_some_and(Player::is_playing))
            .unwrap_or(player)
    }

    /// The player expected to act: the next claimant, or the flashlight holder.
    pub fn current_player(&self) -> Option<usize> {
        let seats = self.active_seats();
        match self.phase()? {
            Phase::Claims => seats.into_iter().find(|&i| self.players[i].can_claim()),
            Phase::Investigation => seats.into_iter().find(|&i| self.players[i].has_flashlight()),
        }
    }

    /// Finds a player by the name shown at the table: their nickname, or their id if they have none.
    pub fn find_player_by_name(&self, name: &str) -> Result<usize, GameError> {
        self.players
            .iter()
            .position(|p| p.display_name() == name)
            .ok_or(GameError::NotInGame)
    }

    /// Finds a player with the given id.
    pub fn find_player(&self, id: &str) -> Result<usize, GameError> {
        self.players
            .iter()
            .position(|p| p.id() == id)
            .ok_or(GameError::NotInGame)
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn player(&self, seat: usize) -> Option<&Player> {
        self.players.get(seat)
    }

    /// The participants, in seating order.
    pub fn active_players(&self) -> impl Iterator<Item = &'_ Player> {
        self.players.iter().filter(|p| p.is_playing())
    }

    pub fn spectators(&self) -> impl Iterator<Item = &'_ Player> {
        self.players
            .iter()
            .filter(|p| p.status() == Participation::Spectating)
    }

    pub fn count_active_players(&self) -> usize {
        self.active_players().count()
    }

    pub fn status(&self) -> GameStatus {
        match self.state {
            GameState::Unstarted => GameStatus::Unstarted,
            GameState::Ongoing { .. } => GameStatus::Ongoing,
            GameState::Ended => GameStatus::Ended,
        }
    }

    /// The current phase, if the game is in progress.
    pub fn phase(&self) -> Option<Phase> {
        match self.state {
            GameState::Ongoing { phase } => Some(phase),
            _ => None,
        }
    }

    pub fn round(&self) -> usize {
        self.round
    }

    pub fn turn(&self) -> usize {
        self.turn
    }

    pub fn outcome(&self) -> Option<WinCondition> {
        self.outcome
    }

    pub fn winner(&self) -> Option<Role> {
        self.outcome.map(WinCondition::winner)
    }

    /// Returns true once a team has won.
    pub fn game_over(&self) -> bool {
        self.outcome.is_some()
    }

    pub fn deck_len(&self) -> usize {
        self.deck.count()
    }

    pub fn discard_len(&self) -> usize {
        self.deck.discard_count()
    }

    /// Every card the game owns: the draw deck, the discard pile and the participants' hands.
    pub fn cards(&self) -> impl Iterator<Item = &'_ Card> {
        self.deck
            .cards()
            .chain(self.active_players().flat_map(|p| p.hand().iter()))
    }

    pub fn options(&self) -> &GameOptions {
        &self.opts
    }

    pub fn catalog(&self) -> &dyn CardCatalog {
        self.catalog.as_ref()
    }
}
