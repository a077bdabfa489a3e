use thiserror::Error;

/// The result of attempting to perform an invalid operation on a [Game](crate::game::Game).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("the game has already started")]
    AlreadyStarted,
    #[error("this player has already joined the game")]
    AlreadyJoined,
    #[error("this player is not in the game")]
    NotInGame,
    #[error("it is not this player's turn")]
    NotYourTurn,
    #[error("must hold the flashlight to investigate")]
    NoFlashlight,
    #[error("all cards are already face-up")]
    AllRevealed,
    #[error("invalid game state: {0}")]
    InvalidState(&'static str),
    #[error("invalid configuration: {0}")]
    Configuration(String),
    #[error("no card information for {0:?}")]
    Lookup(String),
    #[error("the game is not in progress")]
    GameNotInProgress,
    #[error("the game has already been won")]
    GameOver,
    #[error("a claim cannot cover more cards than are in hand")]
    InvalidClaim,
    #[error("this player cannot be chosen for this action")]
    InvalidPlayerChoice,
    #[error("invalid player index")]
    InvalidPlayerIndex,
}
