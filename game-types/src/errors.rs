use thiserror::Error;

/// Client-visible error taxonomy. The HTTP layer maps each kind to a
/// status code: not-found 404, validation 400, forbidden 403.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Unknown game or player token.
    NotFound,
    /// Malformed or semantically invalid payload.
    Validation,
    /// Structurally valid request that current game state disallows.
    Forbidden,
}

/// Every way a game operation can fail. Display strings double as the
/// `{"error": ...}` message on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GameError {
    #[error("invalid game_token")]
    GameNotFound,
    #[error("invalid player_token")]
    PlayerNotFound,
    #[error("invalid player_name")]
    InvalidPlayerName,
    #[error("name already taken")]
    NameTaken,
    #[error("cannot join after game start")]
    JoinClosed,
    #[error("wrong game phase")]
    WrongPhase,
    #[error("already ready")]
    AlreadyReady,
    #[error("no word submitted")]
    EmptyWord,
    #[error("too many letters")]
    WordTooLong,
    #[error("invalid letter")]
    LetterNotInHand,
    #[error("bad number of guesses")]
    WrongGuessCount,
    #[error("attempting to guess own word")]
    SelfGuess,
    #[error("guess names an unknown player")]
    UnknownGuessTarget,
    #[error("invalid card")]
    InvalidCard,
    #[error("cannot guess own card")]
    OwnCardGuess,
    #[error("duplicate card use")]
    DuplicateCard,
    #[error("guesses already submitted")]
    GuessesAlreadySubmitted,
    #[error("not your turn")]
    NotYourTurn,
}

impl GameError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            GameError::GameNotFound | GameError::PlayerNotFound => ErrorKind::NotFound,
            GameError::InvalidPlayerName
            | GameError::NameTaken
            | GameError::EmptyWord
            | GameError::WordTooLong
            | GameError::LetterNotInHand
            | GameError::WrongGuessCount
            | GameError::UnknownGuessTarget
            | GameError::InvalidCard
            | GameError::OwnCardGuess
            | GameError::DuplicateCard => ErrorKind::Validation,
            GameError::JoinClosed
            | GameError::WrongPhase
            | GameError::AlreadyReady
            | GameError::SelfGuess
            | GameError::GuessesAlreadySubmitted
            | GameError::NotYourTurn => ErrorKind::Forbidden,
        }
    }
}
