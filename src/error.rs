use thiserror::Error;

/// Raw input that cannot become a word or guess. Nothing has been scrubbed
/// when one of these is returned.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("expected {expected} letters, got {actual}")]
    WrongLength { expected: usize, actual: usize },

    #[error("invalid character for position {position}: {character}")]
    InvalidCharacter { position: usize, character: char },

    #[error("unknown status for position {position}: {code}")]
    UnknownStatus { position: usize, code: char },

    #[error("no status entered for position {position}")]
    UnresolvedPosition { position: usize },

    /// `position` is the zero-based index the caller passed.
    #[error("position {position} is outside the word")]
    PositionOutOfRange { position: usize },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    #[error("invalid guess: {0}")]
    Invalid(#[from] ValidationError),

    #[error("all {max_rounds} guesses have already been used")]
    RoundLimit { max_rounds: usize },
}
