// Library interface for wordle-helper
// The binary and the integration tests both build on these modules

pub mod cli;
pub mod error;
pub mod feedback;
pub mod game_state;
pub mod logging;
pub mod solver;
pub mod word;
pub mod wordbank;

// Re-export commonly used items for easier testing
pub use error::{SessionError, ValidationError};
pub use feedback::{Classification, Guess, GuessPosition, PositionStatus, classify};
pub use game_state::{MAX_ROUNDS, Session, game_loop};
pub use solver::{apply_guess, finalize_guess, record_position_feedback};
pub use word::{Letter, WORD_LENGTH, Word};
pub use wordbank::{
    WordStore, check_candidate, load_words_from_file, load_words_from_str, top_candidates,
};

/// Builds a store from a raw dictionary and a raw list of used answers.
pub fn initialize<W, WS, X, XS>(raw_words: W, raw_exclusions: X) -> WordStore
where
    W: IntoIterator<Item = WS>,
    WS: AsRef<str>,
    X: IntoIterator<Item = XS>,
    XS: AsRef<str>,
{
    WordStore::initialize(raw_words, raw_exclusions)
}
