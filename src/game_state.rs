use crate::error::{SessionError, ValidationError};
use crate::feedback::{Guess, PositionStatus};
use crate::solver::{apply_guess, record_position_feedback};
use crate::word::{Letter, WORD_LENGTH, Word};
use crate::wordbank::{WordStore, check_candidate};
use crate::{debug_log, info_log};

pub const MAX_ROUNDS: usize = 5;
pub const DEFAULT_TOP_CANDIDATES: usize = 10;

/// One solving session: the store it prunes and the guesses applied so far.
#[derive(Debug)]
pub struct Session {
    store: WordStore,
    history: Vec<Guess>,
    max_rounds: usize,
}

impl Session {
    pub fn new(store: WordStore) -> Self {
        Self::with_max_rounds(store, MAX_ROUNDS)
    }

    pub fn with_max_rounds(store: WordStore, max_rounds: usize) -> Self {
        Self {
            store,
            history: Vec::with_capacity(max_rounds),
            max_rounds,
        }
    }

    pub fn store(&self) -> &WordStore {
        &self.store
    }

    pub fn history(&self) -> &[Guess] {
        &self.history
    }

    /// Number of guesses accepted so far.
    pub fn round(&self) -> usize {
        self.history.len()
    }

    pub fn max_rounds(&self) -> usize {
        self.max_rounds
    }

    pub fn rounds_remaining(&self) -> usize {
        self.max_rounds.saturating_sub(self.history.len())
    }

    pub fn is_finished(&self) -> bool {
        self.rounds_remaining() == 0
    }

    fn ensure_round_available(&self) -> Result<(), SessionError> {
        if self.is_finished() {
            return Err(SessionError::RoundLimit {
                max_rounds: self.max_rounds,
            });
        }
        Ok(())
    }

    /// Scrubs for one position while the rest of the guess is still being
    /// entered. `position` is zero-based.
    pub fn record_position_feedback(
        &mut self,
        position: usize,
        letter: Letter,
        status: PositionStatus,
    ) -> Result<usize, SessionError> {
        if position >= WORD_LENGTH {
            return Err(ValidationError::PositionOutOfRange { position }.into());
        }
        self.ensure_round_available()?;
        Ok(record_position_feedback(&mut self.store, position, letter, status))
    }

    /// Applies both pruning phases for `guess` and appends it to the history.
    ///
    /// Positions already fed through [`Session::record_position_feedback`]
    /// are scrubbed again, which changes nothing.
    pub fn submit(&mut self, guess: Guess) -> Result<(), SessionError> {
        self.ensure_round_available()?;
        apply_guess(&mut self.store, &guess);
        self.history.push(guess);
        info_log!(
            "Guess {} accepted, {} candidates live",
            self.history.len(),
            self.store.live_count()
        );
        Ok(())
    }

    /// Validates raw `(letter, status code)` pairs and applies both pruning
    /// phases. On error nothing is scrubbed and the history is unchanged.
    pub fn submit_guess(&mut self, raw_positions: &[(char, char)]) -> Result<&Guess, SessionError> {
        let guess = Guess::parse(raw_positions)?;
        self.submit(guess)?;
        Ok(&self.history[self.history.len() - 1])
    }

    /// First `n` live words in load order. No ranking is implied.
    pub fn top_candidates(&self, n: usize) -> Vec<&Word> {
        self.store.live_words().take(n).collect()
    }

    pub fn check_candidate(&self, raw: &str) -> bool {
        check_candidate(&self.store, raw)
    }
}

// Front-end seam: the command loop only talks to the player through this.

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserAction {
    Help,
    Board,
    Check,
    Possibilities,
    Guess,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WordInput {
    Word(Word),
    Help,
    Quit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusInput {
    Status(PositionStatus),
    Help,
    Abort,
    Quit,
}

/// Input and output for [`game_loop`].
///
/// The `read_*` methods return `None` for input they could not understand,
/// after telling the player; the loop then asks again.
pub trait GameInterface {
    fn read_command(&mut self) -> Option<UserAction>;
    fn read_word(&mut self, prompt: &str) -> Option<WordInput>;
    fn read_status(&mut self, position: usize, letter: Letter) -> Option<StatusInput>;

    fn display_help(&mut self);
    fn display_board(&mut self, history: &[Guess]);
    /// `known` is whether the word was loaded at all; `live` whether it is
    /// still a candidate.
    fn display_check_result(&mut self, word: &Word, known: bool, live: bool);
    fn display_candidates(&mut self, candidates: &[&Word]);
    fn display_live_count(&mut self, live: usize, rounds_remaining: usize);
    fn display_aborted(&mut self);
    fn display_error(&mut self, error: &SessionError);
    fn display_exit_message(&mut self);
}

#[derive(Debug)]
enum RoundOutcome {
    Accepted,
    Aborted,
    Rejected(SessionError),
    Quit,
}

/// Drives `session` until the player quits or input runs out.
pub fn game_loop<I: GameInterface>(session: &mut Session, interface: &mut I, top: usize) {
    interface.display_help();

    loop {
        let Some(action) = interface.read_command() else {
            continue;
        };
        debug_log!("command: {action:?}");

        match action {
            UserAction::Help => interface.display_help(),
            UserAction::Board => interface.display_board(session.history()),
            UserAction::Check => {
                let Some(word) = prompt_word(interface, "possibility") else {
                    break;
                };
                let store = session.store();
                interface.display_check_result(
                    &word,
                    store.contains(&word),
                    store.is_live(&word),
                );
            }
            UserAction::Possibilities => {
                interface.display_candidates(&session.top_candidates(top));
            }
            UserAction::Guess => match play_round(session, interface) {
                RoundOutcome::Accepted => {
                    interface
                        .display_live_count(session.store().live_count(), session.rounds_remaining());
                }
                RoundOutcome::Aborted => interface.display_aborted(),
                RoundOutcome::Rejected(err) => interface.display_error(&err),
                RoundOutcome::Quit => break,
            },
            UserAction::Quit => break,
        }
    }

    interface.display_exit_message();
}

/// Asks until a well-formed word arrives. `None` means the player quit.
fn prompt_word<I: GameInterface>(interface: &mut I, prompt: &str) -> Option<Word> {
    loop {
        match interface.read_word(prompt) {
            Some(WordInput::Word(word)) => return Some(word),
            Some(WordInput::Help) => interface.display_help(),
            Some(WordInput::Quit) => return None,
            None => {}
        }
    }
}

fn play_round<I: GameInterface>(session: &mut Session, interface: &mut I) -> RoundOutcome {
    if session.is_finished() {
        return RoundOutcome::Rejected(SessionError::RoundLimit {
            max_rounds: session.max_rounds(),
        });
    }

    let Some(word) = prompt_word(interface, &(session.round() + 1).to_string()) else {
        return RoundOutcome::Quit;
    };

    let mut statuses = [PositionStatus::Unknown; WORD_LENGTH];
    for (position, &letter) in word.letters().iter().enumerate() {
        let status = loop {
            match interface.read_status(position, letter) {
                Some(StatusInput::Status(status)) => break status,
                Some(StatusInput::Help) => interface.display_help(),
                Some(StatusInput::Abort) => return RoundOutcome::Aborted,
                Some(StatusInput::Quit) => return RoundOutcome::Quit,
                None => {}
            }
        };
        if let Err(err) = session.record_position_feedback(position, letter, status) {
            return RoundOutcome::Rejected(err);
        }
        statuses[position] = status;
    }

    let submitted = Guess::from_word(&word, statuses)
        .map_err(SessionError::from)
        .and_then(|guess| session.submit(guess));
    match submitted {
        Ok(()) => RoundOutcome::Accepted,
        Err(err) => RoundOutcome::Rejected(err),
    }
}
