//! Guess feedback and its classification into pruning rules.

use crate::error::ValidationError;
use crate::word::{Letter, WORD_LENGTH, Word};
use std::collections::{BTreeMap, BTreeSet};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum PositionStatus {
    /// Not entered yet. Never part of a finalized guess.
    #[default]
    Unknown,
    Wrong,
    Misplaced,
    Correct,
}

impl PositionStatus {
    /// Parses a status code: `w`, `m` or `c`, in either case.
    pub fn from_code(c: char) -> Option<Self> {
        match c.to_ascii_lowercase() {
            'w' => Some(Self::Wrong),
            'm' => Some(Self::Misplaced),
            'c' => Some(Self::Correct),
            _ => None,
        }
    }

    #[must_use]
    pub fn code(self) -> char {
        match self {
            Self::Unknown => '?',
            Self::Wrong => 'w',
            Self::Misplaced => 'm',
            Self::Correct => 'c',
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GuessPosition {
    pub letter: Letter,
    pub status: PositionStatus,
}

/// A finalized guess. Every position carries a resolved status.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Guess {
    positions: [GuessPosition; WORD_LENGTH],
}

impl Guess {
    pub fn new(positions: [GuessPosition; WORD_LENGTH]) -> Result<Self, ValidationError> {
        if let Some(index) = positions
            .iter()
            .position(|p| p.status == PositionStatus::Unknown)
        {
            return Err(ValidationError::UnresolvedPosition {
                position: index + 1,
            });
        }
        Ok(Self { positions })
    }

    /// Pairs each letter of `word` with the matching status.
    pub fn from_word(
        word: &Word,
        statuses: [PositionStatus; WORD_LENGTH],
    ) -> Result<Self, ValidationError> {
        let mut positions = [GuessPosition {
            letter: word.letter_at(0),
            status: PositionStatus::Unknown,
        }; WORD_LENGTH];
        for (i, (&letter, status)) in word.letters().iter().zip(statuses).enumerate() {
            positions[i] = GuessPosition { letter, status };
        }
        Self::new(positions)
    }

    /// Validates raw `(letter, status code)` pairs.
    pub fn parse(raw: &[(char, char)]) -> Result<Self, ValidationError> {
        if raw.len() != WORD_LENGTH {
            return Err(ValidationError::WrongLength {
                expected: WORD_LENGTH,
                actual: raw.len(),
            });
        }

        let word: String = raw.iter().map(|&(letter, _)| letter).collect();
        let word = Word::parse(&word)?;

        let mut statuses = [PositionStatus::Unknown; WORD_LENGTH];
        for (i, &(_, code)) in raw.iter().enumerate() {
            statuses[i] = PositionStatus::from_code(code).ok_or(ValidationError::UnknownStatus {
                position: i + 1,
                code,
            })?;
        }

        Self::from_word(&word, statuses)
    }

    pub fn positions(&self) -> &[GuessPosition; WORD_LENGTH] {
        &self.positions
    }

    pub fn word(&self) -> Word {
        Word::new(self.positions.map(|p| p.letter))
    }
}

/// The three rule inputs derived from one guess.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Classification {
    pub wrong_letters: BTreeSet<Letter>,
    pub misplaced_letters: BTreeSet<Letter>,
    pub correct_positions: BTreeMap<Letter, BTreeSet<usize>>,
}

/// Partitions a guess by status.
///
/// A letter misplaced anywhere in the guess can still appear at other
/// positions, so it is dropped from both `wrong_letters` and
/// `correct_positions`.
pub fn classify(guess: &Guess) -> Classification {
    let mut classification = Classification::default();

    for (position, p) in guess.positions().iter().enumerate() {
        match p.status {
            PositionStatus::Wrong => {
                classification.wrong_letters.insert(p.letter);
            }
            PositionStatus::Misplaced => {
                classification.misplaced_letters.insert(p.letter);
            }
            PositionStatus::Correct => {
                classification
                    .correct_positions
                    .entry(p.letter)
                    .or_default()
                    .insert(position);
            }
            PositionStatus::Unknown => {}
        }
    }

    for letter in &classification.misplaced_letters {
        classification.wrong_letters.remove(letter);
        classification.correct_positions.remove(letter);
    }

    classification
}
