use crate::error::ValidationError;
use std::fmt;

/// Number of letters in every candidate and guess.
pub const WORD_LENGTH: usize = 5;

/// One of the 26 Latin letters, always stored uppercase.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Letter(u8);

impl Letter {
    /// Normalizes `c` to uppercase, rejecting anything outside A-Z / a-z.
    pub fn from_char(c: char) -> Option<Self> {
        if c.is_ascii_alphabetic() {
            Some(Self(c.to_ascii_uppercase() as u8))
        } else {
            None
        }
    }

    #[must_use]
    pub fn as_char(self) -> char {
        self.0 as char
    }
}

impl fmt::Display for Letter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

/// A fixed-width sequence of letters.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Word([Letter; WORD_LENGTH]);

impl Word {
    pub fn new(letters: [Letter; WORD_LENGTH]) -> Self {
        Self(letters)
    }

    /// Parses a raw string into a word.
    ///
    /// Length is counted in characters, so multi-byte input of the right
    /// width is reported as an invalid character rather than a bad length.
    pub fn parse(raw: &str) -> Result<Self, ValidationError> {
        let actual = raw.chars().count();
        if actual != WORD_LENGTH {
            return Err(ValidationError::WrongLength {
                expected: WORD_LENGTH,
                actual,
            });
        }

        let mut letters = [Letter(b'A'); WORD_LENGTH];
        for (position, c) in raw.chars().enumerate() {
            letters[position] = Letter::from_char(c).ok_or(ValidationError::InvalidCharacter {
                position: position + 1,
                character: c,
            })?;
        }
        Ok(Self(letters))
    }

    #[must_use]
    pub fn letters(&self) -> &[Letter; WORD_LENGTH] {
        &self.0
    }

    /// Panics if `position` is not below [`WORD_LENGTH`]; see [`Word::get`].
    #[must_use]
    pub fn letter_at(&self, position: usize) -> Letter {
        self.0[position]
    }

    #[must_use]
    pub fn get(&self, position: usize) -> Option<Letter> {
        self.0.get(position).copied()
    }

    #[must_use]
    pub fn contains(&self, letter: Letter) -> bool {
        self.0.contains(&letter)
    }
}

impl fmt::Display for Word {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for letter in &self.0 {
            write!(f, "{letter}")?;
        }
        Ok(())
    }
}
