use crate::feedback::{Guess, PositionStatus, classify};
use crate::word::Letter;
use crate::wordbank::WordStore;
use crate::debug_log;
use std::collections::BTreeSet;

/// Scrubs the store for a single position as soon as its status is known.
///
/// Safe to call again for the same position; the scrubs are idempotent.
pub fn record_position_feedback(
    store: &mut WordStore,
    position: usize,
    letter: Letter,
    status: PositionStatus,
) -> usize {
    let scrubbed = match status {
        PositionStatus::Wrong => store.exclude_position_if(position, letter),
        PositionStatus::Misplaced => {
            store.exclude_position_if(position, letter) + store.retain_only_containing(letter)
        }
        PositionStatus::Correct => store.retain_only_position_if(position, letter),
        PositionStatus::Unknown => 0,
    };
    debug_log!(
        "position {} {letter} {status:?}: scrubbed {scrubbed}, {} live",
        position + 1,
        store.live_count()
    );
    scrubbed
}

/// Applies the whole-guess rules once every position has a status.
///
/// Letters marked wrong somewhere and misplaced nowhere are complete: they may
/// only appear at the positions this guess marked correct, and not at all if
/// there are none. Only this guess's correct positions are considered.
pub fn finalize_guess(store: &mut WordStore, guess: &Guess) -> usize {
    let classification = classify(guess);
    let mut scrubbed = 0;

    for &letter in &classification.misplaced_letters {
        scrubbed += store.retain_only_containing(letter);
    }

    let none = BTreeSet::new();
    for &letter in &classification.wrong_letters {
        let allowed = classification
            .correct_positions
            .get(&letter)
            .unwrap_or(&none);
        scrubbed += store.retain_only_letter_at_allowed_positions(letter, allowed);
    }

    debug_log!(
        "finalized {}: scrubbed {scrubbed}, {} live",
        guess.word(),
        store.live_count()
    );
    scrubbed
}

/// Runs both phases for a complete guess.
pub fn apply_guess(store: &mut WordStore, guess: &Guess) -> usize {
    let per_position: usize = guess
        .positions()
        .iter()
        .enumerate()
        .map(|(position, p)| record_position_feedback(store, position, p.letter, p.status))
        .sum();
    per_position + finalize_guess(store, guess)
}
