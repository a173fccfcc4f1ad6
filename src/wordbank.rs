use crate::word::{Letter, WORD_LENGTH, Word};
use crate::{debug_log, info_log};
use std::collections::BTreeSet;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::{Path, PathBuf};

pub const DEFAULT_WORDS_PATH: &str = "/usr/share/dict/words";
pub const EXCLUSIONS_FILE_NAME: &str = "answers.txt";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CandidateRecord {
    pub word: Word,
    pub live: bool,
}

/// The candidate dictionary.
///
/// Records keep their load order for the life of the store. Every scrub only
/// ever clears `live` flags, so the live set shrinks monotonically. Each scrub
/// returns how many records it newly ruled out.
#[derive(Clone, Debug, Default)]
pub struct WordStore {
    records: Vec<CandidateRecord>,
}

impl WordStore {
    /// Builds a store from raw dictionary lines. Entries that are not exactly
    /// [`crate::word::WORD_LENGTH`] Latin letters are skipped.
    pub fn load<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut skipped = 0usize;
        let records: Vec<CandidateRecord> = words
            .into_iter()
            .filter_map(|raw| match Word::parse(raw.as_ref().trim()) {
                Ok(word) => Some(CandidateRecord { word, live: true }),
                Err(_) => {
                    skipped += 1;
                    None
                }
            })
            .collect();
        debug_log!("Loaded {} candidates, skipped {skipped} entries", records.len());
        Self { records }
    }

    /// Loads the dictionary and then scrubs every previously used answer.
    pub fn initialize<W, WS, X, XS>(raw_words: W, raw_exclusions: X) -> Self
    where
        W: IntoIterator<Item = WS>,
        WS: AsRef<str>,
        X: IntoIterator<Item = XS>,
        XS: AsRef<str>,
    {
        let mut store = Self::load(raw_words);
        let mut excluded = 0usize;
        for raw in raw_exclusions {
            // A malformed exclusion line can't match any record.
            if let Ok(word) = Word::parse(raw.as_ref().trim()) {
                excluded += store.exclude_exact(&word);
            }
        }
        info_log!(
            "Word store ready: {} live of {} loaded ({excluded} excluded)",
            store.live_count(),
            store.len()
        );
        store
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn live_count(&self) -> usize {
        self.records.iter().filter(|r| r.live).count()
    }

    pub fn records(&self) -> &[CandidateRecord] {
        &self.records
    }

    /// Marks not live every live record for which `reject` holds.
    fn scrub<F>(&mut self, mut reject: F) -> usize
    where
        F: FnMut(&Word) -> bool,
    {
        let mut scrubbed = 0;
        for record in self.records.iter_mut().filter(|r| r.live) {
            if reject(&record.word) {
                record.live = false;
                scrubbed += 1;
            }
        }
        scrubbed
    }

    pub fn exclude_exact(&mut self, word: &Word) -> usize {
        self.scrub(|candidate| candidate == word)
    }

    /// Rules out candidates with `letter` at `position`. A position past the
    /// end of the word matches nothing.
    pub fn exclude_position_if(&mut self, position: usize, letter: Letter) -> usize {
        if position >= WORD_LENGTH {
            return 0;
        }
        self.scrub(|candidate| candidate.get(position) == Some(letter))
    }

    /// Rules out candidates without `letter` at `position`. A position past the
    /// end of the word scrubs nothing.
    pub fn retain_only_position_if(&mut self, position: usize, letter: Letter) -> usize {
        if position >= WORD_LENGTH {
            return 0;
        }
        self.scrub(|candidate| candidate.get(position) != Some(letter))
    }

    pub fn retain_only_containing(&mut self, letter: Letter) -> usize {
        self.scrub(|candidate| !candidate.contains(letter))
    }

    /// Every occurrence of `letter` must sit at one of `allowed`.
    ///
    /// With a non-empty `allowed` the letter must also be present. An empty
    /// `allowed` means the letter may not appear at all.
    pub fn retain_only_letter_at_allowed_positions(
        &mut self,
        letter: Letter,
        allowed: &BTreeSet<usize>,
    ) -> usize {
        self.scrub(|candidate| {
            let mut present = false;
            for (position, &l) in candidate.letters().iter().enumerate() {
                if l == letter {
                    if !allowed.contains(&position) {
                        return true;
                    }
                    present = true;
                }
            }
            !present && !allowed.is_empty()
        })
    }

    /// Live words in load order. Each call starts a fresh pass.
    pub fn live_words(&self) -> impl Iterator<Item = &Word> + '_ {
        self.records.iter().filter(|r| r.live).map(|r| &r.word)
    }

    pub fn is_live(&self, word: &Word) -> bool {
        self.live_words().any(|candidate| candidate == word)
    }

    /// Whether `word` was loaded at all, live or not.
    pub fn contains(&self, word: &Word) -> bool {
        self.records.iter().any(|r| r.word == *word)
    }
}

/// Whether `raw` names a word that is still a live candidate. Malformed input
/// is never live.
pub fn check_candidate(store: &WordStore, raw: &str) -> bool {
    Word::parse(raw.trim()).is_ok_and(|word| store.is_live(&word))
}

/// The first `n` live words in load order, as display strings.
pub fn top_candidates(store: &WordStore, n: usize) -> Vec<String> {
    store.live_words().take(n).map(ToString::to_string).collect()
}

/// Raw, untrimmed lines of an embedded or in-memory word list.
pub fn load_words_from_str(data: &str) -> Vec<String> {
    data.lines().map(str::to_owned).collect()
}

/// Raw lines of a word list file. Lines that are not valid UTF-8 are kept
/// lossily converted, so [`WordStore::load`] drops them instead of the whole
/// file failing.
pub fn load_words_from_file<P: AsRef<Path>>(path: P) -> io::Result<Vec<String>> {
    let file = File::open(path)?;
    let reader = BufReader::new(file);
    reader
        .split(b'\n')
        .map(|line| -> io::Result<String> {
            let line = line?;
            let line = line.strip_suffix(b"\r").unwrap_or(&line);
            Ok(String::from_utf8_lossy(line).into_owned())
        })
        .collect()
}

/// Where the exclusion list is looked for when none is given: the working
/// directory first, then the platform data directory.
pub fn default_exclusions_path() -> Option<PathBuf> {
    let local = PathBuf::from(EXCLUSIONS_FILE_NAME);
    if local.is_file() {
        return Some(local);
    }
    let data = dirs::data_dir()?
        .join("wordle-helper")
        .join(EXCLUSIONS_FILE_NAME);
    data.is_file().then_some(data)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn word(s: &str) -> Word {
        Word::parse(s).unwrap()
    }

    fn letter(c: char) -> Letter {
        Letter::from_char(c).unwrap()
    }

    fn live(store: &WordStore) -> Vec<String> {
        store.live_words().map(ToString::to_string).collect()
    }

    #[test]
    fn test_load_filters_and_normalizes() {
        let store = WordStore::load(["crane", "  Slate ", "cranes", "abc", "ann's", "CR4NE", ""]);
        assert_eq!(store.len(), 2);
        assert_eq!(live(&store), vec!["CRANE", "SLATE"]);
    }

    #[test]
    fn test_load_keeps_order_and_duplicates() {
        let store = WordStore::load(["TRACE", "crane", "CRANE", "ALOFT"]);
        assert_eq!(live(&store), vec!["TRACE", "CRANE", "CRANE", "ALOFT"]);
    }

    #[test]
    fn test_initialize_scrubs_exclusions() {
        let store = WordStore::initialize(["APPLE", "BERRY"], ["apple"]);
        assert_eq!(live(&store), vec!["BERRY"]);
        assert_eq!(store.len(), 2);
        assert!(store.contains(&word("APPLE")));
    }

    #[test]
    fn test_initialize_ignores_malformed_exclusions() {
        let store = WordStore::initialize(["APPLE", "BERRY"], ["", "PEAR", "12345"]);
        assert_eq!(store.live_count(), 2);
    }

    #[test]
    fn test_exclude_exact_removes_all_duplicates() {
        let mut store = WordStore::load(["CRANE", "SLATE", "CRANE"]);
        assert_eq!(store.exclude_exact(&word("CRANE")), 2);
        assert_eq!(live(&store), vec!["SLATE"]);
    }

    #[test]
    fn test_exclude_exact_leaves_others_untouched() {
        let mut store = WordStore::load(["CRANE", "CRATE", "BRAVE"]);
        store.exclude_exact(&word("CRANE"));
        assert!(!store.is_live(&word("CRANE")));
        assert!(store.is_live(&word("CRATE")));
        assert!(store.is_live(&word("BRAVE")));
    }

    #[test]
    fn test_exclude_exact_is_idempotent() {
        let mut store = WordStore::load(["CRANE", "SLATE"]);
        assert_eq!(store.exclude_exact(&word("CRANE")), 1);
        assert_eq!(store.exclude_exact(&word("CRANE")), 0);
        assert_eq!(store.exclude_exact(&word("ZEBRA")), 0);
        assert_eq!(live(&store), vec!["SLATE"]);
    }

    #[test]
    fn test_exclude_position_if() {
        let mut store = WordStore::load(["CRANE", "SLATE", "TRACE"]);
        assert_eq!(store.exclude_position_if(1, letter('R')), 2);
        assert_eq!(live(&store), vec!["SLATE"]);
    }

    #[test]
    fn test_retain_only_position_if() {
        let mut store = WordStore::load(["CRANE", "CRATE", "BRAVE"]);
        assert_eq!(store.retain_only_position_if(2, letter('A')), 0);
        assert_eq!(store.live_count(), 3);
        assert_eq!(store.retain_only_position_if(0, letter('C')), 1);
        assert_eq!(live(&store), vec!["CRANE", "CRATE"]);
    }

    #[test]
    fn test_position_scrubs_past_the_word_are_no_ops() {
        let mut store = WordStore::load(["CRANE", "SLATE"]);
        assert_eq!(store.exclude_position_if(WORD_LENGTH, letter('C')), 0);
        assert_eq!(store.retain_only_position_if(7, letter('C')), 0);
        assert_eq!(live(&store), vec!["CRANE", "SLATE"]);
    }

    #[test]
    fn test_retain_only_containing() {
        let mut store = WordStore::load(["CRANE", "SLATE", "MOUNT"]);
        store.retain_only_containing(letter('N'));
        assert_eq!(live(&store), vec!["CRANE", "MOUNT"]);
    }

    #[test]
    fn test_allowed_positions_empty_set_excludes_letter() {
        let mut store = WordStore::load(["CRANE", "SLATE", "MOUNT"]);
        store.retain_only_letter_at_allowed_positions(letter('E'), &BTreeSet::new());
        assert_eq!(live(&store), vec!["MOUNT"]);
    }

    #[test]
    fn test_allowed_positions_pins_every_occurrence() {
        let mut store = WordStore::load(["SPEED", "SPELT", "STEEP", "MOUNT", "ESTER"]);
        let allowed = BTreeSet::from([2]);
        store.retain_only_letter_at_allowed_positions(letter('E'), &allowed);
        // SPEED/STEEP have a second E, MOUNT has none, ESTER has E at 0
        assert_eq!(live(&store), vec!["SPELT"]);
    }

    #[test]
    fn test_allowed_positions_multiple_slots() {
        let mut store = WordStore::load(["SPEED", "STEEP", "SPELT"]);
        let allowed = BTreeSet::from([2, 3]);
        store.retain_only_letter_at_allowed_positions(letter('E'), &allowed);
        assert_eq!(live(&store), vec!["SPEED", "STEEP", "SPELT"]);
    }

    #[test]
    fn test_scrubs_skip_dead_records() {
        let mut store = WordStore::load(["CRANE", "SLATE"]);
        store.exclude_exact(&word("CRANE"));
        // CRANE is already dead, so only SLATE is counted
        assert_eq!(store.retain_only_containing(letter('Z')), 1);
        assert_eq!(store.live_count(), 0);
    }

    #[test]
    fn test_live_words_is_restartable() {
        let store = WordStore::load(["CRANE", "SLATE"]);
        assert_eq!(store.live_words().count(), 2);
        assert_eq!(store.live_words().count(), 2);
    }

    #[test]
    fn test_check_candidate() {
        let mut store = WordStore::load(["CRANE", "SLATE"]);
        store.exclude_exact(&word("SLATE"));
        assert!(check_candidate(&store, "crane"));
        assert!(!check_candidate(&store, "SLATE"));
        assert!(!check_candidate(&store, "MOUNT"));
        assert!(!check_candidate(&store, "CRAN3"));
        assert!(!check_candidate(&store, ""));
    }

    #[test]
    fn test_top_candidates_in_load_order() {
        let mut store = WordStore::load(["TRACE", "CRANE", "SLATE", "ALOFT"]);
        store.exclude_exact(&word("CRANE"));
        assert_eq!(top_candidates(&store, 2), vec!["TRACE", "SLATE"]);
        assert_eq!(top_candidates(&store, 10).len(), 3);
        assert!(top_candidates(&store, 0).is_empty());
    }

    #[test]
    fn test_load_words_from_str_keeps_raw_lines() {
        let lines = load_words_from_str("crane\nSlate\n\nabc");
        assert_eq!(lines, vec!["crane", "Slate", "", "abc"]);
    }

    #[test]
    fn test_load_words_from_file_skips_bad_bytes() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        std::io::Write::write_all(&mut file, b"apple\r\n\xff\xfeabc\ngrape\n").unwrap();

        let lines = load_words_from_file(file.path()).unwrap();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], "apple");
        assert_eq!(live(&WordStore::load(&lines)), vec!["APPLE", "GRAPE"]);
    }

    #[test]
    fn test_load_words_from_file_missing() {
        assert!(load_words_from_file("/nonexistent/wordle-helper/words").is_err());
    }
}
