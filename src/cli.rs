use crate::error::SessionError;
use crate::feedback::{Guess, PositionStatus};
use crate::game_state::{DEFAULT_TOP_CANDIDATES, GameInterface, StatusInput, UserAction, WordInput};
use crate::word::{Letter, Word};
use crate::wordbank::DEFAULT_WORDS_PATH;
use clap::Parser;
use crossterm::style::{Color, Stylize};
use std::io::{self, BufRead, Write};
use std::path::PathBuf;

/// Narrows a five-letter word puzzle's candidates from per-letter feedback
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Newline-delimited dictionary; entries that aren't five letters are skipped
    #[arg(short = 'w', long = "words", default_value = DEFAULT_WORDS_PATH)]
    pub words_path: PathBuf,

    /// Previously used answers to rule out, one per line
    #[arg(short = 'x', long = "exclusions")]
    pub exclusions_path: Option<PathBuf>,

    /// How many candidates the `p` command lists
    #[arg(short = 'n', long = "top", default_value_t = DEFAULT_TOP_CANDIDATES)]
    pub top: usize,

    /// Raise log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

#[must_use]
pub fn parse_cli() -> Cli {
    Cli::parse()
}

pub const HELP_TEXT: &str = "\
Commands
  h: help
  b: show board
  c: check possible guess
  p: show top possibilities
  g: make guess
  q: quit
Position Statuses
  h: help (convenience helper)
  w: wrong
  m: misplaced
  c: correct
  a: abort guess
  q: quit (convenience helper)";

pub fn parse_command(input: &str) -> Option<UserAction> {
    match input {
        "h" => Some(UserAction::Help),
        "b" => Some(UserAction::Board),
        "c" => Some(UserAction::Check),
        "p" => Some(UserAction::Possibilities),
        "g" => Some(UserAction::Guess),
        "q" => Some(UserAction::Quit),
        _ => None,
    }
}

pub fn parse_status(input: &str) -> Option<StatusInput> {
    match input {
        "h" => Some(StatusInput::Help),
        "a" => Some(StatusInput::Abort),
        "q" => Some(StatusInput::Quit),
        _ => {
            let mut chars = input.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) => PositionStatus::from_code(c).map(StatusInput::Status),
                _ => None,
            }
        }
    }
}

/// One guess as a row of colored tiles.
pub fn render_guess(guess: &Guess) -> String {
    guess
        .positions()
        .iter()
        .map(|p| {
            let background = match p.status {
                PositionStatus::Wrong => Color::DarkGrey,
                PositionStatus::Misplaced => Color::DarkYellow,
                PositionStatus::Correct => Color::DarkGreen,
                PositionStatus::Unknown => Color::Reset,
            };
            format!(" {} ", p.letter)
                .bold()
                .white()
                .on(background)
                .to_string()
        })
        .collect()
}

/// Line-oriented [`GameInterface`] over any buffered reader.
pub struct CliInterface<R: BufRead> {
    reader: R,
}

impl<R: BufRead> CliInterface<R> {
    pub fn new(reader: R) -> Self {
        Self { reader }
    }

    /// Next trimmed line, or `None` at end of input.
    fn read_line(&mut self, prompt: &str) -> Option<String> {
        print!("{prompt}");
        let _ = io::stdout().flush();

        let mut input = String::new();
        match self.reader.read_line(&mut input) {
            Ok(0) => None,
            Ok(_) => Some(input.trim().to_string()),
            Err(e) => {
                log::error!("Failed to read input: {e}");
                None
            }
        }
    }
}

impl<R: BufRead> GameInterface for CliInterface<R> {
    fn read_command(&mut self) -> Option<UserAction> {
        let Some(input) = self.read_line("\n> Enter command: ") else {
            return Some(UserAction::Quit);
        };
        println!();
        let action = parse_command(&input);
        if action.is_none() {
            println!("Unknown command: {input}");
        }
        action
    }

    fn read_word(&mut self, prompt: &str) -> Option<WordInput> {
        let Some(input) = self.read_line(&format!("> Enter guess {prompt}: ")) else {
            return Some(WordInput::Quit);
        };
        match input.as_str() {
            "q" => Some(WordInput::Quit),
            "h" => Some(WordInput::Help),
            _ => match Word::parse(&input) {
                Ok(word) => Some(WordInput::Word(word)),
                Err(e) => {
                    println!("\nInvalid guess {input}: {e}\n");
                    None
                }
            },
        }
    }

    fn read_status(&mut self, position: usize, letter: Letter) -> Option<StatusInput> {
        let prompt = format!(
            "> Enter status for position {}; character {letter}: ",
            position + 1
        );
        let Some(input) = self.read_line(&prompt) else {
            return Some(StatusInput::Quit);
        };
        let status = parse_status(&input.to_lowercase());
        if status.is_none() {
            println!("\nUnknown status: {input}\n");
        }
        status
    }

    fn display_help(&mut self) {
        println!("{HELP_TEXT}");
    }

    fn display_board(&mut self, history: &[Guess]) {
        if history.is_empty() {
            println!("No guesses logged yet");
            return;
        }
        for guess in history {
            println!("{}", render_guess(guess));
        }
    }

    fn display_check_result(&mut self, word: &Word, known: bool, live: bool) {
        if !known {
            println!("\n{word} is not in the word list");
        } else if live {
            println!("\n{word} is a valid guess");
        } else {
            println!("\n{word} is an invalid guess");
        }
    }

    fn display_candidates(&mut self, candidates: &[&Word]) {
        if candidates.is_empty() {
            println!("No candidates remain. Check your inputs.");
        }
        for word in candidates {
            println!("{word}");
        }
    }

    fn display_live_count(&mut self, live: usize, rounds_remaining: usize) {
        println!("\n{live} candidates remain, {rounds_remaining} guesses left");
    }

    fn display_aborted(&mut self) {
        println!("\nGuess aborted; statuses already entered still apply");
    }

    fn display_error(&mut self, error: &SessionError) {
        println!("{error}");
    }

    fn display_exit_message(&mut self) {
        println!("Quitting");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_cli_defaults() {
        let cli = Cli::try_parse_from(["wordle-helper"]).unwrap();
        assert_eq!(cli.words_path, PathBuf::from(DEFAULT_WORDS_PATH));
        assert_eq!(cli.exclusions_path, None);
        assert_eq!(cli.top, 10);
        assert_eq!(cli.verbose, 0);
    }

    #[test]
    fn test_cli_with_paths() {
        let cli = Cli::try_parse_from([
            "wordle-helper",
            "-w",
            "words.txt",
            "--exclusions",
            "answers.txt",
            "-n",
            "3",
            "-vv",
        ])
        .unwrap();
        assert_eq!(cli.words_path, PathBuf::from("words.txt"));
        assert_eq!(cli.exclusions_path, Some(PathBuf::from("answers.txt")));
        assert_eq!(cli.top, 3);
        assert_eq!(cli.verbose, 2);
    }

    #[test]
    fn test_parse_command() {
        assert_eq!(parse_command("g"), Some(UserAction::Guess));
        assert_eq!(parse_command("p"), Some(UserAction::Possibilities));
        assert_eq!(parse_command("b"), Some(UserAction::Board));
        assert_eq!(parse_command("guess"), None);
        assert_eq!(parse_command(""), None);
    }

    #[test]
    fn test_parse_status() {
        assert_eq!(
            parse_status("w"),
            Some(StatusInput::Status(PositionStatus::Wrong))
        );
        assert_eq!(
            parse_status("m"),
            Some(StatusInput::Status(PositionStatus::Misplaced))
        );
        assert_eq!(
            parse_status("c"),
            Some(StatusInput::Status(PositionStatus::Correct))
        );
        assert_eq!(parse_status("a"), Some(StatusInput::Abort));
        assert_eq!(parse_status("ww"), None);
        assert_eq!(parse_status("x"), None);
        assert_eq!(parse_status(""), None);
    }

    #[test]
    fn test_read_word_normalizes() {
        let mut ui = CliInterface::new(Cursor::new("crane\n"));
        let word = Word::parse("CRANE").unwrap();
        assert_eq!(ui.read_word("1"), Some(WordInput::Word(word)));
    }

    #[test]
    fn test_read_word_invalid() {
        let mut ui = CliInterface::new(Cursor::new("cran3\ncranes\n"));
        assert_eq!(ui.read_word("1"), None);
        assert_eq!(ui.read_word("1"), None);
    }

    #[test]
    fn test_read_word_eof_quits() {
        let mut ui = CliInterface::new(Cursor::new(""));
        assert_eq!(ui.read_word("1"), Some(WordInput::Quit));
    }

    #[test]
    fn test_read_status_case_insensitive() {
        let mut ui = CliInterface::new(Cursor::new("  M \n"));
        let letter = Letter::from_char('S').unwrap();
        assert_eq!(
            ui.read_status(0, letter),
            Some(StatusInput::Status(PositionStatus::Misplaced))
        );
    }

    #[test]
    fn test_read_command_eof_quits() {
        let mut ui = CliInterface::new(Cursor::new(""));
        assert_eq!(ui.read_command(), Some(UserAction::Quit));
    }

    #[test]
    fn test_render_guess_keeps_letters() {
        let raw: Vec<(char, char)> = "CRANE".chars().zip("wmcww".chars()).collect();
        let guess = Guess::parse(&raw).unwrap();
        let rendered = render_guess(&guess);
        for letter in ["C", "R", "A", "N", "E"] {
            assert!(rendered.contains(letter));
        }
    }
}
