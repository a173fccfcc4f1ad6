use std::io;
use std::process::ExitCode;
use wordle_helper::cli::{CliInterface, parse_cli};
use wordle_helper::game_state::{Session, game_loop};
use wordle_helper::logging;
use wordle_helper::wordbank::{WordStore, default_exclusions_path, load_words_from_file};

fn main() -> ExitCode {
    let cli = parse_cli();
    logging::init(cli.verbose);

    let words = match load_words_from_file(&cli.words_path) {
        Ok(words) => words,
        Err(e) => {
            eprintln!(
                "Failed to load word list from '{}': {e}",
                cli.words_path.display()
            );
            return ExitCode::FAILURE;
        }
    };

    let exclusions = match cli.exclusions_path {
        Some(path) => match load_words_from_file(&path) {
            Ok(lines) => lines,
            Err(e) => {
                eprintln!("Failed to load exclusions from '{}': {e}", path.display());
                return ExitCode::FAILURE;
            }
        },
        None => match default_exclusions_path() {
            Some(path) => load_words_from_file(&path).unwrap_or_else(|e| {
                log::warn!("Ignoring exclusions at '{}': {e}", path.display());
                Vec::new()
            }),
            None => {
                log::warn!("No exclusion list found; previous answers stay in play");
                Vec::new()
            }
        },
    };

    let store = WordStore::initialize(&words, &exclusions);
    println!(
        "Loaded {} words, {} still possible.",
        store.len(),
        store.live_count()
    );

    let mut session = Session::new(store);
    let stdin = io::stdin();
    let mut interface = CliInterface::new(stdin.lock());
    game_loop(&mut session, &mut interface, cli.top);

    ExitCode::SUCCESS
}
