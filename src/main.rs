#![warn(clippy::perf)]
#![warn(clippy::unwrap_used)]

use std::io::{BufRead, Write};

use chrono::Utc;
use clap::Parser;
use people_places_things::{
    framework::{logging, store::FileStore, AppData, Config},
    games::ppt::Game,
};
#[allow(unused_imports)]
use tracing::{debug, info, trace};
use tracing_unwrap::ResultExt;

mod cli;
use cli::{Cli, Command, PlayLine};

fn main() -> anyhow::Result<()> {
    logging::init_tracing();

    let cli = Cli::parse();

    let config = Config::load(cli.config.as_deref())?;
    let data = AppData::new(config)?;
    let now = Utc::now();

    let command = cli.command.unwrap_or_default();
    debug!(?command);

    let mut game = data.open_game(now)?;
    info!(number = game.puzzle().number, "opened today's puzzle");
    let url = data.config().share.url.as_deref();

    match command {
        Command::Today => println!("{}", cli::overview(game.puzzle(), game.session())),
        Command::Show => println!("{}", cli::board(game.puzzle(), game.session())),
        Command::Guess { row, col, text } => {
            let (row, col) = (usize::from(row - 1), usize::from(col - 1));
            guess(&mut game, row, col, &text.join(" "), url);
        }
        Command::Share => {
            if !game.session().is_completed() {
                println!("Not finished yet, here's the grid so far.\n");
            }
            println!("{}", cli::summary(&game.share_result(), url));
        }
        Command::Reset => {
            game.reset();
            println!("Progress on {} cleared.", game.puzzle().title());
        }
        Command::Play => play(&mut game, url),
    }

    Ok(())
}

fn guess(game: &mut Game<FileStore>, row: usize, col: usize, text: &str, url: Option<&str>) {
    let outcome = game.guess(row, col, text);
    println!("{}", cli::describe_outcome(outcome, game.puzzle(), row, col));

    if outcome.has_update() && game.session().is_completed() {
        println!("\n{}", cli::summary(&game.share_result(), url));
    }
}

fn play(game: &mut Game<FileStore>, url: Option<&str>) {
    const HELP: &str = "Type `ROW COL GUESS` (e.g. `2 3 butterflies`), `show`, `share`, or `quit`.";

    println!("{}\n\n{HELP}", cli::board(game.puzzle(), game.session()));

    let stdin = std::io::stdin();
    let mut stdout = std::io::stdout();

    loop {
        print!("> ");
        stdout.flush().expect_or_log("stdout should be writable");

        let mut line = String::new();
        let read = stdin
            .lock()
            .read_line(&mut line)
            .expect_or_log("stdin should be readable");

        if read == 0 {
            break;
        }

        trace!(line = line.trim_end());

        match PlayLine::parse(&line) {
            Some(PlayLine::Guess { row, col, text }) => {
                guess(game, row, col, &text, url);

                if game.session().is_completed() {
                    break;
                }
            }
            Some(PlayLine::Show) => println!("{}", cli::board(game.puzzle(), game.session())),
            Some(PlayLine::Share) => println!("{}", cli::summary(&game.share_result(), url)),
            Some(PlayLine::Quit) => break,
            Some(PlayLine::Help) | None => println!("{HELP}"),
        }
    }
}
