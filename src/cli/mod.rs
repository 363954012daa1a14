use std::path::PathBuf;

mod render;
pub use render::{board, describe_outcome, overview, summary};

#[derive(clap::Parser)]
#[command(name = "ppt", version, about = "People, Places & Things, a daily 3x3 trivia grid")]
pub struct Cli {
    /// Config file, instead of `PPT_TOML` or `./ppt.toml`.
    #[arg(long)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(clap::Subcommand, Debug, Clone, Default, PartialEq, Eq)]
pub enum Command {
    /// Today's puzzle number and your progress.
    #[default]
    Today,

    /// The grid with every clue you've unlocked.
    Show,

    /// Guess the cell at ROW and COL, counting from 1.
    Guess {
        #[arg(value_parser = clap::value_parser!(u8).range(1..=3))]
        row: u8,

        #[arg(value_parser = clap::value_parser!(u8).range(1..=3))]
        col: u8,

        #[arg(required = true, num_args = 1..)]
        text: Vec<String>,
    },

    /// Emoji grid for pasting elsewhere.
    Share,

    /// Throw away today's progress.
    Reset,

    /// Answer interactively, one `ROW COL GUESS` per line.
    Play,
}

/// A line typed during `ppt play`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlayLine {
    Guess { row: usize, col: usize, text: String },
    Show,
    Share,
    Quit,
    Help,
}

impl PlayLine {
    /// Rows and columns come in 1-based and leave 0-based.
    pub fn parse(line: &str) -> Option<Self> {
        let line = line.trim();

        match line.to_lowercase().as_str() {
            "" => return None,
            "q" | "quit" | "exit" => return Some(Self::Quit),
            "share" => return Some(Self::Share),
            "show" | "board" => return Some(Self::Show),
            "?" | "help" => return Some(Self::Help),
            _ => {}
        }

        let mut parts = line.splitn(3, char::is_whitespace);
        let row = parse_position(parts.next()?)?;
        let col = parse_position(parts.next()?)?;
        let text = parts.next()?.trim();

        if text.is_empty() {
            return None;
        }

        Some(Self::Guess {
            row,
            col,
            text: text.to_owned(),
        })
    }
}

fn parse_position(text: &str) -> Option<usize> {
    match text.parse::<usize>() {
        Ok(n @ 1..=3) => Some(n - 1),
        _ => None,
    }
}
