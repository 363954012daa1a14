use std::fmt::Write;

use people_places_things::games::ppt::{
    as_emoji::AsEmoji,
    clue::{self, VisibleClues},
    game::{GuessOutcome, Ignored},
    Category, GameSession, Puzzle, ShareResult,
};

fn italics(text: &str) -> String {
    clue::render_with(text, |span| format!("_{span}_")).into_owned()
}

fn progress_line(session: &GameSession) -> String {
    let status = if session.is_completed() {
        "finished"
    } else {
        "in progress"
    };

    format!("{}/9 correct, {status}", session.correct_count())
}

/// Puzzle title, one emoji row per constraint, and a progress line.
pub fn overview(puzzle: &Puzzle, session: &GameSession) -> String {
    let mut text = format!("{}\n\n", puzzle.title());

    let header = Category::COLUMNS.map(|category| category.label()).join(" / ");
    let _ = writeln!(text, "   {header}");

    for (row, cells) in puzzle.rows().iter().zip(session.cells()) {
        let emoji = cells.iter().map(|cell| cell.as_emoji()).collect::<String>();
        let _ = writeln!(text, "{emoji}  {}", italics(&row.constraint));
    }

    let _ = write!(text, "\n{}", progress_line(session));
    text
}

/// Every unlocked clue, guess, and answer.
pub fn board(puzzle: &Puzzle, session: &GameSession) -> String {
    let mut text = format!("{}\n", puzzle.title());

    for (r, (row, cells)) in puzzle.rows().iter().zip(session.cells()).enumerate() {
        let _ = writeln!(text, "\nRow {}: {}", r + 1, italics(&row.constraint));

        for (c, (cell, state)) in row.cells.iter().zip(cells).enumerate() {
            let visible = VisibleClues::new(cell, state);

            let _ = writeln!(
                text,
                "  {} {}.{} {}: {}",
                state.as_emoji(),
                r + 1,
                c + 1,
                cell.category,
                italics(visible.clue)
            );

            if let Some(second) = visible.second_clue {
                let _ = writeln!(text, "        also: {}", italics(second));
            }

            if !state.guesses().is_empty() {
                let _ = writeln!(text, "        guessed: {}", state.guesses().join(", "));
            }

            match visible.answer {
                Some(answer) => {
                    let _ = writeln!(text, "        answer: {answer}");
                }
                None => {
                    let _ = writeln!(text, "        {} guess(es) left", state.remaining());
                }
            }
        }
    }

    let _ = write!(text, "\n{}", progress_line(session));
    text
}

pub fn describe_outcome(outcome: GuessOutcome, puzzle: &Puzzle, row: usize, col: usize) -> String {
    let answer = puzzle.cell(row, col).map_or("", |cell| cell.answer.as_str());

    match outcome {
        GuessOutcome::Correct => format!("Correct! It's {answer}."),
        GuessOutcome::Wrong { remaining } => {
            format!("Not quite. {remaining} guess(es) left, and there's a new clue.")
        }
        GuessOutcome::Exhausted => format!("Out of guesses. The answer was {answer}."),
        GuessOutcome::Ignored(reason) => match reason {
            Ignored::WrongPuzzle => "That guess was for a different puzzle.",
            Ignored::SessionCompleted => "Today's puzzle is already finished.",
            Ignored::OutOfRange => "Rows and columns go from 1 to 3.",
            Ignored::CellFinished => "That cell is already done.",
            Ignored::EmptyGuess => "Type a guess first.",
        }
        .to_owned(),
    }
}

/// Score message followed by the share text.
pub fn summary(result: &ShareResult, url: Option<&str>) -> String {
    format!("{}\n\n{}", result.score_message(), result.share_text(url))
}
