use std::{borrow::Cow, sync::OnceLock};

use regex::{Captures, Regex};

use super::{game::CellState, puzzle::Cell};

fn italic_span() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX.get_or_init(|| Regex::new(r"(?is)<i>(.*?)</i>").expect("hard-coded regex should be valid"))
}

fn stray_tag() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX.get_or_init(|| Regex::new(r"(?i)</?i>").expect("hard-coded regex should be valid"))
}

/// Passes the inside of every `<i>…</i>` span through `italic`.
///
/// Unpaired tags are dropped.
pub fn render_with<F>(text: &str, mut italic: F) -> Cow<'_, str>
where
    F: FnMut(&str) -> String,
{
    let spans = italic_span().replace_all(text, |caps: &Captures| italic(&caps[1]));

    if stray_tag().is_match(&spans) {
        stray_tag().replace_all(&spans, "").into_owned().into()
    } else {
        spans
    }
}

pub fn render_plain(text: &str) -> Cow<'_, str> {
    render_with(text, str::to_owned)
}

/// What a player may currently see of one cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VisibleClues<'a> {
    pub clue: &'a str,
    pub second_clue: Option<&'a str>,
    pub answer: Option<&'a str>,
}

impl<'a> VisibleClues<'a> {
    pub fn new(cell: &'a Cell, state: &CellState) -> Self {
        Self {
            clue: &cell.clue,
            second_clue: state
                .second_clue_visible()
                .then_some(cell.second_clue.as_str()),
            answer: state.answer_revealed().then_some(cell.answer.as_str()),
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::{render_plain, render_with, VisibleClues};
    use crate::games::ppt::{game::CellState, puzzle::Cell};

    #[test]
    fn plain_strips_tags() {
        assert_eq!(
            render_plain("Wrote <i>Adventures of Huckleberry Finn</i>"),
            "Wrote Adventures of Huckleberry Finn"
        );
    }

    #[test]
    fn plain_untouched_text_is_borrowed() {
        assert!(matches!(
            render_plain("no markup here"),
            std::borrow::Cow::Borrowed(_)
        ));
    }

    #[test]
    fn custom_italics() {
        assert_eq!(
            render_with("<i>Le Monde</i> and <I>Time</I>", |s| format!("_{s}_")),
            "_Le Monde_ and _Time_"
        );
    }

    #[test]
    fn unpaired_tags_dropped() {
        assert_eq!(render_plain("broken <i>markup"), "broken markup");
        assert_eq!(render_plain("also</i> broken"), "also broken");
    }

    #[test]
    fn visibility_follows_guesses() {
        let cell = Cell {
            category: crate::games::ppt::puzzle::Category::Places,
            clue: "City of light".into(),
            second_clue: "On the Seine".into(),
            answer: "Paris".into(),
            acceptable_answers: Vec::new(),
            image_url: None,
        };
        let mut state = CellState::new(2);

        assert_eq!(
            VisibleClues::new(&cell, &state),
            VisibleClues {
                clue: "City of light",
                second_clue: None,
                answer: None,
            }
        );

        state.record_guess("Lyon".into(), false);
        let visible = VisibleClues::new(&cell, &state);
        assert_eq!(visible.second_clue, Some("On the Seine"));
        assert_eq!(visible.answer, None);

        state.record_guess("Marseille".into(), false);
        assert_eq!(VisibleClues::new(&cell, &state).answer, Some("Paris"));
    }
}
