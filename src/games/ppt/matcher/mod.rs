//! Deciding whether free-text input matches a cell's answer.
//!
//! Both sides are [`normalize`]d, then a candidate is accepted on an exact
//! match, on a plural match (things only), or when it is within
//! [`MAX_EDIT_DISTANCE`] edits. Guesses shorter than [`MIN_LENGTH_RATIO`] of
//! the candidate are rejected before any of that.

use tracing::{debug, instrument, trace};

use super::puzzle::Category;

mod distance;
pub use distance::edit_distance;

mod plural;
pub use plural::{plural_equivalent, plural_variants};

/// Largest edit distance still counted as a match.
pub const MAX_EDIT_DISTANCE: usize = 2;

/// A guess must be at least this fraction of the candidate's length.
pub const MIN_LENGTH_RATIO: f64 = 0.7;

/// Lowercases, drops punctuation other than apostrophes and collapses whitespace.
pub fn normalize(text: &str) -> String {
    text.to_lowercase()
        .chars()
        .filter(|ch| ch.is_alphanumeric() || ch.is_whitespace() || *ch == '_' || *ch == '\'')
        .collect::<String>()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchKind {
    Exact,
    Plural,
    Fuzzy { distance: usize },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    Empty,
    TooShort,
    TooDistant { distance: usize },
}

/// Checks one normalized guess against one normalized candidate.
pub fn match_candidate(
    guess: &str,
    candidate: &str,
    category: Category,
) -> Result<MatchKind, Rejection> {
    if guess.is_empty() {
        return Err(Rejection::Empty);
    }

    let guess_len = guess.chars().count() as f64;
    let candidate_len = candidate.chars().count() as f64;
    if guess_len < candidate_len * MIN_LENGTH_RATIO {
        return Err(Rejection::TooShort);
    }

    if guess == candidate {
        return Ok(MatchKind::Exact);
    }

    if category.allows_plurals() && plural_equivalent(guess, candidate) {
        return Ok(MatchKind::Plural);
    }

    let distance = edit_distance(guess, candidate);
    if distance <= MAX_EDIT_DISTANCE {
        Ok(MatchKind::Fuzzy { distance })
    } else {
        Err(Rejection::TooDistant { distance })
    }
}

/// Whether `guess` is accepted for the canonical `answer` or any of `acceptable`.
#[instrument(level = "debug", skip(acceptable))]
pub fn is_correct_answer<S: AsRef<str>>(
    guess: &str,
    answer: &str,
    acceptable: &[S],
    category: Category,
) -> bool {
    let guess = normalize(guess);

    std::iter::once(answer)
        .chain(acceptable.iter().map(AsRef::as_ref))
        .any(|candidate| {
            let candidate = normalize(candidate);

            match match_candidate(&guess, &candidate, category) {
                Ok(kind) => {
                    debug!(%candidate, ?kind, "guess accepted");
                    true
                }
                Err(rejection) => {
                    trace!(%candidate, ?rejection);
                    false
                }
            }
        })
}

#[cfg(test)]
mod tests {
    use paste::paste;
    use pretty_assertions::assert_eq;
    use tracing_test::traced_test;

    use super::{is_correct_answer, match_candidate, normalize, MatchKind, Rejection};
    use crate::games::ppt::puzzle::Category::{self, People, Places, Things};

    const NONE: &[&str] = &[];

    #[test]
    fn normalize_collapses_case_and_space() {
        assert_eq!(normalize("  Big   Ben "), normalize("big ben"));
        assert_eq!(normalize("  Big   Ben "), "big ben");
    }

    #[test]
    fn normalize_keeps_apostrophes() {
        assert_eq!(normalize("O'Hare, Int'l."), "o'hare int'l");
        assert_eq!(normalize("Mr. T!"), "mr t");
    }

    #[test]
    fn normalize_drops_spaced_punctuation() {
        assert_eq!(normalize("Rock - Paper"), "rock paper");
    }

    #[test]
    fn normalize_idempotent() {
        for text in [
            "",
            "   ",
            "  Big   Ben ",
            "Rock - n - Roll",
            "Ça va?  Très\tbien",
            "L'Arc de Triomphe!!",
        ] {
            let once = normalize(text);
            assert_eq!(normalize(&once), once, "{text:?}");
        }
    }

    macro_rules! answers {
        ($($name:ident: $guess:literal, $answer:literal, $category:ident => $expected:literal;)+) => {
            paste! {
                $(
                    #[test]
                    fn [<answer_ $name>]() {
                        assert_eq!(
                            is_correct_answer($guess, $answer, NONE, $category),
                            $expected
                        );
                    }
                )+
            }
        };
    }

    answers! {
        exact_after_normalizing: "big ben", "Big Ben", Places => true;
        length_guard: "ei", "Eiffel Tower", Places => false;
        empty: "", "Paris", Places => false;
        only_punctuation: "?!", "Paris", Places => false;
        two_edits: "Pariz", "Paris", People => true;
        two_edits_things: "Parsi", "Paris", Things => true;
        three_edits: "Pazzz", "Paris", Places => false;
        plural_things: "butterfly", "Butterflies", Things => true;
        plural_not_people: "butterfly", "Butterflies", People => false;
        plural_not_places: "butterfly", "Butterflies", Places => false;
        singular_guess_for_plural: "knife", "Knives", Things => true;
        glasses: "glass", "Glasses", Things => true;
        longer_guess: "the eiffel tower", "Eiffel Tower", Places => false;
    }

    #[test]
    #[traced_test]
    fn acceptable_alternates_are_checked() {
        let alternates = ["Mark Twain", "Twain"];

        assert!(is_correct_answer(
            "mark twain",
            "Samuel Clemens",
            &alternates,
            People
        ));
        assert!(is_correct_answer("twain", "Samuel Clemens", &alternates, People));
        assert!(!is_correct_answer(
            "hemingway",
            "Samuel Clemens",
            &alternates,
            People
        ));
    }

    #[test]
    fn alternates_get_their_own_length_guard() {
        // too short for the canonical answer, long enough for the alternate
        assert!(is_correct_answer(
            "nyc",
            "New York City",
            &["NYC"],
            Places
        ));
    }

    #[test]
    fn match_kinds() {
        let check = |guess: &str, candidate: &str, category: Category| {
            match_candidate(&normalize(guess), &normalize(candidate), category)
        };

        assert_eq!(check("Paris", "paris", Places), Ok(MatchKind::Exact));
        assert_eq!(check("berry", "berries", Things), Ok(MatchKind::Plural));
        assert_eq!(
            check("berry", "berries", People),
            Err(Rejection::TooDistant { distance: 3 })
        );
        assert_eq!(
            check("pariz", "paris", Places),
            Ok(MatchKind::Fuzzy { distance: 1 })
        );
        assert_eq!(check("", "paris", Places), Err(Rejection::Empty));
        assert_eq!(check("ei", "eiffel tower", Places), Err(Rejection::TooShort));
    }
}
