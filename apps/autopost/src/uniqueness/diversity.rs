//! Structural diversity — the opening word of a quote.

use serde::Serialize;

/// Openings the model leans on too heavily. Always rejected.
pub const BANNED_OPENINGS: &[&str] = &["Sometimes", "One", "Stop", "Walk", "Never", "Always"];

/// How many recent posts contribute opening words that may not repeat.
pub const RECENT_OPENINGS_WINDOW: i64 = 10;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "verdict", rename_all = "snake_case")]
pub enum DiversityVerdict {
    Accepted,
    BannedOpening { word: String },
    RepeatedOpening { word: String },
}

/// First whitespace-delimited token that contains a letter, with every
/// non-alphabetic char removed. `"\"Never"` yields `"Never"`. Empty when the
/// text has no letters at all.
pub fn opening_word(text: &str) -> String {
    text.split_whitespace()
        .find(|token| token.chars().any(char::is_alphabetic))
        .map(|token| token.chars().filter(|c| c.is_alphabetic()).collect())
        .unwrap_or_default()
}

/// Case-insensitive check of the opening word against the banned list and the
/// openings of recent posts.
pub fn check_opening<'a, I>(quote: &str, recent_openings: I) -> DiversityVerdict
where
    I: IntoIterator<Item = &'a str>,
{
    let word = opening_word(quote);

    if BANNED_OPENINGS
        .iter()
        .any(|banned| banned.eq_ignore_ascii_case(&word))
    {
        return DiversityVerdict::BannedOpening { word };
    }

    if !word.is_empty()
        && recent_openings
            .into_iter()
            .any(|recent| recent.eq_ignore_ascii_case(&word))
    {
        return DiversityVerdict::RepeatedOpening { word };
    }

    DiversityVerdict::Accepted
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_opening_word_strips_punctuation() {
        assert_eq!(opening_word("\"Never settle.\""), "Never");
        assert_eq!(opening_word("Love shouldn't cost your self-respect."), "Love");
        assert_eq!(opening_word("  It's   fine"), "Its");
    }

    #[test]
    fn test_opening_word_skips_leading_non_alphabetic_tokens() {
        assert_eq!(opening_word("— 3 Things nobody tells you"), "Things");
    }

    #[test]
    fn test_opening_word_empty_input() {
        assert_eq!(opening_word(""), "");
        assert_eq!(opening_word("123 !!!"), "");
    }

    #[test]
    fn test_banned_opening_rejected() {
        for banned in BANNED_OPENINGS {
            let quote = format!("{banned} let anyone dim the light you worked hard to build.");
            assert_eq!(
                check_opening(&quote, []),
                DiversityVerdict::BannedOpening {
                    word: banned.to_string()
                }
            );
        }
    }

    #[test]
    fn test_banned_opening_is_case_insensitive() {
        assert!(matches!(
            check_opening("never chase people who walk away easily.", []),
            DiversityVerdict::BannedOpening { .. }
        ));
    }

    #[test]
    fn test_banned_word_later_in_quote_is_fine() {
        assert_eq!(
            check_opening("You should never beg for basic respect.", []),
            DiversityVerdict::Accepted
        );
    }

    #[test]
    fn test_repeated_opening_rejected() {
        let recent = ["Protect", "Love", "People"];
        assert_eq!(
            check_opening("Love is quiet when it's real.", recent),
            DiversityVerdict::RepeatedOpening {
                word: "Love".to_string()
            }
        );
    }

    #[test]
    fn test_fresh_opening_accepted() {
        let recent = ["Protect", "Love", "People"];
        assert_eq!(
            check_opening("Funny how they remember you when they need something.", recent),
            DiversityVerdict::Accepted
        );
    }
}
