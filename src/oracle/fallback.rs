//! Fixed fallback words, one per starting letter.
//!
//! Used whenever the oracle cannot produce a usable suggestion, so the bot
//! always has a syntactically legal candidate.

/// Letter used to start the chain when there is no previous word.
pub const DEFAULT_OPENING_LETTER: char = 'a';

/// One known-good word per letter, `a` through `z`.
pub const FALLBACK_WORDS: [(char, &str); 26] = [
    ('a', "apple"),
    ('b', "battle"),
    ('c', "chess"),
    ('d', "dream"),
    ('e', "energy"),
    ('f', "future"),
    ('g', "galaxy"),
    ('h', "history"),
    ('i', "island"),
    ('j', "journey"),
    ('k', "knight"),
    ('l', "legend"),
    ('m', "moment"),
    ('n', "nature"),
    ('o', "ocean"),
    ('p', "planet"),
    ('q', "quartz"),
    ('r', "rhythm"),
    ('s', "spirit"),
    ('t', "theory"),
    ('u', "unique"),
    ('v', "vision"),
    ('w', "wisdom"),
    ('x', "xenon"),
    ('y', "yellow"),
    ('z', "zebra"),
];

/// Returns the fallback word for `letter` (case-insensitive).
///
/// Non-letters get the opening word.
pub fn fallback_word(letter: char) -> &'static str {
    let letter = letter.to_ascii_lowercase();
    FALLBACK_WORDS
        .iter()
        .find(|(c, _)| *c == letter)
        .map(|(_, word)| *word)
        .unwrap_or(FALLBACK_WORDS[0].1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_letter_has_a_matching_word() {
        for letter in 'a'..='z' {
            let word = fallback_word(letter);
            assert!(
                word.starts_with(letter),
                "fallback for {letter} is {word}"
            );
        }
    }

    #[test]
    fn test_upper_case_lookup() {
        assert_eq!(fallback_word('Q'), "quartz");
    }

    #[test]
    fn test_non_letter_gets_opener() {
        assert_eq!(fallback_word('7'), "apple");
        assert!(fallback_word(DEFAULT_OPENING_LETTER).starts_with(DEFAULT_OPENING_LETTER));
    }
}
