//! Query normalisation and tokenisation.

use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Bare ASCII letters mapped to the accented Latin variants hygiene
/// collapses into them, kept only as a display hint (e.g. so a caller can
/// show a user "your 'e' matched è/é/ê in the catalog"); it plays no part in
/// the normalisation itself, which strips diacritics via Unicode
/// decomposition.
pub const DIACRITIC_HINTS: &[(char, &str)] = &[
    ('a', "àáâãäåā"),
    ('c', "çć"),
    ('e', "èéêëē"),
    ('i', "ìíîïī"),
    ('n', "ñń"),
    ('o', "òóôõöøō"),
    ('u', "ùúûüū"),
    ('y', "ýÿ"),
];

pub fn diacritic_hint(base: char) -> Option<&'static str> {
    DIACRITIC_HINTS
        .iter()
        .find(|(c, _)| *c == base)
        .map(|(_, variants)| *variants)
}

/// Normalise a raw query: NFKD-decompose, drop combining marks (strips
/// diacritics), lowercase, fold every non-alphanumeric separator (including
/// apostrophe) into a single space, and trim. Idempotent:
/// `normalise(normalise(s)) == normalise(s)`.
pub fn normalise(raw: &str) -> String {
    let decomposed: String = raw.nfkd().filter(|c| !is_combining_mark(*c)).collect();
    let lowered = decomposed.to_lowercase();

    let mut out = String::with_capacity(lowered.len());
    let mut last_was_space = true; // trims the leading edge
    for c in lowered.chars() {
        if c.is_alphanumeric() {
            out.push(c);
            last_was_space = false;
        } else if !last_was_space {
            out.push(' ');
            last_was_space = true;
        }
    }
    out.trim_end().to_string()
}

/// Split an already-[`normalise`]d string into non-empty tokens.
pub fn tokenise(normalised: &str) -> Vec<String> {
    normalised
        .split(' ')
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalise_strips_diacritics_and_lowercases() {
        assert_eq!(normalise("Nice C\u{f4}te d'Azur"), "nice cote d azur");
    }

    #[test]
    fn test_normalise_collapses_apostrophe_as_separator() {
        assert_eq!(normalise("d'azur"), "d azur");
        assert_eq!(tokenise(&normalise("d'azur")), vec!["d", "azur"]);
    }

    #[test]
    fn test_normalise_collapses_separators() {
        assert_eq!(normalise("  San---Francisco,,CA  "), "san francisco ca");
    }

    #[test]
    fn test_normalise_is_idempotent() {
        let once = normalise("San Francisco Int'l  Airport!!");
        let twice = normalise(&once);
        assert_eq!(once, twice);
        assert_eq!(once, "san francisco int l airport");
    }

    #[test]
    fn test_tokenise_splits_on_single_spaces() {
        assert_eq!(
            tokenise("san francisco"),
            vec!["san".to_string(), "francisco".to_string()]
        );
    }

    #[test]
    fn test_tokenise_empty_string_yields_no_tokens() {
        assert!(tokenise("").is_empty());
    }
}
