//! Word canonicalization used for every dictionary lookup.
//!
//! A canonical word is the lowercase token with its possessive suffix,
//! surrounding punctuation and one trailing `s` removed. Singularization is
//! deliberately naive: `"bus"` becomes `"bu"`.

const APOSTROPHES: [char; 2] = ['\'', '\u{2019}'];

pub fn canonical_word(raw: &str) -> String {
    let word = strip_possessive(raw);
    let word = trim_punctuation(&word);
    let word = word.strip_suffix('s').unwrap_or(word);
    word.to_lowercase()
}

/// Canonical form without the singularization step. Used as the second
/// lookup candidate so that dictionary words ending in `s` ("paris") still
/// match.
pub fn unsingularized_word(raw: &str) -> String {
    trim_punctuation(&strip_possessive(raw)).to_lowercase()
}

fn trim_punctuation(word: &str) -> &str {
    word.trim_matches(|c: char| !c.is_ascii_alphanumeric())
}

/// Removes the leftmost `'s` / `’s` that is followed only by non-alphanumeric
/// characters up to the end of the token.
fn strip_possessive(word: &str) -> String {
    for (idx, c) in word.char_indices() {
        if !APOSTROPHES.contains(&c) {
            continue;
        }
        let after_mark = &word[idx + c.len_utf8()..];
        let Some(rest) = after_mark.strip_prefix('s') else {
            continue;
        };
        if rest.chars().all(|r| !r.is_ascii_alphanumeric()) {
            let mut out = String::with_capacity(word.len());
            out.push_str(&word[..idx]);
            out.push_str(rest);
            return out;
        }
    }
    word.to_string()
}
