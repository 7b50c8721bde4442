//! Caption rendering: raw input text to plain / marked tokens and HTML.

use crate::dictionary::Dictionary;

pub const WORD_CLASS: &str = "clickable-word";
pub const WORD_ATTR: &str = "data-word";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CaptionToken {
    Plain(String),
    /// A recognized token: the text as typed plus the dictionary entry it matched.
    Marked { raw: String, word: String },
}

/// Splits on single spaces (empty tokens from repeated spaces are kept) and
/// marks every token the dictionary recognizes.
pub fn render_tokens(text: &str, dict: &Dictionary) -> Vec<CaptionToken> {
    text.split(' ')
        .map(|raw| match dict.resolve(raw) {
            Some(word) => CaptionToken::Marked {
                raw: raw.to_string(),
                word,
            },
            None => CaptionToken::Plain(raw.to_string()),
        })
        .collect()
}

pub fn render_html(tokens: &[CaptionToken]) -> String {
    let mut out = String::new();
    for (i, token) in tokens.iter().enumerate() {
        if i > 0 {
            out.push(' ');
        }
        match token {
            CaptionToken::Plain(raw) => out.push_str(&escape_html(raw)),
            CaptionToken::Marked { raw, word } => {
                out.push_str(&format!(
                    "<span class=\"{WORD_CLASS}\" {WORD_ATTR}=\"{}\" style=\"color:#004baa; cursor:pointer;\"><b>{}</b></span>",
                    escape_html(word),
                    escape_html(raw)
                ));
            }
        }
    }
    out
}

/// Dictionary entry for the last space-separated token, if recognized.
pub fn last_recognized(text: &str, dict: &Dictionary) -> Option<String> {
    text.rsplit(' ').next().and_then(|raw| dict.resolve(raw))
}

fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
