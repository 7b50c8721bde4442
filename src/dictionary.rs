//! Word list loaded once at startup from the static JSON resource.

use std::collections::HashSet;

use crate::error::Result;
use crate::http::HttpClient;
use crate::normalize::{canonical_word, unsingularized_word};

#[derive(Debug, Default, Clone)]
pub struct Dictionary {
    words: Vec<String>,
    lookup: HashSet<String>,
}

impl Dictionary {
    pub fn new<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let words: Vec<String> = words.into_iter().map(Into::into).collect();
        let lookup = words.iter().cloned().collect();
        Self { words, lookup }
    }

    /// Parses a JSON array of strings.
    pub fn from_json(bytes: &[u8]) -> Result<Self> {
        let words: Vec<String> = serde_json::from_slice(bytes)?;
        Ok(Self::new(words))
    }

    /// Fetches and parses the word list.
    pub async fn load<C: HttpClient>(http: &C, url: &str) -> Result<Self> {
        let bytes = http.get(url).await?;
        Self::from_json(&bytes)
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub fn contains(&self, word: &str) -> bool {
        self.lookup.contains(word)
    }

    /// Resolves a raw token to the dictionary entry it matches, trying the
    /// canonical form first and the unsingularized form second.
    pub fn resolve(&self, raw: &str) -> Option<String> {
        let canonical = canonical_word(raw);
        if self.contains(&canonical) {
            return Some(canonical);
        }
        let whole = unsingularized_word(raw);
        if whole != canonical && self.contains(&whole) {
            return Some(whole);
        }
        None
    }

    /// Word at `seed % len`, `None` when empty.
    pub fn pick(&self, seed: u64) -> Option<&str> {
        if self.words.is_empty() {
            return None;
        }
        let idx = (seed % self.words.len() as u64) as usize;
        Some(self.words[idx].as_str())
    }

    pub fn random_word(&self) -> Option<&str> {
        let mut buf = [0u8; 8];
        if let Err(err) = getrandom::getrandom(&mut buf) {
            log::warn!("random source unavailable: {err}");
        }
        self.pick(u64::from_le_bytes(buf))
    }
}
