//! Thumbnail and extract lookups against the MediaWiki query API.
//!
//! Both lookups are read-only and independent. Callers get an `Option` from
//! the `lookup_*` methods; the `*_or_*` variants fold every failure into the
//! configured fallback and log it.

use std::collections::BTreeMap;

use serde::Deserialize;

use crate::config::GameConfig;
use crate::error::Result;
use crate::http::HttpClient;

#[derive(Debug, Default, Deserialize)]
struct QueryResponse {
    #[serde(default)]
    query: Option<Query>,
}

#[derive(Debug, Default, Deserialize)]
struct Query {
    #[serde(default)]
    pages: BTreeMap<String, Page>,
}

#[derive(Debug, Default, Deserialize)]
struct Page {
    #[serde(default)]
    thumbnail: Option<Thumbnail>,
    #[serde(default)]
    extract: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Thumbnail {
    #[serde(default)]
    source: Option<String>,
}

impl QueryResponse {
    fn into_first_page(self) -> Option<Page> {
        self.query?.pages.into_values().next()
    }
}

pub fn thumbnail_url(api_url: &str, title: &str, size: u32) -> String {
    format!(
        "{api_url}?action=query&format=json&origin=*&prop=pageimages&pithumbsize={size}&titles={}",
        urlencoding::encode(title)
    )
}

pub fn extract_url(api_url: &str, title: &str, sentences: u32) -> String {
    format!(
        "{api_url}?action=query&format=json&origin=*&prop=extracts&exsentences={sentences}&exlimit=1&explaintext=1&titles={}",
        urlencoding::encode(title)
    )
}

/// Thumbnail source of the first page, if any.
pub fn parse_thumbnail(bytes: &[u8]) -> Result<Option<String>> {
    let resp: QueryResponse = serde_json::from_slice(bytes)?;
    Ok(resp
        .into_first_page()
        .and_then(|p| p.thumbnail)
        .and_then(|t| t.source)
        .filter(|s| !s.is_empty()))
}

/// Plain-text extract of the first page, if any.
pub fn parse_extract(bytes: &[u8]) -> Result<Option<String>> {
    let resp: QueryResponse = serde_json::from_slice(bytes)?;
    Ok(resp
        .into_first_page()
        .and_then(|p| p.extract)
        .filter(|s| !s.is_empty()))
}

pub struct WikiClient<C> {
    http: C,
    api_url: String,
    thumbnail_size: u32,
    extract_sentences: u32,
    placeholder_image: String,
    fallback_extract: String,
}

impl<C: HttpClient> WikiClient<C> {
    pub fn new(http: C, config: &GameConfig) -> Self {
        Self {
            http,
            api_url: config.api_url.clone(),
            thumbnail_size: config.thumbnail_size,
            extract_sentences: config.extract_sentences,
            placeholder_image: config.placeholder_image.clone(),
            fallback_extract: config.fallback_extract.clone(),
        }
    }

    pub async fn lookup_thumbnail(&self, title: &str) -> Result<Option<String>> {
        let url = thumbnail_url(&self.api_url, title, self.thumbnail_size);
        let bytes = self.http.get(&url).await?;
        parse_thumbnail(&bytes)
    }

    pub async fn lookup_extract(&self, title: &str) -> Result<Option<String>> {
        let url = extract_url(&self.api_url, title, self.extract_sentences);
        let bytes = self.http.get(&url).await?;
        parse_extract(&bytes)
    }

    /// Image source for `title`: the thumbnail URL, or the placeholder path on
    /// a miss or any failure.
    pub async fn thumbnail_or_placeholder(&self, title: &str) -> String {
        match self.lookup_thumbnail(title).await {
            Ok(Some(src)) => src,
            Ok(None) => {
                log::debug!("no thumbnail for {title:?}");
                self.placeholder_image.clone()
            }
            Err(err) => {
                log::error!("error fetching Wikipedia image for {title:?}: {err}");
                self.placeholder_image.clone()
            }
        }
    }

    /// Extract text for `title`, or the fixed fallback on a miss or any failure.
    pub async fn extract_or_fallback(&self, title: &str) -> String {
        match self.lookup_extract(title).await {
            Ok(Some(text)) => text,
            Ok(None) => self.fallback_extract.clone(),
            Err(err) => {
                log::error!("error fetching Wikipedia extract for {title:?}: {err}");
                self.fallback_extract.clone()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_urls() {
        let url = thumbnail_url("https://en.wikipedia.org/w/api.php", "new york", 300);
        assert_eq!(
            url,
            "https://en.wikipedia.org/w/api.php?action=query&format=json&origin=*&prop=pageimages&pithumbsize=300&titles=new%20york"
        );
        let url = extract_url("https://x/api.php", "cat", 2);
        assert!(url.ends_with("&prop=extracts&exsentences=2&exlimit=1&explaintext=1&titles=cat"));
    }

    #[test]
    fn test_parse_thumbnail_hit() {
        let body = br#"{"batchcomplete":"","query":{"pages":{"6678":{"pageid":6678,"ns":0,"title":"Cat",
            "thumbnail":{"source":"https://upload.wikimedia.org/cat.jpg","width":300,"height":200},"pageimage":"Cat.jpg"}}}}"#;
        assert_eq!(
            parse_thumbnail(body).unwrap().as_deref(),
            Some("https://upload.wikimedia.org/cat.jpg")
        );
    }

    #[test]
    fn test_parse_missing_page() {
        let body = br#"{"query":{"pages":{"-1":{"ns":0,"title":"Qwzx","missing":""}}}}"#;
        assert_eq!(parse_thumbnail(body).unwrap(), None);
        assert_eq!(parse_extract(body).unwrap(), None);
    }

    #[test]
    fn test_parse_without_query() {
        assert_eq!(parse_extract(br#"{"error":{"code":"badvalue"}}"#).unwrap(), None);
        assert!(parse_extract(b"<html>").is_err());
    }

    #[test]
    fn test_parse_extract_hit() {
        let body = br#"{"query":{"pages":{"22989":{"title":"Paris","extract":"Paris is the capital of France. It is big."}}}}"#;
        assert_eq!(
            parse_extract(body).unwrap().as_deref(),
            Some("Paris is the capital of France. It is big.")
        );
    }
}
