//! Page wiring and remote endpoints. Every field has a default matching the
//! bundled `index.html`, so JS callers only pass what they override.

use serde::Deserialize;
use wasm_bindgen::JsValue;

use crate::error::{Error, Result};

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GameConfig {
    pub caption_id: String,
    pub image_id: String,
    pub input_id: String,
    pub tooltip_id: String,
    /// Static JSON array of lowercase words.
    pub word_list_url: String,
    pub api_url: String,
    pub thumbnail_size: u32,
    pub extract_sentences: u32,
    pub placeholder_image: String,
    pub fallback_extract: String,
    pub placeholder_caption: String,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            caption_id: "caption".into(),
            image_id: "wiki-image".into(),
            input_id: "invisible-input".into(),
            tooltip_id: "tooltip".into(),
            word_list_url: "wikipedia.json".into(),
            api_url: "https://en.wikipedia.org/w/api.php".into(),
            thumbnail_size: 300,
            extract_sentences: 2,
            placeholder_image: "default-image.jpg".into(),
            fallback_extract: "No information available.".into(),
            placeholder_caption: "Start typing...".into(),
        }
    }
}

impl GameConfig {
    /// Reads a (possibly partial) config object. `undefined` / `null` give defaults.
    pub fn from_js(value: JsValue) -> Result<Self> {
        if value.is_undefined() || value.is_null() {
            return Ok(Self::default());
        }
        serde_wasm_bindgen::from_value(value).map_err(|e| Error::Config(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cfg = GameConfig::default();
        assert_eq!(cfg.caption_id, "caption");
        assert_eq!(cfg.placeholder_image, "default-image.jpg");
        assert_eq!(cfg.fallback_extract, "No information available.");
        assert_eq!(cfg.thumbnail_size, 300);
        assert_eq!(cfg.extract_sentences, 2);
    }

    #[test]
    fn test_partial_override() {
        let cfg: GameConfig =
            serde_json::from_str(r#"{"wordListUrl": "words.json", "thumbnailSize": 120}"#).unwrap();
        assert_eq!(cfg.word_list_url, "words.json");
        assert_eq!(cfg.thumbnail_size, 120);
        assert_eq!(cfg.image_id, "wiki-image");
    }
}
