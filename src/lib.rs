//! Wiki Caption core crate.
//!
//! The player types into a hidden input; words found in the word list are
//! highlighted in the caption. Hovering a highlighted word shows a short
//! Wikipedia extract, clicking it (or finishing a sentence on it) swaps the
//! page image for the article thumbnail.
//!
//! Everything except `app` and the `BrowserHttp` client is plain Rust and is
//! tested natively.

use wasm_bindgen::prelude::*;

mod app;
pub mod caption;
pub mod config;
pub mod dictionary;
pub mod error;
pub mod http;
pub mod normalize;
pub mod wiki;

pub use caption::{CaptionToken, render_html, render_tokens};
pub use config::GameConfig;
pub use dictionary::Dictionary;
pub use error::Error;
pub use normalize::canonical_word;
pub use wiki::WikiClient;

// Optional small allocator for size (feature gated)
#[cfg(feature = "wee_alloc")]
#[global_allocator]
static ALLOC: wee_alloc::WeeAlloc = wee_alloc::WeeAlloc::INIT;

#[wasm_bindgen(start)]
pub fn wasm_start() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
    // Err only when a logger is already installed
    let _ = console_log::init_with_level(log::Level::Info);
}

/// Starts the game on the default page layout.
#[wasm_bindgen]
pub fn start_game() -> Result<(), JsValue> {
    app::start(GameConfig::default())?;
    Ok(())
}

/// Starts the game with a partial config object, e.g.
/// `start_game_with_config({ wordListUrl: "words.json" })`.
#[wasm_bindgen]
pub fn start_game_with_config(config: JsValue) -> Result<(), JsValue> {
    app::start(GameConfig::from_js(config)?)?;
    Ok(())
}

/// Canonical form of a typed token, as used for word-list lookups.
#[wasm_bindgen(js_name = canonical_word)]
pub fn canonical_word_js(raw: &str) -> String {
    canonical_word(raw)
}
