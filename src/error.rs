use thiserror::Error;
use wasm_bindgen::JsValue;

#[derive(Debug, Error)]
pub enum Error {
    #[error("HTTP client error: {0}")]
    Http(String),

    #[error("unexpected HTTP status {status} from {url}")]
    Status { status: u16, url: String },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("DOM error: {0}")]
    Dom(String),

    #[error("invalid config: {0}")]
    Config(String),
}

impl Error {
    /// Wraps a thrown JS value (fetch rejection, DOM exception) as an HTTP error.
    pub(crate) fn http(value: JsValue) -> Self {
        Error::Http(describe_js(&value))
    }

    pub(crate) fn dom(value: JsValue) -> Self {
        Error::Dom(describe_js(&value))
    }
}

impl From<Error> for JsValue {
    fn from(err: Error) -> Self {
        JsValue::from_str(&err.to_string())
    }
}

fn describe_js(value: &JsValue) -> String {
    value.as_string().unwrap_or_else(|| format!("{value:?}"))
}

pub type Result<T> = std::result::Result<T, Error>;
