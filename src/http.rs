//! Minimal GET-only HTTP seam. `BrowserHttp` goes through `window.fetch`;
//! tests substitute their own client.

use std::future::Future;

use js_sys::Uint8Array;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Response, window};

use crate::error::{Error, Result};

// Futures are not `Send`: JS promises are bound to the main thread.
pub trait HttpClient {
    fn get(&self, url: &str) -> impl Future<Output = Result<Vec<u8>>>;
}

impl<T: HttpClient> HttpClient for &T {
    fn get(&self, url: &str) -> impl Future<Output = Result<Vec<u8>>> {
        (**self).get(url)
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct BrowserHttp;

impl HttpClient for BrowserHttp {
    async fn get(&self, url: &str) -> Result<Vec<u8>> {
        let win = window().ok_or_else(|| Error::Http("no window".into()))?;
        let resp_value = JsFuture::from(win.fetch_with_str(url))
            .await
            .map_err(Error::http)?;
        let resp: Response = resp_value.dyn_into().map_err(Error::http)?;
        if !resp.ok() {
            return Err(Error::Status {
                status: resp.status(),
                url: url.to_string(),
            });
        }
        let buf = JsFuture::from(resp.array_buffer().map_err(Error::http)?)
            .await
            .map_err(Error::http)?;
        Ok(Uint8Array::new(&buf).to_vec())
    }
}
