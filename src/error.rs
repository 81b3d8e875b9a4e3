//! Error types for the site

use thiserror::Error;

pub type SiteResult<T> = Result<T, SiteError>;

#[derive(Error, Debug)]
pub enum SiteError {
    #[error("drawing surface not found: {0}")]
    SurfaceUnavailable(String),

    #[error("2D context unavailable on {0}")]
    ContextUnavailable(String),

    #[error("invalid content: {0}")]
    Content(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("browser error: {0}")]
    Js(String),
}

#[cfg(target_arch = "wasm32")]
impl From<wasm_bindgen::JsValue> for SiteError {
    fn from(value: wasm_bindgen::JsValue) -> Self {
        SiteError::Js(format!("{value:?}"))
    }
}

#[cfg(target_arch = "wasm32")]
impl From<SiteError> for wasm_bindgen::JsValue {
    fn from(err: SiteError) -> Self {
        wasm_bindgen::JsValue::from_str(&err.to_string())
    }
}
