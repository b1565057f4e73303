#![forbid(unsafe_code)]

use core::fmt;

use wasm_bindgen::JsValue;

/// DOM-side failure.
///
/// Never shown to the end user; logged, or returned to the embedding script
/// from the exported API.
#[derive(Debug, Clone)]
pub enum WebError {
    /// A DOM call threw.
    Dom(JsValue),
    /// A required global or node is absent (no `window`, no `<body>`, ...).
    Missing(&'static str),
    /// A node has an unexpected element type.
    WrongType(&'static str),
}

impl fmt::Display for WebError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Dom(value) => match value.as_string() {
                Some(msg) => write!(f, "DOM operation failed: {msg}"),
                None => write!(f, "DOM operation failed: {value:?}"),
            },
            Self::Missing(what) => write!(f, "missing {what}"),
            Self::WrongType(what) => write!(f, "unexpected element type for {what}"),
        }
    }
}

impl std::error::Error for WebError {}

impl From<JsValue> for WebError {
    fn from(value: JsValue) -> Self {
        Self::Dom(value)
    }
}

impl From<WebError> for JsValue {
    fn from(err: WebError) -> Self {
        match err {
            WebError::Dom(value) => value,
            other => JsValue::from_str(&other.to_string()),
        }
    }
}
