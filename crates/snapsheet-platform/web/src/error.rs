use std::fmt;

use log::warn;
use wasm_bindgen::JsValue;

/// Failures while binding a sheet to the page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SheetError {
    NoWindow,
    NoDocument,
    NoBody,
    /// A required child of the sheet root is missing.
    MissingElement { selector: &'static str },
    /// A DOM call threw.
    Js(String),
}

impl fmt::Display for SheetError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SheetError::NoWindow => write!(f, "no global window exists"),
            SheetError::NoDocument => write!(f, "window has no document"),
            SheetError::NoBody => write!(f, "document has no body"),
            SheetError::MissingElement { selector } => {
                write!(f, "sheet root has no element matching '{}'", selector)
            }
            SheetError::Js(message) => write!(f, "DOM call failed: {}", message),
        }
    }
}

impl std::error::Error for SheetError {}

impl From<JsValue> for SheetError {
    fn from(value: JsValue) -> Self {
        SheetError::Js(describe(&value))
    }
}

/// Best-effort text for a thrown JS value.
pub(crate) fn describe(value: &JsValue) -> String {
    value.as_string().unwrap_or_else(|| format!("{:?}", value))
}

/// Logs a failed DOM side effect. These never abort the state machine.
pub(crate) fn warn_on_err<T>(context: &str, result: Result<T, JsValue>) {
    if let Err(err) = result {
        warn!("{} failed: {}", context, describe(&err));
    }
}
