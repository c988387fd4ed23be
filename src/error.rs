//! Crate error type
//!
//! Gameplay never fails: crashes and lost sessions are outcomes, not errors.
//! This covers the ambient layer only (configuration and browser glue).

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ArcadeError {
    /// Configuration JSON did not parse
    #[error("invalid configuration: {0}")]
    Config(#[from] serde_json::Error),

    /// Configuration file could not be read (native only)
    #[error("failed to read configuration file: {0}")]
    Io(#[from] std::io::Error),

    /// A page element the arcade attaches to is missing or has the wrong type
    #[error("page element `{0}` not found")]
    MissingElement(String),

    /// The browser threw while we called into it
    #[error("browser call failed: {0}")]
    Js(String),
}

#[cfg(target_arch = "wasm32")]
impl From<wasm_bindgen::JsValue> for ArcadeError {
    fn from(value: wasm_bindgen::JsValue) -> Self {
        ArcadeError::Js(format!("{:?}", value))
    }
}

pub type Result<T> = std::result::Result<T, ArcadeError>;
