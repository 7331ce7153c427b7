use std::io;

use thiserror::Error;

/// Errors raised at the edges of the encoder: reading options, building a
/// [`Value`](crate::Value) from serde types, and delivering a document.
/// Encoding itself never fails.
#[derive(Debug, Error)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[cfg(feature = "json")]
    #[error("serde_json error: {0}")]
    SerdeJson(#[from] serde_json::Error),

    #[error("invalid {option} option: {message}")]
    Config {
        option: &'static str,
        message: String,
    },

    #[error("{0}")]
    Message(String),
}

#[cfg(feature = "serde")]
impl serde::ser::Error for Error {
    fn custom<T: core::fmt::Display>(msg: T) -> Self {
        Error::Message(msg.to_string())
    }
}

pub type Result<T> = core::result::Result<T, Error>;
