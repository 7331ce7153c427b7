#![doc = include_str!("../README.md")]

pub mod encode;
pub mod error;
mod number;
pub mod options;
pub mod sink;
pub mod value;

#[cfg(feature = "serde")]
pub mod ser;

pub use crate::encode::FlatRecord;
pub use crate::error::{Error, Result};
pub use crate::options::{Delimiter, LineEnding, Options};
pub use crate::sink::{Download, Sink, export};
pub use crate::value::{Number, Value};

#[cfg(feature = "serde")]
use serde::Serialize;

/// Encodes any value as a CSV document. Never fails: unusual input
/// degrades to empty or placeholder cells.
pub fn encode(input: &Value, options: &Options) -> String {
    crate::encode::encode_value_to_string(input, options)
}

#[cfg(feature = "json")]
pub fn encode_json(input: &serde_json::Value, options: &Options) -> String {
    encode(&Value::from(input), options)
}

#[cfg(feature = "serde")]
pub fn encode_to_string<T: Serialize + ?Sized>(value: &T, options: &Options) -> Result<String> {
    let v = crate::ser::to_value(value)?;
    Ok(encode(&v, options))
}

#[cfg(feature = "serde")]
pub fn encode_to_writer<W: std::io::Write, T: Serialize + ?Sized>(
    mut writer: W,
    value: &T,
    options: &Options,
) -> Result<()> {
    let s = encode_to_string(value, options)?;
    writer.write_all(s.as_bytes())?;
    Ok(())
}
