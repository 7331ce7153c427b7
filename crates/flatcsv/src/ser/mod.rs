//! Serde integration: building a [`Value`] from any `Serialize` type, and
//! serializing a [`Value`] back out (used for nested cells).

mod builder;

use serde::ser::{Error as _, Serialize, SerializeMap, SerializeSeq, Serializer};

use crate::value::{Number, Value, format_instant};

pub use builder::to_value;

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Value::Null => serializer.serialize_unit(),
            Value::Bool(b) => serializer.serialize_bool(*b),
            Value::Number(n) => n.serialize(serializer),
            Value::String(s) => serializer.serialize_str(s),
            Value::Instant(at) => serializer.serialize_str(&format_instant(at)),
            Value::Array(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
            Value::Object(entries) => {
                let mut map = serializer.serialize_map(Some(entries.len()))?;
                for (k, v) in entries {
                    map.serialize_entry(k, v)?;
                }
                map.end()
            }
        }
    }
}

impl Serialize for Number {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Number::I64(i) => serializer.serialize_i64(*i),
            Number::U64(u) => serializer.serialize_u64(*u),
            Number::F64(f) => serializer.serialize_f64(*f),
            // No portable wire form: JSON numbers stop at 64 bits in serde_json
            Number::Big(digits) => Err(S::Error::custom(format!(
                "integer {} does not fit in 64 bits",
                digits
            ))),
        }
    }
}
