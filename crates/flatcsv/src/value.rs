use core::fmt;

use chrono::{DateTime, Datelike, FixedOffset, Utc};

use crate::number::format_canonical_f64;

#[derive(Debug, Clone, PartialEq)]
pub enum Number {
    I64(i64),
    U64(u64),
    F64(f64),
    /// Integer wider than 64 bits, kept as its decimal digits.
    Big(String),
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Number::I64(i) => write!(f, "{}", i),
            Number::U64(u) => write!(f, "{}", u),
            Number::F64(num) if num.is_nan() => f.write_str("NaN"),
            Number::F64(num) if num.is_infinite() => {
                f.write_str(if *num > 0.0 { "Infinity" } else { "-Infinity" })
            }
            Number::F64(num) => f.write_str(&format_canonical_f64(*num)),
            Number::Big(digits) => f.write_str(digits),
        }
    }
}

/// A JSON-like input value.
///
/// Objects keep their entries in insertion order; that order drives column
/// order when fields are inferred.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Bool(bool),
    Number(Number),
    String(String),
    Instant(DateTime<Utc>),
    Array(Vec<Value>),
    Object(Vec<(String, Value)>),
}

impl Value {
    pub fn is_container(&self) -> bool {
        matches!(self, Value::Array(_) | Value::Object(_))
    }

    pub fn as_object(&self) -> Option<&[(String, Value)]> {
        match self {
            Value::Object(entries) => Some(entries),
            _ => None,
        }
    }

    /// Looks up an object entry. The last entry wins when a key repeats.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.as_object()?
            .iter()
            .rev()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v)
    }
}

/// Renders an instant as `YYYY-MM-DDTHH:MM:SS.mmmZ`. Years outside
/// `0..=9999` use the expanded form `±YYYYYY`.
pub fn format_instant(at: &DateTime<Utc>) -> String {
    let rest = at.format("%m-%dT%H:%M:%S%.3fZ");
    match at.year() {
        year @ 0..=9999 => format!("{:04}-{}", year, rest),
        year => {
            let sign = if year < 0 { '-' } else { '+' };
            format!("{}{:06}-{}", sign, year.unsigned_abs(), rest)
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i32> for Value {
    fn from(i: i32) -> Self {
        Value::Number(Number::I64(i as i64))
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Number(Number::I64(i))
    }
}

impl From<u32> for Value {
    fn from(u: u32) -> Self {
        Value::Number(Number::U64(u as u64))
    }
}

impl From<u64> for Value {
    fn from(u: u64) -> Self {
        Value::Number(Number::U64(u))
    }
}

impl From<i128> for Value {
    fn from(i: i128) -> Self {
        match i64::try_from(i) {
            Ok(small) => Value::Number(Number::I64(small)),
            Err(_) => Value::Number(Number::Big(i.to_string())),
        }
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Value::Number(Number::F64(f))
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_owned())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<DateTime<Utc>> for Value {
    fn from(at: DateTime<Utc>) -> Self {
        Value::Instant(at)
    }
}

impl From<DateTime<FixedOffset>> for Value {
    fn from(at: DateTime<FixedOffset>) -> Self {
        Value::Instant(at.with_timezone(&Utc))
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(opt: Option<T>) -> Self {
        opt.map_or(Value::Null, Into::into)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(items: Vec<T>) -> Self {
        Value::Array(items.into_iter().map(Into::into).collect())
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Value {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Value::Object(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

#[cfg(feature = "json")]
impl From<&serde_json::Value> for Value {
    fn from(v: &serde_json::Value) -> Self {
        match v {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Bool(*b),
            serde_json::Value::Number(n) => Value::Number(json_number(n)),
            serde_json::Value::String(s) => Value::String(s.clone()),
            serde_json::Value::Array(items) => Value::Array(items.iter().map(Value::from).collect()),
            serde_json::Value::Object(map) => Value::Object(
                map.iter()
                    .map(|(k, vv)| (k.clone(), Value::from(vv)))
                    .collect(),
            ),
        }
    }
}

#[cfg(feature = "json")]
impl From<serde_json::Value> for Value {
    fn from(v: serde_json::Value) -> Self {
        match v {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Bool(b),
            serde_json::Value::Number(n) => Value::Number(json_number(&n)),
            serde_json::Value::String(s) => Value::String(s),
            serde_json::Value::Array(items) => {
                Value::Array(items.into_iter().map(Value::from).collect())
            }
            serde_json::Value::Object(map) => Value::Object(
                map.into_iter()
                    .map(|(k, vv)| (k, Value::from(vv)))
                    .collect(),
            ),
        }
    }
}

#[cfg(feature = "json")]
fn json_number(n: &serde_json::Number) -> Number {
    if let Some(i) = n.as_i64() {
        Number::I64(i)
    } else if let Some(u) = n.as_u64() {
        Number::U64(u)
    } else {
        Number::F64(n.as_f64().unwrap_or(f64::NAN))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn number_display_covers_every_variant() {
        assert_eq!(Number::I64(-7).to_string(), "-7");
        assert_eq!(Number::U64(u64::MAX).to_string(), "18446744073709551615");
        assert_eq!(Number::F64(2.5).to_string(), "2.5");
        assert_eq!(Number::F64(10.0).to_string(), "10");
        assert_eq!(Number::F64(f64::NAN).to_string(), "NaN");
        assert_eq!(Number::F64(f64::NEG_INFINITY).to_string(), "-Infinity");
        assert_eq!(
            Number::Big("123456789012345678901234567890".into()).to_string(),
            "123456789012345678901234567890"
        );
    }

    #[test]
    fn instants_render_with_millis_and_zulu() {
        let at = Utc.with_ymd_and_hms(2024, 5, 1, 12, 34, 56).unwrap();
        assert_eq!(format_instant(&at), "2024-05-01T12:34:56.000Z");
    }

    #[test]
    fn out_of_range_years_use_expanded_form() {
        let far = Utc.with_ymd_and_hms(12000, 1, 1, 0, 0, 0).unwrap();
        assert_eq!(format_instant(&far), "+012000-01-01T00:00:00.000Z");
        let before = Utc.with_ymd_and_hms(-1, 6, 15, 1, 2, 3).unwrap();
        assert_eq!(format_instant(&before), "-000001-06-15T01:02:03.000Z");
        let edge = Utc.with_ymd_and_hms(9999, 12, 31, 23, 59, 59).unwrap();
        assert_eq!(format_instant(&edge), "9999-12-31T23:59:59.000Z");
        let zero = Utc.with_ymd_and_hms(0, 1, 1, 0, 0, 0).unwrap();
        assert_eq!(format_instant(&zero), "0000-01-01T00:00:00.000Z");
    }

    #[test]
    fn offset_instants_are_normalized_to_utc() {
        let east = FixedOffset::east_opt(2 * 3600).unwrap();
        let at = east.with_ymd_and_hms(2024, 1, 1, 2, 0, 0).unwrap();
        let Value::Instant(utc) = Value::from(at) else {
            panic!("expected instant");
        };
        assert_eq!(format_instant(&utc), "2024-01-01T00:00:00.000Z");
    }

    #[test]
    fn wide_integers_become_big_numbers() {
        assert_eq!(Value::from(5_i128), Value::Number(Number::I64(5)));
        assert_eq!(
            Value::from(i128::MAX),
            Value::Number(Number::Big(i128::MAX.to_string()))
        );
    }

    #[test]
    fn get_prefers_the_last_duplicate() {
        let v: Value = [("a", 1), ("a", 2)].into_iter().collect();
        assert_eq!(v.get("a"), Some(&Value::from(2)));
        assert_eq!(v.get("b"), None);
        assert_eq!(Value::Null.get("a"), None);
    }
}
