use chrono::DateTime;
use flatcsv::{Number, Value};
use js_sys::{Array, BigInt, Date, Object, Reflect};
use wasm_bindgen::{JsCast, JsValue};

/// Largest integer a JS number holds exactly.
const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_991.0;

/// Placeholder for a reference back to an enclosing object or array.
pub const CIRCULAR: &str = "[circular]";

/// Converts a live JavaScript value into a [`Value`].
///
/// `Date` becomes an instant (an invalid date becomes null), `BigInt` keeps
/// its exact digits, plain objects contribute their own enumerable string
/// keys in property order. Functions and symbols become null.
pub fn from_js(value: &JsValue) -> Result<Value, JsValue> {
    let mut ancestors = Vec::new();
    convert(value, &mut ancestors)
}

fn convert(value: &JsValue, ancestors: &mut Vec<JsValue>) -> Result<Value, JsValue> {
    if value.is_undefined() || value.is_null() {
        return Ok(Value::Null);
    }
    if let Some(b) = value.as_bool() {
        return Ok(Value::Bool(b));
    }
    if let Some(n) = value.as_f64() {
        return Ok(Value::Number(number(n)));
    }
    if let Some(s) = value.as_string() {
        return Ok(Value::String(s));
    }
    if let Some(big) = value.dyn_ref::<BigInt>() {
        let digits: String = big.to_string(10)?.into();
        return Ok(Value::Number(Number::Big(digits)));
    }
    if let Some(date) = value.dyn_ref::<Date>() {
        let millis = date.get_time();
        if millis.is_nan() {
            return Ok(Value::Null);
        }
        return Ok(DateTime::from_timestamp_millis(millis as i64).map_or(Value::Null, Value::Instant));
    }
    if !value.is_object() {
        return Ok(Value::Null);
    }
    if ancestors.iter().any(|a| Object::is(a, value)) {
        web_sys::console::warn_1(&JsValue::from_str("flatcsv: circular reference replaced"));
        return Ok(Value::String(CIRCULAR.to_owned()));
    }

    ancestors.push(value.clone());
    let out = if Array::is_array(value) {
        let array = Array::from(value);
        let mut items = Vec::with_capacity(array.length() as usize);
        for item in array.iter() {
            items.push(convert(&item, ancestors)?);
        }
        Value::Array(items)
    } else {
        let obj: &Object = value.unchecked_ref();
        let keys = Object::keys(obj);
        let mut entries = Vec::with_capacity(keys.length() as usize);
        for key in keys.iter() {
            let key_str = key
                .as_string()
                .ok_or_else(|| JsValue::from_str("Object keys must be strings"))?;
            let item = Reflect::get(obj, &key)?;
            entries.push((key_str, convert(&item, ancestors)?));
        }
        Value::Object(entries)
    };
    ancestors.pop();
    Ok(out)
}

fn number(n: f64) -> Number {
    if n.fract() == 0.0 && n.abs() <= MAX_SAFE_INTEGER {
        Number::I64(n as i64)
    } else {
        Number::F64(n)
    }
}
