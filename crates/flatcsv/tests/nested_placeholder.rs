use flatcsv::{Number, Options, Value, encode};

fn big(digits: &str) -> Value {
    Value::Number(Number::Big(digits.to_owned()))
}

#[test]
fn big_integers_render_exactly_when_flattened() {
    let v: Value = [("n", big("123456789012345678901234567890"))].into_iter().collect();
    assert_eq!(encode(&v, &Options::default()), "n\n123456789012345678901234567890");
}

#[test]
fn unserializable_nested_cell_degrades_instead_of_failing() {
    let inner: Value = [("n", big("123456789012345678901234567890"))].into_iter().collect();
    let v: Value = [("id", Value::from(1)), ("inner", inner)].into_iter().collect();
    let opts = Options::default().with_flatten(false);
    assert_eq!(encode(&v, &opts), "id,inner\n1,[object]");
}

#[test]
fn non_finite_floats_have_names() {
    let v = Value::from(vec![f64::NAN, f64::INFINITY, f64::NEG_INFINITY]);
    assert_eq!(encode(&v, &Options::default()), "value\nNaN\nInfinity\n-Infinity");
}

fn deep(levels: usize) -> Value {
    let mut v = Value::from(1);
    for _ in 0..levels {
        v = [("a", v)].into_iter().collect();
    }
    v
}

#[test]
fn deeply_nested_cell_degrades_on_a_small_stack() {
    let handle = std::thread::Builder::new()
        .stack_size(2 << 20)
        .spawn(|| {
            let v: Value = [("id", Value::from(7)), ("a", deep(5_000))].into_iter().collect();
            encode(&v, &Options::default().with_flatten(false))
        })
        .unwrap();
    assert_eq!(handle.join().unwrap(), "id,a\n7,[object]");
}

#[cfg(feature = "json")]
#[test]
fn moderately_nested_cell_is_still_json() {
    let v: Value = [("a", deep(3))].into_iter().collect();
    let opts = Options::default().with_flatten(false);
    assert_eq!(encode(&v, &opts), "a\n\"{\"\"a\"\":{\"\"a\"\":{\"\"a\"\":1}}}\"");
}
