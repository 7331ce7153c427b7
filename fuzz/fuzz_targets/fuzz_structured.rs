#![no_main]
use arbitrary::Arbitrary;
use flatcsv::{Number, Options, Value, encode};
use libfuzzer_sys::fuzz_target;

const MAX_DEPTH: usize = 8;
const MAX_ITEMS: usize = 20;

#[derive(Arbitrary, Debug)]
struct Input {
    delimiter: String,
    flatten: bool,
    header: bool,
    fields: Option<Vec<String>>,
    seed: Vec<u8>,
}

fn build(u: &mut arbitrary::Unstructured, depth: usize) -> arbitrary::Result<Value> {
    let choice: u8 = if depth >= MAX_DEPTH { u.int_in_range(0..=4)? } else { u.arbitrary()? };
    Ok(match choice % 8 {
        0 => Value::Null,
        1 => Value::Bool(u.arbitrary()?),
        2 => Value::Number(Number::I64(u.arbitrary()?)),
        3 => Value::Number(Number::F64(u.arbitrary()?)),
        4 => Value::String(u.arbitrary()?),
        5 => Value::Number(Number::Big(u.arbitrary()?)),
        6 => {
            let len = u.int_in_range(0..=MAX_ITEMS)?;
            let mut items = Vec::with_capacity(len);
            for _ in 0..len {
                items.push(build(u, depth + 1)?);
            }
            Value::Array(items)
        }
        _ => {
            let len = u.int_in_range(0..=MAX_ITEMS)?;
            let mut entries = Vec::with_capacity(len);
            for _ in 0..len {
                entries.push((u.arbitrary()?, build(u, depth + 1)?));
            }
            Value::Object(entries)
        }
    })
}

fuzz_target!(|input: Input| {
    let mut u = arbitrary::Unstructured::new(&input.seed);
    let Ok(value) = build(&mut u, 0) else {
        return;
    };
    let opts = Options {
        delimiter: input.delimiter.into(),
        flatten: input.flatten,
        header: input.header,
        fields: input.fields,
        ..Options::default()
    };
    // Total: any value and any options produce a document.
    let _ = encode(&value, &opts);
});
