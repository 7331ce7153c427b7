#![cfg(feature = "json")]
use flatcsv::encode::{
    fields::infer_fields,
    flatten::{flatten_record, shallow_record},
    normalize::records,
};
use flatcsv::{Options, Value, encode};
use proptest::prelude::*;
use std::collections::HashSet;

fn arb_leaf() -> impl Strategy<Value = Value> {
    prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::from),
        any::<i64>().prop_map(Value::from),
        (-1.0e6f64..1.0e6).prop_map(Value::from),
        "[a-z ,\"\n\r;|]{0,8}".prop_map(Value::from),
    ]
}

fn arb_value() -> impl Strategy<Value = Value> {
    arb_leaf().prop_recursive(4, 32, 4, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..4).prop_map(Value::Array),
            prop::collection::vec(("[a-c]{1,2}", inner), 0..4).prop_map(Value::Object),
        ]
    })
}

fn arb_records() -> impl Strategy<Value = Value> {
    prop::collection::vec(arb_value(), 0..6).prop_map(Value::Array)
}

fn arb_delimiter() -> impl Strategy<Value = &'static str> {
    prop_oneof![Just(","), Just(";"), Just("|"), Just("\t")]
}

fn parse(doc: &str, delimiter: &str) -> Vec<csv::StringRecord> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .delimiter(delimiter.as_bytes()[0])
        .from_reader(doc.as_bytes());
    reader.records().map(|r| r.expect("well-formed csv")).collect()
}

proptest! {
    #[test]
    fn encoding_is_deterministic(v in arb_records(), delim in arb_delimiter()) {
        let opts = Options::default().with_delimiter(delim);
        prop_assert_eq!(encode(&v, &opts), encode(&v, &opts.clone()));
    }

    #[test]
    fn field_list_is_unique_first_seen_keys(v in arb_records()) {
        let recs: Vec<_> = records(&v).iter().map(flatten_record).collect();
        let fields = infer_fields(&recs);
        let mut seen = HashSet::new();
        let mut expected = Vec::new();
        for rec in &recs {
            for k in rec.keys() {
                if seen.insert(k) {
                    expected.push(k.to_string());
                }
            }
        }
        prop_assert_eq!(fields, expected);
    }

    #[test]
    fn every_row_has_one_cell_per_field(v in arb_records(), delim in arb_delimiter()) {
        let opts = Options::default().with_delimiter(delim);
        let doc = encode(&v, &opts);
        let recs: Vec<_> = records(&v).iter().map(flatten_record).collect();
        let fields = infer_fields(&recs);
        let rows = parse(&doc, delim);
        if fields.is_empty() {
            prop_assert_eq!(doc, "");
        } else {
            // csv readers skip blank lines, which a lone empty cell produces
            if fields.len() > 1 {
                prop_assert_eq!(rows.len(), recs.len() + 1);
            }
            for row in &rows {
                prop_assert_eq!(row.len(), fields.len());
            }
            let header: Vec<&str> = rows[0].iter().collect();
            prop_assert_eq!(header, fields.iter().map(String::as_str).collect::<Vec<_>>());
        }
    }

    #[test]
    fn unflattened_rows_keep_nested_cells_as_json(v in arb_records(), delim in arb_delimiter()) {
        let opts = Options::default().with_delimiter(delim).with_flatten(false);
        let doc = encode(&v, &opts);
        let recs: Vec<_> = records(&v).iter().map(shallow_record).collect();
        let fields = infer_fields(&recs);
        if fields.is_empty() {
            prop_assert_eq!(doc, "");
        } else {
            let rows = parse(&doc, delim);
            for row in &rows {
                prop_assert_eq!(row.len(), fields.len());
            }
            let header: Vec<&str> = rows[0].iter().collect();
            prop_assert_eq!(header, fields.iter().map(String::as_str).collect::<Vec<_>>());
            if fields.len() > 1 {
                prop_assert_eq!(rows.len(), recs.len() + 1);
                for (rec, row) in recs.iter().zip(&rows[1..]) {
                    for (field, cell) in fields.iter().zip(row.iter()) {
                        if let Some(nested) = rec.get(field).filter(|c| c.is_container()) {
                            let parsed: serde_json::Value = serde_json::from_str(cell)
                                .map_err(|e| TestCaseError::fail(e.to_string()))?;
                            prop_assert_eq!(parsed.is_array(), matches!(nested, Value::Array(_)));
                            prop_assert_eq!(parsed.is_object(), matches!(nested, Value::Object(_)));
                        }
                    }
                }
            }
        }
    }

    #[test]
    fn flat_records_hold_only_scalars(v in arb_value()) {
        let rec = flatten_record(&v);
        for (_, cell) in rec.iter() {
            prop_assert!(!cell.is_container());
        }
    }
}
