//! Encoding pipeline: normalize → flatten → infer fields → assemble.

pub mod cell;
pub mod document;
pub mod fields;
pub mod flatten;
pub mod normalize;
pub mod writer;

pub use flatten::FlatRecord;

use crate::{options::Options, value::Value};

pub fn encode_value_to_string(value: &Value, options: &Options) -> String {
    let records: Vec<FlatRecord<'_>> = normalize::records(value)
        .iter()
        .map(|candidate| {
            if options.flatten {
                flatten::flatten_record(candidate)
            } else {
                flatten::shallow_record(candidate)
            }
        })
        .collect();
    let fields = fields::resolve_fields(&records, options);
    tracing::debug!(
        records = records.len(),
        fields = fields.len(),
        flatten = options.flatten,
        "encoding csv document"
    );
    document::assemble(&fields, &records, options)
}
