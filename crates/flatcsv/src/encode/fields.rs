use std::collections::HashSet;

use crate::encode::flatten::FlatRecord;
use crate::options::Options;

/// Union of all record keys in first-seen order.
pub fn infer_fields(records: &[FlatRecord<'_>]) -> Vec<String> {
    let mut seen: HashSet<&str> = HashSet::new();
    let mut order = Vec::new();
    for record in records {
        for key in record.keys() {
            if seen.insert(key) {
                order.push(key.to_owned());
            }
        }
    }
    order
}

/// Explicit `fields` win verbatim; otherwise the columns are inferred.
pub fn resolve_fields(records: &[FlatRecord<'_>], options: &Options) -> Vec<String> {
    match &options.fields {
        Some(fields) => fields.clone(),
        None => infer_fields(records),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encode::flatten::flatten_record;
    use crate::value::Value;

    #[test]
    fn first_seen_order_across_records() {
        let a: Value = [("x", 1), ("y", 2)].into_iter().collect();
        let b: Value = [("z", 3), ("x", 4)].into_iter().collect();
        let recs = vec![flatten_record(&a), flatten_record(&b)];
        assert_eq!(infer_fields(&recs), ["x", "y", "z"]);
    }

    #[test]
    fn explicit_fields_are_used_verbatim() {
        let a: Value = [("x", 1), ("y", 2)].into_iter().collect();
        let recs = vec![flatten_record(&a)];
        let opts = Options::default().with_fields(["missing", "x"]);
        assert_eq!(resolve_fields(&recs, &opts), ["missing", "x"]);
    }

    #[test]
    fn no_records_no_fields() {
        assert!(infer_fields(&[]).is_empty());
    }
}
