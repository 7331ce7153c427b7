use crate::encode::{cell, flatten::FlatRecord, writer::RowWriter};
use crate::options::Options;

/// Byte-order mark written ahead of the document when `include_bom` is set.
pub const BOM: char = '\u{feff}';

/// Joins the header and one row per record into the final document.
///
/// With no fields there is nothing to lay out: the result is the BOM (when
/// configured) or the empty string, whatever `header` says.
pub fn assemble(fields: &[String], records: &[FlatRecord<'_>], options: &Options) -> String {
    let mut w = RowWriter::new(&options.delimiter, options.line_ending);
    if options.include_bom {
        w.push_bom();
    }
    if fields.is_empty() {
        return w.into_string();
    }

    if options.header {
        w.row(fields);
    }
    for record in records {
        w.begin_row();
        for field in fields {
            let text = cell::render_cell(record.get(field), options.null_as_empty);
            w.cell(&text);
        }
    }
    w.into_string()
}
