use crate::encode::cell;
use crate::options::{Delimiter, LineEnding};

/// Accumulates delimited rows into one document.
///
/// Rows are separated by the line ending; no terminator follows the last
/// row.
pub struct RowWriter<'a> {
    out: String,
    delimiter: &'a str,
    line_ending: &'static str,
    rows: usize,
    cells: usize,
}

impl<'a> RowWriter<'a> {
    pub fn new(delimiter: &'a Delimiter, line_ending: LineEnding) -> Self {
        Self {
            out: String::new(),
            delimiter: delimiter.as_str(),
            line_ending: line_ending.as_str(),
            rows: 0,
            cells: 0,
        }
    }

    pub fn push_bom(&mut self) {
        self.out.push(super::document::BOM);
    }

    pub fn begin_row(&mut self) {
        if self.rows > 0 {
            self.out.push_str(self.line_ending);
        }
        self.rows += 1;
        self.cells = 0;
    }

    /// Writes one cell, escaping it against the active delimiter.
    pub fn cell(&mut self, text: &str) {
        if self.cells > 0 {
            self.out.push_str(self.delimiter);
        }
        self.cells += 1;
        cell::escape_into(&mut self.out, text, self.delimiter);
    }

    pub fn row<I, S>(&mut self, cells: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.begin_row();
        for c in cells {
            self.cell(c.as_ref());
        }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn into_string(self) -> String {
        self.out
    }
}
