//! Delivery of a finished document.
//!
//! Encoding never touches the outside world; a [`Sink`] receives the
//! complete payload together with a suggested filename and content type and
//! performs the transfer.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use crate::{options::Options, value::Value};

pub const DEFAULT_FILENAME: &str = "export.csv";
pub const DEFAULT_CONTENT_TYPE: &str = "text/csv;charset=utf-8";

pub trait Sink {
    type Error;

    fn deliver(
        &mut self,
        payload: &str,
        filename: &str,
        content_type: &str,
    ) -> Result<(), Self::Error>;
}

/// Filename and content type handed to the sink.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Download {
    pub filename: String,
    pub content_type: String,
}

impl Default for Download {
    fn default() -> Self {
        Self {
            filename: DEFAULT_FILENAME.to_owned(),
            content_type: DEFAULT_CONTENT_TYPE.to_owned(),
        }
    }
}

impl Download {
    pub fn with_filename(mut self, filename: impl Into<String>) -> Self {
        self.filename = filename.into();
        self
    }

    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = content_type.into();
        self
    }
}

/// Encodes `input` and hands the document to `sink` exactly once.
pub fn export<S: Sink + ?Sized>(
    input: &Value,
    options: &Options,
    download: &Download,
    sink: &mut S,
) -> Result<(), S::Error> {
    let payload = crate::encode(input, options);
    tracing::debug!(
        bytes = payload.len(),
        filename = %download.filename,
        content_type = %download.content_type,
        "delivering csv document"
    );
    sink.deliver(&payload, &download.filename, &download.content_type)
}

/// Writes each delivered document to `<dir>/<filename>`.
///
/// Only the final component of the suggested filename is used, so a
/// delivery can never escape `dir`.
#[derive(Debug, Clone)]
pub struct FileSink {
    dir: PathBuf,
    last_path: Option<PathBuf>,
}

impl FileSink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            last_path: None,
        }
    }

    /// Path written by the most recent delivery.
    pub fn last_path(&self) -> Option<&Path> {
        self.last_path.as_deref()
    }
}

impl Sink for FileSink {
    type Error = crate::Error;

    fn deliver(&mut self, payload: &str, filename: &str, _content_type: &str) -> crate::Result<()> {
        let name = Path::new(filename).file_name().ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("no file name in {:?}", filename),
            )
        })?;
        let path = self.dir.join(name);
        fs::write(&path, payload)?;
        tracing::info!(path = %path.display(), "wrote csv export");
        self.last_path = Some(path);
        Ok(())
    }
}

/// Streams each delivered document into a writer, e.g. stdout.
#[derive(Debug)]
pub struct WriterSink<W> {
    writer: W,
}

impl<W: Write> WriterSink<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> Sink for WriterSink<W> {
    type Error = crate::Error;

    fn deliver(&mut self, payload: &str, _filename: &str, _content_type: &str) -> crate::Result<()> {
        self.writer.write_all(payload.as_bytes())?;
        self.writer.flush()?;
        Ok(())
    }
}
