use crate::error::Error;

/// Cell separator. Anything other than the named variants is carried as
/// [`Delimiter::Custom`] and may span several characters.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize), serde(from = "String"))]
pub enum Delimiter {
    #[default]
    Comma,
    Semicolon,
    Tab,
    Pipe,
    Custom(String),
}

impl Delimiter {
    pub fn as_str(&self) -> &str {
        match self {
            Delimiter::Comma => ",",
            Delimiter::Semicolon => ";",
            Delimiter::Tab => "\t",
            Delimiter::Pipe => "|",
            Delimiter::Custom(s) => s,
        }
    }
}

impl From<&str> for Delimiter {
    fn from(s: &str) -> Self {
        match s {
            "," => Delimiter::Comma,
            ";" => Delimiter::Semicolon,
            "\t" => Delimiter::Tab,
            "|" => Delimiter::Pipe,
            other => Delimiter::Custom(other.to_owned()),
        }
    }
}

impl From<String> for Delimiter {
    fn from(s: String) -> Self {
        match Delimiter::from(s.as_str()) {
            Delimiter::Custom(_) => Delimiter::Custom(s),
            named => named,
        }
    }
}

impl From<char> for Delimiter {
    fn from(c: char) -> Self {
        Delimiter::from(c.encode_utf8(&mut [0; 4]) as &str)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize), serde(try_from = "String"))]
pub enum LineEnding {
    #[default]
    Lf,
    CrLf,
}

impl LineEnding {
    pub fn as_str(self) -> &'static str {
        match self {
            LineEnding::Lf => "\n",
            LineEnding::CrLf => "\r\n",
        }
    }
}

impl TryFrom<&str> for LineEnding {
    type Error = Error;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        match s {
            "\n" => Ok(LineEnding::Lf),
            "\r\n" => Ok(LineEnding::CrLf),
            other => Err(Error::Config {
                option: "lineEnding",
                message: format!("expected \"\\n\" or \"\\r\\n\", got {:?}", other),
            }),
        }
    }
}

impl TryFrom<String> for LineEnding {
    type Error = Error;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        LineEnding::try_from(s.as_str())
    }
}

/// Encoder configuration.
///
/// When read from JSON the keys are camelCase (`lineEnding`, `nullAsEmpty`,
/// `includeBom`); unknown keys are ignored and missing keys keep their
/// defaults.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Deserialize),
    serde(default, rename_all = "camelCase")
)]
pub struct Options {
    pub delimiter: Delimiter,
    /// Emit the header row (default: true)
    pub header: bool,
    /// Deep-flatten nested values into dotted paths (default: true)
    pub flatten: bool,
    /// Explicit column list; `None` infers columns from the records
    pub fields: Option<Vec<String>>,
    pub line_ending: LineEnding,
    /// Render null and missing values as empty cells (default: true)
    pub null_as_empty: bool,
    /// Prefix the document with U+FEFF (default: false)
    pub include_bom: bool,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            delimiter: Delimiter::default(),
            header: true,
            flatten: true,
            fields: None,
            line_ending: LineEnding::default(),
            null_as_empty: true,
            include_bom: false,
        }
    }
}

impl Options {
    pub fn with_delimiter(mut self, delimiter: impl Into<Delimiter>) -> Self {
        self.delimiter = delimiter.into();
        self
    }

    pub fn with_header(mut self, header: bool) -> Self {
        self.header = header;
        self
    }

    pub fn with_flatten(mut self, flatten: bool) -> Self {
        self.flatten = flatten;
        self
    }

    pub fn with_fields<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.fields = Some(fields.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_line_ending(mut self, line_ending: LineEnding) -> Self {
        self.line_ending = line_ending;
        self
    }

    pub fn with_null_as_empty(mut self, null_as_empty: bool) -> Self {
        self.null_as_empty = null_as_empty;
        self
    }

    pub fn with_bom(mut self, include_bom: bool) -> Self {
        self.include_bom = include_bom;
        self
    }

    /// Reads options from a JSON object such as
    /// `{"delimiter": ";", "lineEnding": "\r\n"}`.
    #[cfg(feature = "json")]
    pub fn from_json_str(s: &str) -> crate::Result<Self> {
        Ok(serde_json::from_str(s)?)
    }
}
