use std::fs::{self, File};
use std::io::{Read, Write, stdin, stdout};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{ArgAction, Parser, ValueEnum};
use flatcsv::sink::{FileSink, WriterSink};
use flatcsv::{Delimiter, Download, LineEnding, Options};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum DelimArg {
    Comma,
    Semicolon,
    Tab,
    Pipe,
}

#[derive(Parser, Debug)]
#[command(name = "flatcsv", about = "Convert JSON to CSV, flattening nested values", version)]
struct Args {
    /// Named cell delimiter
    #[arg(long, value_enum, conflicts_with = "delimiter_str")]
    delimiter: Option<DelimArg>,

    /// Arbitrary delimiter text, e.g. "::"
    #[arg(long)]
    delimiter_str: Option<String>,

    /// Omit the header row
    #[arg(long)]
    no_header: bool,

    /// Keep nested values as JSON cells instead of flattening them
    #[arg(long)]
    no_flatten: bool,

    /// Explicit, ordered column list
    #[arg(long, value_delimiter = ',')]
    fields: Option<Vec<String>>,

    /// Use \r\n line endings
    #[arg(long)]
    crlf: bool,

    /// Write `null` for null and missing cells instead of leaving them empty
    #[arg(long)]
    null_literal: bool,

    /// Prefix the output with a UTF-8 byte-order mark
    #[arg(long)]
    bom: bool,

    /// JSON options file (camelCase keys); flags given on the command line win
    #[arg(long)]
    config: Option<PathBuf>,

    /// Write to this file instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,

    /// Input file (defaults to stdin)
    input: Option<PathBuf>,
}

impl Args {
    fn options(&self) -> Result<Options> {
        let mut options = match &self.config {
            Some(path) => {
                let text = fs::read_to_string(path)
                    .with_context(|| format!("reading config {}", path.display()))?;
                Options::from_json_str(&text)
                    .with_context(|| format!("parsing config {}", path.display()))?
            }
            None => Options::default(),
        };

        if let Some(d) = self.delimiter {
            options.delimiter = match d {
                DelimArg::Comma => Delimiter::Comma,
                DelimArg::Semicolon => Delimiter::Semicolon,
                DelimArg::Tab => Delimiter::Tab,
                DelimArg::Pipe => Delimiter::Pipe,
            };
        }
        if let Some(s) = &self.delimiter_str {
            options.delimiter = Delimiter::from(s.as_str());
        }
        if self.no_header {
            options.header = false;
        }
        if self.no_flatten {
            options.flatten = false;
        }
        if let Some(fields) = &self.fields {
            options.fields = Some(fields.clone());
        }
        if self.crlf {
            options.line_ending = LineEnding::CrLf;
        }
        if self.null_literal {
            options.null_as_empty = false;
        }
        if self.bom {
            options.include_bom = true;
        }
        Ok(options)
    }
}

fn init_logging(verbose: u8) {
    let filter = match verbose {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    let mut buf = String::new();
    let source = args
        .input
        .as_ref()
        .map_or_else(|| "<stdin>".to_owned(), |p| p.display().to_string());
    match &args.input {
        Some(path) => {
            let mut f =
                File::open(path).with_context(|| format!("opening {}", path.display()))?;
            f.read_to_string(&mut buf)?;
        }
        None => {
            stdin().read_to_string(&mut buf)?;
        }
    }

    let options = args.options()?;
    let json: serde_json::Value = serde_json::from_str(&buf).context("input is not valid JSON")?;
    let value = flatcsv::Value::from(json);
    tracing::info!(input = %source, bytes = buf.len(), "read input");

    match &args.output {
        Some(path) => {
            let filename = path
                .file_name()
                .and_then(|n| n.to_str())
                .context("output path has no file name")?;
            let dir = match path.parent() {
                Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
                _ => PathBuf::from("."),
            };
            let download = Download::default().with_filename(filename);
            tracing::info!(output = %path.display(), "writing csv");
            let mut sink = FileSink::new(dir);
            flatcsv::export(&value, &options, &download, &mut sink)?;
        }
        None => {
            tracing::info!(output = "<stdout>", "writing csv");
            let mut sink = WriterSink::new(stdout().lock());
            flatcsv::export(&value, &options, &Download::default(), &mut sink)?;
            writeln!(sink.into_inner())?;
        }
    }

    Ok(())
}
