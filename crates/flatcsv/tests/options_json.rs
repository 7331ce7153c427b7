#![cfg(feature = "json")]
use flatcsv::{Delimiter, LineEnding, Options};

#[test]
fn options_defaults() {
    let opts = Options::default();
    assert_eq!(opts.delimiter, Delimiter::Comma);
    assert!(opts.header);
    assert!(opts.flatten);
    assert!(opts.fields.is_none());
    assert_eq!(opts.line_ending, LineEnding::Lf);
    assert!(opts.null_as_empty);
    assert!(!opts.include_bom);
}

#[test]
fn camel_case_keys_are_read() -> Result<(), Box<dyn std::error::Error>> {
    let opts = Options::from_json_str(
        r#"{"delimiter": ";", "header": false, "lineEnding": "\r\n",
            "nullAsEmpty": false, "includeBom": true, "fields": ["a", "b"]}"#,
    )?;
    assert_eq!(opts.delimiter, Delimiter::Semicolon);
    assert!(!opts.header);
    assert_eq!(opts.line_ending, LineEnding::CrLf);
    assert!(!opts.null_as_empty);
    assert!(opts.include_bom);
    assert_eq!(opts.fields, Some(vec!["a".to_string(), "b".to_string()]));
    Ok(())
}

#[test]
fn unknown_keys_are_ignored_and_missing_keys_default() -> Result<(), Box<dyn std::error::Error>> {
    let opts = Options::from_json_str(r#"{"flatten": false, "colour": "blue"}"#)?;
    assert!(!opts.flatten);
    assert_eq!(opts, Options::default().with_flatten(false));
    Ok(())
}

#[test]
fn custom_delimiter_text() -> Result<(), Box<dyn std::error::Error>> {
    let opts = Options::from_json_str(r#"{"delimiter": "||"}"#)?;
    assert_eq!(opts.delimiter, Delimiter::Custom("||".into()));
    Ok(())
}

#[test]
fn bad_line_ending_is_a_config_error() {
    let err = Options::from_json_str(r#"{"lineEnding": "\r"}"#).unwrap_err();
    assert!(err.to_string().contains("lineEnding"));
}
