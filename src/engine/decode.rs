//! Decode DynamoDB dump files: a stream of JSON objects, one record each.

use anyhow::{Context, Result, bail};
use serde::Deserialize;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use crate::Record;
use crate::utils::config::INPUT_BUFFER_SIZE;

/// DynamoDB number attribute: `{"N": "123"}`.
#[derive(Debug, Default, Deserialize)]
struct NumberAttr {
    #[serde(rename = "N", default)]
    n: String,
}

/// DynamoDB string attribute: `{"S": "owner/name"}`.
#[derive(Debug, Default, Deserialize)]
struct StringAttr {
    #[serde(rename = "S", default)]
    s: String,
}

/// One dump line. Unknown attributes are ignored; missing ones decode as empty text.
#[derive(Debug, Deserialize)]
struct RawLine {
    #[serde(rename = "Ts", default)]
    ts: NumberAttr,
    #[serde(rename = "Stars", default)]
    stars: NumberAttr,
    #[serde(rename = "Repo", default)]
    repo: StringAttr,
}

/// Check that `text` is a plain decimal `u64`: ASCII digits only, no sign, no whitespace, no overflow.
pub fn validate_uint(text: &str) -> Result<u64> {
    if text.is_empty() {
        bail!("expected unsigned integer, got empty value");
    }
    if !text.bytes().all(|b| b.is_ascii_digit()) {
        bail!("expected unsigned integer, got {:?}", text);
    }
    text.parse::<u64>()
        .with_context(|| format!("unsigned integer out of range: {}", text))
}

impl TryFrom<RawLine> for Record {
    type Error = anyhow::Error;

    fn try_from(raw: RawLine) -> Result<Self> {
        validate_uint(&raw.ts.n).context("Ts")?;
        validate_uint(&raw.stars.n).context("Stars")?;
        Ok(Record {
            repo: raw.repo.s,
            ts: raw.ts.n,
            stars: raw.stars.n,
        })
    }
}

/// Decode every JSON object in `reader` and hand each validated record to `on_record`.
/// Stops at the first decode, validation or callback error. Returns the number of records.
pub fn decode_records<R, F>(reader: R, mut on_record: F) -> Result<usize>
where
    R: Read,
    F: FnMut(Record) -> Result<()>,
{
    let stream = serde_json::Deserializer::from_reader(reader).into_iter::<RawLine>();
    let mut count = 0_usize;
    for (i, raw) in stream.enumerate() {
        let raw = raw.with_context(|| format!("record {}: decode", i + 1))?;
        let record = Record::try_from(raw).with_context(|| format!("record {}", i + 1))?;
        on_record(record)?;
        count += 1;
    }
    Ok(count)
}

/// Open `path` and decode it with [`decode_records`]. Errors name the file.
pub fn decode_file<F>(path: &Path, on_record: F) -> Result<usize>
where
    F: FnMut(Record) -> Result<()>,
{
    let file = File::open(path).with_context(|| format!("open {}", path.display()))?;
    let reader = BufReader::with_capacity(INPUT_BUFFER_SIZE, file);
    decode_records(reader, on_record).with_context(|| format!("{}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn collect(input: &str) -> Result<Vec<Record>> {
        let mut out = Vec::new();
        decode_records(input.as_bytes(), |r| {
            out.push(r);
            Ok(())
        })?;
        Ok(out)
    }

    #[test]
    fn test_validate_uint_accepts_decimal() {
        assert_eq!(validate_uint("0").unwrap(), 0);
        assert_eq!(validate_uint("007").unwrap(), 7);
        assert_eq!(validate_uint("18446744073709551615").unwrap(), u64::MAX);
    }

    #[test]
    fn test_validate_uint_rejects() {
        for bad in ["", "abc", "+5", "-1", " 5", "5 ", "1.0", "18446744073709551616"] {
            assert!(validate_uint(bad).is_err(), "accepted {:?}", bad);
        }
    }

    #[test]
    fn test_decode_line_delimited() {
        let input = concat!(
            r#"{"Ts":{"N":"100"},"Stars":{"N":"5"},"Repo":{"S":"alpha"}}"#,
            "\n",
            r#"{"Ts":{"N":"200"},"Stars":{"N":"7"},"Repo":{"S":"beta"}}"#,
            "\n",
        );
        let got = collect(input).unwrap();
        assert_eq!(got.len(), 2);
        assert_eq!(got[0].fields(), ["alpha", "100", "5"]);
        assert_eq!(got[1].fields(), ["beta", "200", "7"]);
    }

    #[test]
    fn test_decode_concatenated_without_separator() {
        let input = r#"{"Ts":{"N":"1"},"Stars":{"N":"2"},"Repo":{"S":"a"}}{"Ts":{"N":"3"},"Stars":{"N":"4"},"Repo":{"S":"b"}}"#;
        assert_eq!(collect(input).unwrap().len(), 2);
    }

    #[test]
    fn test_decode_empty_input() {
        assert!(collect("").unwrap().is_empty());
        assert!(collect("  \n\t\n").unwrap().is_empty());
    }

    #[test]
    fn test_decode_ignores_unknown_fields() {
        let input = r#"{"Ts":{"N":"1"},"Stars":{"N":"2"},"Repo":{"S":"a"},"Extra":{"BOOL":true}}"#;
        assert_eq!(collect(input).unwrap()[0].fields(), ["a", "1", "2"]);
    }

    #[test]
    fn test_decode_missing_repo_is_empty() {
        let input = r#"{"Ts":{"N":"1"},"Stars":{"N":"2"}}"#;
        assert_eq!(collect(input).unwrap()[0].repo, "");
    }

    #[test]
    fn test_decode_missing_number_fails() {
        let input = r#"{"Stars":{"N":"2"},"Repo":{"S":"a"}}"#;
        assert!(collect(input).is_err());
    }

    #[test]
    fn test_decode_non_numeric_fails_with_record_index() {
        let input = concat!(
            r#"{"Ts":{"N":"1"},"Stars":{"N":"2"},"Repo":{"S":"a"}}"#,
            r#"{"Ts":{"N":"abc"},"Stars":{"N":"2"},"Repo":{"S":"b"}}"#,
        );
        let err = collect(input).unwrap_err();
        let chain = format!("{:#}", err);
        assert!(chain.contains("record 2"), "{}", chain);
        assert!(chain.contains("Ts"), "{}", chain);
    }

    #[test]
    fn test_decode_truncated_fails() {
        let input = r#"{"Ts":{"N":"1"},"Stars":{"N":"2"},"Repo":{"S":"a""#;
        assert!(collect(input).is_err());
    }

    #[test]
    fn test_decode_wrong_type_fails() {
        let input = r#"{"Ts":{"N":1},"Stars":{"N":"2"},"Repo":{"S":"a"}}"#;
        assert!(collect(input).is_err());
    }

    #[test]
    fn test_callback_error_stops_decode() {
        let input = concat!(
            r#"{"Ts":{"N":"1"},"Stars":{"N":"2"},"Repo":{"S":"a"}}"#,
            r#"{"Ts":{"N":"3"},"Stars":{"N":"4"},"Repo":{"S":"b"}}"#,
        );
        let mut seen = 0;
        let res = decode_records(input.as_bytes(), |_| {
            seen += 1;
            anyhow::bail!("sink closed")
        });
        assert!(res.is_err());
        assert_eq!(seen, 1);
    }
}
