//! JSON and JSON Lines seed files.
//!
//! Syntax errors fail the whole file. An element that is valid JSON but not
//! a valid record becomes a [`SchemaViolation`] naming its id (or its
//! position when it has none) and the offending field.

use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;

use medcontent_types::ContentRecord;
use serde_json::Value;

use crate::types::{ContentBatch, ContentError, ContentResult};
use crate::validate::SchemaViolation;

/// Reads a `.json` file holding an array of records.
pub fn read_json_file<P: AsRef<Path>>(path: P) -> ContentResult<ContentBatch> {
    let path = path.as_ref();
    let reader = open(path)?;
    read_json(reader, &path.display().to_string())
}

/// Reads a `.jsonl` file holding one record per line.
pub fn read_jsonl_file<P: AsRef<Path>>(path: P) -> ContentResult<ContentBatch> {
    let path = path.as_ref();
    let reader = open(path)?;
    read_jsonl(reader, &path.display().to_string())
}

/// Decodes a JSON array of records from a reader.
///
/// `location` names the source in error messages.
pub fn read_json<R: Read>(reader: R, location: &str) -> ContentResult<ContentBatch> {
    let elements: Vec<Value> =
        serde_json::from_reader(reader).map_err(|source| ContentError::Json {
            location: location.to_string(),
            source,
        })?;

    let mut batch = ContentBatch::default();
    for (index, element) in elements.into_iter().enumerate() {
        decode(element, format!("{}[{}]", location, index), &mut batch);
    }
    Ok(batch)
}

/// Decodes JSON Lines from a reader, skipping blank lines.
pub fn read_jsonl<R: BufRead>(reader: R, location: &str) -> ContentResult<ContentBatch> {
    let mut batch = ContentBatch::default();
    for (index, line) in reader.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let location = format!("{}:{}", location, index + 1);
        let element: Value = serde_json::from_str(&line).map_err(|source| ContentError::Json {
            location: location.clone(),
            source,
        })?;
        decode(element, location, &mut batch);
    }
    Ok(batch)
}

fn decode(element: Value, location: String, batch: &mut ContentBatch) {
    let record_id = element
        .get("id")
        .and_then(Value::as_str)
        .filter(|id| !id.trim().is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| location.clone());

    match serde_json::from_value::<ContentRecord>(element) {
        Ok(record) => batch.records.push(record),
        Err(source) => batch.failures.push(SchemaViolation::error(
            record_id,
            failed_field(&source),
            format!("{} (at {})", source, location),
        )),
    }
}

/// Field named by a decode error, or `record` when the error names none.
fn failed_field(error: &serde_json::Error) -> String {
    let message = error.to_string();
    message
        .strip_prefix("missing field `")
        .and_then(|rest| rest.split_once('`'))
        .map(|(field, _)| field.to_string())
        .unwrap_or_else(|| "record".to_string())
}

fn open(path: &Path) -> ContentResult<BufReader<File>> {
    if !path.exists() {
        return Err(ContentError::FileNotFound {
            path: path.display().to_string(),
        });
    }
    Ok(BufReader::new(File::open(path)?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use medcontent_types::ContentKind;

    const SLE: &str = r#"{"id":"systemic-lupus-erythematosus","kind":"condition","name":"Systemic Lupus Erythematosus (SLE)","category":"systemic","description":"Classic butterfly (malar) rash"}"#;
    const RA: &str = r#"{"id":"rheumatoid-arthritis","kind":"condition","name":"Rheumatoid Arthritis","category":"rheumatologic"}"#;

    #[test]
    fn test_read_json_array() {
        let data = format!("[{},{}]", SLE, RA);
        let batch = read_json(data.as_bytes(), "inline").unwrap();
        assert!(batch.failures.is_empty());
        assert_eq!(batch.records.len(), 2);
        assert_eq!(batch.records[0].id, "systemic-lupus-erythematosus");
        assert_eq!(batch.records[1].kind(), ContentKind::Condition);
    }

    #[test]
    fn test_read_jsonl_skips_blank_lines() {
        let data = format!("{}\n\n   \n{}\n", SLE, RA);
        let batch = read_jsonl(data.as_bytes(), "inline").unwrap();
        assert_eq!(batch.records.len(), 2);
    }

    #[test]
    fn test_jsonl_error_names_line() {
        let data = format!("{}\n{{\"id\": \"broken\"\n", SLE);
        match read_jsonl(data.as_bytes(), "extra.jsonl") {
            Err(ContentError::Json { location, .. }) => assert_eq!(location, "extra.jsonl:2"),
            other => panic!("expected Json error, got {:?}", other),
        }
    }

    #[test]
    fn test_unknown_kind_is_a_record_failure() {
        let data = r#"[{"id":"x","kind":"recipe","name":"X","category":"dessert"}]"#;
        let batch = read_json(data.as_bytes(), "inline").unwrap();
        assert!(batch.records.is_empty());
        assert_eq!(batch.failures[0].record_id, "x");
        assert_eq!(batch.failures[0].field, "record");
        assert!(batch.failures[0].is_error());
    }

    #[test]
    fn test_missing_field_names_record_and_field() {
        let data = format!(
            r#"[{},{{"id":"no-name","kind":"condition","category":"systemic"}}]"#,
            SLE
        );
        let batch = read_json(data.as_bytes(), "seed.json").unwrap();
        assert_eq!(batch.records.len(), 1);
        assert_eq!(batch.failures.len(), 1);

        let failure = &batch.failures[0];
        assert_eq!(failure.record_id, "no-name");
        assert_eq!(failure.field, "name");
        assert!(failure.message.contains("seed.json[1]"));
    }

    #[test]
    fn test_failure_without_id_uses_position() {
        let data = format!("{}\n{{\"kind\":\"ethics\",\"name\":\"X\",\"category\":\"principles\"}}\n", RA);
        let batch = read_jsonl(data.as_bytes(), "extra.jsonl").unwrap();
        assert_eq!(batch.records.len(), 1);
        assert_eq!(batch.failures[0].record_id, "extra.jsonl:2");
        assert_eq!(batch.failures[0].field, "id");
    }

    #[test]
    fn test_unknown_top_level_fields_are_ignored() {
        let data = r#"[{"id":"ra","kind":"condition","name":"RA","category":"rheumatologic","icd11Code":"FA20"}]"#;
        let batch = read_json(data.as_bytes(), "inline").unwrap();
        assert!(batch.failures.is_empty());
        let json = serde_json::to_value(&batch.records[0]).unwrap();
        assert!(json.get("icd11Code").is_none());
    }

    #[test]
    fn test_missing_file() {
        assert!(matches!(
            read_json_file("/nonexistent/seed.json"),
            Err(ContentError::FileNotFound { .. })
        ));
    }
}
