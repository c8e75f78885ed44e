//! Content file discovery and reading.

use std::fs;
use std::path::{Path, PathBuf};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::json::{read_json_file, read_jsonl_file};
use crate::tabular::{ConditionTable, EthicsTable, PainTable, TableParser};
use crate::types::{ContentBatch, ContentError, ContentFiles, ContentResult, FileFormat};

/// Discovers content files at a data path.
///
/// `path` may be a single content file or a directory. Directories are
/// scanned one level deep for `.json`, `.jsonl`, `conditions*.tsv`,
/// `pain*.tsv` and `ethics*.tsv`; other files are ignored. Files are
/// returned sorted by name so that load order is deterministic.
///
/// # Errors
/// Returns an error if the path does not exist or holds no content file.
pub fn discover_content_files<P: AsRef<Path>>(path: P) -> ContentResult<ContentFiles> {
    let path = path.as_ref();

    if path.is_file() {
        let format = file_name(path)
            .as_deref()
            .and_then(FileFormat::from_file_name)
            .ok_or_else(|| ContentError::NoContentFiles {
                path: path.display().to_string(),
            })?;
        return Ok(ContentFiles {
            files: vec![(path.to_path_buf(), format)],
        });
    }

    if !path.is_dir() {
        let looks_like_file = file_name(path)
            .as_deref()
            .and_then(FileFormat::from_file_name)
            .is_some();
        let path = path.display().to_string();
        return Err(if looks_like_file {
            ContentError::FileNotFound { path }
        } else {
            ContentError::DirectoryNotFound { path }
        });
    }

    let mut files = ContentFiles::new();
    for entry in fs::read_dir(path)? {
        let entry = entry?;
        if !entry.file_type()?.is_file() {
            continue;
        }
        let filename = entry.file_name();
        if let Some(format) = FileFormat::from_file_name(&filename.to_string_lossy()) {
            files.files.push((entry.path(), format));
        }
    }

    if files.is_empty() {
        return Err(ContentError::NoContentFiles {
            path: path.display().to_string(),
        });
    }

    files.files.sort_by(|(a, _), (b, _)| a.file_name().cmp(&b.file_name()));
    Ok(files)
}

/// Reads every record of a single content file.
///
/// JSON elements that do not decode as records are returned as failures
/// rather than failing the file.
pub fn read_content_file(path: &Path, format: FileFormat) -> ContentResult<ContentBatch> {
    let batch: ContentBatch = match format {
        FileFormat::Json => read_json_file(path)?,
        FileFormat::JsonLines => read_jsonl_file(path)?,
        FileFormat::ConditionTable => {
            TableParser::<_, ConditionTable>::from_path(path)?.parse_all()?.into()
        }
        FileFormat::PainTable => TableParser::<_, PainTable>::from_path(path)?.parse_all()?.into(),
        FileFormat::EthicsTable => {
            TableParser::<_, EthicsTable>::from_path(path)?.parse_all()?.into()
        }
    };
    tracing::debug!(
        path = %path.display(),
        ?format,
        records = batch.records.len(),
        failures = batch.failures.len(),
        "read content file"
    );
    Ok(batch)
}

/// Reads every discovered file and concatenates the records (and decode
/// failures) in discovery order.
///
/// With the `parallel` feature, files are decoded concurrently.
pub fn read_content_files(files: &ContentFiles) -> ContentResult<ContentBatch> {
    #[cfg(feature = "parallel")]
    let batches = files
        .files
        .par_iter()
        .map(|(path, format)| read_content_file(path, *format))
        .collect::<ContentResult<Vec<_>>>()?;

    #[cfg(not(feature = "parallel"))]
    let batches = files
        .files
        .iter()
        .map(|(path, format)| read_content_file(path, *format))
        .collect::<ContentResult<Vec<_>>>()?;

    let mut merged = ContentBatch::default();
    for batch in batches {
        merged.extend(batch);
    }
    Ok(merged)
}

fn file_name(path: &Path) -> Option<String> {
    path.file_name().map(|name| name.to_string_lossy().into_owned())
}

/// Returns the default seed file shipped with the repository, relative to
/// `root`.
pub fn default_seed_path<P: AsRef<Path>>(root: P) -> PathBuf {
    root.as_ref().join("data").join("seed.json")
}
