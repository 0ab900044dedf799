//! Loading source documents from disk.
//!
//! Explicit files are read as-is and keyed by their file stem. Directories
//! are walked recursively, filtered by extension, and each file is keyed by
//! its path relative to the walked root (with `/` separators). The result is
//! sorted by document id so every run sees the corpus in the same order.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::debug;
use walkdir::WalkDir;

/// One input document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceDocument {
    pub doc_id: String,
    pub path: PathBuf,
    pub text: String,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CorpusError {
    #[error("path does not exist: {0}")]
    MissingPath(PathBuf),
    #[error("failed to read {path}: {message}")]
    Io { path: PathBuf, message: String },
    #[error("failed to walk {root}: {message}")]
    Walk { root: PathBuf, message: String },
    #[error("document id '{id}' is used by both {first} and {second}")]
    DuplicateId {
        id: String,
        first: PathBuf,
        second: PathBuf,
    },
}

/// Read every document under `paths`.
///
/// `extensions` filters files found while walking directories; matching is
/// case-insensitive and a leading `.` is ignored. An empty list accepts every
/// file. Explicit file paths are never filtered. Bytes that are not valid
/// UTF-8 are replaced rather than rejected.
pub fn load_corpus<P, S>(paths: &[P], extensions: &[S]) -> Result<Vec<SourceDocument>, CorpusError>
where
    P: AsRef<Path>,
    S: AsRef<str>,
{
    let extensions: Vec<String> = extensions
        .iter()
        .map(|ext| ext.as_ref().trim_start_matches('.').to_ascii_lowercase())
        .filter(|ext| !ext.is_empty())
        .collect();

    let mut documents: BTreeMap<String, SourceDocument> = BTreeMap::new();
    for path in paths {
        let path = path.as_ref();
        if path.is_file() {
            let id = file_stem_id(path);
            add(&mut documents, id, path)?;
        } else if path.is_dir() {
            for entry in WalkDir::new(path).follow_links(true) {
                let entry = entry.map_err(|err| CorpusError::Walk {
                    root: path.to_path_buf(),
                    message: err.to_string(),
                })?;
                if !entry.file_type().is_file() || !has_extension(entry.path(), &extensions) {
                    continue;
                }
                let id = relative_id(path, entry.path());
                add(&mut documents, id, entry.path())?;
            }
        } else {
            return Err(CorpusError::MissingPath(path.to_path_buf()));
        }
    }

    debug!(documents = documents.len(), "corpus_loaded");
    Ok(documents.into_values().collect())
}

fn add(
    documents: &mut BTreeMap<String, SourceDocument>,
    doc_id: String,
    path: &Path,
) -> Result<(), CorpusError> {
    if let Some(existing) = documents.get(&doc_id) {
        return Err(CorpusError::DuplicateId {
            id: doc_id,
            first: existing.path.clone(),
            second: path.to_path_buf(),
        });
    }
    let bytes = fs::read(path).map_err(|err| CorpusError::Io {
        path: path.to_path_buf(),
        message: err.to_string(),
    })?;
    let text = String::from_utf8_lossy(&bytes).into_owned();
    documents.insert(
        doc_id.clone(),
        SourceDocument {
            doc_id,
            path: path.to_path_buf(),
            text,
        },
    );
    Ok(())
}

fn has_extension(path: &Path, extensions: &[String]) -> bool {
    if extensions.is_empty() {
        return true;
    }
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| extensions.iter().any(|e| e.eq_ignore_ascii_case(ext)))
        .unwrap_or(false)
}

fn file_stem_id(path: &Path) -> String {
    path.file_stem()
        .unwrap_or(path.as_os_str())
        .to_string_lossy()
        .into_owned()
}

fn relative_id(root: &Path, path: &Path) -> String {
    let relative = path.strip_prefix(root).unwrap_or(path);
    relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}
