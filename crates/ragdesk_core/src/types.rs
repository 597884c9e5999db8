use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Identifies one remote call so its settlement can be matched to the request.
pub type RequestId = u64;

/// A file chosen by the user for upload. The core never reads it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileHandle {
    path: PathBuf,
}

impl FileHandle {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Final path component, or the whole path when there is none.
    pub fn display_name(&self) -> String {
        self.path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.path.display().to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SourceMetadata {
    pub file_name: Option<String>,
    pub source: Option<String>,
    /// Remaining backend metadata, rendered as display strings.
    pub extra: BTreeMap<String, String>,
}

impl SourceMetadata {
    /// `file_name` if present and non-empty, else `source`.
    pub fn identifier(&self) -> Option<&str> {
        fn non_empty(value: &Option<String>) -> Option<&str> {
            value.as_deref().filter(|text| !text.is_empty())
        }
        non_empty(&self.file_name).or_else(|| non_empty(&self.source))
    }
}

/// A retrieved passage plus the metadata describing where it came from.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Source {
    pub content: String,
    pub metadata: SourceMetadata,
}

/// Decoded success payload of a question.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct QueryAnswer {
    pub answer: String,
    pub sources: Vec<Source>,
}

/// Decoded success payload of a file or URL ingestion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IngestReceipt {
    pub document_count: u64,
}

/// A remote call did not complete successfully.
///
/// Network failure, bad status and malformed bodies all collapse into this
/// one value; `reason` is kept for logging only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestFailed {
    pub reason: String,
}

impl RequestFailed {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}
