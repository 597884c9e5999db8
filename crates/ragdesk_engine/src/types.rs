use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

pub type RequestId = u64;

#[derive(Debug, Serialize)]
pub(crate) struct QueryRequest<'a> {
    pub question: &'a str,
}

#[derive(Debug, Serialize)]
pub(crate) struct UrlBatchRequest<'a> {
    pub urls: &'a [String],
}

/// Body of a successful `POST /query`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct QueryResponse {
    pub answer: String,
    #[serde(default)]
    pub sources: Vec<SourceDocument>,
}

/// One retrieved passage as the backend reports it.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SourceDocument {
    pub content: String,
    #[serde(default)]
    pub metadata: Map<String, Value>,
}

impl SourceDocument {
    pub fn file_name(&self) -> Option<&str> {
        self.metadata.get("file_name").and_then(Value::as_str)
    }

    pub fn source(&self) -> Option<&str> {
        self.metadata.get("source").and_then(Value::as_str)
    }

    /// Metadata other than `file_name` and `source`, as display strings.
    pub fn extra_metadata(&self) -> impl Iterator<Item = (&str, String)> {
        self.metadata
            .iter()
            .filter(|(key, _)| key.as_str() != "file_name" && key.as_str() != "source")
            .map(|(key, value)| {
                let text = match value {
                    Value::String(text) => text.clone(),
                    other => other.to_string(),
                };
                (key.as_str(), text)
            })
    }
}

/// Body of a successful `POST /upload` or `POST /process-urls`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct IngestResponse {
    #[serde(default)]
    pub message: Option<String>,
    pub document_count: u64,
}

#[derive(Debug, Clone, PartialEq)]
pub enum EngineEvent {
    Answered {
        request_id: RequestId,
        result: Result<QueryResponse, RequestFailed>,
    },
    Ingested {
        request_id: RequestId,
        result: Result<IngestResponse, RequestFailed>,
    },
}

impl EngineEvent {
    pub fn request_id(&self) -> RequestId {
        match self {
            EngineEvent::Answered { request_id, .. } | EngineEvent::Ingested { request_id, .. } => {
                *request_id
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{kind}: {message}")]
pub struct RequestFailed {
    pub kind: FailureKind,
    pub message: String,
}

impl RequestFailed {
    pub(crate) fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureKind {
    InvalidInput,
    InvalidBaseUrl,
    FileRead,
    Network,
    Timeout,
    HttpStatus(u16),
    Decode,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::InvalidInput => write!(f, "invalid input"),
            FailureKind::InvalidBaseUrl => write!(f, "invalid base url"),
            FailureKind::FileRead => write!(f, "file read error"),
            FailureKind::Network => write!(f, "network error"),
            FailureKind::Timeout => write!(f, "timeout"),
            FailureKind::HttpStatus(code) => write!(f, "http status {code}"),
            FailureKind::Decode => write!(f, "malformed response"),
        }
    }
}
