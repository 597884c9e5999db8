use crate::{QueryPhase, Source};

pub const PENDING_TEXT: &str = "Thinking...";
pub const PLACEHOLDER_TEXT: &str = "Ask a question to get started";
pub const UNKNOWN_SOURCE_LABEL: &str = "unknown source";

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppViewModel {
    pub question: String,
    pub query_phase: QueryPhase,
    pub query_loading: bool,
    pub ingestion_loading: bool,
    pub can_ask: bool,
    pub can_upload_files: bool,
    pub can_process_urls: bool,
    /// Display names of the selected files, in selection order.
    pub selected_files: Vec<String>,
    pub url_text: String,
    pub status: Option<StatusView>,
    pub results: ResultPanel,
    pub dirty: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKind {
    InProgress,
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusView {
    pub kind: StatusKind,
    pub text: String,
}

impl StatusView {
    pub fn is_error(&self) -> bool {
        self.kind == StatusKind::Error
    }
}

/// What the answer area shows, in precedence order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ResultPanel {
    #[default]
    Placeholder,
    Pending,
    Answered {
        question: String,
        answer: String,
        sources: Vec<SourceRow>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceRow {
    /// 1-based position in backend relevance order.
    pub ordinal: usize,
    pub label: String,
    pub content: String,
    /// Backend metadata beyond the label fields, sorted by key.
    pub details: Vec<(String, String)>,
}

impl SourceRow {
    pub(crate) fn new(ordinal: usize, source: &Source) -> Self {
        Self {
            ordinal,
            label: source
                .metadata
                .identifier()
                .unwrap_or(UNKNOWN_SOURCE_LABEL)
                .to_string(),
            content: source.content.clone(),
            details: source
                .metadata
                .extra
                .iter()
                .map(|(key, value)| (key.clone(), value.clone()))
                .collect(),
        }
    }

    pub fn heading(&self) -> String {
        format!("Source {}: {}", self.ordinal, self.label)
    }

    /// `key: value` pairs joined for a single line, `None` when there are none.
    pub fn details_line(&self) -> Option<String> {
        if self.details.is_empty() {
            return None;
        }
        let pairs: Vec<String> = self
            .details
            .iter()
            .map(|(key, value)| format!("{key}: {value}"))
            .collect();
        Some(pairs.join(", "))
    }
}
