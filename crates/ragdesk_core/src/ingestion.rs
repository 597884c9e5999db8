use crate::{FileHandle, IngestReceipt, RequestFailed, RequestId};

pub const FILES_IN_PROGRESS_MESSAGE: &str = "Uploading files...";
pub const URLS_IN_PROGRESS_MESSAGE: &str = "Processing URLs...";
pub const FILES_FAILURE_MESSAGE: &str =
    "Error: Failed to upload files. Please make sure the API server is running.";
pub const URLS_FAILURE_MESSAGE: &str =
    "Error: Failed to process URLs. Please make sure the API server is running.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IngestionKind {
    Files,
    Urls,
}

impl IngestionKind {
    fn in_progress_message(self) -> &'static str {
        match self {
            IngestionKind::Files => FILES_IN_PROGRESS_MESSAGE,
            IngestionKind::Urls => URLS_IN_PROGRESS_MESSAGE,
        }
    }

    fn failure_message(self) -> &'static str {
        match self {
            IngestionKind::Files => FILES_FAILURE_MESSAGE,
            IngestionKind::Urls => URLS_FAILURE_MESSAGE,
        }
    }

    fn success_message(self, item_count: usize, document_count: u64) -> String {
        let noun = match self {
            IngestionKind::Files => "files",
            IngestionKind::Urls => "URLs",
        };
        format!("Successfully processed {item_count} {noun} ({document_count} chunks)")
    }
}

/// Both ingestion workflows share this single in-flight slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IngestionPhase {
    #[default]
    Idle,
    Submitting {
        request_id: RequestId,
        kind: IngestionKind,
        item_count: usize,
    },
}

/// Outcome banner for the ingestion workflows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IngestionStatus {
    InProgress(String),
    Succeeded(String),
    Failed(String),
}

impl IngestionStatus {
    pub fn message(&self) -> &str {
        match self {
            IngestionStatus::InProgress(text)
            | IngestionStatus::Succeeded(text)
            | IngestionStatus::Failed(text) => text,
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, IngestionStatus::Failed(_))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct IngestionController {
    selected_files: Vec<FileHandle>,
    url_text: String,
    phase: IngestionPhase,
    status: Option<IngestionStatus>,
}

impl IngestionController {
    pub fn selected_files(&self) -> &[FileHandle] {
        &self.selected_files
    }

    pub fn url_text(&self) -> &str {
        &self.url_text
    }

    pub fn phase(&self) -> IngestionPhase {
        self.phase
    }

    pub fn status(&self) -> Option<&IngestionStatus> {
        self.status.as_ref()
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.phase, IngestionPhase::Submitting { .. })
    }

    pub fn can_upload_files(&self) -> bool {
        !self.selected_files.is_empty() && !self.is_loading()
    }

    pub fn can_process_urls(&self) -> bool {
        !parse_url_list(&self.url_text).is_empty() && !self.is_loading()
    }

    pub(crate) fn select_files(&mut self, files: Vec<FileHandle>) -> bool {
        if self.selected_files == files {
            return false;
        }
        self.selected_files = files;
        true
    }

    pub(crate) fn edit_urls(&mut self, text: String) -> bool {
        if self.url_text == text {
            return false;
        }
        self.url_text = text;
        true
    }

    pub(crate) fn begin_files(&mut self, request_id: RequestId) -> Option<Vec<FileHandle>> {
        if !self.can_upload_files() {
            return None;
        }
        let files = self.selected_files.clone();
        self.enter_submitting(request_id, IngestionKind::Files, files.len());
        Some(files)
    }

    pub(crate) fn begin_urls(&mut self, request_id: RequestId) -> Option<Vec<String>> {
        if self.is_loading() {
            return None;
        }
        let urls = parse_url_list(&self.url_text);
        if urls.is_empty() {
            return None;
        }
        self.enter_submitting(request_id, IngestionKind::Urls, urls.len());
        Some(urls)
    }

    fn enter_submitting(&mut self, request_id: RequestId, kind: IngestionKind, item_count: usize) {
        self.phase = IngestionPhase::Submitting {
            request_id,
            kind,
            item_count,
        };
        self.status = Some(IngestionStatus::InProgress(
            kind.in_progress_message().to_string(),
        ));
    }

    /// Applies a settlement. Returns `false` if it does not belong to the
    /// request in flight.
    pub(crate) fn settle(
        &mut self,
        request_id: RequestId,
        result: Result<IngestReceipt, RequestFailed>,
    ) -> bool {
        let IngestionPhase::Submitting {
            request_id: in_flight,
            kind,
            item_count,
        } = self.phase
        else {
            return false;
        };
        if in_flight != request_id {
            return false;
        }

        self.status = Some(match result {
            Ok(receipt) => {
                match kind {
                    IngestionKind::Files => self.selected_files.clear(),
                    IngestionKind::Urls => self.url_text.clear(),
                }
                IngestionStatus::Succeeded(kind.success_message(item_count, receipt.document_count))
            }
            // Input is kept so the user can retry without re-entering it.
            Err(_) => IngestionStatus::Failed(kind.failure_message().to_string()),
        });
        self.phase = IngestionPhase::Idle;
        true
    }
}

/// Splits URL input on newlines, trims each line and drops blank ones.
pub fn parse_url_list(raw: &str) -> Vec<String> {
    raw.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(ToOwned::to_owned)
        .collect()
}
