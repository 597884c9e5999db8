use crate::view_model::{AppViewModel, ResultPanel, SourceRow, StatusKind, StatusView};
use crate::{IngestionController, IngestionStatus, QueryController, RequestId};

/// Everything the interface shows, owned by exactly one message loop.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppState {
    query: QueryController,
    ingestion: IngestionController,
    next_request_id: RequestId,
    dirty: bool,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn query(&self) -> &QueryController {
        &self.query
    }

    pub fn ingestion(&self) -> &IngestionController {
        &self.ingestion
    }

    pub fn query_loading(&self) -> bool {
        self.query.is_loading()
    }

    pub fn ingestion_loading(&self) -> bool {
        self.ingestion.is_loading()
    }

    pub fn view(&self) -> AppViewModel {
        AppViewModel {
            question: self.query.question().to_string(),
            query_phase: self.query.phase(),
            query_loading: self.query_loading(),
            ingestion_loading: self.ingestion_loading(),
            can_ask: self.query.can_submit(),
            can_upload_files: self.ingestion.can_upload_files(),
            can_process_urls: self.ingestion.can_process_urls(),
            selected_files: self
                .ingestion
                .selected_files()
                .iter()
                .map(|file| file.display_name())
                .collect(),
            url_text: self.ingestion.url_text().to_string(),
            status: self.ingestion.status().map(status_view),
            results: self.result_panel(),
            dirty: self.dirty,
        }
    }

    fn result_panel(&self) -> ResultPanel {
        let result = self.query.result();
        if self.query_loading() && !result.has_answer() {
            return ResultPanel::Pending;
        }
        if !result.has_answer() {
            return ResultPanel::Placeholder;
        }
        ResultPanel::Answered {
            question: result.question.clone(),
            answer: result.answer.clone(),
            sources: result
                .sources
                .iter()
                .enumerate()
                .map(|(index, source)| SourceRow::new(index + 1, source))
                .collect(),
        }
    }

    pub(crate) fn query_mut(&mut self) -> &mut QueryController {
        &mut self.query
    }

    pub(crate) fn ingestion_mut(&mut self) -> &mut IngestionController {
        &mut self.ingestion
    }

    pub(crate) fn allocate_request_id(&mut self) -> RequestId {
        self.next_request_id += 1;
        self.next_request_id
    }

    pub(crate) fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    /// Returns whether anything visible changed since the last call, and resets the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }
}

fn status_view(status: &IngestionStatus) -> StatusView {
    let kind = match status {
        IngestionStatus::InProgress(_) => StatusKind::InProgress,
        IngestionStatus::Succeeded(_) => StatusKind::Success,
        IngestionStatus::Failed(_) => StatusKind::Error,
    };
    StatusView {
        kind,
        text: status.message().to_string(),
    }
}
