use crate::{FileHandle, IngestReceipt, QueryAnswer, RequestFailed, RequestId};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// User edited the question input.
    QuestionChanged(String),
    /// User submitted the current question.
    QuestionSubmitted,
    /// User replaced the file selection.
    FilesSelected(Vec<FileHandle>),
    /// User clicked Upload Files.
    UploadFilesClicked,
    /// User edited the multi-line URL input.
    UrlTextChanged(String),
    /// User clicked Process URLs.
    ProcessUrlsClicked,
    /// Gateway settlement for a question.
    QuerySettled {
        request_id: RequestId,
        result: Result<QueryAnswer, RequestFailed>,
    },
    /// Gateway settlement for a file or URL ingestion.
    IngestionSettled {
        request_id: RequestId,
        result: Result<IngestReceipt, RequestFailed>,
    },
    /// Fallback for placeholder wiring.
    NoOp,
}
