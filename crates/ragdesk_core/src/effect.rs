use crate::{FileHandle, RequestId};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    Ask {
        request_id: RequestId,
        question: String,
    },
    IngestFiles {
        request_id: RequestId,
        files: Vec<FileHandle>,
    },
    IngestUrls {
        request_id: RequestId,
        urls: Vec<String>,
    },
    /// Answer or sources changed; the view should bring the latest result into sight.
    ScrollToLatest,
}
