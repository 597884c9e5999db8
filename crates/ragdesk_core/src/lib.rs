//! Ragdesk core: pure interaction state machine and view-model helpers.
mod effect;
mod ingestion;
mod msg;
mod query;
mod state;
mod types;
mod update;
mod view_model;

pub use effect::Effect;
pub use ingestion::{
    parse_url_list, IngestionController, IngestionKind, IngestionPhase, IngestionStatus,
    FILES_FAILURE_MESSAGE, FILES_IN_PROGRESS_MESSAGE, URLS_FAILURE_MESSAGE,
    URLS_IN_PROGRESS_MESSAGE,
};
pub use msg::Msg;
pub use query::{AnswerSet, QueryController, QueryPhase, QUERY_FAILURE_MESSAGE};
pub use state::AppState;
pub use types::{
    FileHandle, IngestReceipt, QueryAnswer, RequestFailed, RequestId, Source, SourceMetadata,
};
pub use update::update;
pub use view_model::{
    AppViewModel, ResultPanel, SourceRow, StatusKind, StatusView, PENDING_TEXT, PLACEHOLDER_TEXT,
    UNKNOWN_SOURCE_LABEL,
};
