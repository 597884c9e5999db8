use crate::{AppState, Effect, Msg};

/// Pure update function: applies a message to state and returns any effects.
///
/// A message whose precondition does not hold (blank question, nothing
/// selected, workflow busy) leaves the state untouched and yields no effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::QuestionChanged(text) => {
            if state.query_mut().edit_question(text) {
                state.mark_dirty();
            }
            Vec::new()
        }
        Msg::QuestionSubmitted => {
            if !state.query().can_submit() {
                return (state, Vec::new());
            }
            let request_id = state.allocate_request_id();
            match state.query_mut().begin(request_id) {
                Some(question) => {
                    state.mark_dirty();
                    vec![
                        Effect::ScrollToLatest,
                        Effect::Ask {
                            request_id,
                            question,
                        },
                    ]
                }
                None => Vec::new(),
            }
        }
        Msg::FilesSelected(files) => {
            if state.ingestion_mut().select_files(files) {
                state.mark_dirty();
            }
            Vec::new()
        }
        Msg::UploadFilesClicked => {
            if !state.ingestion().can_upload_files() {
                return (state, Vec::new());
            }
            let request_id = state.allocate_request_id();
            match state.ingestion_mut().begin_files(request_id) {
                Some(files) => {
                    state.mark_dirty();
                    vec![Effect::IngestFiles { request_id, files }]
                }
                None => Vec::new(),
            }
        }
        Msg::UrlTextChanged(text) => {
            if state.ingestion_mut().edit_urls(text) {
                state.mark_dirty();
            }
            Vec::new()
        }
        Msg::ProcessUrlsClicked => {
            if !state.ingestion().can_process_urls() {
                return (state, Vec::new());
            }
            let request_id = state.allocate_request_id();
            match state.ingestion_mut().begin_urls(request_id) {
                Some(urls) => {
                    state.mark_dirty();
                    vec![Effect::IngestUrls { request_id, urls }]
                }
                None => Vec::new(),
            }
        }
        Msg::QuerySettled { request_id, result } => {
            if state.query_mut().settle(request_id, result) {
                state.mark_dirty();
                vec![Effect::ScrollToLatest]
            } else {
                Vec::new()
            }
        }
        Msg::IngestionSettled { request_id, result } => {
            if state.ingestion_mut().settle(request_id, result) {
                state.mark_dirty();
            }
            Vec::new()
        }
        Msg::NoOp => Vec::new(),
    };

    (state, effects)
}
