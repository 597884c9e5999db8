use std::sync::Once;

use ragdesk_core::{
    parse_url_list, update, AppState, Effect, FileHandle, IngestReceipt, IngestionKind,
    IngestionPhase, Msg, RequestFailed, StatusKind, StatusView, FILES_FAILURE_MESSAGE,
    FILES_IN_PROGRESS_MESSAGE, URLS_FAILURE_MESSAGE, URLS_IN_PROGRESS_MESSAGE,
};

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(ragdesk_logging::initialize_for_tests);
}

fn files(names: &[&str]) -> Vec<FileHandle> {
    names
        .iter()
        .map(|name| FileHandle::new(format!("/docs/{name}")))
        .collect()
}

fn select_and_upload(state: AppState, names: &[&str]) -> (AppState, Vec<Effect>) {
    let (state, _) = update(state, Msg::FilesSelected(files(names)));
    update(state, Msg::UploadFilesClicked)
}

fn enter_and_process(state: AppState, text: &str) -> (AppState, Vec<Effect>) {
    let (state, _) = update(state, Msg::UrlTextChanged(text.to_string()));
    update(state, Msg::ProcessUrlsClicked)
}

fn settle(state: AppState, request_id: u64, result: Result<u64, &str>) -> AppState {
    let result = result
        .map(|document_count| IngestReceipt { document_count })
        .map_err(RequestFailed::new);
    let (state, effects) = update(state, Msg::IngestionSettled { request_id, result });
    assert!(effects.is_empty());
    state
}

#[test]
fn url_text_parses_to_trimmed_non_blank_lines() {
    assert_eq!(parse_url_list("a.com\n\nb.com\n  \n"), vec!["a.com", "b.com"]);
    assert_eq!(
        parse_url_list("  https://x.example.com \r\n\thttps://y.example.com"),
        vec!["https://x.example.com", "https://y.example.com"]
    );
    assert!(parse_url_list(" \n\n\t").is_empty());
}

#[test]
fn upload_with_no_files_is_noop() {
    init_logging();
    let mut state = AppState::new();
    assert!(!state.view().can_upload_files);
    let before = state.clone();

    let (mut next, effects) = update(state.clone(), Msg::UploadFilesClicked);

    assert_eq!(next, before);
    assert!(effects.is_empty());
    assert!(!next.consume_dirty());
    assert!(!state.consume_dirty());
}

#[test]
fn upload_enters_submitting_with_progress_status() {
    init_logging();
    let (state, effects) = select_and_upload(AppState::new(), &["a.pdf", "b.docx"]);

    assert_eq!(
        effects,
        vec![Effect::IngestFiles {
            request_id: 1,
            files: files(&["a.pdf", "b.docx"]),
        }]
    );
    let view = state.view();
    assert!(view.ingestion_loading);
    assert!(!view.can_upload_files);
    assert_eq!(
        view.status,
        Some(StatusView {
            kind: StatusKind::InProgress,
            text: FILES_IN_PROGRESS_MESSAGE.to_string(),
        })
    );
    assert_eq!(
        state.ingestion().phase(),
        IngestionPhase::Submitting {
            request_id: 1,
            kind: IngestionKind::Files,
            item_count: 2,
        }
    );
}

#[test]
fn successful_upload_reports_counts_and_clears_selection() {
    init_logging();
    let (state, _) = select_and_upload(AppState::new(), &["a.pdf", "b.pdf", "c.docx"]);
    let state = settle(state, 1, Ok(12));

    let view = state.view();
    assert!(!view.ingestion_loading);
    assert!(view.selected_files.is_empty());
    assert_eq!(
        view.status,
        Some(StatusView {
            kind: StatusKind::Success,
            text: "Successfully processed 3 files (12 chunks)".to_string(),
        })
    );
    assert!(!view.status.as_ref().is_some_and(StatusView::is_error));
}

#[test]
fn failed_upload_keeps_selection_for_retry() {
    init_logging();
    let (state, _) = select_and_upload(AppState::new(), &["a.pdf"]);
    let state = settle(state, 1, Err("connection refused"));

    let view = state.view();
    assert!(!view.ingestion_loading);
    assert_eq!(view.selected_files, vec!["a.pdf".to_string()]);
    assert!(view.can_upload_files);
    let status = view.status.expect("status");
    assert!(status.is_error());
    assert_eq!(status.text, FILES_FAILURE_MESSAGE);

    // Retry sends the same selection again.
    let (_, effects) = update(state, Msg::UploadFilesClicked);
    assert_eq!(
        effects,
        vec![Effect::IngestFiles {
            request_id: 2,
            files: files(&["a.pdf"]),
        }]
    );
}

#[test]
fn process_urls_sends_parsed_list_and_clears_text_on_success() {
    init_logging();
    let (state, effects) = enter_and_process(AppState::new(), "a.com\n\nb.com\n  \n");

    assert_eq!(
        effects,
        vec![Effect::IngestUrls {
            request_id: 1,
            urls: vec!["a.com".to_string(), "b.com".to_string()],
        }]
    );
    assert_eq!(
        state.view().status.map(|status| status.text),
        Some(URLS_IN_PROGRESS_MESSAGE.to_string())
    );

    let state = settle(state, 1, Ok(5));
    let view = state.view();
    assert_eq!(view.url_text, "");
    assert!(!view.can_process_urls);
    assert_eq!(
        view.status.map(|status| status.text),
        Some("Successfully processed 2 URLs (5 chunks)".to_string())
    );
}

#[test]
fn failed_url_processing_keeps_text() {
    init_logging();
    let (state, _) = enter_and_process(AppState::new(), "https://a.example.com\n");
    let state = settle(state, 1, Err("http status 422"));

    let view = state.view();
    assert_eq!(view.url_text, "https://a.example.com\n");
    assert!(view.can_process_urls);
    let status = view.status.expect("status");
    assert_eq!(status.kind, StatusKind::Error);
    assert_eq!(status.text, URLS_FAILURE_MESSAGE);
}

#[test]
fn blank_url_text_is_noop() {
    init_logging();
    let (mut state, effects) = enter_and_process(AppState::new(), "  \n \n");

    assert!(effects.is_empty());
    assert!(!state.ingestion_loading());
    assert!(state.view().status.is_none());
    // Only the text edit itself marked the state dirty.
    assert!(state.consume_dirty());
}

#[test]
fn ingestion_workflows_share_one_busy_slot() {
    init_logging();
    let (state, _) = select_and_upload(AppState::new(), &["a.pdf"]);
    let (state, _) = update(state, Msg::UrlTextChanged("a.com".to_string()));
    assert!(!state.view().can_process_urls);

    let (state, effects) = update(state, Msg::ProcessUrlsClicked);
    assert!(effects.is_empty());
    assert_eq!(
        state.view().status.map(|status| status.text),
        Some(FILES_IN_PROGRESS_MESSAGE.to_string())
    );

    let state = settle(state, 1, Ok(1));
    let (state, effects) = update(state, Msg::ProcessUrlsClicked);
    assert_eq!(
        effects,
        vec![Effect::IngestUrls {
            request_id: 2,
            urls: vec!["a.com".to_string()],
        }]
    );

    // And the other way round.
    let (state, _) = update(state, Msg::FilesSelected(files(&["b.pdf"])));
    let (_, effects) = update(state, Msg::UploadFilesClicked);
    assert!(effects.is_empty());
}

#[test]
fn ingestion_does_not_block_questions() {
    init_logging();
    let (state, _) = select_and_upload(AppState::new(), &["a.pdf"]);
    let (state, _) = update(state, Msg::QuestionChanged("What is X?".to_string()));
    let (state, effects) = update(state, Msg::QuestionSubmitted);

    assert_eq!(effects.len(), 2);
    let view = state.view();
    assert!(view.query_loading);
    assert!(view.ingestion_loading);
}

#[test]
fn stale_ingestion_settlement_is_ignored() {
    init_logging();
    let (mut state, _) = select_and_upload(AppState::new(), &["a.pdf"]);
    state.consume_dirty();
    let before = state.clone();

    let (next, effects) = update(
        state,
        Msg::IngestionSettled {
            request_id: 7,
            result: Ok(IngestReceipt { document_count: 1 }),
        },
    );

    assert_eq!(next, before);
    assert!(effects.is_empty());

    let (idle, effects) = update(
        AppState::new(),
        Msg::IngestionSettled {
            request_id: 1,
            result: Ok(IngestReceipt { document_count: 1 }),
        },
    );
    assert_eq!(idle, AppState::new());
    assert!(effects.is_empty());
}
