use ragdesk_core::{update, AppState, FileHandle, Msg, ResultPanel};

#[test]
fn update_is_noop() {
    let state = AppState::new();
    let (next, effects) = update(state.clone(), Msg::NoOp);

    assert_eq!(state, next);
    assert!(effects.is_empty());
}

#[test]
fn initial_view_shows_placeholder_and_nothing_enabled() {
    let view = AppState::new().view();

    assert_eq!(view.results, ResultPanel::Placeholder);
    assert!(!view.query_loading);
    assert!(!view.ingestion_loading);
    assert!(!view.can_ask);
    assert!(!view.can_upload_files);
    assert!(!view.can_process_urls);
    assert!(view.status.is_none());
    assert!(!view.dirty);
}

#[test]
fn unchanged_input_does_not_mark_dirty() {
    let (mut state, _) = update(AppState::new(), Msg::QuestionChanged("q".to_string()));
    assert!(state.consume_dirty());

    let (mut state, _) = update(state, Msg::QuestionChanged("q".to_string()));
    assert!(!state.consume_dirty());

    let (mut state, _) = update(
        state,
        Msg::FilesSelected(vec![FileHandle::new("/tmp/report.pdf")]),
    );
    assert!(state.consume_dirty());
    assert_eq!(state.view().selected_files, vec!["report.pdf".to_string()]);
}
