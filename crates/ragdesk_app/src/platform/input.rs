use ragdesk_core::{AppViewModel, FileHandle, Msg};

/// What one line typed into the interactive session asks for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputAction {
    Dispatch(Vec<Msg>),
    Help,
    ShowUrls,
    ShowStatus,
    Notice(String),
    Quit,
    Ignore,
}

pub fn parse_input(line: &str, view: &AppViewModel) -> InputAction {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return InputAction::Ignore;
    }
    let Some(command) = trimmed.strip_prefix(':') else {
        return InputAction::Dispatch(vec![
            Msg::QuestionChanged(trimmed.to_string()),
            Msg::QuestionSubmitted,
        ]);
    };

    let (name, rest) = match command.split_once(char::is_whitespace) {
        Some((name, rest)) => (name, rest.trim()),
        None => (command, ""),
    };
    match name {
        "again" => InputAction::Dispatch(vec![Msg::QuestionSubmitted]),
        "files" => InputAction::Dispatch(vec![Msg::FilesSelected(
            rest.split_whitespace().map(FileHandle::new).collect(),
        )]),
        "upload" => InputAction::Dispatch(vec![Msg::UploadFilesClicked]),
        "url" if rest.is_empty() => InputAction::Notice("usage: :url <address>".to_string()),
        "url" => InputAction::Dispatch(vec![Msg::UrlTextChanged(append_line(
            &view.url_text,
            rest,
        ))]),
        "urls" => InputAction::ShowUrls,
        "clear-urls" => InputAction::Dispatch(vec![Msg::UrlTextChanged(String::new())]),
        "process" => InputAction::Dispatch(vec![Msg::ProcessUrlsClicked]),
        "status" => InputAction::ShowStatus,
        "help" | "h" | "?" => InputAction::Help,
        "quit" | "q" | "exit" => InputAction::Quit,
        other => InputAction::Notice(format!("unknown command :{other} (try :help)")),
    }
}

fn append_line(text: &str, line: &str) -> String {
    if text.is_empty() || text.ends_with('\n') {
        format!("{text}{line}")
    } else {
        format!("{text}\n{line}")
    }
}
