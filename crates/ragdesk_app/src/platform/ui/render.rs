use std::io::{self, Write};

use ragdesk_core::{
    AppViewModel, ResultPanel, StatusKind, StatusView, PENDING_TEXT, PLACEHOLDER_TEXT,
};

use super::constants::{ANSWER_LABEL, QUESTION_LABEL, RULE, SOURCES_LABEL};

pub fn render_results(panel: &ResultPanel) -> Vec<String> {
    match panel {
        ResultPanel::Placeholder => vec![PLACEHOLDER_TEXT.to_string()],
        ResultPanel::Pending => vec![PENDING_TEXT.to_string()],
        ResultPanel::Answered {
            question,
            answer,
            sources,
        } => {
            let mut lines = vec![
                RULE.to_string(),
                QUESTION_LABEL.to_string(),
                format!("  {question}"),
                ANSWER_LABEL.to_string(),
            ];
            lines.extend(answer.lines().map(|line| format!("  {line}")));
            if !sources.is_empty() {
                lines.push(SOURCES_LABEL.to_string());
                for source in sources {
                    lines.push(source.heading());
                    if let Some(details) = source.details_line() {
                        lines.push(format!("    Metadata: {details}"));
                    }
                    lines.extend(source.content.lines().map(|line| format!("    {line}")));
                }
            }
            lines.push(RULE.to_string());
            lines
        }
    }
}

pub fn render_status(status: &StatusView) -> String {
    let marker = match status.kind {
        StatusKind::InProgress => "[..]",
        StatusKind::Success => "[ok]",
        StatusKind::Error => "[error]",
    };
    format!("{marker} {}", status.text)
}

pub fn render_summary(view: &AppViewModel) -> Vec<String> {
    let mut lines = Vec::new();
    if view.selected_files.is_empty() {
        lines.push("No files selected".to_string());
    } else {
        lines.push(format!("{} file(s) selected:", view.selected_files.len()));
        lines.extend(view.selected_files.iter().map(|name| format!("  {name}")));
    }
    lines.extend(render_url_list(view));
    if view.ingestion_loading {
        lines.push("Ingestion in progress".to_string());
    }
    if view.query_loading {
        lines.push(PENDING_TEXT.to_string());
    }
    if let Some(status) = &view.status {
        lines.push(render_status(status));
    }
    lines
}

pub fn render_url_list(view: &AppViewModel) -> Vec<String> {
    let urls = ragdesk_core::parse_url_list(&view.url_text);
    if urls.is_empty() {
        return vec!["No URLs pending".to_string()];
    }
    let mut lines = vec![format!("{} URL(s) pending:", urls.len())];
    lines.extend(urls.into_iter().map(|url| format!("  {url}")));
    lines
}

/// Writes view changes to a terminal-like output.
///
/// The result panel is printed only when the scroll cue fired; the status
/// line only when it differs from the one printed last.
pub struct Screen<W: Write> {
    out: W,
    last_status: Option<StatusView>,
}

impl<W: Write> Screen<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            last_status: None,
        }
    }

    pub fn present(&mut self, view: &AppViewModel, scroll_to_latest: bool) -> io::Result<()> {
        if scroll_to_latest {
            self.print_lines(&render_results(&view.results))?;
        }
        if view.status != self.last_status {
            if let Some(status) = &view.status {
                writeln!(self.out, "{}", render_status(status))?;
            }
            self.last_status = view.status.clone();
        }
        self.out.flush()
    }

    pub fn print_lines(&mut self, lines: &[String]) -> io::Result<()> {
        for line in lines {
            writeln!(self.out, "{line}")?;
        }
        self.out.flush()
    }

    pub fn print(&mut self, text: &str) -> io::Result<()> {
        writeln!(self.out, "{text}")?;
        self.out.flush()
    }

    #[cfg(test)]
    pub fn into_inner(self) -> W {
        self.out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ragdesk_core::SourceRow;

    #[test]
    fn answered_panel_lists_sources_with_ordinals() {
        let panel = ResultPanel::Answered {
            question: "What is X?".to_string(),
            answer: "X is Y.".to_string(),
            sources: vec![SourceRow {
                ordinal: 1,
                label: "doc1.pdf".to_string(),
                content: "...".to_string(),
                details: vec![("page".to_string(), "2".to_string())],
            }],
        };

        let lines = render_results(&panel);

        assert!(lines.contains(&"  What is X?".to_string()));
        assert!(lines.contains(&"  X is Y.".to_string()));
        assert!(lines.contains(&"Source 1: doc1.pdf".to_string()));
        assert!(lines.contains(&"    Metadata: page: 2".to_string()));
        assert!(lines.contains(&"    ...".to_string()));
    }

    #[test]
    fn pending_and_placeholder_are_single_lines() {
        assert_eq!(render_results(&ResultPanel::Pending), vec!["Thinking..."]);
        assert_eq!(
            render_results(&ResultPanel::Placeholder),
            vec!["Ask a question to get started"]
        );
    }

    #[test]
    fn status_marker_follows_kind() {
        let status = StatusView {
            kind: StatusKind::Error,
            text: "Error: Failed to upload files.".to_string(),
        };
        assert_eq!(render_status(&status), "[error] Error: Failed to upload files.");
    }

    #[test]
    fn screen_prints_status_once_and_results_only_on_cue() {
        let mut screen = Screen::new(Vec::new());
        let view = AppViewModel {
            status: Some(StatusView {
                kind: StatusKind::Success,
                text: "Successfully processed 1 files (2 chunks)".to_string(),
            }),
            ..AppViewModel::default()
        };

        screen.present(&view, false).unwrap();
        screen.present(&view, false).unwrap();
        screen.present(&view, true).unwrap();

        let output = String::from_utf8(screen.into_inner()).unwrap();
        assert_eq!(
            output,
            "[ok] Successfully processed 1 files (2 chunks)\nAsk a question to get started\n"
        );
    }
}
