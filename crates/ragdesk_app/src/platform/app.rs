use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::mpsc;
use std::thread;

use anyhow::{anyhow, bail, Context, Result};
use clap::Parser;
use ragdesk_core::{parse_url_list, update, AppState, AppViewModel, Effect, Msg, QueryPhase};
use ragdesk_engine::EngineHandle;
use ragdesk_logging::{desk_info, desk_warn};

use super::cli::{Cli, Command};
use super::config::{load_config, AppConfig, DEFAULT_CONFIG_FILENAME};
use super::documents::collect_documents;
use super::effects::{loop_sink, EffectRunner};
use super::input::{parse_input, InputAction};
use super::logging;
use super::ui::constants::{
    BANNER, HELP, INGESTION_BUSY, NO_FILES_SELECTED, NO_QUESTION, NO_URLS_PENDING,
    STILL_ANSWERING,
};
use super::ui::render::{render_summary, render_url_list, Screen};

/// Everything the message loop reacts to.
pub enum LoopEvent {
    Core(Msg),
    Input(String),
    InputClosed,
}

pub fn run_app() -> Result<ExitCode> {
    let cli = Cli::parse();
    let (mut config, deferred_warning) = resolve_config(&cli)?;
    if let Some(api_url) = &cli.api_url {
        config.api_url = api_url.clone();
    }

    logging::initialize(
        config.log_destination,
        config.log_level(cli.verbose),
        &config.log_file,
    );
    if let Some(warning) = deferred_warning {
        desk_warn!("{}; using defaults", warning);
    }
    desk_info!("ragdesk starting, api_url={}", config.api_url);

    let (tx, rx) = mpsc::channel();
    let engine = EngineHandle::with_settings(config.gateway_settings(), loop_sink(tx.clone()))
        .with_context(|| format!("cannot use API at {}", config.api_url))?;
    let mut session = Session::new(EffectRunner::new(engine), rx, Screen::new(io::stdout()));

    match cli.command.unwrap_or(Command::Shell) {
        Command::Shell => run_shell(&mut session, tx),
        Command::Ask { question } => {
            drop(tx);
            run_ask(&mut session, &question.join(" "))
        }
        Command::Ingest {
            files,
            urls,
            directory,
        } => {
            drop(tx);
            run_ingest(&mut session, files, urls, directory.as_deref())
        }
    }
}

/// An explicit `--config` must exist and parse; the implicit default file may
/// be absent or broken, in which case defaults are used and a warning is
/// logged once logging is up.
fn resolve_config(cli: &Cli) -> Result<(AppConfig, Option<String>)> {
    if let Some(path) = &cli.config {
        let config = load_config(path)?
            .ok_or_else(|| anyhow!("config file {} not found", path.display()))?;
        return Ok((config, None));
    }
    match load_config(Path::new(DEFAULT_CONFIG_FILENAME)) {
        Ok(config) => Ok((config.unwrap_or_default(), None)),
        Err(err) => Ok((AppConfig::default(), Some(err.to_string()))),
    }
}

/// Owns the state and applies every message on the loop thread.
pub struct Session<W: Write> {
    state: AppState,
    runner: EffectRunner,
    rx: mpsc::Receiver<LoopEvent>,
    screen: Screen<W>,
}

impl<W: Write> Session<W> {
    pub fn new(runner: EffectRunner, rx: mpsc::Receiver<LoopEvent>, screen: Screen<W>) -> Self {
        Self {
            state: AppState::new(),
            runner,
            rx,
            screen,
        }
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn dispatch(&mut self, msg: Msg) -> io::Result<()> {
        let state = std::mem::take(&mut self.state);
        let (mut state, effects) = update(state, msg);
        let scroll_to_latest = effects
            .iter()
            .any(|effect| matches!(effect, Effect::ScrollToLatest));
        let dirty = state.consume_dirty();
        self.state = state;
        self.runner.run(effects);

        if dirty || scroll_to_latest {
            let view = self.state.view();
            self.screen.present(&view, scroll_to_latest)?;
        }
        Ok(())
    }

    /// Handles loop events until `done` holds for the state.
    ///
    /// Typed input is dropped here; only settlements are applied.
    pub fn wait_until(&mut self, done: impl Fn(&AppState) -> bool) -> Result<()> {
        while !done(&self.state) {
            match self.rx.recv() {
                Ok(LoopEvent::Core(msg)) => self.dispatch(msg)?,
                Ok(LoopEvent::Input(_) | LoopEvent::InputClosed) => {}
                Err(_) => bail!("engine stopped before the request settled"),
            }
        }
        Ok(())
    }

    fn wait_until_idle(&mut self) -> Result<()> {
        self.wait_until(|state| !state.query_loading() && !state.ingestion_loading())
    }
}

fn run_shell<W: Write>(session: &mut Session<W>, tx: mpsc::Sender<LoopEvent>) -> Result<ExitCode> {
    spawn_stdin_reader(tx)?;
    session.screen.print(BANNER)?;

    while let Ok(event) = session.rx.recv() {
        match event {
            LoopEvent::Core(msg) => session.dispatch(msg)?,
            LoopEvent::Input(line) => {
                if handle_input(session, &line)? == Flow::Quit {
                    break;
                }
            }
            LoopEvent::InputClosed => {
                // Piped input: let requests already sent finish before leaving.
                session.wait_until_idle()?;
                break;
            }
        }
    }

    desk_info!("session closed");
    Ok(ExitCode::SUCCESS)
}

#[derive(Debug, PartialEq, Eq)]
enum Flow {
    Continue,
    Quit,
}

fn handle_input<W: Write>(session: &mut Session<W>, line: &str) -> io::Result<Flow> {
    let view = session.state.view();
    match parse_input(line, &view) {
        InputAction::Dispatch(msgs) => {
            for msg in msgs {
                match refusal(&msg, &session.state.view()) {
                    Some(notice) => session.screen.print(notice)?,
                    None => session.dispatch(msg)?,
                }
            }
        }
        InputAction::Help => session.screen.print(HELP)?,
        InputAction::ShowUrls => session.screen.print_lines(&render_url_list(&view))?,
        InputAction::ShowStatus => session.screen.print_lines(&render_summary(&view))?,
        InputAction::Notice(text) => session.screen.print(&text)?,
        InputAction::Quit => return Ok(Flow::Quit),
        InputAction::Ignore => {}
    }
    Ok(Flow::Continue)
}

/// Why a click the core would ignore right now is refused, if it is.
fn refusal(msg: &Msg, view: &AppViewModel) -> Option<&'static str> {
    match msg {
        Msg::QuestionSubmitted if !view.can_ask => Some(if view.query_loading {
            STILL_ANSWERING
        } else {
            NO_QUESTION
        }),
        Msg::UploadFilesClicked if !view.can_upload_files => Some(if view.ingestion_loading {
            INGESTION_BUSY
        } else {
            NO_FILES_SELECTED
        }),
        Msg::ProcessUrlsClicked if !view.can_process_urls => Some(if view.ingestion_loading {
            INGESTION_BUSY
        } else {
            NO_URLS_PENDING
        }),
        _ => None,
    }
}

fn spawn_stdin_reader(tx: mpsc::Sender<LoopEvent>) -> io::Result<()> {
    thread::Builder::new()
        .name("ragdesk-stdin".to_string())
        .spawn(move || {
            for line in io::stdin().lock().lines() {
                let Ok(line) = line else { break };
                if tx.send(LoopEvent::Input(line)).is_err() {
                    return;
                }
            }
            let _ = tx.send(LoopEvent::InputClosed);
        })?;
    Ok(())
}

fn run_ask<W: Write>(session: &mut Session<W>, question: &str) -> Result<ExitCode> {
    session.dispatch(Msg::QuestionChanged(question.to_string()))?;
    if !session.state().view().can_ask {
        bail!("question is empty");
    }
    session.dispatch(Msg::QuestionSubmitted)?;
    session.wait_until(|state| !state.query_loading())?;

    Ok(match session.state().query().phase() {
        QueryPhase::Answered => ExitCode::SUCCESS,
        _ => ExitCode::FAILURE,
    })
}

fn run_ingest<W: Write>(
    session: &mut Session<W>,
    mut files: Vec<PathBuf>,
    urls: Vec<String>,
    directory: Option<&Path>,
) -> Result<ExitCode> {
    if let Some(dir) = directory {
        let mut found = collect_documents(dir)?;
        desk_info!("Found {} files in directory {}", found.len(), dir.display());
        found.append(&mut files);
        files = found;
    }
    let url_text = urls.join("\n");
    let url_count = parse_url_list(&url_text).len();
    if files.is_empty() && url_count == 0 {
        bail!("No files or URLs provided. Use --files, --urls, or --directory");
    }
    desk_info!("Ingesting {} files and {} URLs", files.len(), url_count);

    let mut failed = false;
    if !files.is_empty() {
        let handles = files.into_iter().map(ragdesk_core::FileHandle::new).collect();
        session.dispatch(Msg::FilesSelected(handles))?;
        failed |= run_ingestion_step(session, Msg::UploadFilesClicked)?;
    }
    if url_count > 0 {
        session.dispatch(Msg::UrlTextChanged(url_text))?;
        failed |= run_ingestion_step(session, Msg::ProcessUrlsClicked)?;
    }

    Ok(if failed {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    })
}

/// Clicks, waits for the settlement and reports whether the step failed.
/// A click the core refused counts as a failure.
fn run_ingestion_step<W: Write>(session: &mut Session<W>, click: Msg) -> Result<bool> {
    session.dispatch(click)?;
    if !session.state().ingestion_loading() {
        desk_warn!("ingestion step was not started");
        return Ok(true);
    }
    session.wait_until(|state| !state.ingestion_loading())?;
    Ok(last_ingestion_failed(session.state()))
}

fn last_ingestion_failed(state: &AppState) -> bool {
    state
        .ingestion()
        .status()
        .is_none_or(|status| status.is_error())
}
