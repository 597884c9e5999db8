use std::io;
use std::path::PathBuf;
use std::sync::{mpsc, Arc};
use std::thread;

use ragdesk_logging::{desk_debug, desk_info};

use crate::{EngineEvent, Gateway, GatewaySettings, ReqwestGateway, RequestFailed, RequestId};

/// Receives settlement events from the engine's worker thread.
pub trait EventSink: Send + Sync {
    fn emit(&self, event: EngineEvent);
}

pub struct ChannelEventSink {
    tx: mpsc::Sender<EngineEvent>,
}

impl ChannelEventSink {
    pub fn new(tx: mpsc::Sender<EngineEvent>) -> Self {
        Self { tx }
    }
}

impl EventSink for ChannelEventSink {
    fn emit(&self, event: EngineEvent) {
        let _ = self.tx.send(event);
    }
}

enum EngineCommand {
    Ask {
        request_id: RequestId,
        question: String,
    },
    IngestFiles {
        request_id: RequestId,
        files: Vec<PathBuf>,
    },
    IngestUrls {
        request_id: RequestId,
        urls: Vec<String>,
    },
}

/// Runs gateway calls on a dedicated tokio runtime.
///
/// Every command settles exactly once through the sink. Dropping the handle
/// shuts the worker down; calls still in flight are abandoned.
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
}

impl EngineHandle {
    pub fn new(gateway: Arc<dyn Gateway>, sink: Arc<dyn EventSink>) -> io::Result<Self> {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(2)
            .enable_all()
            .build()?;

        thread::Builder::new()
            .name("ragdesk-engine".to_string())
            .spawn(move || {
                while let Ok(command) = cmd_rx.recv() {
                    let gateway = gateway.clone();
                    let sink = sink.clone();
                    runtime.spawn(async move {
                        let event = handle_command(gateway.as_ref(), command).await;
                        desk_debug!("request {} settled", event.request_id());
                        sink.emit(event);
                    });
                }
                desk_info!("engine command channel closed; shutting down");
            })?;

        Ok(Self { cmd_tx })
    }

    /// Builds a [`ReqwestGateway`] from `settings` and starts the worker.
    pub fn with_settings(
        settings: GatewaySettings,
        sink: Arc<dyn EventSink>,
    ) -> Result<Self, EngineStartError> {
        let gateway = ReqwestGateway::new(settings)?;
        Ok(Self::new(Arc::new(gateway), sink)?)
    }

    pub fn ask(&self, request_id: RequestId, question: impl Into<String>) {
        self.submit(EngineCommand::Ask {
            request_id,
            question: question.into(),
        });
    }

    pub fn ingest_files(&self, request_id: RequestId, files: Vec<PathBuf>) {
        self.submit(EngineCommand::IngestFiles { request_id, files });
    }

    pub fn ingest_urls(&self, request_id: RequestId, urls: Vec<String>) {
        self.submit(EngineCommand::IngestUrls { request_id, urls });
    }

    fn submit(&self, command: EngineCommand) {
        let _ = self.cmd_tx.send(command);
    }
}

#[derive(Debug, thiserror::Error)]
pub enum EngineStartError {
    #[error("gateway configuration rejected: {0}")]
    Gateway(#[from] RequestFailed),
    #[error("failed to start engine worker: {0}")]
    Io(#[from] io::Error),
}

async fn handle_command(gateway: &dyn Gateway, command: EngineCommand) -> EngineEvent {
    match command {
        EngineCommand::Ask {
            request_id,
            question,
        } => EngineEvent::Answered {
            request_id,
            result: gateway.ask(&question).await,
        },
        EngineCommand::IngestFiles { request_id, files } => EngineEvent::Ingested {
            request_id,
            result: gateway.ingest_files(&files).await,
        },
        EngineCommand::IngestUrls { request_id, urls } => EngineEvent::Ingested {
            request_id,
            result: gateway.ingest_urls(&urls).await,
        },
    }
}
