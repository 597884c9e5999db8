use std::sync::{mpsc, Arc};

use ragdesk_core::{Effect, IngestReceipt, Msg, QueryAnswer, RequestFailed, Source, SourceMetadata};
use ragdesk_engine::{EngineEvent, EngineHandle, EventSink, QueryResponse, SourceDocument};
use ragdesk_logging::{desk_info, desk_warn};

use super::app::LoopEvent;

/// Turns core effects into engine calls and engine settlements into messages.
pub struct EffectRunner {
    engine: EngineHandle,
}

impl EffectRunner {
    pub fn new(engine: EngineHandle) -> Self {
        Self { engine }
    }

    pub fn run(&self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::Ask {
                    request_id,
                    question,
                } => {
                    desk_info!("Ask request_id={} question_len={}", request_id, question.len());
                    self.engine.ask(request_id, question);
                }
                Effect::IngestFiles { request_id, files } => {
                    desk_info!("IngestFiles request_id={} files={}", request_id, files.len());
                    let paths = files
                        .into_iter()
                        .map(|file| file.path().to_path_buf())
                        .collect();
                    self.engine.ingest_files(request_id, paths);
                }
                Effect::IngestUrls { request_id, urls } => {
                    desk_info!("IngestUrls request_id={} urls={}", request_id, urls.len());
                    self.engine.ingest_urls(request_id, urls);
                }
                Effect::ScrollToLatest => {
                    // handled by the screen
                }
            }
        }
    }
}

/// Sink that feeds engine settlements back into the message loop as [`Msg`]s.
pub fn loop_sink(tx: mpsc::Sender<LoopEvent>) -> Arc<dyn EventSink> {
    Arc::new(MsgSink { tx })
}

struct MsgSink {
    tx: mpsc::Sender<LoopEvent>,
}

impl EventSink for MsgSink {
    fn emit(&self, event: EngineEvent) {
        let _ = self.tx.send(LoopEvent::Core(map_event(event)));
    }
}

pub(crate) fn map_event(event: EngineEvent) -> Msg {
    match event {
        EngineEvent::Answered { request_id, result } => Msg::QuerySettled {
            request_id,
            result: result.map(map_answer).map_err(|err| {
                desk_warn!("Query {} failed: {}", request_id, err);
                RequestFailed::new(err.to_string())
            }),
        },
        EngineEvent::Ingested { request_id, result } => Msg::IngestionSettled {
            request_id,
            result: result
                .map(|response| {
                    if let Some(message) = &response.message {
                        desk_info!("Ingestion {} settled: {}", request_id, message);
                    }
                    IngestReceipt {
                        document_count: response.document_count,
                    }
                })
                .map_err(|err| {
                    desk_warn!("Ingestion {} failed: {}", request_id, err);
                    RequestFailed::new(err.to_string())
                }),
        },
    }
}

fn map_answer(response: QueryResponse) -> QueryAnswer {
    QueryAnswer {
        sources: response.sources.iter().map(map_source).collect(),
        answer: response.answer,
    }
}

fn map_source(document: &SourceDocument) -> Source {
    Source {
        content: document.content.clone(),
        metadata: SourceMetadata {
            file_name: document.file_name().map(ToOwned::to_owned),
            source: document.source().map(ToOwned::to_owned),
            extra: document
                .extra_metadata()
                .map(|(key, value)| (key.to_string(), value))
                .collect(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ragdesk_engine::{FailureKind, IngestResponse};

    fn document(json: &str) -> SourceDocument {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn answered_event_maps_sources_in_order() {
        let event = EngineEvent::Answered {
            request_id: 4,
            result: Ok(QueryResponse {
                answer: "X is Y.".to_string(),
                sources: vec![
                    document(r#"{"content":"a","metadata":{"file_name":"doc1.pdf","page":2}}"#),
                    document(r#"{"content":"b","metadata":{"source":"https://b.example.com"}}"#),
                ],
            }),
        };

        let Msg::QuerySettled { request_id, result } = map_event(event) else {
            panic!("expected query settlement");
        };
        let answer = result.unwrap();
        assert_eq!(request_id, 4);
        assert_eq!(answer.answer, "X is Y.");
        assert_eq!(answer.sources[0].metadata.identifier(), Some("doc1.pdf"));
        assert_eq!(
            answer.sources[0].metadata.extra.get("page").map(String::as_str),
            Some("2")
        );
        assert_eq!(
            answer.sources[1].metadata.identifier(),
            Some("https://b.example.com")
        );
    }

    #[test]
    fn failures_collapse_into_request_failed() {
        let event = EngineEvent::Ingested {
            request_id: 2,
            result: Err(ragdesk_engine::RequestFailed {
                kind: FailureKind::HttpStatus(500),
                message: "500 Internal Server Error".to_string(),
            }),
        };

        let Msg::IngestionSettled { request_id, result } = map_event(event) else {
            panic!("expected ingestion settlement");
        };
        assert_eq!(request_id, 2);
        assert!(result.unwrap_err().reason.contains("http status 500"));
    }

    #[test]
    fn ingested_event_carries_document_count() {
        let event = EngineEvent::Ingested {
            request_id: 1,
            result: Ok(IngestResponse {
                message: Some("Processed 3 files".to_string()),
                document_count: 12,
            }),
        };

        assert_eq!(
            map_event(event),
            Msg::IngestionSettled {
                request_id: 1,
                result: Ok(IngestReceipt { document_count: 12 }),
            }
        );
    }
}
