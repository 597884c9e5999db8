//! Ragdesk engine: the request gateway and effect execution.
mod engine;
mod gateway;
mod types;

pub use engine::{ChannelEventSink, EngineHandle, EngineStartError, EventSink};
pub use gateway::{Gateway, GatewaySettings, ReqwestGateway, FILES_FIELD};
pub use types::{
    EngineEvent, FailureKind, IngestResponse, QueryResponse, RequestFailed, RequestId,
    SourceDocument,
};
