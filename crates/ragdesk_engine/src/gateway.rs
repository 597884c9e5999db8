use std::path::{Path, PathBuf};
use std::time::Duration;

use ragdesk_logging::{desk_debug, desk_warn};
use reqwest::multipart::{Form, Part};
use serde::de::DeserializeOwned;
use url::Url;

use crate::types::{QueryRequest, UrlBatchRequest};
use crate::{FailureKind, IngestResponse, QueryResponse, RequestFailed};

/// Multipart field name every uploaded file is attached under.
pub const FILES_FIELD: &str = "files";

const QUERY_PATH: &str = "query";
const UPLOAD_PATH: &str = "upload";
const PROCESS_URLS_PATH: &str = "process-urls";

#[derive(Debug, Clone)]
pub struct GatewaySettings {
    pub base_url: String,
    pub connect_timeout: Duration,
    /// `None` waits for the backend indefinitely.
    pub request_timeout: Option<Duration>,
}

impl Default for GatewaySettings {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8000".to_string(),
            connect_timeout: Duration::from_secs(10),
            request_timeout: None,
        }
    }
}

/// The three remote calls. One attempt each, no retries.
#[async_trait::async_trait]
pub trait Gateway: Send + Sync {
    async fn ask(&self, question: &str) -> Result<QueryResponse, RequestFailed>;

    async fn ingest_files(&self, files: &[PathBuf]) -> Result<IngestResponse, RequestFailed>;

    async fn ingest_urls(&self, urls: &[String]) -> Result<IngestResponse, RequestFailed>;
}

#[derive(Debug, Clone)]
pub struct ReqwestGateway {
    base_url: Url,
    client: reqwest::Client,
}

impl ReqwestGateway {
    pub fn new(settings: GatewaySettings) -> Result<Self, RequestFailed> {
        let mut base_url = Url::parse(settings.base_url.trim())
            .map_err(|err| RequestFailed::new(FailureKind::InvalidBaseUrl, err.to_string()))?;
        if base_url.cannot_be_a_base() {
            return Err(RequestFailed::new(
                FailureKind::InvalidBaseUrl,
                format!("{base_url} cannot be used as a base url"),
            ));
        }
        // Endpoints are joined relative to the base, which needs a trailing slash
        // so that a path prefix like `/api` is kept.
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        let mut builder = reqwest::Client::builder().connect_timeout(settings.connect_timeout);
        if let Some(timeout) = settings.request_timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|err| RequestFailed::new(FailureKind::Network, err.to_string()))?;

        Ok(Self { base_url, client })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> Result<Url, RequestFailed> {
        self.base_url
            .join(path)
            .map_err(|err| RequestFailed::new(FailureKind::InvalidBaseUrl, err.to_string()))
    }

    async fn send<T: DeserializeOwned>(
        &self,
        operation: &str,
        request: reqwest::RequestBuilder,
    ) -> Result<T, RequestFailed> {
        let result: Result<T, RequestFailed> = async {
            let response = request.send().await.map_err(map_reqwest_error)?;
            let status = response.status();
            if !status.is_success() {
                return Err(RequestFailed::new(
                    FailureKind::HttpStatus(status.as_u16()),
                    status.to_string(),
                ));
            }
            response.json::<T>().await.map_err(|err| {
                if err.is_decode() {
                    RequestFailed::new(FailureKind::Decode, err.to_string())
                } else {
                    map_reqwest_error(err)
                }
            })
        }
        .await;

        if let Err(err) = &result {
            desk_warn!("{} failed: {}", operation, err);
        }
        result
    }
}

#[async_trait::async_trait]
impl Gateway for ReqwestGateway {
    async fn ask(&self, question: &str) -> Result<QueryResponse, RequestFailed> {
        if question.trim().is_empty() {
            return Err(RequestFailed::new(
                FailureKind::InvalidInput,
                "question is empty",
            ));
        }
        let url = self.endpoint(QUERY_PATH)?;
        desk_debug!("POST {} question_len={}", url, question.len());
        let request = self.client.post(url).json(&QueryRequest { question });
        self.send("query", request).await
    }

    async fn ingest_files(&self, files: &[PathBuf]) -> Result<IngestResponse, RequestFailed> {
        if files.is_empty() {
            return Err(RequestFailed::new(
                FailureKind::InvalidInput,
                "no files selected",
            ));
        }
        let mut form = Form::new();
        for path in files {
            form = form.part(FILES_FIELD, file_part(path).await?);
        }
        let url = self.endpoint(UPLOAD_PATH)?;
        desk_debug!("POST {} files={}", url, files.len());
        let request = self.client.post(url).multipart(form);
        self.send("upload", request).await
    }

    async fn ingest_urls(&self, urls: &[String]) -> Result<IngestResponse, RequestFailed> {
        if urls.is_empty() {
            return Err(RequestFailed::new(FailureKind::InvalidInput, "no urls given"));
        }
        let url = self.endpoint(PROCESS_URLS_PATH)?;
        desk_debug!("POST {} urls={}", url, urls.len());
        let request = self.client.post(url).json(&UrlBatchRequest { urls });
        self.send("process-urls", request).await
    }
}

async fn file_part(path: &Path) -> Result<Part, RequestFailed> {
    let bytes = tokio::fs::read(path).await.map_err(|err| {
        RequestFailed::new(
            FailureKind::FileRead,
            format!("{}: {}", path.display(), err),
        )
    })?;
    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());
    let mime = mime_guess::from_path(path).first_or_octet_stream();

    Part::bytes(bytes)
        .file_name(file_name)
        .mime_str(mime.essence_str())
        .map_err(|err| RequestFailed::new(FailureKind::InvalidInput, err.to_string()))
}

fn map_reqwest_error(err: reqwest::Error) -> RequestFailed {
    if err.is_timeout() {
        return RequestFailed::new(FailureKind::Timeout, err.to_string());
    }
    RequestFailed::new(FailureKind::Network, err.to_string())
}
