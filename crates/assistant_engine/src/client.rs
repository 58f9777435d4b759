use assistant_core::{AnalysisRequest, AnalysisResult};
use assistant_logging::{assistant_debug, assistant_info, assistant_warn};
use reqwest::header::{ACCEPT, CONTENT_TYPE};

use crate::wire::{parse_analysis, AnalyzeBody, ErrorBody};
use crate::{AnalyzeError, AnalyzeSettings, FailureKind};

pub(crate) const GENERIC_FAILURE: &str = "Request failed";

#[async_trait::async_trait]
pub trait Analyzer: Send + Sync {
    async fn analyze(&self, request: &AnalysisRequest) -> Result<AnalysisResult, AnalyzeError>;
}

#[derive(Debug, Clone)]
pub struct ReqwestAnalyzer {
    settings: AnalyzeSettings,
    client: reqwest::Client,
}

impl ReqwestAnalyzer {
    pub fn new(settings: AnalyzeSettings) -> Result<Self, AnalyzeError> {
        let mut builder = reqwest::Client::builder().connect_timeout(settings.connect_timeout);
        if let Some(timeout) = settings.request_timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|err| AnalyzeError::new(FailureKind::Network, err.to_string()))?;
        Ok(Self { settings, client })
    }
}

#[async_trait::async_trait]
impl Analyzer for ReqwestAnalyzer {
    async fn analyze(&self, request: &AnalysisRequest) -> Result<AnalysisResult, AnalyzeError> {
        let body = serde_json::to_vec(&AnalyzeBody::from(request))
            .map_err(|err| AnalyzeError::new(FailureKind::InvalidResponse, err.to_string()))?;

        let mut builder = self
            .client
            .post(&self.settings.endpoint)
            .header(CONTENT_TYPE, "application/json")
            .header(ACCEPT, "application/json")
            .body(body);
        if let Some(token) = &self.settings.bearer_token {
            builder = builder.bearer_auth(token);
        }

        assistant_debug!(
            "POST {} student={} text_chars={}",
            self.settings.endpoint,
            request.subject_id,
            request.text.chars().count()
        );
        let response = builder.send().await.map_err(map_reqwest_error)?;
        let status = response.status();
        let bytes = response.bytes().await.map_err(map_reqwest_error)?;

        if !status.is_success() {
            let message = failure_message(status.as_u16(), &bytes);
            assistant_warn!("analysis rejected with {}: {}", status, message);
            return Err(AnalyzeError::new(
                FailureKind::HttpStatus(status.as_u16()),
                message,
            ));
        }

        let result = parse_analysis(&bytes).map_err(|err| {
            AnalyzeError::new(
                FailureKind::InvalidResponse,
                format!("invalid response body: {err}"),
            )
        })?;
        assistant_info!(
            "analysis ok: technical={} category={:?}",
            result.guidance.is_technical(),
            result.category
        );
        Ok(result)
    }
}

/// Message for a non-2xx answer: the body's `detail` when it carries one,
/// otherwise `HTTP <status>`.
///
/// A non-string `detail` (validation error lists) is shown as compact JSON.
pub fn failure_message(status: u16, body: &[u8]) -> String {
    let detail = serde_json::from_slice::<ErrorBody>(body)
        .ok()
        .and_then(|body| body.detail);
    match detail {
        Some(serde_json::Value::String(text)) if !text.is_empty() => text,
        Some(serde_json::Value::String(_)) | Some(serde_json::Value::Null) | None => {
            format!("HTTP {status}")
        }
        Some(other) => other.to_string(),
    }
}

fn map_reqwest_error(err: reqwest::Error) -> AnalyzeError {
    let message = err.to_string();
    let message = if message.is_empty() {
        GENERIC_FAILURE.to_string()
    } else {
        message
    };
    if err.is_timeout() {
        return AnalyzeError::new(FailureKind::Timeout, message);
    }
    AnalyzeError::new(FailureKind::Network, message)
}
