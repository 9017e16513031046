//! External summarization service boundary.
//!
//! The pipeline treats summarization as a black box: one chunk of text in,
//! one summary string out, deterministic decoding requested. The default
//! client speaks the Hugging Face inference API, matching the hosted
//! `sshleifer/distilbart-cnn-12-6` model.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::config::SummarizerConfig;

/// Error type for summarization operations
#[derive(Debug, thiserror::Error)]
pub enum SummarizeError {
    #[error("Failed to build HTTP client: {0}")]
    ClientInit(String),

    #[error("Summarization request failed: {0}")]
    Request(String),

    #[error("Summarization service returned status {status}: {body}")]
    Service { status: u16, body: String },

    #[error("Summarization service returned no candidates")]
    EmptyResponse,
}

/// Length bounds requested from the model with every call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SummaryBounds {
    pub max_length: usize,
    pub min_length: usize,
}

impl From<&SummarizerConfig> for SummaryBounds {
    fn from(config: &SummarizerConfig) -> Self {
        Self {
            max_length: config.max_length,
            min_length: config.min_length,
        }
    }
}

/// Summarizes one chunk of text at a time.
///
/// Deterministic decoding is requested, so equal inputs should produce
/// equal summaries.
#[async_trait]
pub trait Summarizer: Send + Sync {
    async fn summarize(
        &self,
        text: &str,
        bounds: SummaryBounds,
    ) -> Result<String, SummarizeError>;
}

/// Client for a hosted summarization model.
///
/// Speaks the Hugging Face inference contract: POST a JSON body of
/// `{"inputs", "parameters"}`, receive `[{"summary_text"}]`.
pub struct HttpSummarizer {
    client: reqwest::Client,
    endpoint: String,
    api_token: Option<String>,
}

#[derive(Serialize)]
struct InferenceRequest<'a> {
    inputs: &'a str,
    parameters: InferenceParameters,
}

#[derive(Serialize)]
struct InferenceParameters {
    max_length: usize,
    min_length: usize,
    do_sample: bool,
}

#[derive(Deserialize)]
struct InferenceCandidate {
    summary_text: String,
}

impl HttpSummarizer {
    /// Build a client from configuration.
    ///
    /// No request timeout is set. Inference time varies wildly with input
    /// size; a hung endpoint stalls the calling worker.
    pub fn new(config: &SummarizerConfig) -> Result<Self, SummarizeError> {
        let client = reqwest::Client::builder()
            .build()
            .map_err(|e| SummarizeError::ClientInit(e.to_string()))?;

        Ok(Self {
            client,
            endpoint: config.endpoint.clone(),
            api_token: config.api_token.clone(),
        })
    }
}

#[async_trait]
impl Summarizer for HttpSummarizer {
    async fn summarize(
        &self,
        text: &str,
        bounds: SummaryBounds,
    ) -> Result<String, SummarizeError> {
        let request = InferenceRequest {
            inputs: text,
            parameters: InferenceParameters {
                max_length: bounds.max_length,
                min_length: bounds.min_length,
                do_sample: false,
            },
        };

        let mut builder = self.client.post(&self.endpoint).json(&request);
        if let Some(token) = &self.api_token {
            builder = builder.bearer_auth(token);
        }

        let response = builder
            .send()
            .await
            .map_err(|e| SummarizeError::Request(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(SummarizeError::Service {
                status: status.as_u16(),
                body,
            });
        }

        let candidates: Vec<InferenceCandidate> = response
            .json()
            .await
            .map_err(|e| SummarizeError::Request(e.to_string()))?;

        candidates
            .into_iter()
            .next()
            .map(|c| c.summary_text)
            .ok_or(SummarizeError::EmptyResponse)
    }
}
