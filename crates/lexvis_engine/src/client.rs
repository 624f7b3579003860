use std::time::{Duration, Instant};

use futures_util::StreamExt;
use lexvis_core::GrammarArtifact;
use lexvis_logging::{lexvis_debug, lexvis_warn};
use reqwest::multipart::{Form, Part};
use reqwest::Url;

use crate::response::{error_detail, probe_output};
use crate::{FailureKind, ProbeOutput, TokenizeError, TokenizeOutput, TokenizeResponse};

pub const TOKENIZE_PATH: &str = "/api/tokenize";
pub const PROBE_PATH: &str = "/";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientSettings {
    pub base_url: String,
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
    pub max_response_bytes: u64,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:8000".to_string(),
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(30),
            max_response_bytes: 16 * 1024 * 1024,
        }
    }
}

impl ClientSettings {
    pub fn endpoint(&self, path: &str) -> Result<Url, TokenizeError> {
        Url::parse(&self.base_url)
            .and_then(|base| base.join(path))
            .map_err(|err| {
                TokenizeError::new(
                    FailureKind::InvalidEndpoint,
                    format!("{}: {err}", self.base_url),
                )
            })
    }
}

#[async_trait::async_trait]
pub trait TokenizeClient: Send + Sync {
    async fn tokenize(
        &self,
        grammar: &GrammarArtifact,
        input_text: &str,
    ) -> Result<TokenizeOutput, TokenizeError>;

    async fn probe(&self) -> Result<ProbeOutput, TokenizeError>;
}

#[derive(Debug, Clone)]
pub struct ReqwestTokenizeClient {
    settings: ClientSettings,
    client: reqwest::Client,
}

impl ReqwestTokenizeClient {
    pub fn new(settings: ClientSettings) -> Result<Self, TokenizeError> {
        let client = reqwest::Client::builder()
            .connect_timeout(settings.connect_timeout)
            .timeout(settings.request_timeout)
            .build()
            .map_err(|err| TokenizeError::new(FailureKind::Network, err.to_string()))?;
        Ok(Self { settings, client })
    }

    pub fn settings(&self) -> &ClientSettings {
        &self.settings
    }

    fn build_form(grammar: &GrammarArtifact, input_text: &str) -> Result<Form, TokenizeError> {
        let part = Part::bytes(grammar.bytes().to_vec())
            .file_name(grammar.name().to_string())
            .mime_str(grammar.media_type())
            .map_err(|err| TokenizeError::new(FailureKind::InvalidRequest, err.to_string()))?;
        Ok(Form::new()
            .part("grammar_file", part)
            .text("input_text", input_text.to_string()))
    }

    async fn read_body(&self, response: reqwest::Response) -> Result<Vec<u8>, TokenizeError> {
        let max_bytes = self.settings.max_response_bytes;
        if let Some(content_len) = response.content_length() {
            if content_len > max_bytes {
                return Err(TokenizeError::new(
                    FailureKind::TooLarge {
                        max_bytes,
                        actual: Some(content_len),
                    },
                    "response too large",
                ));
            }
        }

        let mut bytes = Vec::new();
        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(map_reqwest_error)?;
            let next_len = bytes.len() as u64 + chunk.len() as u64;
            if next_len > max_bytes {
                return Err(TokenizeError::new(
                    FailureKind::TooLarge {
                        max_bytes,
                        actual: Some(next_len),
                    },
                    "response too large",
                ));
            }
            bytes.extend_from_slice(&chunk);
        }
        Ok(bytes)
    }

    async fn status_error(&self, response: reqwest::Response) -> TokenizeError {
        let status = response.status();
        // The body is only for the diagnostic message; a failed read is not fatal.
        let detail = match self.read_body(response).await {
            Ok(body) => error_detail(&body),
            Err(err) => {
                lexvis_debug!("Could not read error body: {}", err);
                None
            }
        };
        let message = match detail {
            Some(detail) => format!("{status}: {detail}"),
            None => status.to_string(),
        };
        TokenizeError::new(FailureKind::HttpStatus(status.as_u16()), message)
    }
}

#[async_trait::async_trait]
impl TokenizeClient for ReqwestTokenizeClient {
    async fn tokenize(
        &self,
        grammar: &GrammarArtifact,
        input_text: &str,
    ) -> Result<TokenizeOutput, TokenizeError> {
        let url = self.settings.endpoint(TOKENIZE_PATH)?;
        let form = Self::build_form(grammar, input_text)?;
        let started = Instant::now();

        lexvis_debug!(
            "POST {} grammar={} grammar_bytes={} input_len={}",
            url,
            grammar.name(),
            grammar.size(),
            input_text.len()
        );
        let response = self
            .client
            .post(url)
            .multipart(form)
            .send()
            .await
            .map_err(map_reqwest_error)?;

        if !response.status().is_success() {
            return Err(self.status_error(response).await);
        }

        let body = self.read_body(response).await?;
        let parsed = TokenizeResponse::parse(&body)?;
        if let Some(echoed) = parsed.input_text.as_deref() {
            if echoed != input_text {
                lexvis_warn!(
                    "Service echoed different input (sent {} bytes, echoed {} bytes)",
                    input_text.len(),
                    echoed.len()
                );
            }
        }

        Ok(TokenizeOutput {
            tokens: parsed.tokens,
            echoed_input: parsed.input_text,
            elapsed: started.elapsed(),
        })
    }

    async fn probe(&self) -> Result<ProbeOutput, TokenizeError> {
        let url = self.settings.endpoint(PROBE_PATH)?;
        let response = self.client.get(url).send().await.map_err(map_reqwest_error)?;
        if !response.status().is_success() {
            return Err(self.status_error(response).await);
        }
        let body = self.read_body(response).await?;
        Ok(probe_output(&body))
    }
}

fn map_reqwest_error(err: reqwest::Error) -> TokenizeError {
    if err.is_timeout() {
        return TokenizeError::new(FailureKind::Timeout, err.to_string());
    }
    TokenizeError::new(FailureKind::Network, err.to_string())
}
