//! Document fetcher: downloads resume bytes and sniffs their format.
//!
//! The format always comes from the content's magic bytes. URL extensions and
//! Content-Type headers are ignored because share links routinely lie.

use std::time::Duration;

use async_trait::async_trait;
use bytes::{Bytes, BytesMut};
use reqwest::Client;
use tracing::{debug, info};

use crate::pipeline::models::{DocumentFormat, FetchedDocument};
use crate::pipeline::PipelineError;

/// Anything that can turn a direct URL into document bytes.
///
/// Held by `ResumeParser` as `Arc<dyn DocumentSource>`.
#[async_trait]
pub trait DocumentSource: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<Bytes, PipelineError>;
}

/// Single-attempt HTTP GET with a request timeout and a body size cap.
#[derive(Clone)]
pub struct HttpDocumentSource {
    client: Client,
    timeout: Duration,
    max_bytes: usize,
}

impl HttpDocumentSource {
    pub fn new(timeout: Duration, max_bytes: usize) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            timeout,
            max_bytes,
        })
    }

    fn error(&self, url: &str, reason: impl Into<String>) -> PipelineError {
        PipelineError::Fetch {
            url: url.to_string(),
            reason: reason.into(),
        }
    }

    fn transport_error(&self, url: &str, e: reqwest::Error) -> PipelineError {
        if e.is_timeout() {
            self.error(url, format!("timed out after {}s", self.timeout.as_secs_f64()))
        } else {
            self.error(url, e.to_string())
        }
    }
}

#[async_trait]
impl DocumentSource for HttpDocumentSource {
    async fn fetch(&self, url: &str) -> Result<Bytes, PipelineError> {
        let mut response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| self.transport_error(url, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(self.error(url, format!("HTTP {status}")));
        }

        if let Some(declared) = response.content_length() {
            if declared > self.max_bytes as u64 {
                return Err(self.error(
                    url,
                    format!("document is {declared} bytes, limit is {}", self.max_bytes),
                ));
            }
        }

        // Chunked responses carry no length, so the cap is enforced while reading.
        let mut body = BytesMut::new();
        while let Some(chunk) = response
            .chunk()
            .await
            .map_err(|e| self.transport_error(url, e))?
        {
            body.extend_from_slice(&chunk);
            if body.len() > self.max_bytes {
                return Err(self.error(
                    url,
                    format!("document exceeds limit of {} bytes", self.max_bytes),
                ));
            }
        }
        let body = body.freeze();

        debug!("Fetched {} bytes from {}", body.len(), url);
        Ok(body)
    }
}

/// Classifies bytes by signature. `None` means nothing was recognized.
pub fn sniff_format(buf: &[u8]) -> Option<DocumentFormat> {
    let kind = infer::get(buf)?;
    let format = match kind.extension() {
        "pdf" => DocumentFormat::Pdf,
        "docx" => DocumentFormat::Docx,
        "doc" => DocumentFormat::Doc,
        "zip" if infer::doc::is_docx(buf) => DocumentFormat::Docx,
        _ => DocumentFormat::Other {
            mime: kind.mime_type().to_string(),
        },
    };
    Some(format)
}

/// Fetches `url` and sniffs the result, failing when no format is recognized.
pub async fn fetch_document(
    source: &dyn DocumentSource,
    url: &str,
) -> Result<FetchedDocument, PipelineError> {
    let bytes = source.fetch(url).await?;
    let format = sniff_format(&bytes).ok_or(PipelineError::UnknownFormat)?;
    info!(
        "Fetched document: {} bytes, detected {}",
        bytes.len(),
        format.mime_type()
    );
    Ok(FetchedDocument { bytes, format })
}
