// Resume ingest pipeline.
// URL normalization → fetch + sniff → text extraction → segmentation → field
// extraction → normalization. Stages run strictly in order and each one consumes
// the previous stage's output.

pub mod extract;
pub mod fetch;
pub mod fields;
pub mod handlers;
pub mod models;
pub mod normalize;
pub mod sections;
pub mod text;
pub mod url;

#[cfg(test)]
pub(crate) mod test_support;

use std::sync::Arc;

use thiserror::Error;
use tracing::{debug, info, warn};

use crate::pipeline::extract::{extract_text, is_unsupported_sentinel};
use crate::pipeline::fetch::{fetch_document, DocumentSource};
use crate::pipeline::fields::FieldExtractor;
use crate::pipeline::models::ResumeRecord;
use crate::pipeline::normalize::normalize_resume;
use crate::pipeline::sections::segment;
use crate::pipeline::url::normalize_url;

/// Hard failures. Anything not listed here degrades to empty fields instead.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("Failed to fetch {url}: {reason}")]
    Fetch { url: String, reason: String },

    #[error("Could not determine file type")]
    UnknownFormat,

    #[error("Unsupported file: {0}")]
    UnsupportedFormat(String),

    #[error("Failed to extract text from {format}: {reason}")]
    Extraction { format: String, reason: String },
}

/// Pipeline knobs taken from `Config`.
#[derive(Debug, Clone)]
pub struct ParseOptions {
    /// Prefix used when formatting phone numbers, e.g. `+91`.
    pub phone_country_code: String,
    /// Fail with `UnsupportedFormat` instead of continuing with placeholder text.
    pub reject_unsupported_formats: bool,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            phone_country_code: "+91".to_string(),
            reject_unsupported_formats: false,
        }
    }
}

/// Turns a resume URL into a `ResumeRecord`.
pub struct ResumeParser {
    source: Arc<dyn DocumentSource>,
    fields: FieldExtractor,
    reject_unsupported_formats: bool,
}

impl ResumeParser {
    pub fn new(source: Arc<dyn DocumentSource>, options: &ParseOptions) -> Self {
        Self {
            source,
            fields: FieldExtractor::new(&options.phone_country_code),
            reject_unsupported_formats: options.reject_unsupported_formats,
        }
    }

    /// Runs the whole pipeline for one URL.
    ///
    /// Fetch, format and extraction failures abort with an error; nothing
    /// after text extraction can fail.
    pub async fn parse_resume(&self, url: &str) -> Result<ResumeRecord, PipelineError> {
        let normalized = normalize_url(url);
        info!(
            "Normalized {:?} link to {}",
            normalized.source_type, normalized.direct_url
        );

        let document = fetch_document(self.source.as_ref(), &normalized.direct_url).await?;
        let format = document.format.mime_type().to_string();

        let reject = self.reject_unsupported_formats;
        let raw_text = tokio::task::spawn_blocking(move || extract_text(document, reject))
            .await
            .map_err(|e| PipelineError::Extraction {
                format,
                reason: format!("extractor task failed: {e}"),
            })??;

        if is_unsupported_sentinel(&raw_text) {
            warn!("Parsing placeholder text: {raw_text}");
        }
        debug!("Extracted {} chars of text", raw_text.chars().count());

        Ok(self.parse_text(&raw_text))
    }

    /// The text-only stages: segmentation, field extraction, normalization.
    pub fn parse_text(&self, raw_text: &str) -> ResumeRecord {
        let sections = segment(raw_text);
        debug!(
            "Sections: contact={} experience={} education={} skills={} projects={} certifications={}",
            sections.contact.len(),
            sections.experience.len(),
            sections.education.len(),
            sections.skills.len(),
            sections.projects.len(),
            sections.certifications.len()
        );
        normalize_resume(self.fields.extract(sections))
    }
}
