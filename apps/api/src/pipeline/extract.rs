//! Text extractor: turns sniffed document bytes into plain text.
//!
//! CPU-bound. Callers on the async runtime must run it inside
//! `tokio::task::spawn_blocking`.

use std::io::{Cursor, Read};

use quick_xml::events::Event;
use quick_xml::Reader;
use tracing::warn;
use zip::ZipArchive;

use crate::pipeline::models::{DocumentFormat, FetchedDocument};
use crate::pipeline::PipelineError;

/// Prefix of the placeholder text produced for recognized but unreadable formats.
pub const UNSUPPORTED_SENTINEL_PREFIX: &str = "Unsupported file: ";

const WORD_DOCUMENT_PART: &str = "word/document.xml";

/// Extracts plain text from a fetched document.
///
/// For formats other than PDF and Word the result is the sentinel text
/// `Unsupported file: <mime>`, unless `reject_unsupported` turns that into an
/// `UnsupportedFormat` error.
pub fn extract_text(
    document: FetchedDocument,
    reject_unsupported: bool,
) -> Result<String, PipelineError> {
    let FetchedDocument { bytes, format } = document;
    match &format {
        DocumentFormat::Pdf => pdf_extract::extract_text_from_mem(&bytes)
            .map_err(|e| extraction_error(&format, e)),
        DocumentFormat::Docx | DocumentFormat::Doc => {
            extract_word(&bytes).map_err(|e| extraction_error(&format, e))
        }
        DocumentFormat::Other { mime } if reject_unsupported => {
            Err(PipelineError::UnsupportedFormat(mime.clone()))
        }
        DocumentFormat::Other { mime } => {
            warn!("No extractor for {mime}, continuing with placeholder text");
            Ok(format!("{UNSUPPORTED_SENTINEL_PREFIX}{mime}"))
        }
    }
}

/// True when `text` is the placeholder produced for an unsupported format.
pub fn is_unsupported_sentinel(text: &str) -> bool {
    text.starts_with(UNSUPPORTED_SENTINEL_PREFIX)
}

fn extraction_error(format: &DocumentFormat, e: impl std::fmt::Display) -> PipelineError {
    PipelineError::Extraction {
        format: format.mime_type().to_string(),
        reason: e.to_string(),
    }
}

/// Reads the main document part of an OOXML package. Legacy binary `.doc`
/// files are not zip archives and fail here.
fn extract_word(bytes: &[u8]) -> Result<String, String> {
    let mut archive = ZipArchive::new(Cursor::new(bytes))
        .map_err(|e| format!("not an OOXML package: {e}"))?;
    let mut xml = String::new();
    archive
        .by_name(WORD_DOCUMENT_PART)
        .map_err(|e| format!("missing {WORD_DOCUMENT_PART}: {e}"))?
        .read_to_string(&mut xml)
        .map_err(|e| format!("failed to read {WORD_DOCUMENT_PART}: {e}"))?;
    document_xml_to_text(&xml)
}

/// Collects `<w:t>` runs, one line per `<w:p>` paragraph. Styling is dropped.
fn document_xml_to_text(xml: &str) -> Result<String, String> {
    let mut reader = Reader::from_str(xml);
    let mut text = String::new();
    let mut in_text_run = false;

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) if e.local_name().as_ref() == b"t" => in_text_run = true,
            Ok(Event::End(e)) => match e.local_name().as_ref() {
                b"t" => in_text_run = false,
                b"p" => text.push('\n'),
                _ => {}
            },
            Ok(Event::Empty(e)) => match e.local_name().as_ref() {
                b"tab" => text.push('\t'),
                b"br" | b"cr" => text.push('\n'),
                _ => {}
            },
            Ok(Event::Text(e)) if in_text_run => {
                let run = e.unescape().map_err(|e| e.to_string())?;
                text.push_str(&run);
            }
            Ok(Event::Eof) => break,
            Err(e) => {
                return Err(format!(
                    "malformed XML at position {}: {e}",
                    reader.buffer_position()
                ))
            }
            _ => {}
        }
    }

    Ok(text)
}
