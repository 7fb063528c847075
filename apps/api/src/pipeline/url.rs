//! URL normalizer: rewrites share links into direct-download links.
//!
//! Rules are tried in order and the first one that applies wins. A Google Drive
//! link without a recognizable file id falls through to the remaining rules.

use std::sync::LazyLock;

use regex::Regex;

use crate::pipeline::models::{NormalizedUrl, SourceType};

/// Drive file-id patterns, highest priority first.
static DRIVE_ID_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        r"/d/([a-zA-Z0-9_-]+)",
        r"id=([a-zA-Z0-9_-]+)",
        r"/open\?id=([a-zA-Z0-9_-]+)",
    ]
    .iter()
    .map(|p| Regex::new(p).unwrap())
    .collect()
});

static DOCUMENT_EXTENSION_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\.(pdf|doc|docx|txt|rtf|pptx)$").unwrap());

pub fn normalize_url(input: &str) -> NormalizedUrl {
    let url = input.trim();

    if url.contains("drive.google.com") || url.contains("docs.google.com") {
        if let Some(id) = drive_file_id(url) {
            return NormalizedUrl {
                source_type: SourceType::GoogleDrive,
                direct_url: format!("https://drive.google.com/uc?export=download&id={id}"),
            };
        }
    }

    if url.contains("dropbox.com") {
        return NormalizedUrl {
            source_type: SourceType::Dropbox,
            direct_url: url.replacen("dl=0", "dl=1", 1),
        };
    }

    if url.contains("onedrive") || url.contains("sharepoint") {
        let direct_url = if url.contains("download") {
            url.to_string()
        } else {
            format!("{url}&download=1")
        };
        return NormalizedUrl {
            source_type: SourceType::OnedriveSharepoint,
            direct_url,
        };
    }

    if url.contains("cloudfront.net") {
        return passthrough(url, SourceType::Cloudfront);
    }

    if url.contains("github.com") {
        return NormalizedUrl {
            source_type: SourceType::Github,
            direct_url: url
                .replacen("github.com", "raw.githubusercontent.com", 1)
                .replacen("/blob/", "/", 1),
        };
    }

    if DOCUMENT_EXTENSION_RE.is_match(url) {
        return passthrough(url, SourceType::Direct);
    }

    passthrough(url, SourceType::Unknown)
}

fn drive_file_id(url: &str) -> Option<&str> {
    DRIVE_ID_PATTERNS
        .iter()
        .find_map(|re| re.captures(url)?.get(1))
        .map(|m| m.as_str())
}

fn passthrough(url: &str, source_type: SourceType) -> NormalizedUrl {
    NormalizedUrl {
        source_type,
        direct_url: url.to_string(),
    }
}
