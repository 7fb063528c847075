use serde::{Deserialize, Serialize};

/// Where a resume link points, as classified by the URL normalizer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceType {
    GoogleDrive,
    Dropbox,
    OnedriveSharepoint,
    Cloudfront,
    Github,
    Direct,
    Unknown,
}

/// A link rewritten so that a plain GET returns the file bytes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NormalizedUrl {
    pub source_type: SourceType,
    pub direct_url: String,
}

/// Binary format detected from the document's magic bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocumentFormat {
    Pdf,
    Docx,
    Doc,
    /// Recognized by the sniffer but not a resume format we can read.
    Other { mime: String },
}

impl DocumentFormat {
    pub fn mime_type(&self) -> &str {
        match self {
            DocumentFormat::Pdf => "application/pdf",
            DocumentFormat::Docx => {
                "application/vnd.openxmlformats-officedocument.wordprocessingml.document"
            }
            DocumentFormat::Doc => "application/msword",
            DocumentFormat::Other { mime } => mime,
        }
    }
}

/// Downloaded bytes together with their sniffed format.
#[derive(Debug, Clone)]
pub struct FetchedDocument {
    pub bytes: bytes::Bytes,
    pub format: DocumentFormat,
}

/// Resume text split into the fixed set of sections.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SectionedResume {
    pub name: String,
    pub contact: String,
    pub objective: String,
    pub experience: String,
    pub projects: String,
    pub education: String,
    pub skills: String,
    pub certifications: String,
}

/// Typed fields mined out of the contact and certifications sections.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractedFields {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub location: Option<String>,
    pub linkedin: Option<String>,
    pub github: Option<String>,
    pub experience: Option<String>,
    pub education: Option<String>,
    pub projects: Option<String>,
    pub certifications: Option<Vec<String>>,
    pub skills: Option<String>,
}

/// Final structured output handed back to callers.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResumeRecord {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub location: Option<String>,
    /// Uppercase degree codes, sorted and deduplicated.
    pub education: Vec<String>,
    pub skills: Vec<String>,
    pub experience: Option<String>,
    /// LinkedIn first, then GitHub. `None` when neither was found.
    pub profile_links: Option<Vec<String>>,
    pub projects: Option<String>,
    pub certifications: Option<Vec<String>>,
}
