//! Field extractor: pattern matching over the contact and certifications sections.
//!
//! Nothing here fails: a field that does not match is left as `None`.

use std::sync::LazyLock;

use regex::Regex;

use crate::pipeline::models::{ExtractedFields, SectionedResume};

static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}").unwrap());

static LINKEDIN_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(?:https?://)?(?:www\.)?linkedin\.com/\S+|linkedin/\S+").unwrap()
});

static GITHUB_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(?:https?://)?(?:www\.)?github\.com/\S+|github/\S+").unwrap()
});

/// Two or three comma-separated groups of capitalized words, e.g.
/// "Pune, Maharashtra, India" or "New Delhi, Delhi".
static LOCATION_RE: LazyLock<Regex> = LazyLock::new(|| {
    let group = r"[A-Z][A-Za-z]*(?:[ -][A-Z][A-Za-z]*)*";
    Regex::new(&format!(r"\b{group},\s*{group}(?:,\s*{group})?\b")).unwrap()
});

static CERTIFICATION_SPLIT_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[|\n]+").unwrap());

/// Extracts typed fields. Holds the phone pattern, which depends on the
/// configured country code.
#[derive(Debug, Clone)]
pub struct FieldExtractor {
    country_code: String,
    phone_re: Regex,
}

impl FieldExtractor {
    pub fn new(country_code: &str) -> Self {
        let phone_re = Regex::new(&format!(r"({}[\s-]?)?(\d{{10}})", regex::escape(country_code)))
            .expect("escaped country code always forms a valid pattern");
        Self {
            country_code: country_code.to_string(),
            phone_re,
        }
    }

    pub fn extract(&self, sections: SectionedResume) -> ExtractedFields {
        let contact = sections.contact.as_str();

        ExtractedFields {
            email: first_match(&EMAIL_RE, contact),
            phone: self.phone(contact),
            location: first_match(&LOCATION_RE, contact),
            linkedin: first_match(&LINKEDIN_RE, contact),
            github: first_match(&GITHUB_RE, contact),
            certifications: split_certifications(&sections.certifications),
            name: non_empty(sections.name),
            experience: non_empty(sections.experience),
            education: non_empty(sections.education),
            projects: non_empty(sections.projects),
            skills: non_empty(sections.skills),
        }
    }

    /// Always formatted as `<country code>-<10 digits>`, whether or not the
    /// source carried the code.
    pub fn phone(&self, contact: &str) -> Option<String> {
        let caps = self.phone_re.captures(contact)?;
        Some(format!("{}-{}", self.country_code, &caps[2]))
    }
}

impl Default for FieldExtractor {
    fn default() -> Self {
        Self::new("+91")
    }
}

fn first_match(re: &Regex, haystack: &str) -> Option<String> {
    re.find(haystack).map(|m| m.as_str().to_string())
}

fn non_empty(s: String) -> Option<String> {
    if s.is_empty() {
        None
    } else {
        Some(s)
    }
}

fn split_certifications(section: &str) -> Option<Vec<String>> {
    if section.is_empty() {
        return None;
    }
    let items = CERTIFICATION_SPLIT_RE
        .split(section)
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(String::from)
        .collect();
    Some(items)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn contact(text: &str) -> SectionedResume {
        SectionedResume {
            contact: text.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_phone_with_country_code() {
        let fx = FieldExtractor::default();
        assert_eq!(
            fx.phone("Reach me at +91 9876543210").as_deref(),
            Some("+91-9876543210")
        );
        assert_eq!(fx.phone("+91-9876543210").as_deref(), Some("+91-9876543210"));
    }

    #[test]
    fn test_phone_without_country_code() {
        let fx = FieldExtractor::default();
        assert_eq!(fx.phone("9876543210").as_deref(), Some("+91-9876543210"));
    }

    #[test]
    fn test_phone_missing() {
        let fx = FieldExtractor::default();
        assert_eq!(fx.phone("call 98765"), None);
    }

    #[test]
    fn test_phone_uses_configured_country_code() {
        let fx = FieldExtractor::new("+1");
        assert_eq!(fx.phone("+1 4155550123").as_deref(), Some("+1-4155550123"));
    }

    #[test]
    fn test_email_first_match() {
        let f = FieldExtractor::default()
            .extract(contact("mail jane.doe+cv@mail.example.com or j@x.io"));
        assert_eq!(f.email.as_deref(), Some("jane.doe+cv@mail.example.com"));
    }

    #[test]
    fn test_profile_links() {
        let f = FieldExtractor::default().extract(contact(
            "https://www.LinkedIn.com/in/jane-doe github.com/janedoe jane@x.com",
        ));
        assert_eq!(
            f.linkedin.as_deref(),
            Some("https://www.LinkedIn.com/in/jane-doe")
        );
        assert_eq!(f.github.as_deref(), Some("github.com/janedoe"));
    }

    #[test]
    fn test_profile_link_shorthand() {
        let f = FieldExtractor::default().extract(contact("LinkedIn/janedoe GitHub/jd"));
        assert_eq!(f.linkedin.as_deref(), Some("LinkedIn/janedoe"));
        assert_eq!(f.github.as_deref(), Some("GitHub/jd"));
    }

    #[test]
    fn test_location_three_groups() {
        let f = FieldExtractor::default()
            .extract(contact("jane@x.com 9876543210 Pune, Maharashtra, India"));
        assert_eq!(f.location.as_deref(), Some("Pune, Maharashtra, India"));
    }

    #[test]
    fn test_location_multiword_groups() {
        let f = FieldExtractor::default().extract(contact("Navi Mumbai, Maharashtra"));
        assert_eq!(f.location.as_deref(), Some("Navi Mumbai, Maharashtra"));
    }

    #[test]
    fn test_location_absent() {
        let f = FieldExtractor::default().extract(contact("jane@x.com 9876543210"));
        assert_eq!(f.location, None);
    }

    #[test]
    fn test_certifications_split() {
        let sections = SectionedResume {
            certifications: "AWS SAA | CKA\nOCI Foundations\n |".to_string(),
            ..Default::default()
        };
        let f = FieldExtractor::default().extract(sections);
        assert_eq!(
            f.certifications,
            Some(vec![
                "AWS SAA".to_string(),
                "CKA".to_string(),
                "OCI Foundations".to_string()
            ])
        );
    }

    #[test]
    fn test_empty_sections_become_none() {
        let f = FieldExtractor::default().extract(SectionedResume::default());
        assert_eq!(f, ExtractedFields::default());
    }

    #[test]
    fn test_pass_through_sections() {
        let sections = SectionedResume {
            name: "Jane Doe".to_string(),
            experience: "Acme".to_string(),
            skills: "Rust".to_string(),
            ..Default::default()
        };
        let f = FieldExtractor::default().extract(sections);
        assert_eq!(f.name.as_deref(), Some("Jane Doe"));
        assert_eq!(f.experience.as_deref(), Some("Acme"));
        assert_eq!(f.skills.as_deref(), Some("Rust"));
        assert_eq!(f.projects, None);
    }
}
