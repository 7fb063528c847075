//! Section segmenter: assigns every line of resume text to one section.
//!
//! Headings are recognized by keyword. The rule table below is evaluated top to
//! bottom and the first rule whose pattern appears anywhere in the lowercased
//! line wins, so the order of `HEADING_RULES` is the priority order.

use std::sync::LazyLock;

use regex::Regex;

use crate::pipeline::models::SectionedResume;
use crate::pipeline::text::normalize_text;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Section {
    #[default]
    Header,
    Objective,
    Education,
    Skills,
    Projects,
    Certifications,
    Experience,
}

/// (section, pattern) in priority order.
static HEADING_RULES: LazyLock<Vec<(Section, Regex)>> = LazyLock::new(|| {
    [
        (Section::Objective, r"objective|summary|career goal"),
        (Section::Education, r"education|academics|qualification"),
        (Section::Skills, r"skills|technical skills|core skills"),
        (Section::Projects, r"project|projects|portfolio|work samples"),
        (Section::Certifications, r"certifications|courses|achievements"),
        (Section::Experience, r"experience|work history|employment"),
    ]
    .into_iter()
    .map(|(section, pattern)| (section, Regex::new(pattern).unwrap()))
    .collect()
});

/// Two or more capitalized words and nothing else, e.g. "Jane Doe".
static NAME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Z][a-z]+(?:\s[A-Z][a-z]+)+$").unwrap());

/// Returns the section a heading line switches to, if any.
pub fn classify_heading(line: &str) -> Option<Section> {
    let lowered = line.to_lowercase();
    HEADING_RULES
        .iter()
        .find(|(_, re)| re.is_match(&lowered))
        .map(|(section, _)| *section)
}

/// State carried through the fold over lines.
#[derive(Debug, Default)]
struct SegmenterState {
    current: Section,
    sections: SectionedResume,
}

impl SegmenterState {
    fn step(mut self, line: String) -> Self {
        if let Some(section) = classify_heading(&line) {
            self.current = section;
            return self;
        }

        match self.current {
            Section::Header if self.sections.name.is_empty() && NAME_RE.is_match(&line) => {
                self.sections.name = line;
            }
            Section::Header => push_line(&mut self.sections.contact, &line, ' '),
            Section::Objective => push_line(&mut self.sections.objective, &line, '\n'),
            Section::Education => push_line(&mut self.sections.education, &line, '\n'),
            Section::Skills => push_line(&mut self.sections.skills, &line, '\n'),
            Section::Projects => push_line(&mut self.sections.projects, &line, '\n'),
            Section::Certifications => {
                push_line(&mut self.sections.certifications, &line, '\n')
            }
            Section::Experience => push_line(&mut self.sections.experience, &line, '\n'),
        }
        self
    }
}

fn push_line(buf: &mut String, line: &str, marker: char) {
    buf.push_str(line);
    buf.push(marker);
}

/// Splits raw extracted text into labeled sections.
pub fn segment(raw_text: &str) -> SectionedResume {
    let state = raw_text
        .split('\n')
        .map(normalize_text)
        .filter(|line| !line.is_empty())
        .fold(SegmenterState::default(), SegmenterState::step);

    let s = state.sections;
    SectionedResume {
        name: normalize_text(&s.name),
        contact: normalize_text(&s.contact),
        objective: normalize_text(&s.objective),
        experience: normalize_text(&s.experience),
        projects: normalize_text(&s.projects),
        education: normalize_text(&s.education),
        skills: normalize_text(&s.skills),
        certifications: normalize_text(&s.certifications),
    }
}
