use std::io::Read;

use tracing::info;

use crate::errors::AppError;
use crate::extraction::document::{DocumentKind, DocumentTextExtractor};
use crate::extraction::sections::SectionExtractor;
use crate::extraction::skills::SkillExtractor;
use crate::models::ResumeProfile;

/// Turns a resume document into a [`ResumeProfile`].
///
/// Holds no per-document state; one instance serves any number of calls.
pub struct ResumeParser {
    skills: SkillExtractor,
    sections: SectionExtractor,
    documents: DocumentTextExtractor,
}

impl ResumeParser {
    pub fn new(
        skills: SkillExtractor,
        sections: SectionExtractor,
        documents: DocumentTextExtractor,
    ) -> Self {
        Self {
            skills,
            sections,
            documents,
        }
    }

    pub fn skills(&self) -> &SkillExtractor {
        &self.skills
    }

    /// Reads the whole document from `reader`; the format comes from `filename`.
    pub fn parse<R: Read>(&self, mut reader: R, filename: &str) -> Result<ResumeProfile, AppError> {
        let kind = DocumentKind::from_filename(filename)?;
        let mut bytes = Vec::new();
        reader
            .read_to_end(&mut bytes)
            .map_err(|e| AppError::Extraction(format!("Failed to read '{filename}': {e}")))?;
        self.parse_kind(&bytes, kind, filename)
    }

    pub fn parse_bytes(&self, bytes: &[u8], filename: &str) -> Result<ResumeProfile, AppError> {
        let kind = DocumentKind::from_filename(filename)?;
        self.parse_kind(bytes, kind, filename)
    }

    fn parse_kind(
        &self,
        bytes: &[u8],
        kind: DocumentKind,
        filename: &str,
    ) -> Result<ResumeProfile, AppError> {
        let text = self.documents.extract(bytes, kind)?;
        let profile = self.parse_text(&text);
        info!(
            "Parsed '{}' ({:?}): {} skills, {} experience, {} education",
            filename,
            kind,
            profile.skills.len(),
            profile.experience.len(),
            profile.education.len()
        );
        Ok(profile)
    }

    /// Text-only stage: skills, sections and contact details.
    pub fn parse_text(&self, text: &str) -> ResumeProfile {
        ResumeProfile {
            skills: self.skills.extract(text),
            experience: self.sections.extract_experience(text),
            education: self.sections.extract_education(text),
            contact: self.sections.extract_contact(text),
        }
    }
}

impl Default for ResumeParser {
    fn default() -> Self {
        Self::new(
            SkillExtractor::default(),
            SectionExtractor::new(),
            DocumentTextExtractor::default(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extraction::document::tests::build_docx;
    use std::io::Cursor;

    #[test]
    fn test_parse_docx_end_to_end() {
        let bytes = build_docx(&[
            "Jane Doe",
            "jane@example.com",
            "Work Experience",
            "Software Engineer at Tech Corp (2018-2020)",
            "Built services in Python and Docker",
            "Education",
            "Bachelor of Science in Computer Science, University of Tech",
        ]);

        let profile = ResumeParser::default()
            .parse(Cursor::new(bytes), "jane.docx")
            .unwrap();

        assert!(profile.skills.contains("python"));
        assert!(profile.skills.contains("docker"));
        assert_eq!(profile.experience.len(), 1);
        assert_eq!(profile.experience[0].company, "Tech Corp");
        assert_eq!(
            profile.experience[0].description,
            "Built services in Python and Docker"
        );
        assert_eq!(profile.education.len(), 1);
        assert_eq!(profile.education[0].degree, "Bachelor");
        assert_eq!(profile.contact.email.as_deref(), Some("jane@example.com"));
    }

    #[test]
    fn test_unsupported_extension_rejected_before_reading() {
        let err = ResumeParser::default()
            .parse_bytes(b"plain text resume", "resume.txt")
            .unwrap_err();
        assert!(matches!(err, AppError::UnsupportedFormat(_)));
    }

    #[test]
    fn test_corrupt_docx_is_extraction_error() {
        let err = ResumeParser::default()
            .parse_bytes(b"PK\x03\x04 truncated", "resume.docx")
            .unwrap_err();
        assert!(matches!(err, AppError::Extraction(_)));
    }

    #[test]
    fn test_parse_text_without_entries() {
        let profile = ResumeParser::default().parse_text("Hobbies: hiking and chess");
        assert!(profile.skills.is_empty());
        assert!(profile.experience.is_empty());
        assert!(profile.education.is_empty());
    }
}
