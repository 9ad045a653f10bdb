pub mod document;
pub mod handlers;
pub mod parser;
pub mod sections;
pub mod skills;

pub use document::{DocumentKind, DocumentTextExtractor, TextExtractor};
pub use parser::ResumeParser;
pub use sections::SectionExtractor;
pub use skills::{SkillCatalog, SkillExtractor};
