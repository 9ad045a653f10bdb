pub mod career;
pub mod job;
pub mod profile;

pub use career::{CareerPath, CareerRecommendation};
pub use job::{JobPosting, MatchResult};
pub use profile::{ContactInfo, EducationEntry, ExperienceEntry, ResumeProfile, SkillSet};
