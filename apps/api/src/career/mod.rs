pub mod experience;
pub mod handlers;
pub mod recommender;
pub mod rules;

pub use recommender::CareerPathRecommender;
pub use rules::{CareerRules, CategoryRule};
