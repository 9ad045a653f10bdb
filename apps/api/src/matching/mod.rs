pub mod handlers;
pub mod matcher;
pub mod text;
pub mod tfidf;

pub use matcher::JobMatcher;
