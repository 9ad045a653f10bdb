pub mod handlers;
pub mod market;
pub mod suggestions;

pub use market::{market_insights, MarketInsights};
pub use suggestions::{ResumeAnalyzer, Suggestion};
