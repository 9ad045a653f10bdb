//! Jobify: resume parsing, job matching and career path recommendation.

pub mod analysis;
pub mod career;
pub mod config;
pub mod errors;
pub mod extraction;
pub mod matching;
pub mod models;
pub mod routes;
pub mod state;
