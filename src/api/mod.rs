//! PoetryDB HTTP client and wire models

pub mod client;
pub mod models;
