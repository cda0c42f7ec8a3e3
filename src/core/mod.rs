//! Core layer: request building, result formatting and action flow.

pub mod actions;
pub mod format;
pub mod heading;
pub mod query;
pub mod session;
