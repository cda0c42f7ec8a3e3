//! Utils module - Shared utilities and helpers
//!
//! This module provides utility functions and helpers that are used across
//! multiple layers of the application architecture.

/// Conversions from transport/IO errors into the crate's error types
pub mod error_helpers;

/// Verbose output and tracing setup
pub mod logging;

/// Display-width aware text helpers
pub mod text;

/// Input validation utilities
pub mod validation;
