//! Storage layer for poetrydb-cli
//!
//! Handles the TOML configuration file.

use crate::error::StorageError;

pub mod config;

type Result<T> = std::result::Result<T, StorageError>;
