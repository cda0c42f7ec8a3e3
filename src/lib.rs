pub use error::AppError;

/// Main architecture layers (dependency flow: CLI → Core → API/Storage)
pub mod cli; // Command-line interface
pub mod core; // Request building, formatting, action flow
pub mod storage; // Configuration persistence

/// Support modules (used across layers)
pub mod api; // PoetryDB API client
pub mod display; // Output rendering
pub mod error; // Error handling
pub mod utils; // Shared utilities and helpers

pub type Result<T> = std::result::Result<T, AppError>;
