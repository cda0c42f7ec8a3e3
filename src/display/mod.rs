//! Rendering layer: turns a [`ResultView`] into text, HTML or JSON.

pub mod html;
pub mod progress;
pub mod terminal;

pub use html::HtmlRenderer;
pub use progress::ProgressSpinner;
pub use terminal::TerminalRenderer;

use crate::core::format::ResultView;
use crate::error::DisplayError;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Html,
    Json,
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            OutputFormat::Text => "text",
            OutputFormat::Html => "html",
            OutputFormat::Json => "json",
        };
        f.write_str(name)
    }
}

pub fn render(view: &ResultView, format: OutputFormat) -> Result<String, DisplayError> {
    match format {
        OutputFormat::Text => Ok(TerminalRenderer::new().render(view)),
        OutputFormat::Html => Ok(HtmlRenderer::new().render(view)),
        OutputFormat::Json => {
            serde_json::to_string_pretty(view).map_err(|e| DisplayError::Serialize(e.to_string()))
        }
    }
}
