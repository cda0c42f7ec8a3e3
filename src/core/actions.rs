//! One function per user action: build the path, fetch once, format.

use crate::api::models::Poem;
use crate::core::format::{IndexKind, ResultView, index_view, random_view, search_view};
use crate::core::heading::{RANDOM_HEADING, search_heading};
use crate::core::query::{
    OutputField, RequestPath, SearchCriteria, author_list_path, random_path,
    search_path_with_output, title_list_path,
};
use crate::error::{ApiError, AppError};
use async_trait::async_trait;

/// Where poems come from. Implemented by the HTTP client.
#[async_trait]
pub trait PoetrySource {
    /// Poems for a search or random path. A not-found reply yields an empty list.
    async fn fetch_poems(&self, path: &RequestPath) -> Result<Vec<Poem>, ApiError>;

    async fn fetch_authors(&self) -> Result<Vec<String>, ApiError>;

    async fn fetch_titles(&self) -> Result<Vec<String>, ApiError>;
}

/// A user action that fetches and formats one result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Search {
        criteria: SearchCriteria,
        output: Vec<OutputField>,
    },
    Index(IndexKind),
    Random(Option<u32>),
}

impl Action {
    /// Short label for progress and log lines.
    pub fn describe(&self) -> String {
        match self {
            Action::Search { criteria, .. } => search_heading(criteria),
            Action::Index(kind) => kind.heading().to_string(),
            Action::Random(_) => RANDOM_HEADING.to_string(),
        }
    }
}

pub async fn perform<S>(source: &S, action: &Action) -> Result<ResultView, AppError>
where
    S: PoetrySource + Sync + ?Sized,
{
    match action {
        Action::Search { criteria, output } => run_search(source, criteria, output).await,
        Action::Index(kind) => run_index(source, *kind).await,
        Action::Random(count) => run_random(source, *count).await,
    }
}

/// Validation happens before the source is touched.
pub async fn run_search<S>(
    source: &S,
    criteria: &SearchCriteria,
    output: &[OutputField],
) -> Result<ResultView, AppError>
where
    S: PoetrySource + Sync + ?Sized,
{
    let path = search_path_with_output(criteria, output)?;
    tracing::debug!(path = %path, "searching");
    let poems = source.fetch_poems(&path).await?;
    Ok(search_view(criteria, &poems))
}

pub async fn run_index<S>(source: &S, kind: IndexKind) -> Result<ResultView, AppError>
where
    S: PoetrySource + Sync + ?Sized,
{
    let entries = match kind {
        IndexKind::Authors => {
            tracing::debug!(path = %author_list_path(), "listing authors");
            source.fetch_authors().await?
        }
        IndexKind::Titles => {
            tracing::debug!(path = %title_list_path(), "listing titles");
            source.fetch_titles().await?
        }
    };
    Ok(index_view(kind, &entries))
}

pub async fn run_random<S>(source: &S, count: Option<u32>) -> Result<ResultView, AppError>
where
    S: PoetrySource + Sync + ?Sized,
{
    let path = random_path(count)?;
    tracing::debug!(path = %path, "fetching random poem");
    let poems = source.fetch_poems(&path).await?;
    Ok(random_view(&poems)?)
}
