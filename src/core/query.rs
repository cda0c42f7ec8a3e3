//! Request builder for the PoetryDB path grammar.
//!
//! Search paths look like `/<field>[,<field>...]/<value>[;<value>...][/<output>[,<output>...]]`.
//! Fields and values keep the insertion order of the criteria.

use crate::error::ValidationError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub const AUTHOR_LIST_PATH: &str = "/author";
pub const TITLE_LIST_PATH: &str = "/title";
pub const RANDOM_PATH: &str = "/random";

/// A field that can be searched on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchField {
    Author,
    Title,
    Lines,
    Linecount,
    Poemcount,
}

impl SearchField {
    pub fn as_str(&self) -> &'static str {
        match self {
            SearchField::Author => "author",
            SearchField::Title => "title",
            SearchField::Lines => "lines",
            SearchField::Linecount => "linecount",
            SearchField::Poemcount => "poemcount",
        }
    }

    fn is_numeric(&self) -> bool {
        matches!(self, SearchField::Linecount | SearchField::Poemcount)
    }
}

impl fmt::Display for SearchField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SearchField {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "author" => Ok(SearchField::Author),
            "title" => Ok(SearchField::Title),
            "lines" => Ok(SearchField::Lines),
            "linecount" => Ok(SearchField::Linecount),
            "poemcount" => Ok(SearchField::Poemcount),
            _ => Err(ValidationError::UnknownField {
                name: s.to_string(),
            }),
        }
    }
}

/// Tag selecting an API path segment or a limiter on returned data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputField {
    Author,
    Title,
    Lines,
    Linecount,
    Poemcount,
    Random,
    All,
}

impl OutputField {
    pub fn as_str(&self) -> &'static str {
        match self {
            OutputField::Author => "author",
            OutputField::Title => "title",
            OutputField::Lines => "lines",
            OutputField::Linecount => "linecount",
            OutputField::Poemcount => "poemcount",
            OutputField::Random => "random",
            OutputField::All => "all",
        }
    }

    /// Whether the tag may appear in the output-limiter segment.
    pub fn is_limiter(&self) -> bool {
        !matches!(self, OutputField::Poemcount | OutputField::Random)
    }
}

impl fmt::Display for OutputField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OutputField {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "author" => Ok(OutputField::Author),
            "title" => Ok(OutputField::Title),
            "lines" => Ok(OutputField::Lines),
            "linecount" => Ok(OutputField::Linecount),
            "poemcount" => Ok(OutputField::Poemcount),
            "random" => Ok(OutputField::Random),
            "all" => Ok(OutputField::All),
            _ => Err(ValidationError::UnknownField {
                name: s.to_string(),
            }),
        }
    }
}

/// Ordered field → value mapping. Empty values are never stored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SearchCriteria {
    entries: Vec<(SearchField, String)>,
}

impl SearchCriteria {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder form of [`SearchCriteria::set`].
    pub fn with(mut self, field: SearchField, value: impl Into<String>) -> Self {
        self.set(field, value);
        self
    }

    /// Criteria from the three free-text form fields, inserted as author, title, lines.
    pub fn from_form(author: &str, title: &str, lines: &str) -> Self {
        Self::new()
            .with(SearchField::Author, author)
            .with(SearchField::Title, title)
            .with(SearchField::Lines, lines)
    }

    /// Set a field. An existing field keeps its position; a blank value removes it.
    pub fn set(&mut self, field: SearchField, value: impl Into<String>) {
        let value: String = value.into();
        let value = value.trim().to_string();
        let existing = self.entries.iter().position(|(f, _)| *f == field);

        match (existing, value.is_empty()) {
            (Some(index), true) => {
                self.entries.remove(index);
            }
            (Some(index), false) => self.entries[index].1 = value,
            (None, true) => {}
            (None, false) => self.entries.push((field, value)),
        }
    }

    pub fn get(&self, field: SearchField) -> Option<&str> {
        self.entries
            .iter()
            .find(|(f, _)| *f == field)
            .map(|(_, v)| v.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (SearchField, &str)> {
        self.entries.iter().map(|(f, v)| (*f, v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.is_empty() {
            return Err(ValidationError::MissingSearchParameter);
        }
        if self.iter().all(|(f, _)| f == SearchField::Poemcount) {
            return Err(ValidationError::PoemcountOnly);
        }

        for (field, value) in self.iter().filter(|(f, _)| f.is_numeric()) {
            let parsed = value
                .parse::<u32>()
                .map_err(|_| ValidationError::InvalidNumber {
                    field: field.to_string(),
                    value: value.to_string(),
                    reason: "expected a whole number".to_string(),
                })?;
            if field == SearchField::Poemcount && parsed == 0 {
                return Err(ValidationError::InvalidNumber {
                    field: field.to_string(),
                    value: value.to_string(),
                    reason: "must be at least 1".to_string(),
                });
            }
        }

        Ok(())
    }
}

/// A path relative to the API base URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestPath(String);

impl RequestPath {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RequestPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

pub fn search_path(criteria: &SearchCriteria) -> Result<RequestPath, ValidationError> {
    search_path_with_output(criteria, &[])
}

/// Build a search path, optionally limiting the fields returned for each poem.
pub fn search_path_with_output(
    criteria: &SearchCriteria,
    output: &[OutputField],
) -> Result<RequestPath, ValidationError> {
    criteria.validate()?;

    let fields = criteria
        .iter()
        .map(|(f, _)| f.as_str())
        .collect::<Vec<_>>()
        .join(",");
    let values = criteria
        .iter()
        .map(|(_, v)| urlencoding::encode(v).into_owned())
        .collect::<Vec<_>>()
        .join(";");

    let mut path = format!("/{}/{}", fields, values);

    let limiter = normalize_output(output)?;
    if !limiter.is_empty() {
        path.push('/');
        path.push_str(
            &limiter
                .iter()
                .map(|f| f.as_str())
                .collect::<Vec<_>>()
                .join(","),
        );
    }

    Ok(RequestPath(path))
}

/// De-duplicate the limiter, keep its order, and collapse it to `all` when listed.
pub fn normalize_output(output: &[OutputField]) -> Result<Vec<OutputField>, ValidationError> {
    let mut limiter: Vec<OutputField> = Vec::with_capacity(output.len());
    for field in output {
        if !field.is_limiter() {
            return Err(ValidationError::InvalidOutputField {
                field: field.to_string(),
            });
        }
        if !limiter.contains(field) {
            limiter.push(*field);
        }
    }

    if limiter.contains(&OutputField::All) {
        return Ok(vec![OutputField::All]);
    }
    Ok(limiter)
}

pub fn author_list_path() -> RequestPath {
    RequestPath(AUTHOR_LIST_PATH.to_string())
}

pub fn title_list_path() -> RequestPath {
    RequestPath(TITLE_LIST_PATH.to_string())
}

/// `/random` for one poem, `/random/<n>` for `n` poems.
pub fn random_path(count: Option<u32>) -> Result<RequestPath, ValidationError> {
    match count {
        None | Some(1) => Ok(RequestPath(RANDOM_PATH.to_string())),
        Some(0) => Err(ValidationError::InvalidRandomCount),
        Some(n) => Ok(RequestPath(format!("{}/{}", RANDOM_PATH, n))),
    }
}
