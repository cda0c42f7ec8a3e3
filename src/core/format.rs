//! Turns decoded API data into display records.
//!
//! Nothing here produces markup; see [`crate::display`] for the renderers.

use crate::api::models::Poem;
use crate::core::heading::{
    ALL_AUTHORS_HEADING, ALL_TITLES_HEADING, DEFAULT_NOUN, RANDOM_HEADING, count_text,
    search_heading,
};
use crate::core::query::SearchCriteria;
use crate::error::FormatError;
use serde::Serialize;

/// Heading used for entries that are blank after trimming.
pub const BLANK_HEADING: char = '#';

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PoemCard {
    pub title: String,
    pub author: String,
    pub lines: Vec<String>,
    pub linecount: Option<u32>,
    pub linecount_label: String,
}

impl From<&Poem> for PoemCard {
    fn from(poem: &Poem) -> Self {
        let linecount_label = poem
            .linecount
            .map(|n| format!("line count: {}", n))
            .unwrap_or_default();

        Self {
            title: poem.title.clone(),
            author: poem.author.clone(),
            lines: poem.lines.clone(),
            linecount: poem.linecount,
            linecount_label,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum IndexKind {
    Authors,
    Titles,
}

impl IndexKind {
    pub fn noun(&self) -> &'static str {
        match self {
            IndexKind::Authors => "Author",
            IndexKind::Titles => "Title",
        }
    }

    pub fn heading(&self) -> &'static str {
        match self {
            IndexKind::Authors => ALL_AUTHORS_HEADING,
            IndexKind::Titles => ALL_TITLES_HEADING,
        }
    }
}

/// Consecutive entries that share a leading character.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LetterGroup {
    pub heading: char,
    pub entries: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IndexView {
    pub kind: IndexKind,
    pub groups: Vec<LetterGroup>,
    pub total: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", content = "data", rename_all = "lowercase")]
pub enum ResultBody {
    Cards(Vec<PoemCard>),
    Index(IndexView),
    Random(PoemCard),
    Empty,
}

/// Everything the output surface needs for one action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResultView {
    pub heading: String,
    pub count: String,
    pub body: ResultBody,
}

pub fn format_poem_cards(poems: &[Poem]) -> Vec<PoemCard> {
    poems.iter().map(PoemCard::from).collect()
}

/// Uppercased first character of the trimmed entry.
fn leading_char(entry: &str) -> char {
    entry
        .trim()
        .chars()
        .next()
        .and_then(|c| c.to_uppercase().next())
        .unwrap_or(BLANK_HEADING)
}

/// Group consecutive entries by leading character. Input order is kept; a
/// letter that reappears later in unsorted input opens a new group.
pub fn group_alphabetically(entries: &[String]) -> Vec<LetterGroup> {
    let mut groups: Vec<LetterGroup> = Vec::new();

    for entry in entries {
        let heading = leading_char(entry);
        match groups.last_mut() {
            Some(group) if group.heading == heading => group.entries.push(entry.clone()),
            _ => groups.push(LetterGroup {
                heading,
                entries: vec![entry.clone()],
            }),
        }
    }

    groups
}

pub fn format_index(kind: IndexKind, entries: &[String]) -> IndexView {
    IndexView {
        kind,
        groups: group_alphabetically(entries),
        total: entries.len(),
    }
}

/// Card for the first poem of a random response.
pub fn format_random(poems: &[Poem]) -> Result<PoemCard, FormatError> {
    poems
        .first()
        .map(PoemCard::from)
        .ok_or(FormatError::EmptyRandom)
}

pub fn search_view(criteria: &SearchCriteria, poems: &[Poem]) -> ResultView {
    let body = if poems.is_empty() {
        ResultBody::Empty
    } else {
        ResultBody::Cards(format_poem_cards(poems))
    };

    ResultView {
        heading: search_heading(criteria),
        count: count_text(poems.len(), DEFAULT_NOUN),
        body,
    }
}

pub fn index_view(kind: IndexKind, entries: &[String]) -> ResultView {
    let body = if entries.is_empty() {
        ResultBody::Empty
    } else {
        ResultBody::Index(format_index(kind, entries))
    };

    ResultView {
        heading: kind.heading().to_string(),
        count: count_text(entries.len(), kind.noun()),
        body,
    }
}

/// One poem renders as the random block; several (from `/random/<n>`) as cards.
pub fn random_view(poems: &[Poem]) -> Result<ResultView, FormatError> {
    let body = match poems.len() {
        0 => return Err(FormatError::EmptyRandom),
        1 => ResultBody::Random(format_random(poems)?),
        _ => ResultBody::Cards(format_poem_cards(poems)),
    };

    Ok(ResultView {
        heading: RANDOM_HEADING.to_string(),
        count: count_text(poems.len(), DEFAULT_NOUN),
        body,
    })
}
