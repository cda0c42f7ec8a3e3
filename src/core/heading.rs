//! Count and heading text shown above a result.

use crate::core::query::SearchCriteria;

pub const DEFAULT_NOUN: &str = "Poem";
pub const ALL_AUTHORS_HEADING: &str = "All Authors";
pub const ALL_TITLES_HEADING: &str = "All Titles";
pub const RANDOM_HEADING: &str = "Random Poem";

/// "No Poems found", "Showing 1 Poem", "Showing 2 Poems".
pub fn count_text(count: usize, noun: &str) -> String {
    match count {
        0 => format!("No {}s found", noun),
        1 => format!("Showing 1 {}", noun),
        n => format!("Showing {} {}s", n, noun),
    }
}

/// "Search Author for poe & Title for raven"
pub fn search_heading(criteria: &SearchCriteria) -> String {
    let parts = criteria
        .iter()
        .map(|(field, value)| format!("{} for {}", capitalize(field.as_str()), value))
        .collect::<Vec<_>>();
    format!("Search {}", parts.join(" & "))
}

pub fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::query::SearchField;

    #[test]
    fn test_count_text() {
        assert_eq!(count_text(0, DEFAULT_NOUN), "No Poems found");
        assert_eq!(count_text(1, DEFAULT_NOUN), "Showing 1 Poem");
        assert_eq!(count_text(2, DEFAULT_NOUN), "Showing 2 Poems");
        assert_eq!(count_text(129, "Author"), "Showing 129 Authors");
        assert_eq!(count_text(0, "Title"), "No Titles found");
    }

    #[test]
    fn test_search_heading() {
        let criteria = SearchCriteria::new()
            .with(SearchField::Author, "poe")
            .with(SearchField::Title, "raven");
        assert_eq!(
            search_heading(&criteria),
            "Search Author for poe & Title for raven"
        );

        let criteria = SearchCriteria::new().with(SearchField::Lines, "turn'd");
        assert_eq!(search_heading(&criteria), "Search Lines for turn'd");
    }

    #[test]
    fn test_capitalize() {
        assert_eq!(capitalize("author"), "Author");
        assert_eq!(capitalize(""), "");
        assert_eq!(capitalize("éclair"), "Éclair");
    }
}
