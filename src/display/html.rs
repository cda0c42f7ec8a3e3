//! Bootstrap-flavoured HTML fragments for a result.

use crate::core::format::{IndexKind, IndexView, PoemCard, ResultBody, ResultView};
use std::fmt::Write;

/// Escape text for use in element content and attribute values.
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

#[derive(Debug, Default, Clone, Copy)]
pub struct HtmlRenderer;

impl HtmlRenderer {
    pub fn new() -> Self {
        Self
    }

    pub fn render(&self, view: &ResultView) -> String {
        let mut out = String::new();
        // Writing into a String cannot fail.
        let _ = writeln!(out, "<h4 id=\"display\">{}</h4>", escape_html(&view.heading));
        let _ = writeln!(out, "<p id=\"count\">{}</p>", escape_html(&view.count));

        match &view.body {
            ResultBody::Cards(cards) => {
                out.push_str("<div id=\"data\">");
                for card in cards {
                    out.push_str(&self.card(card));
                }
                out.push_str("</div>\n");
            }
            ResultBody::Index(index) => out.push_str(&self.index(index)),
            ResultBody::Random(card) => {
                out.push_str("<div id=\"blockData\">");
                out.push_str(&self.random_block(card));
                out.push_str("</div>\n");
            }
            ResultBody::Empty => {}
        }

        out
    }

    fn lines(card: &PoemCard) -> String {
        card.lines
            .iter()
            .map(|line| format!("{}<br>", escape_html(line)))
            .collect()
    }

    pub fn card(&self, card: &PoemCard) -> String {
        format!(
            "<div class=\"card\"><div class=\"card-body\"><div class=\"card-title\"><h5>{}</h5>\
             <small class=\"text-muted\">{}</small></div><div class=\"card-text\">{}</div>\
             <div class=\"card-footer text-muted\">{}</div></div></div>",
            escape_html(&card.title),
            escape_html(&card.author),
            Self::lines(card),
            escape_html(&card.linecount_label),
        )
    }

    pub fn random_block(&self, card: &PoemCard) -> String {
        format!(
            "<div><div><h5>{}</h5><small class=\"text-muted\">{}</small></div>\
             <div>{}</div><small class=\"text-muted\">{}</small></div>",
            escape_html(&card.title),
            escape_html(&card.author),
            Self::lines(card),
            escape_html(&card.linecount_label),
        )
    }

    /// Authors become inline lists per letter; titles are flat paragraphs.
    pub fn index(&self, index: &IndexView) -> String {
        let mut out = String::new();
        match index.kind {
            IndexKind::Authors => {
                out.push_str("<div id=\"data\">");
                for group in &index.groups {
                    let _ = write!(
                        out,
                        "<div class=\"lead\">{}</div><ul class=\"list-inline\">",
                        escape_html(&group.heading.to_string())
                    );
                    for entry in &group.entries {
                        let _ = write!(
                            out,
                            "<li class=\"list-inline-item\">{}</li>",
                            escape_html(entry)
                        );
                    }
                    out.push_str("</ul>");
                }
                out.push_str("</div>\n");
            }
            IndexKind::Titles => {
                out.push_str("<div id=\"blockData\">");
                for group in &index.groups {
                    let _ = write!(
                        out,
                        "<div class=\"lead\">{}</div>",
                        escape_html(&group.heading.to_string())
                    );
                    for entry in &group.entries {
                        let _ = write!(out, "<p>{}</p>", escape_html(entry));
                    }
                }
                out.push_str("</div>\n");
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::format::{format_index, index_view};

    fn card() -> PoemCard {
        PoemCard {
            title: "A <Dream>".to_string(),
            author: "Edgar Allan Poe".to_string(),
            lines: vec!["In visions of the dark night".to_string(), "I have dreamed".to_string()],
            linecount: Some(2),
            linecount_label: "line count: 2".to_string(),
        }
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(
            escape_html("<b>\"Tom\" & 'Jerry'</b>"),
            "&lt;b&gt;&quot;Tom&quot; &amp; &#39;Jerry&#39;&lt;/b&gt;"
        );
        assert_eq!(escape_html("plain"), "plain");
    }

    #[test]
    fn test_card_markup() {
        let html = HtmlRenderer::new().card(&card());
        assert!(html.starts_with("<div class=\"card\">"));
        assert!(html.contains("<h5>A &lt;Dream&gt;</h5>"));
        assert!(html.contains("In visions of the dark night<br>I have dreamed<br>"));
        assert!(html.contains("<div class=\"card-footer text-muted\">line count: 2</div>"));
    }

    #[test]
    fn test_author_index_markup() {
        let entries = vec![
            "Alan Seeger".to_string(),
            "Amy Lowell".to_string(),
            "Byron".to_string(),
        ];
        let html = HtmlRenderer::new().index(&format_index(IndexKind::Authors, &entries));
        assert_eq!(html.matches("<ul class=\"list-inline\">").count(), 2);
        assert_eq!(html.matches("</ul>").count(), 2);
        assert!(html.contains("<div class=\"lead\">A</div>"));
        assert!(html.contains("<li class=\"list-inline-item\">Byron</li>"));
    }

    #[test]
    fn test_title_index_markup() {
        let entries = vec!["A Dream".to_string(), "Beauty".to_string()];
        let html = HtmlRenderer::new().render(&index_view(IndexKind::Titles, &entries));
        assert!(html.contains(
            "<div class=\"lead\">A</div><p>A Dream</p><div class=\"lead\">B</div><p>Beauty</p>"
        ));
        assert!(html.contains("Showing 2 Titles"));
    }
}
