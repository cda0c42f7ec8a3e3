use crate::core::format::{IndexKind, IndexView, PoemCard, ResultBody, ResultView};
use crate::utils::text::{center_text, wrap_text};
use comfy_table::{Attribute, Cell, Color, ContentArrangement, Table, presets};
use crossterm::terminal;
use unicode_width::UnicodeWidthStr;

const DEFAULT_WIDTH: usize = 80;
const LINE_INDENT: &str = "    ";

/// Plain-text rendering for terminals and pipes.
pub struct TerminalRenderer {
    max_width: usize,
    use_colors: bool,
}

impl Default for TerminalRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl TerminalRenderer {
    pub fn new() -> Self {
        Self {
            max_width: Self::detect_terminal_width(),
            use_colors: atty::is(atty::Stream::Stdout),
        }
    }

    fn detect_terminal_width() -> usize {
        match terminal::size() {
            Ok((cols, _)) => (cols as usize).clamp(40, 200),
            Err(_) => DEFAULT_WIDTH,
        }
    }

    pub fn with_max_width(mut self, width: usize) -> Self {
        self.max_width = width;
        self
    }

    pub fn with_colors(mut self, use_colors: bool) -> Self {
        self.use_colors = use_colors;
        self
    }

    pub fn render(&self, view: &ResultView) -> String {
        let mut out = Vec::new();
        if !view.heading.is_empty() {
            out.push(center_text(&view.heading, self.max_width).trim_end().to_string());
            out.push("=".repeat(view.heading.width().min(self.max_width)));
        }
        out.push(view.count.clone());

        match &view.body {
            ResultBody::Cards(cards) => {
                for card in cards {
                    out.push(String::new());
                    out.push(self.card(card));
                }
            }
            ResultBody::Random(card) => {
                out.push(String::new());
                out.push(self.card(card));
            }
            ResultBody::Index(index) => {
                out.push(String::new());
                out.push(self.index(index));
            }
            ResultBody::Empty => {}
        }

        out.join("\n")
    }

    pub fn card(&self, card: &PoemCard) -> String {
        let body_width = self.max_width.saturating_sub(LINE_INDENT.len());
        let mut out = vec![card.title.clone()];
        if !card.author.is_empty() {
            out.push(format!("  by {}", card.author));
        }
        out.push("-".repeat(card.title.width().clamp(3, self.max_width)));

        for line in &card.lines {
            for wrapped in wrap_text(line, body_width) {
                out.push(format!("{}{}", LINE_INDENT, wrapped).trim_end().to_string());
            }
        }

        if !card.linecount_label.is_empty() {
            out.push(format!("{}{}", LINE_INDENT, card.linecount_label));
        }
        out.join("\n")
    }

    fn header(&self, text: &str) -> Cell {
        if self.use_colors {
            Cell::new(text).add_attribute(Attribute::Bold).fg(Color::Cyan)
        } else {
            Cell::new(text).add_attribute(Attribute::Bold)
        }
    }

    /// One row per letter group. Authors are comma-separated, titles one per line.
    pub fn index(&self, index: &IndexView) -> String {
        let mut table = Table::new();
        table.load_preset(presets::UTF8_FULL);
        table.set_content_arrangement(ContentArrangement::Dynamic);
        table.set_width(self.max_width.min(u16::MAX as usize) as u16);

        let entries_label = match index.kind {
            IndexKind::Authors => "Authors",
            IndexKind::Titles => "Titles",
        };
        table.set_header(vec![self.header(""), self.header(entries_label)]);

        for group in &index.groups {
            let entries = match index.kind {
                IndexKind::Authors => group.entries.join(", "),
                IndexKind::Titles => group.entries.join("\n"),
            };
            let letter = if self.use_colors {
                Cell::new(group.heading).add_attribute(Attribute::Bold)
            } else {
                Cell::new(group.heading)
            };
            table.add_row(vec![letter, Cell::new(entries)]);
        }

        table.to_string()
    }
}
