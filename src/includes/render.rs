//! Rendering of arranged include blocks back into source lines.
use super::block::{IncludeEntry, Section};

/// Prefix of a rendered `//` comment.
pub const COMMENT_PREFIX: &str = "// ";

/// Default maximum line width.
pub const DEFAULT_LINE_LENGTH: usize = 120;

/// Render all sections: one blank line between sections and between differing groups.
pub fn render_sections(sections: &[Section], line_length: usize) -> Vec<String> {
    let mut lines = Vec::new();
    for (index, section) in sections.iter().enumerate() {
        if index > 0 {
            lines.push(String::new());
        }
        let mut previous_group = None;
        for (group, entry) in &section.entries {
            if previous_group.is_some_and(|previous| previous != group) {
                lines.push(String::new());
            }
            lines.extend(render_include(entry, line_length));
            previous_group = Some(group);
        }
    }
    lines
}

/// Render one include with its merged comment.
///
/// The comment trails the statement when the whole line fits into `line_length`; otherwise it is
/// wrapped into full comment lines above the bare statement.
pub fn render_include(entry: &IncludeEntry, line_length: usize) -> Vec<String> {
    let statement = format!("#include {}", entry.quoting.wrap(&entry.path));
    let Some(description) = entry.description() else {
        return vec![statement];
    };

    let inline = format!("{statement} {COMMENT_PREFIX}{description}");
    if column_width(&inline) <= line_length {
        return vec![inline];
    }

    let width = line_length.saturating_sub(column_width(COMMENT_PREFIX));
    let mut lines: Vec<String> = wrap_words(&description, width)
        .into_iter()
        .map(|line| format!("{COMMENT_PREFIX}{line}"))
        .collect();
    lines.push(statement);
    lines
}

/// Greedy word wrap. Words longer than `width` are cut into pieces of `width` characters.
pub fn wrap_words(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut lines = Vec::new();
    let mut current = String::new();
    for word in text.split_whitespace() {
        for piece in split_long_word(word, width) {
            if current.is_empty() {
                current.push_str(piece);
            } else if column_width(&current) + 1 + column_width(piece) <= width {
                current.push(' ');
                current.push_str(piece);
            } else {
                lines.push(std::mem::take(&mut current));
                current.push_str(piece);
            }
        }
    }
    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

fn split_long_word(word: &str, width: usize) -> Vec<&str> {
    let mut pieces = Vec::new();
    let mut rest = word;
    while column_width(rest) > width {
        let split = rest
            .char_indices()
            .nth(width)
            .map_or(rest.len(), |(index, _)| index);
        let (piece, tail) = rest.split_at(split);
        pieces.push(piece);
        rest = tail;
    }
    pieces.push(rest);
    pieces
}

fn column_width(text: &str) -> usize {
    text.chars().count()
}
