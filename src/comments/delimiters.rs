//! Delimiter rules per scan state
//!
//! While scanning code the tokenizer looks for `//` and `/*`; inside a block comment it only looks
//! for `*/`. The leftmost match wins. Keeping the table separate from the line loop lets the rules
//! be checked on their own.

/// Where the scanner currently is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScanState {
    #[default]
    Code,
    InBlockComment,
}

/// The comment delimiters the scanner reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delimiter {
    /// `//`
    LineComment,
    /// `/*`
    BlockOpen,
    /// `*/`
    BlockClose,
}

impl Delimiter {
    pub fn as_str(self) -> &'static str {
        match self {
            Delimiter::LineComment => "//",
            Delimiter::BlockOpen => "/*",
            Delimiter::BlockClose => "*/",
        }
    }
}

impl ScanState {
    /// Delimiters that are live in this state.
    pub fn delimiters(self) -> &'static [Delimiter] {
        match self {
            ScanState::Code => &[Delimiter::LineComment, Delimiter::BlockOpen],
            ScanState::InBlockComment => &[Delimiter::BlockClose],
        }
    }
}

/// Find the leftmost delimiter that is live in `state`.
///
/// Returns the byte offset of the delimiter within `text` together with the delimiter itself.
pub fn find_delimiter(state: ScanState, text: &str) -> Option<(usize, Delimiter)> {
    state
        .delimiters()
        .iter()
        .filter_map(|&delimiter| text.find(delimiter.as_str()).map(|pos| (pos, delimiter)))
        .min_by_key(|&(pos, _)| pos)
}
