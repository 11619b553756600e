//! Line tokenizer
//!
//! [`Tokenizer::feed`] takes one physical line and returns the tokens it completes. Code and
//! comment tokens come out in source order; a line that leaves a block comment open produces no
//! [`CommentToken::EndOfLine`] until the comment is closed on a later line.
use super::delimiters::{find_delimiter, Delimiter, ScanState};

/// One event produced while scanning a line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommentToken {
    /// Source text outside of comments. Never empty.
    Code(String),
    /// Text following `//` up to the end of the line, delimiter excluded.
    LineComment(String),
    /// Text between `/*` and `*/`. Physical line breaks inside the comment are kept as `\n`.
    BlockComment(String),
    EndOfLine,
}

impl CommentToken {
    /// The comment carried by this token, if it is one.
    pub fn into_comment(self) -> Option<Comment> {
        match self {
            CommentToken::LineComment(text) => Some(Comment {
                is_block: false,
                text,
            }),
            CommentToken::BlockComment(text) => Some(Comment {
                is_block: true,
                text,
            }),
            CommentToken::Code(_) | CommentToken::EndOfLine => None,
        }
    }
}

/// A comment as found in the source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Comment {
    pub is_block: bool,
    pub text: String,
}

impl Comment {
    /// The comment text with all whitespace runs collapsed to single spaces.
    ///
    /// Returns `None` for comments without any visible text (`//`, `/**/`, `/*   */`).
    pub fn normalized(&self) -> Option<String> {
        let text = self.text.split_whitespace().collect::<Vec<_>>().join(" ");
        (!text.is_empty()).then_some(text)
    }
}

/// Splits source lines into code and comments, tracking block comments across lines.
#[derive(Debug, Default)]
pub struct Tokenizer {
    state: ScanState,
    pending: String,
}

impl Tokenizer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the last fed line left a `/*` comment open.
    pub fn is_in_block_comment(&self) -> bool {
        self.state == ScanState::InBlockComment
    }

    /// Text collected so far for an open block comment.
    pub fn pending_comment(&self) -> &str {
        &self.pending
    }

    /// Tokenize the next physical line.
    ///
    /// A single trailing `\n` (or `\r\n`) is ignored; the line must not contain other line
    /// breaks. Lines are expected in source order.
    pub fn feed(&mut self, line: &str) -> Vec<CommentToken> {
        let mut tokens = Vec::new();
        let mut rest = strip_line_ending(line);

        while let Some((pos, delimiter)) = find_delimiter(self.state, rest) {
            let before = &rest[..pos];
            let after = &rest[pos + delimiter.as_str().len()..];
            match delimiter {
                Delimiter::LineComment => {
                    push_code(&mut tokens, before);
                    tokens.push(CommentToken::LineComment(after.to_string()));
                    tokens.push(CommentToken::EndOfLine);
                    return tokens;
                }
                Delimiter::BlockOpen => {
                    push_code(&mut tokens, before);
                    self.state = ScanState::InBlockComment;
                }
                Delimiter::BlockClose => {
                    let mut text = std::mem::take(&mut self.pending);
                    text.push_str(before);
                    tokens.push(CommentToken::BlockComment(text));
                    self.state = ScanState::Code;
                }
            }
            rest = after;
        }

        match self.state {
            ScanState::Code => {
                push_code(&mut tokens, rest);
                tokens.push(CommentToken::EndOfLine);
            }
            ScanState::InBlockComment => {
                self.pending.push_str(rest);
                self.pending.push('\n');
            }
        }
        tokens
    }
}

fn push_code(tokens: &mut Vec<CommentToken>, code: &str) {
    if !code.is_empty() {
        tokens.push(CommentToken::Code(code.to_string()));
    }
}

fn strip_line_ending(line: &str) -> &str {
    match line.strip_suffix('\n') {
        Some(line) => line.strip_suffix('\r').unwrap_or(line),
        None => line,
    }
}
