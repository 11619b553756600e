use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ArrangeError {
    /// Input ended inside a `/* */` comment. Its text was passed through unchanged.
    #[error("block comment opened on line {line} is never closed")]
    UnterminatedBlockComment { line: usize },
}
