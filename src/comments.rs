//! Comment-aware tokenization of C/C++ source lines
//!
//! The tokenizer splits every physical line into code fragments, `//` comments and `/* */`
//! comments, and marks the end of each logical line. Block comments may span several physical
//! lines; the logical line then ends on the line that closes the comment.
//!
//! Nothing here understands C++ beyond the comment delimiters. String literals containing `//`
//! are not special-cased.

pub mod delimiters;
pub mod tokenizer;

pub use delimiters::{find_delimiter, Delimiter, ScanState};
pub use tokenizer::{Comment, CommentToken, Tokenizer};
