//! # tidycxx
//!
//! Normalizes `#include` directives in C/C++ source text.
//!
//! A source file is fed line by line. Runs of include statements are buffered, ordered along a
//! project hierarchy, deduplicated, re-commented and written back out; everything else passes
//! through untouched.
//!
//! Layout
//!
//!   src/comments     Comment-aware line tokenizer (code / `//` / `/* */` / end of line)
//!   src/hierarchy    Project component tree and the sort / group keys derived from it
//!   src/includes     Include recognition, classification, the arranger and rendering
//!
//! The typical entry point is [`includes::arrange_source`], or [`includes::IncludeArranger`] when
//! the caller wants to drive the lines and the output sink itself.

pub mod comments;
pub mod hierarchy;
pub mod includes;

pub use comments::{Comment, CommentToken, Tokenizer};
pub use hierarchy::{HierarchyKey, HierarchyNode, IncludeSequencer};
pub use includes::{
    arrange_source, ArrangeError, ArrangerOptions, DefaultClassifier, IncludeArranger, LineEnding,
    LineSink, PathClassifier, PreparedPath,
};
