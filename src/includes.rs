//! Include handling
//!
//! - `directive`: recognizing include statements and their buckets
//! - `classify`: the path preparation hook
//! - `mother`: finding the header that belongs to the source file
//! - `block`: buffering, deduplication and ordering of one include block
//! - `render`: writing includes and their comments back as lines
//! - `arranger`: the line-driven engine tying it all together

pub mod arranger;
pub mod block;
pub mod classify;
pub mod directive;
pub mod error;
pub mod mother;
pub mod render;
pub mod sink;

pub use arranger::{ArrangerOptions, IncludeArranger, RejectedInclude};
pub use block::{IncludeBlock, IncludeEntry, Section, SectionKind};
pub use classify::{DefaultClassifier, PathClassifier, PreparedPath};
pub use directive::{Bucket, IncludeDirective, Quoting};
pub use error::ArrangeError;
pub use mother::MotherMatcher;
pub use render::{render_include, wrap_words, DEFAULT_LINE_LENGTH};
pub use sink::{LineEnding, LineSink, SourceLine};

use crate::hierarchy::IncludeSequencer;

/// Arrange the includes of a whole source text with the default classifier.
///
/// Lines outside rewritten include blocks keep their `\n` or `\r\n` terminator, and a missing
/// final line break stays missing.
pub fn arrange_source(
    source: &str,
    options: ArrangerOptions,
    sequencer: IncludeSequencer,
) -> Result<String, ArrangeError> {
    let mut arranger = IncludeArranger::new(options, sequencer);
    for line in source.split_inclusive('\n') {
        arranger.feed(line);
    }
    arranger.flush()?;
    Ok(arranger.into_sink())
}
