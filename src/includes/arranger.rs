//! Include Arranger
//!
//! Consumes source lines, buffers runs of include statements and writes them back grouped,
//! ordered and re-commented. All other lines reach the sink unchanged.
//!
//! Lines are handled per logical line (a block comment spanning several physical lines makes one
//! logical line) and fall into four kinds:
//!
//! - blank: inside a block it is held back and dropped if another include follows, otherwise it
//!   is written as is;
//! - comment only: held as pending comments for the next include;
//! - include: joins the current block together with the pending comments;
//! - anything else: ends the block.
//!
//! Pending comments that are followed by a blank line, by code or by the end of input belong to
//! no include. They end the block and are written back verbatim.
//!
//! Verbatim lines keep their own terminator. Rewritten include lines take the terminator of the
//! block's first include; the last of them stays unterminated when the input ended on the block.
use super::block::IncludeBlock;
use super::block::IncludeEntry;
use super::classify::{DefaultClassifier, PathClassifier};
use super::directive::{Bucket, IncludeDirective};
use super::error::ArrangeError;
use super::mother::MotherMatcher;
use super::render::{render_sections, DEFAULT_LINE_LENGTH};
use super::sink::{LineEnding, LineSink, SourceLine};
use crate::comments::{Comment, CommentToken, Tokenizer};
use crate::hierarchy::IncludeSequencer;
use tracing::{debug, warn};

/// Settings fixed for the lifetime of one arranger.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArrangerOptions {
    /// Widest line a trailing include comment may produce.
    pub line_length: usize,
    /// Name of the file being arranged; used to find its mother header.
    pub source_name: Option<String>,
}

impl Default for ArrangerOptions {
    fn default() -> Self {
        Self {
            line_length: DEFAULT_LINE_LENGTH,
            source_name: None,
        }
    }
}

impl ArrangerOptions {
    pub fn with_line_length(mut self, line_length: usize) -> Self {
        self.line_length = line_length;
        self
    }

    pub fn with_source_name(mut self, source_name: impl Into<String>) -> Self {
        self.source_name = Some(source_name.into());
        self
    }
}

/// An include dropped because the classifier rejected its path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RejectedInclude {
    pub line: usize,
    pub path: String,
}

/// Tokens of one logical line together with its source text.
#[derive(Debug, Default)]
struct LogicalLine {
    first_line: usize,
    raw: Vec<SourceLine>,
    code: String,
    comments: Vec<Comment>,
}

enum LineKind {
    Blank,
    CommentOnly,
    Include(IncludeDirective),
    Code,
}

impl LogicalLine {
    /// Terminator of the physical line that ended this logical line.
    fn ending(&self) -> LineEnding {
        self.raw.last().map(|line| line.ending).unwrap_or_default()
    }

    fn kind(&self) -> LineKind {
        if self.code.trim().is_empty() {
            if self.comments.is_empty() {
                LineKind::Blank
            } else {
                LineKind::CommentOnly
            }
        } else {
            match IncludeDirective::parse(&self.code) {
                Some(directive) => LineKind::Include(directive),
                None => LineKind::Code,
            }
        }
    }
}

/// Comment-only lines waiting to see whether an include follows.
#[derive(Debug, Default)]
struct PendingComments {
    raw: Vec<SourceLine>,
    texts: Vec<String>,
}

impl PendingComments {
    fn push(&mut self, line: LogicalLine) {
        self.texts
            .extend(line.comments.iter().filter_map(Comment::normalized));
        self.raw.extend(line.raw);
    }

    fn is_empty(&self) -> bool {
        self.raw.is_empty()
    }
}

pub struct IncludeArranger<S = String> {
    options: ArrangerOptions,
    sequencer: IncludeSequencer,
    classifier: Box<dyn PathClassifier>,
    mother: Option<MotherMatcher>,
    tokenizer: Tokenizer,
    line_number: usize,
    line: LogicalLine,
    block: IncludeBlock,
    /// Blank lines seen after the last include of the open block.
    gap: Vec<SourceLine>,
    /// Terminator of the last terminated line fed so far.
    last_ending: LineEnding,
    /// Terminator for rewritten lines of the open block.
    block_ending: LineEnding,
    /// Terminator of the most recent include line.
    tail_ending: LineEnding,
    pending: PendingComments,
    rejections: Vec<RejectedInclude>,
    sink: S,
}

impl IncludeArranger<String> {
    /// Arranger collecting its output into a `String`.
    pub fn new(options: ArrangerOptions, sequencer: IncludeSequencer) -> Self {
        Self::with_sink(options, sequencer, String::new())
    }
}

impl<S: LineSink> IncludeArranger<S> {
    pub fn with_sink(options: ArrangerOptions, sequencer: IncludeSequencer, sink: S) -> Self {
        let mother = options
            .source_name
            .as_deref()
            .and_then(MotherMatcher::from_source_name);
        Self {
            options,
            sequencer,
            classifier: Box::new(DefaultClassifier),
            mother,
            tokenizer: Tokenizer::new(),
            line_number: 0,
            line: LogicalLine::default(),
            block: IncludeBlock::new(),
            gap: Vec::new(),
            last_ending: LineEnding::default(),
            block_ending: LineEnding::default(),
            tail_ending: LineEnding::default(),
            pending: PendingComments::default(),
            rejections: Vec::new(),
            sink,
        }
    }

    /// Replace the path preparation hook.
    pub fn with_classifier(mut self, classifier: impl PathClassifier + 'static) -> Self {
        self.classifier = Box::new(classifier);
        self
    }

    pub fn options(&self) -> &ArrangerOptions {
        &self.options
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn into_sink(self) -> S {
        self.sink
    }

    /// Includes dropped so far because their path was rejected.
    pub fn rejections(&self) -> &[RejectedInclude] {
        &self.rejections
    }

    /// Process the next source line, including its `\n` or `\r\n` terminator.
    ///
    /// A line without terminator is taken as the last line of an input that does not end in a
    /// line break; `str::split_inclusive('\n')` yields lines in the expected form.
    pub fn feed(&mut self, line: &str) {
        self.line_number += 1;
        let (text, ending) = LineEnding::split(line);
        if ending != LineEnding::Missing {
            self.last_ending = ending;
        }
        if self.line.raw.is_empty() {
            self.line.first_line = self.line_number;
        }
        self.line.raw.push(SourceLine::new(text, ending));

        for token in self.tokenizer.feed(text) {
            match token {
                CommentToken::Code(code) => self.line.code.push_str(&code),
                CommentToken::EndOfLine => {
                    let line = std::mem::take(&mut self.line);
                    self.process_line(line);
                }
                comment => self.line.comments.extend(comment.into_comment()),
            }
        }
    }

    /// Write out everything still buffered. Call once after the last line.
    ///
    /// If the input ended inside a block comment, the unfinished lines are written verbatim and
    /// the condition is reported as an error.
    pub fn flush(&mut self) -> Result<(), ArrangeError> {
        self.flush_block();
        self.emit_pending();

        if self.tokenizer.is_in_block_comment() {
            let line = std::mem::take(&mut self.line);
            self.tokenizer = Tokenizer::new();
            self.emit_all(line.raw);
            return Err(ArrangeError::UnterminatedBlockComment {
                line: line.first_line,
            });
        }
        Ok(())
    }

    fn process_line(&mut self, line: LogicalLine) {
        match line.kind() {
            LineKind::Blank => self.process_blank(line),
            LineKind::CommentOnly => self.pending.push(line),
            LineKind::Include(directive) => self.process_include(directive, line),
            LineKind::Code => {
                self.flush_block();
                self.emit_pending();
                self.emit_all(line.raw);
            }
        }
    }

    fn process_blank(&mut self, line: LogicalLine) {
        if !self.pending.is_empty() {
            self.flush_block();
            self.emit_pending();
            self.emit_all(line.raw);
        } else if self.block.is_empty() {
            self.emit_all(line.raw);
        } else {
            self.gap.extend(line.raw);
        }
    }

    fn process_include(&mut self, directive: IncludeDirective, line: LogicalLine) {
        let pending = std::mem::take(&mut self.pending);
        let mut comments = pending.texts;
        comments.extend(line.comments.iter().filter_map(Comment::normalized));
        self.gap.clear();

        let ending = line.ending();
        if self.block.is_empty() {
            self.block_ending = match ending {
                LineEnding::Missing => self.last_ending,
                terminated => terminated,
            };
        }
        self.tail_ending = ending;

        let Some(prepared) = self
            .classifier
            .prepare(&directive.path, directive.is_angled())
        else {
            warn!(
                line = line.first_line,
                path = %directive.path,
                "dropping include rejected by the path classifier"
            );
            self.rejections.push(RejectedInclude {
                line: line.first_line,
                path: directive.path,
            });
            return;
        };

        let bucket = Bucket::classify(&prepared.path, prepared.is_absolute);
        let quoting = bucket.quoting(prepared.is_absolute);
        let untouched =
            comments.is_empty() && prepared.path == directive.path && quoting == directive.quoting;

        let mut entry = IncludeEntry::new(prepared.path, bucket, quoting);
        entry.add_comments(comments);
        if untouched {
            entry = entry.with_raw(line.raw);
        }
        self.block.add(entry);
    }

    /// Write the buffered block, followed by the blank lines that trailed it.
    fn flush_block(&mut self) {
        if !self.block.is_empty() {
            let block = std::mem::take(&mut self.block);
            debug!(includes = block.len(), "flushing include block");
            let untouched = block.untouched_raw().map(<[SourceLine]>::to_vec);
            match untouched {
                Some(raw) => self.emit_all(raw),
                None => {
                    let sections = block.into_sections(self.mother.as_ref(), &self.sequencer);
                    let lines = render_sections(&sections, self.options.line_length);
                    self.emit_rendered(lines);
                }
            }
        }
        let gap = std::mem::take(&mut self.gap);
        self.emit_all(gap);
    }

    fn emit_pending(&mut self) {
        let pending = std::mem::take(&mut self.pending);
        self.emit_all(pending.raw);
    }

    fn emit_rendered(&mut self, lines: Vec<String>) {
        let last_ending = match self.tail_ending {
            LineEnding::Missing => LineEnding::Missing,
            _ => self.block_ending,
        };
        let count = lines.len();
        for (index, line) in lines.iter().enumerate() {
            let ending = if index + 1 == count {
                last_ending
            } else {
                self.block_ending
            };
            self.sink.emit_line(line, ending);
        }
    }

    fn emit_all(&mut self, lines: Vec<SourceLine>) {
        for line in &lines {
            self.sink.emit_line(&line.text, line.ending);
        }
    }
}
