//! Output sink and line terminators

/// How a source line ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LineEnding {
    #[default]
    Lf,
    CrLf,
    /// Last line of an input without a final line break.
    Missing,
}

impl LineEnding {
    pub fn as_str(self) -> &'static str {
        match self {
            LineEnding::Lf => "\n",
            LineEnding::CrLf => "\r\n",
            LineEnding::Missing => "",
        }
    }

    /// Split `line` into its text and its terminator.
    pub fn split(line: &str) -> (&str, LineEnding) {
        if let Some(text) = line.strip_suffix("\r\n") {
            (text, LineEnding::CrLf)
        } else if let Some(text) = line.strip_suffix('\n') {
            (text, LineEnding::Lf)
        } else {
            (line, LineEnding::Missing)
        }
    }
}

/// A source line kept for verbatim output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceLine {
    pub text: String,
    pub ending: LineEnding,
}

impl SourceLine {
    pub fn new(text: impl Into<String>, ending: LineEnding) -> Self {
        Self {
            text: text.into(),
            ending,
        }
    }
}

/// Receives the arranged output one line at a time.
pub trait LineSink {
    /// Take one output line, without terminator, and the terminator that ends it.
    fn emit_line(&mut self, line: &str, ending: LineEnding);
}

/// Collects the output as text, each line followed by its terminator.
impl LineSink for String {
    fn emit_line(&mut self, line: &str, ending: LineEnding) {
        self.push_str(line);
        self.push_str(ending.as_str());
    }
}

/// Collects the bare lines.
impl LineSink for Vec<String> {
    fn emit_line(&mut self, line: &str, _ending: LineEnding) {
        self.push(line.to_string());
    }
}

impl<T: LineSink + ?Sized> LineSink for &mut T {
    fn emit_line(&mut self, line: &str, ending: LineEnding) {
        (**self).emit_line(line, ending);
    }
}
