//! Path preparation hook
//!
//! Before an include is grouped its path is handed to a [`PathClassifier`]. The classifier may
//! rewrite the path (e.g. resolve a quoted include against the project root), decide whether it is
//! absolute, or reject it altogether.

/// Outcome of preparing an include path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreparedPath {
    pub is_absolute: bool,
    pub path: String,
}

impl PreparedPath {
    pub fn new(path: impl Into<String>, is_absolute: bool) -> Self {
        Self {
            is_absolute,
            path: path.into(),
        }
    }
}

/// Decides how an include path is treated.
pub trait PathClassifier {
    /// Prepare `path`; `None` drops the include.
    fn prepare(&self, path: &str, angle_bracketed: bool) -> Option<PreparedPath>;
}

/// Keeps every path as written; angle brackets mean absolute.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultClassifier;

impl PathClassifier for DefaultClassifier {
    fn prepare(&self, path: &str, angle_bracketed: bool) -> Option<PreparedPath> {
        Some(PreparedPath::new(path, angle_bracketed))
    }
}

impl<F> PathClassifier for F
where
    F: Fn(&str, bool) -> Option<PreparedPath>,
{
    fn prepare(&self, path: &str, angle_bracketed: bool) -> Option<PreparedPath> {
        self(path, angle_bracketed)
    }
}
