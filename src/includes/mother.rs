use std::path::Path;

/// Recognizes the header that belongs to the source file being arranged.
///
/// For `prj/mom.C` the mother is `"mom.H"` (or `mom.h`, `mom.hpp`, ...). The stem is everything
/// before the first `.` of the file name, so `a.b.C` looks for `a.*`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MotherMatcher {
    stem: String,
}

impl MotherMatcher {
    pub fn from_source_name(source_name: &str) -> Option<Self> {
        let file_name = Path::new(source_name).file_name()?.to_str()?;
        let stem = file_name.split('.').next().unwrap_or_default();
        (!stem.is_empty()).then(|| Self {
            stem: stem.to_string(),
        })
    }

    pub fn stem(&self) -> &str {
        &self.stem
    }

    /// Whether `include_path` (a relative include without directories) is the mother header.
    pub fn matches(&self, include_path: &str) -> bool {
        include_path
            .strip_prefix(self.stem.as_str())
            .and_then(|rest| rest.strip_prefix('.'))
            .and_then(|extension| extension.chars().next())
            .is_some_and(|letter| letter.eq_ignore_ascii_case(&'h'))
    }
}
