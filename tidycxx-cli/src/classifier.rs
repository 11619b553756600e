//! Resolution of quoted includes against the project root
use std::fs;
use std::path::{Component, Path, PathBuf};
use tidycxx::includes::MotherMatcher;
use tidycxx::{PathClassifier, PreparedPath};

/// Rewrites quoted includes that name a file next to the source into project-root-relative,
/// absolute includes.
///
/// Quoted includes that do not exist relative to the source directory are kept as written. The
/// source file's own header is never rewritten. A quoted include that resolves to a file outside
/// the project root is rejected.
#[derive(Debug, Clone)]
pub struct ProjectClassifier {
    root: PathBuf,
    source_dir: PathBuf,
    mother: Option<MotherMatcher>,
}

impl ProjectClassifier {
    pub fn new(root: &Path, source_path: &Path) -> Self {
        let source_dir = crate::root::source_dir(source_path);
        Self {
            root: fs::canonicalize(root).unwrap_or_else(|_| root.to_path_buf()),
            source_dir: fs::canonicalize(&source_dir).unwrap_or(source_dir),
            mother: source_path.to_str().and_then(MotherMatcher::from_source_name),
        }
    }
}

impl PathClassifier for ProjectClassifier {
    fn prepare(&self, path: &str, angle_bracketed: bool) -> Option<PreparedPath> {
        let as_written = PreparedPath::new(path, angle_bracketed);
        if angle_bracketed || self.mother.as_ref().is_some_and(|mother| mother.matches(path)) {
            return Some(as_written);
        }

        let candidate = self.source_dir.join(path);
        if !candidate.is_file() {
            return Some(as_written);
        }
        let Ok(resolved) = fs::canonicalize(&candidate) else {
            return Some(as_written);
        };
        let relative = resolved.strip_prefix(&self.root).ok()?;
        Some(PreparedPath::new(include_path(relative), true))
    }
}

/// `/`-joined form of a relative path, whatever the platform separator.
fn include_path(relative: &Path) -> String {
    relative
        .components()
        .filter_map(|component| match component {
            Component::Normal(name) => Some(name.to_string_lossy()),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("/")
}
