//! Project root discovery
//!
//! The root decides which `.tidy-includes.toml` applies and what quoted includes are resolved
//! against. An explicit `--root` wins, then the enclosing git work tree, then the directory of the
//! source file itself.

use std::path::{Path, PathBuf};
use std::process::Command;
use tracing::debug;

/// Directory holding `path`; `.` for bare file names.
pub fn source_dir(path: &Path) -> PathBuf {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    }
}

pub fn project_root(explicit: Option<&Path>, source_dir: &Path) -> PathBuf {
    if let Some(root) = explicit {
        return root.to_path_buf();
    }
    git_toplevel(source_dir).unwrap_or_else(|| source_dir.to_path_buf())
}

fn git_toplevel(dir: &Path) -> Option<PathBuf> {
    let output = Command::new("git")
        .arg("-C")
        .arg(dir)
        .args(["rev-parse", "--show-toplevel"])
        .output()
        .ok()?;
    if !output.status.success() {
        debug!(dir = %dir.display(), "not inside a git work tree");
        return None;
    }
    let toplevel = String::from_utf8(output.stdout).ok()?;
    let toplevel = toplevel.trim_end();
    (!toplevel.is_empty()).then(|| PathBuf::from(toplevel))
}
