//! Recognition of `#include` statements and their classification into buckets.
use crate::hierarchy::PATH_SEPARATOR;
use once_cell::sync::Lazy;
use regex::Regex;

/// The code portion of a line that consists of nothing but an include statement.
static INCLUDE_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"^\s*#include\s+(?:"(?P<quoted>[^"]+)"|<(?P<angled>[^>]+)>)\s*$"#)
        .expect("include pattern compiles")
});

/// How an include path is delimited.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Quoting {
    /// `"path"`
    Quoted,
    /// `<path>`
    Angled,
}

impl Quoting {
    pub fn wrap(self, path: &str) -> String {
        match self {
            Quoting::Quoted => format!("\"{path}\""),
            Quoting::Angled => format!("<{path}>"),
        }
    }
}

/// An include statement found in code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IncludeDirective {
    pub path: String,
    pub quoting: Quoting,
}

impl IncludeDirective {
    /// Recognize `code` as an include statement.
    ///
    /// Anything beyond surrounding whitespace (a second statement, an unterminated quote, ...)
    /// makes the line ordinary code.
    pub fn parse(code: &str) -> Option<Self> {
        let captures = INCLUDE_PATTERN.captures(code)?;
        if let Some(path) = captures.name("quoted") {
            return Some(Self {
                path: path.as_str().to_string(),
                quoting: Quoting::Quoted,
            });
        }
        captures.name("angled").map(|path| Self {
            path: path.as_str().to_string(),
            quoting: Quoting::Angled,
        })
    }

    pub fn is_angled(&self) -> bool {
        self.quoting == Quoting::Angled
    }
}

/// The group an include is sorted into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Bucket {
    /// Absolute include without directories, e.g. `<iostream>`.
    System,
    /// Include with directories, e.g. `<component/header.H>`.
    Absolute,
    /// Relative include without directories, e.g. `"local.H"`.
    Relative,
}

impl Bucket {
    /// Classify a path: any path with a directory is a component include; otherwise the
    /// absolute flag decides between system and relative.
    pub fn classify(path: &str, is_absolute: bool) -> Bucket {
        if path.contains(PATH_SEPARATOR) {
            Bucket::Absolute
        } else if is_absolute {
            Bucket::System
        } else {
            Bucket::Relative
        }
    }

    /// Delimiters the include is written back with.
    pub fn quoting(self, is_absolute: bool) -> Quoting {
        match self {
            Bucket::System => Quoting::Angled,
            Bucket::Relative => Quoting::Quoted,
            Bucket::Absolute if is_absolute => Quoting::Angled,
            Bucket::Absolute => Quoting::Quoted,
        }
    }
}
