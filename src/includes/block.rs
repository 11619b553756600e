//! Buffered include statements of one block and their final arrangement.
use super::directive::{Bucket, Quoting};
use super::mother::MotherMatcher;
use super::sink::SourceLine;
use crate::hierarchy::{HierarchyKey, IncludeSequencer};
use indexmap::IndexMap;

/// One include of a block, after classification and deduplication.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IncludeEntry {
    pub path: String,
    pub bucket: Bucket,
    pub quoting: Quoting,
    /// Normalized comment texts, first seen first, without repetitions.
    pub comments: Vec<String>,
    /// Source lines of the statement while it can still be reproduced verbatim.
    raw: Option<Vec<SourceLine>>,
}

impl IncludeEntry {
    pub fn new(path: impl Into<String>, bucket: Bucket, quoting: Quoting) -> Self {
        Self {
            path: path.into(),
            bucket,
            quoting,
            comments: Vec::new(),
            raw: None,
        }
    }

    /// Keep the original source lines for verbatim output.
    pub fn with_raw(mut self, raw: Vec<SourceLine>) -> Self {
        self.raw = Some(raw);
        self
    }

    pub fn add_comments(&mut self, comments: impl IntoIterator<Item = String>) {
        for comment in comments {
            if !self.comments.contains(&comment) {
                self.comments.push(comment);
            }
        }
    }

    /// All comments merged into one line of text.
    pub fn description(&self) -> Option<String> {
        (!self.comments.is_empty()).then(|| self.comments.join(" "))
    }

    pub fn raw(&self) -> Option<&[SourceLine]> {
        self.raw.as_deref()
    }

    fn absorb(&mut self, duplicate: IncludeEntry) {
        self.raw = None;
        self.add_comments(duplicate.comments);
    }
}

/// Includes collected since the last flush, by bucket and in first-seen order.
#[derive(Debug, Default)]
pub struct IncludeBlock {
    system: IndexMap<String, IncludeEntry>,
    absolute: IndexMap<String, IncludeEntry>,
    relative: IndexMap<String, IncludeEntry>,
}

impl IncludeBlock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an entry; a path already present in the same bucket absorbs the new comments.
    pub fn add(&mut self, entry: IncludeEntry) {
        let bucket = match entry.bucket {
            Bucket::System => &mut self.system,
            Bucket::Absolute => &mut self.absolute,
            Bucket::Relative => &mut self.relative,
        };
        match bucket.get_mut(&entry.path) {
            Some(existing) => existing.absorb(entry),
            None => {
                bucket.insert(entry.path.clone(), entry);
            }
        }
    }

    pub fn len(&self) -> usize {
        self.system.len() + self.absolute.len() + self.relative.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The source lines of a block that holds exactly one untouched include.
    pub fn untouched_raw(&self) -> Option<&[SourceLine]> {
        if self.len() != 1 {
            return None;
        }
        self.system
            .values()
            .chain(self.absolute.values())
            .chain(self.relative.values())
            .next()
            .and_then(IncludeEntry::raw)
    }

    /// Order the block into its output sections, dropping empty ones.
    ///
    /// Sections come as mother header, system includes, component includes, relative includes.
    /// System and relative includes sort by path; component includes by hierarchy position, then
    /// path.
    pub fn into_sections(
        self,
        mother: Option<&MotherMatcher>,
        sequencer: &IncludeSequencer,
    ) -> Vec<Section> {
        let IncludeBlock {
            system,
            absolute,
            mut relative,
        } = self;

        let mother_entry = mother
            .and_then(|matcher| relative.keys().position(|path| matcher.matches(path)))
            .and_then(|index| relative.shift_remove_index(index))
            .map(|(_, entry)| entry);

        let mut system: Vec<IncludeEntry> = system.into_values().collect();
        system.sort_by(|a, b| a.path.cmp(&b.path));

        let mut absolute: Vec<(HierarchyKey, IncludeEntry)> = absolute
            .into_values()
            .map(|entry| (sequencer.sort_key(&entry.path), entry))
            .collect();
        absolute.sort_by(|(key_a, a), (key_b, b)| {
            key_a.cmp(key_b).then_with(|| a.path.cmp(&b.path))
        });

        let mut relative: Vec<IncludeEntry> = relative.into_values().collect();
        relative.sort_by(|a, b| a.path.cmp(&b.path));

        [
            (SectionKind::Mother, mother_entry.into_iter().collect::<Vec<_>>()),
            (SectionKind::System, system),
            (
                SectionKind::Absolute,
                absolute.into_iter().map(|(_, entry)| entry).collect(),
            ),
            (SectionKind::Relative, relative),
        ]
        .into_iter()
        .filter(|(_, entries)| !entries.is_empty())
        .map(|(kind, entries)| Section::new(kind, entries, sequencer))
        .collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SectionKind {
    Mother,
    System,
    Absolute,
    Relative,
}

/// Ordered includes of one section together with their group keys.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    pub kind: SectionKind,
    pub entries: Vec<(HierarchyKey, IncludeEntry)>,
}

impl Section {
    fn new(kind: SectionKind, entries: Vec<IncludeEntry>, sequencer: &IncludeSequencer) -> Self {
        let entries = entries
            .into_iter()
            .map(|entry| (sequencer.group_key(&entry.path), entry))
            .collect();
        Self { kind, entries }
    }

    pub fn paths(&self) -> Vec<&str> {
        self.entries
            .iter()
            .map(|(_, entry)| entry.path.as_str())
            .collect()
    }
}
