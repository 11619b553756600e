use super::key::HierarchyKey;
use super::node::{HierarchyNode, Lookup};
use super::PATH_SEPARATOR;

/// Ordered forest of hierarchy roots; turns include paths into sort and group keys.
///
/// ```text
/// let mut sequencer = IncludeSequencer::new();
/// let root = sequencer.add_root();
/// root.insert("componentA", true).insert("subA0", true);
/// root.insert("componentB", false);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IncludeSequencer {
    roots: Vec<HierarchyNode>,
}

impl IncludeSequencer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a new root and return it for registration.
    pub fn add_root(&mut self) -> &mut HierarchyNode {
        self.roots.push(HierarchyNode::root());
        self.roots.last_mut().expect("root was just pushed")
    }

    pub fn roots(&self) -> &[HierarchyNode] {
        &self.roots
    }

    pub fn is_empty(&self) -> bool {
        self.roots.iter().all(|root| root.children().is_empty())
    }

    /// Key that orders `path` among all include paths.
    ///
    /// Paths whose first segment is unknown to every root sort after all known paths.
    pub fn sort_key(&self, path: &str) -> HierarchyKey {
        self.key(path, false)
    }

    /// Key shared by all paths that belong in the same blank-line separated group.
    pub fn group_key(&self, path: &str) -> HierarchyKey {
        self.key(path, true)
    }

    /// The key every path with an unknown first segment gets.
    pub fn unknown_key(&self) -> HierarchyKey {
        HierarchyKey::new(vec![self.roots.len()])
    }

    fn key(&self, path: &str, respect_descendable: bool) -> HierarchyKey {
        let mut segments = path
            .split(PATH_SEPARATOR)
            .take_while(|segment| !segment.is_empty());
        let Some(first) = segments.next() else {
            return self.unknown_key();
        };

        for (root_position, root) in self.roots.iter().enumerate() {
            if let Lookup::Registered(position, node) = root.lookup(first) {
                let mut positions = vec![root_position, position];
                node.extend_key(segments, respect_descendable, &mut positions);
                return HierarchyKey::new(positions);
            }
        }
        self.unknown_key()
    }
}
