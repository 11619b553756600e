use super::PATH_SEPARATOR;

/// A named component in the project hierarchy.
///
/// Children are kept in registration order; their index is their weight in keys. Position
/// `children.len()` is the remainder: it stands for every name that is not registered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HierarchyNode {
    name: String,
    descendable: bool,
    children: Vec<HierarchyNode>,
}

/// Result of looking a path segment up among a node's children.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lookup<'a> {
    Registered(usize, &'a HierarchyNode),
    /// No child carries the name; the index is the remainder position.
    Remainder(usize),
}

impl Lookup<'_> {
    pub fn position(&self) -> usize {
        match *self {
            Lookup::Registered(position, _) | Lookup::Remainder(position) => position,
        }
    }
}

impl HierarchyNode {
    pub fn new(name: impl Into<String>, descendable: bool) -> Self {
        let name = name.into();
        assert!(
            !name.is_empty() && !name.contains(PATH_SEPARATOR),
            "invalid hierarchy node name {name:?}"
        );
        Self {
            name,
            descendable,
            children: Vec::new(),
        }
    }

    /// Roots have no name of their own and are always descendable.
    pub(crate) fn root() -> Self {
        Self {
            name: String::new(),
            descendable: true,
            children: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_descendable(&self) -> bool {
        self.descendable
    }

    pub fn children(&self) -> &[HierarchyNode] {
        &self.children
    }

    /// Index of the remainder position among this node's children.
    pub fn remainder_position(&self) -> usize {
        self.children.len()
    }

    /// Register a child in front of the remainder and return it.
    ///
    /// Registering a name twice returns the existing child untouched.
    pub fn insert(&mut self, name: &str, descendable: bool) -> &mut HierarchyNode {
        let index = match self.position_of(name) {
            Some(index) => index,
            None => {
                self.children.push(HierarchyNode::new(name, descendable));
                self.children.len() - 1
            }
        };
        &mut self.children[index]
    }

    /// Register several children in order and return the last one.
    pub fn insert_all<I, S>(&mut self, names: I, descendable: bool) -> &mut HierarchyNode
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut last = None;
        for name in names {
            last = Some(self.insert(name.as_ref(), descendable).name.clone());
        }
        let last = last.expect("insert_all needs at least one name");
        self.child_mut(&last).expect("child was just inserted")
    }

    pub fn child_mut(&mut self, name: &str) -> Option<&mut HierarchyNode> {
        self.children.iter_mut().find(|child| child.name == name)
    }

    /// Walk registered children along a `/`-separated path.
    pub fn descend_mut(&mut self, path: &str) -> Option<&mut HierarchyNode> {
        path.split(PATH_SEPARATOR)
            .try_fold(self, |node, segment| node.child_mut(segment))
    }

    /// Find the child named `segment`, falling back to the remainder.
    pub fn lookup(&self, segment: &str) -> Lookup<'_> {
        match self.position_of(segment) {
            Some(index) => Lookup::Registered(index, &self.children[index]),
            None => Lookup::Remainder(self.remainder_position()),
        }
    }

    /// Append the positions of `segments` below this node to `positions`.
    ///
    /// With `respect_descendable` the walk does not enter the children of a node that is not
    /// descendable. The walk always ends after the remainder was hit.
    pub(crate) fn extend_key<'p>(
        &self,
        mut segments: impl Iterator<Item = &'p str>,
        respect_descendable: bool,
        positions: &mut Vec<usize>,
    ) {
        let mut node = self;
        loop {
            if respect_descendable && !node.descendable {
                return;
            }
            let Some(segment) = segments.next() else {
                return;
            };
            match node.lookup(segment) {
                Lookup::Registered(position, child) => {
                    positions.push(position);
                    node = child;
                }
                Lookup::Remainder(position) => {
                    positions.push(position);
                    return;
                }
            }
        }
    }

    fn position_of(&self, name: &str) -> Option<usize> {
        self.children.iter().position(|child| child.name == name)
    }
}
