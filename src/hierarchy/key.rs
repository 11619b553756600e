use std::fmt;

/// Number of decimal digits used per position when a key is rendered.
pub const KEY_DIGITS: usize = 4;

/// Ordered positions collected while walking a path down the hierarchy.
///
/// Ordering is element-wise with shorter prefixes first, which is exactly the lexicographic order
/// of the zero-padded digit string produced by `Display`.
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct HierarchyKey(Vec<usize>);

impl HierarchyKey {
    pub fn new(positions: Vec<usize>) -> Self {
        debug_assert!(positions.iter().all(|&p| p < 10usize.pow(KEY_DIGITS as u32)));
        Self(positions)
    }

    pub fn positions(&self) -> &[usize] {
        &self.0
    }

    /// Number of hierarchy levels the key covers.
    pub fn depth(&self) -> usize {
        self.0.len()
    }
}

impl fmt::Display for HierarchyKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for position in &self.0 {
            write!(f, "{:0width$}", position, width = KEY_DIGITS)?;
        }
        Ok(())
    }
}
