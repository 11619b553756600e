//! Project hierarchy
//!
//! A forest of named path components describing how a project is laid out. Each include path is
//! walked down the forest segment by segment; the sibling position matched at every level becomes
//! one digit of a key.
//!
//! Two keys are derived from the same walk:
//!
//! - the sort key follows the path all the way down and orders includes,
//! - the group key stops below the first node that is not descendable and decides where blank
//!   lines separate includes.
//!
//! Every node owns an implicit remainder position after its registered children. A segment that
//! matches no registered child lands there, which sorts it after everything that is known and ends
//! the walk.

pub mod key;
pub mod node;
pub mod sequencer;

pub use key::HierarchyKey;
pub use node::{HierarchyNode, Lookup};
pub use sequencer::IncludeSequencer;

/// Separator between path segments.
pub const PATH_SEPARATOR: char = '/';
