//! Per-render form instance ids.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

/// Identifier of one rendered form instance.
///
/// Used only to namespace generated element identifiers so multiple
/// renderings of the same schema on one page do not collide. Carries no
/// other meaning and does not survive process restarts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize)]
pub struct InstanceId(u64);

impl InstanceId {
    /// Returns the numeric value of the id.
    pub fn value(self) -> u64 {
        self.0
    }
}

impl fmt::Display for InstanceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Process-wide registry handing out monotonically increasing instance
/// ids, one per rendered form.
///
/// Increments are atomic, so ids stay unique under concurrent renders.
#[derive(Debug, Default)]
pub struct InstanceRegistry {
    count: AtomicU64,
}

impl InstanceRegistry {
    /// Creates a registry starting at zero.
    pub const fn new() -> Self {
        Self {
            count: AtomicU64::new(0),
        }
    }

    /// Assigns the next instance id. The first id handed out is 1.
    pub fn next(&self) -> InstanceId {
        InstanceId(self.count.fetch_add(1, Ordering::Relaxed) + 1)
    }
}
