use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of the process that owns an allocated segment.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProcessId(pub String);

impl From<&str> for ProcessId {
    fn from(id: &str) -> Self {
        ProcessId(id.to_string())
    }
}

impl fmt::Display for ProcessId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Owner {
    Free,
    Allocated(ProcessId),
}

/// Contiguous address range `[start, start + size)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Segment {
    pub owner: Owner,
    pub start: usize,
    pub size: usize,
}

impl Segment {
    pub fn free(start: usize, size: usize) -> Self {
        Self {
            owner: Owner::Free,
            start,
            size,
        }
    }

    pub fn allocated(pid: ProcessId, start: usize, size: usize) -> Self {
        Self {
            owner: Owner::Allocated(pid),
            start,
            size,
        }
    }

    /// One past the last address.
    pub fn end(&self) -> usize {
        self.start + self.size
    }

    pub fn is_free(&self) -> bool {
        self.owner == Owner::Free
    }

    pub fn is_owned_by(&self, pid: &ProcessId) -> bool {
        matches!(&self.owner, Owner::Allocated(owner) if owner == pid)
    }
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.owner {
            Owner::Free => write!(f, "[{}..{}) free", self.start, self.end()),
            Owner::Allocated(pid) => write!(f, "[{}..{}) {}", self.start, self.end(), pid),
        }
    }
}
