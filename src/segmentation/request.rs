use super::segment::ProcessId;
use serde::{Deserialize, Serialize};
use std::fmt;

/// One allocator request.
///
/// Text form: `"<pid>:<size>"` allocates `size` units for `pid`, `"-<pid>"`
/// releases everything `pid` owns. Text that fits neither shape is kept as
/// [`SegmentRequest::Malformed`] so the run can report it as a failed step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SegmentRequest {
    Allocate { pid: ProcessId, size: usize },
    Deallocate { pid: ProcessId },
    Malformed { raw: String },
}

impl SegmentRequest {
    pub fn allocate(pid: &str, size: usize) -> Self {
        SegmentRequest::Allocate {
            pid: ProcessId::from(pid),
            size,
        }
    }

    pub fn deallocate(pid: &str) -> Self {
        SegmentRequest::Deallocate {
            pid: ProcessId::from(pid),
        }
    }

    /// Parse one request. Never fails; bad text becomes `Malformed`.
    ///
    /// A leading `-` always selects deallocation and the rest of the text is
    /// the pid, so `-1:100` releases a process named `1:100`.
    pub fn parse(text: &str) -> Self {
        let trimmed = text.trim();
        let malformed = || SegmentRequest::Malformed {
            raw: trimmed.to_string(),
        };

        if let Some(pid) = trimmed.strip_prefix('-') {
            let pid = pid.trim();
            if pid.is_empty() {
                return malformed();
            }
            return SegmentRequest::deallocate(pid);
        }

        let Some((pid, size)) = trimmed.split_once(':') else {
            return malformed();
        };
        let pid = pid.trim();
        if pid.is_empty() || size.contains(':') {
            return malformed();
        }
        match size.trim().parse::<usize>() {
            Ok(size) if size > 0 => SegmentRequest::allocate(pid, size),
            _ => malformed(),
        }
    }

    /// Parse a whitespace- or comma-separated list of requests.
    pub fn parse_list(text: &str) -> Vec<Self> {
        text.split(|c: char| c == ',' || c.is_whitespace())
            .filter(|token| !token.is_empty())
            .map(SegmentRequest::parse)
            .collect()
    }

    /// Human-readable label carried by the step record.
    pub fn description(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for SegmentRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SegmentRequest::Allocate { pid, size } => write!(f, "Alloc {} ({}KB)", pid, size),
            SegmentRequest::Deallocate { pid } => write!(f, "Dealloc {}", pid),
            SegmentRequest::Malformed { raw } => write!(f, "Invalid Req: {}", raw),
        }
    }
}
