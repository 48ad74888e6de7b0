pub mod compare;
pub mod error;
pub mod input;
pub mod paging;
pub mod segmentation;
pub mod trace;

pub use error::{SimulationError, SimulationResult};
pub use paging::{simulate_replacement, PageId, Policy, ReplacementOutcome};
pub use segmentation::{simulate_segmentation, FitStrategy, SegmentRequest, SegmentationOutcome};
