pub mod interval;
pub mod interval_set;
pub mod summary;

// re-export for cleaner imports
pub use self::interval::GenomicInterval;
pub use self::interval_set::IntervalSet;
pub use self::summary::{CoverageSummary, IntervalKind, Sex, SexMetrics};
