//! Directory traversal strategies and their reconciliation
//!
//! Two walkers with the same contract - enumerate every entry reachable
//! from a root, exactly once each - and a comparator that checks they agree:
//!
//! ```text
//!  ┌────────────────────┐        ┌────────────────────┐
//!  │  SequentialWalker  │        │   ParallelWalker   │
//!  │  depth-first scan  │        │  task-per-dir pool │
//!  └─────────┬──────────┘        └──────────┬─────────┘
//!            │      Vec<ScanEntry>          │
//!            └──────────────┬───────────────┘
//!                 ┌─────────▼─────────┐
//!                 │   compare_scans   │
//!                 │  totals + diffs   │
//!                 └───────────────────┘
//! ```
//!
//! Result ordering is unspecified for the concurrent walker and incidental
//! for the sequential one; only set membership and per-path metadata are
//! contractual.

pub mod compare;
pub mod parallel;
pub mod record;
pub mod sequential;

pub use compare::{compare_scans, ScanComparison, StrategyTotals};
pub use parallel::ParallelWalker;
pub use record::ScanEntry;
pub use sequential::SequentialWalker;
