pub mod inspect;
pub mod static_files;

pub use inspect::{SnapshotSummary, summarize};
