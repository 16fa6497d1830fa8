//! The scan pipeline: collect audio paths, probe them, build records.

mod extract;
mod pool;
mod walk;

pub use extract::{TrackMetadata, extract};
pub use pool::extract_all;
pub use walk::collect_files;
