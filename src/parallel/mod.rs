//! Parallel tokenizing support
//!
//! Scans independent source buffers concurrently.

mod executor;

pub use executor::{tokenize_many, ParallelConfig};
