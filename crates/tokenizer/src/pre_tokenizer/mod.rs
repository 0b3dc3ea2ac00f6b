//! Pre-tokenization pipeline.
//!
//! Splits raw text into coarse chunks with a fixed regex grammar and
//! flattens them to base byte tokens, sequentially or line-parallel.

pub mod parallel;
pub mod split;

pub use parallel::NEWLINE_TOKEN;
pub use split::{Chunks, Splitter, SPLIT_PATTERN};
