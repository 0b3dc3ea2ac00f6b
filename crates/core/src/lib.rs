//! Bytepair-core - Core BPE data model
//!
//! This crate provides the fundamental data structures for byte-level
//! byte-pair encoding: the base 256-byte alphabet, ordered merge lists,
//! derived vocabularies, and the deterministic priority queue used by the
//! trainer.
//!
//! # Example
//!
//! ```rust
//! use bytepair_core::{MergeList, Vocabulary};
//!
//! let mut merges = MergeList::new();
//! let merge = merges.push((104, 101)); // 'h' + 'e'
//! assert_eq!(merge.id, 256);
//!
//! let vocab = Vocabulary::from_merges(&merges)?;
//! assert_eq!(vocab.payload(256), Some(&b"he"[..]));
//! # Ok::<(), bytepair_core::TokenizerError>(())
//! ```

pub mod error;
pub use error::{Result, TokenizerError};

// Core BPE data model
pub mod core;
pub use core::{
    apply_merge, Merge, MergeCandidate, MergeList, Pair, PairPriorityQueue, Vocabulary,
    BASE_VOCAB_SIZE,
};
