//! Core BPE data model.
//!
//! This module contains the fundamental data structures for byte-pair
//! encoding: pairs, ordered merge lists, the derived vocabulary, and the
//! deterministic candidate queue used during training.

pub mod merges;
pub mod priority;
pub mod vocab;

pub use merges::{apply_merge, Merge, MergeList, Pair, BASE_VOCAB_SIZE};
pub use priority::{MergeCandidate, PairPriorityQueue};
pub use vocab::Vocabulary;
