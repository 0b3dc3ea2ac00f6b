//! Bytepair-training - BPE merge learning
//!
//! This crate learns an ordered list of merge rules from a base token
//! sequence by repeatedly collapsing the most frequent adjacent pair.
//!
//! # Example
//!
//! ```rust
//! use bytepair_training::MergeLearner;
//!
//! let corpus: Vec<u32> = "hello hello".bytes().map(u32::from).collect();
//! let model = MergeLearner::with_vocab_size(260).train(corpus)?;
//! assert_eq!(model.merges.len(), 4);
//! # Ok::<(), bytepair_training::TokenizerError>(())
//! ```

pub use bytepair_core::{Result, TokenizerError};

// Training infrastructure
pub mod training;
pub use training::{MergeLearner, TrainedModel, TrainingConfig, TrainingReport};
