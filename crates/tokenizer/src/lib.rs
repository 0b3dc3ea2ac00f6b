//! Bytepair-tokenizer - High-level tokenizer API
//!
//! This crate provides a user-friendly interface for byte-level BPE
//! tokenization: pre-tokenization with a fixed regex grammar, merge
//! learning, ordered merge replay for encoding, vocabulary expansion for
//! decoding, and the persisted model line format.
//!
//! # Example
//!
//! ```rust
//! use bytepair_tokenizer::Tokenizer;
//!
//! let mut tokenizer = Tokenizer::builder().vocab_size(300).build()?;
//! tokenizer.train("hello hello world world")?;
//!
//! let ids = tokenizer.encode("hello world")?;
//! assert_eq!(tokenizer.decode(&ids)?, "hello world");
//! # Ok::<(), bytepair_tokenizer::TokenizerError>(())
//! ```

// Re-export core types
pub use bytepair_core::{Merge, MergeList, Pair, Result, TokenizerError, Vocabulary};
pub use bytepair_training::TrainingReport;

// Tokenizer API
pub mod tokenizer;
pub use tokenizer::{Tokenizer, TokenizerBuilder, TokenizerConfig};

// IO/Serialization
pub mod io;
pub use io::{ModelReader, ModelWriter};

// Pre-tokenization
pub mod pre_tokenizer;
pub use pre_tokenizer::{Splitter, SPLIT_PATTERN};
