//! Main tokenizer implementation.
//!
//! This module provides the high-level `Tokenizer` struct tying together
//! pre-tokenization, the learned merge list and the derived vocabulary.
//!
//! A tokenizer's model is frozen outside of `train`: `encode` and `decode`
//! take `&self` and may run concurrently against the same instance without
//! locking.

use crate::io::{load::ModelReader, save::ModelWriter};
use crate::pre_tokenizer::Splitter;
use bytepair_core::{apply_merge, MergeList, Result, TokenizerError, Vocabulary};
use bytepair_training::{MergeLearner, TrainingConfig, TrainingReport};
use std::io::{BufRead, Write};
use std::path::Path;

/// Configuration for building a tokenizer.
#[derive(Debug, Clone)]
pub struct TokenizerConfig {
    /// Target vocabulary size for training (base bytes included)
    pub vocab_size: usize,
    /// Whether pre-tokenization fans out across lines
    pub parallel: bool,
}

impl Default for TokenizerConfig {
    fn default() -> Self {
        Self {
            vocab_size: 10_000,
            parallel: true,
        }
    }
}

/// Builder for creating a tokenizer.
#[derive(Debug, Clone, Default)]
pub struct TokenizerBuilder {
    config: TokenizerConfig,
}

impl TokenizerBuilder {
    /// Create a new tokenizer builder with default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the target vocabulary size.
    pub fn vocab_size(mut self, size: usize) -> Self {
        self.config.vocab_size = size;
        self
    }

    /// Enable or disable parallel pre-tokenization.
    pub fn parallel(mut self, parallel: bool) -> Self {
        self.config.parallel = parallel;
        self
    }

    /// Build the tokenizer.
    pub fn build(self) -> Result<Tokenizer> {
        Tokenizer::new(self.config)
    }
}

/// Byte-level BPE tokenizer.
///
/// Holds the ordered merge list (the model), the derived vocabulary and the
/// compiled pre-tokenization grammar.
pub struct Tokenizer {
    /// Ordered merge rules, frozen between training runs
    merges: MergeList,
    /// id -> payload store derived from the merges
    vocab: Vocabulary,
    /// Compiled splitting grammar
    splitter: Splitter,
    /// Configuration
    config: TokenizerConfig,
}

impl Tokenizer {
    /// Create an untrained tokenizer (base byte vocabulary only).
    pub fn new(config: TokenizerConfig) -> Result<Self> {
        Ok(Self {
            merges: MergeList::new(),
            vocab: Vocabulary::new(),
            splitter: Splitter::new()?,
            config,
        })
    }

    /// Create a tokenizer builder.
    pub fn builder() -> TokenizerBuilder {
        TokenizerBuilder::new()
    }

    /// Create a tokenizer around an existing frozen model.
    pub fn from_merges(merges: MergeList) -> Result<Self> {
        let vocab = Vocabulary::from_merges(&merges)?;
        let config = TokenizerConfig {
            vocab_size: merges.vocab_size(),
            ..Default::default()
        };
        Ok(Self {
            merges,
            vocab,
            splitter: Splitter::new()?,
            config,
        })
    }

    /// Train the tokenizer on a corpus, replacing any previous model.
    ///
    /// The new model is installed only after training succeeds; on error
    /// the tokenizer keeps its previous merges and vocabulary.
    pub fn train(&mut self, corpus: &str) -> Result<TrainingReport> {
        let sequence = self.pre_tokenize(corpus)?;

        let learner = MergeLearner::new(TrainingConfig {
            vocab_size: self.config.vocab_size,
            parallel: self.config.parallel,
        });
        let model = learner.train(sequence)?;

        self.merges = model.merges;
        self.vocab = model.vocab;
        Ok(model.report)
    }

    /// Encode text into token ids.
    ///
    /// Pre-tokenizes to base byte tokens, then replays every learned merge
    /// in training order. The result never has more tokens than the text
    /// has UTF-8 bytes, and is empty iff the text is empty.
    pub fn encode(&self, text: &str) -> Result<Vec<u32>> {
        let mut seq = self.pre_tokenize(text)?;
        if seq.len() < 2 {
            return Ok(seq);
        }
        for merge in &self.merges {
            // A placeholder can never match: its id cannot occur before
            // its own rule is applied.
            if merge.is_placeholder() {
                continue;
            }
            seq = apply_merge(&seq, merge.pair, merge.id);
        }
        Ok(seq)
    }

    /// Decode token ids back into text.
    ///
    /// Every id must be inside the model's vocabulary; unknown ids are an
    /// error, never skipped. Fails if the concatenated payloads are not
    /// valid UTF-8 (possible for arbitrary id sequences, never for the
    /// output of `encode`).
    pub fn decode(&self, ids: &[u32]) -> Result<String> {
        let mut bytes = Vec::with_capacity(ids.len());
        for &id in ids {
            let payload = self
                .vocab
                .payload(id)
                .ok_or(TokenizerError::UnknownTokenId(id))?;
            bytes.extend_from_slice(payload);
        }
        Ok(String::from_utf8(bytes)?)
    }

    fn pre_tokenize(&self, text: &str) -> Result<Vec<u32>> {
        if self.config.parallel {
            self.splitter.byte_tokens_parallel(text)
        } else {
            self.splitter.byte_tokens(text)
        }
    }

    /// Get the vocabulary size (base bytes + learned merges).
    pub fn vocab_size(&self) -> usize {
        self.vocab.len()
    }

    /// Get a reference to the merge list.
    pub fn merges(&self) -> &MergeList {
        &self.merges
    }

    /// Get a reference to the vocabulary.
    pub fn vocab(&self) -> &Vocabulary {
        &self.vocab
    }

    /// Serialize the model to a writer in the line format.
    pub fn to_writer(&self, writer: impl Write) -> Result<()> {
        ModelWriter::new(&self.merges).write_to(writer)
    }

    /// Save the model to a file.
    pub fn save(&self, path: &Path) -> Result<()> {
        ModelWriter::new(&self.merges).save(path)
    }

    /// Deserialize a model from a reader in the line format.
    pub fn from_reader(reader: impl BufRead) -> Result<Self> {
        let merges = ModelReader::read_from(reader)?;
        Self::from_merges(merges)
    }

    /// Load a model from a file.
    pub fn load(path: &Path) -> Result<Self> {
        let merges = ModelReader::load(path)?;
        Self::from_merges(merges)
    }
}

#[cfg(test)]
mod proptests;
