//! BPE merge learning.
//!
//! Training is strictly sequential: every iteration's statistics depend on
//! the sequence produced by the previous merge, so the loop cannot be
//! parallelized. Only the initial pair count fans out across threads.

use super::counter;
use ahash::AHashMap;
use bytepair_core::{
    MergeCandidate, MergeList, Pair, PairPriorityQueue, Result, TokenizerError, Vocabulary,
    BASE_VOCAB_SIZE,
};
use log::{debug, info};

/// Configuration for BPE training.
#[derive(Debug, Clone)]
pub struct TrainingConfig {
    /// Target vocabulary size, including the 256 base byte tokens
    pub vocab_size: usize,
    /// Whether the initial pair count uses worker threads
    pub parallel: bool,
}

impl Default for TrainingConfig {
    fn default() -> Self {
        Self {
            vocab_size: 10_000,
            parallel: true,
        }
    }
}

/// Summary of a completed training run.
#[derive(Debug, Clone, Copy, Default)]
pub struct TrainingReport {
    /// Length of the base token sequence the learner started from
    pub input_tokens: usize,
    /// Length of the sequence after all merges were applied
    pub output_tokens: usize,
    /// Number of merges learned from the corpus
    pub learned: usize,
    /// Number of placeholder merges filling unused slots
    pub placeholders: usize,
}

impl TrainingReport {
    /// Ratio of input tokens to output tokens.
    pub fn compression_ratio(&self) -> f64 {
        if self.output_tokens == 0 {
            1.0
        } else {
            self.input_tokens as f64 / self.output_tokens as f64
        }
    }
}

/// A trained model: the ordered merge list plus its derived vocabulary.
#[derive(Debug, Clone)]
pub struct TrainedModel {
    /// Ordered merge rules; ids 256.. in learning order
    pub merges: MergeList,
    /// Payloads for every id in `[0, vocab_size)`
    pub vocab: Vocabulary,
    /// Compression statistics for the training corpus
    pub report: TrainingReport,
}

/// BPE merge learner.
///
/// Consumes a base token sequence and produces exactly
/// `vocab_size - 256` merges. An exhausted corpus fills the remaining
/// slots with placeholder merges instead of failing, so downstream
/// consumers can rely on the fixed model size.
pub struct MergeLearner {
    config: TrainingConfig,
}

impl MergeLearner {
    /// Create a merge learner with the given configuration.
    pub fn new(config: TrainingConfig) -> Self {
        Self { config }
    }

    /// Create a merge learner with default configuration for `vocab_size`.
    pub fn with_vocab_size(vocab_size: usize) -> Self {
        Self::new(TrainingConfig {
            vocab_size,
            ..Default::default()
        })
    }

    /// Learn merges from a base token sequence.
    pub fn train(&self, sequence: Vec<u32>) -> Result<TrainedModel> {
        let target = self.config.vocab_size;
        if target <= BASE_VOCAB_SIZE as usize {
            return Err(TokenizerError::InvalidConfig(format!(
                "vocab_size must exceed {}, got {}",
                BASE_VOCAB_SIZE, target
            )));
        }
        let num_merges = target - BASE_VOCAB_SIZE as usize;

        let input_tokens = sequence.len();
        let mut seq = sequence;

        let mut counts = if self.config.parallel {
            counter::count_parallel(&seq)
        } else {
            counter::count(&seq)
        };

        let mut queue = PairPriorityQueue::with_capacity(counts.len());
        for (&pair, &count) in &counts {
            queue.push(MergeCandidate::new(pair, count));
        }

        let mut merges = MergeList::with_capacity(num_merges);
        let mut vocab = Vocabulary::with_capacity(target);
        let mut placeholders = 0usize;

        for step in 0..num_merges {
            let Some(candidate) = queue.pop() else {
                // Statistics exhausted (empty or tiny corpus): fill the
                // remaining slots so the model keeps its fixed size.
                placeholders = num_merges - step;
                for _ in step..num_merges {
                    let merge = merges.push_placeholder();
                    vocab.register(&merge)?;
                }
                info!(
                    "pair statistics exhausted after {} merges, filled {} placeholder slots",
                    step, placeholders
                );
                break;
            };

            let merge = merges.push(candidate.pair);
            vocab.register(&merge)?;

            let (rewritten, deltas) = counter::merge_with_deltas(&seq, candidate.pair, merge.id);
            seq = rewritten;
            self.apply_deltas(&mut counts, &mut queue, deltas);

            debug!(
                "merge {} <- {:?} (count {})",
                merge.id, merge.pair, candidate.count
            );
            if (step + 1) % 1000 == 0 {
                info!("learned {}/{} merges", step + 1, num_merges);
            }
        }

        let report = TrainingReport {
            input_tokens,
            output_tokens: seq.len(),
            learned: num_merges - placeholders,
            placeholders,
        };
        info!(
            "training complete: {} merges ({} placeholders), {} -> {} tokens (ratio {:.2})",
            num_merges,
            placeholders,
            report.input_tokens,
            report.output_tokens,
            report.compression_ratio()
        );

        Ok(TrainedModel {
            merges,
            vocab,
            report,
        })
    }

    /// Fold rewrite deltas into the count map and the candidate queue.
    fn apply_deltas(
        &self,
        counts: &mut AHashMap<Pair, u64>,
        queue: &mut PairPriorityQueue,
        deltas: AHashMap<Pair, i64>,
    ) {
        for (pair, delta) in deltas {
            let current = counts.get(&pair).copied().unwrap_or(0) as i64;
            let next = current + delta;
            if next > 0 {
                counts.insert(pair, next as u64);
                queue.update(pair, next as u64);
            } else {
                counts.remove(&pair);
                queue.remove(pair);
            }
        }
    }
}
