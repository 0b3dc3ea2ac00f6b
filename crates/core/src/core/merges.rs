//! Merge rule management for BPE.
//!
//! A trained model is an ordered list of merges. Order is semantically
//! significant: encode and decode replay the list in exactly the order the
//! merges were learned, so the list type enforces the id invariant
//! (`merges[k].id == 256 + k`) instead of leaving it to callers.

use crate::error::{Result, TokenizerError};
use serde::{Deserialize, Serialize};

/// Number of reserved base tokens; ids 0-255 map to the raw byte values.
pub const BASE_VOCAB_SIZE: u32 = 256;

/// An ordered pair of adjacent token IDs. `(a, b) != (b, a)`.
pub type Pair = (u32, u32);

/// A single learned merge rule: `pair` is rewritten to `id`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Merge {
    /// The adjacent pair this rule replaces
    pub pair: Pair,
    /// The token ID produced by the replacement
    pub id: u32,
}

impl Merge {
    /// Create a placeholder merge for an exhausted corpus.
    ///
    /// The pair is self-referential: `id` cannot occur in any sequence
    /// before this merge exists, so the rule never matches during encode.
    pub fn placeholder(id: u32) -> Self {
        Self { pair: (id, id), id }
    }

    /// Whether this merge is a placeholder filling an unused slot.
    #[inline]
    pub fn is_placeholder(&self) -> bool {
        self.pair == (self.id, self.id)
    }
}

/// The ordered collection of merge rules that constitutes a trained model.
///
/// IDs are assigned consecutively from 256 in learning order; the list is
/// append-only during training and frozen afterwards.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MergeList {
    merges: Vec<Merge>,
}

impl MergeList {
    /// Create a new empty merge list.
    pub fn new() -> Self {
        Self { merges: Vec::new() }
    }

    /// Create a new merge list with capacity for `capacity` merges.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            merges: Vec::with_capacity(capacity),
        }
    }

    /// Rebuild a merge list from raw merges, validating the model invariants.
    ///
    /// Every id must equal `256 + position`, and every pair must reference
    /// previously defined ids (or be a self-referential placeholder).
    pub fn from_merges(merges: Vec<Merge>) -> Result<Self> {
        for (k, merge) in merges.iter().enumerate() {
            let expected = BASE_VOCAB_SIZE + k as u32;
            if merge.id != expected {
                return Err(TokenizerError::InvalidMerge(format!(
                    "merge {} has id {}, expected {}",
                    k, merge.id, expected
                )));
            }
            let (first, second) = merge.pair;
            let back_reference = first < merge.id && second < merge.id;
            if !back_reference && !merge.is_placeholder() {
                return Err(TokenizerError::InvalidMerge(format!(
                    "merge {} references undefined ids ({}, {})",
                    k, first, second
                )));
            }
        }
        Ok(Self { merges })
    }

    /// Append a learned merge for `pair`, returning the assigned merge.
    pub fn push(&mut self, pair: Pair) -> Merge {
        let merge = Merge {
            pair,
            id: self.next_id(),
        };
        self.merges.push(merge);
        merge
    }

    /// Append a placeholder merge, returning it.
    pub fn push_placeholder(&mut self) -> Merge {
        let merge = Merge::placeholder(self.next_id());
        self.merges.push(merge);
        merge
    }

    /// The id the next appended merge will receive.
    #[inline]
    pub fn next_id(&self) -> u32 {
        BASE_VOCAB_SIZE + self.merges.len() as u32
    }

    /// Total vocabulary size implied by this model (base bytes + merges).
    #[inline]
    pub fn vocab_size(&self) -> usize {
        BASE_VOCAB_SIZE as usize + self.merges.len()
    }

    /// Number of merges in the model.
    #[inline]
    pub fn len(&self) -> usize {
        self.merges.len()
    }

    /// Check if the model has no merges.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.merges.is_empty()
    }

    /// Iterate merges in learning order.
    pub fn iter(&self) -> std::slice::Iter<'_, Merge> {
        self.merges.iter()
    }

    /// The merges as a slice, in learning order.
    pub fn as_slice(&self) -> &[Merge] {
        &self.merges
    }
}

impl<'a> IntoIterator for &'a MergeList {
    type Item = &'a Merge;
    type IntoIter = std::slice::Iter<'a, Merge>;

    fn into_iter(self) -> Self::IntoIter {
        self.merges.iter()
    }
}

/// Replace every non-overlapping occurrence of `pair` in `seq` with `id`.
///
/// Single left-to-right scan; after a replacement the scan resumes past the
/// consumed element. Used verbatim by both training and encode so the two
/// stay byte-for-byte consistent.
pub fn apply_merge(seq: &[u32], pair: Pair, id: u32) -> Vec<u32> {
    let mut out = Vec::with_capacity(seq.len());
    let mut i = 0;
    while i < seq.len() {
        if i + 1 < seq.len() && seq[i] == pair.0 && seq[i + 1] == pair.1 {
            out.push(id);
            i += 2;
        } else {
            out.push(seq[i]);
            i += 1;
        }
    }
    out
}
