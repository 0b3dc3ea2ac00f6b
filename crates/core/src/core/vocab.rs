//! Vocabulary storage and lookup.
//!
//! Maps every token id to its resolved byte payload. Ids are contiguous, so
//! the store is a plain indexed vector: entries 0-255 are the base byte
//! alphabet, entries from 256 up are derived from the merge list, each
//! computed once when the merge is registered and never recomputed on the
//! decode path.
//!
//! Payloads are raw bytes, not strings: a merge can join two tokens whose
//! concatenation is only a fragment of a UTF-8 sequence.

use crate::core::merges::{Merge, MergeList, BASE_VOCAB_SIZE};
use crate::error::{Result, TokenizerError};
use serde::{Deserialize, Serialize};

/// Token id to byte payload mapping for base bytes and learned merges.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Vocabulary {
    /// Payload per id; index is the token id
    payloads: Vec<Vec<u8>>,
}

impl Vocabulary {
    /// Create a vocabulary holding only the 256-entry base byte alphabet.
    pub fn new() -> Self {
        Self::with_capacity(BASE_VOCAB_SIZE as usize)
    }

    /// Create a base vocabulary with room for `capacity` total entries.
    pub fn with_capacity(capacity: usize) -> Self {
        let mut payloads = Vec::with_capacity(capacity.max(BASE_VOCAB_SIZE as usize));
        for byte in 0..=255u8 {
            payloads.push(vec![byte]);
        }
        Self { payloads }
    }

    /// Derive the full vocabulary for a frozen merge list.
    pub fn from_merges(merges: &MergeList) -> Result<Self> {
        let mut vocab = Self::with_capacity(merges.vocab_size());
        for merge in merges {
            vocab.register(merge)?;
        }
        Ok(vocab)
    }

    /// Register the derived payload for a newly learned merge.
    ///
    /// Merges must be registered in id order. A placeholder merge resolves
    /// to the empty payload, the only value consistent with the derivation
    /// rule `payload(id) = payload(first) + payload(second)` when the pair
    /// is self-referential.
    pub fn register(&mut self, merge: &Merge) -> Result<()> {
        if merge.id as usize != self.payloads.len() {
            return Err(TokenizerError::InvalidMerge(format!(
                "merge id {} registered out of order (expected {})",
                merge.id,
                self.payloads.len()
            )));
        }

        if merge.is_placeholder() {
            self.payloads.push(Vec::new());
            return Ok(());
        }

        let (first, second) = merge.pair;
        if first >= merge.id || second >= merge.id {
            return Err(TokenizerError::InvalidMerge(format!(
                "merge {} references undefined ids ({}, {})",
                merge.id, first, second
            )));
        }

        let mut payload = self.payloads[first as usize].clone();
        payload.extend_from_slice(&self.payloads[second as usize]);
        self.payloads.push(payload);
        Ok(())
    }

    /// Get the byte payload for a token id.
    #[inline]
    pub fn payload(&self, id: u32) -> Option<&[u8]> {
        self.payloads.get(id as usize).map(|p| p.as_slice())
    }

    /// Lossy UTF-8 rendering of a payload, for human-facing output.
    pub fn payload_lossy(&self, id: u32) -> Option<String> {
        self.payload(id)
            .map(|p| String::from_utf8_lossy(p).into_owned())
    }

    /// Total number of ids in the vocabulary (base bytes + learned merges).
    #[inline]
    pub fn len(&self) -> usize {
        self.payloads.len()
    }

    /// Always false: the base alphabet is present from construction.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.payloads.is_empty()
    }
}

impl Default for Vocabulary {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_alphabet() {
        let vocab = Vocabulary::new();
        assert_eq!(vocab.len(), 256);
        assert_eq!(vocab.payload(0), Some(&[0u8][..]));
        assert_eq!(vocab.payload(b'h' as u32), Some(&b"h"[..]));
        assert_eq!(vocab.payload(255), Some(&[255u8][..]));
        assert_eq!(vocab.payload(256), None);
    }

    #[test]
    fn test_register_concatenates_payloads() {
        let mut vocab = Vocabulary::new();
        vocab.register(&Merge { pair: (104, 101), id: 256 }).unwrap();
        vocab.register(&Merge { pair: (256, 108), id: 257 }).unwrap();

        assert_eq!(vocab.payload(256), Some(&b"he"[..]));
        assert_eq!(vocab.payload(257), Some(&b"hel"[..]));
        assert_eq!(vocab.len(), 258);
    }

    #[test]
    fn test_register_placeholder_is_empty() {
        let mut vocab = Vocabulary::new();
        vocab.register(&Merge::placeholder(256)).unwrap();
        assert_eq!(vocab.payload(256), Some(&[][..]));
    }

    #[test]
    fn test_register_out_of_order() {
        let mut vocab = Vocabulary::new();
        let result = vocab.register(&Merge { pair: (104, 101), id: 300 });
        assert!(matches!(result, Err(TokenizerError::InvalidMerge(_))));
        assert_eq!(vocab.len(), 256);
    }

    #[test]
    fn test_from_merges() {
        let mut merges = MergeList::new();
        merges.push((104, 101));
        merges.push((108, 108));

        let vocab = Vocabulary::from_merges(&merges).unwrap();
        assert_eq!(vocab.len(), 258);
        assert_eq!(vocab.payload(257), Some(&b"ll"[..]));
    }

    #[test]
    fn test_payload_lossy() {
        let mut vocab = Vocabulary::new();
        // 0xFF alone is not valid UTF-8
        vocab.register(&Merge { pair: (255, 255), id: 256 }).unwrap();
        assert_eq!(vocab.payload_lossy(b'a' as u32).unwrap(), "a");
        assert_eq!(vocab.payload_lossy(256).unwrap(), "\u{fffd}\u{fffd}");
    }
}
