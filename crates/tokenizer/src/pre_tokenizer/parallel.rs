//! Parallel pre-tokenization across independent lines.
//!
//! Lines have no cross-segment data dependency, so each one can be chunked
//! on its own worker. The fan-in is index-ordered: results come back keyed
//! by line position (rayon's indexed collect preserves input order) and the
//! newline separator is re-inserted deterministically, so the output is
//! byte-identical to the sequential path.

use super::split::Splitter;
use bytepair_core::{Result, TokenizerError};
use rayon::prelude::*;

/// Base token id of the line separator re-inserted between segments.
pub const NEWLINE_TOKEN: u32 = b'\n' as u32;

impl Splitter {
    /// Flatten `text` into base token ids, fanning out one task per line.
    ///
    /// Each worker owns its line exclusively; no state is shared beyond the
    /// compiled pattern. Produces exactly the same ids as
    /// [`Splitter::byte_tokens`].
    pub fn byte_tokens_parallel(&self, text: &str) -> Result<Vec<u32>> {
        if text.is_empty() {
            return Ok(Vec::new());
        }

        let lines: Vec<&str> = text.split('\n').collect();
        let last = lines.len() - 1;

        // Byte offset of each line within `text`, so per-line failures
        // report text-relative positions.
        let mut offsets = Vec::with_capacity(lines.len());
        let mut position = 0;
        for line in &lines {
            offsets.push(position);
            position += line.len() + 1;
        }

        let per_line: Vec<Result<Vec<u32>>> = lines
            .par_iter()
            .enumerate()
            .map(|(index, line)| {
                let mut ids = self.byte_tokens(line).map_err(|err| match err {
                    TokenizerError::UnmatchedTail { offset } => TokenizerError::UnmatchedTail {
                        offset: offset + offsets[index],
                    },
                    other => other,
                })?;
                if index != last {
                    ids.push(NEWLINE_TOKEN);
                }
                Ok(ids)
            })
            .collect();

        let mut all = Vec::with_capacity(text.len());
        for ids in per_line {
            all.extend(ids?);
        }
        Ok(all)
    }
}
