//! Regex-driven text splitting for pre-tokenization.
//!
//! Raw text is split into coarse chunks before any merge is applied. The
//! grammar prioritizes, in order: English contractions, words with an
//! optional leading non-letter, short digit runs, symbol runs with trailing
//! line breaks, line-break runs, trailing whitespace, and any remaining
//! whitespace. The `(?!\S)` lookahead puts the pattern outside what the
//! `regex` crate accepts, hence `fancy-regex`.

use bytepair_core::{Result, TokenizerError};
use fancy_regex::Regex;

/// Splitting grammar applied before byte-level tokenization.
pub const SPLIT_PATTERN: &str = r"(?i:'[sdmt]|'ll|'ve|'re)|[^\r\n\p{L}\p{N}]?\p{L}+|\p{N}{1,3}| ?[^\s\p{L}\p{N}]+[\r\n]*|\s*[\r\n]|\s+(?!\S)|\s+";

/// Text splitter for pre-tokenization.
///
/// Holds the compiled grammar; pure with respect to its input. The chunk
/// iterator is lazy and restartable: each call to [`Splitter::chunks`]
/// starts a fresh scan.
pub struct Splitter {
    pattern: Regex,
}

impl Splitter {
    /// Compile the fixed splitting grammar.
    pub fn new() -> Result<Self> {
        let pattern = Regex::new(SPLIT_PATTERN)
            .map_err(|e| TokenizerError::Regex(e.to_string()))?;
        Ok(Self { pattern })
    }

    /// Iterate the chunks of `text`.
    ///
    /// Matching is greedy, leftmost-first and non-overlapping, and must
    /// consume the entire input: a gap between matches or an unconsumed
    /// tail yields [`TokenizerError::UnmatchedTail`] instead of silently
    /// dropping bytes.
    pub fn chunks<'s, 't>(&'s self, text: &'t str) -> Chunks<'s, 't> {
        Chunks {
            splitter: self,
            text,
            next_start: 0,
            done: false,
        }
    }

    /// Flatten `text` into base token ids (one per UTF-8 byte).
    pub fn byte_tokens(&self, text: &str) -> Result<Vec<u32>> {
        let mut tokens = Vec::with_capacity(text.len());
        for chunk in self.chunks(text) {
            let chunk = chunk?;
            tokens.extend(chunk.bytes().map(u32::from));
        }
        Ok(tokens)
    }
}

/// Lazy iterator over the chunks of one input string.
pub struct Chunks<'s, 't> {
    splitter: &'s Splitter,
    text: &'t str,
    next_start: usize,
    done: bool,
}

impl<'s, 't> Iterator for Chunks<'s, 't> {
    type Item = Result<&'t str>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        if self.next_start >= self.text.len() {
            self.done = true;
            return None;
        }

        let rest = &self.text[self.next_start..];
        match self.splitter.pattern.find(rest) {
            Ok(Some(m)) if m.start() == 0 => {
                let chunk = &rest[..m.end()];
                self.next_start += m.end();
                Some(Ok(chunk))
            }
            // A gap before the first match, or no match at all, means the
            // grammar failed to consume the input at this offset.
            Ok(_) => {
                self.done = true;
                Some(Err(TokenizerError::UnmatchedTail {
                    offset: self.next_start,
                }))
            }
            Err(e) => {
                self.done = true;
                Some(Err(TokenizerError::Regex(e.to_string())))
            }
        }
    }
}
