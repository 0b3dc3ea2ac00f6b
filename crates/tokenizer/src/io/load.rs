//! Load functionality for persisted models.
//!
//! Loading is all-or-nothing: every line is parsed and the model invariants
//! are validated before anything is handed back, so a failed load can never
//! leave a partially populated model behind.

use super::format::parse_merge;
use bytepair_core::{Merge, MergeList, Result, TokenizerError};
use log::debug;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// Model reader - deserializes a merge list from the persisted line format.
pub struct ModelReader;

impl ModelReader {
    /// Read a model from any byte stream.
    ///
    /// Lines are replayed in file order; each must parse as
    /// `<first>-<second> <id>` and respect the model invariants (ids
    /// contiguous from 256, pairs referencing already-defined ids or a
    /// self-referential placeholder).
    pub fn read_from(reader: impl BufRead) -> Result<MergeList> {
        let mut merges: Vec<Merge> = Vec::new();
        for (index, line) in reader.lines().enumerate() {
            let line = line?;
            merges.push(parse_merge(index + 1, &line)?);
        }

        let merges = MergeList::from_merges(merges)?;
        debug!("loaded model with {} merges", merges.len());
        Ok(merges)
    }

    /// Load a model from a file.
    pub fn load(path: &Path) -> Result<MergeList> {
        let file = File::open(path).map_err(|err| TokenizerError::Io {
            path: path.to_path_buf(),
            err,
        })?;
        Self::read_from(BufReader::new(file))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::save::ModelWriter;

    #[test]
    fn test_read_replays_lines_in_order() {
        let merges = ModelReader::read_from("104-101 256\n256-108 257\n".as_bytes()).unwrap();
        assert_eq!(merges.len(), 2);
        assert_eq!(merges.as_slice()[0].pair, (104, 101));
        assert_eq!(merges.as_slice()[1].pair, (256, 108));
    }

    #[test]
    fn test_read_empty_stream_is_empty_model() {
        let merges = ModelReader::read_from("".as_bytes()).unwrap();
        assert!(merges.is_empty());
    }

    #[test]
    fn test_read_accepts_placeholders() {
        let merges = ModelReader::read_from("0-1 256\n257-257 257\n".as_bytes()).unwrap();
        assert!(merges.as_slice()[1].is_placeholder());
    }

    #[test]
    fn test_read_rejects_malformed_line() {
        let result = ModelReader::read_from("104-101 256\nnot a merge\n".as_bytes());
        match result {
            Err(TokenizerError::MalformedModelLine { line, content }) => {
                assert_eq!(line, 2);
                assert_eq!(content, "not a merge");
            }
            other => panic!("expected malformed-line error, got {:?}", other.map(|_| ())),
        }
    }

    #[test]
    fn test_read_rejects_non_contiguous_ids() {
        let result = ModelReader::read_from("104-101 257\n".as_bytes());
        assert!(matches!(result, Err(TokenizerError::InvalidMerge(_))));

        let result = ModelReader::read_from("104-101 256\n0-1 300\n".as_bytes());
        assert!(matches!(result, Err(TokenizerError::InvalidMerge(_))));
    }

    #[test]
    fn test_read_rejects_forward_references() {
        let result = ModelReader::read_from("400-5 256\n".as_bytes());
        assert!(matches!(result, Err(TokenizerError::InvalidMerge(_))));
    }

    #[test]
    fn test_write_read_roundtrip() {
        let mut original = MergeList::new();
        original.push((104, 101));
        original.push((108, 108));
        original.push((256, 257));
        original.push_placeholder();

        let mut buffer = Vec::new();
        ModelWriter::new(&original).write_to(&mut buffer).unwrap();
        let loaded = ModelReader::read_from(buffer.as_slice()).unwrap();

        assert_eq!(loaded, original);
    }
}
