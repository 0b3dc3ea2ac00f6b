//! Save functionality for trained models.

use super::format::format_merge;
use bytepair_core::{MergeList, Result, TokenizerError};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Model writer - serializes a merge list in the persisted line format.
pub struct ModelWriter<'a> {
    /// Merge list reference
    merges: &'a MergeList,
}

impl<'a> ModelWriter<'a> {
    /// Create a new model writer.
    pub fn new(merges: &'a MergeList) -> Self {
        Self { merges }
    }

    /// Write the model to any byte stream, one merge per line in training
    /// order.
    pub fn write_to(&self, mut writer: impl Write) -> Result<()> {
        for merge in self.merges {
            writeln!(writer, "{}", format_merge(merge))?;
        }
        writer.flush()?;
        Ok(())
    }

    /// Save the model to a file.
    pub fn save(&self, path: &Path) -> Result<()> {
        let file = File::create(path).map_err(|err| TokenizerError::Io {
            path: path.to_path_buf(),
            err,
        })?;
        self.write_to(BufWriter::new(file))
    }
}
