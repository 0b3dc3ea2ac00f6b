//! Line format for persisted models.
//!
//! One merge per line, in training order: `<first>-<second> <id>`, e.g.
//! `104-101 256`. The grammar is strict: anything else on a line is a load
//! error, never a skip.

use bytepair_core::{Merge, Result, TokenizerError};

/// Render a merge as its persisted line (without the newline).
pub fn format_merge(merge: &Merge) -> String {
    format!("{}-{} {}", merge.pair.0, merge.pair.1, merge.id)
}

/// Parse one persisted line into a merge.
///
/// `line_no` is 1-based and only used for error reporting.
pub fn parse_merge(line_no: usize, line: &str) -> Result<Merge> {
    let malformed = || TokenizerError::MalformedModelLine {
        line: line_no,
        content: line.to_string(),
    };

    let (pair_part, id_part) = line.split_once(' ').ok_or_else(malformed)?;
    let (first_part, second_part) = pair_part.split_once('-').ok_or_else(malformed)?;

    let first: u32 = first_part.parse().map_err(|_| malformed())?;
    let second: u32 = second_part.parse().map_err(|_| malformed())?;
    let id: u32 = id_part.parse().map_err(|_| malformed())?;

    Ok(Merge {
        pair: (first, second),
        id,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format() {
        let merge = Merge { pair: (104, 101), id: 256 };
        assert_eq!(format_merge(&merge), "104-101 256");
    }

    #[test]
    fn test_parse() {
        let merge = parse_merge(1, "104-101 256").unwrap();
        assert_eq!(merge.pair, (104, 101));
        assert_eq!(merge.id, 256);
    }

    #[test]
    fn test_parse_format_inverse() {
        let merges = [
            Merge { pair: (0, 0), id: 256 },
            Merge { pair: (104, 101), id: 257 },
            Merge::placeholder(258),
        ];
        for merge in merges {
            assert_eq!(parse_merge(1, &format_merge(&merge)).unwrap(), merge);
        }
    }

    #[test]
    fn test_parse_rejects_malformed_lines() {
        let bad = [
            "",
            "104-101",
            "104 101 256",
            "104-101 256 extra",
            "104--101 256",
            "a-101 256",
            "104-b 256",
            "104-101 x",
            "-104-101 256",
            "104-101  256",
        ];
        for line in bad {
            let result = parse_merge(7, line);
            match result {
                Err(TokenizerError::MalformedModelLine { line: n, .. }) => assert_eq!(n, 7),
                other => panic!("expected malformed-line error for {:?}, got {:?}", line, other),
            }
        }
    }
}
