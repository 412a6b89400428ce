use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;
use std::str::FromStr;
use thiserror::Error;

const HEADER_PREFIX: char = '#';
const FIELD_DELIMITER: char = '\t';
const LIST_DELIMITER: char = ',';

/// The error raised when the first line of an `.a3m` file cannot be read as a
/// ColabFold complex header.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MsaHeaderError {
    #[error("MSA header line is empty")]
    Empty,
    #[error("Expected at least 2 tab-separated fields in MSA header, found {found}")]
    FieldCount { found: usize },
    #[error("Invalid integer '{value}' in {field}")]
    InvalidInteger { field: &'static str, value: String },
    #[error("Value in {field} must be positive")]
    NonPositive { field: &'static str },
    #[error("MSA header lists {lengths} sequence length(s) but {cardinalities} cardinality value(s)")]
    LengthMismatch { lengths: usize, cardinalities: usize },
    #[error("MSA header describes more residues than can be counted")]
    ResidueCountOverflow,
}

#[derive(Debug, Error)]
pub enum MsaReadError {
    #[error("File I/O error: {0}")]
    Io(#[from] io::Error),
    #[error(transparent)]
    Header(#[from] MsaHeaderError),
}

/// Metadata from the first line of a ColabFold `.a3m` file.
///
/// ColabFold writes `#<lengths>\t<cardinalities>` where both sub-fields are comma-separated
/// lists: one entry per unique sequence, giving its length and how many copies of it the
/// complex contains. A monomer is written as `#<len>\t1`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MsaHeader {
    pub seq_lengths: Vec<usize>,
    pub cardinalities: Vec<usize>,
}

/// Per-chain residue counts and the cumulative residue offset at which each chain ends.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ChainBoundaries {
    pub chain_lengths: Vec<usize>,
    pub chain_ends: Vec<usize>,
}

impl ChainBoundaries {
    pub fn total_residues(&self) -> usize {
        self.chain_ends.last().copied().unwrap_or(0)
    }

    pub fn num_chains(&self) -> usize {
        self.chain_lengths.len()
    }
}

impl FromStr for MsaHeader {
    type Err = MsaHeaderError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim_end_matches(['\r', '\n']);
        let line = line.strip_prefix(HEADER_PREFIX).unwrap_or(line);
        if line.trim().is_empty() {
            return Err(MsaHeaderError::Empty);
        }

        let fields: Vec<&str> = line.split(FIELD_DELIMITER).collect();
        if fields.len() < 2 {
            return Err(MsaHeaderError::FieldCount {
                found: fields.len(),
            });
        }

        let seq_lengths = parse_positive_list(fields[0], "sequence lengths")?;
        let cardinalities = parse_positive_list(fields[1], "sequence cardinalities")?;

        if seq_lengths.len() != cardinalities.len() {
            return Err(MsaHeaderError::LengthMismatch {
                lengths: seq_lengths.len(),
                cardinalities: cardinalities.len(),
            });
        }

        Ok(Self {
            seq_lengths,
            cardinalities,
        })
    }
}

impl MsaHeader {
    /// Reads and parses the first line of the alignment file at `path`.
    pub fn read_from_path(path: &Path) -> Result<Self, MsaReadError> {
        let mut reader = BufReader::new(File::open(path)?);
        let mut line = String::new();
        reader.read_line(&mut line)?;
        Ok(line.parse()?)
    }

    /// Total residue count of the complex, or `None` if it does not fit in a `usize`.
    pub fn total_residues(&self) -> Option<usize> {
        self.seq_lengths
            .iter()
            .zip(&self.cardinalities)
            .try_fold(0usize, |total, (&len, &copies)| {
                total.checked_add(len.checked_mul(copies)?)
            })
    }

    /// Expands every block into `cardinality` chains of the block's length, in block order,
    /// and accumulates the chain ends.
    pub fn chain_boundaries(&self) -> Result<ChainBoundaries, MsaHeaderError> {
        // Every partial sum below is bounded by this total.
        self.total_residues()
            .ok_or(MsaHeaderError::ResidueCountOverflow)?;

        let chain_lengths: Vec<usize> = self
            .seq_lengths
            .iter()
            .zip(&self.cardinalities)
            .flat_map(|(&len, &copies)| std::iter::repeat_n(len, copies))
            .collect();

        let chain_ends = chain_lengths
            .iter()
            .scan(0usize, |end, &len| {
                *end += len;
                Some(*end)
            })
            .collect();

        Ok(ChainBoundaries {
            chain_lengths,
            chain_ends,
        })
    }
}

fn parse_positive_list(field: &str, name: &'static str) -> Result<Vec<usize>, MsaHeaderError> {
    field
        .split(LIST_DELIMITER)
        .map(|token| {
            let token = token.trim();
            let value = token
                .parse::<usize>()
                .map_err(|_| MsaHeaderError::InvalidInteger {
                    field: name,
                    value: token.to_string(),
                })?;
            if value == 0 {
                return Err(MsaHeaderError::NonPositive { field: name });
            }
            Ok(value)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn heteromer_header_expands_cardinalities_into_chains() {
        let header: MsaHeader = "#10,5\t2,1".parse().unwrap();
        assert_eq!(header.seq_lengths, vec![10, 5]);
        assert_eq!(header.cardinalities, vec![2, 1]);

        let bounds = header.chain_boundaries().unwrap();
        assert_eq!(bounds.chain_lengths, vec![10, 10, 5]);
        assert_eq!(bounds.chain_ends, vec![10, 20, 25]);
        assert_eq!(bounds.total_residues(), 25);
        assert_eq!(bounds.num_chains(), 3);
    }

    #[test]
    fn monomer_header_yields_single_chain() {
        let header: MsaHeader = "#120\t1\n".parse().unwrap();
        let bounds = header.chain_boundaries().unwrap();
        assert_eq!(bounds.chain_lengths, vec![120]);
        assert_eq!(bounds.chain_ends, vec![120]);
    }

    #[test]
    fn extra_trailing_fields_are_ignored() {
        let header: MsaHeader = "#30,40\t1,1\tsomething else".parse().unwrap();
        assert_eq!(header.chain_boundaries().unwrap().chain_ends, vec![30, 70]);
    }

    #[test]
    fn chain_ends_are_strictly_increasing_and_sum_to_total() {
        let header: MsaHeader = "#7,3,12\t3,2,1".parse().unwrap();
        let bounds = header.chain_boundaries().unwrap();

        assert_eq!(bounds.chain_lengths.len(), bounds.chain_ends.len());
        assert!(bounds.chain_ends.windows(2).all(|w| w[0] < w[1]));
        assert_eq!(
            bounds.chain_lengths.iter().sum::<usize>(),
            *bounds.chain_ends.last().unwrap()
        );
    }

    #[test]
    fn mismatched_list_lengths_are_rejected() {
        let result = "#10,5\t2".parse::<MsaHeader>();
        assert_eq!(
            result,
            Err(MsaHeaderError::LengthMismatch {
                lengths: 2,
                cardinalities: 1
            })
        );
    }

    #[test]
    fn missing_cardinality_field_is_rejected() {
        let result = "#10,5".parse::<MsaHeader>();
        assert_eq!(result, Err(MsaHeaderError::FieldCount { found: 1 }));
    }

    #[test]
    fn non_numeric_token_is_rejected() {
        let result = "#10,abc\t1,1".parse::<MsaHeader>();
        assert!(matches!(
            result,
            Err(MsaHeaderError::InvalidInteger { value, .. }) if value == "abc"
        ));
    }

    #[test]
    fn zero_cardinality_is_rejected() {
        let result = "#10\t0".parse::<MsaHeader>();
        assert!(matches!(result, Err(MsaHeaderError::NonPositive { .. })));
    }

    #[test]
    fn empty_header_is_rejected() {
        assert_eq!("#\n".parse::<MsaHeader>(), Err(MsaHeaderError::Empty));
        assert_eq!("".parse::<MsaHeader>(), Err(MsaHeaderError::Empty));
    }

    #[test]
    fn read_from_path_only_uses_first_line() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("query.a3m");
        fs::write(&path, "#4,2\t1,2\n>101\nACDE\n>102\nFG\n").unwrap();

        let header = MsaHeader::read_from_path(&path).unwrap();
        assert_eq!(header.chain_boundaries().unwrap().chain_ends, vec![4, 6, 8]);
    }

    #[test]
    fn read_from_path_reports_missing_file_as_io_error() {
        let dir = tempdir().unwrap();
        let result = MsaHeader::read_from_path(&dir.path().join("absent.a3m"));
        assert!(matches!(result, Err(MsaReadError::Io(_))));
    }

    #[test]
    fn read_from_path_reports_bad_header_as_header_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("query.a3m");
        fs::write(&path, "#4,2\t1\n>101\nACDE\n").unwrap();

        let result = MsaHeader::read_from_path(&path);
        assert!(matches!(
            result,
            Err(MsaReadError::Header(MsaHeaderError::LengthMismatch { .. }))
        ));
    }

    #[test]
    fn residue_count_overflow_is_a_header_error() {
        let header: MsaHeader = format!("#{},1\t1,1", usize::MAX).parse().unwrap();
        assert_eq!(header.total_residues(), None);
        assert_eq!(
            header.chain_boundaries(),
            Err(MsaHeaderError::ResidueCountOverflow)
        );
    }

    #[test]
    fn length_times_cardinality_overflow_is_a_header_error() {
        let header: MsaHeader = format!("#{}\t3", usize::MAX / 2).parse().unwrap();
        assert_eq!(
            header.chain_boundaries(),
            Err(MsaHeaderError::ResidueCountOverflow)
        );
    }
}
