use crate::error::{Error, Result};
use indexmap::IndexMap;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Contig name -> length, in reference header order.
///
/// The insertion index doubles as the genome-wide contig rank used to put
/// pair endpoints into canonical order.
#[derive(Debug, Clone, Default)]
pub struct ContigTable {
    lengths: IndexMap<String, u64>,
}

impl ContigTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the table from a SAM/BAM header.
    pub fn from_header(header: &noodles::sam::Header) -> Self {
        let lengths = header
            .reference_sequences()
            .iter()
            .map(|(name, reference_sequence)| {
                (name.to_string(), reference_sequence.length().get() as u64)
            })
            .collect();
        Self { lengths }
    }

    pub fn length(&self, name: &str) -> Result<u64> {
        self.lengths
            .get(name)
            .copied()
            .ok_or_else(|| Error::MissingContig {
                contig: name.to_string(),
            })
    }

    pub fn rank(&self, name: &str) -> Result<usize> {
        self.lengths
            .get_index_of(name)
            .ok_or_else(|| Error::MissingContig {
                contig: name.to_string(),
            })
    }

    pub fn len(&self) -> usize {
        self.lengths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lengths.is_empty()
    }

    /// Write a two-column chrom.sizes file, as contact-matrix builders expect.
    pub fn write_chrom_sizes<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let file = File::create(path).map_err(|e| Error::io(e, path))?;
        let mut writer = BufWriter::new(file);
        for (name, length) in &self.lengths {
            writeln!(writer, "{}\t{}", name, length).map_err(|e| Error::io(e, path))?;
        }
        writer.flush().map_err(|e| Error::io(e, path))?;
        Ok(())
    }
}

impl<S: Into<String>> FromIterator<(S, u64)> for ContigTable {
    fn from_iter<I: IntoIterator<Item = (S, u64)>>(iter: I) -> Self {
        Self {
            lengths: iter.into_iter().map(|(n, l)| (n.into(), l)).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rank_follows_insertion_order() {
        let table: ContigTable = [("chr2", 500u64), ("chr1", 1000), ("chrX", 300)]
            .into_iter()
            .collect();
        assert_eq!(table.rank("chr2").unwrap(), 0);
        assert_eq!(table.rank("chr1").unwrap(), 1);
        assert_eq!(table.rank("chrX").unwrap(), 2);
        assert_eq!(table.length("chr1").unwrap(), 1000);
    }

    #[test]
    fn test_missing_contig_is_an_error() {
        let table: ContigTable = [("chr1", 1000u64)].into_iter().collect();
        assert!(matches!(
            table.length("chrM"),
            Err(Error::MissingContig { .. })
        ));
        assert!(table.rank("chrM").is_err());
    }

    #[test]
    fn test_write_chrom_sizes() {
        let table: ContigTable = [("chr1", 1000u64), ("chr2", 20)].into_iter().collect();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("genome.chrom.sizes");
        table.write_chrom_sizes(&path).unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        assert_eq!(text, "chr1\t1000\nchr2\t20\n");
    }
}
