use crate::error::{Error, Result};
use indexmap::IndexMap;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// Restriction-site cut positions organized by contig.
///
/// Contigs keep the order in which they appear in the map file. That order
/// defines the genome-wide fragment numbering, so it must not depend on hashing.
#[derive(Debug, Clone, Default)]
pub struct FragmentMap {
    cuts: IndexMap<String, Vec<u64>>,
    // Total cut count of every contig before the one at the same index
    offsets: Vec<u64>,
}

impl FragmentMap {
    /// Load a restriction-site map: one line per contig,
    /// `<contig> <cut1> <cut2> ... <cutN>` with ascending cuts.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| Error::io(e, path))?;
        Self::from_reader(BufReader::new(file)).map_err(|e| match e {
            Error::Io { source, .. } => Error::io(source, path),
            other => other,
        })
    }

    pub fn from_reader<R: BufRead>(reader: R) -> Result<Self> {
        let mut cuts = IndexMap::new();

        for (line_no, line) in reader.lines().enumerate() {
            let line = line?;
            let mut fields = line.split_whitespace();
            let Some(contig) = fields.next() else {
                continue;
            };

            let positions = fields
                .map(|field| {
                    field.parse::<u64>().map_err(|_| {
                        Error::FragmentMap(format!(
                            "line {}: invalid cut position '{}' for {}",
                            line_no + 1,
                            field,
                            contig
                        ))
                    })
                })
                .collect::<Result<Vec<u64>>>()?;

            if positions.windows(2).any(|w| w[0] >= w[1]) {
                return Err(Error::FragmentMap(format!(
                    "line {}: cut positions of {} are not strictly increasing",
                    line_no + 1,
                    contig
                )));
            }

            cuts.insert(contig.to_string(), positions);
        }

        Ok(Self::from_cuts(cuts))
    }

    pub fn from_cuts(cuts: IndexMap<String, Vec<u64>>) -> Self {
        let offsets = cuts
            .values()
            .scan(0u64, |total, positions| {
                let offset = *total;
                *total += positions.len() as u64;
                Some(offset)
            })
            .collect();
        Self { cuts, offsets }
    }

    pub fn contig_count(&self) -> usize {
        self.cuts.len()
    }

    pub fn cut_count(&self) -> u64 {
        self.cuts.values().map(|c| c.len() as u64).sum()
    }

    /// Genome-wide fragment number of `position` on `contig`.
    ///
    /// Rank of `position` among the contig's cuts (bisect-right), plus one,
    /// plus the cut count of every contig loaded before it.
    pub fn fragment_number(&self, contig: &str, position: u64) -> Result<u64> {
        let (index, _, positions) = self.cuts.get_full(contig).ok_or_else(|| {
            Error::MissingContig {
                contig: contig.to_string(),
            }
        })?;

        let last_cut = positions.last().copied().unwrap_or(0);
        if position > last_cut {
            return Err(Error::PositionOutOfContig {
                contig: contig.to_string(),
                position,
                last_cut,
            });
        }

        let rank = positions.partition_point(|&cut| cut <= position) as u64;
        Ok(rank + 1 + self.offsets[index])
    }
}
