use crate::error::{Error, Result};
use regex::Regex;
use std::collections::BTreeSet;

/// Ligation-junction motifs of the supported restriction enzymes
const LIGATION_MOTIFS: &[(&str, &str)] = &[
    ("HindIII", "AAGCTAGCTT"),
    ("DpnII", "GATCGATC"),
    ("MboI", "GATCGATC"),
    ("Sau3AI", "GATCGATC"),
    ("NcoI", "CCATGCATGG"),
    ("NlaIII", "CATGCATG"),
    (
        "Arima",
        "(GAATAATC|GAATACTC|GAATAGTC|GAATATTC|GAATGATC|GACTAATC|GACTACTC|GACTAGTC|GACTATTC|GACTGATC|GAGTAATC|GAGTACTC|GAGTAGTC|GAGTATTC|GAGTGATC|GATCAATC|GATCACTC|GATCAGTC|GATCATTC|GATCGATC|GATTAATC|GATTACTC|GATTAGTC|GATTATTC|GATTGATC)",
    ),
];

/// A compiled ligation-junction pattern
#[derive(Debug, Clone)]
pub struct LigationMotif {
    /// Enzyme name, or the pattern itself when given explicitly
    pub label: String,
    regex: Regex,
}

impl LigationMotif {
    /// Look up the junction motif of a known enzyme
    pub fn for_enzyme(enzyme: &str) -> Result<Self> {
        let (name, pattern) = LIGATION_MOTIFS
            .iter()
            .find(|(name, _)| *name == enzyme)
            .ok_or_else(|| {
                let known: Vec<&str> = LIGATION_MOTIFS.iter().map(|(n, _)| *n).collect();
                Error::Parameter(format!(
                    "unknown restriction enzyme '{}' (known: {})",
                    enzyme,
                    known.join(", ")
                ))
            })?;
        Ok(Self {
            label: name.to_string(),
            regex: compile(pattern)?,
        })
    }

    pub fn from_pattern(pattern: &str) -> Result<Self> {
        Ok(Self {
            label: pattern.to_string(),
            regex: compile(pattern)?,
        })
    }

    /// Offsets (from sequence start) where a junction is found on both strands.
    ///
    /// Every match is reported by its 3' end in forward-strand coordinates; a
    /// reverse-complement match at `[s, e)` ends at `len - s` on the forward
    /// strand. Only offsets seen on both strands are kept.
    pub fn detect(&self, sequence: &str) -> BTreeSet<usize> {
        let length = sequence.len();
        let reverse = reverse_complement(sequence);

        let forward_ends: BTreeSet<usize> =
            self.regex.find_iter(sequence).map(|m| m.end()).collect();
        let reverse_ends: BTreeSet<usize> = self
            .regex
            .find_iter(&reverse)
            .map(|m| length - m.start())
            .collect();

        forward_ends.intersection(&reverse_ends).copied().collect()
    }

    pub fn is_present(&self, sequence: &str) -> bool {
        !self.detect(sequence).is_empty()
    }
}

fn compile(pattern: &str) -> Result<Regex> {
    Regex::new(pattern)
        .map_err(|e| Error::Parameter(format!("invalid ligation motif '{}': {}", pattern, e)))
}

/// Reverse complement of an IUPAC nucleotide string; unknown symbols map to N.
pub fn reverse_complement(sequence: &str) -> String {
    sequence
        .bytes()
        .rev()
        .map(|base| match base {
            b'A' => 'T',
            b'C' => 'G',
            b'G' => 'C',
            b'T' => 'A',
            b'a' => 't',
            b'c' => 'g',
            b'g' => 'c',
            b't' => 'a',
            b'R' => 'Y',
            b'Y' => 'R',
            b'K' => 'M',
            b'M' => 'K',
            b'B' => 'V',
            b'V' => 'B',
            b'D' => 'H',
            b'H' => 'D',
            b'S' => 'S',
            b'W' => 'W',
            _ => 'N',
        })
        .collect()
}
