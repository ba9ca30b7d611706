use crate::contigs::ContigTable;
use crate::error::{Error, Result};
use crate::record::AlignmentRecord;
use std::cmp::Ordering;

/// Read number x primary/secondary role of an alignment within its group
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    Read1Primary,
    Read1Secondary,
    Read2Primary,
    Read2Secondary,
}

impl Role {
    pub fn of(record: &AlignmentRecord) -> Self {
        match (record.is_read1, record.is_primary()) {
            (true, true) => Role::Read1Primary,
            (true, false) => Role::Read1Secondary,
            (false, true) => Role::Read2Primary,
            (false, false) => Role::Read2Secondary,
        }
    }
}

/// The ligation-side coordinate of one alignment
#[derive(Debug, Clone, Copy)]
pub struct Endpoint<'a> {
    pub role: Role,
    pub contig: &'a str,
    pub rank: usize,
    pub position: u64,
    pub record: &'a AlignmentRecord,
}

impl<'a> Endpoint<'a> {
    /// Compute the endpoint of a mapped record.
    pub fn extract(record: &'a AlignmentRecord, contigs: &ContigTable) -> Result<Self> {
        let contig = record.contig.as_deref().ok_or_else(|| {
            Error::Record(format!("{}: mapped alignment without a contig", record.name))
        })?;
        let contig_length = contigs.length(contig)?;

        Ok(Self {
            role: Role::of(record),
            contig,
            rank: contigs.rank(contig)?,
            position: clipped_position(record, contig_length),
            record,
        })
    }

    /// Same-contig absolute distance, `None` across contigs.
    pub fn distance(&self, other: &Endpoint<'_>) -> Option<u64> {
        (self.contig == other.contig).then(|| self.position.abs_diff(other.position))
    }

    /// Order by (contig rank, position).
    pub fn genome_order(&self, other: &Endpoint<'_>) -> Ordering {
        (self.rank, self.position).cmp(&(other.rank, other.position))
    }
}

/// 5' coordinate for forward reads, 3' coordinate for reverse reads,
/// extended over soft/hard clips and kept within `[1, contig_length]`.
pub fn clipped_position(record: &AlignmentRecord, contig_length: u64) -> u64 {
    if record.is_reverse {
        match record.trailing_clip {
            Some(clip) => (record.end + clip.len).min(contig_length),
            None => record.end,
        }
    } else {
        match record.leading_clip {
            Some(clip) => record.start.saturating_sub(clip.len).max(1),
            None => record.start,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::Clip;

    fn contigs() -> ContigTable {
        [("chr1", 10_000u64), ("chr2", 5_000)].into_iter().collect()
    }

    fn record(contig: &str, start: u64, end: u64, is_reverse: bool) -> AlignmentRecord {
        AlignmentRecord {
            name: "read".to_string(),
            contig: Some(contig.to_string()),
            start,
            end,
            is_reverse,
            is_read1: true,
            ..Default::default()
        }
    }

    #[test]
    fn test_forward_unclipped_uses_start() {
        let r = record("chr1", 1000, 1099, false);
        assert_eq!(clipped_position(&r, 10_000), 1000);
    }

    #[test]
    fn test_reverse_unclipped_uses_end() {
        let r = record("chr1", 1000, 1099, true);
        assert_eq!(clipped_position(&r, 10_000), 1099);
    }

    #[test]
    fn test_forward_leading_clip_extends_left() {
        let mut r = record("chr1", 1000, 1099, false);
        r.leading_clip = Some(Clip::soft(20));
        assert_eq!(clipped_position(&r, 10_000), 980);
        // trailing clip is irrelevant on the forward strand
        r.trailing_clip = Some(Clip::hard(30));
        assert_eq!(clipped_position(&r, 10_000), 980);
    }

    #[test]
    fn test_forward_clip_clamped_to_one() {
        let mut r = record("chr1", 5, 100, false);
        r.leading_clip = Some(Clip::hard(40));
        assert_eq!(clipped_position(&r, 10_000), 1);
    }

    #[test]
    fn test_reverse_trailing_clip_extends_right_and_clamps() {
        let mut r = record("chr2", 4900, 4990, true);
        r.trailing_clip = Some(Clip::soft(5));
        assert_eq!(clipped_position(&r, 5_000), 4995);
        r.trailing_clip = Some(Clip::soft(50));
        assert_eq!(clipped_position(&r, 5_000), 5_000);
    }

    #[test]
    fn test_extract_role_rank_and_distance() {
        let table = contigs();
        let mut a = record("chr2", 100, 199, false);
        a.is_supplementary = true;
        let b = record("chr2", 700, 799, true);
        let c = record("chr1", 100, 199, false);

        let ea = Endpoint::extract(&a, &table).unwrap();
        let eb = Endpoint::extract(&b, &table).unwrap();
        let ec = Endpoint::extract(&c, &table).unwrap();

        assert_eq!(ea.role, Role::Read1Secondary);
        assert_eq!(eb.role, Role::Read1Primary);
        assert_eq!(ea.rank, 1);
        assert_eq!(ea.distance(&eb), Some(699));
        assert_eq!(ea.distance(&ec), None);
        assert_eq!(ec.genome_order(&ea), Ordering::Less);
    }

    #[test]
    fn test_extract_unknown_contig_fails() {
        let table = contigs();
        let r = record("chrUn", 1, 10, false);
        assert!(matches!(
            Endpoint::extract(&r, &table),
            Err(Error::MissingContig { .. })
        ));
    }
}
