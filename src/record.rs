/// Kind of clipping operation at a read end
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClipKind {
    Soft,
    Hard,
}

/// A clip at the leading or trailing end of an alignment
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Clip {
    pub kind: ClipKind,
    pub len: u64,
}

impl Clip {
    pub fn soft(len: u64) -> Self {
        Self {
            kind: ClipKind::Soft,
            len,
        }
    }

    pub fn hard(len: u64) -> Self {
        Self {
            kind: ClipKind::Hard,
            len,
        }
    }
}

/// Duplicate marking applied upstream (DT aux tag)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DuplicateTag {
    #[default]
    None,
    /// `DT:Z:LB`, library-level (PCR) duplicate
    Library,
    /// `DT:Z:SQ`, optical duplicate
    Optical,
}

impl DuplicateTag {
    /// Decode the `DT` tag of a record flagged as duplicate.
    ///
    /// A missing tag counts as a library duplicate; an unrecognized value
    /// leaves the record unmarked.
    pub fn from_dt(value: Option<&[u8]>) -> Self {
        match value {
            Some(b"SQ") => DuplicateTag::Optical,
            Some(b"LB") | None => DuplicateTag::Library,
            Some(_) => DuplicateTag::None,
        }
    }
}

/// A decoded alignment record, consumed read-only by the classifier.
///
/// Coordinates are 1-based and inclusive: `start` is the leftmost aligned
/// reference base and `end` the rightmost one.
#[derive(Debug, Clone, Default)]
pub struct AlignmentRecord {
    pub name: String,
    pub contig: Option<String>,
    pub start: u64,
    pub end: u64,
    pub is_reverse: bool,
    pub is_read1: bool,
    pub is_secondary: bool,
    pub is_supplementary: bool,
    pub is_unmapped: bool,
    pub mapq: u8,
    pub leading_clip: Option<Clip>,
    pub trailing_clip: Option<Clip>,
    pub cigar: String,
    pub duplicate: DuplicateTag,
    pub sequence: String,
}

impl AlignmentRecord {
    /// Secondary or supplementary alignments both count as non-primary
    pub fn is_primary(&self) -> bool {
        !(self.is_secondary || self.is_supplementary)
    }

    /// SAM flag value for the strand column of merged_nodups
    pub fn strand_flag(&self) -> u16 {
        if self.is_reverse {
            16
        } else {
            0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dt_decoding() {
        assert_eq!(DuplicateTag::from_dt(Some(b"SQ")), DuplicateTag::Optical);
        assert_eq!(DuplicateTag::from_dt(Some(b"LB")), DuplicateTag::Library);
        assert_eq!(DuplicateTag::from_dt(None), DuplicateTag::Library);
        assert_eq!(DuplicateTag::from_dt(Some(b"XX")), DuplicateTag::None);
    }

    #[test]
    fn test_primary_and_strand() {
        let mut record = AlignmentRecord::default();
        assert!(record.is_primary());
        assert_eq!(record.strand_flag(), 0);
        record.is_supplementary = true;
        record.is_reverse = true;
        assert!(!record.is_primary());
        assert_eq!(record.strand_flag(), 16);
    }
}
