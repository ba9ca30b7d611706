use crate::record::{Clip, ClipKind};
use noodles::sam::alignment::record::cigar::op::Kind;
use noodles::sam::alignment::record_buf::Cigar;

/// Leading and trailing clips of a CIGAR
/// Only the outermost operation on each side is considered.
pub fn cigar_clips(cigar: &Cigar) -> (Option<Clip>, Option<Clip>) {
    let ops = cigar.as_ref();
    let as_clip = |kind: Kind, len: usize| match kind {
        Kind::SoftClip => Some(Clip {
            kind: ClipKind::Soft,
            len: len as u64,
        }),
        Kind::HardClip => Some(Clip {
            kind: ClipKind::Hard,
            len: len as u64,
        }),
        _ => None,
    };

    let leading = ops.first().and_then(|op| as_clip(op.kind(), op.len()));
    let trailing = ops.last().and_then(|op| as_clip(op.kind(), op.len()));
    (leading, trailing)
}

fn kind_char(kind: Kind) -> char {
    match kind {
        Kind::Match => 'M',
        Kind::Insertion => 'I',
        Kind::Deletion => 'D',
        Kind::Skip => 'N',
        Kind::SoftClip => 'S',
        Kind::HardClip => 'H',
        Kind::Pad => 'P',
        Kind::SequenceMatch => '=',
        Kind::SequenceMismatch => 'X',
    }
}

/// Render a CIGAR as SAM text (`*` when empty)
pub fn cigar_to_string(cigar: &Cigar) -> String {
    let ops = cigar.as_ref();
    if ops.is_empty() {
        return "*".to_string();
    }
    ops.iter()
        .map(|op| format!("{}{}", op.len(), kind_char(op.kind())))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use noodles::sam::alignment::record::cigar::Op;

    #[test]
    fn test_simple_match() {
        // 100M
        let cigar = Cigar::from(vec![Op::new(Kind::Match, 100)]);
        assert_eq!(cigar_clips(&cigar), (None, None));
        assert_eq!(cigar_to_string(&cigar), "100M");
    }

    #[test]
    fn test_with_clips() {
        // 5S95M10H
        let cigar = Cigar::from(vec![
            Op::new(Kind::SoftClip, 5),
            Op::new(Kind::Match, 95),
            Op::new(Kind::HardClip, 10),
        ]);
        let (leading, trailing) = cigar_clips(&cigar);
        assert_eq!(leading, Some(Clip::soft(5)));
        assert_eq!(trailing, Some(Clip::hard(10)));
        assert_eq!(cigar_to_string(&cigar), "5S95M10H");
    }

    #[test]
    fn test_inner_clip_ignored() {
        // 10H5S85M: only the outermost op counts
        let cigar = Cigar::from(vec![
            Op::new(Kind::HardClip, 10),
            Op::new(Kind::SoftClip, 5),
            Op::new(Kind::Match, 85),
        ]);
        let (leading, trailing) = cigar_clips(&cigar);
        assert_eq!(leading, Some(Clip::hard(10)));
        assert_eq!(trailing, None);
    }

    #[test]
    fn test_with_intron_and_indels() {
        // 50M200N20M2I10D28M
        let cigar = Cigar::from(vec![
            Op::new(Kind::Match, 50),
            Op::new(Kind::Skip, 200),
            Op::new(Kind::Match, 20),
            Op::new(Kind::Insertion, 2),
            Op::new(Kind::Deletion, 10),
            Op::new(Kind::Match, 28),
        ]);
        assert_eq!(cigar_clips(&cigar), (None, None));
        assert_eq!(cigar_to_string(&cigar), "50M200N20M2I10D28M");
    }

    #[test]
    fn test_empty_cigar() {
        let cigar = Cigar::default();
        assert_eq!(cigar_to_string(&cigar), "*");
        assert_eq!(cigar_clips(&cigar), (None, None));
    }
}
