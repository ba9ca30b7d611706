use crate::config::Config;
use crate::endpoint::{Endpoint, Role};
use crate::error::Result;
use crate::record::{AlignmentRecord, DuplicateTag};
use log::debug;
use std::cmp::Ordering;

/// Two endpoints closer than this (same contig) belong to the same locus
pub const SAME_LOCUS_DISTANCE: u64 = 1000;

/// Outcome of classifying one read-name group
#[derive(Debug, Clone)]
pub enum Classification<'a> {
    OpticalDuplicates,
    PcrDuplicates,
    Unmapped,
    NormalPaired(EndPair<'a>),
    ChimericPaired(EndPair<'a>),
    ChimericAmbiguous,
    MappingQualityFailed,
}

impl<'a> Classification<'a> {
    pub fn as_str(&self) -> &'static str {
        match self {
            Classification::OpticalDuplicates => "OpticalDuplicates",
            Classification::PcrDuplicates => "PcrDuplicates",
            Classification::Unmapped => "Unmapped",
            Classification::NormalPaired(_) => "NormalPaired",
            Classification::ChimericPaired(_) => "ChimericPaired",
            Classification::ChimericAmbiguous => "ChimericAmbiguous",
            Classification::MappingQualityFailed => "MappingQualityFailed",
        }
    }

    /// The contact pair, for the two usable outcomes
    pub fn pair(&self) -> Option<&EndPair<'a>> {
        match self {
            Classification::NormalPaired(pair) | Classification::ChimericPaired(pair) => Some(pair),
            _ => None,
        }
    }
}

/// Contact endpoints in canonical (contig rank, position) order
#[derive(Debug, Clone, Copy)]
pub struct EndPair<'a> {
    pub first: Endpoint<'a>,
    pub second: Endpoint<'a>,
}

impl<'a> EndPair<'a> {
    pub fn ordered(a: Endpoint<'a>, b: Endpoint<'a>) -> Self {
        if b.genome_order(&a) == Ordering::Less {
            Self { first: b, second: a }
        } else {
            Self { first: a, second: b }
        }
    }
}

/// How the four ends of a two-sided chimera match up into loci
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FourEndPairing {
    /// 1p with 2p, 1s with 2s
    Parallel,
    /// 1p with 2s, 1s with 2p
    Crossed,
}

/// Slot occupancy, clamped to 0 / 1 / many
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Count {
    Zero,
    One,
    Many,
}

impl Count {
    fn of(len: usize) -> Self {
        match len {
            0 => Count::Zero,
            1 => Count::One,
            _ => Count::Many,
        }
    }
}

/// Endpoints of a group bucketed by role
#[derive(Debug, Default)]
struct RoleTable<'a> {
    r1p: Vec<Endpoint<'a>>,
    r1s: Vec<Endpoint<'a>>,
    r2p: Vec<Endpoint<'a>>,
    r2s: Vec<Endpoint<'a>>,
}

impl<'a> RoleTable<'a> {
    fn push(&mut self, endpoint: Endpoint<'a>) {
        match endpoint.role {
            Role::Read1Primary => self.r1p.push(endpoint),
            Role::Read1Secondary => self.r1s.push(endpoint),
            Role::Read2Primary => self.r2p.push(endpoint),
            Role::Read2Secondary => self.r2s.push(endpoint),
        }
    }

    fn pattern(&self) -> (Count, Count, Count, Count) {
        (
            Count::of(self.r1p.len()),
            Count::of(self.r1s.len()),
            Count::of(self.r2p.len()),
            Count::of(self.r2s.len()),
        )
    }
}

/// Distance with different contigs treated as unbounded
fn distance(a: &Endpoint<'_>, b: &Endpoint<'_>) -> u64 {
    a.distance(b).unwrap_or(u64::MAX)
}

fn same_locus(d: u64) -> bool {
    d < SAME_LOCUS_DISTANCE
}

/// Match the four ends of a two-sided chimera into two loci.
/// `None` when neither arrangement puts both matches within the locus distance.
pub fn four_end_pairing(
    r1p: &Endpoint<'_>,
    r1s: &Endpoint<'_>,
    r2p: &Endpoint<'_>,
    r2s: &Endpoint<'_>,
) -> Option<FourEndPairing> {
    let (pp, ss) = (distance(r1p, r2p), distance(r1s, r2s));
    let (ps, sp) = (distance(r1p, r2s), distance(r1s, r2p));

    let parallel = same_locus(pp) && same_locus(ss);
    let crossed = same_locus(ps) && same_locus(sp);

    match (parallel, crossed) {
        (true, true) if pp + ss <= ps + sp => Some(FourEndPairing::Parallel),
        (true, true) => Some(FourEndPairing::Crossed),
        (true, false) => Some(FourEndPairing::Parallel),
        (false, true) => Some(FourEndPairing::Crossed),
        (false, false) => None,
    }
}

/// Resolve a one-sided chimera: `sole` is the primary of the unsplit read,
/// `primary`/`secondary` are the two ends of the split mate.
///
/// `sole` shares a locus with the closer qualifying end of the mate; the
/// contact partner is the mate's other end.
pub fn three_end_partner<'a>(
    sole: &Endpoint<'a>,
    primary: &Endpoint<'a>,
    secondary: &Endpoint<'a>,
) -> Option<Endpoint<'a>> {
    let to_primary = distance(sole, primary);
    let to_secondary = distance(sole, secondary);

    if same_locus(to_primary) && to_primary <= to_secondary {
        Some(*secondary)
    } else if same_locus(to_secondary) {
        Some(*primary)
    } else {
        None
    }
}

fn duplicate_class(records: &[AlignmentRecord]) -> Option<Classification<'static>> {
    if records.iter().any(|r| r.duplicate == DuplicateTag::Optical) {
        Some(Classification::OpticalDuplicates)
    } else if records.iter().any(|r| r.duplicate == DuplicateTag::Library) {
        Some(Classification::PcrDuplicates)
    } else {
        None
    }
}

/// Classify all alignments sharing one read name.
///
/// Every topology ends in a classification; errors only come from contigs
/// missing in the reference table.
pub fn classify_group<'a>(
    records: &'a [AlignmentRecord],
    config: &Config,
) -> Result<Classification<'a>> {
    if let Some(duplicates) = duplicate_class(records) {
        return Ok(duplicates);
    }

    if records.iter().any(|r| r.is_unmapped || r.contig.is_none()) {
        return Ok(Classification::Unmapped);
    }

    let mut table = RoleTable::default();
    for record in records {
        table.push(Endpoint::extract(record, &config.contigs)?);
    }

    let classification = match table.pattern() {
        (Count::One, Count::One, Count::One, Count::One) => {
            let (r1p, r1s) = (&table.r1p[0], &table.r1s[0]);
            // Under either pairing read 1's two ends lie on different loci
            match four_end_pairing(r1p, r1s, &table.r2p[0], &table.r2s[0]) {
                Some(_) => Classification::ChimericPaired(EndPair::ordered(*r1p, *r1s)),
                None => Classification::ChimericAmbiguous,
            }
        }
        (Count::One, Count::Zero, Count::One, Count::One) => {
            let sole = &table.r1p[0];
            match three_end_partner(sole, &table.r2p[0], &table.r2s[0]) {
                Some(partner) => Classification::ChimericPaired(EndPair::ordered(*sole, partner)),
                None => Classification::ChimericAmbiguous,
            }
        }
        (Count::One, Count::One, Count::One, Count::Zero) => {
            let sole = &table.r2p[0];
            match three_end_partner(sole, &table.r1p[0], &table.r1s[0]) {
                Some(partner) => Classification::ChimericPaired(EndPair::ordered(*sole, partner)),
                None => Classification::ChimericAmbiguous,
            }
        }
        (Count::One, Count::Zero, Count::One, Count::Zero) => {
            Classification::NormalPaired(EndPair::ordered(table.r1p[0], table.r2p[0]))
        }
        (_, Count::Many, _, _) | (_, _, _, Count::Many) => {
            debug!(
                "{}: collision ({} + {} secondary alignments)",
                records[0].name,
                table.r1s.len(),
                table.r2s.len()
            );
            Classification::ChimericAmbiguous
        }
        _ => Classification::ChimericAmbiguous,
    };

    Ok(apply_mapq_filter(classification, config.min_mapq))
}

fn apply_mapq_filter<'a>(classification: Classification<'a>, min_mapq: u8) -> Classification<'a> {
    if min_mapq == 0 {
        return classification;
    }
    match classification.pair() {
        Some(pair) if pair.first.record.mapq < min_mapq || pair.second.record.mapq < min_mapq => {
            debug!(
                "{}: mapping quality {}/{} below {}",
                pair.first.record.name, pair.first.record.mapq, pair.second.record.mapq, min_mapq
            );
            Classification::MappingQualityFailed
        }
        _ => classification,
    }
}
