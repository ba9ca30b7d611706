//! Classification statistics tracking and reporting
use crate::classifier::Classification;
use log::info;
use serde::Serialize;

/// Running counters, one per classification plus ligation counters
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunningStats {
    pub sequenced_read_pairs: u64,
    pub normal_paired: u64,
    pub chimeric_paired: u64,
    pub chimeric_ambiguous: u64,
    pub mapping_quality_failed: u64,
    pub pcr_duplicates: u64,
    pub optical_duplicates: u64,
    pub unmapped: u64,
    pub ligation_line_count: u64,
    pub ligation_present_count: u64,
}

impl RunningStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one classified group
    pub fn record(&mut self, classification: &Classification<'_>) {
        self.sequenced_read_pairs += 1;
        match classification {
            Classification::NormalPaired(_) => self.normal_paired += 1,
            Classification::ChimericPaired(_) => self.chimeric_paired += 1,
            Classification::ChimericAmbiguous => self.chimeric_ambiguous += 1,
            Classification::MappingQualityFailed => self.mapping_quality_failed += 1,
            Classification::PcrDuplicates => self.pcr_duplicates += 1,
            Classification::OpticalDuplicates => self.optical_duplicates += 1,
            Classification::Unmapped => self.unmapped += 1,
        }
    }

    /// Count one group scanned for ligation junctions
    pub fn record_ligation(&mut self, present: bool) {
        self.ligation_line_count += 1;
        if present {
            self.ligation_present_count += 1;
        }
    }

    pub fn alignable(&self) -> u64 {
        self.chimeric_paired + self.normal_paired
    }

    pub fn duplicates(&self) -> u64 {
        self.pcr_duplicates + self.optical_duplicates
    }

    fn percent(&self, count: u64) -> f64 {
        if self.sequenced_read_pairs == 0 {
            0.0
        } else {
            count as f64 / self.sequenced_read_pairs as f64 * 100.0
        }
    }

    fn counter(&self, count: u64) -> Counter {
        Counter {
            count,
            percent: self.percent(count),
        }
    }

    /// Derive aggregates and percentages of total groups
    pub fn finalize(&self, motif: Option<&str>) -> StatsSummary {
        StatsSummary {
            sequenced_read_pairs: self.sequenced_read_pairs,
            normal_paired: self.counter(self.normal_paired),
            chimeric_paired: self.counter(self.chimeric_paired),
            chimeric_ambiguous: self.counter(self.chimeric_ambiguous),
            mapping_quality_failed: self.counter(self.mapping_quality_failed),
            pcr_duplicates: self.counter(self.pcr_duplicates),
            optical_duplicates: self.counter(self.optical_duplicates),
            unmapped: self.counter(self.unmapped),
            alignable: self.counter(self.alignable()),
            duplicates: self.counter(self.duplicates()),
            ligation: LigationSummary {
                motif: motif.map(str::to_string),
                line_count: self.ligation_line_count,
                present_count: self.ligation_present_count,
                // Denominator is all groups, not the scanned ones
                percent: self.percent(self.ligation_present_count),
            },
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct Counter {
    pub count: u64,
    pub percent: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct LigationSummary {
    pub motif: Option<String>,
    pub line_count: u64,
    pub present_count: u64,
    pub percent: f64,
}

/// Finalized statistics document
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct StatsSummary {
    pub sequenced_read_pairs: u64,
    pub normal_paired: Counter,
    pub chimeric_paired: Counter,
    pub chimeric_ambiguous: Counter,
    pub mapping_quality_failed: Counter,
    pub pcr_duplicates: Counter,
    pub optical_duplicates: Counter,
    pub unmapped: Counter,
    pub alignable: Counter,
    pub duplicates: Counter,
    pub ligation: LigationSummary,
}

impl StatsSummary {
    /// Print summary statistics to log
    pub fn print_summary(&self) {
        if self.sequenced_read_pairs == 0 {
            info!("No read pairs processed");
            return;
        }

        info!("=== Jooser Summary ===");
        info!("Sequenced read pairs: {}", self.sequenced_read_pairs);
        for (label, counter) in [
            ("Normal paired", &self.normal_paired),
            ("Chimeric paired", &self.chimeric_paired),
            ("Chimeric ambiguous", &self.chimeric_ambiguous),
            ("Mapping quality failed", &self.mapping_quality_failed),
            ("PCR duplicates", &self.pcr_duplicates),
            ("Optical duplicates", &self.optical_duplicates),
            ("Unmapped", &self.unmapped),
            ("Alignable", &self.alignable),
            ("Duplicates", &self.duplicates),
        ] {
            info!("{}: {} ({:.2}%)", label, counter.count, counter.percent);
        }
        if let Some(motif) = &self.ligation.motif {
            info!(
                "Ligation junctions ({}): {} of {} ({:.2}%)",
                motif, self.ligation.present_count, self.ligation.line_count, self.ligation.percent
            );
        }
    }
}
