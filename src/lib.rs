//! Classify name-grouped Hi-C alignments into contact pairs and write
//! merged_nodups records for contact-matrix builders.

pub mod bam;
pub mod cigar;
pub mod classifier;
pub mod config;
pub mod contact_matrix;
pub mod contigs;
pub mod endpoint;
pub mod error;
pub mod fragment;
pub mod grouper;
pub mod ligation;
pub mod output;
pub mod record;
pub mod reducer;
pub mod stats;

pub use classifier::{classify_group, Classification, EndPair};
pub use config::Config;
pub use contigs::ContigTable;
pub use error::{Error, Result};
pub use fragment::FragmentMap;
pub use ligation::LigationMotif;
pub use output::{PairSink, SortedGzipSink};
pub use record::AlignmentRecord;
pub use reducer::StreamReducer;
pub use stats::{RunningStats, StatsSummary};
