use crate::classifier::classify_group;
use crate::config::Config;
use crate::error::Result;
use crate::grouper::ReadGrouper;
use crate::output::{merged_nodups_line, PairSink};
use crate::record::AlignmentRecord;
use crate::stats::RunningStats;
use log::{debug, info};

const PROGRESS_INTERVAL: u64 = 1_000_000;

/// Single-pass reducer: one classification per read-name group, one
/// merged_nodups line per usable pair.
pub struct StreamReducer<'c, S: PairSink> {
    config: &'c Config,
    sink: S,
    stats: RunningStats,
}

impl<'c, S: PairSink> StreamReducer<'c, S> {
    pub fn new(config: &'c Config, sink: S) -> Self {
        Self {
            config,
            sink,
            stats: RunningStats::new(),
        }
    }

    /// Classify one finalized group, count it and emit its line if usable.
    pub fn process_group(&mut self, group: &[AlignmentRecord]) -> Result<()> {
        if let Some(motif) = &self.config.ligation {
            let present = group
                .iter()
                .filter(|r| r.is_primary())
                .any(|r| motif.is_present(&r.sequence));
            self.stats.record_ligation(present);
        }

        let classification = classify_group(group, self.config)?;
        if let Some(first) = group.first() {
            debug!("{}: {}", first.name, classification.as_str());
        }
        self.stats.record(&classification);

        if let Some(pair) = classification.pair() {
            let fragments = self.config.fragment_map.as_deref();
            self.sink.write_line(&merged_nodups_line(pair, fragments)?)?;
        }

        if self.stats.sequenced_read_pairs % PROGRESS_INTERVAL == 0 {
            info!("Processed {} read groups", self.stats.sequenced_read_pairs);
        }
        Ok(())
    }

    /// Consume a name-contiguous record stream.
    pub fn process<I>(&mut self, records: I) -> Result<()>
    where
        I: Iterator<Item = Result<AlignmentRecord>>,
    {
        for group in ReadGrouper::new(records) {
            self.process_group(&group?)?;
        }
        Ok(())
    }

    /// Close the sink and wait for it before handing out the counters.
    pub fn finish(mut self) -> Result<(RunningStats, S)> {
        self.sink.finish()?;
        Ok((self.stats, self.sink))
    }
}
