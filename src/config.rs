use crate::contigs::ContigTable;
use crate::fragment::FragmentMap;
use crate::ligation::LigationMotif;
use std::sync::Arc;

/// Per-run inputs shared read-only by every group
#[derive(Debug, Clone)]
pub struct Config {
    /// Usable pairs with an endpoint below this MAPQ are rejected (0 disables)
    pub min_mapq: u8,
    /// Restriction-site map; placeholder fragments 0/1 are written without one
    pub fragment_map: Option<Arc<FragmentMap>>,
    /// Junction motif for ligation statistics
    pub ligation: Option<LigationMotif>,
    pub contigs: Arc<ContigTable>,
}

impl Config {
    pub fn new(
        min_mapq: u8,
        fragment_map: Option<Arc<FragmentMap>>,
        ligation: Option<LigationMotif>,
        contigs: Arc<ContigTable>,
    ) -> Self {
        Self {
            min_mapq,
            fragment_map,
            ligation,
            contigs,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new(0, None, None, Arc::new(ContigTable::new()))
    }
}
