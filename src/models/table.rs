use crate::models::StationStats;
use rustc_hash::FxHashMap;
use std::hash::BuildHasherDefault;

/// Per-station aggregates keyed by the raw station-name bytes.
///
/// Names are opaque keys: no trimming, case folding or UTF-8 validation is
/// applied, and ordering in [`StationTable::into_sorted`] is byte-wise.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StationTable {
    stations: FxHashMap<Box<[u8]>, StationStats>,
}

impl StationTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            stations: FxHashMap::with_capacity_and_hasher(capacity, BuildHasherDefault::default()),
        }
    }

    /// Fold one reading. The name is copied only the first time it is seen.
    #[inline]
    pub fn record(&mut self, station: &[u8], tenths: i16) {
        match self.stations.get_mut(station) {
            Some(stats) => stats.record(tenths),
            None => {
                self.stations.insert(station.into(), StationStats::new(tenths));
            }
        }
    }

    /// Fold a whole table into this one, consuming it.
    pub fn merge(&mut self, other: StationTable) {
        for (station, stats) in other.stations {
            self.merge_stats(station, &stats);
        }
    }

    fn merge_stats(&mut self, station: Box<[u8]>, stats: &StationStats) {
        self.stations
            .entry(station)
            .and_modify(|existing| existing.merge(stats))
            .or_insert(*stats);
    }

    pub fn get(&self, station: &[u8]) -> Option<&StationStats> {
        self.stations.get(station)
    }

    pub fn len(&self) -> usize {
        self.stations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stations.is_empty()
    }

    /// Number of readings folded into the table across all stations.
    pub fn total_count(&self) -> u64 {
        self.stations.values().map(|s| s.count).sum()
    }

    /// Consume the table, returning entries in ascending byte order of name.
    pub fn into_sorted(self) -> Vec<(Box<[u8]>, StationStats)> {
        let mut entries: Vec<_> = self.stations.into_iter().collect();
        entries.sort_unstable_by(|a, b| a.0.cmp(&b.0));
        entries
    }
}
