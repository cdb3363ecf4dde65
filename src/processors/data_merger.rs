use crate::models::StationTable;

/// Reduces per-partition tables into one global table.
///
/// Tables are folded in the order given. The per-station merge is
/// commutative and associative, so the order only affects iteration order
/// inside the hash map, never the aggregates.
pub struct DataMerger;

impl DataMerger {
    pub fn new() -> Self {
        Self
    }

    pub fn merge<I>(&self, tables: I) -> StationTable
    where
        I: IntoIterator<Item = StationTable>,
    {
        let mut tables = tables.into_iter();
        let mut merged = tables.next().unwrap_or_default();

        for table in tables {
            merged.merge(table);
        }

        merged
    }
}

impl Default for DataMerger {
    fn default() -> Self {
        Self::new()
    }
}
