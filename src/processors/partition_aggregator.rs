use crate::error::Result;
use crate::models::{ByteRange, StationTable};
use crate::readers::RecordReader;
use crate::utils::constants::DEFAULT_TABLE_CAPACITY;

/// Folds every record of one partition into a fresh [`StationTable`].
pub struct PartitionAggregator {
    table_capacity: usize,
}

impl PartitionAggregator {
    pub fn new() -> Self {
        Self {
            table_capacity: DEFAULT_TABLE_CAPACITY,
        }
    }

    pub fn with_table_capacity(table_capacity: usize) -> Self {
        Self { table_capacity }
    }

    /// Aggregate `range` of `buffer`. The first malformed record aborts the
    /// partition with a parse error.
    pub fn aggregate(&self, buffer: &[u8], range: ByteRange) -> Result<StationTable> {
        let mut table = StationTable::with_capacity(self.table_capacity);

        for record in RecordReader::for_range(buffer, range) {
            let record = record?;
            table.record(record.station, record.tenths);
        }

        Ok(table)
    }
}

impl Default for PartitionAggregator {
    fn default() -> Self {
        Self::new()
    }
}
