use crate::error::{ProcessingError, Result};
use crate::models::{ByteRange, StationTable};
use crate::processors::{partition, DataMerger, PartitionAggregator};
use crate::readers::MeasurementFile;
use crate::settings::Settings;
use crate::utils::constants::DEFAULT_TABLE_CAPACITY;
use crate::utils::progress::ProgressReporter;
use rayon::prelude::*;
use std::path::Path;
use std::time::Instant;
use tracing::{debug, info};

/// Fork/join driver: one rayon task per partition, then a single-threaded
/// merge once every partition has finished.
pub struct ParallelProcessor {
    max_workers: usize,
    table_capacity: usize,
}

impl ParallelProcessor {
    pub fn new(max_workers: usize) -> Self {
        Self {
            max_workers: max_workers.max(1),
            table_capacity: DEFAULT_TABLE_CAPACITY,
        }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(settings.max_workers).with_table_capacity(settings.table_capacity)
    }

    pub fn with_table_capacity(mut self, table_capacity: usize) -> Self {
        self.table_capacity = table_capacity;
        self
    }

    pub fn max_workers(&self) -> usize {
        self.max_workers
    }

    /// Map the file at `path`, aggregate it, and release the mapping.
    pub fn process_path(
        &self,
        path: &Path,
        progress: Option<&ProgressReporter>,
    ) -> Result<StationTable> {
        let file = MeasurementFile::open(path)?;
        self.process(&file, progress)
    }

    pub fn process(
        &self,
        file: &MeasurementFile,
        progress: Option<&ProgressReporter>,
    ) -> Result<StationTable> {
        debug!(path = %file.path().display(), bytes = file.len(), "aggregating measurement file");
        self.process_bytes(file.as_bytes(), progress)
    }

    /// Partition `buffer` into one range per worker and aggregate it.
    pub fn process_bytes(
        &self,
        buffer: &[u8],
        progress: Option<&ProgressReporter>,
    ) -> Result<StationTable> {
        let ranges = partition(buffer, self.max_workers);
        debug!(
            requested = self.max_workers,
            produced = ranges.len(),
            "partitioned input"
        );
        self.process_ranges(buffer, &ranges, progress)
    }

    /// Aggregate caller-supplied ranges of `buffer` in parallel and merge the
    /// results. Ranges must be line-aligned and must not overlap.
    pub fn process_ranges(
        &self,
        buffer: &[u8],
        ranges: &[ByteRange],
        progress: Option<&ProgressReporter>,
    ) -> Result<StationTable> {
        let started = Instant::now();
        info!(
            bytes = buffer.len(),
            partitions = ranges.len(),
            workers = self.max_workers,
            "aggregating partitions"
        );

        if let Some(p) = progress {
            p.set_length(ranges.len() as u64);
            p.set_message(&format!("Aggregating {} partitions...", ranges.len()));
        }

        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(self.max_workers)
            .build()
            .map_err(|e| ProcessingError::ThreadPool(e.to_string()))?;

        let aggregator = PartitionAggregator::with_table_capacity(self.table_capacity);

        // Each task owns its table; nothing is shared until the merge below.
        let tables: Vec<StationTable> = pool.install(|| {
            ranges
                .par_iter()
                .map(|range| {
                    let table = aggregator.aggregate(buffer, *range);

                    if let Some(p) = progress {
                        p.increment(1);
                    }

                    table
                })
                .collect::<Result<Vec<_>>>()
        })?;

        debug!(
            elapsed_ms = started.elapsed().as_millis() as u64,
            "all partitions aggregated"
        );

        let merged = DataMerger::new().merge(tables);

        info!(
            stations = merged.len(),
            readings = merged.total_count(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "merged partition tables"
        );

        if let Some(p) = progress {
            p.finish_with_message(&format!("Aggregated {} stations", merged.len()));
        }

        Ok(merged)
    }
}

impl Default for ParallelProcessor {
    fn default() -> Self {
        Self::new(num_cpus::get())
    }
}
