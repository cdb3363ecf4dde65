use brc_processor::error::{ProcessingError, RecordError};
use brc_processor::models::{ByteRange, StationTable};
use brc_processor::processors::{partition, DataMerger, ParallelProcessor, PartitionAggregator};
use brc_processor::readers::MeasurementFile;
use brc_processor::writers::SummaryWriter;
use pretty_assertions::assert_eq;
use std::io::Write;
use std::path::Path;
use std::process::Command;
use tempfile::NamedTempFile;

const SCENARIO: &str = "A;5.0\nB;10.0\nA;-2.0\n";
const SCENARIO_SUMMARY: &str = "{A=-2.0/1.5/5.0, B=10.0/10.0/10.0}";

fn measurements_file(contents: &[u8]) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("Failed to create temp file");
    file.write_all(contents).unwrap();
    file.flush().unwrap();
    file
}

fn summary_of(table: StationTable) -> String {
    String::from_utf8(SummaryWriter::new().render(table).unwrap()).unwrap()
}

fn summarize_path(path: &Path, workers: usize) -> String {
    let table = ParallelProcessor::new(workers).process_path(path, None).unwrap();
    summary_of(table)
}

/// Deterministic pseudo-random measurements with a few hundred stations.
fn generated_measurements(lines: usize) -> Vec<u8> {
    let mut state: u64 = 0x2545_f491_4f6c_dd1d;
    let mut buffer = Vec::with_capacity(lines * 16);

    for _ in 0..lines {
        state ^= state << 13;
        state ^= state >> 7;
        state ^= state << 17;

        let station = state % 313;
        let tenths = (state >> 16) as i64 % 1999 - 999;
        let line = format!(
            "Station {:03};{}{}.{}\n",
            station,
            if tenths < 0 { "-" } else { "" },
            tenths.abs() / 10,
            tenths.abs() % 10
        );
        buffer.extend_from_slice(line.as_bytes());
    }

    buffer
}

#[test]
fn test_scenario_single_partition() {
    let file = measurements_file(SCENARIO.as_bytes());

    assert_eq!(summarize_path(file.path(), 1), SCENARIO_SUMMARY);
}

#[test]
fn test_scenario_one_partition_per_line() {
    let temp_file = measurements_file(SCENARIO.as_bytes());
    let file = MeasurementFile::open(temp_file.path()).unwrap();
    let ranges = [
        ByteRange::new(0, 6),
        ByteRange::new(6, 13),
        ByteRange::new(13, 20),
    ];

    let table = ParallelProcessor::new(3)
        .process_ranges(&file, &ranges, None)
        .unwrap();

    assert_eq!(summary_of(table), SCENARIO_SUMMARY);
}

#[test]
fn test_missing_final_terminator() {
    let file = measurements_file(b"A;5.0\nB;10.0\nA;-2.0");

    for workers in 1..=4 {
        assert_eq!(summarize_path(file.path(), workers), SCENARIO_SUMMARY);
    }
}

#[test]
fn test_empty_file() {
    let file = measurements_file(b"");

    assert_eq!(summarize_path(file.path(), 8), "{}");
}

#[test]
fn test_partition_count_does_not_change_output() {
    let data = generated_measurements(20_000);
    let file = measurements_file(&data);

    let expected = summarize_path(file.path(), 1);
    for workers in [2, 3, 5, 8, 13, 32] {
        assert_eq!(summarize_path(file.path(), workers), expected, "workers = {workers}");
    }
}

#[test]
fn test_merge_order_does_not_change_output() {
    let data = generated_measurements(5_000);
    let ranges = partition(&data, 6);
    let aggregator = PartitionAggregator::new();

    let tables = || -> Vec<StationTable> {
        ranges
            .iter()
            .map(|range| aggregator.aggregate(&data, *range).unwrap())
            .collect()
    };

    let merger = DataMerger::new();
    let forward = merger.merge(tables());
    let backward = merger.merge(tables().into_iter().rev());
    let pairwise = tables()
        .into_iter()
        .reduce(|acc, next| merger.merge([next, acc]))
        .unwrap();

    assert_eq!(forward, backward);
    assert_eq!(forward, pairwise);
    assert_eq!(forward.total_count(), 5_000);
}

#[test]
fn test_aggregates_match_naive_computation() {
    let data = generated_measurements(3_000);
    let table = ParallelProcessor::new(4).process_bytes(&data, None).unwrap();

    let text = std::str::from_utf8(&data).unwrap();
    let mut naive: std::collections::BTreeMap<&str, (i64, i64, i64, u64)> = Default::default();
    for line in text.lines() {
        let (station, temperature) = line.split_once(';').unwrap();
        let tenths = (temperature.parse::<f64>().unwrap() * 10.0).round() as i64;
        let entry = naive.entry(station).or_insert((i64::MAX, i64::MIN, 0, 0));
        entry.0 = entry.0.min(tenths);
        entry.1 = entry.1.max(tenths);
        entry.2 += tenths;
        entry.3 += 1;
    }

    assert_eq!(table.len(), naive.len());
    for (station, (min, max, sum, count)) in naive {
        let stats = table.get(station.as_bytes()).unwrap();
        assert_eq!(
            (stats.min as i64, stats.max as i64, stats.sum, stats.count),
            (min, max, sum, count),
            "{station}"
        );
    }
}

#[test]
fn test_rerun_is_byte_identical() {
    let file = measurements_file(&generated_measurements(4_000));

    let first = summarize_path(file.path(), 4);
    let second = summarize_path(file.path(), 4);

    assert_eq!(first, second);
}

#[test]
fn test_malformed_record_aborts_run() {
    let file = measurements_file(b"A;5.0\nB;10.0\nC;1.00\nA;-2.0\n");

    let result = ParallelProcessor::new(2).process_path(file.path(), None);

    match result {
        Err(ProcessingError::Parse { offset, source }) => {
            assert_eq!(offset, 13);
            assert_eq!(source, RecordError::MissingTerminator);
        }
        other => panic!("expected parse error, got {other:?}"),
    }
}

#[test]
fn test_binary_prints_summary() {
    let file = measurements_file(SCENARIO.as_bytes());

    let output = Command::new(env!("CARGO_BIN_EXE_brc-processor"))
        .arg(file.path())
        .env_remove("RUST_LOG")
        .output()
        .expect("Failed to run brc-processor");

    assert!(output.status.success());
    assert_eq!(
        String::from_utf8(output.stdout).unwrap(),
        format!("{SCENARIO_SUMMARY}\n")
    );
}

#[test]
fn test_binary_fails_on_missing_file() {
    let dir = tempfile::tempdir().unwrap();

    let output = Command::new(env!("CARGO_BIN_EXE_brc-processor"))
        .arg(dir.path().join("measurements.txt"))
        .output()
        .expect("Failed to run brc-processor");

    assert!(!output.status.success());
    assert!(output.stdout.is_empty());
}
