pub mod measurement_file;
pub mod temperature_reader;

pub use measurement_file::MeasurementFile;
pub use temperature_reader::{parse_temperature, Record, RecordReader};
