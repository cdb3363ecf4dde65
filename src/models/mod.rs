pub mod range;
pub mod station;
pub mod table;

pub use range::ByteRange;
pub use station::StationStats;
pub use table::StationTable;
