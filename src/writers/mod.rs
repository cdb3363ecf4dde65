pub mod rounding;
pub mod summary_writer;

pub use rounding::{round_half_up, round_to_tenth};
pub use summary_writer::{StationSummary, SummaryWriter};
