use crate::error::Result;
use crate::models::{StationStats, StationTable};
use crate::writers::rounding::round_to_tenth;
use std::io::Write;

/// Rounded min/mean/max for one station, in degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StationSummary {
    pub min: f64,
    pub mean: f64,
    pub max: f64,
}

impl From<&StationStats> for StationSummary {
    fn from(stats: &StationStats) -> Self {
        Self {
            min: round_to_tenth(stats.min as f64 / 10.0),
            mean: round_to_tenth(stats.mean_tenths() / 10.0),
            max: round_to_tenth(stats.max as f64 / 10.0),
        }
    }
}

/// Renders the final `{name=min/mean/max, ...}` line.
pub struct SummaryWriter;

impl SummaryWriter {
    pub fn new() -> Self {
        Self
    }

    /// Write the summary line, followed by a newline. Station names are
    /// copied through as raw bytes.
    pub fn write<W: Write>(&self, table: StationTable, mut out: W) -> Result<()> {
        out.write_all(b"{")?;

        for (i, (station, stats)) in table.into_sorted().into_iter().enumerate() {
            if i > 0 {
                out.write_all(b", ")?;
            }
            let summary = StationSummary::from(&stats);
            out.write_all(&station)?;
            write!(
                out,
                "={:.1}/{:.1}/{:.1}",
                summary.min, summary.mean, summary.max
            )?;
        }

        out.write_all(b"}\n")?;
        out.flush()?;
        Ok(())
    }

    /// The summary line without its trailing newline.
    pub fn render(&self, table: StationTable) -> Result<Vec<u8>> {
        let mut line = Vec::with_capacity(table.len() * 24 + 2);
        self.write(table, &mut line)?;
        line.pop();
        Ok(line)
    }
}

impl Default for SummaryWriter {
    fn default() -> Self {
        Self::new()
    }
}
