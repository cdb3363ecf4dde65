/// Running aggregate for one station, in tenths of a degree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StationStats {
    pub min: i16,
    pub max: i16,
    pub sum: i64,
    pub count: u64,
}

impl StationStats {
    pub fn new(tenths: i16) -> Self {
        Self {
            min: tenths,
            max: tenths,
            sum: tenths as i64,
            count: 1,
        }
    }

    #[inline]
    pub fn record(&mut self, tenths: i16) {
        self.min = self.min.min(tenths);
        self.max = self.max.max(tenths);
        self.sum += tenths as i64;
        self.count += 1;
    }

    /// Fold another partition's aggregate for the same station into this one.
    pub fn merge(&mut self, other: &StationStats) {
        self.min = self.min.min(other.min);
        self.max = self.max.max(other.max);
        self.sum += other.sum;
        self.count += other.count;
    }

    /// Exact quotient `sum / count`, still in tenths.
    pub fn mean_tenths(&self) -> f64 {
        self.sum as f64 / self.count as f64
    }
}
