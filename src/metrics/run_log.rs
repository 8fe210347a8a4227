use super::SuccessRatio;

/// Append-only record of success ratios, one entry per executed trial.
#[derive(Debug, Clone, Default)]
pub struct RunLog {
    entries: Vec<SuccessRatio>,
}

impl RunLog {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    pub fn push(&mut self, ratio: SuccessRatio) {
        self.entries.push(ratio);
    }

    /// Ratios as fractions in `[0, 1]`, in execution order.
    #[must_use]
    pub fn snapshot(&self) -> Vec<f64> {
        self.entries.iter().map(|ratio| ratio.as_f64()).collect()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
