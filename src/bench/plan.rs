use std::str::FromStr;

use crate::args::{PositiveU32, PositiveUsize};
use crate::error::ValidationError;

/// Ordered iteration counts swept for every configured command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IterationPlan {
    counts: Vec<PositiveUsize>,
}

impl IterationPlan {
    /// # Errors
    ///
    /// Returns `EmptyIterationPlan` when `counts` is empty.
    pub fn new(counts: Vec<PositiveUsize>) -> Result<Self, ValidationError> {
        if counts.is_empty() {
            return Err(ValidationError::EmptyIterationPlan);
        }
        Ok(Self { counts })
    }

    /// Builds a plan from raw counts, rejecting zero.
    ///
    /// # Errors
    ///
    /// Returns `ValueTooSmall` for a zero entry and `EmptyIterationPlan` for an
    /// empty slice.
    pub fn from_counts(counts: &[usize]) -> Result<Self, ValidationError> {
        let counts = counts
            .iter()
            .map(|count| PositiveUsize::try_from(*count))
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(counts)
    }

    pub fn counts(&self) -> impl Iterator<Item = usize> + '_ {
        self.counts.iter().map(|count| count.get())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }
}

impl FromStr for IterationPlan {
    type Err = ValidationError;

    /// Parses a comma-separated list such as `10,100,1000`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().is_empty() {
            return Err(ValidationError::EmptyIterationPlan);
        }
        let counts = s
            .split(',')
            .map(str::trim)
            .map(|part| {
                if part.is_empty() {
                    return Err(ValidationError::EmptyIterationCount {
                        value: s.to_owned(),
                    });
                }
                part.parse::<PositiveUsize>()
            })
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(counts)
    }
}

/// Knobs consumed once by [`super::BenchEngine::start`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunOptions {
    /// Repeat each trial this many times and report the mean duration.
    pub average_over: Option<PositiveU32>,
    /// Stop on the first store error instead of counting it as a failure.
    pub show_error_details: bool,
}
