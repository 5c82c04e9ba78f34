use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::fmt;

pub const SPLIT_SEED: u64 = 8;
pub const TRAIN_FRACTION: f64 = 0.66;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Split {
    Train,
    Test,
}

impl Split {
    pub fn from_train_flag(train: bool) -> Self {
        if train {
            Split::Train
        } else {
            Split::Test
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Split::Train => "train",
            Split::Test => "test",
        }
    }
}

impl fmt::Display for Split {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Per-row Bernoulli draw deciding train vs test.
///
/// Rows are assigned in the order they are fed, so the split only stays fixed if
/// files and rows are visited in the same order every time.
pub struct SplitAssigner {
    rng: StdRng,
    train_fraction: f64,
}

impl SplitAssigner {
    pub fn new(seed: u64, train_fraction: f64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            train_fraction,
        }
    }

    pub fn next_split(&mut self) -> Split {
        let draw: f64 = self.rng.gen();

        if draw < self.train_fraction {
            Split::Train
        } else {
            Split::Test
        }
    }

    pub fn assign(&mut self, rows: usize) -> Vec<Split> {
        (0..rows).map(|_| self.next_split()).collect()
    }
}

impl Default for SplitAssigner {
    fn default() -> Self {
        Self::new(SPLIT_SEED, TRAIN_FRACTION)
    }
}
