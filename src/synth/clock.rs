use std::sync::{
    atomic::{AtomicU64, Ordering},
    Arc,
};

/// Count of samples produced so far, shared by both threads.
///
/// Only the renderer advances it; the input thread reads it to timestamp
/// key presses. It also counts dropouts: blocks the renderer had to leave
/// silent because the registry was locked.
#[derive(Debug, Clone)]
pub struct SampleClock {
    samples: Arc<AtomicU64>,
    dropouts: Arc<AtomicU64>,
    sample_rate: u32,
}

impl SampleClock {
    pub fn new(sample_rate: u32) -> Self {
        Self {
            samples: Arc::new(AtomicU64::new(0)),
            dropouts: Arc::new(AtomicU64::new(0)),
            sample_rate,
        }
    }

    pub fn samples(&self) -> u64 {
        self.samples.load(Ordering::Acquire)
    }

    /// Current time in seconds.
    pub fn seconds(&self) -> f64 {
        self.time_of(self.samples())
    }

    /// Time in seconds of the given sample index.
    #[inline]
    pub fn time_of(&self, sample: u64) -> f64 {
        sample as f64 / self.sample_rate as f64
    }

    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    /// Blocks rendered as silence because the input thread held the lock.
    pub fn dropouts(&self) -> u64 {
        self.dropouts.load(Ordering::Relaxed)
    }

    /// Claim the next `count` samples, returning the index of the first.
    pub(crate) fn advance(&self, count: u64) -> u64 {
        self.samples.fetch_add(count, Ordering::AcqRel)
    }

    pub(crate) fn record_dropout(&self) {
        self.dropouts.fetch_add(1, Ordering::Relaxed);
    }
}
