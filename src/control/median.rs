//! Sliding-window median filter.
//!
//! Keeps the last `N` raw samples in a fixed-capacity ring and reports the
//! exact middle value once the ring is full.  Thermocouple spikes (EMI from
//! the heater relay, a loose junction) are rejected as long as fewer than
//! half of the window is corrupt.

use heapless::Deque;

/// Bounded FIFO of the most recent `N` samples.
///
/// Once `N` samples have arrived the window is full and stays full; every
/// further [`push`](Self::push) evicts the oldest sample.
#[derive(Debug, Clone)]
pub struct MedianWindow<const N: usize> {
    samples: Deque<f64, N>,
}

impl<const N: usize> Default for MedianWindow<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> MedianWindow<N> {
    pub const fn new() -> Self {
        Self {
            samples: Deque::new(),
        }
    }

    /// Append a sample, evicting the oldest one when the window is full.
    pub fn push(&mut self, sample: f64) {
        if self.samples.is_full() {
            self.samples.pop_front();
        }
        // Cannot fail: a slot was freed above if the ring was full.
        let _ = self.samples.push_back(sample);
    }

    pub fn is_full(&self) -> bool {
        self.samples.is_full()
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub const fn capacity(&self) -> usize {
        N
    }

    /// Samples from oldest to newest.
    pub fn iter(&self) -> impl Iterator<Item = &f64> {
        self.samples.iter()
    }

    /// Median of the window, or `None` until the window has filled.
    ///
    /// Sorting uses the IEEE total order, so a `NaN` from a faulted read
    /// lands at one end of the window instead of poisoning the comparison.
    pub fn median(&self) -> Option<f64> {
        if !self.is_full() {
            return None;
        }
        let mut sorted = [0.0_f64; N];
        for (slot, sample) in sorted.iter_mut().zip(self.samples.iter()) {
            *slot = *sample;
        }
        sorted.sort_unstable_by(f64::total_cmp);
        Some(sorted[N / 2])
    }
}
