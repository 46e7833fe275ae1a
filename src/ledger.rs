use crate::types::{NUM_SQUARES, Position};

/// Per-square flip counts.
///
/// A square's counter is reset when a stone is placed on it and bumped every
/// time the stone sitting there is flipped. Counters of empty squares stay 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FlipLedger {
    counts: [u16; NUM_SQUARES],
}

impl FlipLedger {
    pub fn new() -> Self {
        Self {
            counts: [0; NUM_SQUARES],
        }
    }

    pub fn get(&self, pos: Position) -> u16 {
        self.counts[pos.index()]
    }

    pub fn as_slice(&self) -> &[u16] {
        &self.counts
    }

    pub(crate) fn record_placement(&mut self, pos: Position) {
        self.counts[pos.index()] = 0;
    }

    pub(crate) fn record_flips(&mut self, flips: u64) {
        let mut bits = flips;
        while bits != 0 {
            let idx = bits.trailing_zeros() as usize;
            self.counts[idx] = self.counts[idx].saturating_add(1);
            bits &= bits - 1;
        }
    }

    /// Sum of the counters on the squares set in `mask`.
    pub fn sum_over(&self, mask: u64) -> u32 {
        let mut bits = mask;
        let mut sum = 0u32;
        while bits != 0 {
            sum += u32::from(self.counts[bits.trailing_zeros() as usize]);
            bits &= bits - 1;
        }
        sum
    }

    #[cfg(test)]
    pub(crate) fn set(&mut self, pos: Position, count: u16) {
        self.counts[pos.index()] = count;
    }
}

impl Default for FlipLedger {
    fn default() -> Self {
        Self::new()
    }
}
