//! Ring buffer of recent audio frames behind the scrolling ribbon scene.
//!
//! Each push overwrites the oldest slot and moves the front pointer back by
//! one, so logical offset 0 is always the newest frame and `capacity - 1`
//! the oldest one still retained.

use crate::centering::recenter_into;
use crate::constants::REFERENCE_MIDPOINT;
use crate::error::RibbonError;

#[derive(Clone, Debug)]
pub struct RibbonHistory {
    capacity: usize,
    slot_width: usize,
    // capacity * slot_width values, slot k at [k * slot_width ..]
    slots: Vec<f32>,
    front: usize,
}

impl RibbonHistory {
    /// Slots start flat at the reference midpoint, i.e. silence.
    pub fn new(capacity: usize, slot_width: usize) -> Result<Self, RibbonError> {
        if capacity == 0 {
            return Err(RibbonError::ZeroCapacity);
        }
        if slot_width == 0 {
            return Err(RibbonError::ZeroSlotWidth);
        }
        Ok(Self {
            capacity,
            slot_width,
            slots: vec![REFERENCE_MIDPOINT; capacity * slot_width],
            front: 0,
        })
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn slot_width(&self) -> usize {
        self.slot_width
    }

    /// Physical slot holding the newest frame.
    pub fn front_index(&self) -> usize {
        self.front
    }

    /// Store a re-centred copy of `samples` as the newest frame and return
    /// the offset that was applied.
    ///
    /// Input longer than the slot is truncated; a short frame leaves the
    /// tail of the slot at the re-centred midpoint.
    pub fn push_snapshot(&mut self, samples: &[u8]) -> f32 {
        let n = samples.len().min(self.slot_width);

        self.front = (self.front + self.capacity - 1) % self.capacity;
        let start = self.front * self.slot_width;
        let slot = &mut self.slots[start..start + self.slot_width];
        let offset = recenter_into(&samples[..n], slot);
        slot[n..].fill(REFERENCE_MIDPOINT + offset);
        offset
    }

    /// Frame `offset` steps back in time (0 = newest). Offsets wrap modulo
    /// the capacity.
    pub fn read_slot(&self, offset: usize) -> &[f32] {
        let physical = (self.front + offset % self.capacity) % self.capacity;
        let start = physical * self.slot_width;
        &self.slots[start..start + self.slot_width]
    }

    pub fn iter_newest_first(&self) -> impl Iterator<Item = &[f32]> + '_ {
        (0..self.capacity).map(move |i| self.read_slot(i))
    }

    pub fn clear(&mut self) {
        self.slots.fill(REFERENCE_MIDPOINT);
        self.front = 0;
    }
}

/// Fires on every `divisor`-th tick to decouple scroll speed from frame rate.
#[derive(Clone, Debug)]
pub struct Cadence {
    divisor: u32,
    counter: u64,
}

impl Cadence {
    /// A divisor of 0 behaves like 1 (fire every tick).
    pub fn new(divisor: u32) -> Self {
        Self {
            divisor: divisor.max(1),
            counter: 0,
        }
    }

    pub fn divisor(&self) -> u32 {
        self.divisor
    }

    pub fn set_divisor(&mut self, divisor: u32) {
        self.divisor = divisor.max(1);
    }

    /// Count one tick; true when this tick is due.
    pub fn advance(&mut self) -> bool {
        self.counter = self.counter.wrapping_add(1);
        self.counter % self.divisor as u64 == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_empty_dimensions() {
        assert_eq!(RibbonHistory::new(0, 4).unwrap_err(), RibbonError::ZeroCapacity);
        assert_eq!(RibbonHistory::new(4, 0).unwrap_err(), RibbonError::ZeroSlotWidth);
    }

    #[test]
    fn fresh_history_is_flat_silence() {
        let history = RibbonHistory::new(3, 8).unwrap();
        for slot in history.iter_newest_first() {
            assert!(slot.iter().all(|&v| v == REFERENCE_MIDPOINT));
        }
    }

    #[test]
    fn first_push_wraps_front_to_last_slot() {
        let mut history = RibbonHistory::new(4, 2).unwrap();
        history.push_snapshot(&[127, 127]);
        assert_eq!(history.front_index(), 3);
        history.push_snapshot(&[127, 127]);
        assert_eq!(history.front_index(), 2);
    }

    #[test]
    fn push_recentres_values() {
        let mut history = RibbonHistory::new(2, 4).unwrap();
        let offset = history.push_snapshot(&[130, 130, 134, 134]);
        assert_eq!(offset, -5.0);
        assert_eq!(history.read_slot(0), &[125.0, 125.0, 129.0, 129.0]);
    }

    #[test]
    fn stored_frame_matches_shared_recentring() {
        let frame = [90u8, 140, 200, 31, 127, 66];
        let mut expected = [0.0f32; 6];
        let expected_offset = recenter_into(&frame, &mut expected);

        let mut history = RibbonHistory::new(3, 6).unwrap();
        assert_eq!(history.push_snapshot(&frame), expected_offset);
        assert_eq!(history.read_slot(0), &expected);
    }

    #[test]
    fn short_and_long_frames_fit_the_slot() {
        let mut history = RibbonHistory::new(2, 4).unwrap();
        history.push_snapshot(&[137, 137]);
        assert_eq!(history.read_slot(0), &[127.0, 127.0, 117.0, 117.0]);

        history.push_snapshot(&[127, 127, 127, 127, 255, 255]);
        assert_eq!(history.read_slot(0), &[127.0; 4]);
    }

    #[test]
    fn offsets_wrap_modulo_capacity() {
        let mut history = RibbonHistory::new(3, 1).unwrap();
        history.push_snapshot(&[10]);
        assert_eq!(history.read_slot(0), history.read_slot(3));
    }

    #[test]
    fn clear_restores_initial_state() {
        let mut history = RibbonHistory::new(2, 2).unwrap();
        history.push_snapshot(&[0, 255]);
        history.clear();
        assert_eq!(history.front_index(), 0);
        assert_eq!(history.read_slot(1), &[127.0, 127.0]);
    }

    #[test]
    fn cadence_fires_every_nth_tick() {
        let mut cadence = Cadence::new(3);
        let fired: Vec<bool> = (0..6).map(|_| cadence.advance()).collect();
        assert_eq!(fired, vec![false, false, true, false, false, true]);
    }

    #[test]
    fn zero_cadence_means_every_tick() {
        let mut cadence = Cadence::new(0);
        assert_eq!(cadence.divisor(), 1);
        assert!((0..5).all(|_| cadence.advance()));
    }
}
