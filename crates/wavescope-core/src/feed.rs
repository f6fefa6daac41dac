//! Source of analyser frames consumed once per tick.

use crate::constants::{FREQUENCY_BIN_COUNT, RIBBON_SLOT_WIDTH};
use crate::params::FeedKind;

/// Provider of byte-valued analyser frames.
///
/// Each call refreshes the underlying buffer and returns it, or `None` when
/// no audio source is active. Callers copy whatever they need to keep.
pub trait AudioFeed {
    /// Frequency magnitudes, one byte per bin (0..=255).
    fn frequency_bins(&mut self) -> Option<&[u8]>;
    /// Time-domain waveform, silence at 128.
    fn time_samples(&mut self) -> Option<&[u8]>;

    fn frame(&mut self, kind: FeedKind) -> Option<&[u8]> {
        match kind {
            FeedKind::Frequency => self.frequency_bins(),
            FeedKind::Time => self.time_samples(),
        }
    }
}

/// No source connected.
#[derive(Clone, Copy, Debug, Default)]
pub struct SilentFeed;

impl AudioFeed for SilentFeed {
    fn frequency_bins(&mut self) -> Option<&[u8]> {
        None
    }

    fn time_samples(&mut self) -> Option<&[u8]> {
        None
    }
}

/// Replays fixed frames in a loop. An empty frame list means no data.
#[derive(Clone, Debug, Default)]
pub struct ScriptedFeed {
    frequency: Vec<Vec<u8>>,
    time: Vec<Vec<u8>>,
    next_frequency: usize,
    next_time: usize,
}

impl ScriptedFeed {
    pub fn new(frequency: Vec<Vec<u8>>, time: Vec<Vec<u8>>) -> Self {
        Self {
            frequency,
            time,
            next_frequency: 0,
            next_time: 0,
        }
    }

    /// Same frame forever on both channels.
    pub fn constant(frequency: Vec<u8>, time: Vec<u8>) -> Self {
        Self::new(vec![frequency], vec![time])
    }

    /// A slow synthetic sweep: a moving spectral peak and a sine waveform
    /// whose phase drifts from frame to frame.
    pub fn demo(frames: usize) -> Self {
        let frames = frames.max(1);
        let mut frequency = Vec::with_capacity(frames);
        let mut time = Vec::with_capacity(frames);
        for f in 0..frames {
            let phase = f as f32 / frames as f32;
            let peak = phase * FREQUENCY_BIN_COUNT as f32;
            frequency.push(
                (0..FREQUENCY_BIN_COUNT)
                    .map(|i| {
                        let d = (i as f32 - peak).abs();
                        (255.0 * (-d * d / 18.0).exp()) as u8
                    })
                    .collect(),
            );
            time.push(
                (0..RIBBON_SLOT_WIDTH)
                    .map(|j| {
                        let t = j as f32 / RIBBON_SLOT_WIDTH as f32;
                        let s = ((t * 3.0 + phase) * std::f32::consts::TAU).sin();
                        (128.0 + 90.0 * s).round().clamp(0.0, 255.0) as u8
                    })
                    .collect(),
            );
        }
        Self::new(frequency, time)
    }
}

fn next_frame<'a>(frames: &'a [Vec<u8>], cursor: &mut usize) -> Option<&'a [u8]> {
    if frames.is_empty() {
        return None;
    }
    let frame = &frames[*cursor % frames.len()];
    *cursor = cursor.wrapping_add(1);
    Some(frame)
}

impl AudioFeed for ScriptedFeed {
    fn frequency_bins(&mut self) -> Option<&[u8]> {
        next_frame(&self.frequency, &mut self.next_frequency)
    }

    fn time_samples(&mut self) -> Option<&[u8]> {
        next_frame(&self.time, &mut self.next_time)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn silent_feed_has_nothing() {
        let mut feed = SilentFeed;
        assert!(feed.frequency_bins().is_none());
        assert!(feed.frame(FeedKind::Time).is_none());
    }

    #[test]
    fn scripted_feed_cycles_frames() {
        let mut feed = ScriptedFeed::new(vec![vec![1], vec![2]], vec![]);
        assert_eq!(feed.frequency_bins(), Some(&[1u8][..]));
        assert_eq!(feed.frequency_bins(), Some(&[2u8][..]));
        assert_eq!(feed.frequency_bins(), Some(&[1u8][..]));
        assert!(feed.time_samples().is_none());
    }

    #[test]
    fn demo_frames_have_analyser_shape() {
        let mut feed = ScriptedFeed::demo(8);
        assert_eq!(feed.frequency_bins().map(<[u8]>::len), Some(FREQUENCY_BIN_COUNT));
        assert_eq!(feed.time_samples().map(<[u8]>::len), Some(RIBBON_SLOT_WIDTH));
    }
}
