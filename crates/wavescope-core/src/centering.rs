//! DC-offset correction for byte-range audio frames.
//!
//! Analyser output rests around [`REFERENCE_MIDPOINT`] when the input is
//! silent, but loudness drift and DC bias shift the mean of a frame. These
//! helpers compute the correction that re-centres a frame on the midpoint.

use crate::constants::REFERENCE_MIDPOINT;

/// Arithmetic mean of the samples; `0.0` for an empty frame.
pub fn average(samples: &[u8]) -> f32 {
    if samples.is_empty() {
        return 0.0;
    }
    let sum: u32 = samples.iter().map(|&s| s as u32).sum();
    sum as f32 / samples.len() as f32
}

/// Offset that moves the frame mean onto the reference midpoint.
///
/// An empty frame needs no correction.
pub fn center_offset(samples: &[u8]) -> f32 {
    if samples.is_empty() {
        return 0.0;
    }
    -(average(samples) - REFERENCE_MIDPOINT)
}

/// Write the re-centred frame into `out` and return the offset applied.
///
/// Only `min(samples.len(), out.len())` values are written. Results are not
/// clamped back into byte range.
pub fn recenter_into(samples: &[u8], out: &mut [f32]) -> f32 {
    let n = samples.len().min(out.len());
    let offset = center_offset(&samples[..n]);
    for (dst, &src) in out.iter_mut().zip(&samples[..n]) {
        *dst = src as f32 + offset;
    }
    offset
}
