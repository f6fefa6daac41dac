//! Byte-valued spectrum and waveform, computed the way a browser
//! `AnalyserNode` reports them.

use std::sync::Arc;

use rustfft::{num_complex::Complex, Fft, FftPlanner};
use wavescope_core::constants::{ANALYSER_MAX_DB, ANALYSER_MIN_DB, ANALYSER_SMOOTHING, FFT_SIZE};

pub struct ByteAnalyser {
    fft: Arc<dyn Fft<f32>>,
    window: Vec<f32>,
    scratch: Vec<Complex<f32>>,
    smoothed: Vec<f32>,
    smoothing: f32,
    min_db: f32,
    max_db: f32,
    freq: Vec<u8>,
    time: Vec<u8>,
}

impl Default for ByteAnalyser {
    fn default() -> Self {
        Self::new(FFT_SIZE, ANALYSER_SMOOTHING, ANALYSER_MIN_DB, ANALYSER_MAX_DB)
    }
}

impl ByteAnalyser {
    pub fn new(fft_size: usize, smoothing: f32, min_db: f32, max_db: f32) -> Self {
        let n = fft_size.max(2);
        // Blackman window, alpha = 0.16
        let window = (0..n)
            .map(|i| {
                let x = std::f32::consts::TAU * i as f32 / n as f32;
                0.42 - 0.5 * x.cos() + 0.08 * (2.0 * x).cos()
            })
            .collect();
        Self {
            fft: FftPlanner::new().plan_fft_forward(n),
            window,
            scratch: vec![Complex::new(0.0, 0.0); n],
            smoothed: vec![0.0; n / 2],
            smoothing: smoothing.clamp(0.0, 1.0),
            min_db,
            max_db,
            freq: vec![0; n / 2],
            time: vec![128; n],
        }
    }

    pub fn fft_size(&self) -> usize {
        self.window.len()
    }

    /// Window, transform and smooth `samples` (the most recent block, in
    /// [-1, 1]); missing samples count as silence.
    pub fn update_frequency(&mut self, samples: &[f32]) -> &[u8] {
        let n = self.fft_size();
        for (i, slot) in self.scratch.iter_mut().enumerate() {
            let s = samples.get(i).copied().unwrap_or(0.0);
            *slot = Complex::new(s * self.window[i], 0.0);
        }
        self.fft.process(&mut self.scratch);

        let range = self.max_db - self.min_db;
        for (k, (smoothed, byte)) in self.smoothed.iter_mut().zip(&mut self.freq).enumerate() {
            let magnitude = self.scratch[k].norm() / n as f32;
            *smoothed = self.smoothing * *smoothed + (1.0 - self.smoothing) * magnitude;
            if !smoothed.is_finite() {
                *smoothed = 0.0;
            }
            let db = 20.0 * smoothed.log10();
            *byte = (255.0 / range * (db - self.min_db)).clamp(0.0, 255.0) as u8;
        }
        &self.freq
    }

    /// Map samples to bytes with silence at 128.
    pub fn update_time(&mut self, samples: &[f32]) -> &[u8] {
        for (i, byte) in self.time.iter_mut().enumerate() {
            let s = samples.get(i).copied().unwrap_or(0.0);
            *byte = (128.0 * (s + 1.0)).clamp(0.0, 255.0) as u8;
        }
        &self.time
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tone(bin: usize, n: usize) -> Vec<f32> {
        (0..n)
            .map(|i| (std::f32::consts::TAU * bin as f32 * i as f32 / n as f32).sin())
            .collect()
    }

    #[test]
    fn silence_is_flat() {
        let mut a = ByteAnalyser::default();
        let silent = vec![0.0; FFT_SIZE];
        assert!(a.update_frequency(&silent).iter().all(|&b| b == 0));
        assert!(a.update_time(&silent).iter().all(|&b| b == 128));
    }

    #[test]
    fn time_bytes_clamp_to_range() {
        let mut a = ByteAnalyser::new(4, 0.0, -100.0, -30.0);
        assert_eq!(a.update_time(&[0.5, -1.0, 1.0, -2.0]), &[192, 0, 255, 0]);
    }

    #[test]
    fn tone_peaks_in_its_bin() {
        let mut a = ByteAnalyser::new(64, 0.0, -100.0, -30.0);
        let bins = a.update_frequency(&tone(4, 64)).to_vec();
        assert_eq!(bins.len(), 32);
        assert_eq!(bins[4], 255);
        assert_eq!(bins[12], 0);
        assert_eq!(bins[20], 0);
    }

    #[test]
    fn smoothing_lets_levels_fall_gradually() {
        let mut a = ByteAnalyser::default();
        let loud = tone(4, FFT_SIZE);
        for _ in 0..100 {
            a.update_frequency(&loud);
        }
        assert_eq!(a.update_frequency(&loud)[4], 255);
        let after_one = a.update_frequency(&vec![0.0; FFT_SIZE])[4];
        assert!(after_one > 200, "fell too fast: {after_one}");
    }

    #[test]
    fn short_blocks_are_zero_padded() {
        let mut a = ByteAnalyser::default();
        assert_eq!(a.update_time(&[1.0]).len(), FFT_SIZE);
        assert_eq!(a.update_time(&[])[0], 128);
    }
}
