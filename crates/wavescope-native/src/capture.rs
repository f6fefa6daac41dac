//! Microphone capture through cpal, exposed as an [`AudioFeed`].

use std::sync::{Arc, Mutex};

use anyhow::{anyhow, Result};
use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use wavescope_core::constants::FFT_SIZE;
use wavescope_core::AudioFeed;

use crate::analyser::ByteAnalyser;

/// Fixed window of the most recent mono samples.
pub struct SampleRing {
    samples: Vec<f32>,
    head: usize,
}

impl SampleRing {
    pub fn new(len: usize) -> Self {
        Self {
            samples: vec![0.0; len.max(1)],
            head: 0,
        }
    }

    pub fn push(&mut self, sample: f32) {
        self.samples[self.head] = sample;
        self.head = (self.head + 1) % self.samples.len();
    }

    /// Copy the window into `out`, oldest sample first.
    pub fn copy_ordered(&self, out: &mut Vec<f32>) {
        out.clear();
        out.extend_from_slice(&self.samples[self.head..]);
        out.extend_from_slice(&self.samples[..self.head]);
    }
}

/// Keeps the input stream alive; dropping it stops capture.
pub struct MicCapture {
    _stream: cpal::Stream,
    ring: Arc<Mutex<SampleRing>>,
}

impl MicCapture {
    pub fn open() -> Result<Self> {
        let host = cpal::default_host();
        let device = host
            .default_input_device()
            .ok_or_else(|| anyhow!("no input device available"))?;
        let config = device.default_input_config()?;
        log::info!(
            "capturing from {} ({} Hz, {} ch, {:?})",
            device.name().unwrap_or_else(|_| "unknown".into()),
            config.sample_rate().0,
            config.channels(),
            config.sample_format()
        );

        let ring = Arc::new(Mutex::new(SampleRing::new(FFT_SIZE)));
        let stream = match config.sample_format() {
            cpal::SampleFormat::F32 => build_stream::<f32>(&device, &config.into(), ring.clone())?,
            cpal::SampleFormat::I16 => build_stream::<i16>(&device, &config.into(), ring.clone())?,
            cpal::SampleFormat::U16 => build_stream::<u16>(&device, &config.into(), ring.clone())?,
            other => return Err(anyhow!("unsupported sample format {other:?}")),
        };
        stream.play()?;
        Ok(Self {
            _stream: stream,
            ring,
        })
    }

    fn snapshot(&self, out: &mut Vec<f32>) {
        match self.ring.lock() {
            Ok(ring) => ring.copy_ordered(out),
            Err(poisoned) => poisoned.into_inner().copy_ordered(out),
        }
    }
}

fn build_stream<T>(
    device: &cpal::Device,
    config: &cpal::StreamConfig,
    ring: Arc<Mutex<SampleRing>>,
) -> Result<cpal::Stream>
where
    T: cpal::Sample + cpal::SizedSample + Send + 'static,
    f32: cpal::FromSample<T>,
{
    let channels = usize::from(config.channels).max(1);
    let stream = device.build_input_stream(
        config,
        move |data: &[T], _: &cpal::InputCallbackInfo| {
            let Ok(mut ring) = ring.lock() else {
                return;
            };
            for frame in data.chunks(channels) {
                let sum: f32 = frame
                    .iter()
                    .map(|&s| -> f32 { cpal::Sample::from_sample(s) })
                    .sum();
                ring.push(sum / frame.len() as f32);
            }
        },
        |err| log::error!("input stream error: {err}"),
        None,
    )?;
    Ok(stream)
}

/// Analysed microphone input. Reports no data when capture could not start.
pub struct MicFeed {
    capture: Option<MicCapture>,
    analyser: ByteAnalyser,
    block: Vec<f32>,
}

impl MicFeed {
    pub fn new(capture: Option<MicCapture>) -> Self {
        Self {
            capture,
            analyser: ByteAnalyser::default(),
            block: Vec::with_capacity(FFT_SIZE),
        }
    }

    /// Open the default input, logging and carrying on silently on failure.
    pub fn open_default() -> Self {
        match MicCapture::open() {
            Ok(capture) => Self::new(Some(capture)),
            Err(e) => {
                log::error!("error getting microphone input: {e:#}");
                Self::new(None)
            }
        }
    }
}

impl AudioFeed for MicFeed {
    fn frequency_bins(&mut self) -> Option<&[u8]> {
        self.capture.as_ref()?.snapshot(&mut self.block);
        Some(self.analyser.update_frequency(&self.block))
    }

    fn time_samples(&mut self) -> Option<&[u8]> {
        self.capture.as_ref()?.snapshot(&mut self.block);
        Some(self.analyser.update_time(&self.block))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ring_keeps_latest_window_in_order() {
        let mut ring = SampleRing::new(3);
        for s in [1.0, 2.0, 3.0, 4.0, 5.0] {
            ring.push(s);
        }
        let mut out = Vec::new();
        ring.copy_ordered(&mut out);
        assert_eq!(out, vec![3.0, 4.0, 5.0]);
    }

    #[test]
    fn feed_without_capture_has_no_data() {
        let mut feed = MicFeed::new(None);
        assert!(feed.frequency_bins().is_none());
        assert!(feed.time_samples().is_none());
    }
}
