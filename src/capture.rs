use std::sync::{Arc, Mutex};

use anyhow::{Context, Result};
use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use cpal::Sample;
use rand::Rng;

pub const DEFAULT_SAMPLE_RATE: u32 = 44_100;
/// Ring capacity in seconds of audio.
pub const BUFFER_SECONDS: u32 = 60;

/// Fixed-capacity circular buffer of raw i16 samples with an absolute
/// write position. Reads outside the retained window yield silence.
pub struct SampleBuffer {
    data: Vec<i16>,
    pos: i64, // absolute index of the next sample to be written
}

impl SampleBuffer {
    pub fn new(capacity: usize) -> Self {
        Self {
            data: vec![0; capacity.max(1)],
            pos: 0,
        }
    }

    pub fn capacity(&self) -> usize {
        self.data.len()
    }

    pub fn pos(&self) -> i64 {
        self.pos
    }

    pub fn push(&mut self, samples: &[i16]) {
        for &s in samples {
            let idx = (self.pos as usize) % self.data.len();
            self.data[idx] = s;
            self.pos += 1;
        }
    }

    fn at(&self, idx: i64) -> i16 {
        if idx < 0 || idx >= self.pos || idx < self.pos - self.data.len() as i64 {
            return 0;
        }
        self.data[(idx as usize) % self.data.len()]
    }

    /// Min/max pairs over `len` samples starting at absolute index
    /// `start`, one pair per `skip` samples. With `skip == 1` every pair
    /// is `(v, v)`.
    pub fn envelope(&self, start: i64, len: usize, skip: usize) -> Vec<(i16, i16)> {
        let skip = skip.max(1);
        let mut out = Vec::with_capacity(len / skip + 1);
        let mut i = 0usize;
        while i < len {
            let end = (i + skip).min(len);
            let mut mn = i16::MAX;
            let mut mx = i16::MIN;
            for j in i..end {
                let v = self.at(start + j as i64);
                if v < mn {
                    mn = v;
                }
                if v > mx {
                    mx = v;
                }
            }
            out.push((mn, mx));
            i += skip;
        }
        out
    }
}

struct CaptureState {
    buffers: Vec<SampleBuffer>,
    live: Vec<bool>,
}

pub struct CaptureShared {
    sample_rate: u32,
    capacity: usize,
    state: Mutex<CaptureState>,
}

struct SynthState {
    phases: Vec<f32>,
    carry: f64,
}

/// Owns the circular buffers and whatever feeds them: either a cpal
/// default-input stream or a synthetic source pumped from the UI thread.
pub struct RecordingManager {
    _stream: Option<cpal::Stream>,
    shared: Arc<CaptureShared>,
    synth: Option<SynthState>,
}

impl RecordingManager {
    fn new_shared(channels: usize, sample_rate: u32, capacity: usize) -> Arc<CaptureShared> {
        let channels = channels.max(1);
        Arc::new(CaptureShared {
            sample_rate,
            capacity,
            state: Mutex::new(CaptureState {
                buffers: (0..channels).map(|_| SampleBuffer::new(capacity)).collect(),
                live: vec![true; channels],
            }),
        })
    }

    /// Capture from the default input device.
    pub fn new() -> Result<Self> {
        let host = cpal::default_host();
        let device = host
            .default_input_device()
            .context("No default input device")?;
        let cfg = device
            .default_input_config()
            .context("No default input config")?;

        let sample_rate = cfg.sample_rate();
        let channels = cfg.channels() as usize;
        let capacity = (sample_rate * BUFFER_SECONDS) as usize;
        let shared = Self::new_shared(channels, sample_rate, capacity);

        let stream = match cfg.sample_format() {
            cpal::SampleFormat::F32 => {
                Self::build_stream::<f32>(&device, &cfg.into(), shared.clone())?
            }
            cpal::SampleFormat::I16 => {
                Self::build_stream::<i16>(&device, &cfg.into(), shared.clone())?
            }
            cpal::SampleFormat::U16 => {
                Self::build_stream::<u16>(&device, &cfg.into(), shared.clone())?
            }
            _ => anyhow::bail!("Unsupported sample format"),
        };

        Ok(Self {
            _stream: Some(stream),
            shared,
            synth: None,
        })
    }

    /// Synthetic source: per-channel sine plus noise, advanced by
    /// `pump_synth` from the UI thread. Used headless and in tests.
    pub fn new_synthetic(channels: usize) -> Self {
        let channels = channels.max(1);
        let capacity = (DEFAULT_SAMPLE_RATE * BUFFER_SECONDS) as usize;
        Self {
            _stream: None,
            shared: Self::new_shared(channels, DEFAULT_SAMPLE_RATE, capacity),
            synth: Some(SynthState {
                phases: vec![0.0; channels],
                carry: 0.0,
            }),
        }
    }

    pub fn with_config(channels: usize, sample_rate: u32, capacity: usize) -> Self {
        Self {
            _stream: None,
            shared: Self::new_shared(channels, sample_rate, capacity),
            synth: None,
        }
    }

    fn build_stream<T>(
        device: &cpal::Device,
        cfg: &cpal::StreamConfig,
        shared: Arc<CaptureShared>,
    ) -> Result<cpal::Stream>
    where
        T: cpal::SizedSample,
        i16: cpal::FromSample<T>,
    {
        let channels = cfg.channels as usize;
        let err_fn = |e| eprintln!("cpal stream error: {e}");
        let stream = device.build_input_stream(
            cfg,
            move |data: &[T], _| {
                let Ok(mut state) = shared.state.lock() else {
                    return;
                };
                for frame in data.chunks(channels) {
                    for (ch, &s) in frame.iter().enumerate() {
                        if let Some(buf) = state.buffers.get_mut(ch) {
                            buf.push(&[i16::from_sample(s)]);
                        }
                    }
                }
            },
            err_fn,
            None,
        )?;
        stream.play()?;
        Ok(stream)
    }

    pub fn sample_rate(&self) -> u32 {
        self.shared.sample_rate
    }

    pub fn capacity(&self) -> usize {
        self.shared.capacity
    }

    pub fn channel_count(&self) -> usize {
        self.shared.state.lock().map(|s| s.buffers.len()).unwrap_or(0)
    }

    /// Absolute write position (current "now" sample index).
    pub fn pos(&self) -> i64 {
        self.shared
            .state
            .lock()
            .map(|s| s.buffers.first().map(|b| b.pos()).unwrap_or(0))
            .unwrap_or(0)
    }

    pub fn channel_is_live(&self, channel: usize) -> bool {
        self.shared
            .state
            .lock()
            .map(|s| s.live.get(channel).copied().unwrap_or(false))
            .unwrap_or(false)
    }

    pub fn set_channel_live(&self, channel: usize, live: bool) {
        if let Ok(mut state) = self.shared.state.lock() {
            if let Some(flag) = state.live.get_mut(channel) {
                *flag = live;
            }
        }
    }

    pub fn channel_samples_envelope(
        &self,
        channel: usize,
        start: i64,
        len: usize,
        skip: usize,
    ) -> Vec<(i16, i16)> {
        self.shared
            .state
            .lock()
            .ok()
            .and_then(|s| s.buffers.get(channel).map(|b| b.envelope(start, len, skip)))
            .unwrap_or_default()
    }

    /// Test/demo hook: append samples to one channel's ring.
    pub fn push_samples(&self, channel: usize, samples: &[i16]) {
        if let Ok(mut state) = self.shared.state.lock() {
            if let Some(buf) = state.buffers.get_mut(channel) {
                buf.push(samples);
            }
        }
    }

    /// Advance the synthetic source by `dt` seconds of wall time.
    pub fn pump_synth(&mut self, dt: f64) {
        let Some(synth) = self.synth.as_mut() else {
            return;
        };
        let sr = self.shared.sample_rate as f64;
        let exact = dt.clamp(0.0, 0.5) * sr + synth.carry;
        let n = exact.floor() as usize;
        synth.carry = exact - n as f64;
        if n == 0 {
            return;
        }
        let Ok(mut state) = self.shared.state.lock() else {
            return;
        };
        let mut rng = rand::thread_rng();
        for (ch, buf) in state.buffers.iter_mut().enumerate() {
            let phase = &mut synth.phases[ch];
            let hz = 4.0 + 3.0 * ch as f32;
            let step = std::f32::consts::TAU * hz / sr as f32;
            for _ in 0..n {
                let v = phase.sin() * 2500.0 + rng.gen_range(-400.0f32..400.0);
                buf.push(&[v as i16]);
                *phase += step;
                if *phase > std::f32::consts::TAU {
                    *phase -= std::f32::consts::TAU;
                }
            }
        }
    }
}
