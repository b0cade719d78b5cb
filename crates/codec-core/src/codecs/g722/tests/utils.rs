//! G.722 Test Utilities

use crate::types::{BitRate, SampleRate};

/// Every supported (sample rate, bit rate) pair
pub fn all_configs() -> Vec<(SampleRate, BitRate)> {
    SampleRate::ALL
        .iter()
        .flat_map(|&rate| BitRate::ALL.iter().map(move |&bits| (rate, bits)))
        .collect()
}

/// Sine tone as 16-bit PCM
pub fn sine_wave(frequency: f64, sample_rate: u32, amplitude: f64, len: usize) -> Vec<i16> {
    (0..len)
        .map(|n| {
            let t = n as f64 / sample_rate as f64;
            (amplitude * (2.0 * std::f64::consts::PI * frequency * t).sin()) as i16
        })
        .collect()
}

/// Root-mean-square level of a sample slice
pub fn rms(samples: &[i16]) -> f64 {
    if samples.is_empty() {
        return 0.0;
    }
    let sum: f64 = samples.iter().map(|&s| (s as f64) * (s as f64)).sum();
    (sum / samples.len() as f64).sqrt()
}
