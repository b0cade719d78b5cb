//! Shared helpers for the integration suites

#![allow(dead_code)]

use std::collections::HashMap;
use std::path::PathBuf;

/// Expected results for one (bit rate, sample rate) configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChecksumEntry {
    pub encoded_len: usize,
    pub encoded_md5: String,
    pub decoded_md5: String,
}

/// Parse a checksum fixture
///
/// Lines are `{bitrate}_{samplerate} <encoded-len> <encoded-md5> <decoded-md5>`;
/// `#` comments and blank lines are skipped.
pub fn parse_checksums(text: &str) -> Result<HashMap<String, ChecksumEntry>, String> {
    let mut entries = HashMap::new();
    for (lineno, line) in text.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let fields: Vec<&str> = line.split_whitespace().collect();
        let [key, len, encoded, decoded] = fields[..] else {
            return Err(format!("line {}: expected 4 fields, got {}", lineno + 1, fields.len()));
        };
        let encoded_len = len
            .parse()
            .map_err(|e| format!("line {}: bad length {:?}: {}", lineno + 1, len, e))?;
        entries.insert(
            key.to_string(),
            ChecksumEntry {
                encoded_len,
                encoded_md5: encoded.to_ascii_lowercase(),
                decoded_md5: decoded.to_ascii_lowercase(),
            },
        );
    }
    Ok(entries)
}

/// Key used by the checksum fixture
pub fn config_key(bit_rate: u32, sample_rate: u32) -> String {
    format!("{}_{}", bit_rate, sample_rate)
}

/// Directory holding the reference corpus
pub fn test_data_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("..")
        .join("test_data")
}

/// Every supported (sample rate, bit rate) pair
pub fn all_configs() -> Vec<(u32, u32)> {
    let mut configs = Vec::new();
    for sample_rate in [8000, 16000] {
        for bit_rate in [48000, 56000, 64000] {
            configs.push((sample_rate, bit_rate));
        }
    }
    configs
}

/// Deterministic test signal: two tones
pub fn test_signal(len: usize, sample_rate: u32) -> Vec<i16> {
    (0..len)
        .map(|n| {
            let t = n as f64 / sample_rate as f64;
            let v = 6000.0 * (2.0 * std::f64::consts::PI * 440.0 * t).sin()
                + 2500.0 * (2.0 * std::f64::consts::PI * 2900.0 * t).sin();
            v as i16
        })
        .collect()
}

fn lcg(state: u32) -> u32 {
    state.wrapping_mul(1103515245).wrapping_add(12345)
}

/// Integer-only PCM: a sawtooth with low-level LCG noise
pub fn known_answer_pcm(len: usize) -> Vec<i16> {
    let mut state = 0x2545_f491u32;
    (0..len)
        .map(|n| {
            state = lcg(state);
            let saw = ((n * 97) % 2000) as i32 - 1000;
            let noise = ((state >> 16) & 0x3ff) as i32 - 512;
            (saw * 8 + noise) as i16
        })
        .collect()
}

/// Pseudo-random code bytes
pub fn known_answer_codes(len: usize) -> Vec<u8> {
    let mut state = 0x0722u32;
    (0..len)
        .map(|_| {
            state = lcg(state);
            (state >> 16) as u8
        })
        .collect()
}
