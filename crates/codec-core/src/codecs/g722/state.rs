//! G.722 State Management
//!
//! Per-band ADPCM predictor state and the QMF delay line. None of these
//! types are `Clone`: a stream's state belongs to exactly one encoder or
//! decoder.

use crate::codecs::g722::tables::{DET_HIGH_INIT, DET_LOW_INIT, QMF_TAPS};

/// ADPCM state for a single sub-band (low or high)
#[derive(Debug)]
pub struct BandState {
    /// Signal estimate
    pub s: i32,
    /// Pole section of the signal estimate
    pub sp: i32,
    /// Zero section of the signal estimate
    pub sz: i32,
    /// Reconstructed signal: r[0] current, r[1..] delayed
    pub r: [i32; 3],
    /// Pole predictor coefficients (a[0] unused)
    pub a: [i32; 3],
    /// Pole coefficients being computed for the next sample
    pub ap: [i32; 3],
    /// Partially reconstructed signal
    pub p: [i32; 3],
    /// Quantized difference signal history
    pub d: [i32; 7],
    /// Zero predictor coefficients (b[0] unused)
    pub b: [i32; 7],
    /// Zero coefficients being computed for the next sample
    pub bp: [i32; 7],
    /// Sign scratch
    pub sg: [i32; 7],
    /// Logarithmic quantizer scale factor
    pub nb: i32,
    /// Quantizer scale factor
    pub det: i32,
}

impl BandState {
    /// Create a band with the given initial scale factor
    pub fn new(det: i32) -> Self {
        Self {
            s: 0,
            sp: 0,
            sz: 0,
            r: [0; 3],
            a: [0; 3],
            ap: [0; 3],
            p: [0; 3],
            d: [0; 7],
            b: [0; 7],
            bp: [0; 7],
            sg: [0; 7],
            nb: 0,
            det,
        }
    }

    /// Low band in its reset state
    pub fn low() -> Self {
        Self::new(DET_LOW_INIT)
    }

    /// High band in its reset state
    pub fn high() -> Self {
        Self::new(DET_HIGH_INIT)
    }
}

/// Complete state of one direction (encoder or decoder)
#[derive(Debug)]
pub struct G722State {
    /// QMF delay line
    pub x: [i32; QMF_TAPS],
    /// Low band (index 0) and high band (index 1)
    pub band: [BandState; 2],
}

impl G722State {
    /// Create a state in its reset condition
    pub fn new() -> Self {
        Self {
            x: [0; QMF_TAPS],
            band: [BandState::low(), BandState::high()],
        }
    }

    /// Reset to the initial condition
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// Low-band state
    pub fn low_band(&self) -> &BandState {
        &self.band[0]
    }

    /// High-band state
    pub fn high_band(&self) -> &BandState {
        &self.band[1]
    }
}

impl Default for G722State {
    fn default() -> Self {
        Self::new()
    }
}
