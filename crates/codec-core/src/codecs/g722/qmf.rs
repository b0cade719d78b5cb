//! G.722 QMF (Quadrature Mirror Filter) Implementation
//!
//! Transmit (analysis) and receive (synthesis) filters operating on the
//! 24-tap delay line carried in the stream state.

use crate::codecs::g722::adpcm::saturate;
use crate::codecs::g722::tables::{QMF_COEFFS, QMF_TAPS};

/// QMF analysis filter (encoder)
///
/// Pushes two input samples into the delay line and returns the
/// `(xlow, xhigh)` sub-band samples.
pub fn qmf_analysis(x: &mut [i32; QMF_TAPS], sample0: i16, sample1: i16) -> (i32, i32) {
    x.copy_within(2..QMF_TAPS, 0);
    x[22] = sample0 as i32;
    x[23] = sample1 as i32;

    // Every other QMF output is discarded
    let mut sumeven = 0;
    let mut sumodd = 0;
    for i in 0..12 {
        sumodd += x[2 * i] * QMF_COEFFS[i];
        sumeven += x[2 * i + 1] * QMF_COEFFS[11 - i];
    }

    ((sumeven + sumodd) >> 14, (sumeven - sumodd) >> 14)
}

/// QMF synthesis filter (decoder)
///
/// Pushes the reconstructed sub-band pair and returns two output samples.
pub fn qmf_synthesis(x: &mut [i32; QMF_TAPS], rlow: i32, rhigh: i32) -> (i16, i16) {
    x.copy_within(2..QMF_TAPS, 0);
    x[22] = rlow + rhigh;
    x[23] = rlow - rhigh;

    let mut xout1 = 0;
    let mut xout2 = 0;
    for i in 0..12 {
        xout2 += x[2 * i] * QMF_COEFFS[i];
        xout1 += x[2 * i + 1] * QMF_COEFFS[11 - i];
    }

    (saturate(xout1 >> 11) as i16, saturate(xout2 >> 11) as i16)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_analysis_of_silence() {
        let mut x = [0; QMF_TAPS];
        for _ in 0..20 {
            assert_eq!(qmf_analysis(&mut x, 0, 0), (0, 0));
        }
    }

    #[test]
    fn test_analysis_shifts_delay_line() {
        let mut x = [0; QMF_TAPS];
        qmf_analysis(&mut x, 100, -100);
        assert_eq!(x[22], 100);
        assert_eq!(x[23], -100);
        qmf_analysis(&mut x, 7, 8);
        assert_eq!(x[20], 100);
        assert_eq!(x[21], -100);
        assert_eq!(x[22], 7);
        assert_eq!(x[23], 8);
    }

    #[test]
    fn test_synthesis_of_silence() {
        let mut x = [0; QMF_TAPS];
        for _ in 0..20 {
            assert_eq!(qmf_synthesis(&mut x, 0, 0), (0, 0));
        }
    }
}
