//! G.722 ADPCM Implementation
//!
//! Scale-factor adaptation and the shared predictor update (block 4) used
//! by both directions.

use crate::codecs::g722::state::BandState;
use crate::codecs::g722::tables::{ILB, NB_HIGH_MAX, NB_LOW_MAX, WH, WL};

/// Clamp a 32-bit intermediate to the 16-bit range
#[inline]
pub fn saturate(amp: i32) -> i32 {
    amp.clamp(i16::MIN as i32, i16::MAX as i32)
}

/// Inverse log lookup shared by SCALEL and SCALEH
#[inline]
fn scale(nb: i32, shift_base: i32) -> i32 {
    let wd1 = ((nb >> 6) & 31) as usize;
    let wd2 = shift_base - (nb >> 11);
    let wd3 = if wd2 < 0 {
        ILB[wd1] << -wd2
    } else {
        ILB[wd1] >> wd2
    };
    wd3 << 2
}

/// Blocks 3L LOGSCL + SCALEL
///
/// `il4` indexes `WL` (already mapped through `RL42`).
pub fn adapt_low_scale(band: &mut BandState, il4: usize) {
    let wd = (band.nb * 127) >> 7;
    band.nb = (wd + WL[il4]).clamp(0, NB_LOW_MAX);
    band.det = scale(band.nb, 8);
}

/// Blocks 3H LOGSCH + SCALEH
///
/// `ih2` indexes `WH` (already mapped through `RH2`).
pub fn adapt_high_scale(band: &mut BandState, ih2: usize) {
    let wd = (band.nb * 127) >> 7;
    band.nb = (wd + WH[ih2]).clamp(0, NB_HIGH_MAX);
    band.det = scale(band.nb, 10);
}

/// Block 4: reconstruction, pole/zero predictor adaptation and prediction
pub fn block4(band: &mut BandState, d: i32) {
    // RECONS
    band.d[0] = d;
    band.r[0] = saturate(band.s + d);

    // PARREC
    band.p[0] = saturate(band.sz + d);

    // UPPOL2
    for i in 0..3 {
        band.sg[i] = band.p[i] >> 15;
    }
    let wd1 = saturate(band.a[1] << 2);
    let wd2 = (if band.sg[0] == band.sg[1] { -wd1 } else { wd1 }).min(32767);
    let mut wd3 = (wd2 >> 7) + (if band.sg[0] == band.sg[2] { 128 } else { -128 });
    wd3 += (band.a[2] * 32512) >> 15;
    band.ap[2] = wd3.clamp(-12288, 12288);

    // UPPOL1
    band.sg[0] = band.p[0] >> 15;
    band.sg[1] = band.p[1] >> 15;
    let wd1 = if band.sg[0] == band.sg[1] { 192 } else { -192 };
    let wd2 = (band.a[1] * 32640) >> 15;
    band.ap[1] = saturate(wd1 + wd2);
    let wd3 = saturate(15360 - band.ap[2]);
    if band.ap[1] > wd3 {
        band.ap[1] = wd3;
    } else if band.ap[1] < -wd3 {
        band.ap[1] = -wd3;
    }

    // UPZERO
    let wd1 = if d == 0 { 0 } else { 128 };
    band.sg[0] = d >> 15;
    for i in 1..7 {
        band.sg[i] = band.d[i] >> 15;
        let wd2 = if band.sg[i] == band.sg[0] { wd1 } else { -wd1 };
        let wd3 = (band.b[i] * 32640) >> 15;
        band.bp[i] = saturate(wd2 + wd3);
    }

    // DELAYZ / DELAYA
    for i in (1..7).rev() {
        band.d[i] = band.d[i - 1];
        band.b[i] = band.bp[i];
    }
    for i in (1..3).rev() {
        band.r[i] = band.r[i - 1];
        band.p[i] = band.p[i - 1];
        band.a[i] = band.ap[i];
    }

    // FILTEP
    let wd1 = saturate(band.r[1] + band.r[1]);
    let wd1 = (band.a[1] * wd1) >> 15;
    let wd2 = saturate(band.r[2] + band.r[2]);
    let wd2 = (band.a[2] * wd2) >> 15;
    band.sp = saturate(wd1 + wd2);

    // FILTEZ
    let mut sz = 0;
    for i in (1..7).rev() {
        let wd1 = saturate(band.d[i] + band.d[i]);
        sz += (band.b[i] * wd1) >> 15;
    }
    band.sz = saturate(sz);

    // PREDIC
    band.s = saturate(band.sp + band.sz);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_saturate() {
        assert_eq!(saturate(40000), 32767);
        assert_eq!(saturate(-40000), -32768);
        assert_eq!(saturate(1234), 1234);
    }

    #[test]
    fn test_scale_factor_limits() {
        let mut band = BandState::low();
        for _ in 0..1000 {
            adapt_low_scale(&mut band, 7);
        }
        assert_eq!(band.nb, NB_LOW_MAX);

        for _ in 0..1000 {
            adapt_low_scale(&mut band, 0);
        }
        assert_eq!(band.nb, 0);
        // SCALEL of nb=0 is ILB[0] >> 8 << 2
        assert_eq!(band.det, (2048 >> 8) << 2);

        let mut band = BandState::high();
        for _ in 0..1000 {
            adapt_high_scale(&mut band, 2);
        }
        assert_eq!(band.nb, NB_HIGH_MAX);
    }

    #[test]
    fn test_block4_zero_difference_is_stable() {
        let mut band = BandState::low();
        for _ in 0..16 {
            block4(&mut band, 0);
        }
        assert_eq!(band.s, 0);
        assert_eq!(band.sz, 0);
        assert_eq!(band.d, [0; 7]);
    }

    #[test]
    fn test_block4_tracks_difference() {
        let mut band = BandState::low();
        block4(&mut band, 1000);
        assert_eq!(band.r[1], 1000);
        assert_eq!(band.d[1], 1000);
        assert!(band.ap[1] != 0 || band.a[1] != 0);
    }
}
