//! G.722 encoder
//!
//! Linear PCM in, one code per byte out. At 16 kHz every pair of samples
//! is split by the transmit QMF into a low and a high sub-band sample; at
//! 8 kHz each sample feeds the low band directly and the high bits of the
//! code are left set.

use crate::codecs::g722::adpcm::{adapt_high_scale, adapt_low_scale, block4, saturate};
use crate::codecs::g722::qmf::qmf_analysis;
use crate::codecs::g722::state::G722State;
use crate::codecs::g722::tables::{IHN, IHP, ILN, ILP, Q6, QM2, QM4, RH2, RL42};
use crate::types::{BitRate, SampleRate};

/// G.722 encoder owning its stream state
#[derive(Debug)]
pub struct G722Encoder {
    bit_rate: BitRate,
    sample_rate: SampleRate,
    state: G722State,
}

impl G722Encoder {
    /// Create an encoder in its initial state
    pub fn new(bit_rate: BitRate, sample_rate: SampleRate) -> Self {
        Self {
            bit_rate,
            sample_rate,
            state: G722State::new(),
        }
    }

    /// Reset the stream state
    pub fn reset(&mut self) {
        self.state.reset();
    }

    /// Current stream state
    pub fn state(&self) -> &G722State {
        &self.state
    }

    /// Number of code bytes produced for `samples` input samples
    pub fn encoded_len(&self, samples: usize) -> usize {
        samples / self.sample_rate.samples_per_code()
    }

    /// Encode `amp` and append the codes to `out`
    ///
    /// At 16 kHz the input length must be even; a trailing odd sample is
    /// ignored, so callers validate framing before calling.
    ///
    /// Returns the number of bytes appended.
    pub fn encode(&mut self, amp: &[i16], out: &mut Vec<u8>) -> usize {
        let start = out.len();
        out.reserve(self.encoded_len(amp.len()));

        match self.sample_rate {
            SampleRate::Rate8000 => {
                for &sample in amp {
                    let ilow = self.encode_low(sample as i32 >> 1);
                    out.push(self.pack(0xC0 | ilow));
                }
            }
            SampleRate::Rate16000 => {
                debug_assert!(amp.len() % 2 == 0, "odd sample count at 16 kHz");
                for pair in amp.chunks_exact(2) {
                    let (xlow, xhigh) = qmf_analysis(&mut self.state.x, pair[0], pair[1]);
                    let ilow = self.encode_low(xlow);
                    let ihigh = self.encode_high(xhigh);
                    out.push(self.pack((ihigh << 6) | ilow));
                }
            }
        }

        out.len() - start
    }

    /// Drop the low-order bits that the configured bit rate does not carry
    #[inline]
    fn pack(&self, code: i32) -> u8 {
        (code >> (8 - self.bit_rate.bits_per_code())) as u8
    }

    /// Low band: SUBTRA, QUANTL, INVQAL, LOGSCL, SCALEL, block 4
    fn encode_low(&mut self, xlow: i32) -> i32 {
        let band = &mut self.state.band[0];

        let el = saturate(xlow - band.s);
        let wd = if el >= 0 { el } else { -(el + 1) };

        let mut i = 1;
        while i < 30 {
            if wd < (Q6[i] * band.det) >> 12 {
                break;
            }
            i += 1;
        }
        let ilow = if el < 0 { ILN[i] } else { ILP[i] };

        let ril = (ilow >> 2) as usize;
        let dlow = (band.det * QM4[ril]) >> 15;

        adapt_low_scale(band, RL42[ril] as usize);
        block4(band, dlow);

        ilow
    }

    /// High band: SUBTRA, QUANTH, INVQAH, LOGSCH, SCALEH, block 4
    fn encode_high(&mut self, xhigh: i32) -> i32 {
        let band = &mut self.state.band[1];

        let eh = saturate(xhigh - band.s);
        let wd = if eh >= 0 { eh } else { -(eh + 1) };
        let mih = if wd >= (564 * band.det) >> 12 { 2 } else { 1 };
        let ihigh = if eh < 0 { IHN[mih] } else { IHP[mih] };

        let dhigh = (band.det * QM2[ihigh as usize]) >> 15;

        adapt_high_scale(band, RH2[ihigh as usize] as usize);
        block4(band, dhigh);

        ihigh
    }
}
