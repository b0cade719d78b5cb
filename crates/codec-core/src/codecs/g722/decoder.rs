//! G.722 decoder
//!
//! One code per byte in, linear PCM out: one sample per code at 8 kHz and
//! two (through the receive QMF) at 16 kHz.

use crate::codecs::g722::adpcm::{adapt_high_scale, adapt_low_scale, block4};
use crate::codecs::g722::qmf::qmf_synthesis;
use crate::codecs::g722::state::G722State;
use crate::codecs::g722::tables::{QM2, QM4, QM5, QM6, RH2, RL42};
use crate::types::{BitRate, SampleRate};

/// G.722 decoder owning its stream state
#[derive(Debug)]
pub struct G722Decoder {
    bit_rate: BitRate,
    sample_rate: SampleRate,
    state: G722State,
}

impl G722Decoder {
    /// Create a decoder in its initial state
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

    /// Number of samples produced for `codes` input bytes
    pub fn decoded_len(&self, codes: usize) -> usize {
        codes * self.sample_rate.samples_per_code()
    }

    /// Decode `data` and append the samples to `out`
    ///
    /// Returns the number of samples appended.
    pub fn decode(&mut self, data: &[u8], out: &mut Vec<i16>) -> usize {
        let start = out.len();
        out.reserve(self.decoded_len(data.len()));

        for &byte in data {
            let code = byte as i32;

            // Split the code into the low-band index used for reconstruction,
            // the 4-bit index used for adaptation, and the high-band bits
            let (wd1, ihigh, wd2) = match self.bit_rate {
                BitRate::Rate64000 => {
                    let wd1 = code & 0x3F;
                    (wd1 >> 2, (code >> 6) & 0x03, QM6[wd1 as usize])
                }
                BitRate::Rate56000 => {
                    let wd1 = code & 0x1F;
                    (wd1 >> 1, (code >> 5) & 0x03, QM5[wd1 as usize])
                }
                BitRate::Rate48000 => {
                    let wd1 = code & 0x0F;
                    (wd1, (code >> 4) & 0x03, QM4[wd1 as usize])
                }
            };

            let rlow = self.decode_low(wd1 as usize, wd2);

            match self.sample_rate {
                SampleRate::Rate8000 => out.push((rlow << 1) as i16),
                SampleRate::Rate16000 => {
                    let rhigh = self.decode_high(ihigh as usize);
                    let (sample0, sample1) = qmf_synthesis(&mut self.state.x, rlow, rhigh);
                    out.push(sample0);
                    out.push(sample1);
                }
            }
        }

        out.len() - start
    }

    /// Low band: INVQBL, RECONS, LIMIT, INVQAL, LOGSCL, SCALEL, block 4
    fn decode_low(&mut self, ril: usize, wd2: i32) -> i32 {
        let band = &mut self.state.band[0];

        let rlow = (band.s + ((band.det * wd2) >> 15)).clamp(-16384, 16383);
        let dlowt = (band.det * QM4[ril]) >> 15;

        adapt_low_scale(band, RL42[ril] as usize);
        block4(band, dlowt);

        rlow
    }

    /// High band: INVQAH, RECONS, LIMIT, LOGSCH, SCALEH, block 4
    fn decode_high(&mut self, ihigh: usize) -> i32 {
        let band = &mut self.state.band[1];

        let dhigh = (band.det * QM2[ihigh]) >> 15;
        let rhigh = (dhigh + band.s).clamp(-16384, 16383);

        adapt_high_scale(band, RH2[ihigh] as usize);
        block4(band, dhigh);

        rhigh
    }
}
