//! Codec sessions
//!
//! A [`CodecSession`] binds one encoder stream and one decoder stream to
//! a fixed sample rate, bit rate and output container. Both streams keep
//! their state across calls, so one session serves exactly one audio
//! stream in each direction.

use bytes::Bytes;
use tracing::{debug, trace};

use crate::buffer::adapter::SampleBufferAdapter;
use crate::buffer::value::HostValue;
use crate::codecs::g722::{G722Decoder, G722Encoder};
use crate::error::{CodecError, Result};
use crate::output::{DecodedSamples, OutputContainer, OutputContainerSelector, OutputPreference};
use crate::types::{BitRate, SampleRate};
use crate::utils::Capabilities;

/// Validated session parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SessionConfig {
    /// PCM sample rate
    pub sample_rate: SampleRate,
    /// Coded bit rate
    pub bit_rate: BitRate,
}

impl SessionConfig {
    /// Validate raw sample and bit rates
    ///
    /// # Errors
    ///
    /// Returns a configuration error naming the offending field.
    pub fn new(sample_rate: u32, bit_rate: u32) -> Result<Self> {
        Ok(Self {
            sample_rate: SampleRate::from_hz(sample_rate)?,
            bit_rate: BitRate::from_bps(bit_rate)?,
        })
    }

    /// Code bytes produced for `samples` input samples
    pub fn encoded_len(&self, samples: usize) -> usize {
        samples / self.sample_rate.samples_per_code()
    }

    /// Samples produced for `codes` input bytes
    pub fn decoded_len(&self, codes: usize) -> usize {
        codes * self.sample_rate.samples_per_code()
    }
}

/// An encoder/decoder pair for one audio stream
///
/// Not `Clone`: codec state belongs to exactly one stream.
#[derive(Debug)]
pub struct CodecSession {
    config: SessionConfig,
    output: OutputContainerSelector,
    adapter: SampleBufferAdapter,
    encoder: G722Encoder,
    decoder: G722Decoder,
}

impl CodecSession {
    /// Create a session against the process-wide backend capabilities
    ///
    /// # Errors
    ///
    /// - `Configuration` for an unsupported sample rate or bit rate
    /// - `RuntimeUnavailable` when accelerated output is forced but absent
    pub fn new(sample_rate: u32, bit_rate: u32, preference: OutputPreference) -> Result<Self> {
        Self::with_capabilities(sample_rate, bit_rate, preference, Capabilities::detect())
    }

    /// Create a session against explicit backend capabilities
    ///
    /// # Errors
    ///
    /// Same as [`CodecSession::new`].
    pub fn with_capabilities(
        sample_rate: u32,
        bit_rate: u32,
        preference: OutputPreference,
        capabilities: Capabilities,
    ) -> Result<Self> {
        let config = SessionConfig::new(sample_rate, bit_rate)?;
        let output = OutputContainerSelector::resolve(preference, capabilities)?;

        debug!(
            sample_rate = config.sample_rate.hz(),
            bit_rate = config.bit_rate.bps(),
            container = ?output.container(),
            "Created G.722 session"
        );

        Ok(Self {
            config,
            output,
            adapter: SampleBufferAdapter::new(capabilities),
            encoder: G722Encoder::new(config.bit_rate, config.sample_rate),
            decoder: G722Decoder::new(config.bit_rate, config.sample_rate),
        })
    }

    /// Session parameters
    pub fn config(&self) -> SessionConfig {
        self.config
    }

    /// PCM sample rate
    pub fn sample_rate(&self) -> SampleRate {
        self.config.sample_rate
    }

    /// Coded bit rate
    pub fn bit_rate(&self) -> BitRate {
        self.config.bit_rate
    }

    /// Container decoded samples are returned in
    pub fn output_container(&self) -> OutputContainer {
        self.output.container()
    }

    /// Code bytes produced for `samples` input samples
    pub fn encoded_len(&self, samples: usize) -> usize {
        self.config.encoded_len(samples)
    }

    /// Samples produced for `codes` input bytes
    pub fn decoded_len(&self, codes: usize) -> usize {
        self.config.decoded_len(codes)
    }

    /// Encode a host value holding 16-bit PCM
    ///
    /// # Errors
    ///
    /// - `TypeMismatch` / `RuntimeUnavailable` for unsupported input
    /// - `Framing` for odd byte counts, or odd sample counts at 16 kHz
    pub fn encode(&mut self, value: &HostValue) -> Result<Bytes> {
        let view = self.adapter.adapt(value)?;
        self.encode_samples(view.as_slice())
    }

    /// Encode host-order samples
    ///
    /// # Errors
    ///
    /// Returns a framing error for an odd sample count at 16 kHz; nothing
    /// is consumed in that case.
    pub fn encode_samples(&mut self, samples: &[i16]) -> Result<Bytes> {
        let per_code = self.config.sample_rate.samples_per_code();
        if samples.len() % per_code != 0 {
            return Err(CodecError::framing("samples", samples.len(), per_code));
        }

        let mut out = Vec::with_capacity(self.encoded_len(samples.len()));
        let written = self.encoder.encode(samples, &mut out);
        trace!(samples = samples.len(), bytes = written, "Encoded block");

        Ok(Bytes::from(out))
    }

    /// Decode a host value holding code bytes
    ///
    /// # Errors
    ///
    /// Returns a type mismatch unless `value` is raw bytes or an 8-bit
    /// typed array.
    pub fn decode(&mut self, value: &HostValue) -> Result<DecodedSamples> {
        let codes = self.adapter.adapt_code_bytes(value)?;
        Ok(self.decode_bytes(codes))
    }

    /// Decode code bytes
    pub fn decode_bytes(&mut self, codes: &[u8]) -> DecodedSamples {
        let mut out = Vec::with_capacity(self.decoded_len(codes.len()));
        let produced = self.decoder.decode(codes, &mut out);
        trace!(bytes = codes.len(), samples = produced, "Decoded block");

        self.output.wrap(out)
    }

    /// Return both streams to their initial state
    pub fn reset(&mut self) {
        self.encoder.reset();
        self.decoder.reset();
        debug!("Reset G.722 session");
    }
}
