//! G.722 Wideband Audio Codec Implementation
//!
//! The signal-processing collaborator behind [`crate::session::CodecSession`]:
//! sub-band ADPCM with a 24-tap QMF, 48/56/64 kbit/s, 8 kHz or 16 kHz
//! linear PCM, one code per byte.
//!
//! # Architecture
//!
//! - `encoder` / `decoder`: the two stream directions, each owning a state
//! - `qmf`: QMF analysis and synthesis filters
//! - `adpcm`: scale-factor adaptation and the shared predictor update
//! - `tables`: quantization tables and constants
//! - `state`: per-band and per-stream state

pub mod adpcm;
pub mod decoder;
pub mod encoder;
pub mod qmf;
pub mod state;
pub mod tables;

#[cfg(test)]
mod tests;

pub use decoder::G722Decoder;
pub use encoder::G722Encoder;
pub use state::{BandState, G722State};
