//! # G722-Codec-Core: G.722 Binding Layer
//!
//! Exposes a G.722 speech codec (14-bit linear PCM packed into 16-bit
//! words, 48/56/64 kbit/s, 8 kHz or 16 kHz) to a dynamically-typed host
//! value model.
//!
//! ## Features
//!
//! - **Sessions**: an encoder and a decoder stream with fixed parameters
//! - **Input adaptation**: raw bytes, typed arrays in any byte order,
//!   `ndarray` arrays and generic integer sequences
//! - **Output selection**: simple typed arrays or `ndarray` arrays,
//!   resolved once per session
//!
//! ## Usage
//!
//! ```rust
//! use g722_codec_core::{CodecSession, HostValue, OutputPreference};
//!
//! let mut session = CodecSession::new(16000, 64000, OutputPreference::ForceSimple)?;
//!
//! // 20ms at 16kHz
//! let pcm = HostValue::sequence(vec![0i16; 320]);
//! let encoded = session.encode(&pcm)?;
//! assert_eq!(encoded.len(), 160);
//!
//! let decoded = session.decode(&HostValue::Bytes(encoded))?;
//! assert_eq!(decoded.len(), 320);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ## Feature Flags
//!
//! - `ndarray`: accelerated containers (enabled by default); can also be
//!   switched off at run time with `LIBG722_DISABLE_ACCEL=1`

#![warn(missing_docs)]
#![allow(clippy::module_name_repetitions)]

pub mod buffer;
pub mod codecs;
pub mod error;
pub mod output;
pub mod session;
pub mod types;
pub mod utils;

// Re-export commonly used types
#[cfg(feature = "ndarray")]
pub use buffer::AcceleratedArray;
pub use buffer::{
    ElementType, EndianNormalizer, HostValue, Representation, SampleBufferAdapter, SampleView,
    TypedArray,
};
pub use error::{CodecError, ErrorCategory, Result};
pub use output::{DecodedSamples, OutputContainer, OutputContainerSelector, OutputPreference};
pub use session::{CodecSession, SessionConfig};
pub use types::{BitRate, ByteOrder, SampleRate};
pub use utils::Capabilities;

/// Version information for the codec library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Name the extension module was built under
///
/// Debug artifacts are compiled with `--cfg g722_debug_mod`.
pub const MODULE_NAME: &str = if cfg!(g722_debug_mod) {
    "g722_debug"
} else {
    "g722"
};

/// Initialize the codec library
///
/// Safe to call multiple times.
///
/// # Errors
///
/// Currently infallible; kept fallible for parity with other init hooks.
pub fn init() -> Result<()> {
    // Initialize logging if not already done
    let _ = tracing_subscriber::fmt::try_init();

    utils::accel::init_capabilities();

    tracing::info!("{} v{} initialized", MODULE_NAME, VERSION);
    tracing::info!("Accelerated backend: {}", Capabilities::detect().accelerated);

    Ok(())
}

/// Get library information
pub fn info() -> LibraryInfo {
    LibraryInfo {
        version: VERSION,
        module_name: MODULE_NAME,
        sample_rates: SampleRate::ALL.iter().map(|r| r.hz()).collect(),
        bit_rates: BitRate::ALL.iter().map(|b| b.bps()).collect(),
        capabilities: Capabilities::detect(),
    }
}

/// Library information structure
#[derive(Debug, Clone)]
pub struct LibraryInfo {
    /// Library version
    pub version: &'static str,
    /// Extension module name
    pub module_name: &'static str,
    /// Supported sample rates in Hz
    pub sample_rates: Vec<u32>,
    /// Supported bit rates in bit/s
    pub bit_rates: Vec<u32>,
    /// Backend capabilities of this process
    pub capabilities: Capabilities,
}
