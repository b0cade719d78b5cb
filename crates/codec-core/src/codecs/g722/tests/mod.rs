//! G.722 Test Modules
//!
//! Unit tests for the native encoder and decoder.

mod utils;
