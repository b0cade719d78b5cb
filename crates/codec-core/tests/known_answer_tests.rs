//! Bit-exact known-answer vectors for every configuration
//!
//! Encoded digests pin the encoder on [`common::known_answer_pcm`]; decoded
//! digests come from the reference decoder run on those codes and on
//! [`common::known_answer_codes`]. Decoded samples are hashed little-endian.

mod common;

use common::{
    all_configs, config_key, known_answer_codes, known_answer_pcm, parse_checksums,
};
use g722_codec_core::{
    ByteOrder, Capabilities, CodecSession, HostValue, OutputPreference, TypedArray,
};
use md5::{Digest, Md5};

const PCM_SAMPLES: usize = 4000;
const RANDOM_CODES: usize = 2000;

/// `{bitrate}_{samplerate} <encoded-len> <encoded-md5> <decoded-md5>`
const ENCODE_VECTORS: &str = "\
48000_8000 4000 3c2433d0250e8a5e6d95d01dcc303045 191e9e94d66a99f50e9981d87bf7343a
56000_8000 4000 5c29aa2c4cdd248f00fb1fd0d1a1eac7 a822670cbbc34d216115a3f8e5344372
64000_8000 4000 309d8a968ebea7fc0a4c6bed693a0eb6 a7a9a02c844586003b0933311bd8808b
48000_16000 2000 f610b5ddbaac3cec448d6c818f5b3f9d 87af672acf8c9c15fff7c8d63b4d60af
56000_16000 2000 a92f3421cf83050fe6d0de56819532f1 a4f24476038524e76eea1f7d60146d46
64000_16000 2000 acb12dbec3b71973fd2d9bd9d752634a a175001d98d72c002f35baca328c6445
";

/// Decoded digest of [`known_answer_codes`] per configuration
const DECODE_VECTORS: [(&str, &str); 6] = [
    ("48000_8000", "51bcf3aa9253250d8ccb06e67fec07a8"),
    ("56000_8000", "357c3447d5ff490d0fb75d0f744449d8"),
    ("64000_8000", "012a2ad48dd3eee2c761d55272dad2d0"),
    ("48000_16000", "ae51eeb7bb5d479010ed690317d76737"),
    ("56000_16000", "5dd5698598377a68b357c91befcf4f53"),
    ("64000_16000", "b564583a7e3c00a0dec1b5a88a6e490d"),
];

fn md5_hex(data: &[u8]) -> String {
    format!("{:x}", Md5::digest(data))
}

fn session(sample_rate: u32, bit_rate: u32) -> CodecSession {
    CodecSession::with_capabilities(
        sample_rate,
        bit_rate,
        OutputPreference::ForceSimple,
        Capabilities::simple_only(),
    )
    .unwrap()
}

#[test]
fn test_known_answer_signal() {
    let pcm = known_answer_pcm(PCM_SAMPLES);
    assert_eq!(&pcm[..3], &[-8397, -7626, -5967]);
    assert_eq!(pcm.iter().map(|&s| s as i64).sum::<i64>(), -23677);
}

#[test]
fn test_encode_known_answers() {
    let vectors = parse_checksums(ENCODE_VECTORS).unwrap();
    assert_eq!(vectors.len(), 6);
    let pcm = known_answer_pcm(PCM_SAMPLES);

    for (sample_rate, bit_rate) in all_configs() {
        let key = config_key(bit_rate, sample_rate);
        let entry = &vectors[&key];
        let mut session = session(sample_rate, bit_rate);

        let encoded = session.encode_samples(&pcm).unwrap();
        assert_eq!(encoded.len(), entry.encoded_len, "encoded size for {}", key);
        assert_eq!(md5_hex(&encoded), entry.encoded_md5, "encoded md5 for {}", key);

        let decoded = session.decode_bytes(&encoded);
        assert_eq!(decoded.len(), PCM_SAMPLES, "decoded size for {}", key);
        assert_eq!(
            md5_hex(&decoded.to_bytes(ByteOrder::Little)),
            entry.decoded_md5,
            "decoded md5 for {}",
            key
        );
    }
}

#[test]
fn test_encode_known_answers_from_big_endian_buffer() {
    let vectors = parse_checksums(ENCODE_VECTORS).unwrap();
    let pcm = known_answer_pcm(PCM_SAMPLES);
    let input = HostValue::from(TypedArray::from_samples(&pcm, ByteOrder::Big));

    let mut session = session(16000, 64000);
    let encoded = session.encode(&input).unwrap();
    assert_eq!(md5_hex(&encoded), vectors["64000_16000"].encoded_md5);
}

#[test]
fn test_decode_known_answers() {
    let codes = known_answer_codes(RANDOM_CODES);

    for ((sample_rate, bit_rate), (key, digest)) in all_configs().into_iter().zip(DECODE_VECTORS) {
        assert_eq!(config_key(bit_rate, sample_rate), key);
        let mut session = session(sample_rate, bit_rate);

        let decoded = session.decode_bytes(&codes);
        assert_eq!(decoded.len(), session.decoded_len(RANDOM_CODES), "decoded size for {}", key);
        assert_eq!(md5_hex(&decoded.to_bytes(ByteOrder::Little)), digest, "decoded md5 for {}", key);
    }
}

#[test]
fn test_chunked_decode_matches_known_answers() {
    let codes = known_answer_codes(RANDOM_CODES);
    let (key, digest) = DECODE_VECTORS[5];
    assert_eq!(key, "64000_16000");

    let mut session = session(16000, 64000);
    let mut out = Vec::new();
    for chunk in codes.chunks(333) {
        out.extend(session.decode_bytes(chunk).to_bytes(ByteOrder::Little));
    }
    assert_eq!(md5_hex(&out), digest);
}
