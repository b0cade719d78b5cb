//! Property tests for the adapter and session

use g722_codec_core::{
    ByteOrder, Capabilities, CodecSession, HostValue, OutputPreference, TypedArray,
};
use proptest::prelude::*;

fn session(sample_rate: u32, bit_rate: u32) -> CodecSession {
    CodecSession::with_capabilities(
        sample_rate,
        bit_rate,
        OutputPreference::ForceSimple,
        Capabilities::simple_only(),
    )
    .unwrap()
}

fn config() -> impl Strategy<Value = (u32, u32)> {
    (
        prop_oneof![Just(8000u32), Just(16000u32)],
        prop_oneof![Just(48000u32), Just(56000u32), Just(64000u32)],
    )
}

fn order() -> impl Strategy<Value = ByteOrder> {
    prop_oneof![
        Just(ByteOrder::Native),
        Just(ByteOrder::Little),
        Just(ByteOrder::Big)
    ]
}

proptest! {
    #[test]
    fn prop_length_mapping((sample_rate, bit_rate) in config(), pairs in 0usize..400) {
        let pcm = vec![0i16; pairs * 2];
        let mut session = session(sample_rate, bit_rate);
        let encoded = session.encode_samples(&pcm).unwrap();
        let per_code = if sample_rate == 8000 { 1 } else { 2 };
        prop_assert_eq!(encoded.len(), pcm.len() / per_code);
        prop_assert_eq!(session.decode_bytes(&encoded).len(), pcm.len());
    }

    #[test]
    fn prop_typed_array_order_is_transparent(
        (sample_rate, bit_rate) in config(),
        pcm in prop::collection::vec(any::<i16>(), 0..200).prop_map(|mut v| { v.truncate(v.len() & !1); v }),
        order in order(),
    ) {
        let reference = session(sample_rate, bit_rate).encode_samples(&pcm).unwrap();
        let input = HostValue::from(TypedArray::from_samples(&pcm, order));
        prop_assert_eq!(session(sample_rate, bit_rate).encode(&input).unwrap(), reference);
    }

    #[test]
    fn prop_sequence_matches_samples(pcm in prop::collection::vec(any::<i16>(), 0..200)) {
        let reference = session(8000, 64000).encode_samples(&pcm).unwrap();
        let input = HostValue::sequence(pcm.iter().copied());
        prop_assert_eq!(session(8000, 64000).encode(&input).unwrap(), reference);
    }

    #[test]
    fn prop_out_of_range_rejected(value in prop_oneof![i64::MIN..-32768i64, 32768i64..i64::MAX]) {
        let input = HostValue::Sequence(vec![HostValue::Int(value), HostValue::Int(0)]);
        prop_assert!(session(16000, 64000).encode(&input).is_err());
    }
}
