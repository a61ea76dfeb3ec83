use extpack::{ExtCodec, GenericExtValue, Value};
use proptest::prelude::*;

fn unregistered_code() -> impl Strategy<Value = u8> {
    prop_oneof![Just(0u8), 32u8..=255]
}

proptest! {
    #[test]
    fn generic_frames_round_trip_byte_exact(
        code in unregistered_code(),
        payload in prop::collection::vec(any::<u8>(), 0..600),
    ) {
        let codec = ExtCodec::new();
        let source = codec.encode(&Value::Ext(GenericExtValue::new(code, payload.clone()))).unwrap();
        let decoded = codec.decode(&source).unwrap();
        prop_assert_eq!(&decoded, &Value::Ext(GenericExtValue::new(code, payload)));
        prop_assert_eq!(codec.encode(&decoded).unwrap(), source);
    }

    #[test]
    fn header_size_matches_size_class(len in 0usize..70_000) {
        let codec = ExtCodec::bare();
        let encoded = codec.encode(&Value::Ext(GenericExtValue::new(0x7f, vec![0u8; len]))).unwrap();
        let header = encoded.len() - len;
        let expected = match len {
            1 | 2 | 4 | 8 | 16 => 2,
            0..=0xff => 3,
            0x100..=0xffff => 4,
            _ => 6,
        };
        prop_assert_eq!(header, expected);
    }

    #[test]
    fn boxed_numbers_round_trip(n in any::<f64>().prop_filter("not NaN", |n| !n.is_nan())) {
        let codec = ExtCodec::new();
        let value = Value::Boxed(extpack::Boxed::Number(n));
        prop_assert_eq!(codec.decode(&codec.encode(&value).unwrap()).unwrap(), value);
    }

    #[test]
    fn error_messages_round_trip(message in ".*") {
        let codec = ExtCodec::new();
        let value = Value::Error(extpack::ErrorValue::new(extpack::ErrorKind::RangeError, message));
        prop_assert_eq!(codec.decode(&codec.encode(&value).unwrap()).unwrap(), value);
    }
}
