use extpack::msgpack::{MsgPackDecoder, MsgPackEncoder};
use extpack::{Boxed, ExtCodec, ExtError, GenericExtValue, Value};

#[derive(Debug, Clone, PartialEq)]
struct Point {
    x: i16,
    y: i16,
}

fn encode_point(p: &Point) -> Result<Vec<u8>, ExtError> {
    let mut out = p.x.to_be_bytes().to_vec();
    out.extend_from_slice(&p.y.to_be_bytes());
    Ok(out)
}

fn decode_point(payload: &[u8]) -> Result<Point, ExtError> {
    match payload {
        [a, b, c, d] => Ok(Point {
            x: i16::from_be_bytes([*a, *b]),
            y: i16::from_be_bytes([*c, *d]),
        }),
        _ => Err(ExtError::InvalidPayload {
            code: 0x40,
            reason: "point needs 4 bytes",
        }),
    }
}

#[test]
fn typed_registration_round_trip() {
    let mut codec = ExtCodec::new();
    codec.registry_mut().register_type::<Point, _, _>(0x40, encode_point, decode_point);

    let source = Value::opaque(Point { x: -3, y: 7 });
    let encoded = codec.encode(&source).unwrap();
    assert_eq!(encoded, vec![0xd6, 0x40, 0xff, 0xfd, 0x00, 0x07]);

    let Value::Opaque(decoded) = codec.decode(&encoded).unwrap() else {
        panic!("expected opaque value");
    };
    assert_eq!(decoded.downcast_ref::<Point>(), Some(&Point { x: -3, y: 7 }));
}

#[test]
fn unregistered_opaque_is_unsupported() {
    let codec = ExtCodec::new();
    assert!(matches!(
        codec.encode(&Value::opaque(Point { x: 0, y: 0 })),
        Err(ExtError::UnsupportedType(name)) if name.ends_with("Point")
    ));
}

#[test]
fn decoder_without_codec_preserves_custom_payload() {
    let mut writer_side = ExtCodec::new();
    writer_side
        .registry_mut()
        .register_type::<Point, _, _>(0x40, encode_point, decode_point);
    let reader_side = ExtCodec::new();

    let encoded = writer_side.encode(&Value::opaque(Point { x: 1, y: 2 })).unwrap();
    let passthrough = reader_side.decode(&encoded).unwrap();
    assert_eq!(
        passthrough,
        Value::Ext(GenericExtValue::new(0x40, vec![0, 1, 0, 2]))
    );
    // a relay without the codec forwards identical bytes
    let relayed = reader_side.encode(&passthrough).unwrap();
    assert_eq!(relayed, encoded);

    let Value::Opaque(point) = writer_side.decode(&relayed).unwrap() else {
        panic!("expected opaque value");
    };
    assert_eq!(point.downcast_ref::<Point>(), Some(&Point { x: 1, y: 2 }));
}

#[test]
fn closure_registration_and_catch_all_order() {
    let mut codec = ExtCodec::bare();
    codec.register_extension_type(
        0x21,
        |v| matches!(v, Value::Boxed(Boxed::String(s)) if s.starts_with("id:")),
        |v| match v {
            Value::Boxed(Boxed::String(s)) => Ok(s[3..].as_bytes().to_vec()),
            other => Err(ExtError::UnsupportedType(other.type_name())),
        },
        |payload| {
            let s = std::str::from_utf8(payload).map_err(|_| ExtError::InvalidUtf8)?;
            Ok(Value::Boxed(Boxed::String(format!("id:{s}"))))
        },
    );
    // catch-all for remaining boxed values, registered last
    codec.register_extension_type(
        0x22,
        |v| matches!(v, Value::Boxed(_)),
        |_| Ok(Vec::new()),
        |_| Ok(Value::Null),
    );

    let id = Value::Boxed(Boxed::String("id:42".into()));
    let encoded = codec.encode(&id).unwrap();
    assert_eq!(encoded, vec![0xd5, 0x21, b'4', b'2']);
    assert_eq!(codec.decode(&encoded), Ok(id));

    let other = Value::Boxed(Boxed::Bool(true));
    assert_eq!(codec.encode(&other).unwrap(), vec![0xc7, 0x00, 0x22]);
}

#[test]
fn replacing_builtin_codec() {
    let mut codec = ExtCodec::new();
    let before: Vec<u8> = codec.registry().codes().collect();
    codec.register_extension_type(
        extpack::codes::BOOLEAN,
        |v| matches!(v, Value::Boxed(Boxed::Bool(_))),
        |v| match v {
            Value::Boxed(Boxed::Bool(b)) => Ok(vec![if *b { 0xc3 } else { 0xc2 }]),
            other => Err(ExtError::UnsupportedType(other.type_name())),
        },
        extpack::packer::decode_boolean,
    );
    assert_eq!(codec.registry().codes().collect::<Vec<_>>(), before);
    let encoded = codec.encode(&Value::Boxed(Boxed::Bool(true))).unwrap();
    assert_eq!(encoded, vec![0xd4, 0x0b, 0xc3]);
    assert_eq!(codec.decode(&encoded), Ok(Value::Boxed(Boxed::Bool(true))));
}

#[test]
fn custom_type_through_host_codec() {
    let mut codec = ExtCodec::new();
    codec.registry_mut().register_type::<Point, _, _>(0x40, encode_point, decode_point);

    let value = Value::Object(vec![
        ("origin".into(), Value::opaque(Point { x: 0, y: 0 })),
        ("label".into(), Value::Str("o".into())),
    ]);
    let encoded = MsgPackEncoder::new(&codec).encode(&value).unwrap();
    let decoded = MsgPackDecoder::new(&codec).decode(&encoded).unwrap();
    let Value::Object(fields) = decoded else {
        panic!("expected object");
    };
    assert_eq!(fields[1], ("label".into(), Value::Str("o".into())));
    let Value::Opaque(origin) = &fields[0].1 else {
        panic!("expected opaque origin");
    };
    assert_eq!(origin.downcast_ref::<Point>(), Some(&Point { x: 0, y: 0 }));
}
