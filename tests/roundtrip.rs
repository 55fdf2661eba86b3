use bytes::Bytes;
use jksn::prelude::*;
use proptest::prelude::*;

/// arbitrary finite-float, NaN-free value tree for use with proptest
fn arb_value() -> impl Strategy<Value = Value> {
    let leaf = prop_oneof![
        Just(Value::Undefined),
        Just(Value::Null),
        Just(Value::Unspecified),
        any::<bool>().prop_map(Value::from),
        any::<i8>().prop_map(Value::from),
        any::<i64>().prop_map(Value::from),
        any::<f32>()
            .prop_filter("finite", |f| f.is_finite())
            .prop_map(Value::from),
        any::<f64>()
            .prop_filter("finite", |f| f.is_finite())
            .prop_map(Value::from),
        ".*".prop_map(|s: String| Value::from(s)),
        proptest::collection::vec(any::<u8>(), 0..32).prop_map(|b| Value::Blob(Bytes::from(b))),
    ];
    leaf.prop_recursive(4, 48, 8, |inner| {
        prop_oneof![
            proptest::collection::vec(inner.clone(), 0..8).prop_map(Value::from),
            proptest::collection::vec((inner.clone(), inner), 0..8).prop_map(|pairs| {
                Value::Object(pairs.into_iter().collect())
            }),
        ]
    })
}

proptest! {
    #![proptest_config(ProptestConfig { cases: 512, ..ProptestConfig::default() })]

    #[test]
    fn encode_decode(value in arb_value()) {
        let enc = encode_full(&value, false);
        let dec = decode_full(enc.as_slice(), false).unwrap();
        prop_assert_eq!(dec, value);
    }

    #[test]
    fn encode_decode_with_header(value in arb_value()) {
        let enc = encode_full(&value, true);
        let dec = decode_full(enc.as_slice(), true).unwrap();
        prop_assert_eq!(dec, value);
    }

    #[test]
    fn shared_instance_streams(values in proptest::collection::vec(arb_value(), 1..6)) {
        let mut enc = Encoder::new();
        let mut stream = Vec::new();
        for value in &values {
            enc.encode_into(value, &mut stream, false);
        }

        let mut dec = Decoder::new();
        let mut buf = stream.as_slice();
        for value in &values {
            let back = dec.decode(&mut buf, false).unwrap();
            prop_assert_eq!(&back, value);
        }
        prop_assert!(buf.is_empty());
    }
}

fn round_trip(value: &Value) -> Value {
    let enc = encode_full(value, false);
    decode_full(enc.as_slice(), false).unwrap()
}

#[test]
fn cross_class_references_resolve_by_class() {
    // a blob reference lands before any text occupies the slot
    let value = Value::from(vec![
        Value::Blob(Bytes::from_static(b"xyz")),
        Value::Blob(Bytes::from_static(b"xyz")),
        Value::from("xyz"),
        Value::from("xyz"),
    ]);
    assert_eq!(round_trip(&value), value);
}

#[test]
fn shadowed_blob_slot_falls_back_to_full_record() {
    // the text cache owns the slot, so the repeated blob may not shrink
    let value = Value::from(vec![
        Value::from("xyz"),
        Value::Blob(Bytes::from_static(b"xyz")),
        Value::Blob(Bytes::from_static(b"xyz")),
    ]);
    let enc = encode_full(&value, false);
    assert_eq!(
        enc,
        vec![
            0x83, // three elements
            0x43, 0x78, 0x79, 0x7a, // "xyz"
            0x53, 0x78, 0x79, 0x7a, // blob xyz
            0x53, 0x78, 0x79, 0x7a, // blob xyz again, reference suppressed
        ]
    );
    assert_eq!(round_trip(&value), value);
}

#[test]
fn utf16_strings_dedup_and_round_trip() {
    let value = Value::from(vec!["中文字", "中文字"]);
    let enc = encode_full(&value, false);
    // second occurrence is a 2-byte reference
    assert_eq!(enc.len(), 1 + (1 + 6) + 2);
    assert_eq!(round_trip(&value), value);
}

#[test]
fn lone_surrogate_bytes_survive() {
    let value = Value::Str(Bytes::from_static(&[0xed, 0xa0, 0x80]));
    assert_eq!(round_trip(&value), value);
}

#[test]
fn wide_tables_swap_and_reconstruct() {
    let rows: Vec<Value> = (0..20)
        .map(|i| {
            let mut pairs = vec![
                (Value::from("id"), Value::from(i as i64)),
                (Value::from("score"), Value::from(i as i64 * 3)),
            ];
            if i % 2 == 0 {
                pairs.push((Value::from("flag"), Value::from(true)));
            }
            Value::Object(pairs.into_iter().collect())
        })
        .collect();
    let value = Value::from(rows);

    let enc = encode_full(&value, false);
    // the shared keys make the swapped form the smaller one
    assert_eq!(enc[0] & 0xf0, 0xa0);
    assert_eq!(decode_full(enc.as_slice(), false).unwrap(), value);
}

#[test]
fn extreme_integers() {
    for n in [
        0i64,
        10,
        11,
        -1,
        127,
        128,
        -128,
        -129,
        32767,
        32768,
        -32768,
        -32769,
        0x001f_ffff,
        0x0020_0000,
        0x7fff_ffff,
        0x8000_0000,
        -0x0020_0000,
        -0x8000_0000,
        -0x8000_0001,
        i64::MAX,
        i64::MIN,
    ] {
        let value = Value::from(n);
        assert_eq!(round_trip(&value), value, "failed for {}", n);
    }
}

#[test]
fn delta_chains_round_trip() {
    let value = Value::from(vec![
        1_000_000i64,
        1_000_001,
        999_999,
        -1_000_000,
        0,
        i64::MAX,
        i64::MIN,
        -1,
    ]);
    assert_eq!(round_trip(&value), value);
}
