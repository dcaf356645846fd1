use chrono::{DateTime, Utc};
use wirepack::{decode, encode, Timestamp, Value};

#[test]
fn timestamp32_encodes_as_fixext4() {
    // 1970-01-02 00:00:00.000000 UTC
    let ts = Timestamp::from_parts(86_400, 0);
    let bytes = encode(&Value::Timestamp(ts)).unwrap();
    assert_eq!(bytes, vec![0xd6, 0xff, 0x00, 0x01, 0x51, 0x80]);
    assert_eq!(decode(&bytes).unwrap(), Some(Value::Timestamp(ts)));
}

#[test]
fn timestamp64_encodes_as_fixext8() {
    let ts = Timestamp::from_parts(1_700_000_000, 123_456_789);
    let bytes = encode(&Value::Timestamp(ts)).unwrap();
    assert_eq!(bytes.len(), 10);
    assert_eq!(&bytes[..2], &[0xd7, 0xff]);
    let word = u64::from_be_bytes(bytes[2..].try_into().unwrap());
    assert_eq!(word & 0x0000_0003_ffff_ffff, 1_700_000_000);
    assert_eq!(word >> 34, 123_456_789);
    assert_eq!(decode(&bytes).unwrap(), Some(Value::Timestamp(ts)));
}

#[test]
fn timestamp96_takes_ext8_with_explicit_length() {
    // Seconds needing more than 34 bits force the 12-byte form, framed as
    // ext 8 rather than any fixext marker.
    let ts = Timestamp::from_parts(1i64 << 34, 42);
    let bytes = encode(&Value::Timestamp(ts)).unwrap();
    assert_eq!(&bytes[..3], &[0xc7, 12, 0xff]);
    assert_eq!(bytes.len(), 15);
    assert_eq!(decode(&bytes).unwrap(), Some(Value::Timestamp(ts)));
}

#[test]
fn pre_epoch_timestamps_round_trip() {
    let ts = Timestamp::from_parts(-86_400, 250_000_000);
    let bytes = encode(&Value::Timestamp(ts)).unwrap();
    assert_eq!(&bytes[..3], &[0xc7, 12, 0xff]);
    assert_eq!(decode(&bytes).unwrap(), Some(Value::Timestamp(ts)));
}

#[test]
fn calendar_construction_matches_parts() {
    let dt: DateTime<Utc> = "2023-11-14T22:13:20.000000500Z".parse().unwrap();
    let ts = Timestamp::from_datetime(dt);
    assert_eq!(ts.seconds(), 1_700_000_000);
    assert_eq!(ts.nanos(), 500);

    let bytes = encode(&Value::Timestamp(ts)).unwrap();
    match decode(&bytes).unwrap() {
        Some(Value::Timestamp(decoded)) => {
            assert_eq!(decoded.datetime().unwrap(), dt);
        }
        other => panic!("expected a timestamp, got {other:?}"),
    }
}

#[test]
fn display_renders_the_calendar_form() {
    let ts = Timestamp::from_parts(86_400, 0);
    assert_eq!(ts.to_string(), "1970/01/02 00:00:00.000000+0000");
}
