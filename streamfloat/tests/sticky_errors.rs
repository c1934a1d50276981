// SPDX-License-Identifier: Apache-2.0

use streamfloat::{ChunkReader, Decoder, ParseError};

use test_log::test;

#[test]
fn test_mismatch_does_not_fail_the_call() {
    let mut decoder = Decoder::from_slice(b"true 8");
    let mut value = 1.25f64;
    assert_eq!(decoder.decode_f64(&mut value), Ok(()));
    // Destination untouched, cursor past the skipped token
    assert_eq!(value, 1.25);
    assert_eq!(decoder.position(), 4);
    assert_eq!(
        decoder.error(),
        Some(&ParseError::TypeMismatch {
            expected: "f64",
            offset: 0
        })
    );

    decoder.decode_f64(&mut value).unwrap();
    assert_eq!(value, 8.0);
}

#[test]
fn test_first_mismatch_wins() {
    let input = br#"{"a": 1}, "text", false, [1, 2], 9.5"#;
    let mut decoder = Decoder::new(ChunkReader::new(input, 2));
    let mut values = [-1.0f32; 5];
    for value in values.iter_mut() {
        decoder.decode_f32(value).unwrap();
    }
    assert_eq!(values, [-1.0, -1.0, -1.0, -1.0, 9.5]);
    assert_eq!(
        decoder.check(),
        Err(ParseError::TypeMismatch {
            expected: "f32",
            offset: 0
        })
    );
}

#[test]
fn test_sticky_error_survives_later_faults() {
    let mut decoder = Decoder::from_slice(b"false 1..2");
    let mut value = 0.0f64;
    decoder.decode_f64(&mut value).unwrap();
    assert_eq!(
        decoder.decode_f64(&mut value),
        Err(ParseError::InvalidLiteral { offset: 8 })
    );
    assert_eq!(
        decoder.error(),
        Some(&ParseError::TypeMismatch {
            expected: "f64",
            offset: 0
        })
    );
}

#[test]
fn test_fatal_errors_are_not_sticky() {
    let mut decoder = Decoder::from_slice(b"1e999");
    let mut value = 0.0f64;
    assert_eq!(
        decoder.decode_f64(&mut value),
        Err(ParseError::NumericOverflow { offset: 0 })
    );
    assert!(decoder.error().is_none());
    assert_eq!(decoder.check(), Ok(()));
}

#[test]
fn test_unskippable_value_is_fatal() {
    // The mismatch is still recorded before the skip fails
    let mut decoder = Decoder::from_slice(b"[1, 2");
    let mut value = 0.0f64;
    assert_eq!(
        decoder.decode_f64(&mut value),
        Err(ParseError::InvalidLiteral { offset: 5 })
    );
    assert!(decoder.error().is_some());

    let mut decoder = Decoder::from_slice(b"@");
    assert_eq!(
        decoder.decode_f64(&mut value),
        Err(ParseError::InvalidLiteral { offset: 0 })
    );
}

#[test]
fn test_error_display() {
    let error = ParseError::TypeMismatch {
        expected: "f64",
        offset: 12,
    };
    let message = error.to_string();
    assert!(message.contains("f64"), "{message}");
    assert!(message.contains("12"), "{message}");
}
