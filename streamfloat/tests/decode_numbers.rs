// SPDX-License-Identifier: Apache-2.0

//! Decoding single literals through the public API.

use streamfloat::{ChunkReader, Decoder, ParseError};

fn decode_f64_at(input: &[u8]) -> (f64, usize) {
    let mut decoder = Decoder::from_slice(input);
    let mut value = f64::NAN;
    decoder.decode_f64(&mut value).unwrap();
    assert!(decoder.error().is_none());
    (value, decoder.position())
}

fn decode_f32(input: &[u8]) -> f32 {
    let mut decoder = Decoder::from_slice(input);
    let mut value = f32::NAN;
    decoder.decode_f32(&mut value).unwrap();
    value
}

macro_rules! terminator_tests {
    ($($name:ident => $byte:expr),* $(,)?) => {
        $(
            paste::paste! {
                #[test]
                fn [<test_integer_terminated_by_ $name>]() {
                    let mut input = b"1234".to_vec();
                    input.push($byte);
                    input.extend_from_slice(b"99");
                    let (value, pos) = decode_f64_at(&input);
                    assert_eq!(value, 1234.0);
                    // Cursor rests on the terminator, not past it
                    assert_eq!(pos, 4);
                }

                #[test]
                fn [<test_decimal_terminated_by_ $name>]() {
                    let mut input = b"12.5".to_vec();
                    input.push($byte);
                    let (value, pos) = decode_f64_at(&input);
                    assert_eq!(value, 12.5);
                    assert_eq!(pos, 4);
                }
            }
        )*
    };
}

terminator_tests!(
    space => b' ',
    tab => b'\t',
    newline => b'\n',
    carriage_return => b'\r',
    comma => b',',
    close_brace => b'}',
    close_bracket => b']',
);

#[test]
fn test_integer_terminated_by_end_of_input() {
    assert_eq!(decode_f64_at(b"1234"), (1234.0, 4));
    assert_eq!(decode_f64_at(b"0"), (0.0, 1));
}

#[test]
fn test_decimal_literals() {
    assert_eq!(decode_f64_at(b"3.14").0, 3.14);
    assert_eq!(decode_f64_at(b"0.5").0, 0.5);
    assert_eq!(decode_f64_at(b"100.001").0, 100.001);
    // I + F / 10^len(F)
    for (int, frac) in [(7u64, "25"), (42, "125"), (0, "001"), (98765, "4321")] {
        let input = format!("{int}.{frac}");
        let expected = format!("{int}.{frac}").parse::<f64>().unwrap();
        assert_eq!(decode_f64_at(input.as_bytes()).0, expected, "{input}");
    }
}

#[test]
fn test_exponent_literals() {
    assert_eq!(decode_f64_at(b"2e3").0, 2000.0);
    assert_eq!(decode_f64_at(b"2e-3").0, 0.002);
    assert_eq!(decode_f64_at(b"15.0e2").0, 1500.0);
    assert_eq!(decode_f64_at(b"1E+2").0, 100.0);
    assert_eq!(decode_f64_at(b"2.5e0").0, 2.5);
}

#[test]
fn test_sign_applied_once_after_scaling() {
    assert_eq!(decode_f64_at(b"-5").0, -5.0);
    assert_eq!(decode_f64_at(b"-5.5").0, -5.5);
    assert_eq!(decode_f64_at(b"-5e2").0, -500.0);
    assert_eq!(decode_f64_at(b"-5e-1").0, -0.5);
    assert_eq!(decode_f64_at(b"-0.25e1").0, -2.5);
}

#[test]
fn test_narrow_width_matches_grammar() {
    assert_eq!(decode_f32(b"3.14"), 3.14f32);
    assert_eq!(decode_f32(b"-5e2"), -500.0f32);
    assert_eq!(decode_f32(b"2e-3"), 0.002f32);
    assert_eq!(decode_f32(b"15.0e2"), 1500.0f32);
}

#[test]
fn test_null_keeps_default() {
    let mut decoder = Decoder::from_slice(b"null");
    let mut value = 0.0f64;
    assert_eq!(decoder.decode_f64(&mut value), Ok(()));
    assert_eq!(value, 0.0);
    assert!(decoder.error().is_none());

    let mut decoder = Decoder::from_slice(b"  null ");
    let mut value = -1.5f32;
    assert_eq!(decoder.decode_f32(&mut value), Ok(()));
    assert_eq!(value, -1.5);
}

#[test]
fn test_broken_null_is_fatal() {
    let mut decoder = Decoder::from_slice(b"nul");
    let mut value = 0.0f64;
    assert_eq!(
        decoder.decode_f64(&mut value),
        Err(ParseError::InvalidLiteral { offset: 3 })
    );

    let mut decoder = Decoder::from_slice(b"nuLL");
    assert_eq!(
        decoder.decode_f64(&mut value),
        Err(ParseError::InvalidLiteral { offset: 2 })
    );
}

#[test]
fn test_malformed_literals_fault_immediately() {
    let cases: &[(&[u8], usize)] = &[
        (b"1.", 2),
        (b"1.2.3", 3),
        (b"1e", 2),
        (b"1e+", 3),
        (b"1e5.0", 3),
        (b"12x", 2),
        (b"-", 1),
        (b"-x", 1),
        (b"--1", 1),
        (b"", 0),
    ];
    for &(input, offset) in cases {
        let mut decoder = Decoder::from_slice(input);
        let mut value = 0.0f64;
        assert_eq!(
            decoder.decode_f64(&mut value),
            Err(ParseError::InvalidLiteral { offset }),
            "input {:?}",
            core::str::from_utf8(input).unwrap()
        );
        assert_eq!(value, 0.0);
        assert!(decoder.error().is_none());
    }
}

#[test]
fn test_out_of_range_literals() {
    let mut value = 0.0f64;
    for input in [&b"1e400"[..], b"99999999999999999999", b"-1e309"] {
        let mut decoder = Decoder::from_slice(input);
        assert!(
            matches!(
                decoder.decode_f64(&mut value),
                Err(ParseError::NumericOverflow { .. })
            ),
            "input {:?}",
            core::str::from_utf8(input).unwrap()
        );
    }

    let mut decoder = Decoder::from_slice(b"12345678901");
    let mut narrow = 0.0f32;
    assert_eq!(
        decoder.decode_f32(&mut narrow),
        Err(ParseError::NumericOverflow { offset: 0 })
    );
}

#[test]
fn test_values_inside_structure() {
    // A caller's structural scanner consumes the brackets; the decoder only
    // sees the values between them
    let json = b"1.5, 2.25,-3]";
    let mut decoder = Decoder::new(ChunkReader::new(json, 4));
    let mut values = [0.0f64; 3];
    for value in values.iter_mut() {
        decoder.decode_f64(value).unwrap();
    }
    assert_eq!(values, [1.5, 2.25, -3.0]);
    assert_eq!(decoder.position(), json.len() - 1);
}

#[test]
fn test_wide_range_beyond_narrow_limits() {
    let tiny = streamfloat::from_slice::<f64>(b"1e-39").unwrap();
    assert!((tiny - 1e-39).abs() <= 1e-39 * f64::EPSILON, "{tiny:e}");
    assert_eq!(streamfloat::from_slice::<f64>(b"1e-100"), Ok(1e-100));
    assert_eq!(streamfloat::from_slice::<f64>(b"-1.5e308"), Ok(-1.5e308));
    assert_eq!(streamfloat::from_slice::<f64>(b"0e100"), Ok(0.0));
    assert_eq!(
        streamfloat::from_slice::<f64>(b"1e309"),
        Err(ParseError::NumericOverflow { offset: 0 })
    );
    assert_eq!(
        streamfloat::from_slice::<f32>(b"1e39"),
        Err(ParseError::NumericOverflow { offset: 0 })
    );
}

#[test]
fn test_from_slice_rejects_trailing_input() {
    assert_eq!(
        streamfloat::from_slice::<f64>(b"1 garbage"),
        Err(ParseError::InvalidLiteral { offset: 2 })
    );
    assert_eq!(
        streamfloat::from_slice::<f64>(b"1, 2"),
        Err(ParseError::InvalidLiteral { offset: 3 })
    );
    assert_eq!(streamfloat::from_slice::<f64>(b"1 ,\n"), Ok(1.0));
}

#[test]
fn test_from_slice_helper() {
    assert_eq!(streamfloat::from_slice::<f64>(b"\n-12.5e-1"), Ok(-1.25));
    assert_eq!(streamfloat::from_slice::<f32>(b"0.75"), Ok(0.75));
    assert_eq!(
        streamfloat::from_slice::<f64>(b"[1]"),
        Err(ParseError::TypeMismatch {
            expected: "f64",
            offset: 0
        })
    );
}
