//! Round-trip and minimality checks for the shortest mode, plus agreement
//! between the fast and the exact generators.

use rand::{Rng, SeedableRng};
use rand::rngs::StdRng;

use fp2dec::decoder::{FullDecoded, decode};
use fp2dec::strategy::{dragon, grisu};
use fp2dec::{Buffer32, Buffer64, MAX_SIG_DIGITS, NumberKind, Precision, convert};

fn rendered(digits: &[u8], scale: i32, negative: bool) -> String {
    let sign = if negative { "-" } else { "" };
    format!("{sign}0.{}e{scale}", std::str::from_utf8(digits).unwrap())
}

fn roundtrip64(v: f64) {
    let mut buf = Buffer64::new(NumberKind::Float);
    assert!(convert(v, Precision::Shortest, &mut buf));
    if v == 0.0 {
        assert!(buf.is_zero());
        return;
    }
    assert!(buf.count <= MAX_SIG_DIGITS, "{v:?} took {} digits", buf.count);
    assert_ne!(buf.digits()[buf.count - 1], b'0', "{v:?} has a trailing zero digit");

    let s = rendered(buf.digits(), buf.scale, buf.negative);
    let parsed: f64 = s.parse().unwrap();
    assert_eq!(parsed.to_bits(), v.to_bits(), "{v:?} -> {s} -> {parsed:?}");

    // no shorter digit sequence may round-trip
    if buf.count >= 2 {
        let shorter = format!("{:.*e}", buf.count - 2, v);
        let reparsed: f64 = shorter.parse().unwrap();
        assert_ne!(reparsed.to_bits(), v.to_bits(), "{v:?} also round-trips as {shorter}");
    }
}

fn roundtrip32(v: f32) {
    let mut buf = Buffer32::new(NumberKind::Float);
    assert!(convert(v, Precision::Shortest, &mut buf));
    if v == 0.0 {
        assert!(buf.is_zero());
        return;
    }
    let s = rendered(buf.digits(), buf.scale, buf.negative);
    let parsed: f32 = s.parse().unwrap();
    assert_eq!(parsed.to_bits(), v.to_bits(), "{v:?} -> {s} -> {parsed:?}");
    if buf.count >= 2 {
        let shorter = format!("{:.*e}", buf.count - 2, v);
        let reparsed: f32 = shorter.parse().unwrap();
        assert_ne!(reparsed.to_bits(), v.to_bits(), "{v:?} also round-trips as {shorter}");
    }
}

#[test]
fn notable_values_round_trip() {
    let values = [
        0.0,
        -0.0,
        0.1,
        1.0,
        -1.0,
        2.5,
        100.0,
        1.0e23,
        9.999999999999998,
        3.141592653589793,
        2.718281828459045,
        1.6e308,
        f64::MAX,
        f64::MIN_POSITIVE,
        5e-324,
        4.9406564584124654e-324,
        1.2345678901234567e-300,
        2.2250738585072011e-308, // the infamous slow-parsing value
    ];
    for v in values {
        roundtrip64(v);
        roundtrip64(-v);
    }
}

#[test]
fn notable_values_round_trip_f32() {
    let values = [0.0f32, 0.1, 1.0, 3.4028235e38, f32::MIN_POSITIVE, 1e-45, 3.1415927];
    for v in values {
        roundtrip32(v);
        roundtrip32(-v);
    }
}

#[test]
fn random_bit_patterns_round_trip() {
    let mut rng = StdRng::seed_from_u64(0xf64_0001);
    let mut checked = 0;
    while checked < 20_000 {
        let v = f64::from_bits(rng.gen::<u64>());
        if !v.is_finite() {
            continue;
        }
        roundtrip64(v);
        checked += 1;
    }
}

#[test]
fn random_bit_patterns_round_trip_f32() {
    let mut rng = StdRng::seed_from_u64(0xf32_0001);
    let mut checked = 0;
    while checked < 20_000 {
        let v = f32::from_bits(rng.gen::<u32>());
        if !v.is_finite() {
            continue;
        }
        roundtrip32(v);
        checked += 1;
    }
}

#[test]
fn subnormals_round_trip() {
    let mut rng = StdRng::seed_from_u64(0x5b);
    for _ in 0..2_000 {
        let v = f64::from_bits(rng.gen_range(1..1u64 << 52));
        roundtrip64(v);
    }
    for _ in 0..2_000 {
        let v = f32::from_bits(rng.gen_range(1..1u32 << 23));
        roundtrip32(v);
    }
}

fn decoded(v: f64) -> fp2dec::decoder::Decoded {
    match decode(v) {
        (_, FullDecoded::Finite(d)) => d,
        other => panic!("expected finite, got {other:?}"),
    }
}

#[test]
fn generators_agree_when_both_run() {
    let mut rng = StdRng::seed_from_u64(0xa96e_e);
    let mut fast = 0u32;
    let mut checked = 0;
    while checked < 20_000 {
        let v = f64::from_bits(rng.gen::<u64>());
        if !v.is_finite() || v == 0.0 {
            continue;
        }
        checked += 1;
        let d = decoded(v);
        let mut gbuf = [0u8; MAX_SIG_DIGITS];
        let mut dbuf = [0u8; MAX_SIG_DIGITS];
        let (dlen, dexp) = dragon::format_shortest(&d, &mut dbuf);
        if let Some((glen, gexp)) = grisu::format_shortest_opt(&d, &mut gbuf) {
            fast += 1;
            assert_eq!((&gbuf[..glen], gexp), (&dbuf[..dlen], dexp), "disagreement on {v:?}");
        }
    }
    // the fast path is supposed to carry nearly all inputs
    assert!(fast > checked * 9 / 10, "only {fast} of {checked} took the fast path");
}

#[test]
fn generators_agree_on_counted_output() {
    let mut rng = StdRng::seed_from_u64(0xc0_117ed);
    let mut checked = 0;
    while checked < 10_000 {
        let v = f64::from_bits(rng.gen::<u64>());
        if !v.is_finite() || v == 0.0 {
            continue;
        }
        checked += 1;
        let n = rng.gen_range(1..=MAX_SIG_DIGITS);
        let d = decoded(v);
        let mut gbuf = [0u8; MAX_SIG_DIGITS];
        let mut dbuf = [0u8; MAX_SIG_DIGITS];
        let (dlen, dexp) = dragon::format_exact(&d, &mut dbuf[..n], i16::MIN);
        if let Some((glen, gexp)) = grisu::format_exact_opt(&d, &mut gbuf[..n], i16::MIN) {
            assert_eq!(
                (&gbuf[..glen], gexp),
                (&dbuf[..dlen], dexp),
                "disagreement on {v:?} at {n} digits"
            );
        }
    }
}
