//! Counted-mode output checked against the standard library formatter,
//! which rounds the same way (to nearest, ties to even).

use rand::{Rng, SeedableRng};
use rand::rngs::StdRng;

use fp2dec::{Buffer64, NumberKind, Precision, convert};

fn check_significant(v: f64, n: usize) {
    let mut buf = Buffer64::new(NumberKind::Float);
    assert!(convert(v, Precision::Significant(n), &mut buf));
    assert_eq!(buf.count, n, "{v:?} at {n} significant digits");

    let digits = std::str::from_utf8(buf.digits()).unwrap();
    let sign = if buf.negative { "-" } else { "" };
    let ours = if n == 1 {
        format!("{sign}{digits}e{}", buf.scale - 1)
    } else {
        format!("{sign}{}.{}e{}", &digits[..1], &digits[1..], buf.scale - 1)
    };
    let expected = format!("{:.*e}", n - 1, v);
    assert_eq!(ours, expected, "{v:?} at {n} significant digits");
}

// value = 0.d1..dcount * 10^scale rendered with exactly `frac` digits
// after the decimal point
fn render_fixed(buf: &Buffer64, frac: usize) -> String {
    let digits = std::str::from_utf8(buf.digits()).unwrap();
    let mut int_part = String::new();
    let mut frac_part = String::new();
    if buf.scale <= 0 {
        int_part.push('0');
        for _ in 0..(-buf.scale) as usize {
            frac_part.push('0');
        }
        frac_part.push_str(digits);
    } else {
        let split = buf.scale as usize;
        if digits.len() >= split {
            int_part.push_str(&digits[..split]);
            frac_part.push_str(&digits[split..]);
        } else {
            int_part.push_str(digits);
            for _ in 0..split - digits.len() {
                int_part.push('0');
            }
        }
    }
    assert!(frac_part.len() <= frac, "digits below the requested place");
    while frac_part.len() < frac {
        frac_part.push('0');
    }
    let sign = if buf.negative { "-" } else { "" };
    if frac == 0 { format!("{sign}{int_part}") } else { format!("{sign}{int_part}.{frac_part}") }
}

fn check_fractional(v: f64, n: usize) {
    let mut buf = Buffer64::new(NumberKind::Float);
    assert!(convert(v, Precision::Fractional(n), &mut buf));
    let ours = render_fixed(&buf, n);
    let expected = format!("{:.*}", n, v);
    assert_eq!(ours, expected, "{v:?} at {n} fractional digits");
}

#[test]
fn significant_notable_values() {
    check_significant(1.0, 1);
    check_significant(1.0, 3);
    check_significant(1.0, 17);
    check_significant(0.1, 10);
    check_significant(9.999999999999998, 1);
    check_significant(9.999999999999998, 16);
    check_significant(0.9996, 3);
    check_significant(0.125, 4);
    check_significant(3.141592653589793, 4);
    check_significant(-2.5, 2);
    check_significant(f64::MAX, 5);
    check_significant(f64::MIN_POSITIVE, 8);
    check_significant(5e-324, 3);
    check_significant(1.0e23, 17);
}

#[test]
fn fractional_notable_values() {
    check_fractional(0.125, 2);
    check_fractional(0.375, 2);
    check_fractional(0.875, 2);
    check_fractional(0.06, 1);
    check_fractional(0.04, 1);
    check_fractional(9.7, 0);
    check_fractional(0.5, 0);
    check_fractional(1.5, 0);
    check_fractional(2.5, 0);
    check_fractional(-0.001, 1);
    check_fractional(1234.5678, 3);
    check_fractional(0.1, 20);
    check_fractional(-0.0, 2);
}

#[test]
fn significant_random_sweep() {
    let mut rng = StdRng::seed_from_u64(0x51);
    let mut checked = 0;
    while checked < 10_000 {
        let v = f64::from_bits(rng.gen::<u64>());
        if !v.is_finite() || v == 0.0 {
            continue;
        }
        checked += 1;
        check_significant(v, rng.gen_range(1..=17));
    }
}

#[test]
fn fractional_random_sweep() {
    let mut rng = StdRng::seed_from_u64(0xf7);
    let mut checked = 0;
    while checked < 10_000 {
        // keep the magnitudes moderate so the rendered strings stay short
        let v = (rng.gen::<f64>() - 0.5) * rng.gen_range(1e-6..1e9);
        if v == 0.0 {
            continue;
        }
        checked += 1;
        check_fractional(v, rng.gen_range(0..=12));
    }
}

#[test]
fn zero_significant_digits_are_clamped_to_one() {
    let mut buf = Buffer64::new(NumberKind::Float);
    assert!(convert(2.5, Precision::Significant(0), &mut buf));
    assert_eq!(buf.digits(), b"2");
    assert_eq!(buf.scale, 1);
}
