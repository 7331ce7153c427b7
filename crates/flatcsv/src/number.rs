/// Format a finite f64 the way a CSV consumer expects to read it back:
/// shortest round-trip digits, never exponent notation, no trailing
/// fractional zeros, and `-0` folded into `0`.
pub(crate) fn format_canonical_f64(value: f64) -> String {
    if !value.is_finite() {
        debug_assert!(false, "format_canonical_f64 called with non-finite value");
        return String::from("NaN");
    }
    if value == 0.0 {
        return String::from("0");
    }

    let mut buf = ryu::Buffer::new();
    let raw = buf.format_finite(value);
    let (sign, magnitude) = match raw.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", raw),
    };
    let plain = match magnitude.split_once(['e', 'E']) {
        Some((mantissa, exp)) => shift_point(mantissa, exp.parse().unwrap_or(0)),
        None => magnitude.to_owned(),
    };
    format!("{}{}", sign, trim_fraction(&plain))
}

/// Moves the decimal point of `mantissa` by `exp` places, padding with zeros.
fn shift_point(mantissa: &str, exp: i32) -> String {
    let (int_part, frac_part) = mantissa.split_once('.').unwrap_or((mantissa, ""));
    let digits = [int_part, frac_part].concat();
    let point = int_part.len() as i64 + exp as i64;

    if point <= 0 {
        format!("0.{}{}", "0".repeat(point.unsigned_abs() as usize), digits)
    } else if point as usize >= digits.len() {
        let pad = point as usize - digits.len();
        format!("{}{}", digits, "0".repeat(pad))
    } else {
        let (head, tail) = digits.split_at(point as usize);
        format!("{}.{}", head, tail)
    }
}

fn trim_fraction(s: &str) -> &str {
    if s.contains('.') {
        s.trim_end_matches('0').trim_end_matches('.')
    } else {
        s
    }
}
