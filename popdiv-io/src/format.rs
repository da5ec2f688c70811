/// Significant digits of a default C++ output stream
pub const PRECISION: usize = 6;

///
/// Format a statistic the way `%g` (and a default C++ `ostream`) does with six
/// significant digits: fixed notation for exponents in `[-4, 6)`, scientific
/// notation otherwise, trailing zeros removed.
///
pub fn format_float(value: f64) -> String {
    if value.is_nan() {
        return if value.is_sign_negative() { "-nan" } else { "nan" }.to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "inf" } else { "-inf" }.to_string();
    }
    if value == 0.0 {
        return if value.is_sign_negative() { "-0" } else { "0" }.to_string();
    }

    // exponent after rounding to PRECISION significant digits
    let scientific = format!("{:.*e}", PRECISION - 1, value);
    let Some((mantissa, exponent)) = scientific.split_once('e') else {
        return scientific;
    };
    let Ok(exponent) = exponent.parse::<i32>() else {
        return scientific;
    };

    if exponent < -4 || exponent >= PRECISION as i32 {
        let sign = if exponent < 0 { '-' } else { '+' };
        format!(
            "{}e{}{:02}",
            trim_trailing_zeros(mantissa),
            sign,
            exponent.unsigned_abs()
        )
    } else {
        let decimals = (PRECISION as i32 - 1 - exponent) as usize;
        trim_trailing_zeros(&format!("{:.*}", decimals, value)).to_string()
    }
}

fn trim_trailing_zeros(number: &str) -> &str {
    if number.contains('.') {
        number.trim_end_matches('0').trim_end_matches('.')
    } else {
        number
    }
}
