//! Forgiving number parsing for text model formats.
//!
//! Malformed numbers are not an error: the longest parsable prefix of the token is used
//! (`"12abc"` reads as 12, `"3.5"` as an integer reads as 3), and a token with no parsable
//! prefix, or a missing token, reads as zero.

use std::str::FromStr;

pub fn parse_or_default<T: FromStr + Default>(token: Option<&str>) -> T {
    let Some(token) = token else {
        return T::default();
    };

    if let Ok(value) = token.parse() {
        return value;
    }

    let (integer_end, float_end) = number_prefixes(token);
    [float_end, integer_end]
        .into_iter()
        .filter(|&end| end > 0)
        .find_map(|end| token[..end].parse().ok())
        .unwrap_or_default()
}

/// Byte lengths of the longest prefixes of `token` that look like an integer and like a
/// decimal floating point number, zero if there is none.
fn number_prefixes(token: &str) -> (usize, usize) {
    let bytes = token.as_bytes();
    let digits_end = |from: usize| {
        from + bytes[from..]
            .iter()
            .take_while(|b| b.is_ascii_digit())
            .count()
    };
    let is_sign = |i: usize| matches!(bytes.get(i), Some(b'+' | b'-'));

    let sign = usize::from(is_sign(0));
    let mut end = digits_end(sign);
    let integer_end = if end > sign { end } else { 0 };
    let mut has_digits = integer_end > 0;

    if bytes.get(end) == Some(&b'.') {
        let fraction_end = digits_end(end + 1);
        has_digits |= fraction_end > end + 1;
        end = fraction_end;
    }
    if !has_digits {
        return (integer_end, 0);
    }

    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let exponent_start = end + 1 + usize::from(is_sign(end + 1));
        let exponent_end = digits_end(exponent_start);
        if exponent_end > exponent_start {
            end = exponent_end;
        }
    }

    (integer_end, end)
}
