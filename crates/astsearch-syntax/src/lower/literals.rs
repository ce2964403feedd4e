//! Decoding of numeric and string literals.

use std::iter::Peekable;
use std::str::Chars;

use crate::tree::Scalar;

/// A decoded string literal.
#[derive(Debug, PartialEq, Eq)]
pub(super) enum StringLiteral {
    /// A text string.
    Str(String),
    /// A bytes string.
    Bytes(Vec<u8>),
    /// A formatted string, which is kept verbatim.
    Formatted,
}

/// Canonicalises an integer, float or imaginary literal.
pub(super) fn number_scalar(text: &str) -> Scalar {
    let cleaned: String = text
        .chars()
        .filter(|c| *c != '_')
        .collect::<String>()
        .to_ascii_lowercase();
    if let Some(magnitude) = cleaned.strip_suffix('j') {
        return Scalar::Imaginary(canonical_float(magnitude));
    }
    let digits = cleaned.strip_suffix('l').unwrap_or(&cleaned);
    canonical_int(digits).map_or_else(|| Scalar::Float(canonical_float(digits)), Scalar::Int)
}

fn canonical_int(text: &str) -> Option<String> {
    let (digits, radix) = if let Some(hex) = text.strip_prefix("0x") {
        (hex, 16)
    } else if let Some(octal) = text.strip_prefix("0o") {
        (octal, 8)
    } else if let Some(binary) = text.strip_prefix("0b") {
        (binary, 2)
    } else {
        (text, 10)
    };
    if digits.is_empty() || !digits.chars().all(|c| c.is_digit(radix)) {
        return None;
    }
    let canonical = u128::from_str_radix(digits, radix).map_or_else(
        |_| {
            // Beyond u128: keep the digits, which still compare exactly.
            format!("0{}:{}", radix_prefix(radix), digits.trim_start_matches('0'))
        },
        |value| value.to_string(),
    );
    Some(canonical)
}

const fn radix_prefix(radix: u32) -> char {
    match radix {
        16 => 'x',
        8 => 'o',
        2 => 'b',
        _ => 'd',
    }
}

fn canonical_float(text: &str) -> String {
    text.parse::<f64>()
        .map_or_else(|_| text.to_owned(), |value| format!("{value:?}"))
}

/// Decodes a single string literal, prefix and quotes included.
pub(super) fn parse_string(raw: &str) -> StringLiteral {
    let quote_start = raw.find(['\'', '"']).unwrap_or(raw.len());
    let (prefix, quoted) = raw.split_at(quote_start);
    let prefix = prefix.to_ascii_lowercase();
    let body = strip_quotes(quoted);

    if prefix.contains('f') || prefix.contains('t') {
        return StringLiteral::Formatted;
    }
    let raw_mode = prefix.contains('r');
    if prefix.contains('b') {
        let bytes = if raw_mode {
            body.as_bytes().to_vec()
        } else {
            unescape(body, true)
                .into_iter()
                .map(|unit| u8::try_from(unit).unwrap_or(b'?'))
                .collect()
        };
        StringLiteral::Bytes(bytes)
    } else if raw_mode {
        StringLiteral::Str(body.to_owned())
    } else {
        StringLiteral::Str(
            unescape(body, false)
                .into_iter()
                .map(|unit| char::from_u32(unit).unwrap_or(char::REPLACEMENT_CHARACTER))
                .collect(),
        )
    }
}

fn strip_quotes(quoted: &str) -> &str {
    for delimiter in ["\"\"\"", "'''", "\"", "'"] {
        if let Some(inner) = quoted
            .strip_prefix(delimiter)
            .and_then(|rest| rest.strip_suffix(delimiter))
        {
            return inner;
        }
    }
    quoted
}

/// Resolves backslash escapes into code units: characters for text strings,
/// byte values for bytes strings.
fn unescape(body: &str, bytes: bool) -> Vec<u32> {
    let mut units = Vec::with_capacity(body.len());
    let mut chars = body.chars().peekable();
    while let Some(c) = chars.next() {
        if c != '\\' {
            units.push(u32::from(c));
            continue;
        }
        let Some(escape) = chars.next() else {
            units.push(u32::from('\\'));
            break;
        };
        let decoded = match escape {
            '\n' => None,
            '\r' => {
                chars.next_if_eq(&'\n');
                None
            }
            '\\' | '\'' | '"' => Some(u32::from(escape)),
            'a' => Some(0x07),
            'b' => Some(0x08),
            'f' => Some(0x0c),
            'n' => Some(0x0a),
            'r' => Some(0x0d),
            't' => Some(0x09),
            'v' => Some(0x0b),
            '0'..='7' => {
                let first = escape.to_digit(8).unwrap_or_default();
                let rest = take_digits(&mut chars, 8, 2);
                Some(rest.map_or(first, |(value, count)| {
                    first.saturating_mul(8_u32.saturating_pow(count)).saturating_add(value)
                }))
            }
            'x' => take_exact(&mut chars, 16, 2),
            'u' if !bytes => take_exact(&mut chars, 16, 4),
            'U' if !bytes => take_exact(&mut chars, 16, 8),
            _ => {
                units.push(u32::from('\\'));
                Some(u32::from(escape))
            }
        };
        units.extend(decoded);
    }
    units
}

/// Consumes up to `max` digits, returning their value and count.
fn take_digits(chars: &mut Peekable<Chars<'_>>, radix: u32, max: u32) -> Option<(u32, u32)> {
    let mut value = 0_u32;
    let mut count = 0_u32;
    while count < max {
        let Some(digit) = chars.peek().and_then(|c| c.to_digit(radix)) else {
            break;
        };
        chars.next();
        value = value.saturating_mul(radix).saturating_add(digit);
        count = count.saturating_add(1);
    }
    (count > 0).then_some((value, count))
}

fn take_exact(chars: &mut Peekable<Chars<'_>>, radix: u32, width: u32) -> Option<u32> {
    take_digits(chars, radix, width)
        .filter(|(_, count)| *count == width)
        .map(|(value, _)| value)
}
