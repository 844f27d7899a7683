// Copyright 2015-2021 Swim Inc.
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use bigdecimal::BigDecimal;
use nom::branch::alt;
use nom::character::complete::{anychar, char, satisfy};
use nom::combinator::{map_res, opt, recognize};
use nom::multi::{many0_count, many1_count};
use nom::sequence::{delimited, pair};
use nom::IResult;
use num_bigint::BigInt;
use std::borrow::Cow;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// A classified numeric literal.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Number {
    Int(i32),
    Long(i64),
    Double(f64),
    BigInteger(BigInt),
    BigDecimal(BigDecimal),
}

fn escape(input: &str) -> IResult<&str, &str> {
    recognize(pair(char('\\'), anychar))(input)
}

/// A quoted string literal with its escapes resolved. Borrows the input when
/// no escape occurs.
pub(crate) fn string_literal(input: &str) -> IResult<&str, Cow<'_, str>> {
    map_res(
        delimited(
            char('"'),
            recognize(many0_count(alt((
                recognize(satisfy(|c| c != '\\' && c != '"')),
                escape,
            )))),
            char('"'),
        ),
        resolve_escapes,
    )(input)
}

#[derive(Debug)]
pub(crate) struct InvalidEscapes(String);

impl Display for InvalidEscapes {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "\"{}\" contains invalid escape sequences.", self.0)
    }
}

impl std::error::Error for InvalidEscapes {}

fn resolve_escapes(input: &str) -> Result<Cow<'_, str>, InvalidEscapes> {
    if input.contains('\\') {
        unescape(input).map(Cow::Owned)
    } else {
        Ok(Cow::Borrowed(input))
    }
}

/// Resolve the escape sequences of a string literal body. Supports the
/// standard single-character escapes and `\uXXXX`, including surrogate pairs
/// for characters outside the basic multilingual plane.
pub(crate) fn unescape(input: &str) -> Result<String, InvalidEscapes> {
    let mut output = String::with_capacity(input.len());
    let mut chars = input.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            output.push(c);
            continue;
        }
        match chars.next() {
            Some('"') => output.push('"'),
            Some('\\') => output.push('\\'),
            Some('/') => output.push('/'),
            Some('b') => output.push('\u{8}'),
            Some('f') => output.push('\u{c}'),
            Some('n') => output.push('\n'),
            Some('r') => output.push('\r'),
            Some('t') => output.push('\t'),
            Some('u') => {
                let unit = hex_unit(&mut chars).ok_or_else(|| InvalidEscapes(input.to_owned()))?;
                if (0xd800..0xdc00).contains(&unit) {
                    // High surrogate: a low surrogate escape must follow.
                    let low = match (chars.next(), chars.next()) {
                        (Some('\\'), Some('u')) => {
                            hex_unit(&mut chars).ok_or_else(|| InvalidEscapes(input.to_owned()))?
                        }
                        _ => return Err(InvalidEscapes(input.to_owned())),
                    };
                    if !(0xdc00..0xe000).contains(&low) {
                        return Err(InvalidEscapes(input.to_owned()));
                    }
                    let combined = 0x10000 + ((unit - 0xd800) << 10) + (low - 0xdc00);
                    match char::from_u32(combined) {
                        Some(c) => output.push(c),
                        None => return Err(InvalidEscapes(input.to_owned())),
                    }
                } else {
                    match char::from_u32(unit) {
                        Some(c) => output.push(c),
                        None => return Err(InvalidEscapes(input.to_owned())),
                    }
                }
            }
            _ => return Err(InvalidEscapes(input.to_owned())),
        }
    }
    Ok(output)
}

fn hex_unit(chars: &mut std::str::Chars<'_>) -> Option<u32> {
    let mut unit = 0u32;
    for _ in 0..4 {
        unit = unit * 16 + chars.next()?.to_digit(16)?;
    }
    Some(unit)
}

static DIGITS: [char; 16] = [
    '0', '1', '2', '3', '4', '5', '6', '7', '8', '9', 'a', 'b', 'c', 'd', 'e', 'f',
];

/// Write `s` as a quoted literal, escaping `"`, `\` and control characters.
pub(crate) fn write_quoted<W: std::fmt::Write>(out: &mut W, s: &str) -> std::fmt::Result {
    out.write_char('"')?;
    for c in s.chars() {
        match c {
            '"' => out.write_str("\\\"")?,
            '\\' => out.write_str("\\\\")?,
            '\u{8}' => out.write_str("\\b")?,
            '\u{c}' => out.write_str("\\f")?,
            '\n' => out.write_str("\\n")?,
            '\r' => out.write_str("\\r")?,
            '\t' => out.write_str("\\t")?,
            cp if cp < '\u{20}' => {
                let n = cp as usize;
                out.write_str("\\u")?;
                out.write_char(DIGITS[(n >> 12) & 0xf])?;
                out.write_char(DIGITS[(n >> 8) & 0xf])?;
                out.write_char(DIGITS[(n >> 4) & 0xf])?;
                out.write_char(DIGITS[n & 0xf])?;
            }
            _ => out.write_char(c)?,
        }
    }
    out.write_char('"')
}

/// Write an `f64` in its shortest round-trip decimal form. The output always
/// contains a `.` or an exponent, so it reads back as a DOUBLE.
pub(crate) fn write_f64<W: std::fmt::Write>(out: &mut W, x: f64) -> std::fmt::Result {
    let mut buffer = ryu::Buffer::new();
    out.write_str(buffer.format(x))
}

/// An identifier: keywords and type names in the DMR dialect.
pub(crate) fn identifier(input: &str) -> IResult<&str, &str> {
    recognize(pair(
        satisfy(|c| c.is_ascii_alphabetic() || c == '_'),
        many0_count(satisfy(|c| c.is_ascii_alphanumeric() || c == '_')),
    ))(input)
}

fn is_number_char(c: char) -> bool {
    c.is_ascii_digit() || c == '-' || c == '+' || c == '.' || c == 'e' || c == 'E'
}

/// The raw text of a numeric literal, without any suffix.
pub(crate) fn number_body(input: &str) -> IResult<&str, &str> {
    recognize(pair(
        satisfy(|c| c.is_ascii_digit() || c == '-'),
        many0_count(satisfy(is_number_char)),
    ))(input)
}

/// A numeric literal of the DMR dialect: the JSON classification plus the
/// `L` (long), `I` (big integer) and `B` (big decimal) suffixes.
pub(crate) fn dmr_number(input: &str) -> IResult<&str, Number> {
    map_res(
        pair(number_body, opt(alt((char('L'), char('I'), char('B'))))),
        |(body, suffix)| match suffix {
            Some('L') => i64::from_str(body).map(Number::Long).map_err(|_| ()),
            Some('I') => BigInt::from_str(body).map(Number::BigInteger).map_err(|_| ()),
            Some('B') => BigDecimal::from_str(body)
                .map(Number::BigDecimal)
                .map_err(|_| ()),
            _ => classify(body),
        },
    )(input)
}

/// A numeric literal of the JSON dialect.
pub(crate) fn json_number(input: &str) -> IResult<&str, Number> {
    map_res(number_body, classify)(input)
}

/// The shared widening policy: integers are INT when they fit in 32 bits,
/// LONG when they fit in 64, BIG_INTEGER beyond that; decimal literals are
/// DOUBLE unless the parse overflows to an infinity, in which case they
/// widen to BIG_DECIMAL.
fn classify(body: &str) -> Result<Number, ()> {
    if body.contains(&['.', 'e', 'E'][..]) {
        match f64::from_str(body) {
            Ok(x) if x.is_finite() => Ok(Number::Double(x)),
            _ => BigDecimal::from_str(body).map(Number::BigDecimal).map_err(|_| ()),
        }
    } else if let Ok(n) = i32::from_str(body) {
        Ok(Number::Int(n))
    } else if let Ok(n) = i64::from_str(body) {
        Ok(Number::Long(n))
    } else {
        BigInt::from_str(body).map(Number::BigInteger).map_err(|_| ())
    }
}

/// A hex (`0xNN`) or decimal byte inside a `bytes { ... }` literal. Decimal
/// bytes accept the signed range, so `-1` and `255` name the same byte.
pub(crate) fn byte_literal(input: &str) -> IResult<&str, u8> {
    alt((
        map_res(
            recognize(pair(
                pair(char('0'), alt((char('x'), char('X')))),
                many1_count(satisfy(|c| c.is_ascii_hexdigit())),
            )),
            |hex: &str| u8::from_str_radix(&hex[2..], 16),
        ),
        map_res(
            recognize(pair(
                opt(char('-')),
                many1_count(satisfy(|c| c.is_ascii_digit())),
            )),
            |dec: &str| {
                i16::from_str(dec)
                    .ok()
                    .filter(|n| (-128..=255).contains(n))
                    .map(|n| n as u8)
                    .ok_or(())
            },
        ),
    ))(input)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ok<T: PartialEq + std::fmt::Debug>(result: IResult<&str, T>, rest: &str, expected: T) {
        match result {
            Ok((rem, value)) => {
                assert_eq!(rem, rest);
                assert_eq!(value, expected);
            }
            Err(e) => panic!("unexpected failure: {:?}", e),
        }
    }

    #[test]
    fn parse_empty_string_lit() {
        ok(string_literal(r#""""#), "", Cow::Borrowed(""));
    }

    #[test]
    fn parse_simple_string_lit() {
        ok(string_literal(r#""two words!" "#), " ", Cow::Borrowed("two words!"));
    }

    #[test]
    fn parse_escaped_string_lit() {
        ok(
            string_literal(r#""two\nlines!""#),
            "",
            Cow::Owned::<str>("two\nlines!".to_owned()),
        );
        ok(
            string_literal(r#""quote \" slash \\ tab \t""#),
            "",
            Cow::Owned::<str>("quote \" slash \\ tab \t".to_owned()),
        );
    }

    #[test]
    fn parse_unicode_escapes() {
        ok(
            string_literal(r#""A\u00e9""#),
            "",
            Cow::Owned::<str>("A\u{e9}".to_owned()),
        );
        // A surrogate pair combines into one supplementary character.
        ok(
            string_literal(r#""\ud83d\ude00""#),
            "",
            Cow::Owned::<str>("\u{1f600}".to_owned()),
        );
    }

    #[test]
    fn invalid_escape_is_rejected() {
        assert!(string_literal(r#""\q""#).is_err());
        assert!(string_literal(r#""\ud83d""#).is_err());
    }

    #[test]
    fn parse_int_literals() {
        ok(dmr_number("0,"), ",", Number::Int(0));
        ok(dmr_number("-17]"), "]", Number::Int(-17));
        ok(dmr_number("2147483647"), "", Number::Int(i32::MAX));
    }

    #[test]
    fn integers_widen_by_magnitude() {
        ok(dmr_number("2147483648"), "", Number::Long(2147483648));
        ok(
            dmr_number("-9223372036854775808"),
            "",
            Number::Long(i64::MIN),
        );
        ok(
            dmr_number("170141183460469231731687303715884105728"),
            "",
            Number::BigInteger(
                BigInt::from_str("170141183460469231731687303715884105728").unwrap(),
            ),
        );
    }

    #[test]
    fn suffixes_force_the_type() {
        ok(dmr_number("5L"), "", Number::Long(5));
        ok(dmr_number("5I"), "", Number::BigInteger(BigInt::from(5)));
        ok(
            dmr_number("5.5B"),
            "",
            Number::BigDecimal(BigDecimal::from_str("5.5").unwrap()),
        );
    }

    #[test]
    fn decimals_are_doubles() {
        ok(dmr_number("5.0"), "", Number::Double(5.0));
        ok(dmr_number("-2.5e10"), "", Number::Double(-2.5e10));
        ok(dmr_number("1e3,"), ",", Number::Double(1000.0));
    }

    #[test]
    fn overflowing_decimal_widens() {
        match dmr_number("1e999") {
            Ok(("", Number::BigDecimal(_))) => {}
            other => panic!("expected a big decimal, got {:?}", other),
        }
    }

    #[test]
    fn json_numbers_have_no_suffixes() {
        ok(json_number("5L"), "L", Number::Int(5));
    }

    #[test]
    fn byte_literals() {
        ok(byte_literal("0xde,"), ",", 0xde);
        ok(byte_literal("0x00"), "", 0);
        ok(byte_literal("255"), "", 255);
        ok(byte_literal("-1"), "", 0xff);
    }

    #[test]
    fn identifiers() {
        ok(identifier("undefined "), " ", "undefined");
        ok(identifier("BIG_INTEGER,"), ",", "BIG_INTEGER");
        assert!(identifier("1abc").is_err());
    }
}
