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

//! The self-delimiting binary external format.
//!
//! Every value starts with its single-byte type character; the payload
//! framing is fixed per tag, so the stream needs no envelope. Strings use
//! the classic length-prefixed modified UTF-8 framing (a 16-bit byte length,
//! NUL encoded as `C0 80`, supplementary characters as surrogate pairs);
//! strings whose encoded form exceeds that length limit are written with the
//! alternate `S` type character as a 32-bit length and raw UTF-8.

use crate::error::ModelError;
use crate::expression::ValueExpression;
use crate::node::ModelNode;
use crate::property::Property;
use crate::types::ModelType;
use crate::value::ModelValue;
use bigdecimal::BigDecimal;
use indexmap::IndexMap;
use num_bigint::BigInt;
use std::io::{Read, Write};

pub(crate) fn write_value<W: Write>(value: &ModelValue, out: &mut W) -> Result<(), ModelError> {
    match value {
        ModelValue::Undefined => write_char(out, ModelType::Undefined),
        ModelValue::Boolean(b) => {
            write_char(out, ModelType::Boolean)?;
            out.write_all(&[u8::from(*b)])?;
            Ok(())
        }
        ModelValue::Int(n) => {
            write_char(out, ModelType::Int)?;
            out.write_all(&n.to_be_bytes())?;
            Ok(())
        }
        ModelValue::Long(n) => {
            write_char(out, ModelType::Long)?;
            out.write_all(&n.to_be_bytes())?;
            Ok(())
        }
        ModelValue::Double(x) => {
            write_char(out, ModelType::Double)?;
            out.write_all(&x.to_bits().to_be_bytes())?;
            Ok(())
        }
        ModelValue::BigInteger(n) => {
            write_char(out, ModelType::BigInteger)?;
            let bytes = n.to_signed_bytes_be();
            write_i32(out, bytes.len() as i32)?;
            out.write_all(&bytes)?;
            Ok(())
        }
        ModelValue::BigDecimal(d) => {
            write_char(out, ModelType::BigDecimal)?;
            let (digits, exponent) = d.as_bigint_and_exponent();
            let bytes = digits.to_signed_bytes_be();
            write_i32(out, bytes.len() as i32)?;
            out.write_all(&bytes)?;
            write_i32(out, exponent as i32)?;
            Ok(())
        }
        ModelValue::String(s) => write_string(out, s),
        ModelValue::Bytes(b) => {
            write_char(out, ModelType::Bytes)?;
            write_i32(out, b.len() as i32)?;
            out.write_all(b)?;
            Ok(())
        }
        ModelValue::Expression(e) => {
            write_char(out, ModelType::Expression)?;
            write_utf(out, e.expression_string())
        }
        ModelValue::Type(ty) => {
            write_char(out, ModelType::Type)?;
            out.write_all(&[ty.type_char() as u8])?;
            Ok(())
        }
        ModelValue::List(items) => {
            write_char(out, ModelType::List)?;
            write_i32(out, items.len() as i32)?;
            for item in items {
                write_value(item.value(), out)?;
            }
            Ok(())
        }
        ModelValue::Object(map) => {
            write_char(out, ModelType::Object)?;
            write_i32(out, map.len() as i32)?;
            for (key, child) in map {
                write_utf(out, key)?;
                write_value(child.value(), out)?;
            }
            Ok(())
        }
        ModelValue::Property(property) => {
            write_char(out, ModelType::Property)?;
            write_utf(out, property.name())?;
            write_value(property.value().value(), out)
        }
    }
}

pub(crate) fn read_value<R: Read>(input: &mut R) -> Result<ModelValue, ModelError> {
    let c = read_u8(input)? as char;
    match ModelType::from_char(c) {
        Some(ModelType::Undefined) => Ok(ModelValue::Undefined),
        Some(ModelType::Boolean) => Ok(ModelValue::Boolean(read_u8(input)? != 0)),
        Some(ModelType::Int) => {
            let mut buf = [0u8; 4];
            input.read_exact(&mut buf)?;
            Ok(ModelValue::Int(i32::from_be_bytes(buf)))
        }
        Some(ModelType::Long) => {
            let mut buf = [0u8; 8];
            input.read_exact(&mut buf)?;
            Ok(ModelValue::Long(i64::from_be_bytes(buf)))
        }
        Some(ModelType::Double) => {
            let mut buf = [0u8; 8];
            input.read_exact(&mut buf)?;
            Ok(ModelValue::Double(f64::from_bits(u64::from_be_bytes(buf))))
        }
        Some(ModelType::BigInteger) => {
            let bytes = read_block(input)?;
            Ok(ModelValue::BigInteger(BigInt::from_signed_bytes_be(&bytes)))
        }
        Some(ModelType::BigDecimal) => {
            let bytes = read_block(input)?;
            let digits = BigInt::from_signed_bytes_be(&bytes);
            let scale = read_i32(input)?;
            Ok(ModelValue::BigDecimal(BigDecimal::new(
                digits,
                i64::from(scale),
            )))
        }
        Some(ModelType::String) => {
            if c == 's' {
                Ok(ModelValue::String(read_utf(input)?))
            } else {
                let bytes = read_block(input)?;
                String::from_utf8(bytes)
                    .map(ModelValue::String)
                    .map_err(|_| ModelError::InvalidUtf)
            }
        }
        Some(ModelType::Bytes) => Ok(ModelValue::Bytes(read_block(input)?)),
        Some(ModelType::Expression) => Ok(ModelValue::Expression(ValueExpression::new(read_utf(
            input,
        )?))),
        Some(ModelType::Type) => {
            let nested = read_u8(input)? as char;
            match ModelType::from_char(nested) {
                Some(ty) => Ok(ModelValue::Type(ty)),
                None => Err(ModelError::InvalidTypeChar(nested)),
            }
        }
        Some(ModelType::List) => {
            let count = read_i32(input)?.max(0) as usize;
            let mut items = Vec::with_capacity(count.min(4096));
            for _ in 0..count {
                items.push(ModelNode::from_value(read_value(input)?));
            }
            Ok(ModelValue::List(items))
        }
        Some(ModelType::Object) => {
            let count = read_i32(input)?.max(0) as usize;
            let mut map = IndexMap::with_capacity(count.min(4096));
            for _ in 0..count {
                let key = read_utf(input)?;
                let child = ModelNode::from_value(read_value(input)?);
                map.insert(key, child);
            }
            Ok(ModelValue::Object(map))
        }
        Some(ModelType::Property) => {
            let name = read_utf(input)?;
            let child = ModelNode::from_value(read_value(input)?);
            Ok(ModelValue::Property(Property::new(name, child)))
        }
        None => Err(ModelError::InvalidTypeChar(c)),
    }
}

fn write_char<W: Write>(out: &mut W, ty: ModelType) -> Result<(), ModelError> {
    out.write_all(&[ty.type_char() as u8])?;
    Ok(())
}

fn write_i32<W: Write>(out: &mut W, value: i32) -> Result<(), ModelError> {
    out.write_all(&value.to_be_bytes())?;
    Ok(())
}

fn read_u8<R: Read>(input: &mut R) -> Result<u8, ModelError> {
    let mut buf = [0u8; 1];
    input.read_exact(&mut buf)?;
    Ok(buf[0])
}

fn read_i32<R: Read>(input: &mut R) -> Result<i32, ModelError> {
    let mut buf = [0u8; 4];
    input.read_exact(&mut buf)?;
    Ok(i32::from_be_bytes(buf))
}

fn read_block<R: Read>(input: &mut R) -> Result<Vec<u8>, ModelError> {
    let len = read_i32(input)?.max(0) as usize;
    let mut bytes = vec![0u8; len];
    input.read_exact(&mut bytes)?;
    Ok(bytes)
}

/// Write a string with its type character, choosing the classic `s` framing
/// when the modified UTF-8 image fits in 16 bits and the raw `S` framing
/// otherwise.
fn write_string<W: Write>(out: &mut W, s: &str) -> Result<(), ModelError> {
    let encoded = to_modified_utf8(s);
    if encoded.len() <= u16::MAX as usize {
        out.write_all(&[b's'])?;
        out.write_all(&(encoded.len() as u16).to_be_bytes())?;
        out.write_all(&encoded)?;
    } else {
        out.write_all(&[b'S'])?;
        write_i32(out, s.len() as i32)?;
        out.write_all(s.as_bytes())?;
    }
    Ok(())
}

fn write_utf<W: Write>(out: &mut W, s: &str) -> Result<(), ModelError> {
    let encoded = to_modified_utf8(s);
    if encoded.len() > u16::MAX as usize {
        return Err(ModelError::grammar("string too long for UTF framing"));
    }
    out.write_all(&(encoded.len() as u16).to_be_bytes())?;
    out.write_all(&encoded)?;
    Ok(())
}

fn read_utf<R: Read>(input: &mut R) -> Result<String, ModelError> {
    let mut len_buf = [0u8; 2];
    input.read_exact(&mut len_buf)?;
    let len = u16::from_be_bytes(len_buf) as usize;
    let mut bytes = vec![0u8; len];
    input.read_exact(&mut bytes)?;
    from_modified_utf8(&bytes)
}

/// Encode to modified UTF-8: NUL becomes `C0 80` and supplementary
/// characters become CESU-8 surrogate pairs.
fn to_modified_utf8(s: &str) -> Vec<u8> {
    let mut out = Vec::with_capacity(s.len());
    for c in s.chars() {
        let cp = c as u32;
        if cp == 0 {
            out.extend_from_slice(&[0xc0, 0x80]);
        } else if cp < 0x80 {
            out.push(cp as u8);
        } else if cp < 0x800 {
            out.push(0xc0 | (cp >> 6) as u8);
            out.push(0x80 | (cp & 0x3f) as u8);
        } else if cp < 0x10000 {
            out.push(0xe0 | (cp >> 12) as u8);
            out.push(0x80 | ((cp >> 6) & 0x3f) as u8);
            out.push(0x80 | (cp & 0x3f) as u8);
        } else {
            let reduced = cp - 0x10000;
            let high = 0xd800 + (reduced >> 10);
            let low = 0xdc00 + (reduced & 0x3ff);
            for unit in [high, low] {
                out.push(0xe0 | (unit >> 12) as u8);
                out.push(0x80 | ((unit >> 6) & 0x3f) as u8);
                out.push(0x80 | (unit & 0x3f) as u8);
            }
        }
    }
    out
}

fn from_modified_utf8(bytes: &[u8]) -> Result<String, ModelError> {
    let mut out = String::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        let b = bytes[i];
        let unit = if b < 0x80 {
            i += 1;
            u32::from(b)
        } else if b & 0xe0 == 0xc0 {
            if i + 1 >= bytes.len() || bytes[i + 1] & 0xc0 != 0x80 {
                return Err(ModelError::InvalidUtf);
            }
            let unit = (u32::from(b & 0x1f) << 6) | u32::from(bytes[i + 1] & 0x3f);
            i += 2;
            unit
        } else if b & 0xf0 == 0xe0 {
            if i + 2 >= bytes.len()
                || bytes[i + 1] & 0xc0 != 0x80
                || bytes[i + 2] & 0xc0 != 0x80
            {
                return Err(ModelError::InvalidUtf);
            }
            let unit = (u32::from(b & 0x0f) << 12)
                | (u32::from(bytes[i + 1] & 0x3f) << 6)
                | u32::from(bytes[i + 2] & 0x3f);
            i += 3;
            unit
        } else {
            return Err(ModelError::InvalidUtf);
        };
        if (0xd800..0xdc00).contains(&unit) {
            // High surrogate: the low half must follow as another 3-byte
            // sequence.
            if i + 2 >= bytes.len() || bytes[i] & 0xf0 != 0xe0 {
                return Err(ModelError::InvalidUtf);
            }
            let low = (u32::from(bytes[i] & 0x0f) << 12)
                | (u32::from(bytes[i + 1] & 0x3f) << 6)
                | u32::from(bytes[i + 2] & 0x3f);
            if !(0xdc00..0xe000).contains(&low) {
                return Err(ModelError::InvalidUtf);
            }
            i += 3;
            let combined = 0x10000 + ((unit - 0xd800) << 10) + (low - 0xdc00);
            match char::from_u32(combined) {
                Some(c) => out.push(c),
                None => return Err(ModelError::InvalidUtf),
            }
        } else {
            match char::from_u32(unit) {
                Some(c) => out.push(c),
                None => return Err(ModelError::InvalidUtf),
            }
        }
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn utf_round_trip(s: &str) {
        let encoded = to_modified_utf8(s);
        assert_eq!(from_modified_utf8(&encoded).unwrap(), s);
    }

    #[test]
    fn modified_utf8_round_trips() {
        utf_round_trip("");
        utf_round_trip("plain ascii");
        utf_round_trip("caf\u{e9}");
        utf_round_trip("\u{4e16}\u{754c}");
        utf_round_trip("emoji \u{1f600} pair");
        utf_round_trip("nul \u{0} inside");
    }

    #[test]
    fn nul_avoids_the_zero_byte() {
        let encoded = to_modified_utf8("\u{0}");
        assert_eq!(encoded, vec![0xc0, 0x80]);
    }

    #[test]
    fn supplementary_characters_use_surrogate_pairs() {
        let encoded = to_modified_utf8("\u{1f600}");
        assert_eq!(encoded.len(), 6);
    }

    #[test]
    fn truncated_sequences_are_rejected() {
        assert!(from_modified_utf8(&[0xc0]).is_err());
        assert!(from_modified_utf8(&[0xe0, 0x80]).is_err());
        assert!(from_modified_utf8(&[0xf0, 0x80, 0x80, 0x80]).is_err());
    }

    #[test]
    fn unknown_type_char_is_invalid_object() {
        let result = read_value(&mut &b"x"[..]);
        match result {
            Err(ModelError::InvalidTypeChar('x')) => {}
            other => panic!("unexpected result: {:?}", other),
        }
    }
}
