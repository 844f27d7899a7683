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

use crate::base64;
use crate::error::{ConversionError, ExpressionError, ModelError};
use crate::expression::{Environment, ValueExpression};
use crate::node::ModelNode;
use crate::property::Property;
use crate::stream::{json, tokens, ModelWriter};
use crate::types::ModelType;
use bigdecimal::BigDecimal;
use indexmap::IndexMap;
use num_bigint::BigInt;
use num_traits::{Pow, Signed, ToPrimitive, Zero};
use std::fmt::Write;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

/// The payload of a node: one variant per model type.
#[derive(Clone, Debug)]
pub(crate) enum ModelValue {
    Undefined,
    Boolean(bool),
    Int(i32),
    Long(i64),
    Double(f64),
    BigInteger(BigInt),
    BigDecimal(BigDecimal),
    String(String),
    Bytes(Vec<u8>),
    Expression(ValueExpression),
    Type(ModelType),
    List(Vec<ModelNode>),
    Object(IndexMap<String, ModelNode>),
    Property(Property),
}

impl ModelValue {
    pub(crate) fn model_type(&self) -> ModelType {
        match self {
            ModelValue::Undefined => ModelType::Undefined,
            ModelValue::Boolean(_) => ModelType::Boolean,
            ModelValue::Int(_) => ModelType::Int,
            ModelValue::Long(_) => ModelType::Long,
            ModelValue::Double(_) => ModelType::Double,
            ModelValue::BigInteger(_) => ModelType::BigInteger,
            ModelValue::BigDecimal(_) => ModelType::BigDecimal,
            ModelValue::String(_) => ModelType::String,
            ModelValue::Bytes(_) => ModelType::Bytes,
            ModelValue::Expression(_) => ModelType::Expression,
            ModelValue::Type(_) => ModelType::Type,
            ModelValue::List(_) => ModelType::List,
            ModelValue::Object(_) => ModelType::Object,
            ModelValue::Property(_) => ModelType::Property,
        }
    }

    /// Propagate protection to every reachable child.
    pub(crate) fn protect_children(&mut self) {
        match self {
            ModelValue::List(items) => {
                for item in items {
                    item.protect();
                }
            }
            ModelValue::Object(map) => {
                for (_, child) in map.iter_mut() {
                    child.protect();
                }
            }
            ModelValue::Property(property) => property.value_mut().protect(),
            _ => {}
        }
    }

    /// A deep copy in which every EXPRESSION payload has been substituted.
    pub(crate) fn resolve<E: Environment + ?Sized>(
        &self,
        env: &E,
    ) -> Result<ModelValue, ExpressionError> {
        match self {
            ModelValue::Expression(expression) => Ok(ModelValue::String(expression.resolve(env)?)),
            ModelValue::List(items) => {
                let mut resolved = Vec::with_capacity(items.len());
                for item in items {
                    resolved.push(item.resolve_with(env)?);
                }
                Ok(ModelValue::List(resolved))
            }
            ModelValue::Object(map) => {
                let mut resolved = IndexMap::with_capacity(map.len());
                for (key, child) in map {
                    resolved.insert(key.clone(), child.resolve_with(env)?);
                }
                Ok(ModelValue::Object(resolved))
            }
            ModelValue::Property(property) => Ok(ModelValue::Property(Property::new(
                property.name(),
                property.value().resolve_with(env)?,
            ))),
            other => Ok(other.clone()),
        }
    }

    fn unsupported(&self, target: &'static str) -> ConversionError {
        if matches!(self, ModelValue::Undefined) {
            ConversionError::Undefined
        } else {
            ConversionError::unsupported(self.model_type(), target)
        }
    }

    pub(crate) fn as_boolean(&self) -> Result<bool, ConversionError> {
        match self {
            ModelValue::Boolean(b) => Ok(*b),
            ModelValue::Int(n) => Ok(*n != 0),
            ModelValue::Long(n) => Ok(*n != 0),
            ModelValue::Double(x) => Ok(*x != 0.0),
            ModelValue::BigInteger(n) => Ok(!n.is_zero()),
            ModelValue::BigDecimal(d) => Ok(!d.is_zero()),
            ModelValue::String(s) => {
                if s.eq_ignore_ascii_case("true") {
                    Ok(true)
                } else if s.eq_ignore_ascii_case("false") {
                    Ok(false)
                } else {
                    Err(ConversionError::invalid("boolean", s.clone()))
                }
            }
            ModelValue::Bytes(b) => Ok(!b.is_empty()),
            ModelValue::Type(ty) => Ok(*ty != ModelType::Undefined),
            ModelValue::List(items) => Ok(!items.is_empty()),
            ModelValue::Object(map) => Ok(!map.is_empty()),
            _ => Err(self.unsupported("boolean")),
        }
    }

    pub(crate) fn as_int(&self) -> Result<i32, ConversionError> {
        match self {
            ModelValue::Boolean(b) => Ok(i32::from(*b)),
            ModelValue::Int(n) => Ok(*n),
            ModelValue::Long(n) => Ok(*n as i32),
            ModelValue::Double(x) => Ok(*x as i32),
            ModelValue::BigInteger(n) => Ok(wrap_i32(n)),
            ModelValue::BigDecimal(d) => Ok(wrap_i32(&trunc_decimal(d))),
            ModelValue::String(s) => s
                .parse::<i32>()
                .map_err(|_| ConversionError::invalid("int", s.clone())),
            ModelValue::Bytes(b) => Ok(wrap_i32(&BigInt::from_signed_bytes_be(b))),
            ModelValue::List(items) => Ok(items.len() as i32),
            ModelValue::Object(map) => Ok(map.len() as i32),
            _ => Err(self.unsupported("int")),
        }
    }

    pub(crate) fn as_long(&self) -> Result<i64, ConversionError> {
        match self {
            ModelValue::Boolean(b) => Ok(i64::from(*b)),
            ModelValue::Int(n) => Ok(i64::from(*n)),
            ModelValue::Long(n) => Ok(*n),
            ModelValue::Double(x) => Ok(*x as i64),
            ModelValue::BigInteger(n) => Ok(wrap_i64(n)),
            ModelValue::BigDecimal(d) => Ok(wrap_i64(&trunc_decimal(d))),
            ModelValue::String(s) => s
                .parse::<i64>()
                .map_err(|_| ConversionError::invalid("long", s.clone())),
            ModelValue::Bytes(b) => Ok(wrap_i64(&BigInt::from_signed_bytes_be(b))),
            ModelValue::List(items) => Ok(items.len() as i64),
            ModelValue::Object(map) => Ok(map.len() as i64),
            _ => Err(self.unsupported("long")),
        }
    }

    pub(crate) fn as_double(&self) -> Result<f64, ConversionError> {
        match self {
            ModelValue::Boolean(b) => Ok(if *b { 1.0 } else { 0.0 }),
            ModelValue::Int(n) => Ok(f64::from(*n)),
            ModelValue::Long(n) => Ok(*n as f64),
            ModelValue::Double(x) => Ok(*x),
            ModelValue::BigInteger(n) => Ok(n.to_f64().unwrap_or(f64::NAN)),
            ModelValue::BigDecimal(d) => Ok(d.to_f64().unwrap_or(f64::NAN)),
            ModelValue::String(s) => s
                .parse::<f64>()
                .map_err(|_| ConversionError::invalid("double", s.clone())),
            ModelValue::List(items) => Ok(items.len() as f64),
            ModelValue::Object(map) => Ok(map.len() as f64),
            _ => Err(self.unsupported("double")),
        }
    }

    pub(crate) fn as_big_integer(&self) -> Result<BigInt, ConversionError> {
        match self {
            ModelValue::Boolean(b) => Ok(BigInt::from(i32::from(*b))),
            ModelValue::Int(n) => Ok(BigInt::from(*n)),
            ModelValue::Long(n) => Ok(BigInt::from(*n)),
            ModelValue::Double(x) => BigDecimal::try_from(*x)
                .map(|d| trunc_decimal(&d))
                .map_err(|_| ConversionError::invalid("big integer", format_double(*x))),
            ModelValue::BigInteger(n) => Ok(n.clone()),
            ModelValue::BigDecimal(d) => Ok(trunc_decimal(d)),
            ModelValue::String(s) => BigInt::from_str(s)
                .map_err(|_| ConversionError::invalid("big integer", s.clone())),
            ModelValue::Bytes(b) => Ok(BigInt::from_signed_bytes_be(b)),
            ModelValue::List(items) => Ok(BigInt::from(items.len())),
            ModelValue::Object(map) => Ok(BigInt::from(map.len())),
            _ => Err(self.unsupported("big integer")),
        }
    }

    pub(crate) fn as_big_decimal(&self) -> Result<BigDecimal, ConversionError> {
        match self {
            ModelValue::Boolean(b) => Ok(BigDecimal::from(i32::from(*b))),
            ModelValue::Int(n) => Ok(BigDecimal::from(*n)),
            ModelValue::Long(n) => Ok(BigDecimal::from(*n)),
            ModelValue::Double(x) => BigDecimal::try_from(*x)
                .map_err(|_| ConversionError::invalid("big decimal", format_double(*x))),
            ModelValue::BigInteger(n) => Ok(BigDecimal::from(n.clone())),
            ModelValue::BigDecimal(d) => Ok(d.clone()),
            ModelValue::String(s) => BigDecimal::from_str(s)
                .map_err(|_| ConversionError::invalid("big decimal", s.clone())),
            ModelValue::List(items) => Ok(BigDecimal::from(items.len() as u64)),
            ModelValue::Object(map) => Ok(BigDecimal::from(map.len() as u64)),
            _ => Err(self.unsupported("big decimal")),
        }
    }

    pub(crate) fn as_bytes(&self) -> Result<Vec<u8>, ConversionError> {
        match self {
            ModelValue::Bytes(b) => Ok(b.clone()),
            ModelValue::String(s) => Ok(s.as_bytes().to_vec()),
            ModelValue::Int(n) => Ok(n.to_be_bytes().to_vec()),
            ModelValue::Long(n) => Ok(n.to_be_bytes().to_vec()),
            _ => Err(self.unsupported("bytes")),
        }
    }

    /// The literal string form of the value. Total: every variant renders,
    /// an undefined node as the literal `undefined`.
    pub(crate) fn as_string(&self) -> String {
        match self {
            ModelValue::Undefined => "undefined".to_owned(),
            ModelValue::Boolean(b) => b.to_string(),
            ModelValue::Int(n) => n.to_string(),
            ModelValue::Long(n) => n.to_string(),
            ModelValue::Double(x) => format_double(*x),
            ModelValue::BigInteger(n) => n.to_string(),
            ModelValue::BigDecimal(d) => d.to_string(),
            ModelValue::String(s) => s.clone(),
            ModelValue::Bytes(b) => base64::encode_plain(b),
            ModelValue::Expression(e) => e.expression_string().to_owned(),
            ModelValue::Type(ty) => ty.name().to_owned(),
            ModelValue::List(_) | ModelValue::Object(_) | ModelValue::Property(_) => {
                let mut out = String::new();
                // Single-line rendering cannot fail when writing to a String.
                let _ = self.format_dmr(&mut out, 0, false);
                out
            }
        }
    }

    pub(crate) fn as_expression(&self) -> Result<ValueExpression, ConversionError> {
        match self {
            ModelValue::Expression(e) => Ok(e.clone()),
            ModelValue::String(s) => Ok(ValueExpression::new(s.clone())),
            ModelValue::Int(_)
            | ModelValue::Long(_)
            | ModelValue::Double(_)
            | ModelValue::BigInteger(_)
            | ModelValue::BigDecimal(_)
            | ModelValue::Type(_) => Ok(ValueExpression::new(self.as_string())),
            _ => Err(self.unsupported("expression")),
        }
    }

    pub(crate) fn as_type(&self) -> Result<ModelType, ConversionError> {
        match self {
            ModelValue::Type(ty) => Ok(*ty),
            ModelValue::String(s) => ModelType::from_str(s),
            _ => Err(self.unsupported("type")),
        }
    }

    pub(crate) fn as_property(&self) -> Result<Property, ConversionError> {
        match self {
            ModelValue::Property(property) => Ok(property.clone()),
            ModelValue::Object(map) if map.len() == 1 => {
                let (name, value) = map.iter().next().map(|(k, v)| (k.clone(), v.clone()))
                    .unwrap_or_else(|| (String::new(), ModelNode::new()));
                Ok(Property::new(name, value))
            }
            ModelValue::List(items) if items.len() == 2 => {
                Ok(Property::new(items[0].as_string(), items[1].clone()))
            }
            _ => Err(self.unsupported("property")),
        }
    }

    pub(crate) fn as_property_list(&self) -> Result<Vec<Property>, ConversionError> {
        match self {
            ModelValue::Property(property) => Ok(vec![property.clone()]),
            ModelValue::Object(map) => Ok(map
                .iter()
                .map(|(k, v)| Property::new(k.clone(), v.clone()))
                .collect()),
            ModelValue::List(items) => items.iter().map(|item| item.as_property()).collect(),
            _ => Err(self.unsupported("property list")),
        }
    }

    pub(crate) fn as_list(&self) -> Result<Vec<ModelNode>, ConversionError> {
        match self {
            ModelValue::List(items) => Ok(items.clone()),
            ModelValue::Object(map) => Ok(map
                .iter()
                .map(|(k, v)| {
                    ModelNode::from_value(ModelValue::Property(Property::new(
                        k.clone(),
                        v.clone(),
                    )))
                })
                .collect()),
            ModelValue::Property(property) => Ok(vec![ModelNode::from_value(
                ModelValue::Property(property.clone()),
            )]),
            _ => Err(self.unsupported("list")),
        }
    }

    /// Interpolate the value into an OBJECT node. Lists are read as a mixture
    /// of properties and key/value pairs; a later duplicate key replaces the
    /// value but keeps the original position.
    pub(crate) fn as_object(&self) -> Result<ModelNode, ConversionError> {
        match self {
            ModelValue::Object(_) => Ok(ModelNode::from_value(self.clone())),
            ModelValue::Property(property) => {
                let mut map = IndexMap::new();
                map.insert(property.name().to_owned(), property.value().clone());
                Ok(ModelNode::from_value(ModelValue::Object(map)))
            }
            ModelValue::List(items) => {
                let mut map = IndexMap::new();
                let mut iter = items.iter();
                while let Some(item) = iter.next() {
                    if let ModelValue::Property(property) = item.value() {
                        map.insert(property.name().to_owned(), property.value().clone());
                    } else {
                        let key = item.as_string();
                        let value = iter.next().cloned().unwrap_or_default();
                        map.insert(key, value);
                    }
                }
                Ok(ModelNode::from_value(ModelValue::Object(map)))
            }
            _ => Err(self.unsupported("object")),
        }
    }

    /// Drive a writer through a post-order walk of the tree.
    pub(crate) fn write<W: ModelWriter + ?Sized>(&self, writer: &mut W) -> Result<(), ModelError> {
        match self {
            ModelValue::Undefined => writer.write_undefined(),
            ModelValue::Boolean(b) => writer.write_boolean(*b),
            ModelValue::Int(n) => writer.write_int(*n),
            ModelValue::Long(n) => writer.write_long(*n),
            ModelValue::Double(x) => writer.write_double(*x),
            ModelValue::BigInteger(n) => writer.write_big_integer(n),
            ModelValue::BigDecimal(d) => writer.write_big_decimal(d),
            ModelValue::String(s) => writer.write_string(s),
            ModelValue::Bytes(b) => writer.write_bytes(b),
            ModelValue::Expression(e) => writer.write_expression(e.expression_string()),
            ModelValue::Type(ty) => writer.write_type(*ty),
            ModelValue::List(items) => {
                writer.write_list_start()?;
                for item in items {
                    item.value().write(writer)?;
                }
                writer.write_list_end()
            }
            ModelValue::Object(map) => {
                writer.write_object_start()?;
                for (key, child) in map {
                    writer.write_string(key)?;
                    child.value().write(writer)?;
                }
                writer.write_object_end()
            }
            ModelValue::Property(property) => {
                writer.write_property_start()?;
                writer.write_string(property.name())?;
                property.value().value().write(writer)?;
                writer.write_property_end()
            }
        }
    }

    /// Render the native DMR textual form. `multi_line` requests the pretty
    /// layout; a container actually breaks onto multiple lines only when it
    /// holds more than one element.
    pub(crate) fn format_dmr<W: Write>(
        &self,
        out: &mut W,
        indent: usize,
        multi_line: bool,
    ) -> std::fmt::Result {
        match self {
            ModelValue::Undefined => out.write_str("undefined"),
            ModelValue::Boolean(b) => write!(out, "{}", b),
            ModelValue::Int(n) => write!(out, "{}", n),
            ModelValue::Long(n) => write!(out, "{}L", n),
            ModelValue::Double(x) => tokens::write_f64(out, *x),
            ModelValue::BigInteger(n) => write!(out, "big integer {}", n),
            ModelValue::BigDecimal(d) => write!(out, "big decimal {}", d),
            ModelValue::String(s) => tokens::write_quoted(out, s),
            ModelValue::Bytes(b) => write_bytes_literal(out, b),
            ModelValue::Expression(e) => {
                out.write_str("expression ")?;
                tokens::write_quoted(out, e.expression_string())
            }
            ModelValue::Type(ty) => out.write_str(ty.name()),
            ModelValue::List(items) => {
                out.write_char('[')?;
                let ml = multi_line && items.len() > 1;
                if ml {
                    newline_indent(out, indent + 1)?;
                }
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        out.write_char(',')?;
                        if ml {
                            newline_indent(out, indent + 1)?;
                        }
                    }
                    let child_indent = if ml { indent + 1 } else { indent };
                    item.value().format_dmr(out, child_indent, multi_line)?;
                }
                if ml {
                    newline_indent(out, indent)?;
                }
                out.write_char(']')
            }
            ModelValue::Object(map) => {
                out.write_char('{')?;
                let ml = multi_line && map.len() > 1;
                if ml {
                    newline_indent(out, indent + 1)?;
                }
                for (i, (key, child)) in map.iter().enumerate() {
                    if i > 0 {
                        out.write_char(',')?;
                        if ml {
                            newline_indent(out, indent + 1)?;
                        }
                    }
                    tokens::write_quoted(out, key)?;
                    out.write_str(" => ")?;
                    let child_indent = if ml { indent + 1 } else { indent };
                    child.value().format_dmr(out, child_indent, multi_line)?;
                }
                if ml {
                    newline_indent(out, indent)?;
                }
                out.write_char('}')
            }
            ModelValue::Property(property) => {
                out.write_char('(')?;
                tokens::write_quoted(out, property.name())?;
                out.write_str(" => ")?;
                property.value().value().format_dmr(out, indent, multi_line)?;
                out.write_char(')')
            }
        }
    }

    /// Render the JSON-compatible form; non-JSON scalars become sentinel
    /// objects.
    pub(crate) fn format_json<W: Write>(
        &self,
        out: &mut W,
        indent: usize,
        multi_line: bool,
    ) -> std::fmt::Result {
        match self {
            ModelValue::Undefined => out.write_str("null"),
            ModelValue::Boolean(b) => write!(out, "{}", b),
            ModelValue::Int(n) => write!(out, "{}", n),
            ModelValue::Long(n) => write!(out, "{}", n),
            ModelValue::Double(x) => tokens::write_f64(out, *x),
            ModelValue::BigInteger(n) => write!(out, "{}", n),
            ModelValue::BigDecimal(d) => write!(out, "{}", d),
            ModelValue::String(s) => tokens::write_quoted(out, s),
            ModelValue::Bytes(b) => {
                write_sentinel(out, json::BYTES_KEY, &base64::encode_plain(b), indent, multi_line)
            }
            ModelValue::Expression(e) => write_sentinel(
                out,
                json::EXPRESSION_KEY,
                e.expression_string(),
                indent,
                multi_line,
            ),
            ModelValue::Type(ty) => {
                write_sentinel(out, json::TYPE_KEY, ty.name(), indent, multi_line)
            }
            ModelValue::List(items) => {
                out.write_char('[')?;
                let ml = multi_line && items.len() > 1;
                if ml {
                    newline_indent(out, indent + 1)?;
                }
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        if ml {
                            out.write_char(',')?;
                            newline_indent(out, indent + 1)?;
                        } else {
                            out.write_str(", ")?;
                        }
                    }
                    let child_indent = if ml { indent + 1 } else { indent };
                    item.value().format_json(out, child_indent, multi_line)?;
                }
                if ml {
                    newline_indent(out, indent)?;
                }
                out.write_char(']')
            }
            ModelValue::Object(map) => {
                out.write_char('{')?;
                let ml = multi_line && map.len() > 1;
                if ml {
                    newline_indent(out, indent + 1)?;
                }
                for (i, (key, child)) in map.iter().enumerate() {
                    if i > 0 {
                        if ml {
                            out.write_char(',')?;
                            newline_indent(out, indent + 1)?;
                        } else {
                            out.write_str(", ")?;
                        }
                    }
                    tokens::write_quoted(out, key)?;
                    out.write_str(" : ")?;
                    let child_indent = if ml { indent + 1 } else { indent };
                    child.value().format_json(out, child_indent, multi_line)?;
                }
                if ml {
                    newline_indent(out, indent)?;
                }
                out.write_char('}')
            }
            ModelValue::Property(property) => {
                out.write_char('{')?;
                if multi_line {
                    newline_indent(out, indent + 1)?;
                } else {
                    out.write_char(' ')?;
                }
                tokens::write_quoted(out, json::PROPERTY_KEY)?;
                out.write_str(" : {")?;
                tokens::write_quoted(out, property.name())?;
                out.write_str(" : ")?;
                property
                    .value()
                    .value()
                    .format_json(out, indent + 1, multi_line)?;
                out.write_char('}')?;
                if multi_line {
                    newline_indent(out, indent)?;
                } else {
                    out.write_char(' ')?;
                }
                out.write_char('}')
            }
        }
    }
}

impl PartialEq for ModelValue {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (ModelValue::Undefined, ModelValue::Undefined) => true,
            (ModelValue::Boolean(a), ModelValue::Boolean(b)) => a == b,
            (ModelValue::Int(a), ModelValue::Int(b)) => a == b,
            (ModelValue::Long(a), ModelValue::Long(b)) => a == b,
            (ModelValue::Double(a), ModelValue::Double(b)) => a.to_bits() == b.to_bits(),
            (ModelValue::BigInteger(a), ModelValue::BigInteger(b)) => a == b,
            (ModelValue::BigDecimal(a), ModelValue::BigDecimal(b)) => a == b,
            (ModelValue::String(a), ModelValue::String(b)) => a == b,
            (ModelValue::Bytes(a), ModelValue::Bytes(b)) => a == b,
            (ModelValue::Expression(a), ModelValue::Expression(b)) => a == b,
            (ModelValue::Type(a), ModelValue::Type(b)) => a == b,
            (ModelValue::List(a), ModelValue::List(b)) => a == b,
            (ModelValue::Object(a), ModelValue::Object(b)) => {
                // Insertion order is significant, so the order-insensitive
                // map equality is not enough.
                a.len() == b.len()
                    && a.iter()
                        .zip(b.iter())
                        .all(|((ka, va), (kb, vb))| ka == kb && va == vb)
            }
            (ModelValue::Property(a), ModelValue::Property(b)) => a == b,
            _ => false,
        }
    }
}

impl Eq for ModelValue {}

impl Hash for ModelValue {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_u8(self.model_type().type_char() as u8);
        match self {
            ModelValue::Undefined => {}
            ModelValue::Boolean(b) => b.hash(state),
            ModelValue::Int(n) => n.hash(state),
            ModelValue::Long(n) => n.hash(state),
            ModelValue::Double(x) => x.to_bits().hash(state),
            ModelValue::BigInteger(n) => n.hash(state),
            ModelValue::BigDecimal(d) => {
                let (digits, exponent) = d.normalized().as_bigint_and_exponent();
                digits.hash(state);
                exponent.hash(state);
            }
            ModelValue::String(s) => s.hash(state),
            ModelValue::Bytes(b) => b.hash(state),
            ModelValue::Expression(e) => e.hash(state),
            ModelValue::Type(ty) => ty.hash(state),
            ModelValue::List(items) => items.hash(state),
            ModelValue::Object(map) => {
                for (key, child) in map {
                    key.hash(state);
                    child.hash(state);
                }
            }
            ModelValue::Property(property) => property.hash(state),
        }
    }
}

fn newline_indent<W: Write>(out: &mut W, level: usize) -> std::fmt::Result {
    out.write_char('\n')?;
    for _ in 0..level {
        out.write_str("    ")?;
    }
    Ok(())
}

fn write_bytes_literal<W: Write>(out: &mut W, bytes: &[u8]) -> std::fmt::Result {
    out.write_str("bytes {")?;
    for (i, byte) in bytes.iter().enumerate() {
        if i > 0 {
            out.write_char(',')?;
        }
        write!(out, " 0x{:02x}", byte)?;
    }
    if bytes.is_empty() {
        out.write_char('}')
    } else {
        out.write_str(" }")
    }
}

fn write_sentinel<W: Write>(
    out: &mut W,
    key: &str,
    value: &str,
    indent: usize,
    multi_line: bool,
) -> std::fmt::Result {
    out.write_char('{')?;
    if multi_line {
        newline_indent(out, indent + 1)?;
    } else {
        out.write_char(' ')?;
    }
    tokens::write_quoted(out, key)?;
    out.write_str(" : ")?;
    tokens::write_quoted(out, value)?;
    if multi_line {
        newline_indent(out, indent)?;
    } else {
        out.write_char(' ')?;
    }
    out.write_char('}')
}

fn format_double(x: f64) -> String {
    let mut buffer = ryu::Buffer::new();
    buffer.format(x).to_owned()
}

/// Narrow an arbitrary-precision integer to the low-order 32 bits, two's
/// complement, matching the silent narrowing of the original.
fn wrap_i32(n: &BigInt) -> i32 {
    let modulus = BigInt::from(1u64 << 32);
    let rem = ((n % &modulus) + &modulus) % &modulus;
    rem.to_u32().unwrap_or(0) as i32
}

fn wrap_i64(n: &BigInt) -> i64 {
    let modulus = BigInt::from(1u128 << 64);
    let rem = ((n % &modulus) + &modulus) % &modulus;
    rem.to_u64().unwrap_or(0) as i64
}

/// Truncate a decimal toward zero to an integer.
fn trunc_decimal(d: &BigDecimal) -> BigInt {
    let (digits, exponent) = d.as_bigint_and_exponent();
    if exponent <= 0 {
        let shift = exponent.unsigned_abs().min(u32::MAX as u64) as u32;
        digits * BigInt::from(10u8).pow(shift)
    } else {
        // More fractional digits than the number holds leaves nothing.
        let digit_count = digits.abs().to_string().len() as i64;
        if exponent >= digit_count {
            BigInt::zero()
        } else {
            digits / BigInt::from(10u8).pow(exponent as u32)
        }
    }
}
