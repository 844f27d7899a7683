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
use crate::binary;
use crate::error::{ConversionError, ExpressionError, ModelError, NoSuchElement};
use crate::expression::{Environment, MapEnvironment, ValueExpression};
use crate::factory;
use crate::property::Property;
use crate::stream::{DmrReader, DmrWriter, JsonReader, JsonWriter, ModelReader, ModelWriter};
use crate::types::ModelType;
use crate::value::ModelValue;
use bigdecimal::BigDecimal;
use indexmap::IndexMap;
use num_bigint::BigInt;
use std::fmt::{Display, Formatter};
use std::hash::{Hash, Hasher};
use std::io;

/// A dynamic model representation node.
///
/// A node can hold any type of the [`ModelType`] enumeration. The type is
/// reported by [`model_type`](ModelNode::model_type) and changed by the
/// setters; the payload is recovered through the `as_*` conversions, which
/// attempt a deterministic conversion when the requested representation
/// differs from the node's type.
///
/// A node can be made read-only with [`protect`](ModelNode::protect), which
/// freezes the node and every node reachable from it. A mutating call on a
/// protected node panics with an "unsupported mutation" message, as does
/// child access on a node whose type cannot hold children; conversions
/// report failures as [`ConversionError`] values instead.
///
/// Nodes are not synchronized; concurrent access to an unprotected tree
/// requires external coordination.
#[derive(Debug)]
pub struct ModelNode {
    pub(crate) protected: bool,
    pub(crate) value: ModelValue,
}

impl ModelNode {
    /// A protected BOOLEAN node holding `true`.
    pub const TRUE: ModelNode = ModelNode {
        protected: true,
        value: ModelValue::Boolean(true),
    };

    /// A protected BOOLEAN node holding `false`.
    pub const FALSE: ModelNode = ModelNode {
        protected: true,
        value: ModelValue::Boolean(false),
    };

    /// A protected INT node holding `0`.
    pub const ZERO: ModelNode = ModelNode {
        protected: true,
        value: ModelValue::Int(0),
    };

    /// A protected LONG node holding `0`.
    pub const ZERO_LONG: ModelNode = ModelNode {
        protected: true,
        value: ModelValue::Long(0),
    };

    /// A protected UNDEFINED node.
    pub const UNDEFINED: ModelNode = ModelNode {
        protected: true,
        value: ModelValue::Undefined,
    };

    /// Create a new node with an undefined value.
    pub fn new() -> ModelNode {
        ModelNode {
            protected: false,
            value: ModelValue::Undefined,
        }
    }

    pub(crate) fn from_value(value: ModelValue) -> ModelNode {
        ModelNode {
            protected: false,
            value,
        }
    }

    pub(crate) fn value(&self) -> &ModelValue {
        &self.value
    }

    /// The current type of this node.
    pub fn model_type(&self) -> ModelType {
        self.value.model_type()
    }

    /// Whether this node's type is anything other than
    /// [`ModelType::Undefined`].
    pub fn is_defined(&self) -> bool {
        self.model_type() != ModelType::Undefined
    }

    /// Prevent further modification of this node and all of its children.
    /// Idempotent; clones taken afterwards are not protected.
    pub fn protect(&mut self) {
        if !self.protected {
            self.protected = true;
            self.value.protect_children();
        }
    }

    pub fn is_protected(&self) -> bool {
        self.protected
    }

    fn check_protect(&self) {
        if self.protected {
            panic!("unsupported mutation: node is protected");
        }
    }

    /// Replace this node's value. Accepts anything convertible into a node:
    /// the scalar types, byte vectors, expressions, types, properties and
    /// other nodes. Moving a node in transfers its payload; clone first to
    /// keep the original.
    pub fn set<V: Into<ModelNode>>(&mut self, value: V) -> &mut ModelNode {
        self.check_protect();
        self.value = value.into().value;
        self
    }

    /// Change this node into a PROPERTY with the given name and value.
    pub fn set_property<S: Into<String>>(&mut self, name: S, value: ModelNode) -> &mut ModelNode {
        self.check_protect();
        self.value = ModelValue::Property(Property::new(name, value));
        self
    }

    /// Change this node into a LIST holding the given values.
    pub fn set_list(&mut self, values: Vec<ModelNode>) -> &mut ModelNode {
        self.check_protect();
        self.value = ModelValue::List(values);
        self
    }

    /// Change this node into an empty LIST.
    pub fn set_empty_list(&mut self) -> &mut ModelNode {
        self.check_protect();
        self.value = ModelValue::List(Vec::new());
        self
    }

    /// Change this node into an empty OBJECT.
    pub fn set_empty_object(&mut self) -> &mut ModelNode {
        self.check_protect();
        self.value = ModelValue::Object(IndexMap::new());
        self
    }

    /// Reset this node to UNDEFINED.
    pub fn clear(&mut self) -> &mut ModelNode {
        self.check_protect();
        self.value = ModelValue::Undefined;
        self
    }

    /// Get the child with the given name, creating it if absent. An
    /// undefined node is first promoted to an OBJECT; on a PROPERTY the name
    /// must match the property name.
    ///
    /// # Panics
    ///
    /// Panics when a child would have to be created on a protected node, or
    /// when the node's type cannot hold named children.
    pub fn get(&mut self, name: &str) -> &mut ModelNode {
        if let ModelValue::Undefined = self.value {
            self.check_protect();
            self.value = ModelValue::Object(IndexMap::new());
        }
        let protected = self.protected;
        match &mut self.value {
            ModelValue::Object(map) => {
                if protected && !map.contains_key(name) {
                    panic!("unsupported mutation: node is protected");
                }
                map.entry(name.to_owned()).or_insert_with(ModelNode::new)
            }
            ModelValue::Property(property) => {
                if property.name() == name {
                    property.value_mut()
                } else {
                    panic!(
                        "cannot get child '{}' of a property named '{}'",
                        name,
                        property.name()
                    );
                }
            }
            other => panic!("cannot get a named child of a {} node", other.model_type()),
        }
    }

    /// Get the child at the given index, creating intervening undefined
    /// entries as needed. An undefined node is first promoted to a LIST; on
    /// a PROPERTY the index must be zero.
    ///
    /// # Panics
    ///
    /// Panics when entries would have to be created on a protected node, or
    /// when the node's type cannot hold indexed children.
    pub fn get_index(&mut self, index: usize) -> &mut ModelNode {
        if let ModelValue::Undefined = self.value {
            self.check_protect();
            self.value = ModelValue::List(Vec::new());
        }
        let protected = self.protected;
        match &mut self.value {
            ModelValue::List(items) => {
                if index >= items.len() {
                    if protected {
                        panic!("unsupported mutation: node is protected");
                    }
                    items.resize_with(index + 1, ModelNode::new);
                }
                &mut items[index]
            }
            ModelValue::Property(property) => {
                if index == 0 {
                    property.value_mut()
                } else {
                    panic!("cannot get child {} of a property", index);
                }
            }
            other => panic!(
                "cannot get an indexed child of a {} node",
                other.model_type()
            ),
        }
    }

    /// Follow (and create as needed) a chain of named children.
    pub fn get_path<'a, I: IntoIterator<Item = &'a str>>(&mut self, names: I) -> &mut ModelNode {
        let mut current = self;
        for name in names {
            current = current.get(name);
        }
        current
    }

    fn child(&self, name: &str) -> Option<&ModelNode> {
        match &self.value {
            ModelValue::Object(map) => map.get(name),
            ModelValue::Property(property) if property.name() == name => Some(property.value()),
            _ => None,
        }
    }

    fn child_at(&self, index: usize) -> Option<&ModelNode> {
        match &self.value {
            ModelValue::List(items) => items.get(index),
            ModelValue::Property(property) if index == 0 => Some(property.value()),
            _ => None,
        }
    }

    /// The child with the given name, or an error if it does not exist.
    pub fn require(&self, name: &str) -> Result<&ModelNode, NoSuchElement> {
        self.child(name)
            .ok_or_else(|| NoSuchElement(name.to_owned()))
    }

    /// The child at the given index, or an error if it does not exist.
    pub fn require_index(&self, index: usize) -> Result<&ModelNode, NoSuchElement> {
        self.child_at(index)
            .ok_or_else(|| NoSuchElement(index.to_string()))
    }

    /// Remove and return the named child of an OBJECT, if present.
    ///
    /// # Panics
    ///
    /// Panics on a protected node or on a type without named children.
    pub fn remove(&mut self, name: &str) -> Option<ModelNode> {
        self.check_protect();
        match &mut self.value {
            ModelValue::Object(map) => map.shift_remove(name),
            other => panic!("cannot remove a named child of a {} node", other.model_type()),
        }
    }

    /// Remove and return the child of a LIST at the given index.
    ///
    /// # Panics
    ///
    /// Panics on a protected node or on a type without indexed children.
    pub fn remove_index(&mut self, index: usize) -> Result<ModelNode, NoSuchElement> {
        self.check_protect();
        match &mut self.value {
            ModelValue::List(items) => {
                if index < items.len() {
                    Ok(items.remove(index))
                } else {
                    Err(NoSuchElement(index.to_string()))
                }
            }
            other => panic!(
                "cannot remove an indexed child of a {} node",
                other.model_type()
            ),
        }
    }

    /// Whether a (possibly undefined) child with the given name exists.
    pub fn has(&self, name: &str) -> bool {
        self.child(name).is_some()
    }

    /// Whether a (possibly undefined) child exists at the given index.
    pub fn has_index(&self, index: usize) -> bool {
        match &self.value {
            ModelValue::List(items) => index < items.len(),
            ModelValue::Property(_) => index == 0,
            _ => false,
        }
    }

    /// Whether every name in the chain exists.
    pub fn has_path<'a, I: IntoIterator<Item = &'a str>>(&self, names: I) -> bool {
        let mut current = self;
        for name in names {
            match current.child(name) {
                Some(child) => current = child,
                None => return false,
            }
        }
        true
    }

    /// Whether a defined child with the given name exists.
    pub fn has_defined(&self, name: &str) -> bool {
        self.child(name).map_or(false, ModelNode::is_defined)
    }

    /// Whether a defined child exists at the given index.
    pub fn has_defined_index(&self, index: usize) -> bool {
        self.child_at(index).map_or(false, ModelNode::is_defined)
    }

    /// Whether every name in the chain exists and is defined.
    pub fn has_defined_path<'a, I: IntoIterator<Item = &'a str>>(&self, names: I) -> bool {
        let mut current = self;
        for name in names {
            match current.child(name) {
                Some(child) if child.is_defined() => current = child,
                _ => return false,
            }
        }
        true
    }

    /// The keys of an OBJECT (in insertion order) or the single name of a
    /// PROPERTY.
    ///
    /// # Panics
    ///
    /// Panics on any other type.
    pub fn keys(&self) -> Vec<String> {
        match &self.value {
            ModelValue::Object(map) => map.keys().cloned().collect(),
            ModelValue::Property(property) => vec![property.name().to_owned()],
            other => panic!("cannot get the keys of a {} node", other.model_type()),
        }
    }

    /// Append an undefined node to this LIST and return it. An undefined
    /// node is first promoted to a LIST.
    ///
    /// # Panics
    ///
    /// Panics on a protected node or on a defined non-LIST node.
    pub fn add(&mut self) -> &mut ModelNode {
        self.check_protect();
        if let ModelValue::Undefined = self.value {
            self.value = ModelValue::List(Vec::new());
        }
        match &mut self.value {
            ModelValue::List(items) => {
                let index = items.len();
                items.push(ModelNode::new());
                &mut items[index]
            }
            other => panic!("cannot add a child to a {} node", other.model_type()),
        }
    }

    /// Insert an undefined node at `index` (`0 <= index <= len`) and return
    /// it.
    ///
    /// # Panics
    ///
    /// Panics on a protected node, on a defined non-LIST node, or when the
    /// index is out of bounds.
    pub fn insert(&mut self, index: usize) -> &mut ModelNode {
        self.check_protect();
        if let ModelValue::Undefined = self.value {
            self.value = ModelValue::List(Vec::new());
        }
        match &mut self.value {
            ModelValue::List(items) => {
                items.insert(index, ModelNode::new());
                &mut items[index]
            }
            other => panic!("cannot insert a child into a {} node", other.model_type()),
        }
    }

    /// Append a value to this LIST.
    pub fn push<V: Into<ModelNode>>(&mut self, value: V) -> &mut ModelNode {
        self.add().set(value);
        self
    }

    /// Append an empty LIST node and return it.
    pub fn add_empty_list(&mut self) -> &mut ModelNode {
        let node = self.add();
        node.set_empty_list();
        node
    }

    /// Append an empty OBJECT node and return it.
    pub fn add_empty_object(&mut self) -> &mut ModelNode {
        let node = self.add();
        node.set_empty_object();
        node
    }

    /// A deep, unprotected copy with every EXPRESSION resolved against an
    /// empty property set (so only `env.`-prefixed names can resolve).
    pub fn resolve(&self) -> Result<ModelNode, ExpressionError> {
        self.resolve_with(&MapEnvironment::new())
    }

    /// A deep, unprotected copy with every EXPRESSION resolved against the
    /// given environment.
    pub fn resolve_with<E: Environment + ?Sized>(
        &self,
        env: &E,
    ) -> Result<ModelNode, ExpressionError> {
        Ok(ModelNode::from_value(self.value.resolve(env)?))
    }

    pub fn as_boolean(&self) -> Result<bool, ConversionError> {
        self.value.as_boolean()
    }

    pub fn as_boolean_or(&self, default: bool) -> Result<bool, ConversionError> {
        if self.is_defined() {
            self.value.as_boolean()
        } else {
            Ok(default)
        }
    }

    pub fn as_boolean_or_null(&self) -> Result<Option<bool>, ConversionError> {
        if self.is_defined() {
            self.value.as_boolean().map(Some)
        } else {
            Ok(None)
        }
    }

    pub fn as_int(&self) -> Result<i32, ConversionError> {
        self.value.as_int()
    }

    pub fn as_int_or(&self, default: i32) -> Result<i32, ConversionError> {
        if self.is_defined() {
            self.value.as_int()
        } else {
            Ok(default)
        }
    }

    pub fn as_int_or_null(&self) -> Result<Option<i32>, ConversionError> {
        if self.is_defined() {
            self.value.as_int().map(Some)
        } else {
            Ok(None)
        }
    }

    pub fn as_long(&self) -> Result<i64, ConversionError> {
        self.value.as_long()
    }

    pub fn as_long_or(&self, default: i64) -> Result<i64, ConversionError> {
        if self.is_defined() {
            self.value.as_long()
        } else {
            Ok(default)
        }
    }

    pub fn as_long_or_null(&self) -> Result<Option<i64>, ConversionError> {
        if self.is_defined() {
            self.value.as_long().map(Some)
        } else {
            Ok(None)
        }
    }

    pub fn as_double(&self) -> Result<f64, ConversionError> {
        self.value.as_double()
    }

    pub fn as_double_or(&self, default: f64) -> Result<f64, ConversionError> {
        if self.is_defined() {
            self.value.as_double()
        } else {
            Ok(default)
        }
    }

    pub fn as_double_or_null(&self) -> Result<Option<f64>, ConversionError> {
        if self.is_defined() {
            self.value.as_double().map(Some)
        } else {
            Ok(None)
        }
    }

    pub fn as_big_integer(&self) -> Result<BigInt, ConversionError> {
        self.value.as_big_integer()
    }

    pub fn as_big_integer_or_null(&self) -> Result<Option<BigInt>, ConversionError> {
        if self.is_defined() {
            self.value.as_big_integer().map(Some)
        } else {
            Ok(None)
        }
    }

    pub fn as_big_decimal(&self) -> Result<BigDecimal, ConversionError> {
        self.value.as_big_decimal()
    }

    pub fn as_big_decimal_or_null(&self) -> Result<Option<BigDecimal>, ConversionError> {
        if self.is_defined() {
            self.value.as_big_decimal().map(Some)
        } else {
            Ok(None)
        }
    }

    /// The literal string form of this node. Total; an undefined node
    /// renders as the literal `undefined`.
    pub fn as_string(&self) -> String {
        self.value.as_string()
    }

    pub fn as_string_or(&self, default: &str) -> String {
        if self.is_defined() {
            self.value.as_string()
        } else {
            default.to_owned()
        }
    }

    pub fn as_string_or_null(&self) -> Option<String> {
        if self.is_defined() {
            Some(self.value.as_string())
        } else {
            None
        }
    }

    pub fn as_bytes(&self) -> Result<Vec<u8>, ConversionError> {
        self.value.as_bytes()
    }

    pub fn as_bytes_or_null(&self) -> Result<Option<Vec<u8>>, ConversionError> {
        if self.is_defined() {
            self.value.as_bytes().map(Some)
        } else {
            Ok(None)
        }
    }

    pub fn as_expression(&self) -> Result<ValueExpression, ConversionError> {
        self.value.as_expression()
    }

    pub fn as_type(&self) -> Result<ModelType, ConversionError> {
        self.value.as_type()
    }

    pub fn as_property(&self) -> Result<Property, ConversionError> {
        self.value.as_property()
    }

    pub fn as_property_list(&self) -> Result<Vec<Property>, ConversionError> {
        self.value.as_property_list()
    }

    /// The children of a LIST, the entries of an OBJECT as PROPERTY nodes,
    /// or a PROPERTY as a single-element list.
    pub fn as_list(&self) -> Result<Vec<ModelNode>, ConversionError> {
        self.value.as_list()
    }

    /// This node interpolated into an OBJECT.
    pub fn as_object(&self) -> Result<ModelNode, ConversionError> {
        self.value.as_object()
    }

    /// Render the native DMR form, on one line when `compact`.
    pub fn to_dmr_string(&self, compact: bool) -> String {
        if compact {
            let mut writer = DmrWriter::new(String::new());
            self.value
                .write(&mut writer)
                .expect("model serialization is always well-formed");
            writer.into_inner()
        } else {
            let mut out = String::new();
            self.value
                .format_dmr(&mut out, 0, true)
                .expect("writing to a String cannot fail");
            out
        }
    }

    /// Render the JSON-compatible form, on one line when `compact`.
    pub fn to_json_string(&self, compact: bool) -> String {
        if compact {
            let mut writer = JsonWriter::new(String::new());
            self.value
                .write(&mut writer)
                .expect("model serialization is always well-formed");
            writer.into_inner()
        } else {
            let mut out = String::new();
            self.value
                .format_json(&mut out, 0, true)
                .expect("writing to a String cannot fail");
            out
        }
    }

    /// Write the native DMR form to a byte stream (UTF-8).
    pub fn write_dmr<W: io::Write>(&self, mut out: W, compact: bool) -> Result<(), ModelError> {
        out.write_all(self.to_dmr_string(compact).as_bytes())?;
        Ok(())
    }

    /// Write the JSON form to a byte stream (UTF-8).
    pub fn write_json<W: io::Write>(&self, mut out: W, compact: bool) -> Result<(), ModelError> {
        out.write_all(self.to_json_string(compact).as_bytes())?;
        Ok(())
    }

    /// Parse a node from its native DMR textual form.
    pub fn from_dmr_str(input: &str) -> Result<ModelNode, ModelError> {
        let mut reader = DmrReader::new(input);
        let node = factory::read_node(&mut reader)?;
        reader.finish()?;
        Ok(node)
    }

    /// Parse a node from its JSON textual form.
    pub fn from_json_str(input: &str) -> Result<ModelNode, ModelError> {
        let mut reader = JsonReader::new(input);
        let node = factory::read_node(&mut reader)?;
        reader.finish()?;
        Ok(node)
    }

    /// Parse a node from a UTF-8 byte stream holding the DMR textual form.
    pub fn from_dmr_stream<R: io::Read>(mut input: R) -> Result<ModelNode, ModelError> {
        let mut text = String::new();
        input.read_to_string(&mut text)?;
        ModelNode::from_dmr_str(&text)
    }

    /// Parse a node from a UTF-8 byte stream holding the JSON textual form.
    pub fn from_json_stream<R: io::Read>(mut input: R) -> Result<ModelNode, ModelError> {
        let mut text = String::new();
        input.read_to_string(&mut text)?;
        ModelNode::from_json_str(&text)
    }

    /// Drive a model writer with this node's events.
    pub fn write<W: ModelWriter + ?Sized>(&self, writer: &mut W) -> Result<(), ModelError> {
        self.value.write(writer)
    }

    /// Write this node's content in the self-delimiting binary format.
    pub fn write_binary<W: io::Write>(&self, mut out: W) -> Result<(), ModelError> {
        binary::write_value(&self.value, &mut out)
    }

    /// Read a node back from the binary format.
    pub fn from_binary<R: io::Read>(mut input: R) -> Result<ModelNode, ModelError> {
        Ok(ModelNode::from_value(binary::read_value(&mut input)?))
    }

    /// The binary form wrapped in line-wrapped base64 text.
    pub fn to_base64_string(&self) -> String {
        let mut buffer = Vec::new();
        self.write_binary(&mut buffer)
            .expect("model serialization is always well-formed");
        base64::encode(&buffer)
    }

    /// Write the base64-wrapped binary form to a byte stream.
    pub fn write_base64<W: io::Write>(&self, mut out: W) -> Result<(), ModelError> {
        out.write_all(self.to_base64_string().as_bytes())?;
        Ok(())
    }

    /// Decode a node from base64 text produced by
    /// [`to_base64_string`](ModelNode::to_base64_string).
    pub fn from_base64_str(input: &str) -> Result<ModelNode, ModelError> {
        let bytes = base64::decode(input)?;
        ModelNode::from_binary(&bytes[..])
    }

    /// Decode a node from a stream of base64 text.
    pub fn from_base64<R: io::Read>(mut input: R) -> Result<ModelNode, ModelError> {
        let mut text = String::new();
        input.read_to_string(&mut text)?;
        ModelNode::from_base64_str(&text)
    }
}

impl Default for ModelNode {
    fn default() -> Self {
        ModelNode::new()
    }
}

impl Clone for ModelNode {
    /// A deep copy. The copy (and every node inside it) is unprotected even
    /// when the original is protected.
    fn clone(&self) -> Self {
        ModelNode {
            protected: false,
            value: self.value.clone(),
        }
    }
}

impl PartialEq for ModelNode {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl Eq for ModelNode {}

impl Hash for ModelNode {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.value.hash(state);
    }
}

impl Display for ModelNode {
    /// The pretty-printed native DMR form.
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        self.value.format_dmr(f, 0, true)
    }
}

impl From<bool> for ModelNode {
    fn from(value: bool) -> Self {
        ModelNode::from_value(ModelValue::Boolean(value))
    }
}

impl From<i32> for ModelNode {
    fn from(value: i32) -> Self {
        ModelNode::from_value(ModelValue::Int(value))
    }
}

impl From<i64> for ModelNode {
    fn from(value: i64) -> Self {
        ModelNode::from_value(ModelValue::Long(value))
    }
}

impl From<f64> for ModelNode {
    fn from(value: f64) -> Self {
        ModelNode::from_value(ModelValue::Double(value))
    }
}

impl From<BigInt> for ModelNode {
    fn from(value: BigInt) -> Self {
        ModelNode::from_value(ModelValue::BigInteger(value))
    }
}

impl From<BigDecimal> for ModelNode {
    fn from(value: BigDecimal) -> Self {
        ModelNode::from_value(ModelValue::BigDecimal(value))
    }
}

impl From<&str> for ModelNode {
    fn from(value: &str) -> Self {
        ModelNode::from_value(ModelValue::String(value.to_owned()))
    }
}

impl From<String> for ModelNode {
    fn from(value: String) -> Self {
        ModelNode::from_value(ModelValue::String(value))
    }
}

impl From<Vec<u8>> for ModelNode {
    fn from(value: Vec<u8>) -> Self {
        ModelNode::from_value(ModelValue::Bytes(value))
    }
}

impl From<&[u8]> for ModelNode {
    fn from(value: &[u8]) -> Self {
        ModelNode::from_value(ModelValue::Bytes(value.to_vec()))
    }
}

impl From<ValueExpression> for ModelNode {
    fn from(value: ValueExpression) -> Self {
        ModelNode::from_value(ModelValue::Expression(value))
    }
}

impl From<ModelType> for ModelNode {
    fn from(value: ModelType) -> Self {
        ModelNode::from_value(ModelValue::Type(value))
    }
}

impl From<Property> for ModelNode {
    fn from(value: Property) -> Self {
        ModelNode::from_value(ModelValue::Property(value))
    }
}

impl From<&ModelNode> for ModelNode {
    /// An explicit deep copy, mirroring the copy-on-set behaviour of the
    /// by-reference API this type descends from.
    fn from(value: &ModelNode) -> Self {
        value.clone()
    }
}
