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

//! Event-level access to the two textual dialects.
//!
//! Both dialects share one event vocabulary and one grammar: a reader
//! tokenizes its input and surfaces a stream of [`ModelEvent`]s, a writer
//! accepts the same events and emits tokens. Every event passes through a
//! shared pushdown grammar analyzer before it is surfaced or emitted, so
//! structural violations are rejected eagerly with an "Expecting ..."
//! message and no partially-built tree.

pub(crate) mod grammar;
pub(crate) mod tokens;

mod dmr;
pub(crate) mod json;

pub use dmr::{DmrReader, DmrWriter};
pub use json::{JsonReader, JsonWriter, BYTES_KEY, EXPRESSION_KEY, PROPERTY_KEY, TYPE_KEY};

use crate::error::ModelError;
use crate::types::ModelType;
use bigdecimal::BigDecimal;
use num_bigint::BigInt;

/// One step of a model event stream: a structural delimiter or a scalar with
/// its decoded payload.
#[derive(Clone, Debug, PartialEq)]
pub enum ModelEvent {
    ObjectStart,
    ObjectEnd,
    ListStart,
    ListEnd,
    PropertyStart,
    PropertyEnd,
    String(String),
    Int(i32),
    Long(i64),
    Double(f64),
    BigInteger(BigInt),
    BigDecimal(BigDecimal),
    Bytes(Vec<u8>),
    Expression(String),
    Type(ModelType),
    Boolean(bool),
    Undefined,
}

/// A pull source of model events.
pub trait ModelReader {
    /// Produce the next event, validating it against the grammar. Separators
    /// are consumed silently; an ill-formed or exhausted input is an error.
    fn next_event(&mut self) -> Result<ModelEvent, ModelError>;

    /// Assert that the input is exhausted apart from trailing whitespace.
    fn finish(&mut self) -> Result<(), ModelError>;
}

/// A sink of model events. Each call validates the event against the
/// grammar, emits any separator the dialect requires, and then emits the
/// event's textual form.
pub trait ModelWriter {
    fn write_object_start(&mut self) -> Result<(), ModelError>;
    fn write_object_end(&mut self) -> Result<(), ModelError>;
    fn write_list_start(&mut self) -> Result<(), ModelError>;
    fn write_list_end(&mut self) -> Result<(), ModelError>;
    fn write_property_start(&mut self) -> Result<(), ModelError>;
    fn write_property_end(&mut self) -> Result<(), ModelError>;
    fn write_string(&mut self, value: &str) -> Result<(), ModelError>;
    fn write_int(&mut self, value: i32) -> Result<(), ModelError>;
    fn write_long(&mut self, value: i64) -> Result<(), ModelError>;
    fn write_double(&mut self, value: f64) -> Result<(), ModelError>;
    fn write_big_integer(&mut self, value: &BigInt) -> Result<(), ModelError>;
    fn write_big_decimal(&mut self, value: &BigDecimal) -> Result<(), ModelError>;
    fn write_bytes(&mut self, value: &[u8]) -> Result<(), ModelError>;
    fn write_expression(&mut self, value: &str) -> Result<(), ModelError>;
    fn write_type(&mut self, value: ModelType) -> Result<(), ModelError>;
    fn write_boolean(&mut self, value: bool) -> Result<(), ModelError>;
    fn write_undefined(&mut self) -> Result<(), ModelError>;
}
