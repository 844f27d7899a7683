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
use crate::error::ModelError;
use crate::stream::grammar::GrammarAnalyzer;
use crate::stream::tokens::{self, Number};
use crate::stream::{ModelEvent, ModelReader, ModelWriter};
use crate::types::ModelType;
use bigdecimal::BigDecimal;
use num_bigint::BigInt;
use std::fmt::Write;
use std::str::FromStr;

/// JSON object key marking an encoded TYPE value.
pub const TYPE_KEY: &str = "TYPE_MODEL_VALUE";
/// JSON object key marking an encoded EXPRESSION value.
pub const EXPRESSION_KEY: &str = "EXPRESSION_VALUE";
/// JSON object key marking an encoded BYTES value.
pub const BYTES_KEY: &str = "BYTES_VALUE";
/// JSON object key marking an encoded PROPERTY value.
pub const PROPERTY_KEY: &str = "PROPERTY_VALUE";

fn is_ws(c: char) -> bool {
    c == ' ' || c == '\t' || c == '\r' || c == '\n'
}

fn skip_ws(input: &str) -> &str {
    input.trim_start_matches(is_ws)
}

/// What an open brace or bracket in the input stands for; a `Property` scope
/// carries an extra outer brace that is consumed when the sentinel closes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Scope {
    Object,
    List,
    Property,
}

/// An event reader for the JSON-compatible dialect.
///
/// Plain JSON structures map directly onto OBJECT and LIST events, `null`
/// maps to UNDEFINED and numbers are classified by magnitude. The reserved
/// single-key sentinel objects are promoted to the corresponding non-JSON
/// events.
pub struct JsonReader<'a> {
    rem: &'a str,
    analyzer: GrammarAnalyzer,
    scopes: Vec<Scope>,
}

impl<'a> JsonReader<'a> {
    pub fn new(input: &'a str) -> JsonReader<'a> {
        JsonReader {
            rem: input,
            analyzer: GrammarAnalyzer::new(),
            scopes: Vec::new(),
        }
    }

    fn advance(&mut self, bytes: usize) {
        self.rem = &self.rem[bytes..];
    }

    fn skip_ws(&mut self) {
        self.rem = skip_ws(self.rem);
    }

    /// Handle an opening brace: either one of the four sentinel forms or the
    /// start of a plain object.
    fn open_brace(&mut self) -> Result<ModelEvent, ModelError> {
        let inner = skip_ws(&self.rem[1..]);
        if inner.starts_with('"') {
            if let Ok((after_key, key)) = tokens::string_literal(inner) {
                match &*key {
                    EXPRESSION_KEY => {
                        if let Some((rest, text)) = sentinel_string(after_key) {
                            self.analyzer.put_expression()?;
                            self.rem = rest;
                            return Ok(ModelEvent::Expression(text));
                        }
                    }
                    BYTES_KEY => {
                        if let Some((rest, text)) = sentinel_string(after_key) {
                            let data = base64::decode(&text)?;
                            self.analyzer.put_bytes()?;
                            self.rem = rest;
                            return Ok(ModelEvent::Bytes(data));
                        }
                    }
                    TYPE_KEY => {
                        if let Some((rest, text)) = sentinel_string(after_key) {
                            let ty = ModelType::from_str(&text).map_err(|_| {
                                ModelError::Grammar(format!("Invalid type name '{}'", text))
                            })?;
                            self.analyzer.put_type()?;
                            self.rem = rest;
                            return Ok(ModelEvent::Type(ty));
                        }
                    }
                    PROPERTY_KEY => {
                        let rest = skip_ws(after_key);
                        if let Some(rest) = rest.strip_prefix(':') {
                            let rest = skip_ws(rest);
                            if let Some(rest) = rest.strip_prefix('{') {
                                self.analyzer.put_property_start()?;
                                self.scopes.push(Scope::Property);
                                self.rem = rest;
                                return Ok(ModelEvent::PropertyStart);
                            }
                        }
                    }
                    _ => {}
                }
            }
        }
        self.analyzer.put_object_start()?;
        self.scopes.push(Scope::Object);
        self.advance(1);
        Ok(ModelEvent::ObjectStart)
    }

    fn close_brace(&mut self) -> Result<ModelEvent, ModelError> {
        match self.scopes.pop() {
            Some(Scope::Property) => {
                self.analyzer.put_property_end()?;
                self.advance(1);
                self.skip_ws();
                if !self.rem.starts_with('}') {
                    return Err(ModelError::grammar("Expecting '}'"));
                }
                self.advance(1);
                Ok(ModelEvent::PropertyEnd)
            }
            _ => {
                self.analyzer.put_object_end()?;
                self.advance(1);
                Ok(ModelEvent::ObjectEnd)
            }
        }
    }

    fn number(&mut self) -> Result<ModelEvent, ModelError> {
        match tokens::json_number(self.rem) {
            Ok((rest, number)) => {
                self.rem = rest;
                self.analyzer.put_number()?;
                Ok(match number {
                    Number::Int(n) => ModelEvent::Int(n),
                    Number::Long(n) => ModelEvent::Long(n),
                    Number::Double(x) => ModelEvent::Double(x),
                    Number::BigInteger(n) => ModelEvent::BigInteger(n),
                    Number::BigDecimal(d) => ModelEvent::BigDecimal(d),
                })
            }
            Err(_) => Err(ModelError::grammar("Invalid numeric literal")),
        }
    }

    fn word(&mut self) -> Result<ModelEvent, ModelError> {
        let word = match tokens::identifier(self.rem) {
            Ok((rest, word)) => {
                self.rem = rest;
                word
            }
            Err(_) => return Err(self.unexpected()),
        };
        match word {
            "true" => {
                self.analyzer.put_boolean()?;
                Ok(ModelEvent::Boolean(true))
            }
            "false" => {
                self.analyzer.put_boolean()?;
                Ok(ModelEvent::Boolean(false))
            }
            "null" => {
                self.analyzer.put_undefined()?;
                Ok(ModelEvent::Undefined)
            }
            _ => Err(ModelError::Grammar(format!("Unexpected token '{}'", word))),
        }
    }

    fn unexpected(&mut self) -> ModelError {
        match self.rem.chars().next() {
            Some(c) => ModelError::Grammar(format!("Unexpected character '{}'", c)),
            None => ModelError::Grammar(self.analyzer.expecting()),
        }
    }
}

/// Parse the tail of a string-valued sentinel: `: "..."` followed by the
/// closing brace. Returns the remaining input and the decoded string.
fn sentinel_string(input: &str) -> Option<(&str, String)> {
    let rest = skip_ws(input);
    let rest = rest.strip_prefix(':')?;
    let rest = skip_ws(rest);
    let (rest, value) = tokens::string_literal(rest).ok()?;
    let rest = skip_ws(rest);
    let rest = rest.strip_prefix('}')?;
    Some((rest, value.into_owned()))
}

impl<'a> ModelReader for JsonReader<'a> {
    fn next_event(&mut self) -> Result<ModelEvent, ModelError> {
        loop {
            self.skip_ws();
            let c = match self.rem.chars().next() {
                Some(c) => c,
                None => return Err(ModelError::Grammar(self.analyzer.expecting())),
            };
            match c {
                '{' => return self.open_brace(),
                '}' => return self.close_brace(),
                '[' => {
                    self.analyzer.put_list_start()?;
                    self.scopes.push(Scope::List);
                    self.advance(1);
                    return Ok(ModelEvent::ListStart);
                }
                ']' => {
                    self.analyzer.put_list_end()?;
                    self.scopes.pop();
                    self.advance(1);
                    return Ok(ModelEvent::ListEnd);
                }
                ',' => {
                    self.analyzer.put_comma()?;
                    self.advance(1);
                }
                ':' => {
                    self.analyzer.put_colon()?;
                    self.advance(1);
                }
                '"' => match tokens::string_literal(self.rem) {
                    Ok((rest, value)) => {
                        self.rem = rest;
                        self.analyzer.put_string()?;
                        return Ok(ModelEvent::String(value.into_owned()));
                    }
                    Err(_) => return Err(ModelError::grammar("Invalid string literal")),
                },
                c if c.is_ascii_digit() || c == '-' => return self.number(),
                c if c.is_ascii_alphabetic() => return self.word(),
                _ => return Err(self.unexpected()),
            }
        }
    }

    fn finish(&mut self) -> Result<(), ModelError> {
        self.skip_ws();
        if !self.analyzer.is_finished() {
            return Err(ModelError::Grammar(self.analyzer.expecting()));
        }
        if !self.rem.is_empty() {
            return Err(ModelError::grammar("Expecting EOF"));
        }
        Ok(())
    }
}

/// An event writer for the JSON-compatible dialect. Separators are supplied
/// automatically (`, ` and ` : `); the non-JSON scalars are emitted as
/// sentinel objects.
pub struct JsonWriter<W> {
    out: W,
    analyzer: GrammarAnalyzer,
}

impl<W: Write> JsonWriter<W> {
    pub fn new(out: W) -> JsonWriter<W> {
        JsonWriter {
            out,
            analyzer: GrammarAnalyzer::new(),
        }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn separate(&mut self) -> Result<(), ModelError> {
        if self.analyzer.is_comma_expected() {
            self.analyzer.put_comma()?;
            self.out.write_str(", ")?;
        } else if self.analyzer.is_colon_expected() {
            self.analyzer.put_colon()?;
            self.out.write_str(" : ")?;
        }
        Ok(())
    }
}

impl<W: Write> ModelWriter for JsonWriter<W> {
    fn write_object_start(&mut self) -> Result<(), ModelError> {
        self.separate()?;
        self.analyzer.put_object_start()?;
        self.out.write_char('{')?;
        Ok(())
    }

    fn write_object_end(&mut self) -> Result<(), ModelError> {
        self.analyzer.put_object_end()?;
        self.out.write_char('}')?;
        Ok(())
    }

    fn write_list_start(&mut self) -> Result<(), ModelError> {
        self.separate()?;
        self.analyzer.put_list_start()?;
        self.out.write_char('[')?;
        Ok(())
    }

    fn write_list_end(&mut self) -> Result<(), ModelError> {
        self.analyzer.put_list_end()?;
        self.out.write_char(']')?;
        Ok(())
    }

    fn write_property_start(&mut self) -> Result<(), ModelError> {
        self.separate()?;
        self.analyzer.put_property_start()?;
        write!(self.out, "{{\"{}\" : {{", PROPERTY_KEY)?;
        Ok(())
    }

    fn write_property_end(&mut self) -> Result<(), ModelError> {
        self.analyzer.put_property_end()?;
        self.out.write_str("}}")?;
        Ok(())
    }

    fn write_string(&mut self, value: &str) -> Result<(), ModelError> {
        self.separate()?;
        self.analyzer.put_string()?;
        tokens::write_quoted(&mut self.out, value)?;
        Ok(())
    }

    fn write_int(&mut self, value: i32) -> Result<(), ModelError> {
        self.separate()?;
        self.analyzer.put_number()?;
        write!(self.out, "{}", value)?;
        Ok(())
    }

    fn write_long(&mut self, value: i64) -> Result<(), ModelError> {
        self.separate()?;
        self.analyzer.put_number()?;
        write!(self.out, "{}", value)?;
        Ok(())
    }

    fn write_double(&mut self, value: f64) -> Result<(), ModelError> {
        self.separate()?;
        self.analyzer.put_number()?;
        tokens::write_f64(&mut self.out, value)?;
        Ok(())
    }

    fn write_big_integer(&mut self, value: &BigInt) -> Result<(), ModelError> {
        self.separate()?;
        self.analyzer.put_number()?;
        write!(self.out, "{}", value)?;
        Ok(())
    }

    fn write_big_decimal(&mut self, value: &BigDecimal) -> Result<(), ModelError> {
        self.separate()?;
        self.analyzer.put_number()?;
        write!(self.out, "{}", value)?;
        Ok(())
    }

    fn write_bytes(&mut self, value: &[u8]) -> Result<(), ModelError> {
        self.separate()?;
        self.analyzer.put_bytes()?;
        write!(
            self.out,
            "{{\"{}\" : \"{}\"}}",
            BYTES_KEY,
            base64::encode_plain(value)
        )?;
        Ok(())
    }

    fn write_expression(&mut self, value: &str) -> Result<(), ModelError> {
        self.separate()?;
        self.analyzer.put_expression()?;
        write!(self.out, "{{\"{}\" : ", EXPRESSION_KEY)?;
        tokens::write_quoted(&mut self.out, value)?;
        self.out.write_char('}')?;
        Ok(())
    }

    fn write_type(&mut self, value: ModelType) -> Result<(), ModelError> {
        self.separate()?;
        self.analyzer.put_type()?;
        write!(self.out, "{{\"{}\" : \"{}\"}}", TYPE_KEY, value.name())?;
        Ok(())
    }

    fn write_boolean(&mut self, value: bool) -> Result<(), ModelError> {
        self.separate()?;
        self.analyzer.put_boolean()?;
        self.out.write_str(if value { "true" } else { "false" })?;
        Ok(())
    }

    fn write_undefined(&mut self) -> Result<(), ModelError> {
        self.separate()?;
        self.analyzer.put_undefined()?;
        self.out.write_str("null")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn events(input: &str) -> Result<Vec<ModelEvent>, ModelError> {
        let mut reader = JsonReader::new(input);
        let mut out = Vec::new();
        while !reader.analyzer.is_finished() {
            out.push(reader.next_event()?);
        }
        reader.finish()?;
        Ok(out)
    }

    #[test]
    fn plain_json_events() {
        let evts = events("{\"a\" : 1, \"b\" : [\"x\", true, null]}").unwrap();
        assert_eq!(
            evts,
            vec![
                ModelEvent::ObjectStart,
                ModelEvent::String("a".to_owned()),
                ModelEvent::Int(1),
                ModelEvent::String("b".to_owned()),
                ModelEvent::ListStart,
                ModelEvent::String("x".to_owned()),
                ModelEvent::Boolean(true),
                ModelEvent::Undefined,
                ModelEvent::ListEnd,
                ModelEvent::ObjectEnd,
            ]
        );
    }

    #[test]
    fn numbers_classify_by_magnitude() {
        assert_eq!(events("5").unwrap(), vec![ModelEvent::Int(5)]);
        assert_eq!(
            events("5000000000").unwrap(),
            vec![ModelEvent::Long(5000000000)]
        );
        assert_eq!(events("5.5").unwrap(), vec![ModelEvent::Double(5.5)]);
    }

    #[test]
    fn expression_sentinel_is_promoted() {
        assert_eq!(
            events("{\"EXPRESSION_VALUE\" : \"${x}\"}").unwrap(),
            vec![ModelEvent::Expression("${x}".to_owned())]
        );
    }

    #[test]
    fn bytes_sentinel_is_promoted() {
        assert_eq!(
            events("{\"BYTES_VALUE\" : \"3q2+7w==\"}").unwrap(),
            vec![ModelEvent::Bytes(vec![0xde, 0xad, 0xbe, 0xef])]
        );
    }

    #[test]
    fn type_sentinel_is_promoted() {
        assert_eq!(
            events("{\"TYPE_MODEL_VALUE\" : \"INT\"}").unwrap(),
            vec![ModelEvent::Type(ModelType::Int)]
        );
    }

    #[test]
    fn property_sentinel_is_promoted() {
        let evts = events("{\"PROPERTY_VALUE\" : {\"n\" : 42}}").unwrap();
        assert_eq!(
            evts,
            vec![
                ModelEvent::PropertyStart,
                ModelEvent::String("n".to_owned()),
                ModelEvent::Int(42),
                ModelEvent::PropertyEnd,
            ]
        );
    }

    #[test]
    fn sentinel_inside_structures() {
        let evts = events("[{\"EXPRESSION_VALUE\" : \"${x}\"}, 1]").unwrap();
        assert_eq!(
            evts,
            vec![
                ModelEvent::ListStart,
                ModelEvent::Expression("${x}".to_owned()),
                ModelEvent::Int(1),
                ModelEvent::ListEnd,
            ]
        );
    }

    #[test]
    fn malformed_inputs_are_rejected() {
        for input in [
            "[, 1]",
            "{\"a\" 1}",
            "{\"a\" : 1,}",
            "[1 2]",
            "1 2",
            "{\"a\" : }",
            "{\"a\" => 1}",
            "[1,]",
            "}",
            "{\"PROPERTY_VALUE\" : {\"n\" : 42}",
        ] {
            let err = events(input).unwrap_err();
            assert!(
                !err.to_string().is_empty(),
                "no message for input {:?}",
                input
            );
        }
    }

    #[test]
    fn writer_produces_compact_form() {
        let mut writer = JsonWriter::new(String::new());
        writer.write_object_start().unwrap();
        writer.write_string("a").unwrap();
        writer.write_int(1).unwrap();
        writer.write_string("b").unwrap();
        writer.write_list_start().unwrap();
        writer.write_string("x").unwrap();
        writer.write_boolean(true).unwrap();
        writer.write_list_end().unwrap();
        writer.write_object_end().unwrap();
        assert_eq!(writer.into_inner(), "{\"a\" : 1, \"b\" : [\"x\", true]}");
    }

    #[test]
    fn writer_emits_sentinels() {
        let mut writer = JsonWriter::new(String::new());
        writer.write_property_start().unwrap();
        writer.write_string("n").unwrap();
        writer.write_int(42).unwrap();
        writer.write_property_end().unwrap();
        assert_eq!(
            writer.into_inner(),
            "{\"PROPERTY_VALUE\" : {\"n\" : 42}}"
        );
    }
}
