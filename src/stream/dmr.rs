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

use crate::error::ModelError;
use crate::stream::grammar::GrammarAnalyzer;
use crate::stream::tokens::{self, Number};
use crate::stream::{ModelEvent, ModelReader, ModelWriter};
use crate::types::ModelType;
use bigdecimal::BigDecimal;
use num_bigint::BigInt;
use std::fmt::Write;
use std::str::FromStr;

fn is_ws(c: char) -> bool {
    c == ' ' || c == '\t' || c == '\r' || c == '\n'
}

/// An event reader for the native DMR dialect.
///
/// Objects use `{"key" => value}` pairs, properties are written
/// `("key" => value)`, longs carry an `L` suffix and the non-JSON scalars
/// appear as the reserved words `undefined`, `expression`, `bytes`,
/// `big integer`, `big decimal` and the type names.
pub struct DmrReader<'a> {
    rem: &'a str,
    analyzer: GrammarAnalyzer,
}

impl<'a> DmrReader<'a> {
    pub fn new(input: &'a str) -> DmrReader<'a> {
        DmrReader {
            rem: input,
            analyzer: GrammarAnalyzer::new(),
        }
    }

    fn skip_ws(&mut self) {
        self.rem = self.rem.trim_start_matches(is_ws);
    }

    fn advance(&mut self, bytes: usize) {
        self.rem = &self.rem[bytes..];
    }

    fn string(&mut self) -> Result<String, ModelError> {
        match tokens::string_literal(self.rem) {
            Ok((rest, value)) => {
                self.rem = rest;
                Ok(value.into_owned())
            }
            Err(_) => Err(ModelError::grammar("Invalid string literal")),
        }
    }

    fn number(&mut self) -> Result<ModelEvent, ModelError> {
        match tokens::dmr_number(self.rem) {
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

    fn expect_char(&mut self, expected: char) -> Result<(), ModelError> {
        self.skip_ws();
        if self.rem.starts_with(expected) {
            self.advance(expected.len_utf8());
            Ok(())
        } else {
            Err(ModelError::Grammar(format!("Expecting '{}'", expected)))
        }
    }

    fn bytes_literal(&mut self) -> Result<Vec<u8>, ModelError> {
        self.expect_char('{')?;
        let mut data = Vec::new();
        self.skip_ws();
        if !self.rem.starts_with('}') {
            loop {
                self.skip_ws();
                match tokens::byte_literal(self.rem) {
                    Ok((rest, byte)) => {
                        self.rem = rest;
                        data.push(byte);
                    }
                    Err(_) => return Err(ModelError::grammar("Invalid byte literal")),
                }
                self.skip_ws();
                if self.rem.starts_with(',') {
                    self.advance(1);
                } else {
                    break;
                }
            }
        }
        self.expect_char('}')?;
        Ok(data)
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
            "undefined" => {
                self.analyzer.put_undefined()?;
                Ok(ModelEvent::Undefined)
            }
            "expression" => {
                self.skip_ws();
                let text = self.string()?;
                self.analyzer.put_expression()?;
                Ok(ModelEvent::Expression(text))
            }
            "bytes" => {
                self.skip_ws();
                let data = self.bytes_literal()?;
                self.analyzer.put_bytes()?;
                Ok(ModelEvent::Bytes(data))
            }
            "big" => {
                self.skip_ws();
                let kind = match tokens::identifier(self.rem) {
                    Ok((rest, kind @ ("integer" | "decimal"))) => {
                        self.rem = rest;
                        kind
                    }
                    _ => {
                        return Err(ModelError::grammar(
                            "Expecting 'integer' or 'decimal' after 'big'",
                        ))
                    }
                };
                self.skip_ws();
                let body = match tokens::number_body(self.rem) {
                    Ok((rest, body)) => {
                        self.rem = rest;
                        body
                    }
                    Err(_) => return Err(ModelError::grammar("Invalid numeric literal")),
                };
                // Parse from the literal text so no decimal precision is
                // lost through an intermediate double.
                if kind == "integer" {
                    match BigInt::from_str(body) {
                        Ok(n) => {
                            self.analyzer.put_number()?;
                            Ok(ModelEvent::BigInteger(n))
                        }
                        Err(_) => Err(ModelError::grammar("Invalid big integer literal")),
                    }
                } else {
                    match BigDecimal::from_str(body) {
                        Ok(d) => {
                            self.analyzer.put_number()?;
                            Ok(ModelEvent::BigDecimal(d))
                        }
                        Err(_) => Err(ModelError::grammar("Invalid big decimal literal")),
                    }
                }
            }
            _ => match ModelType::from_str(word) {
                Ok(ty) => {
                    self.analyzer.put_type()?;
                    Ok(ModelEvent::Type(ty))
                }
                Err(_) => Err(ModelError::Grammar(format!("Unexpected token '{}'", word))),
            },
        }
    }

    fn unexpected(&mut self) -> ModelError {
        match self.rem.chars().next() {
            Some(c) => ModelError::Grammar(format!("Unexpected character '{}'", c)),
            None => ModelError::Grammar(self.analyzer.expecting()),
        }
    }
}

impl<'a> ModelReader for DmrReader<'a> {
    fn next_event(&mut self) -> Result<ModelEvent, ModelError> {
        loop {
            self.skip_ws();
            let c = match self.rem.chars().next() {
                Some(c) => c,
                None => return Err(ModelError::Grammar(self.analyzer.expecting())),
            };
            match c {
                '{' => {
                    self.analyzer.put_object_start()?;
                    self.advance(1);
                    return Ok(ModelEvent::ObjectStart);
                }
                '}' => {
                    self.analyzer.put_object_end()?;
                    self.advance(1);
                    return Ok(ModelEvent::ObjectEnd);
                }
                '[' => {
                    self.analyzer.put_list_start()?;
                    self.advance(1);
                    return Ok(ModelEvent::ListStart);
                }
                ']' => {
                    self.analyzer.put_list_end()?;
                    self.advance(1);
                    return Ok(ModelEvent::ListEnd);
                }
                '(' => {
                    self.analyzer.put_property_start()?;
                    self.advance(1);
                    return Ok(ModelEvent::PropertyStart);
                }
                ')' => {
                    self.analyzer.put_property_end()?;
                    self.advance(1);
                    return Ok(ModelEvent::PropertyEnd);
                }
                ',' => {
                    self.analyzer.put_comma()?;
                    self.advance(1);
                }
                '=' => {
                    if self.rem.starts_with("=>") {
                        self.analyzer.put_colon()?;
                        self.advance(2);
                    } else {
                        return Err(self.unexpected());
                    }
                }
                '"' => {
                    let value = self.string()?;
                    self.analyzer.put_string()?;
                    return Ok(ModelEvent::String(value));
                }
                c if c.is_ascii_digit() || c == '-' => return self.number(),
                c if c.is_ascii_alphabetic() || c == '_' => return self.word(),
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

/// An event writer for the native DMR dialect. Separators are supplied
/// automatically: `,` between items and ` => ` after a key.
pub struct DmrWriter<W> {
    out: W,
    analyzer: GrammarAnalyzer,
}

impl<W: Write> DmrWriter<W> {
    pub fn new(out: W) -> DmrWriter<W> {
        DmrWriter {
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
            self.out.write_char(',')?;
        } else if self.analyzer.is_colon_expected() {
            self.analyzer.put_colon()?;
            self.out.write_str(" => ")?;
        }
        Ok(())
    }
}

impl<W: Write> ModelWriter for DmrWriter<W> {
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
        self.out.write_char('(')?;
        Ok(())
    }

    fn write_property_end(&mut self) -> Result<(), ModelError> {
        self.analyzer.put_property_end()?;
        self.out.write_char(')')?;
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
        write!(self.out, "{}L", value)?;
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
        write!(self.out, "big integer {}", value)?;
        Ok(())
    }

    fn write_big_decimal(&mut self, value: &BigDecimal) -> Result<(), ModelError> {
        self.separate()?;
        self.analyzer.put_number()?;
        write!(self.out, "big decimal {}", value)?;
        Ok(())
    }

    fn write_bytes(&mut self, value: &[u8]) -> Result<(), ModelError> {
        self.separate()?;
        self.analyzer.put_bytes()?;
        self.out.write_str("bytes {")?;
        for (i, byte) in value.iter().enumerate() {
            if i > 0 {
                self.out.write_char(',')?;
            }
            write!(self.out, " 0x{:02x}", byte)?;
        }
        if value.is_empty() {
            self.out.write_char('}')?;
        } else {
            self.out.write_str(" }")?;
        }
        Ok(())
    }

    fn write_expression(&mut self, value: &str) -> Result<(), ModelError> {
        self.separate()?;
        self.analyzer.put_expression()?;
        self.out.write_str("expression ")?;
        tokens::write_quoted(&mut self.out, value)?;
        Ok(())
    }

    fn write_type(&mut self, value: ModelType) -> Result<(), ModelError> {
        self.separate()?;
        self.analyzer.put_type()?;
        self.out.write_str(value.name())?;
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
        self.out.write_str("undefined")?;
        Ok(())
    }
}
