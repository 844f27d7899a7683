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

use crate::error::ConversionError;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// The type of a [`ModelNode`](crate::ModelNode).
///
/// Every node reports exactly one of these tags; the tag and the payload of a
/// node always agree. `ModelType` is itself a value type: a node of type
/// [`ModelType::Type`] carries another tag as its payload.
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub enum ModelType {
    BigDecimal,
    BigInteger,
    Boolean,
    Bytes,
    Double,
    Expression,
    Int,
    List,
    Long,
    Object,
    Property,
    String,
    Type,
    Undefined,
}

/// All fourteen tags, in the order of their canonical names.
pub const MODEL_TYPES: [ModelType; 14] = [
    ModelType::BigDecimal,
    ModelType::BigInteger,
    ModelType::Boolean,
    ModelType::Bytes,
    ModelType::Double,
    ModelType::Expression,
    ModelType::Int,
    ModelType::List,
    ModelType::Long,
    ModelType::Object,
    ModelType::Property,
    ModelType::String,
    ModelType::Type,
    ModelType::Undefined,
];

impl ModelType {
    /// The single byte identifying this tag in the binary format.
    pub fn type_char(self) -> char {
        match self {
            ModelType::BigDecimal => 'd',
            ModelType::BigInteger => 'i',
            ModelType::Boolean => 'Z',
            ModelType::Bytes => 'b',
            ModelType::Double => 'D',
            ModelType::Expression => 'e',
            ModelType::Int => 'I',
            ModelType::List => 'l',
            ModelType::Long => 'J',
            ModelType::Object => 'o',
            ModelType::Property => 'p',
            ModelType::String => 's',
            ModelType::Type => 't',
            ModelType::Undefined => 'u',
        }
    }

    /// Resolve a binary type character back to a tag. The alternate string
    /// character `S` (used on the wire for strings longer than the classic
    /// UTF framing allows) also resolves to [`ModelType::String`].
    pub fn from_char(c: char) -> Option<ModelType> {
        match c {
            'd' => Some(ModelType::BigDecimal),
            'i' => Some(ModelType::BigInteger),
            'Z' => Some(ModelType::Boolean),
            'b' => Some(ModelType::Bytes),
            'D' => Some(ModelType::Double),
            'e' => Some(ModelType::Expression),
            'I' => Some(ModelType::Int),
            'l' => Some(ModelType::List),
            'J' => Some(ModelType::Long),
            'o' => Some(ModelType::Object),
            'p' => Some(ModelType::Property),
            's' | 'S' => Some(ModelType::String),
            't' => Some(ModelType::Type),
            'u' => Some(ModelType::Undefined),
            _ => None,
        }
    }

    /// The canonical name of this tag, as it appears in the textual dialects.
    pub fn name(self) -> &'static str {
        match self {
            ModelType::BigDecimal => "BIG_DECIMAL",
            ModelType::BigInteger => "BIG_INTEGER",
            ModelType::Boolean => "BOOLEAN",
            ModelType::Bytes => "BYTES",
            ModelType::Double => "DOUBLE",
            ModelType::Expression => "EXPRESSION",
            ModelType::Int => "INT",
            ModelType::List => "LIST",
            ModelType::Long => "LONG",
            ModelType::Object => "OBJECT",
            ModelType::Property => "PROPERTY",
            ModelType::String => "STRING",
            ModelType::Type => "TYPE",
            ModelType::Undefined => "UNDEFINED",
        }
    }
}

impl Display for ModelType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ModelType {
    type Err = ConversionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "BIG_DECIMAL" => Ok(ModelType::BigDecimal),
            "BIG_INTEGER" => Ok(ModelType::BigInteger),
            "BOOLEAN" => Ok(ModelType::Boolean),
            "BYTES" => Ok(ModelType::Bytes),
            "DOUBLE" => Ok(ModelType::Double),
            "EXPRESSION" => Ok(ModelType::Expression),
            "INT" => Ok(ModelType::Int),
            "LIST" => Ok(ModelType::List),
            "LONG" => Ok(ModelType::Long),
            "OBJECT" => Ok(ModelType::Object),
            "PROPERTY" => Ok(ModelType::Property),
            "STRING" => Ok(ModelType::String),
            "TYPE" => Ok(ModelType::Type),
            "UNDEFINED" => Ok(ModelType::Undefined),
            _ => Err(ConversionError::invalid("type", s)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn type_chars_are_distinct() {
        let mut seen = std::collections::HashSet::new();
        for ty in MODEL_TYPES {
            assert!(seen.insert(ty.type_char()), "duplicate char for {}", ty);
        }
    }

    #[test]
    fn type_chars_round_trip() {
        for ty in MODEL_TYPES {
            assert_eq!(ModelType::from_char(ty.type_char()), Some(ty));
        }
        assert_eq!(ModelType::from_char('S'), Some(ModelType::String));
        assert_eq!(ModelType::from_char('x'), None);
    }

    #[test]
    fn names_round_trip() {
        for ty in MODEL_TYPES {
            assert_eq!(ty.name().parse::<ModelType>(), Ok(ty));
        }
        assert!("int".parse::<ModelType>().is_err());
    }
}
