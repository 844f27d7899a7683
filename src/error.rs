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

use crate::types::ModelType;
use std::io;
use thiserror::Error;

/// Error raised by the readers, writers and codecs: a well-formedness or
/// grammar violation, malformed base64 or binary data, or an underlying I/O
/// failure. Grammar violations carry an "Expecting ..." message derived from
/// the state of the grammar analyzer at the point of failure.
#[derive(Debug, Error)]
pub enum ModelError {
    #[error("{0}")]
    Grammar(String),

    #[error("invalid object: unrecognized type character '{0}'")]
    InvalidTypeChar(char),

    #[error("incorrect data: '{0}' is not a base64 character")]
    IncorrectData(char),

    #[error("invalid modified UTF-8 sequence")]
    InvalidUtf,

    #[error(transparent)]
    Io(#[from] io::Error),

    #[error(transparent)]
    Fmt(#[from] std::fmt::Error),
}

impl ModelError {
    pub(crate) fn grammar(message: impl Into<String>) -> ModelError {
        ModelError::Grammar(message.into())
    }
}

/// Error raised when a node cannot be converted to the requested
/// representation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConversionError {
    /// The node is undefined and the conversion has no `or`/`or_null`
    /// fallback.
    #[error("node is undefined")]
    Undefined,

    /// The conversion is not defined for the node's current type.
    #[error("no conversion from {from} to {target}")]
    Unsupported {
        from: ModelType,
        target: &'static str,
    },

    /// The node's textual payload does not parse as the requested type.
    #[error("invalid {target} literal: \"{literal}\"")]
    InvalidLiteral {
        target: &'static str,
        literal: String,
    },
}

impl ConversionError {
    pub(crate) fn unsupported(from: ModelType, target: &'static str) -> ConversionError {
        ConversionError::Unsupported { from, target }
    }

    pub(crate) fn invalid(target: &'static str, literal: impl Into<String>) -> ConversionError {
        ConversionError::InvalidLiteral {
            target,
            literal: literal.into(),
        }
    }
}

/// Error raised by [`ModelNode::require`](crate::ModelNode::require) and
/// [`ModelNode::require_index`](crate::ModelNode::require_index) when the
/// requested child is absent.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("no such element: {0}")]
pub struct NoSuchElement(pub String);

/// Error raised when an expression cannot be resolved against the supplied
/// environment and carries no default.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unresolved expression \"{0}\"")]
pub struct ExpressionError(pub String);
