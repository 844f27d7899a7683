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

//! Dynamic Model Representation: a schemaless, self-describing tree of typed
//! values used as a neutral interchange format between management clients
//! and servers.
//!
//! The central type is [`ModelNode`], a mutable handle over a tagged value.
//! A node renders to and parses from two textual dialects (the native DMR
//! form and a JSON-compatible form), round-trips through a self-delimiting
//! binary format, and can be wrapped in base64 for text-safe transport.
//!
//! ```
//! use dmr::ModelNode;
//!
//! let mut node = ModelNode::new();
//! node.get("a").set(1);
//! node.get("b").push("x").push(true);
//! assert_eq!(node.to_dmr_string(true), r#"{"a" => 1,"b" => ["x",true]}"#);
//! assert_eq!(node.to_json_string(true), r#"{"a" : 1, "b" : ["x", true]}"#);
//!
//! let parsed = ModelNode::from_dmr_str(&node.to_dmr_string(true)).unwrap();
//! assert_eq!(parsed, node);
//! ```
//!
//! Child access auto-vivifies: `get` on an undefined node turns it into an
//! OBJECT (or a LIST for indexed access) and creates the requested child, so
//! deep paths can be built without ceremony. Use [`ModelNode::has`] or
//! [`ModelNode::require`] for pure queries.
//!
//! [`ModelNode::protect`] freezes a node and its whole subtree; mutating a
//! protected node panics. Clones are deep and always unprotected.

mod base64;
mod binary;
mod error;
mod expression;
mod factory;
mod node;
mod property;
pub mod stream;
mod types;
mod value;

#[cfg(test)]
mod tests;

pub use error::{ConversionError, ExpressionError, ModelError, NoSuchElement};
pub use expression::{Environment, MapEnvironment, ValueExpression};
pub use node::ModelNode;
pub use property::Property;
pub use types::{ModelType, MODEL_TYPES};

pub use bigdecimal::BigDecimal;
pub use num_bigint::BigInt;
