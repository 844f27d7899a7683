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

//! Tree builder: assembles a [`ModelNode`] from a reader's event stream.
//! The grammar analyzer inside the reader guarantees the shape of the
//! stream, so the builder only mirrors the event structure.

use crate::error::ModelError;
use crate::expression::ValueExpression;
use crate::node::ModelNode;
use crate::stream::{ModelEvent, ModelReader};

pub(crate) fn read_node<R: ModelReader + ?Sized>(reader: &mut R) -> Result<ModelNode, ModelError> {
    let event = reader.next_event()?;
    node_from(reader, event)
}

fn node_from<R: ModelReader + ?Sized>(
    reader: &mut R,
    event: ModelEvent,
) -> Result<ModelNode, ModelError> {
    match event {
        ModelEvent::String(s) => Ok(ModelNode::from(s)),
        ModelEvent::Int(n) => Ok(ModelNode::from(n)),
        ModelEvent::Long(n) => Ok(ModelNode::from(n)),
        ModelEvent::Double(x) => Ok(ModelNode::from(x)),
        ModelEvent::BigInteger(n) => Ok(ModelNode::from(n)),
        ModelEvent::BigDecimal(d) => Ok(ModelNode::from(d)),
        ModelEvent::Bytes(b) => Ok(ModelNode::from(b)),
        ModelEvent::Expression(e) => Ok(ModelNode::from(ValueExpression::new(e))),
        ModelEvent::Type(ty) => Ok(ModelNode::from(ty)),
        ModelEvent::Boolean(b) => Ok(ModelNode::from(b)),
        ModelEvent::Undefined => Ok(ModelNode::new()),
        ModelEvent::ObjectStart => {
            let mut node = ModelNode::new();
            node.set_empty_object();
            loop {
                match reader.next_event()? {
                    ModelEvent::ObjectEnd => break,
                    ModelEvent::String(key) => {
                        let event = reader.next_event()?;
                        let child = node_from(reader, event)?;
                        node.get(&key).set(child);
                    }
                    // The analyzer admits only keys and the end delimiter
                    // here.
                    _ => unreachable!(),
                }
            }
            Ok(node)
        }
        ModelEvent::ListStart => {
            let mut node = ModelNode::new();
            node.set_empty_list();
            loop {
                match reader.next_event()? {
                    ModelEvent::ListEnd => break,
                    event => {
                        let child = node_from(reader, event)?;
                        node.push(child);
                    }
                }
            }
            Ok(node)
        }
        ModelEvent::PropertyStart => {
            let key = match reader.next_event()? {
                ModelEvent::String(key) => key,
                _ => unreachable!(),
            };
            let event = reader.next_event()?;
            let child = node_from(reader, event)?;
            let mut node = ModelNode::new();
            node.set_property(key, child);
            match reader.next_event()? {
                ModelEvent::PropertyEnd => Ok(node),
                _ => unreachable!(),
            }
        }
        // A well-formed stream never yields a dangling end delimiter.
        ModelEvent::ObjectEnd | ModelEvent::ListEnd | ModelEvent::PropertyEnd => unreachable!(),
    }
}
