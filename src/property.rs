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

use crate::node::ModelNode;

/// A single named association: the payload of a
/// [`ModelType::Property`](crate::ModelType::Property) node.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Property {
    name: String,
    value: Box<ModelNode>,
}

impl Property {
    /// Create a property with the given name and value.
    pub fn new<S: Into<String>>(name: S, value: ModelNode) -> Property {
        Property {
            name: name.into(),
            value: Box::new(value),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn value(&self) -> &ModelNode {
        &self.value
    }

    pub fn value_mut(&mut self) -> &mut ModelNode {
        &mut self.value
    }

    pub fn into_parts(self) -> (String, ModelNode) {
        (self.name, *self.value)
    }
}

impl<S: Into<String>, V: Into<ModelNode>> From<(S, V)> for Property {
    fn from(pair: (S, V)) -> Self {
        let (name, value) = pair;
        Property::new(name, value.into())
    }
}
