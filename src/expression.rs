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

use crate::error::ExpressionError;
use std::collections::HashMap;
use std::fmt::{Display, Formatter};

/// The lookup oracle consulted when an expression is resolved.
///
/// A name prefixed with `env.` that the oracle does not answer is
/// additionally tried against the process environment, with the prefix
/// stripped.
pub trait Environment {
    fn lookup(&self, name: &str) -> Option<String>;
}

impl<E: Environment + ?Sized> Environment for &E {
    fn lookup(&self, name: &str) -> Option<String> {
        (**self).lookup(name)
    }
}

impl Environment for HashMap<String, String> {
    fn lookup(&self, name: &str) -> Option<String> {
        self.get(name).cloned()
    }
}

/// An [`Environment`] backed by a fixed set of properties. The default
/// instance answers no names at all, so only `env.`-prefixed lookups against
/// the process environment can succeed through it.
#[derive(Clone, Debug, Default)]
pub struct MapEnvironment {
    properties: HashMap<String, String>,
}

impl MapEnvironment {
    pub fn new() -> MapEnvironment {
        MapEnvironment::default()
    }

    pub fn with<K: Into<String>, V: Into<String>>(mut self, name: K, value: V) -> MapEnvironment {
        self.properties.insert(name.into(), value.into());
        self
    }
}

impl Environment for MapEnvironment {
    fn lookup(&self, name: &str) -> Option<String> {
        self.properties.get(name).cloned()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for MapEnvironment {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        MapEnvironment {
            properties: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

/// A parameterized string: literal text interleaved with `${...}` segments
/// that are substituted when the expression is resolved.
///
/// Each segment holds a comma-separated list of candidate names, tried in
/// order against the environment; a candidate of the form `NAME:DEFAULT`
/// additionally supplies the fallback used when no candidate resolves.
/// Substituted text is re-scanned, so expressions may nest; the re-scan is
/// bounded by the length of the original expression.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ValueExpression {
    expression: String,
}

impl ValueExpression {
    pub fn new<S: Into<String>>(expression: S) -> ValueExpression {
        ValueExpression {
            expression: expression.into(),
        }
    }

    /// The literal expression text, placeholders included.
    pub fn expression_string(&self) -> &str {
        &self.expression
    }

    /// Resolve this expression against the given environment.
    pub fn resolve<E: Environment + ?Sized>(&self, env: &E) -> Result<String, ExpressionError> {
        let limit = self.expression.len().max(1);
        let mut current = resolve_pass(&self.expression, env, &self.expression)?;
        let mut passes = 1;
        while current.contains("${") {
            if passes >= limit {
                return Err(ExpressionError(self.expression.clone()));
            }
            current = resolve_pass(&current, env, &self.expression)?;
            passes += 1;
        }
        Ok(current)
    }
}

impl Display for ValueExpression {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.expression)
    }
}

impl From<&str> for ValueExpression {
    fn from(s: &str) -> Self {
        ValueExpression::new(s)
    }
}

impl From<String> for ValueExpression {
    fn from(s: String) -> Self {
        ValueExpression::new(s)
    }
}

fn resolve_pass<E: Environment + ?Sized>(
    input: &str,
    env: &E,
    origin: &str,
) -> Result<String, ExpressionError> {
    let mut output = String::with_capacity(input.len());
    let mut rest = input;
    while let Some(start) = rest.find("${") {
        output.push_str(&rest[..start]);
        let after = &rest[start + 2..];
        let end = after
            .find('}')
            .ok_or_else(|| ExpressionError(origin.to_owned()))?;
        output.push_str(&resolve_segment(&after[..end], env, origin)?);
        rest = &after[end + 1..];
    }
    output.push_str(rest);
    Ok(output)
}

fn resolve_segment<E: Environment + ?Sized>(
    segment: &str,
    env: &E,
    origin: &str,
) -> Result<String, ExpressionError> {
    let mut default = None;
    for alternative in segment.split(',') {
        let (name, fallback) = match alternative.split_once(':') {
            Some((name, fallback)) => (name, Some(fallback)),
            None => (alternative, None),
        };
        if let Some(value) = lookup(name.trim(), env) {
            return Ok(value);
        }
        if fallback.is_some() {
            default = fallback;
        }
    }
    match default {
        Some(value) => Ok(value.to_owned()),
        None => Err(ExpressionError(origin.to_owned())),
    }
}

fn lookup<E: Environment + ?Sized>(name: &str, env: &E) -> Option<String> {
    env.lookup(name).or_else(|| {
        name.strip_prefix("env.")
            .and_then(|variable| std::env::var(variable).ok())
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn env(pairs: &[(&str, &str)]) -> MapEnvironment {
        pairs.iter().copied().collect()
    }

    #[test]
    fn literal_text_passes_through() {
        let expr = ValueExpression::new("no placeholders here");
        assert_eq!(
            expr.resolve(&MapEnvironment::new()).unwrap(),
            "no placeholders here"
        );
    }

    #[test]
    fn simple_substitution() {
        let expr = ValueExpression::new("${name}");
        assert_eq!(expr.resolve(&env(&[("name", "value")])).unwrap(), "value");
    }

    #[test]
    fn substitution_inside_text() {
        let expr = ValueExpression::new("jdbc://${host}:${port}/db");
        let environment = env(&[("host", "localhost"), ("port", "5432")]);
        assert_eq!(
            expr.resolve(&environment).unwrap(),
            "jdbc://localhost:5432/db"
        );
    }

    #[test]
    fn default_applies_when_name_is_absent() {
        let expr = ValueExpression::new("${foo:bar}");
        assert_eq!(expr.resolve(&env(&[("foo", "7")])).unwrap(), "7");
        assert_eq!(expr.resolve(&MapEnvironment::new()).unwrap(), "bar");
    }

    #[test]
    fn alternatives_are_tried_in_order() {
        let expr = ValueExpression::new("${first,second:fallback}");
        assert_eq!(expr.resolve(&env(&[("second", "b")])).unwrap(), "b");
        assert_eq!(
            expr.resolve(&env(&[("first", "a"), ("second", "b")]))
                .unwrap(),
            "a"
        );
        assert_eq!(expr.resolve(&MapEnvironment::new()).unwrap(), "fallback");
    }

    #[test]
    fn unresolved_without_default_is_an_error() {
        let expr = ValueExpression::new("${missing}");
        let err = expr.resolve(&MapEnvironment::new()).unwrap_err();
        assert_eq!(err, ExpressionError("${missing}".to_owned()));
    }

    #[test]
    fn nested_substitution_reaches_a_fixed_point() {
        let expr = ValueExpression::new("${outer}");
        let environment = env(&[("outer", "${inner}"), ("inner", "done")]);
        assert_eq!(expr.resolve(&environment).unwrap(), "done");
    }

    #[test]
    fn cyclic_substitution_is_rejected() {
        let expr = ValueExpression::new("${a}");
        let environment = env(&[("a", "${b}"), ("b", "${a}")]);
        assert!(expr.resolve(&environment).is_err());
    }

    #[test]
    fn env_prefix_falls_back_to_process_environment() {
        std::env::set_var("DMR_EXPRESSION_TEST_VAR", "from-process");
        let expr = ValueExpression::new("${env.DMR_EXPRESSION_TEST_VAR}");
        assert_eq!(
            expr.resolve(&MapEnvironment::new()).unwrap(),
            "from-process"
        );
        // An explicit property under the full name still wins.
        let environment = env(&[("env.DMR_EXPRESSION_TEST_VAR", "from-properties")]);
        assert_eq!(expr.resolve(&environment).unwrap(), "from-properties");
        std::env::remove_var("DMR_EXPRESSION_TEST_VAR");
    }

    #[test]
    fn unterminated_placeholder_is_an_error() {
        let expr = ValueExpression::new("${open");
        assert!(expr.resolve(&MapEnvironment::new()).is_err());
    }
}
