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

use crate::{
    BigDecimal, BigInt, ConversionError, MapEnvironment, ModelNode, ModelType, Property,
    ValueExpression,
};
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

fn big_int() -> BigInt {
    BigInt::from_str("170141183460469231731687303715884105728").unwrap()
}

fn big_dec() -> BigDecimal {
    BigDecimal::from_str("17.55").unwrap()
}

/// A spread of trees covering every tag, nesting and edge payloads.
fn sample_values() -> Vec<ModelNode> {
    let mut samples: Vec<ModelNode> = vec![
        ModelNode::new(),
        ModelNode::from(true),
        ModelNode::from(false),
        ModelNode::from(0),
        ModelNode::from(-42),
        ModelNode::from(i32::MAX),
        ModelNode::from(i32::MIN),
        ModelNode::from(5_000_000_000i64),
        ModelNode::from(-3i64),
        ModelNode::from(i64::MIN),
        ModelNode::from(5.0),
        ModelNode::from(-0.0),
        ModelNode::from(-2.5e10),
        ModelNode::from(0.5),
        ModelNode::from(big_int()),
        ModelNode::from(BigInt::from(-17)),
        ModelNode::from(big_dec()),
        ModelNode::from(BigDecimal::from_str("-0.001").unwrap()),
        ModelNode::from(""),
        ModelNode::from("hello world"),
        ModelNode::from("esc \" \\ \n \t \u{1} text"),
        ModelNode::from("καλημέρα 😀"),
        ModelNode::from(Vec::<u8>::new()),
        ModelNode::from(vec![0xde, 0xad, 0xbe, 0xef]),
        ModelNode::from(ValueExpression::new("${foo:bar}")),
        ModelNode::from(ModelType::Int),
        ModelNode::from(ModelType::Undefined),
        ModelNode::from(ModelType::Object),
        ModelNode::from(Property::from(("answer", 42))),
    ];

    let mut empty_list = ModelNode::new();
    empty_list.set_empty_list();
    samples.push(empty_list);

    let mut empty_object = ModelNode::new();
    empty_object.set_empty_object();
    samples.push(empty_object);

    let mut list = ModelNode::new();
    list.push(1).push("x").push(true);
    list.push(ModelNode::from(Property::from(("k", 7))));
    list.add_empty_object().get("inner").set(2i64);
    samples.push(list);

    let mut object = ModelNode::new();
    object.get("first").set(1);
    object.get("second").get("nested").set("deep");
    object.get("third").push(1).push(2);
    object.get("bytes").set(vec![1u8, 2, 3]);
    object.get("expr").set(ValueExpression::new("${a}"));
    object.get("ty").set(ModelType::List);
    object.get("undef");
    object.get("big").set(big_int());
    object.get("dec").set(big_dec());
    object.get("longish").set(5_000_000_000i64);
    samples.push(object);

    let mut inner = ModelNode::new();
    inner.get("x").push(true);
    inner.get("y").set(0.25);
    let mut property = ModelNode::new();
    property.set_property("outer", inner);
    samples.push(property);

    samples
}

/// Whether a JSON round trip reproduces the tree exactly: small LONGs and
/// bare big numbers reclassify on read, everything else (sentinels included)
/// survives.
fn json_exact(node: &ModelNode) -> bool {
    match node.model_type() {
        ModelType::Long => node
            .as_long()
            .map(|n| i32::try_from(n).is_err())
            .unwrap_or(false),
        ModelType::BigInteger | ModelType::BigDecimal => false,
        ModelType::List => node
            .as_list()
            .map(|items| items.iter().all(json_exact))
            .unwrap_or(false),
        ModelType::Object => node.keys().iter().all(|key| {
            node.require(key)
                .map(json_exact)
                .unwrap_or(false)
        }),
        ModelType::Property => node
            .as_property()
            .map(|p| json_exact(p.value()))
            .unwrap_or(false),
        _ => true,
    }
}

fn hash_of(node: &ModelNode) -> u64 {
    let mut hasher = DefaultHasher::new();
    node.hash(&mut hasher);
    hasher.finish()
}

#[test]
fn binary_round_trip() {
    for value in sample_values() {
        let mut buffer = Vec::new();
        value.write_binary(&mut buffer).unwrap();
        let decoded = ModelNode::from_binary(&buffer[..]).unwrap();
        assert_eq!(decoded, value, "binary round trip failed for {}", value);
    }
}

#[test]
fn base64_round_trip() {
    for value in sample_values() {
        let encoded = value.to_base64_string();
        let decoded = ModelNode::from_base64_str(&encoded).unwrap();
        assert_eq!(decoded, value, "base64 round trip failed for {}", value);
    }
}

#[test]
fn dmr_compact_round_trip() {
    for value in sample_values() {
        let text = value.to_dmr_string(true);
        let parsed = ModelNode::from_dmr_str(&text).unwrap();
        assert_eq!(parsed, value, "compact DMR round trip failed for {}", text);
    }
}

#[test]
fn dmr_pretty_round_trip() {
    for value in sample_values() {
        let text = value.to_dmr_string(false);
        let parsed = ModelNode::from_dmr_str(&text).unwrap();
        assert_eq!(parsed, value, "pretty DMR round trip failed for {}", text);
    }
}

#[test]
fn json_compact_round_trip() {
    for value in sample_values().into_iter().filter(json_exact) {
        let text = value.to_json_string(true);
        let parsed = ModelNode::from_json_str(&text).unwrap();
        assert_eq!(parsed, value, "compact JSON round trip failed for {}", text);
    }
}

#[test]
fn json_pretty_round_trip() {
    for value in sample_values().into_iter().filter(json_exact) {
        let text = value.to_json_string(false);
        let parsed = ModelNode::from_json_str(&text).unwrap();
        assert_eq!(parsed, value, "pretty JSON round trip failed for {}", text);
    }
}

#[test]
fn json_inexact_values_still_parse() {
    // Values with bare big numbers reclassify but must parse cleanly.
    for value in sample_values() {
        let text = value.to_json_string(true);
        ModelNode::from_json_str(&text).unwrap();
    }
}

#[test]
fn clone_is_independent_and_unprotected() {
    for value in sample_values() {
        let clone = value.clone();
        assert_eq!(clone, value);
        assert!(!clone.is_protected());
    }

    let mut original = ModelNode::new();
    original.get("a").set(1);
    let mut clone = original.clone();
    clone.get("a").set(2);
    clone.get("b").set(3);
    assert_eq!(original.require("a").unwrap().as_int().unwrap(), 1);
    assert!(!original.has("b"));
}

#[test]
fn clone_of_protected_tree_is_mutable() {
    let mut original = ModelNode::new();
    original.get("a").push(1);
    original.protect();
    let mut clone = original.clone();
    clone.get("a").push(2);
    assert_eq!(clone.require("a").unwrap().as_list().unwrap().len(), 2);
    assert_eq!(original.require("a").unwrap().as_list().unwrap().len(), 1);
}

#[test]
fn protect_is_transitive_and_idempotent() {
    let mut root = ModelNode::new();
    root.get("x").push(1);
    root.get("y").set_property("k", ModelNode::from("v"));
    root.protect();
    root.protect();
    assert!(root.is_protected());
    assert!(root.require("x").unwrap().is_protected());
    assert!(root.require("x").unwrap().require_index(0).unwrap().is_protected());
    assert!(root.require("y").unwrap().require("k").unwrap().is_protected());
    let before = hash_of(&root);
    assert_eq!(before, hash_of(&root));
}

#[test]
#[should_panic(expected = "unsupported mutation")]
fn protected_node_rejects_set() {
    let mut node = ModelNode::from(1);
    node.protect();
    node.set(2);
}

#[test]
#[should_panic(expected = "unsupported mutation")]
fn protected_list_rejects_append() {
    let mut root = ModelNode::new();
    root.get("x").push(1);
    root.protect();
    root.get("x").add();
}

#[test]
#[should_panic(expected = "unsupported mutation")]
fn protected_object_rejects_new_children() {
    let mut root = ModelNode::new();
    root.get("present").set(1);
    root.protect();
    root.get("absent");
}

#[test]
fn protected_object_allows_reading_existing_children() {
    let mut root = ModelNode::new();
    root.get("x").push(1);
    root.protect();
    assert_eq!(root.get("x").as_list().unwrap().len(), 1);
}

#[test]
fn object_preserves_insertion_order() {
    let mut node = ModelNode::new();
    for key in ["charlie", "alpha", "bravo"] {
        node.get(key).set(1);
    }
    assert_eq!(node.keys(), vec!["charlie", "alpha", "bravo"]);

    // Replacing a value keeps the key's position.
    node.get("alpha").set(99);
    assert_eq!(node.keys(), vec!["charlie", "alpha", "bravo"]);
    assert_eq!(node.require("alpha").unwrap().as_int().unwrap(), 99);

    // Removal preserves the order of the remaining keys.
    node.remove("charlie");
    assert_eq!(node.keys(), vec!["alpha", "bravo"]);
}

#[test]
fn auto_vivification_builds_deep_paths() {
    let mut root = ModelNode::new();
    let leaf = root.get_path(["a", "b", "c"]);
    assert!(!leaf.is_defined());
    assert!(root.has_path(["a", "b", "c"]));
    assert!(!root.has_defined_path(["a", "b", "c"]));
    assert_eq!(root.model_type(), ModelType::Object);
    assert_eq!(root.require("a").unwrap().model_type(), ModelType::Object);
}

#[test]
fn get_index_pads_with_undefined() {
    let mut node = ModelNode::new();
    node.get_index(2).set(7);
    assert_eq!(node.as_list().unwrap().len(), 3);
    assert!(!node.require_index(0).unwrap().is_defined());
    assert_eq!(node.require_index(2).unwrap().as_int().unwrap(), 7);
}

#[test]
fn equality_is_structural_and_hash_consistent() {
    for value in sample_values() {
        let clone = value.clone();
        assert_eq!(value, clone);
        assert_eq!(hash_of(&value), hash_of(&clone));
    }

    // Different tags are never equal, even when the scalars agree.
    assert_ne!(ModelNode::from(1), ModelNode::from(1i64));
    assert_ne!(ModelNode::from(1), ModelNode::from("1"));
    assert_ne!(ModelNode::from(true), ModelNode::from(1));

    // Order matters for objects.
    let mut ab = ModelNode::new();
    ab.get("a").set(1);
    ab.get("b").set(2);
    let mut ba = ModelNode::new();
    ba.get("b").set(2);
    ba.get("a").set(1);
    assert_ne!(ab, ba);
}

#[test]
fn protection_does_not_affect_equality() {
    let mut a = ModelNode::from("same");
    let b = ModelNode::from("same");
    a.protect();
    assert_eq!(a, b);
    assert_eq!(hash_of(&a), hash_of(&b));
}

#[test]
fn dmr_rejects_malformed_documents() {
    for input in [
        "",
        "[, 1]",
        "{\"a\" 1}",
        "{\"a\" => 1,}",
        "[1 2]",
        "1 2",
        "{\"a\" => }",
        "{\"a\" : 1}",
        "(\"k\" => 1",
        "(\"k\" => 1, \"j\" => 2)",
        "[1,]",
        "]",
        "bogus",
        "big 17",
        "expression 5",
    ] {
        let err = ModelNode::from_dmr_str(input).unwrap_err();
        assert!(
            !err.to_string().is_empty(),
            "no message for DMR input {:?}",
            input
        );
    }
}

#[test]
fn json_rejects_malformed_documents() {
    for input in [
        "",
        "[, 1]",
        "{\"a\" 1}",
        "{\"a\" : 1,}",
        "[1 2]",
        "1 2",
        "{\"a\" : }",
        "{\"a\" => 1}",
        "[1,]",
        "}",
        "undefined",
        "{\"PROPERTY_VALUE\" : {\"n\" : 42}",
    ] {
        let err = ModelNode::from_json_str(input).unwrap_err();
        assert!(
            !err.to_string().is_empty(),
            "no message for JSON input {:?}",
            input
        );
    }
}

#[test]
fn grammar_errors_describe_expectations() {
    let err = ModelNode::from_dmr_str("{\"a\" => 1,}").unwrap_err();
    assert!(err.to_string().starts_with("Expecting"));
    let err = ModelNode::from_json_str("[1,]").unwrap_err();
    assert!(err.to_string().starts_with("Expecting"));
}

// Conversion matrix spot checks.

#[test]
fn numeric_conversions() {
    let node = ModelNode::from(42);
    assert_eq!(node.as_long().unwrap(), 42);
    assert_eq!(node.as_double().unwrap(), 42.0);
    assert_eq!(node.as_big_integer().unwrap(), BigInt::from(42));
    assert_eq!(node.as_big_decimal().unwrap(), BigDecimal::from(42));
    assert_eq!(node.as_string(), "42");
    assert!(node.as_boolean().unwrap());
    assert_eq!(node.as_bytes().unwrap(), vec![0, 0, 0, 42]);

    let node = ModelNode::from(-1i64);
    assert_eq!(node.as_bytes().unwrap(), vec![0xff; 8]);
    assert_eq!(node.as_int().unwrap(), -1);

    assert!(!ModelNode::from(0).as_boolean().unwrap());
    assert!(!ModelNode::from(0.0).as_boolean().unwrap());
}

#[test]
fn string_conversions() {
    assert_eq!(ModelNode::from("17").as_int().unwrap(), 17);
    assert_eq!(ModelNode::from("17").as_long().unwrap(), 17);
    assert_eq!(ModelNode::from("1.5").as_double().unwrap(), 1.5);
    assert!(ModelNode::from("TRUE").as_boolean().unwrap());
    assert!(!ModelNode::from("False").as_boolean().unwrap());
    assert!(matches!(
        ModelNode::from("yes").as_boolean(),
        Err(ConversionError::InvalidLiteral { .. })
    ));
    assert!(matches!(
        ModelNode::from("abc").as_int(),
        Err(ConversionError::InvalidLiteral { .. })
    ));
    assert_eq!(
        ModelNode::from("INT").as_type().unwrap(),
        ModelType::Int
    );
    assert_eq!(ModelNode::from("hi").as_bytes().unwrap(), b"hi".to_vec());
    assert_eq!(
        ModelNode::from("99").as_big_integer().unwrap(),
        BigInt::from(99)
    );
}

#[test]
fn bytes_conversions() {
    let node = ModelNode::from(vec![0xde, 0xad, 0xbe, 0xef]);
    assert_eq!(
        node.as_big_integer().unwrap(),
        BigInt::from_signed_bytes_be(&[0xde, 0xad, 0xbe, 0xef])
    );
    assert_eq!(node.as_string(), "3q2+7w==");
    assert!(node.as_boolean().unwrap());
    assert!(!ModelNode::from(Vec::<u8>::new()).as_boolean().unwrap());

    // Arrays wider than the target narrow silently to the low-order bits.
    let wide = ModelNode::from(vec![0x01, 0, 0, 0, 0]);
    assert_eq!(wide.as_int().unwrap(), 0);
    assert_eq!(wide.as_long().unwrap(), 1i64 << 32);
}

#[test]
fn boolean_conversions() {
    let node = ModelNode::from(true);
    assert_eq!(node.as_int().unwrap(), 1);
    assert_eq!(node.as_long().unwrap(), 1);
    assert_eq!(node.as_double().unwrap(), 1.0);
    assert_eq!(node.as_string(), "true");
    assert_eq!(node.as_big_integer().unwrap(), BigInt::from(1));
    assert!(node.as_bytes().is_err());
}

#[test]
fn type_conversions() {
    let node = ModelNode::from(ModelType::List);
    assert_eq!(node.as_type().unwrap(), ModelType::List);
    assert_eq!(node.as_string(), "LIST");
    assert!(node.as_boolean().unwrap());
    assert!(!ModelNode::from(ModelType::Undefined).as_boolean().unwrap());
    assert!(node.as_int().is_err());
}

#[test]
fn container_conversions() {
    let mut list = ModelNode::new();
    list.push("key").push(5);
    assert_eq!(list.as_int().unwrap(), 2);
    assert!(list.as_boolean().unwrap());
    let property = list.as_property().unwrap();
    assert_eq!(property.name(), "key");
    assert_eq!(property.value().as_int().unwrap(), 5);

    let mut object = ModelNode::new();
    object.get("only").set(9);
    assert_eq!(object.as_int().unwrap(), 1);
    let property = object.as_property().unwrap();
    assert_eq!(property.name(), "only");

    let entries = object.as_list().unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].model_type(), ModelType::Property);

    let properties = object.as_property_list().unwrap();
    assert_eq!(properties.len(), 1);
    assert_eq!(properties[0].name(), "only");
}

#[test]
fn list_interpolates_into_object() {
    let mut list = ModelNode::new();
    list.push(ModelNode::from(Property::from(("a", 1))));
    list.push("b");
    list.push(2);
    let object = list.as_object().unwrap();
    assert_eq!(object.keys(), vec!["a", "b"]);
    assert_eq!(object.require("a").unwrap().as_int().unwrap(), 1);
    assert_eq!(object.require("b").unwrap().as_int().unwrap(), 2);
}

#[test]
fn property_node_behaviour() {
    let mut node = ModelNode::new();
    node.set_property("name", ModelNode::from(7));
    assert_eq!(node.model_type(), ModelType::Property);
    assert!(node.has("name"));
    assert!(!node.has("other"));
    assert!(node.has_index(0));
    assert_eq!(node.get("name").as_int().unwrap(), 7);
    assert_eq!(node.get_index(0).as_int().unwrap(), 7);
    assert_eq!(node.keys(), vec!["name"]);
    assert_eq!(node.as_string(), "(\"name\" => 7)");
    let list = node.as_list().unwrap();
    assert_eq!(list.len(), 1);
    let object = node.as_object().unwrap();
    assert_eq!(object.require("name").unwrap().as_int().unwrap(), 7);
}

#[test]
fn undefined_defaults_and_nulls() {
    let node = ModelNode::new();
    assert!(matches!(node.as_int(), Err(ConversionError::Undefined)));
    assert_eq!(node.as_int_or(7).unwrap(), 7);
    assert_eq!(node.as_int_or_null().unwrap(), None);
    assert_eq!(node.as_boolean_or(true).unwrap(), true);
    assert_eq!(node.as_string(), "undefined");
    assert_eq!(node.as_string_or("dflt"), "dflt");
    assert_eq!(node.as_string_or_null(), None);

    // The default applies only when the node is undefined.
    let defined = ModelNode::from("not a number");
    assert!(defined.as_int_or(7).is_err());
}

#[test]
fn require_reports_missing_children() {
    let mut node = ModelNode::new();
    node.get("present").set(1);
    assert!(node.require("present").is_ok());
    let err = node.require("absent").unwrap_err();
    assert_eq!(err.to_string(), "no such element: absent");
    let err = node.require_index(0).unwrap_err();
    assert!(!err.to_string().is_empty());
}

#[test]
fn remove_children() {
    let mut node = ModelNode::new();
    node.get("a").set(1);
    let removed = node.remove("a").unwrap();
    assert_eq!(removed.as_int().unwrap(), 1);
    assert!(node.remove("a").is_none());

    let mut list = ModelNode::new();
    list.push(1).push(2);
    let removed = list.remove_index(0).unwrap();
    assert_eq!(removed.as_int().unwrap(), 1);
    assert_eq!(list.require_index(0).unwrap().as_int().unwrap(), 2);
    assert!(list.remove_index(5).is_err());
}

#[test]
fn display_is_pretty_dmr() {
    let mut node = ModelNode::new();
    node.get("a").set(1);
    node.get("b").set(2);
    assert_eq!(node.to_string(), node.to_dmr_string(false));
    assert_eq!(
        node.to_string(),
        "{\n    \"a\" => 1,\n    \"b\" => 2\n}"
    );

    // Single-entry containers stay on one line.
    let mut single = ModelNode::new();
    single.get("only").set(1);
    assert_eq!(single.to_string(), "{\"only\" => 1}");
}

#[test]
fn expressions_resolve_in_place() {
    let mut node = ModelNode::new();
    node.get("url")
        .set(ValueExpression::new("http://${host:localhost}/"));
    node.get("plain").set(5);
    let resolved = node.resolve().unwrap();
    assert_eq!(
        resolved.require("url").unwrap().as_string(),
        "http://localhost/"
    );
    assert_eq!(resolved.require("plain").unwrap().as_int().unwrap(), 5);
    // The original keeps its expression.
    assert_eq!(
        node.require("url").unwrap().model_type(),
        ModelType::Expression
    );
}

// Concrete end-to-end scenarios.

#[test]
fn scenario_compact_renderings() {
    let mut node = ModelNode::new();
    node.get("a").set(1);
    node.get("b").push("x").push(true);
    assert_eq!(node.to_dmr_string(true), "{\"a\" => 1,\"b\" => [\"x\",true]}");
    assert_eq!(node.to_json_string(true), "{\"a\" : 1, \"b\" : [\"x\", true]}");
}

#[test]
fn scenario_expression_resolution() {
    let node = ModelNode::from_dmr_str("{\"k\" => expression \"${foo:bar}\"}").unwrap();
    let env = MapEnvironment::new().with("foo", "7");
    let resolved = node.resolve_with(&env).unwrap();
    let mut expected = ModelNode::new();
    expected.get("k").set("7");
    assert_eq!(resolved, expected);

    let resolved = node.resolve_with(&MapEnvironment::new()).unwrap();
    let mut expected = ModelNode::new();
    expected.get("k").set("bar");
    assert_eq!(resolved, expected);
}

#[test]
fn scenario_binary_layout() {
    let mut node = ModelNode::new();
    node.push(vec![0xdeu8, 0xad, 0xbe, 0xef]);
    let mut buffer = Vec::new();
    node.write_binary(&mut buffer).unwrap();
    assert_eq!(
        buffer,
        vec![
            b'l', 0x00, 0x00, 0x00, 0x01, b'b', 0x00, 0x00, 0x00, 0x04, 0xde, 0xad, 0xbe, 0xef
        ]
    );
}

#[test]
fn scenario_property_sentinel_parses() {
    let node = ModelNode::from_json_str("{\"PROPERTY_VALUE\" : {\"n\" : 42}}").unwrap();
    assert_eq!(node.model_type(), ModelType::Property);
    let property = node.as_property().unwrap();
    assert_eq!(property.name(), "n");
    assert_eq!(property.value().as_int().unwrap(), 42);
}

#[test]
fn scenario_protected_tree_is_frozen_but_readable() {
    let mut root = ModelNode::new();
    root.get("x").push(1);
    root.protect();
    assert_eq!(root.get("x").as_list().unwrap().len(), 1);
}

#[test]
fn scenario_empty_object_base64_envelope() {
    let mut node = ModelNode::new();
    node.set_empty_object();
    let encoded = node.to_base64_string();
    assert_eq!(encoded, "bwAAAAA=");
    let decoded = ModelNode::from_base64_str(&encoded).unwrap();
    assert_eq!(decoded, node);

    let mut wire = Vec::new();
    node.write_binary(&mut wire).unwrap();
    assert_eq!(wire, vec![b'o', 0x00, 0x00, 0x00, 0x00]);
}

#[test]
fn json_sentinels_round_trip() {
    let mut node = ModelNode::new();
    node.get("bytes").set(vec![0xdeu8, 0xad]);
    node.get("expr").set(ValueExpression::new("${x}"));
    node.get("ty").set(ModelType::Boolean);
    node.get("prop")
        .set_property("k", ModelNode::from("v"));
    let parsed = ModelNode::from_json_str(&node.to_json_string(true)).unwrap();
    assert_eq!(parsed, node);
    let parsed = ModelNode::from_json_str(&node.to_json_string(false)).unwrap();
    assert_eq!(parsed, node);
}

#[test]
fn json_null_maps_to_undefined() {
    let node = ModelNode::from_json_str("null").unwrap();
    assert!(!node.is_defined());
    assert_eq!(node.to_json_string(true), "null");
}

#[test]
fn dmr_long_suffix_round_trips() {
    let node = ModelNode::from(2i64);
    let text = node.to_dmr_string(true);
    assert_eq!(text, "2L");
    let parsed = ModelNode::from_dmr_str(&text).unwrap();
    assert_eq!(parsed.model_type(), ModelType::Long);
    assert_eq!(parsed, node);
}

#[test]
fn streams_carry_utf8() {
    let mut node = ModelNode::new();
    node.get("greeting").set("καλημέρα");
    let mut bytes = Vec::new();
    node.write_dmr(&mut bytes, true).unwrap();
    let parsed = ModelNode::from_dmr_stream(&bytes[..]).unwrap();
    assert_eq!(parsed, node);

    let mut bytes = Vec::new();
    node.write_json(&mut bytes, false).unwrap();
    let parsed = ModelNode::from_json_stream(&bytes[..]).unwrap();
    assert_eq!(parsed, node);

    let mut bytes = Vec::new();
    node.write_base64(&mut bytes).unwrap();
    let parsed = ModelNode::from_base64(&bytes[..]).unwrap();
    assert_eq!(parsed, node);
}
