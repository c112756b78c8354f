use std::collections::BTreeMap;

use super::*;
use crate::api_doc::DocError;
use crate::parameter::{Parameter, ParameterLocation};
use crate::request::RequestParts;
use crate::value_info::{FormatError, ValueInfo, ValueKind};

fn rules_for(name: &str, parameter: Parameter) -> ParameterRules {
    let mut params = BTreeMap::new();
    params.insert(name.to_string(), parameter);
    compile_rules(&params).unwrap()
}

fn bounded_id() -> ParameterRules {
    rules_for(
        "id",
        Parameter::in_path(ValueInfo::new(ValueKind::Int32).with_min("0").with_max("1000")),
    )
}

#[test]
fn test_int_bounds() {
    let rules = bounded_id();
    assert_eq!(rules.len(), 1);

    let below = RequestParts::new().with_path_param("id", "-1");
    assert_eq!(
        rules.check(&below).unwrap_err(),
        ParameterError::BelowMinimum {
            name: "id".to_string(),
            value: "-1".to_string()
        }
    );

    let above = RequestParts::new().with_path_param("id", "1001");
    let err = rules.check(&above).unwrap_err();
    assert!(matches!(err, ParameterError::AboveMaximum { .. }));
    assert_eq!(err.to_string(), "parameter id: 1001 greater than the maximum");

    let ok = RequestParts::new().with_path_param("id", "500");
    assert!(rules.check(&ok).is_ok());

    let edge = RequestParts::new().with_path_param("id", "1000");
    assert!(rules.check(&edge).is_ok());
}

#[test]
fn test_path_parameter_always_required() {
    let rules = bounded_id();
    let err = rules.check(&RequestParts::new()).unwrap_err();
    assert_eq!(
        err,
        ParameterError::Missing {
            name: "id".to_string(),
            location: ParameterLocation::Path
        }
    );
    assert_eq!(err.to_string(), "missing parameter id");
}

#[test]
fn test_optional_empty_query_passes() {
    let rules = rules_for(
        "limit",
        Parameter::in_query(ValueInfo::new(ValueKind::Int32).with_max("100")),
    );
    assert!(rules.check(&RequestParts::from_uri("/books")).is_ok());
    assert!(rules.check(&RequestParts::from_uri("/books?limit=")).is_ok());
    assert!(rules.check(&RequestParts::from_uri("/books?limit=101")).is_err());
}

#[test]
fn test_required_query_empty_is_missing() {
    let rules = rules_for(
        "q",
        Parameter::in_query(ValueInfo::new(ValueKind::String).required()),
    );
    let err = rules.check(&RequestParts::from_uri("/search?q=")).unwrap_err();
    assert_eq!(err.name(), "q");
    assert!(matches!(err, ParameterError::Missing { .. }));
}

#[test]
fn test_int_rejects_decimal_literal() {
    let rules = bounded_id();
    let parts = RequestParts::new().with_path_param("id", "6.66");
    let err = rules.check(&parts).unwrap_err();
    assert!(matches!(
        err,
        ParameterError::Invalid {
            kind: ValueKind::Int32,
            ..
        }
    ));
    assert!(err.to_string().contains("6.66 is not a valid int32"));
}

#[test]
fn test_int32_width_enforced() {
    let rules = rules_for(
        "n",
        Parameter::in_query(ValueInfo::new(ValueKind::Int32).required()),
    );
    assert!(rules.check(&RequestParts::from_uri("/?n=2147483647")).is_ok());
    assert!(rules.check(&RequestParts::from_uri("/?n=2147483648")).is_err());

    let wide = rules_for(
        "n",
        Parameter::in_query(ValueInfo::new(ValueKind::Int64).required()),
    );
    assert!(wide.check(&RequestParts::from_uri("/?n=2147483648")).is_ok());
}

#[test]
fn test_float32_out_of_range() {
    let rules = rules_for(
        "ratio",
        Parameter::in_query(ValueInfo::new(ValueKind::Float32).required()),
    );
    assert!(rules.check(&RequestParts::from_uri("/?ratio=0.5")).is_ok());
    let err = rules
        .check(&RequestParts::from_uri("/?ratio=1e39"))
        .unwrap_err();
    assert!(matches!(
        err,
        ParameterError::Invalid {
            kind: ValueKind::Float32,
            ..
        }
    ));
}

#[test]
fn test_float_bounds() {
    let rules = rules_for(
        "price",
        Parameter::in_query(ValueInfo::new(ValueKind::Float64).with_min("0.5").with_max("9.5")),
    );
    assert!(rules.check(&RequestParts::from_uri("/?price=0.5")).is_ok());
    assert!(matches!(
        rules.check(&RequestParts::from_uri("/?price=0.4")),
        Err(ParameterError::BelowMinimum { .. })
    ));
    assert!(matches!(
        rules.check(&RequestParts::from_uri("/?price=10")),
        Err(ParameterError::AboveMaximum { .. })
    ));
}

#[test]
fn test_uint_rejects_negative_and_sign() {
    let rules = rules_for(
        "count",
        Parameter::in_query(ValueInfo::new(ValueKind::Uint32).required()),
    );
    assert!(rules.check(&RequestParts::from_uri("/?count=7")).is_ok());
    assert!(rules.check(&RequestParts::from_uri("/?count=-7")).is_err());
    assert!(rules.check(&RequestParts::from_uri("/?count=%2B7")).is_err());
}

#[test]
fn test_string_enum() {
    let rules = rules_for(
        "lang",
        Parameter::in_query(ValueInfo::new(ValueKind::String).with_enum("en zh")),
    );
    assert!(rules.check(&RequestParts::from_uri("/?lang=zh")).is_ok());
    let err = rules.check(&RequestParts::from_uri("/?lang=fr")).unwrap_err();
    assert_eq!(err.to_string(), "parameter lang: enum invalid (fr)");
}

#[test]
fn test_int_enum() {
    let rules = rules_for(
        "status",
        Parameter::in_header(ValueInfo::new(ValueKind::Int64).with_enum("1 2 3")),
    );
    let ok = RequestParts::new().with_header("Status", "2");
    assert!(rules.check(&ok).is_ok());
    let bad = RequestParts::new().with_header("status", "4");
    assert!(matches!(
        rules.check(&bad),
        Err(ParameterError::InvalidEnum { .. })
    ));
}

#[test]
fn test_bool_always_compiled() {
    let rules = rules_for(
        "draft",
        Parameter::in_form_data(ValueInfo::new(ValueKind::Bool)),
    );
    assert_eq!(rules.len(), 1);
    for value in ["1", "t", "TRUE", "False", "0"] {
        let parts = RequestParts::new().with_form_value("draft", value);
        assert!(rules.check(&parts).is_ok(), "{value} should be a bool");
    }
    let parts = RequestParts::new().with_form_value("draft", "yes");
    assert!(rules.check(&parts).is_err());
}

#[test]
fn test_unconstrained_slots_produce_no_rule() {
    let mut params = BTreeMap::new();
    params.insert(
        "q".to_string(),
        Parameter::in_query(ValueInfo::new(ValueKind::String)),
    );
    params.insert(
        "upload".to_string(),
        Parameter::in_form_data(ValueInfo::new(ValueKind::File).required()),
    );
    let rules = compile_rules(&params).unwrap();
    assert!(rules.is_empty());
}

#[test]
fn test_multi_slot_parameter_compiles_each_slot() {
    let parameter = Parameter {
        in_header: Some(ValueInfo::new(ValueKind::String).required()),
        in_query: Some(ValueInfo::new(ValueKind::Int32).with_min("1")),
        ..Parameter::default()
    };
    let rules = rules_for("token", parameter);
    let locations: Vec<_> = rules.iter().map(|r| r.location()).collect();
    assert_eq!(
        locations,
        vec![ParameterLocation::Header, ParameterLocation::Query]
    );
    let parts = RequestParts::from_uri("/?token=0").with_header("token", "abc");
    assert!(matches!(
        rules.check(&parts),
        Err(ParameterError::BelowMinimum { .. })
    ));
}

#[test]
fn test_invalid_declaration_fails_compilation() {
    let mut params = BTreeMap::new();
    params.insert(
        "size".to_string(),
        Parameter::in_query(ValueInfo::new(ValueKind::Int32).with_min("x")),
    );
    let err = compile_rules(&params).unwrap_err();
    assert!(matches!(
        err,
        DocError::Parameter {
            ref name,
            source: FormatError::InvalidLimit { .. }
        } if name == "size"
    ));
}

#[test]
fn test_body_location_unsupported() {
    let rule = StringRule {
        base: RuleBase {
            name: "payload".to_string(),
            location: ParameterLocation::Body,
            required: true,
        },
        enumeration: None,
    };
    let mut rules = ParameterRules::new();
    rules.push(Box::new(rule));
    let err = rules.check(&RequestParts::new()).unwrap_err();
    assert!(err.is_configuration_error());
}

#[test]
fn test_first_failure_wins() {
    let mut params = BTreeMap::new();
    params.insert(
        "a".to_string(),
        Parameter::in_query(ValueInfo::new(ValueKind::String).required()),
    );
    params.insert(
        "b".to_string(),
        Parameter::in_query(ValueInfo::new(ValueKind::String).required()),
    );
    let rules = compile_rules(&params).unwrap();
    let err = rules.check(&RequestParts::new()).unwrap_err();
    assert_eq!(err.name(), "a");
}
