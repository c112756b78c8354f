#![allow(dead_code)]

use std::collections::BTreeMap;

use super::*;
use crate::api_doc::{ApiDocCommon, DocError, Model, Response};
use crate::config::DocConfig;
use crate::method::HttpMethod;
use crate::parameter::Parameter;
use crate::request::RequestParts;
use crate::rules::ParameterError;
use crate::value_info::{ValueInfo, ValueKind};
use crate::Describe;

#[derive(Describe)]
pub struct Book {
    #[api(json = "id")]
    pub id: i64,
}

mod archive {
    use crate::Describe;

    #[derive(Describe)]
    pub struct Book {
        #[api(json = "box")]
        pub shelf_box: String,
    }
}

fn builder() -> DocumentBuilder {
    DocumentBuilder::new(DocConfig::default()).unwrap()
}

fn book_doc() -> ApiDocCommon {
    ApiDocCommon::new()
        .parameter("id", Parameter::in_path(ValueInfo::new(ValueKind::Int64)))
        .response(200, Response::new("ok").with_model(Model::of::<Book>()))
}

fn token_global() -> BTreeMap<String, Parameter> {
    let mut globals = BTreeMap::new();
    globals.insert(
        "token".to_string(),
        Parameter::in_header(ValueInfo::new(ValueKind::String).required()),
    );
    globals
}

#[test]
fn test_register_fills_paths_and_default_tag() {
    let mut builder = builder();
    let route = builder.get("/books/:id", book_doc()).unwrap();
    assert_eq!(route.route_path, "/books/:id");
    assert_eq!(route.doc_path, "/books/{id}");
    assert_eq!(route.rules.len(), 1);

    let operation = builder.swagger().paths["/books/{id}"].get.clone().unwrap();
    assert_eq!(operation.tags, vec!["books"]);
    assert!(builder.swagger().definitions.contains_key("Book"));
}

#[test]
fn test_explicit_tag_kept() {
    let mut builder = builder();
    builder.get("/books/{id}", book_doc().tag("library")).unwrap();
    let item = &builder.swagger().paths["/books/{id}"];
    assert_eq!(item.get.as_ref().unwrap().tags, vec!["library"]);
}

#[test]
fn test_duplicate_registration_rejected() {
    let mut builder = builder();
    builder.get("/books/:id", book_doc()).unwrap();
    let err = builder.get("/books/{id}", book_doc()).unwrap_err();
    assert_eq!(err.method, HttpMethod::Get);
    assert!(matches!(err.source, DocError::DuplicateOperation { .. }));
    assert!(builder.put("/books/:id", book_doc()).is_ok());
}

#[test]
fn test_failed_registration_leaves_builder_unchanged() {
    let mut builder = builder();
    let doc = ApiDocCommon::new().response(200, Response::new("ok").with_model(Model::of::<Book>()));
    let err = builder.get("/books/:id", doc).unwrap_err();
    assert_eq!(err.source, DocError::MissingInDoc(vec!["id".to_string()]));
    assert_eq!(err.to_string(), "GET /books/:id: missing parameters id in the api doc");
    assert!(builder.swagger().paths.is_empty());
    assert!(builder.swagger().definitions.is_empty());
    assert!(builder.finish().routes().is_empty());
}

#[test]
fn test_global_reference_resolved_and_compiled() {
    let mut builder = builder();
    builder.set_global_parameters(token_global()).unwrap();
    let route = builder
        .get("/books/:id", book_doc().global_parameter("token"))
        .unwrap();
    assert_eq!(route.rules.len(), 2);

    let rules = route.rules.clone();
    let parts = RequestParts::new().with_path_param("id", "7");
    assert!(matches!(
        rules.check(&parts),
        Err(ParameterError::Missing { ref name, .. }) if name == "token"
    ));
    let parts = parts.with_header("Token", "secret");
    assert!(rules.check(&parts).is_ok());

    let document = builder.finish();
    assert!(document.swagger().parameters.contains_key("token"));
}

#[test]
fn test_unknown_reference_rejected() {
    let mut builder = builder();
    let err = builder
        .get("/books/:id", book_doc().global_parameter("token"))
        .unwrap_err();
    assert_eq!(
        err.source.to_string(),
        "the ref #/parameters/token is not found"
    );
}

#[test]
fn test_global_path_parameter_satisfies_placeholder() {
    let mut builder = builder();
    let mut globals = BTreeMap::new();
    globals.insert(
        "tenant".to_string(),
        Parameter::in_path(ValueInfo::new(ValueKind::String)),
    );
    builder.set_global_parameters(globals).unwrap();
    let doc = ApiDocCommon::new()
        .global_parameter("tenant")
        .response(200, Response::new("ok"));
    assert!(builder.get("/tenants/:tenant", doc).is_ok());
}

#[test]
fn test_global_must_have_one_slot() {
    let mut builder = builder();
    let mut globals = BTreeMap::new();
    globals.insert(
        "token".to_string(),
        Parameter {
            in_header: Some(ValueInfo::new(ValueKind::String)),
            in_query: Some(ValueInfo::new(ValueKind::String)),
            ..Parameter::default()
        },
    );
    assert_eq!(
        builder.set_global_parameters(globals).unwrap_err(),
        DocError::InvalidGlobalParameter {
            name: "token".to_string()
        }
    );

    let mut empty = BTreeMap::new();
    empty.insert("nothing".to_string(), Parameter::default());
    assert!(builder.set_global_parameters(empty).is_err());
}

#[test]
fn test_referenced_global_cannot_be_dropped() {
    let mut builder = builder();
    builder.set_global_parameters(token_global()).unwrap();
    builder
        .get("/books/:id", book_doc().global_parameter("token"))
        .unwrap();

    let mut other = BTreeMap::new();
    other.insert(
        "lang".to_string(),
        Parameter::in_query(ValueInfo::new(ValueKind::String)),
    );
    let err = builder.set_global_parameters(other).unwrap_err();
    assert_eq!(
        err,
        DocError::GlobalParameterInUse {
            name: "token".to_string(),
            method: HttpMethod::Get,
            path: "/books/{id}".to_string(),
        }
    );
    assert_eq!(
        err.to_string(),
        "global parameter token is still referenced by GET /books/{id}"
    );
    let names: Vec<_> = builder.swagger().parameters.keys().cloned().collect();
    assert_eq!(names, vec!["token"]);

    let mut extended = token_global();
    extended.insert(
        "lang".to_string(),
        Parameter::in_query(ValueInfo::new(ValueKind::String)),
    );
    builder.set_global_parameters(extended).unwrap();
    assert_eq!(builder.swagger().parameters.len(), 2);
}

#[test]
fn test_definition_conflict_across_registrations() {
    let mut builder = builder();
    builder.get("/books/:id", book_doc()).unwrap();
    let doc = ApiDocCommon::new().response(
        200,
        Response::new("archived").with_model(Model::of::<archive::Book>()),
    );
    let err = builder.get("/archive", doc).unwrap_err();
    assert!(matches!(
        err.source,
        DocError::DefinitionConflict { ref name, .. } if name == "Book"
    ));
    assert!(!builder.swagger().paths.contains_key("/archive"));
}

#[test]
fn test_same_definition_shared() {
    let mut builder = builder();
    builder.get("/books/:id", book_doc()).unwrap();
    builder.delete("/books/:id", book_doc()).unwrap();
    assert_eq!(builder.swagger().definitions.len(), 1);
    let item = &builder.swagger().paths["/books/{id}"];
    assert_eq!(item.methods(), vec![HttpMethod::Get, HttpMethod::Delete]);
}

#[test]
fn test_with_host_and_urls() {
    let config = DocConfig {
        open_api_document_url: true,
        ..DocConfig::default()
    };
    let document = DocumentBuilder::new(config).unwrap().finish();
    let hosted = document.with_host("localhost:8080");
    assert_eq!(hosted.swagger().host.as_deref(), Some("localhost:8080"));
    assert_eq!(document.swagger().host, None);

    let urls = document.document_urls();
    assert_eq!(urls.json, "/docs/swagger.json");
    assert_eq!(urls.yaml, "/docs/swagger.yaml");
    assert!(urls.enabled);
}

#[test]
fn test_cors_disabled_by_default() {
    let mut builder = builder();
    builder.get("/books/:id", book_doc()).unwrap();
    let document = builder.finish();
    assert!(document.cors("/books/:id", HttpMethod::Get).is_none());
    assert_eq!(document.preflight_paths().count(), 0);
}

#[test]
fn test_cors_enabled() {
    let config = DocConfig {
        allow_origin: true,
        ..DocConfig::default()
    };
    let mut builder = DocumentBuilder::new(config).unwrap();
    builder.set_global_parameters(token_global()).unwrap();
    builder
        .get("/books/:id", book_doc().global_parameter("token"))
        .unwrap();
    builder.delete("/books/:id", book_doc()).unwrap();
    let document = builder.finish();

    let preflight = document.cors("/books/{id}", HttpMethod::Options).unwrap();
    assert_eq!(preflight.methods, "GET,DELETE");
    assert!(preflight.headers.split(',').any(|h| h == "token"));
    assert_eq!(
        document.preflight_paths().collect::<Vec<_>>(),
        vec!["/books/:id"]
    );
}

#[test]
fn test_cors_wildcard_with_credentials_rejected() {
    let config = DocConfig {
        allow_origin: true,
        allow_credentials: true,
        ..DocConfig::default()
    };
    assert!(matches!(
        DocumentBuilder::new(config),
        Err(DocError::Cors(_))
    ));
}

#[test]
fn test_route_lookup() {
    let mut builder = builder();
    builder.get("/books/:id", book_doc()).unwrap();
    let document = builder.finish();
    assert!(document.route("/books/{id}", HttpMethod::Get).is_some());
    assert!(document.route("/books/:id", HttpMethod::Post).is_none());
}
