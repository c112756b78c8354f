#![allow(dead_code)]

use super::*;
use crate::parameter::{Parameter, ParameterLocation};
use crate::value_info::{ValueInfo, ValueKind};
use crate::Describe;
use serde_json::json;

#[derive(Describe)]
pub struct Book {
    #[api(json = "id", desc = "book id")]
    pub id: i64,
    #[api(json = "title")]
    pub title: String,
    #[api(json = "images")]
    pub images: Option<BookImageUrls>,
    #[api(json = "chapters", desc = "chapter titles")]
    pub chapters: Vec<String>,
}

#[derive(Describe)]
pub struct BookImageUrls {
    #[api(json = "small")]
    pub small: String,
    #[api(json = "large")]
    pub large: String,
}

#[derive(Describe)]
pub struct ErrorMessage {
    #[api(json = "code", values = "400 404 500")]
    pub code: i32,
    #[api(json = "message")]
    pub message: String,
}

mod shelf {
    use crate::Describe;

    #[derive(Describe)]
    pub struct Book {
        #[api(json = "shelf")]
        pub shelf: String,
    }
}

fn get_doc() -> ApiDocCommon {
    let mut doc = ApiDocCommon::new()
        .summary("get a book")
        .tag("books")
        .produces("application/json")
        .parameter("id", Parameter::in_path(ValueInfo::new(ValueKind::Int64)))
        .parameter(
            "lang",
            Parameter::in_query(ValueInfo::new(ValueKind::String).with_enum("en zh")),
        )
        .response(200, Response::new("the book").with_model(Model::of::<Book>()))
        .response(
            404,
            Response::new("not found").with_model(Model::of::<ErrorMessage>()),
        );
    doc.set_method(HttpMethod::Get);
    doc
}

#[test]
fn test_operation_rendering() {
    let operation = get_doc().to_swagger_operation().unwrap();
    let rendered = serde_json::to_value(&operation).unwrap();
    assert_eq!(
        rendered,
        json!({
            "tags": ["books"],
            "summary": "get a book",
            "produces": ["application/json"],
            "parameters": [
                {"name": "id", "in": "path", "required": true, "type": "integer", "format": "int64"},
                {"name": "lang", "in": "query", "type": "string", "enum": ["en", "zh"]}
            ],
            "responses": {
                "200": {"description": "the book", "schema": {"$ref": "#/definitions/Book"}},
                "404": {"description": "not found", "schema": {"$ref": "#/definitions/ErrorMessage"}}
            }
        })
    );
}

#[test]
fn test_definitions_include_nested_records() {
    let definitions = get_doc().to_swagger_definitions().unwrap();
    let names: Vec<_> = definitions.keys().cloned().collect();
    assert_eq!(names, vec!["Book", "BookImageUrls", "ErrorMessage"]);

    let book = serde_json::to_value(&definitions["Book"].schema).unwrap();
    assert_eq!(
        book,
        json!({
            "type": "object",
            "properties": {
                "id": {"type": "integer", "format": "int64", "description": "book id"},
                "title": {"type": "string"},
                "images": {"$ref": "#/definitions/BookImageUrls"},
                "chapters": {"type": "array", "description": "chapter titles", "items": {"type": "string"}}
            }
        })
    );
    let error = serde_json::to_value(&definitions["ErrorMessage"].schema).unwrap();
    assert_eq!(error["properties"]["code"]["enum"], json!([400, 404, 500]));
    assert!(definitions["Book"].identifier.ends_with("::Book"));
}

#[test]
fn test_array_model_and_request_body() {
    let mut doc = ApiDocCommon::new()
        .consumes("application/json")
        .request(RequestBody::new("new books", Model::array_of::<Book>()))
        .response(201, Response::new("created"));
    doc.set_method(HttpMethod::Post);

    let operation = doc.to_swagger_operation().unwrap();
    let body = serde_json::to_value(&operation.parameters[0]).unwrap();
    assert_eq!(
        body,
        json!({
            "name": "body",
            "in": "body",
            "description": "new books",
            "required": true,
            "schema": {"type": "array", "items": {"$ref": "#/definitions/Book"}}
        })
    );
    let definitions = doc.to_swagger_definitions().unwrap();
    assert!(definitions.contains_key("Book"));
    assert!(definitions.contains_key("BookImageUrls"));
}

#[test]
fn test_form_data_and_request_are_exclusive() {
    let mut doc = ApiDocCommon::new()
        .parameter("file", Parameter::in_form_data(ValueInfo::new(ValueKind::File)))
        .request(RequestBody::new("", Model::of::<Book>()));
    doc.set_method(HttpMethod::Post);
    let err = doc.to_swagger_operation().unwrap_err();
    assert_eq!(err, DocError::FormDataWithRequest);
    assert!(err.to_string().contains("formData"));
    assert!(err.to_string().contains("Request should be nil"));
}

#[test]
fn test_get_restrictions() {
    let mut form = ApiDocCommon::new()
        .parameter("name", Parameter::in_form_data(ValueInfo::new(ValueKind::String)));
    form.set_method(HttpMethod::Get);
    assert_eq!(form.to_swagger_operation().unwrap_err(), DocError::FormDataInGet);

    let mut body = ApiDocCommon::new().request(RequestBody::new("", Model::of::<Book>()));
    body.set_method(HttpMethod::Get);
    assert_eq!(body.to_swagger_operation().unwrap_err(), DocError::RequestInGet);

    let mut empty = ApiDocCommon::new().request(RequestBody::new("", Model::None));
    empty.set_method(HttpMethod::Put);
    assert_eq!(
        empty.to_swagger_operation().unwrap_err(),
        DocError::RequestModelMissing
    );
}

#[test]
fn test_parameter_errors_name_the_parameter() {
    let mut doc = ApiDocCommon::new().parameter(
        "size",
        Parameter::in_query(ValueInfo::new(ValueKind::Int32).with_min("9").with_max("1")),
    );
    doc.set_method(HttpMethod::Get);
    let err = doc.to_swagger_operation().unwrap_err();
    assert!(matches!(err, DocError::Parameter { ref name, .. } if name == "size"));
    assert_eq!(
        err.to_string(),
        "in the parameter size, the maximum(1) must be greater than the minimum(9)"
    );
}

#[test]
fn test_response_headers() {
    let doc = ApiDocCommon::new().response(
        200,
        Response::new("ok")
            .with_header("X-Rate-Limit", ValueInfo::new(ValueKind::Int32).with_min("0"))
            .with_header("X-Mode", ValueInfo::new(ValueKind::String).with_enum("a b")),
    );
    let operation = doc.to_swagger_operation().unwrap();
    let response = serde_json::to_value(&operation.responses["200"]).unwrap();
    assert_eq!(
        response,
        json!({
            "description": "ok",
            "headers": {
                "X-Mode": {"type": "string", "enum": ["a", "b"]},
                "X-Rate-Limit": {"type": "integer", "format": "int32", "minimum": 0.0}
            }
        })
    );

    let bad = ApiDocCommon::new().response(
        200,
        Response::new("ok").with_header("X-Upload", ValueInfo::new(ValueKind::File)),
    );
    assert!(matches!(
        bad.to_swagger_operation(),
        Err(DocError::ResponseHeader { status: 200, .. })
    ));
}

#[test]
fn test_global_parameter_reference_rendered() {
    let doc = ApiDocCommon::new().global_parameter("token");
    let operation = doc.to_swagger_operation().unwrap();
    assert_eq!(
        serde_json::to_value(&operation.parameters).unwrap(),
        json!([{"$ref": "#/parameters/token"}])
    );
    assert_eq!(doc.global_parameters(), ["token".to_string()]);
}

#[test]
fn test_definition_name_conflict() {
    let doc = ApiDocCommon::new()
        .response(200, Response::new("ok").with_model(Model::of::<Book>()))
        .response(
            202,
            Response::new("shelved").with_model(Model::of::<shelf::Book>()),
        );
    let err = doc.to_swagger_definitions().unwrap_err();
    assert!(matches!(err, DocError::DefinitionConflict { ref name, .. } if name == "Book"));
}

#[test]
fn test_non_record_model_rejected() {
    let doc = ApiDocCommon::new().response(200, Response::new("ok").with_model(Model::of::<i64>()));
    assert!(matches!(
        doc.to_swagger_definitions(),
        Err(DocError::Reflect(_))
    ));
    assert!(matches!(doc.to_swagger_operation(), Err(DocError::Reflect(_))));
}

#[test]
fn test_body_location_display() {
    assert_eq!(ParameterLocation::Body.to_string(), "body");
}
