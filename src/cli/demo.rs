//! Bookstore API bundled with the binary, used by `restdoc print`.

use crate::api_doc::{ApiDocCommon, Model, RegistrationError, RequestBody, Response};
use crate::document::DocumentBuilder;
use crate::parameter::Parameter;
use crate::value_info::{ValueInfo, ValueKind};
use crate::Describe;

#[derive(Debug, Clone, Describe)]
pub struct Book {
    /// Unique book id
    pub id: i64,
    pub title: String,
    pub authors: Vec<Author>,
    #[api(min = "0", desc = "Price in cents")]
    pub price: i64,
    #[api(values = "available sold reserved")]
    pub status: String,
    #[api(json = "publishedYear", max = "9999")]
    pub published_year: i32,
    pub images: Option<BookImages>,
}

#[derive(Debug, Clone, Describe)]
pub struct Author {
    pub name: String,
    #[api(json = "homepage")]
    pub homepage_url: String,
}

#[derive(Debug, Clone, Describe)]
pub struct BookImages {
    pub small: String,
    pub large: String,
}

#[derive(Debug, Clone, Describe)]
pub struct ErrorMessage {
    #[api(values = "400 404 409 500")]
    pub code: i32,
    pub message: String,
}

fn book_id() -> Parameter {
    Parameter::in_path(ValueInfo::new(ValueKind::Int64).with_description("book id"))
}

fn not_found() -> Response {
    Response::new("book not found").with_model(Model::of::<ErrorMessage>())
}

/// Register every bookstore operation on `builder`.
pub fn register_bookstore(builder: &mut DocumentBuilder) -> Result<(), RegistrationError> {
    builder.get(
        "/books",
        ApiDocCommon::new()
            .summary("List books")
            .produces("application/json")
            .parameter(
                "limit",
                Parameter::in_query(ValueInfo::new(ValueKind::Int32).with_min("1").with_max("100")),
            )
            .parameter(
                "lang",
                Parameter::in_query(ValueInfo::new(ValueKind::String).with_enum("en zh fr")),
            )
            .response(200, Response::new("books").with_model(Model::array_of::<Book>())),
    )?;

    builder.get(
        "/books/:id",
        ApiDocCommon::new()
            .summary("Fetch a book")
            .produces("application/json")
            .parameter("id", book_id())
            .response(200, Response::new("the book").with_model(Model::of::<Book>()))
            .response(404, not_found()),
    )?;

    builder.post(
        "/books",
        ApiDocCommon::new()
            .summary("Add a book")
            .consumes("application/json")
            .produces("application/json")
            .request(RequestBody::new("book to add", Model::of::<Book>()))
            .response(
                201,
                Response::new("created")
                    .with_model(Model::of::<Book>())
                    .with_header("Location", ValueInfo::new(ValueKind::String)),
            )
            .response(
                409,
                Response::new("already exists").with_model(Model::of::<ErrorMessage>()),
            ),
    )?;

    builder.put(
        "/books/:id",
        ApiDocCommon::new()
            .summary("Replace a book")
            .consumes("application/json")
            .parameter("id", book_id())
            .request(RequestBody::new("new content", Model::of::<Book>()))
            .response(204, Response::new("replaced"))
            .response(404, not_found()),
    )?;

    builder.delete(
        "/books/:id",
        ApiDocCommon::new()
            .summary("Remove a book")
            .parameter("id", book_id())
            .parameter(
                "X-Confirm",
                Parameter::in_header(ValueInfo::new(ValueKind::Bool).required()),
            )
            .response(204, Response::new("removed"))
            .response(404, not_found()),
    )?;

    builder.post(
        "/books/:id/cover",
        ApiDocCommon::new()
            .summary("Upload a cover image")
            .tag("covers")
            .consumes("multipart/form-data")
            .parameter("id", book_id())
            .parameter(
                "image",
                Parameter::in_form_data(ValueInfo::new(ValueKind::File).required()),
            )
            .parameter(
                "caption",
                Parameter::in_form_data(ValueInfo::new(ValueKind::String)),
            )
            .response(204, Response::new("uploaded"))
            .response(404, not_found()),
    )?;

    Ok(())
}
