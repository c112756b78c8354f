use std::collections::BTreeMap;

use super::definitions::{definitions_from_struct_docs, Definitions};
use super::error::DocError;
use super::model::{Model, RequestBody, Response};
use super::ApiDoc;
use crate::method::HttpMethod;
use crate::parameter::Parameter;
use crate::reflect::StructDocCreator;
use crate::swagger;
use crate::value_info::check_name_format;

/// Declaration of one operation.
///
/// # Example
///
/// ```rust
/// use restdoc::api_doc::{ApiDocCommon, Response};
/// use restdoc::parameter::Parameter;
/// use restdoc::value_info::{ValueInfo, ValueKind};
///
/// let doc = ApiDocCommon::new()
///     .summary("Fetch a book")
///     .tag("books")
///     .produces("application/json")
///     .parameter("id", Parameter::in_path(ValueInfo::new(ValueKind::Int64)))
///     .response(200, Response::new("the book"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct ApiDocCommon {
    pub tags: Vec<String>,
    pub summary: String,
    pub description: String,
    pub produces: Vec<String>,
    pub consumes: Vec<String>,
    pub parameters: BTreeMap<String, Parameter>,
    /// Names of global parameters referenced by this operation
    pub global_parameters: Vec<String>,
    pub request: Option<RequestBody>,
    pub responses: BTreeMap<u16, Response>,
    method: Option<HttpMethod>,
}

impl ApiDocCommon {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.push(tag.into());
        self
    }

    #[must_use]
    pub fn summary(mut self, summary: impl Into<String>) -> Self {
        self.summary = summary.into();
        self
    }

    #[must_use]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    #[must_use]
    pub fn produces(mut self, media_type: impl Into<String>) -> Self {
        self.produces.push(media_type.into());
        self
    }

    #[must_use]
    pub fn consumes(mut self, media_type: impl Into<String>) -> Self {
        self.consumes.push(media_type.into());
        self
    }

    #[must_use]
    pub fn parameter(mut self, name: impl Into<String>, parameter: Parameter) -> Self {
        self.parameters.insert(name.into(), parameter);
        self
    }

    /// Reference a global parameter registered on the document builder.
    #[must_use]
    pub fn global_parameter(mut self, name: impl Into<String>) -> Self {
        self.global_parameters.push(name.into());
        self
    }

    #[must_use]
    pub fn request(mut self, request: RequestBody) -> Self {
        self.request = Some(request);
        self
    }

    #[must_use]
    pub fn response(mut self, status: u16, response: Response) -> Self {
        self.responses.insert(status, response);
        self
    }

    /// Method the doc was registered under, once set.
    #[must_use]
    pub fn method(&self) -> Option<HttpMethod> {
        self.method
    }

    /// Names of the referenced global parameters.
    #[must_use]
    pub fn global_parameters(&self) -> &[String] {
        &self.global_parameters
    }

    fn check(&self) -> Result<(), DocError> {
        let has_form_data = self.parameters.values().any(Parameter::has_form_data);
        let is_get = self.method == Some(HttpMethod::Get);

        if has_form_data && self.request.is_some() {
            return Err(DocError::FormDataWithRequest);
        }
        if is_get && has_form_data {
            return Err(DocError::FormDataInGet);
        }
        if let Some(request) = &self.request {
            if request.model.is_none() {
                return Err(DocError::RequestModelMissing);
            }
            if is_get {
                return Err(DocError::RequestInGet);
            }
        }
        Ok(())
    }

    fn models(&self) -> impl Iterator<Item = &Model> {
        self.request
            .iter()
            .map(|r| &r.model)
            .chain(self.responses.values().map(|r| &r.model))
    }
}

impl ApiDoc for ApiDocCommon {
    fn to_swagger_operation(&self) -> Result<swagger::Operation, DocError> {
        self.check()?;

        let mut parameters = Vec::new();
        for (name, parameter) in &self.parameters {
            let rendered =
                parameter
                    .to_swagger_parameters(name)
                    .map_err(|source| DocError::Parameter {
                        name: name.clone(),
                        source,
                    })?;
            parameters.extend(rendered);
        }
        for name in &self.global_parameters {
            check_name_format(name).map_err(|source| DocError::Parameter {
                name: name.clone(),
                source,
            })?;
            parameters.push(swagger::Parameter::reference(name));
        }
        if let Some(request) = &self.request {
            parameters.push(request.to_swagger_parameter()?);
        }

        let responses = self
            .responses
            .iter()
            .map(|(status, response)| {
                response
                    .to_swagger_response(*status)
                    .map(|r| (status.to_string(), r))
            })
            .collect::<Result<BTreeMap<_, _>, _>>()?;

        Ok(swagger::Operation {
            tags: self.tags.clone(),
            summary: self.summary.clone(),
            description: self.description.clone(),
            consumes: self.consumes.clone(),
            produces: self.produces.clone(),
            parameters,
            responses,
        })
    }

    fn to_swagger_definitions(&self) -> Result<Definitions, DocError> {
        let mut creator = StructDocCreator::new();
        for model in self.models() {
            if let Some(desc) = model.type_desc() {
                creator.get_struct_doc(&desc)?;
            }
        }
        definitions_from_struct_docs(creator.struct_docs())
    }

    fn parameters(&self) -> &BTreeMap<String, Parameter> {
        &self.parameters
    }

    fn set_method(&mut self, method: HttpMethod) {
        self.method = Some(method);
    }
}
