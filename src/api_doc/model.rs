use std::collections::BTreeMap;

use super::error::DocError;
use crate::reflect::{resolve_record, Describe, ReflectError, TypeDesc};
use crate::swagger;
use crate::value_info::ValueInfo;

/// Payload model of a request body or a response.
#[derive(Debug, Clone, Copy, Default)]
pub enum Model {
    #[default]
    None,
    /// A single record
    Record(fn() -> TypeDesc),
    /// An array of records
    Array(fn() -> TypeDesc),
}

impl Model {
    #[must_use]
    pub fn of<T: Describe>() -> Self {
        Model::Record(T::describe)
    }

    #[must_use]
    pub fn array_of<T: Describe>() -> Self {
        Model::Array(T::describe)
    }

    #[must_use]
    pub fn is_none(&self) -> bool {
        matches!(self, Model::None)
    }

    /// Description of the record behind the model.
    #[must_use]
    pub fn type_desc(&self) -> Option<TypeDesc> {
        match self {
            Model::None => None,
            Model::Record(describe) | Model::Array(describe) => Some(describe()),
        }
    }

    /// Payload schema: a `$ref` into the definitions, wrapped in an array
    /// schema for [`Model::Array`].
    pub fn schema(&self) -> Result<Option<swagger::Schema>, ReflectError> {
        let Some(desc) = self.type_desc() else {
            return Ok(None);
        };
        let record = resolve_record(&desc)?;
        let reference = swagger::Schema::reference(record.name);
        Ok(Some(match self {
            Model::Array(_) => swagger::Schema::array_of(reference),
            _ => reference,
        }))
    }
}

/// Body of a request.
#[derive(Debug, Clone, Default)]
pub struct RequestBody {
    pub description: String,
    pub model: Model,
}

impl RequestBody {
    #[must_use]
    pub fn new(description: impl Into<String>, model: Model) -> Self {
        Self {
            description: description.into(),
            model,
        }
    }

    pub(crate) fn to_swagger_parameter(&self) -> Result<swagger::Parameter, DocError> {
        let schema = self.model.schema()?.ok_or(DocError::RequestModelMissing)?;
        Ok(swagger::Parameter {
            name: "body".to_string(),
            location: Some(crate::parameter::ParameterLocation::Body),
            description: self.description.clone(),
            required: true,
            schema: Some(schema),
            ..Default::default()
        })
    }
}

/// One declared response.
#[derive(Debug, Clone, Default)]
pub struct Response {
    pub description: String,
    pub model: Model,
    pub headers: BTreeMap<String, ValueInfo>,
}

impl Response {
    #[must_use]
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            ..Default::default()
        }
    }

    #[must_use]
    pub fn with_model(mut self, model: Model) -> Self {
        self.model = model;
        self
    }

    #[must_use]
    pub fn with_header(mut self, name: impl Into<String>, info: ValueInfo) -> Self {
        self.headers.insert(name.into(), info);
        self
    }

    pub fn to_swagger_response(&self, status: u16) -> Result<swagger::Response, DocError> {
        let headers = self
            .headers
            .iter()
            .map(|(name, info)| {
                info.to_swagger_header()
                    .map(|header| (name.clone(), header))
                    .map_err(|source| DocError::ResponseHeader {
                        status,
                        header: name.clone(),
                        source,
                    })
            })
            .collect::<Result<BTreeMap<_, _>, _>>()?;
        Ok(swagger::Response {
            description: self.description.clone(),
            schema: self.model.schema()?,
            headers,
        })
    }
}
