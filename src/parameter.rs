//! Declared request parameters and where each one is carried.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::swagger;
use crate::value_info::{check_name_format, FormatError, ValueInfo};

/// Where a parameter is carried in a request.
///
/// `Body` exists so the body parameter of an operation can be rendered; it is
/// never a valid carrier for a declared [`Parameter`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ParameterLocation {
    Path,
    Header,
    Query,
    FormData,
    Body,
}

impl fmt::Display for ParameterLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ParameterLocation::Path => "path",
            ParameterLocation::Header => "header",
            ParameterLocation::Query => "query",
            ParameterLocation::FormData => "formData",
            ParameterLocation::Body => "body",
        };
        write!(f, "{s}")
    }
}

/// One logical parameter name and up to one declaration per carrier.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Parameter {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub in_path: Option<ValueInfo>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub in_header: Option<ValueInfo>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub in_query: Option<ValueInfo>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub in_form_data: Option<ValueInfo>,
}

impl Parameter {
    #[must_use]
    pub fn in_path(info: ValueInfo) -> Self {
        Self {
            in_path: Some(info),
            ..Default::default()
        }
    }

    #[must_use]
    pub fn in_header(info: ValueInfo) -> Self {
        Self {
            in_header: Some(info),
            ..Default::default()
        }
    }

    #[must_use]
    pub fn in_query(info: ValueInfo) -> Self {
        Self {
            in_query: Some(info),
            ..Default::default()
        }
    }

    #[must_use]
    pub fn in_form_data(info: ValueInfo) -> Self {
        Self {
            in_form_data: Some(info),
            ..Default::default()
        }
    }

    /// Declared slots in carrier order: path, header, query, formData.
    ///
    /// Path slots are reported as required whether or not they were declared so.
    pub fn slots(&self) -> impl Iterator<Item = (ParameterLocation, ValueInfo)> + '_ {
        [
            (ParameterLocation::Path, &self.in_path),
            (ParameterLocation::Header, &self.in_header),
            (ParameterLocation::Query, &self.in_query),
            (ParameterLocation::FormData, &self.in_form_data),
        ]
        .into_iter()
        .filter_map(|(location, slot)| {
            slot.as_ref().map(|info| {
                let mut info = info.clone();
                if location == ParameterLocation::Path {
                    info.required = true;
                }
                (location, info)
            })
        })
    }

    #[must_use]
    pub fn has_form_data(&self) -> bool {
        self.in_form_data.is_some()
    }

    /// Validate the name and every declared slot.
    pub fn check(&self, name: &str) -> Result<(), FormatError> {
        check_name_format(name)?;
        for (location, info) in self.slots() {
            info.check_in(location)?;
        }
        Ok(())
    }

    /// Render every declared slot as a Swagger parameter, in carrier order.
    pub fn to_swagger_parameters(&self, name: &str) -> Result<Vec<swagger::Parameter>, FormatError> {
        check_name_format(name)?;
        self.slots()
            .map(|(location, info)| info.to_swagger_parameter(name, location))
            .collect()
    }
}
