use serde::Serialize;
use serde_json::Value;
use std::collections::{BTreeMap, HashSet};
use tracing::debug;

use super::error::ReflectError;
use super::{FieldDesc, RecordDesc, RecordRef, TypeDesc};
use crate::value_info::{check_name_format, ValueInfo, ValueKind};

/// Normalized shape of one record type.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StructDoc {
    /// Module path and type name joined by `::`
    pub id: String,
    pub name: String,
    pub package: String,
    pub fields: Vec<StructField>,
}

/// Normalized shape of one record field.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StructField {
    /// Serialization name
    pub name: String,
    pub is_array: bool,
    pub is_struct: bool,
    /// Identifier of the referenced [`StructDoc`] when `is_struct`
    pub ref_struct_id: Option<String>,
    /// Type name of the referenced record when `is_struct`
    pub ref_struct_name: Option<String>,
    /// Scalar kind when not `is_struct`
    pub value_kind: Option<ValueKind>,
    pub description: String,
    pub enumeration: Vec<Value>,
    pub min: Option<f64>,
    pub max: Option<f64>,
}

/// Discovers [`StructDoc`]s for a model and every record reachable from it.
///
/// Docs are cached by identifier for the lifetime of the creator, so a record
/// reached from several fields or several models is described once.
#[derive(Debug, Default)]
pub struct StructDocCreator {
    docs: BTreeMap<String, StructDoc>,
}

impl StructDocCreator {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Introspect `ty`, which must be a record or a single pointer to one.
    ///
    /// Returns the root doc. Nested docs are available from
    /// [`struct_docs`](Self::struct_docs).
    pub fn get_struct_doc(&mut self, ty: &TypeDesc) -> Result<StructDoc, ReflectError> {
        let root = resolve_record(ty)?;

        let mut visited = HashSet::new();
        let mut mode = ChannelMode::Unrestricted;
        check_name_channels(&root, &mut visited, &mut mode)?;

        self.discover(&root)?;
        let id = root.identifier();
        self.docs
            .get(&id)
            .cloned()
            .ok_or(ReflectError::InvalidStruct { type_name: id })
    }

    /// Every doc discovered so far, keyed by identifier.
    #[must_use]
    pub fn struct_docs(&self) -> &BTreeMap<String, StructDoc> {
        &self.docs
    }

    #[must_use]
    pub fn into_struct_docs(self) -> BTreeMap<String, StructDoc> {
        self.docs
    }

    fn discover(&mut self, record: &RecordRef) -> Result<(), ReflectError> {
        let id = record.identifier();
        if self.docs.contains_key(&id) {
            return Ok(());
        }

        let desc = (record.describe)();
        let fields = desc
            .fields
            .iter()
            .map(|field| struct_field(&desc, field))
            .collect::<Result<Vec<_>, _>>()?;

        debug!(id = %id, fields = fields.len(), "discovered struct doc");
        self.docs.insert(
            id.clone(),
            StructDoc {
                id,
                name: desc.name.to_string(),
                package: desc.package.to_string(),
                fields,
            },
        );

        for field in &desc.fields {
            if let TypeDesc::Record(nested) = field.ty.base() {
                self.discover(nested)?;
            }
        }
        Ok(())
    }
}

/// Resolve a model to its record, following at most one pointer.
pub(crate) fn resolve_record(ty: &TypeDesc) -> Result<RecordRef, ReflectError> {
    match ty {
        TypeDesc::Record(r) => Ok(*r),
        TypeDesc::Pointer(inner) => match inner.as_ref() {
            TypeDesc::Record(r) => Ok(*r),
            _ => Err(ReflectError::InvalidStruct {
                type_name: ty.to_string(),
            }),
        },
        _ => Err(ReflectError::InvalidStruct {
            type_name: ty.to_string(),
        }),
    }
}

/// Serialization name: json tag, else xml tag, else the field identifier.
///
/// Tag options after a `,` are ignored.
fn field_name(field: &FieldDesc) -> &str {
    let tag = field
        .tags
        .json
        .as_deref()
        .filter(|t| !t.is_empty())
        .or_else(|| field.tags.xml.as_deref().filter(|t| !t.is_empty()));
    match tag {
        Some(tag) => tag.split(',').next().unwrap_or(tag),
        None => &field.ident,
    }
}

/// Accept scalars and records behind at most one pointer level and at most
/// one slice level in total.
fn check_field_type(ty: &TypeDesc) -> Result<(), String> {
    let mut ptr_level = 0;
    let mut array_level = 0;
    let mut current = ty;
    loop {
        match current {
            TypeDesc::Pointer(inner) => {
                ptr_level += 1;
                if ptr_level > 1 {
                    return Err("** is not supported".to_string());
                }
                current = inner;
            }
            TypeDesc::Slice(inner) => {
                ptr_level = 0;
                array_level += 1;
                if array_level > 1 {
                    return Err("[] must be less than one".to_string());
                }
                current = inner;
            }
            TypeDesc::Scalar(_) | TypeDesc::Record(_) => return Ok(()),
            other => return Err(format!("{} is not supported", other.kind_name())),
        }
    }
}

fn is_array(ty: &TypeDesc) -> bool {
    match ty {
        TypeDesc::Slice(_) => true,
        TypeDesc::Pointer(inner) => matches!(inner.as_ref(), TypeDesc::Slice(_)),
        _ => false,
    }
}

fn struct_field(record: &RecordDesc, field: &FieldDesc) -> Result<StructField, ReflectError> {
    let name = field_name(field);
    let name_error = |reason: String| ReflectError::InvalidStructFieldName {
        record: record.identifier(),
        field: field.ident.clone(),
        reason,
    };
    if !field.public {
        return Err(name_error("field is not public".to_string()));
    }
    check_name_format(name).map_err(|e| name_error(e.to_string()))?;

    let field_error = |reason: String| ReflectError::InvalidStructField {
        record: record.identifier(),
        field: field.ident.clone(),
        reason,
    };
    check_field_type(&field.ty).map_err(field_error)?;

    let tags = &field.tags;
    let description = tags.desc.clone().unwrap_or_default();
    let mut out = StructField {
        name: name.to_string(),
        is_array: is_array(&field.ty),
        is_struct: false,
        ref_struct_id: None,
        ref_struct_name: None,
        value_kind: None,
        description,
        enumeration: Vec::new(),
        min: None,
        max: None,
    };

    match field.ty.base() {
        TypeDesc::Record(nested) => {
            if tags.values.is_some() || tags.min.is_some() || tags.max.is_some() {
                return Err(field_error(
                    "enum, min and max are only supported on scalar fields".to_string(),
                ));
            }
            out.is_struct = true;
            out.ref_struct_id = Some(nested.identifier());
            out.ref_struct_name = Some(nested.name.to_string());
        }
        TypeDesc::Scalar(kind) => {
            let info = ValueInfo {
                kind: *kind,
                enumeration: tags.values.clone(),
                min: tags.min.clone(),
                max: tags.max.clone(),
                required: false,
                description: String::new(),
            };
            info.check().map_err(|e| field_error(e.to_string()))?;
            out.value_kind = Some(*kind);
            out.enumeration = info.enum_values().map_err(|e| field_error(e.to_string()))?;
            out.min = info.minimum().map_err(|e| field_error(e.to_string()))?;
            out.max = info.maximum().map_err(|e| field_error(e.to_string()))?;
        }
        other => return Err(field_error(format!("{} is not supported", other.kind_name()))),
    }
    Ok(out)
}

/// Which serialization-name channels renamed fields have used so far.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ChannelMode {
    Unrestricted,
    OnlyJson,
    OnlyXml,
}

/// Walk the record graph once per identifier and require renamed fields to
/// stick to one channel, or to carry identical json and xml names.
fn check_name_channels(
    record: &RecordRef,
    visited: &mut HashSet<String>,
    mode: &mut ChannelMode,
) -> Result<(), ReflectError> {
    if !visited.insert(record.identifier()) {
        return Ok(());
    }
    let desc = (record.describe)();

    for field in &desc.fields {
        let json = field.tags.json.as_deref().filter(|t| !t.is_empty());
        let xml = field.tags.xml.as_deref().filter(|t| !t.is_empty());
        let json = json.map(|t| t.split(',').next().unwrap_or(t));
        let xml = xml.map(|t| t.split(',').next().unwrap_or(t));
        let name_error = |reason: String| ReflectError::InvalidStructFieldName {
            record: desc.identifier(),
            field: field.ident.clone(),
            reason,
        };

        match (json, xml) {
            (None, None) => {}
            (Some(json), None) => {
                if *mode == ChannelMode::OnlyXml && json != field.ident {
                    return Err(name_error(format!(
                        "{json} is a json name but other fields only use xml names"
                    )));
                }
                *mode = ChannelMode::OnlyJson;
            }
            (None, Some(xml)) => {
                if *mode == ChannelMode::OnlyJson && xml != field.ident {
                    return Err(name_error(format!(
                        "{xml} is an xml name but other fields only use json names"
                    )));
                }
                *mode = ChannelMode::OnlyXml;
            }
            (Some(json), Some(xml)) if json == xml => {
                if *mode != ChannelMode::Unrestricted {
                    return Err(name_error(format!(
                        "{json} has both json and xml names but other fields use only one"
                    )));
                }
            }
            (Some(json), Some(xml)) => {
                return Err(name_error(format!(
                    "{json}!={xml}, json name must be equal to xml name"
                )));
            }
        }
    }

    for field in &desc.fields {
        if let TypeDesc::Record(nested) = field.ty.base() {
            check_name_channels(nested, visited, mode)?;
        }
    }
    Ok(())
}
