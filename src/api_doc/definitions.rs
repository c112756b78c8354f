use std::collections::BTreeMap;

use super::error::DocError;
use crate::reflect::{StructDoc, StructField};
use crate::swagger::Schema;

/// A definitions entry together with the identifier of the record behind it.
#[derive(Debug, Clone, PartialEq)]
pub struct Definition {
    pub identifier: String,
    pub schema: Schema,
}

/// Definitions fragment keyed by definition (type) name.
pub type Definitions = BTreeMap<String, Definition>;

/// Render discovered struct docs as definitions.
///
/// Two docs with different identifiers but the same type name are rejected.
pub fn definitions_from_struct_docs(
    docs: &BTreeMap<String, StructDoc>,
) -> Result<Definitions, DocError> {
    let mut definitions = Definitions::new();
    for doc in docs.values() {
        if let Some(existing) = definitions.get(&doc.name) {
            if existing.identifier != doc.id {
                return Err(DocError::DefinitionConflict {
                    name: doc.name.clone(),
                    first: existing.identifier.clone(),
                    second: doc.id.clone(),
                });
            }
        }
        definitions.insert(
            doc.name.clone(),
            Definition {
                identifier: doc.id.clone(),
                schema: struct_doc_schema(doc),
            },
        );
    }
    Ok(definitions)
}

fn struct_doc_schema(doc: &StructDoc) -> Schema {
    let properties = doc
        .fields
        .iter()
        .map(|field| (field.name.clone(), field_schema(field)))
        .collect();
    Schema::object(properties)
}

fn field_schema(field: &StructField) -> Schema {
    let item = match (&field.ref_struct_name, field.value_kind) {
        (Some(name), _) => Schema::reference(name),
        (None, Some(kind)) => Schema {
            kind: Some(kind.swagger_type().to_string()),
            format: kind.swagger_format().map(str::to_string),
            enumeration: field.enumeration.clone(),
            minimum: field.min,
            maximum: field.max,
            ..Default::default()
        },
        (None, None) => Schema::default(),
    };

    if field.is_array {
        Schema {
            description: field.description.clone(),
            ..Schema::array_of(item)
        }
    } else if item.reference.is_some() {
        item
    } else {
        Schema {
            description: field.description.clone(),
            ..item
        }
    }
}
