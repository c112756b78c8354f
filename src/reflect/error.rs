/// Reflective type error
///
/// Raised while introspecting a request or response model. Fatal to the
/// registration of the route that declared the model.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ReflectError {
    /// Model does not resolve to a record after at most one pointer
    #[error("type {type_name} is not a struct")]
    InvalidStruct { type_name: String },
    /// Field type outside the capability matrix, or bad enum/min/max tags
    #[error("invalid struct field({field}) in the {record}, {reason}")]
    InvalidStructField {
        /// Record identifier
        record: String,
        field: String,
        reason: String,
    },
    /// Bad serialization name, private field, or json/xml disagreement
    #[error("invalid struct field name({field}) in the {record}, {reason}")]
    InvalidStructFieldName {
        record: String,
        field: String,
        reason: String,
    },
}
