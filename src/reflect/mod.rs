//! # Reflect Module
//!
//! Static schema descriptions of record types and the introspector that turns
//! them into [`StructDoc`]s.
//!
//! Types describe themselves through the [`Describe`] trait, usually via
//! `#[derive(Describe)]`:
//!
//! ```rust
//! use restdoc::Describe;
//!
//! #[derive(Describe)]
//! pub struct Book {
//!     #[api(json = "id", desc = "book id", min = "1")]
//!     pub id: i64,
//!     #[api(json = "tags")]
//!     pub tags: Vec<String>,
//!     #[api(json = "related")]
//!     pub related: Option<Box<Book>>,
//! }
//! ```
//!
//! Record descriptions are built lazily through a function pointer held in
//! [`RecordRef`], so self-referential types describe themselves without
//! recursing. [`StructDocCreator`] walks the descriptions, enforces the field
//! capability matrix and discovers nested records exactly once per identifier.

mod creator;
mod error;

pub use creator::{StructDoc, StructDocCreator, StructField};
pub(crate) use creator::resolve_record;
pub use error::ReflectError;

use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::rc::Rc;
use std::sync::Arc;

use crate::value_info::ValueKind;

/// Shape of a Rust type as seen by the introspector.
///
/// Only `Scalar`, `Record`, one `Slice` level and one `Pointer` level are
/// accepted inside records. The remaining shapes exist so unsupported field
/// types are reported by name instead of failing to compile.
#[derive(Debug, Clone, PartialEq)]
pub enum TypeDesc {
    Scalar(ValueKind),
    Record(RecordRef),
    /// `Option<T>`, `Box<T>`, `Rc<T>`, `Arc<T>`
    Pointer(Box<TypeDesc>),
    /// `Vec<T>`
    Slice(Box<TypeDesc>),
    /// `[T; N]`
    FixedArray(Box<TypeDesc>, usize),
    Map(Box<TypeDesc>, Box<TypeDesc>),
    Func,
    /// Dynamically typed values such as `serde_json::Value`
    Any,
    /// Primitive outside the supported scalar set
    Unsupported(&'static str),
}

impl TypeDesc {
    /// Short kind name used in error messages.
    #[must_use]
    pub fn kind_name(&self) -> String {
        match self {
            TypeDesc::Scalar(kind) => kind.to_string(),
            TypeDesc::Record(r) => r.name.to_string(),
            TypeDesc::Pointer(_) => "ptr".to_string(),
            TypeDesc::Slice(_) => "slice".to_string(),
            TypeDesc::FixedArray(..) => "array".to_string(),
            TypeDesc::Map(..) => "map".to_string(),
            TypeDesc::Func => "func".to_string(),
            TypeDesc::Any => "interface".to_string(),
            TypeDesc::Unsupported(name) => (*name).to_string(),
        }
    }

    /// Strip every pointer and slice level.
    #[must_use]
    pub fn base(&self) -> &TypeDesc {
        match self {
            TypeDesc::Pointer(inner) | TypeDesc::Slice(inner) => inner.base(),
            other => other,
        }
    }
}

impl fmt::Display for TypeDesc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeDesc::Pointer(inner) => write!(f, "*{inner}"),
            TypeDesc::Slice(inner) => write!(f, "[]{inner}"),
            TypeDesc::FixedArray(inner, len) => write!(f, "[{len}]{inner}"),
            TypeDesc::Map(k, v) => write!(f, "map[{k}]{v}"),
            TypeDesc::Record(r) => write!(f, "{}", r.identifier()),
            other => f.write_str(&other.kind_name()),
        }
    }
}

/// Lazy handle on a record description.
#[derive(Clone, Copy)]
pub struct RecordRef {
    /// Module path the record is declared in
    pub package: &'static str,
    pub name: &'static str,
    pub describe: fn() -> RecordDesc,
}

impl RecordRef {
    /// Stable identifier: module path and type name joined by `::`.
    #[must_use]
    pub fn identifier(&self) -> String {
        format!("{}::{}", self.package, self.name)
    }
}

impl fmt::Debug for RecordRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RecordRef")
            .field("package", &self.package)
            .field("name", &self.name)
            .finish()
    }
}

impl PartialEq for RecordRef {
    fn eq(&self, other: &Self) -> bool {
        self.package == other.package && self.name == other.name
    }
}

/// Declared fields of one record type.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordDesc {
    pub package: &'static str,
    pub name: &'static str,
    pub fields: Vec<FieldDesc>,
}

impl RecordDesc {
    #[must_use]
    pub fn identifier(&self) -> String {
        format!("{}::{}", self.package, self.name)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FieldDesc {
    /// Rust field identifier
    pub ident: String,
    /// Declared `pub`
    pub public: bool,
    pub ty: TypeDesc,
    pub tags: FieldTags,
}

/// Per-field metadata from `#[api(...)]`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldTags {
    pub json: Option<String>,
    pub xml: Option<String>,
    pub desc: Option<String>,
    /// Space separated enum literals
    pub values: Option<String>,
    pub min: Option<String>,
    pub max: Option<String>,
}

/// Static schema description of a type.
pub trait Describe {
    fn describe() -> TypeDesc;
}

macro_rules! describe_scalar {
    ($($ty:ty => $kind:expr),* $(,)?) => {
        $(
            impl Describe for $ty {
                fn describe() -> TypeDesc {
                    TypeDesc::Scalar($kind)
                }
            }
        )*
    };
}

describe_scalar! {
    String => ValueKind::String,
    bool => ValueKind::Bool,
    i32 => ValueKind::Int32,
    i64 => ValueKind::Int64,
    isize => ValueKind::Int,
    u32 => ValueKind::Uint32,
    u64 => ValueKind::Uint64,
    usize => ValueKind::Uint,
    f32 => ValueKind::Float32,
    f64 => ValueKind::Float64,
}

impl Describe for &str {
    fn describe() -> TypeDesc {
        TypeDesc::Scalar(ValueKind::String)
    }
}

macro_rules! describe_unsupported {
    ($($ty:ty => $name:literal),* $(,)?) => {
        $(
            impl Describe for $ty {
                fn describe() -> TypeDesc {
                    TypeDesc::Unsupported($name)
                }
            }
        )*
    };
}

describe_unsupported! {
    i8 => "int8",
    u8 => "uint8",
    i16 => "int16",
    u16 => "uint16",
    i128 => "int128",
    u128 => "uint128",
    char => "char",
}

impl<T> Describe for *const T {
    fn describe() -> TypeDesc {
        TypeDesc::Unsupported("unsafe pointer")
    }
}

impl<T> Describe for *mut T {
    fn describe() -> TypeDesc {
        TypeDesc::Unsupported("unsafe pointer")
    }
}

/// Nullability never adds a level on top of an existing pointer, so
/// `Option<Box<T>>` counts as one level while `Box<Box<T>>` counts as two.
impl<T: Describe> Describe for Option<T> {
    fn describe() -> TypeDesc {
        match T::describe() {
            pointer @ TypeDesc::Pointer(_) => pointer,
            other => TypeDesc::Pointer(Box::new(other)),
        }
    }
}

impl<T: Describe> Describe for Box<T> {
    fn describe() -> TypeDesc {
        TypeDesc::Pointer(Box::new(T::describe()))
    }
}

impl<T: Describe> Describe for Rc<T> {
    fn describe() -> TypeDesc {
        TypeDesc::Pointer(Box::new(T::describe()))
    }
}

impl<T: Describe> Describe for Arc<T> {
    fn describe() -> TypeDesc {
        TypeDesc::Pointer(Box::new(T::describe()))
    }
}

impl<T: Describe> Describe for Vec<T> {
    fn describe() -> TypeDesc {
        TypeDesc::Slice(Box::new(T::describe()))
    }
}

impl<T: Describe, const N: usize> Describe for [T; N] {
    fn describe() -> TypeDesc {
        TypeDesc::FixedArray(Box::new(T::describe()), N)
    }
}

impl<K: Describe, V: Describe, S> Describe for HashMap<K, V, S> {
    fn describe() -> TypeDesc {
        TypeDesc::Map(Box::new(K::describe()), Box::new(V::describe()))
    }
}

impl<K: Describe, V: Describe> Describe for BTreeMap<K, V> {
    fn describe() -> TypeDesc {
        TypeDesc::Map(Box::new(K::describe()), Box::new(V::describe()))
    }
}

impl<R> Describe for fn() -> R {
    fn describe() -> TypeDesc {
        TypeDesc::Func
    }
}

impl<A, R> Describe for fn(A) -> R {
    fn describe() -> TypeDesc {
        TypeDesc::Func
    }
}

impl Describe for serde_json::Value {
    fn describe() -> TypeDesc {
        TypeDesc::Any
    }
}
