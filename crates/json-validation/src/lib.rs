// Schema-driven validation for JSON documents
//
// A schema document describes the expected shape of a JSON value:
// types, object properties, array items, numeric and string bounds,
// enumerations, and named formats. Validation walks the value and the
// schema together and stops at the first violation, reporting either a
// defect in the document or a defect in the schema itself.

pub mod error;
mod formats;
pub mod schema;
pub mod store;
pub mod validator;

pub use error::{
    InstancePath, LoadError, PathSegment, SchemaError, SchemaResult, ValidateError,
    ValidateResult, ValidationError, ValidationErrorKind,
};
pub use schema::SchemaNode;
pub use store::SchemaStore;
pub use validator::{validate, validate_named};
