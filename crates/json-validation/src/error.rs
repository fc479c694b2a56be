// Error types for JSON validation

use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Defects in the schema document itself.
///
/// Schema defects are detected lazily: a broken declaration is only
/// reported when a validation walk actually reaches the node carrying
/// it. `path` is the instance path at which the walk stumbled over the
/// defect, not a location inside the schema document.
#[derive(Debug)]
pub enum SchemaError {
    /// The schema source was not a JSON document
    Malformed { reason: String },

    /// A schema node was not a JSON object
    InvalidNode { path: String, found: String },

    /// A `type` or `disallow` declaration had an unusable shape
    InvalidTypeDecl { keyword: &'static str, path: String },

    /// A type name outside the seven built-in types
    UnknownType { name: String, path: String },

    /// An `enum` declaration that is not a sequence of values
    InvalidEnum { path: String },

    /// A `divisibleBy` declaration that is zero or not a number
    InvalidDivisor { path: String },

    /// An `items` declaration that is neither a schema nor a sequence
    InvalidItems { path: String },

    /// A `pattern` declaration that does not compile
    InvalidPattern {
        pattern: String,
        path: String,
        source: regex::Error,
    },
}

impl fmt::Display for SchemaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SchemaError::Malformed { reason } => {
                write!(f, "Malformed schema: {}", reason)
            }
            SchemaError::InvalidNode { path, found } => {
                write!(
                    f,
                    "Invalid schema at {}: expected an object, found {}",
                    path, found
                )
            }
            SchemaError::InvalidTypeDecl { keyword, path } => {
                write!(f, "Invalid '{}' declaration at {}", keyword, path)
            }
            SchemaError::UnknownType { name, path } => {
                write!(f, "Unknown type '{}' at {}", name, path)
            }
            SchemaError::InvalidEnum { path } => {
                write!(f, "Invalid 'enum' at {}: expected a sequence of values", path)
            }
            SchemaError::InvalidDivisor { path } => {
                write!(f, "Invalid 'divisibleBy' at {}: expected a nonzero number", path)
            }
            SchemaError::InvalidItems { path } => {
                write!(
                    f,
                    "Invalid 'items' at {}: expected a schema or sequence of schemas",
                    path
                )
            }
            SchemaError::InvalidPattern { pattern, path, source } => {
                write!(f, "Invalid pattern '{}' at {}: {}", pattern, path, source)
            }
        }
    }
}

impl std::error::Error for SchemaError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SchemaError::InvalidPattern { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Result type for schema parsing operations
pub type SchemaResult<T> = Result<T, SchemaError>;

/// Failures while loading a schema document from disk
#[derive(Debug)]
pub enum LoadError {
    /// The schema file does not exist
    NotFound { path: PathBuf },

    /// The schema file could not be read
    Io { path: PathBuf, source: std::io::Error },

    /// The schema file was read but its content is defective
    Schema(SchemaError),
}

impl fmt::Display for LoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoadError::NotFound { path } => {
                write!(f, "Schema file not found: {}", path.display())
            }
            LoadError::Io { path, source } => {
                write!(f, "Failed to read schema file {}: {}", path.display(), source)
            }
            LoadError::Schema(error) => write!(f, "{}", error),
        }
    }
}

impl std::error::Error for LoadError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            LoadError::NotFound { .. } => None,
            LoadError::Io { source, .. } => Some(source),
            LoadError::Schema(error) => Some(error),
        }
    }
}

impl From<SchemaError> for LoadError {
    fn from(error: SchemaError) -> Self {
        LoadError::Schema(error)
    }
}

/// The kinds of validation errors that can occur
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum ValidationErrorKind {
    /// Value has the wrong type
    TypeMismatch { expected: String, got: String },

    /// Value matches none of the types in a union declaration
    UnionTypeMismatch { allowed: Vec<String>, got: String },

    /// A required property is missing from an object
    MissingRequiredProperty { property: String },

    /// An object carries a property the schema does not declare
    UnknownProperty { property: String },

    /// Number is outside the declared bounds
    NumberOutOfRange {
        value: f64,
        minimum: Option<f64>,
        maximum: Option<f64>,
        exclusive_minimum: Option<f64>,
        exclusive_maximum: Option<f64>,
    },

    /// Number is not divisible by the declared divisor
    NumberNotDivisible { value: f64, divisor: f64 },

    /// String length is outside the declared bounds
    StringLengthInvalid {
        length: usize,
        min_length: Option<usize>,
        max_length: Option<usize>,
    },

    /// String does not match the declared pattern
    StringPatternMismatch { value: String, pattern: String },

    /// Array length is outside the declared bounds
    ArrayLengthInvalid {
        length: usize,
        min_items: Option<usize>,
        max_items: Option<usize>,
    },

    /// Array contains duplicate items
    ArrayItemsNotUnique,

    /// Value is not one of the enumerated values
    InvalidEnumValue { value: String, allowed: Vec<String> },

    /// Value matches a disallowed type
    DisallowedType { matched: String },

    /// String or number does not satisfy a named format
    FormatMismatch { format: String, value: String },
}

impl ValidationErrorKind {
    /// Get a human-readable error message
    pub fn message(&self) -> String {
        match self {
            ValidationErrorKind::TypeMismatch { expected, got } => {
                format!("Expected {}, got {}", expected, got)
            }
            ValidationErrorKind::UnionTypeMismatch { allowed, got } => {
                format!("Expected one of {}, got {}", allowed.join(", "), got)
            }
            ValidationErrorKind::MissingRequiredProperty { property } => {
                format!("Missing required property '{}'", property)
            }
            ValidationErrorKind::UnknownProperty { property } => {
                format!("Unknown property '{}'", property)
            }
            ValidationErrorKind::NumberOutOfRange {
                value,
                minimum,
                maximum,
                exclusive_minimum,
                exclusive_maximum,
            } => {
                if let Some(min) = minimum {
                    format!("Number {} is less than minimum {}", value, min)
                } else if let Some(max) = maximum {
                    format!("Number {} is greater than maximum {}", value, max)
                } else if let Some(min) = exclusive_minimum {
                    format!("Number {} is not greater than {}", value, min)
                } else if let Some(max) = exclusive_maximum {
                    format!("Number {} is not less than {}", value, max)
                } else {
                    format!("Number {} is out of range", value)
                }
            }
            ValidationErrorKind::NumberNotDivisible { value, divisor } => {
                format!("Number {} is not divisible by {}", value, divisor)
            }
            ValidationErrorKind::StringLengthInvalid {
                length,
                min_length,
                max_length,
            } => {
                if let Some(min) = min_length {
                    format!("String length {} is less than minimum {}", length, min)
                } else if let Some(max) = max_length {
                    format!("String length {} is greater than maximum {}", length, max)
                } else {
                    format!("String length {} is invalid", length)
                }
            }
            ValidationErrorKind::StringPatternMismatch { value, pattern } => {
                format!("String '{}' does not match pattern '{}'", value, pattern)
            }
            ValidationErrorKind::ArrayLengthInvalid {
                length,
                min_items,
                max_items,
            } => {
                if let Some(min) = min_items {
                    format!("Array length {} is less than minimum {}", length, min)
                } else if let Some(max) = max_items {
                    format!("Array length {} is greater than maximum {}", length, max)
                } else {
                    format!("Array length {} is invalid", length)
                }
            }
            ValidationErrorKind::ArrayItemsNotUnique => "Array items must be unique".to_string(),
            ValidationErrorKind::InvalidEnumValue { value, allowed } => {
                format!("Value must be one of: {}, got {}", allowed.join(", "), value)
            }
            ValidationErrorKind::DisallowedType { matched } => {
                format!("Value of type {} is disallowed", matched)
            }
            ValidationErrorKind::FormatMismatch { format, value } => {
                format!("Value '{}' does not match format '{}'", value, format)
            }
        }
    }
}

/// A validation error with location information
#[derive(Debug, Clone, Error)]
pub struct ValidationError {
    /// The kind of error
    pub kind: ValidationErrorKind,
    /// Path to the value in the validated document
    pub instance_path: InstancePath,
}

impl ValidationError {
    pub fn new(kind: ValidationErrorKind, instance_path: InstancePath) -> Self {
        Self { kind, instance_path }
    }

    /// Get a human-readable error message
    pub fn message(&self) -> String {
        self.kind.message()
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Validation error at {}: {}",
            self.instance_path,
            self.message()
        )
    }
}

/// Either failure family a validation run can report
#[derive(Debug, Error)]
pub enum ValidateError {
    /// The schema itself is defective
    #[error(transparent)]
    Schema(#[from] SchemaError),

    /// The document does not conform to the schema
    #[error(transparent)]
    Validation(#[from] ValidationError),
}

/// Result type for validation walks
pub type ValidateResult<T> = Result<T, ValidateError>;

/// A segment in an instance path
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathSegment {
    /// Object property name
    Key(String),
    /// Array index
    Index(usize),
}

impl fmt::Display for PathSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathSegment::Key(key) => write!(f, "{}", key),
            PathSegment::Index(index) => write!(f, "{}", index),
        }
    }
}

/// Dotted path to a value inside a validated document.
///
/// The first segment is the root name chosen by the caller, "root" by
/// default. Nested properties and array elements extend the path, so a
/// failure deep in a document reads like `root.engine.cylinders` or
/// `root.features.0`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct InstancePath {
    segments: Vec<PathSegment>,
}

impl InstancePath {
    /// Create an empty path
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a path whose first segment is the given root name
    pub fn rooted(root: &str) -> Self {
        Self {
            segments: vec![PathSegment::Key(root.to_string())],
        }
    }

    /// Push a key segment onto the path
    pub fn push_key(&mut self, key: &str) {
        self.segments.push(PathSegment::Key(key.to_string()));
    }

    /// Push an index segment onto the path
    pub fn push_index(&mut self, index: usize) {
        self.segments.push(PathSegment::Index(index));
    }

    /// Pop the last segment from the path
    pub fn pop(&mut self) -> Option<PathSegment> {
        self.segments.pop()
    }

    /// Get the segments of the path
    pub fn segments(&self) -> &[PathSegment] {
        &self.segments
    }

    /// Check if the path is empty
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Get the number of segments
    pub fn len(&self) -> usize {
        self.segments.len()
    }
}

impl fmt::Display for InstancePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.segments.is_empty() {
            return write!(f, "(root)");
        }
        let rendered: Vec<String> = self.segments.iter().map(|s| s.to_string()).collect();
        write!(f, "{}", rendered.join("."))
    }
}
