// Schema document loading

use std::fs;
use std::io;
use std::path::Path;

use serde_json::Value;
use tracing::debug;

use crate::error::{LoadError, SchemaError, SchemaResult, ValidateResult};
use crate::schema::SchemaNode;
use crate::validator;

/// A parsed schema document, ready to validate values against.
///
/// Construction only requires the source to be JSON; defects inside the
/// schema surface later, when a validation walk reaches them.
#[derive(Debug, Clone)]
pub struct SchemaStore {
    root: SchemaNode,
}

impl SchemaStore {
    /// Load a schema document from a file.
    ///
    /// A missing file is reported as [`LoadError::NotFound`] before any
    /// parsing is attempted.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, LoadError> {
        let path = path.as_ref();
        let source = match fs::read_to_string(path) {
            Ok(source) => source,
            Err(error) if error.kind() == io::ErrorKind::NotFound => {
                return Err(LoadError::NotFound {
                    path: path.to_path_buf(),
                });
            }
            Err(error) => {
                return Err(LoadError::Io {
                    path: path.to_path_buf(),
                    source: error,
                });
            }
        };
        debug!(path = %path.display(), "loaded schema document");
        Ok(Self::from_source(&source)?)
    }

    /// Parse a schema document from JSON text
    pub fn from_source(source: &str) -> SchemaResult<Self> {
        let value: Value = serde_json::from_str(source).map_err(|error| SchemaError::Malformed {
            reason: error.to_string(),
        })?;
        Ok(Self::from_value(&value))
    }

    /// Build a store from an already parsed JSON value
    pub fn from_value(value: &Value) -> Self {
        Self {
            root: SchemaNode::from_value(value),
        }
    }

    /// The root schema node
    pub fn root(&self) -> &SchemaNode {
        &self.root
    }

    /// Validate a value against this schema, reporting paths under "root"
    pub fn validate(&self, value: &Value) -> ValidateResult<()> {
        validator::validate(value, &self.root)
    }

    /// Validate a value against this schema under a caller-chosen root name
    pub fn validate_named(&self, value: &Value, root_name: &str) -> ValidateResult<()> {
        validator::validate_named(value, &self.root, root_name)
    }
}
