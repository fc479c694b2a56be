//! Schema types for JSON validation
//!
//! A schema document is parsed into a tree of [`SchemaNode`]s. Parsing is
//! total: unusable declarations are carried in the tree as malformed
//! markers instead of failing construction, and the validator reports
//! them only when a walk reaches the node that holds one.

use serde_json::Value;

/// One node of a parsed schema tree.
///
/// Every constraint field is optional; an absent field imposes nothing.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SchemaNode {
    /// Set when the node itself was not a JSON object; holds the type
    /// name of what was found instead
    pub malformed: Option<String>,

    /// The `type` declaration
    pub kind: Option<TypeDecl>,

    /// Declared object properties, in stable key order
    pub properties: Option<Vec<(String, SchemaNode)>>,

    /// Whether a property carrying this node must be present
    pub required: bool,

    /// Policy for object properties not named in `properties`
    pub additional_properties: Option<AdditionalProperties>,

    /// The `items` declaration for arrays
    pub items: Option<ItemsDecl>,

    /// Enumerated admissible values
    pub enum_values: Option<EnumDecl>,

    /// Types the value must not match
    pub disallow: Option<TypeDecl>,

    /// Inclusive lower bound for numbers
    pub minimum: Option<f64>,
    /// Inclusive upper bound for numbers
    pub maximum: Option<f64>,
    /// Strict lower bound for numbers
    pub exclusive_minimum: Option<f64>,
    /// Strict upper bound for numbers
    pub exclusive_maximum: Option<f64>,
    /// Divisor for the `divisibleBy` check
    pub divisible_by: Option<Divisor>,

    /// Regex pattern for strings
    pub pattern: Option<String>,
    /// Minimum string length in bytes
    pub min_length: Option<usize>,
    /// Maximum string length in bytes
    pub max_length: Option<usize>,

    /// Minimum array length
    pub min_items: Option<usize>,
    /// Maximum array length
    pub max_items: Option<usize>,
    /// Whether array items must be pairwise distinct
    pub unique_items: Option<bool>,

    /// Named format refinement
    pub format: Option<String>,
}

/// A `type` or `disallow` declaration
#[derive(Debug, Clone, PartialEq)]
pub enum TypeDecl {
    /// A single type name, one of the seven built-in types
    Name(String),
    /// A union of alternatives; the value must satisfy one of them
    Union(Vec<TypeDecl>),
    /// An inline schema standing in for a type name
    Inline(Box<SchemaNode>),
    /// A declaration with an unusable shape
    Malformed,
}

/// An `items` declaration
#[derive(Debug, Clone, PartialEq)]
pub enum ItemsDecl {
    /// One schema applied to every element
    Single(Box<SchemaNode>),
    /// Positional schemas; trailing elements are unconstrained
    Tuple(Vec<SchemaNode>),
    /// A declaration that is neither a schema nor a sequence
    Malformed,
}

/// Policy for object properties not named in `properties`
#[derive(Debug, Clone, PartialEq)]
pub enum AdditionalProperties {
    /// Allow or forbid undeclared properties wholesale
    Allowed(bool),
    /// Validate undeclared properties against a schema
    Schema(Box<SchemaNode>),
}

/// An `enum` declaration
#[derive(Debug, Clone, PartialEq)]
pub enum EnumDecl {
    /// The admissible values
    Values(Vec<Value>),
    /// A declaration that is not a sequence
    Malformed,
}

/// A `divisibleBy` declaration
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Divisor {
    /// A usable nonzero divisor
    Value(f64),
    /// Zero or not a number
    Invalid,
}

impl SchemaNode {
    /// Parse a schema node from a JSON value.
    ///
    /// Never fails: a value that is not an object yields a node with the
    /// `malformed` marker set, and broken declarations inside an object
    /// are carried as their malformed variants. Constraint fields whose
    /// JSON shape is wrong but that the walk does not treat as defects
    /// are dropped.
    pub fn from_value(value: &Value) -> Self {
        let Some(map) = value.as_object() else {
            return Self {
                malformed: Some(json_type_name(value).to_string()),
                ..Self::default()
            };
        };

        let mut node = Self::default();

        if let Some(decl) = map.get("type") {
            node.kind = Some(parse_type_decl(decl));
        }

        if let Some(properties) = map.get("properties").and_then(Value::as_object) {
            node.properties = Some(
                properties
                    .iter()
                    .map(|(name, child)| (name.clone(), Self::from_value(child)))
                    .collect(),
            );
        }

        node.required = map.get("required").and_then(Value::as_bool).unwrap_or(false);

        if let Some(additional) = map.get("additionalProperties") {
            node.additional_properties = Some(match additional {
                Value::Bool(allowed) => AdditionalProperties::Allowed(*allowed),
                schema => AdditionalProperties::Schema(Box::new(Self::from_value(schema))),
            });
        }

        if let Some(items) = map.get("items") {
            node.items = Some(parse_items_decl(items));
        }

        if let Some(values) = map.get("enum") {
            node.enum_values = Some(match values.as_array() {
                Some(values) => EnumDecl::Values(values.clone()),
                None => EnumDecl::Malformed,
            });
        }

        if let Some(decl) = map.get("disallow") {
            node.disallow = Some(parse_type_decl(decl));
        }

        node.minimum = map.get("minimum").and_then(Value::as_f64);
        node.maximum = map.get("maximum").and_then(Value::as_f64);
        node.exclusive_minimum = map.get("exclusiveMinimum").and_then(Value::as_f64);
        node.exclusive_maximum = map.get("exclusiveMaximum").and_then(Value::as_f64);

        if let Some(divisor) = map.get("divisibleBy") {
            node.divisible_by = Some(match divisor.as_f64() {
                Some(value) if value != 0.0 => Divisor::Value(value),
                _ => Divisor::Invalid,
            });
        }

        node.pattern = map.get("pattern").and_then(Value::as_str).map(str::to_string);
        node.min_length = length_bound(map.get("minLength"));
        node.max_length = length_bound(map.get("maxLength"));

        node.min_items = length_bound(map.get("minItems"));
        node.max_items = length_bound(map.get("maxItems"));
        node.unique_items = map.get("uniqueItems").and_then(Value::as_bool);

        node.format = map.get("format").and_then(Value::as_str).map(str::to_string);

        node
    }

    /// Look up a declared property by name
    pub fn property(&self, name: &str) -> Option<&SchemaNode> {
        self.properties
            .as_ref()?
            .iter()
            .find(|(declared, _)| declared == name)
            .map(|(_, node)| node)
    }
}

fn parse_type_decl(value: &Value) -> TypeDecl {
    match value {
        Value::String(name) => TypeDecl::Name(name.clone()),
        Value::Array(options) => TypeDecl::Union(options.iter().map(parse_type_decl).collect()),
        Value::Object(_) => TypeDecl::Inline(Box::new(SchemaNode::from_value(value))),
        _ => TypeDecl::Malformed,
    }
}

fn parse_items_decl(value: &Value) -> ItemsDecl {
    match value {
        Value::Object(_) => ItemsDecl::Single(Box::new(SchemaNode::from_value(value))),
        Value::Array(entries) => {
            ItemsDecl::Tuple(entries.iter().map(SchemaNode::from_value).collect())
        }
        _ => ItemsDecl::Malformed,
    }
}

fn length_bound(value: Option<&Value>) -> Option<usize> {
    value.and_then(Value::as_u64).map(|bound| bound as usize)
}

/// JSON type name of a value, as used in error reports
pub(crate) fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
