// JSON validation engine

use crate::error::{
    InstancePath, SchemaError, ValidateError, ValidateResult, ValidationError, ValidationErrorKind,
};
use crate::formats;
use crate::schema::{
    AdditionalProperties, Divisor, EnumDecl, ItemsDecl, SchemaNode, TypeDecl, json_type_name,
};
use regex::Regex;
use serde_json::{Map, Value};
use tracing::debug;

/// Validate a value against a schema, reporting paths under "root"
pub fn validate(value: &Value, schema: &SchemaNode) -> ValidateResult<()> {
    validate_named(value, schema, "root")
}

/// Validate a value against a schema under a caller-chosen root name
pub fn validate_named(value: &Value, schema: &SchemaNode, root_name: &str) -> ValidateResult<()> {
    debug!(root = root_name, "validating value");
    let mut context = ValidationContext::new(root_name);
    validate_node(value, schema, &mut context)
}

/// Validation context tracking the instance path during one walk
struct ValidationContext {
    instance_path: InstancePath,
}

impl ValidationContext {
    fn new(root_name: &str) -> Self {
        Self {
            instance_path: InstancePath::rooted(root_name),
        }
    }

    /// Dotted rendering of the current path, for schema defect reports
    fn path(&self) -> String {
        self.instance_path.to_string()
    }

    fn error(&self, kind: ValidationErrorKind) -> ValidateError {
        ValidateError::Validation(ValidationError::new(kind, self.instance_path.clone()))
    }

    /// Execute a function with a key segment pushed onto the path
    fn with_key<F, R>(&mut self, key: &str, f: F) -> R
    where
        F: FnOnce(&mut Self) -> R,
    {
        self.instance_path.push_key(key);
        let result = f(self);
        self.instance_path.pop();
        result
    }

    /// Execute a function with an index segment pushed onto the path
    fn with_index<F, R>(&mut self, index: usize, f: F) -> R
    where
        F: FnOnce(&mut Self) -> R,
    {
        self.instance_path.push_index(index);
        let result = f(self);
        self.instance_path.pop();
        result
    }
}

/// Validate one value against one schema node.
///
/// The check order is fixed: node shape, disallow, type dispatch, enum.
/// The first failed check ends the walk.
fn validate_node(
    value: &Value,
    schema: &SchemaNode,
    context: &mut ValidationContext,
) -> ValidateResult<()> {
    if let Some(found) = &schema.malformed {
        return Err(SchemaError::InvalidNode {
            path: context.path(),
            found: found.clone(),
        }
        .into());
    }

    if let Some(disallowed) = &schema.disallow {
        check_disallow(value, disallowed, context)?;
    }

    match &schema.kind {
        None => validate_untyped(value, schema, context)?,
        Some(TypeDecl::Name(name)) => validate_typed(value, schema, name, context)?,
        Some(TypeDecl::Union(options)) => validate_union(value, schema, options, context)?,
        Some(TypeDecl::Inline(nested)) => validate_node(value, nested, context)?,
        Some(TypeDecl::Malformed) => {
            return Err(SchemaError::InvalidTypeDecl {
                keyword: "type",
                path: context.path(),
            }
            .into());
        }
    }

    if let Some(decl) = &schema.enum_values {
        check_enum(value, decl, context)?;
    }

    Ok(())
}

/// Dispatch to the checker for a single declared type name
fn validate_typed(
    value: &Value,
    schema: &SchemaNode,
    name: &str,
    context: &mut ValidationContext,
) -> ValidateResult<()> {
    match name {
        "object" => validate_object(value, schema, context),
        "number" => validate_number(value, schema, context),
        "integer" => validate_integer(value, schema, context),
        "boolean" => validate_boolean(value, context),
        "string" => validate_string(value, schema, context),
        "array" => validate_array(value, schema, context),
        "null" => validate_null(value, context),
        _ => Err(SchemaError::UnknownType {
            name: name.to_string(),
            path: context.path(),
        }
        .into()),
    }
}

/// Try each union alternative in order; the first full success wins.
///
/// Alternatives that fail validation are remembered for the report.
/// A non-name alternative is a schema defect, reported only if every
/// alternative before it failed.
fn validate_union(
    value: &Value,
    schema: &SchemaNode,
    options: &[TypeDecl],
    context: &mut ValidationContext,
) -> ValidateResult<()> {
    let mut attempted = Vec::with_capacity(options.len());
    for option in options {
        let TypeDecl::Name(name) = option else {
            return Err(SchemaError::InvalidTypeDecl {
                keyword: "type",
                path: context.path(),
            }
            .into());
        };
        match validate_typed(value, schema, name, context) {
            Ok(()) => return Ok(()),
            Err(ValidateError::Validation(_)) => attempted.push(name.clone()),
            Err(defect) => return Err(defect),
        }
    }
    Err(context.error(ValidationErrorKind::UnionTypeMismatch {
        allowed: attempted,
        got: json_type_name(value).to_string(),
    }))
}

/// With no declared type the value's own shape picks the constraint
/// group; constraint fields for other shapes do not apply.
fn validate_untyped(
    value: &Value,
    schema: &SchemaNode,
    context: &mut ValidationContext,
) -> ValidateResult<()> {
    match value {
        Value::Object(map) => check_object_constraints(map, schema, context),
        Value::Array(items) => check_array_constraints(items, schema, context),
        Value::String(s) => check_string_constraints(s, schema, context),
        Value::Number(_) => {
            check_number_constraints(value.as_f64().unwrap_or(f64::NAN), schema, context)
        }
        _ => Ok(()),
    }
}

fn validate_object(
    value: &Value,
    schema: &SchemaNode,
    context: &mut ValidationContext,
) -> ValidateResult<()> {
    let Some(map) = value.as_object() else {
        return Err(context.error(ValidationErrorKind::TypeMismatch {
            expected: "object".to_string(),
            got: json_type_name(value).to_string(),
        }));
    };
    check_object_constraints(map, schema, context)
}

fn check_object_constraints(
    map: &Map<String, Value>,
    schema: &SchemaNode,
    context: &mut ValidationContext,
) -> ValidateResult<()> {
    if let Some(properties) = &schema.properties {
        for (name, property_schema) in properties {
            match map.get(name) {
                Some(child) => {
                    context.with_key(name, |ctx| validate_node(child, property_schema, ctx))?;
                }
                None if property_schema.required => {
                    return Err(context.with_key(name, |ctx| {
                        ctx.error(ValidationErrorKind::MissingRequiredProperty {
                            property: name.clone(),
                        })
                    }));
                }
                None => {}
            }
        }
    }

    match &schema.additional_properties {
        None | Some(AdditionalProperties::Allowed(true)) => {}
        Some(AdditionalProperties::Allowed(false)) => {
            for key in map.keys() {
                if schema.property(key).is_none() {
                    return Err(context.error(ValidationErrorKind::UnknownProperty {
                        property: key.clone(),
                    }));
                }
            }
        }
        Some(AdditionalProperties::Schema(additional)) => {
            for (key, child) in map {
                if schema.property(key).is_none() {
                    context.with_key(key, |ctx| validate_node(child, additional, ctx))?;
                }
            }
        }
    }

    Ok(())
}

fn validate_number(
    value: &Value,
    schema: &SchemaNode,
    context: &mut ValidationContext,
) -> ValidateResult<()> {
    let Some(num) = value.as_f64() else {
        return Err(context.error(ValidationErrorKind::TypeMismatch {
            expected: "number".to_string(),
            got: json_type_name(value).to_string(),
        }));
    };
    check_number_constraints(num, schema, context)
}

/// Integers are numbers without a fractional part; 1.0 does not qualify
fn validate_integer(
    value: &Value,
    schema: &SchemaNode,
    context: &mut ValidationContext,
) -> ValidateResult<()> {
    if value.as_i64().is_none() && value.as_u64().is_none() {
        return Err(context.error(ValidationErrorKind::TypeMismatch {
            expected: "integer".to_string(),
            got: json_type_name(value).to_string(),
        }));
    }
    check_number_constraints(value.as_f64().unwrap_or(f64::NAN), schema, context)
}

fn check_number_constraints(
    num: f64,
    schema: &SchemaNode,
    context: &mut ValidationContext,
) -> ValidateResult<()> {
    if let Some(min) = schema.minimum
        && num < min
    {
        return Err(context.error(ValidationErrorKind::NumberOutOfRange {
            value: num,
            minimum: Some(min),
            maximum: None,
            exclusive_minimum: None,
            exclusive_maximum: None,
        }));
    }

    if let Some(max) = schema.maximum
        && num > max
    {
        return Err(context.error(ValidationErrorKind::NumberOutOfRange {
            value: num,
            minimum: None,
            maximum: Some(max),
            exclusive_minimum: None,
            exclusive_maximum: None,
        }));
    }

    if let Some(min) = schema.exclusive_minimum
        && num <= min
    {
        return Err(context.error(ValidationErrorKind::NumberOutOfRange {
            value: num,
            minimum: None,
            maximum: None,
            exclusive_minimum: Some(min),
            exclusive_maximum: None,
        }));
    }

    if let Some(max) = schema.exclusive_maximum
        && num >= max
    {
        return Err(context.error(ValidationErrorKind::NumberOutOfRange {
            value: num,
            minimum: None,
            maximum: None,
            exclusive_minimum: None,
            exclusive_maximum: Some(max),
        }));
    }

    match schema.divisible_by {
        Some(Divisor::Value(divisor)) => {
            if (num % divisor).abs() > f64::EPSILON {
                return Err(context.error(ValidationErrorKind::NumberNotDivisible {
                    value: num,
                    divisor,
                }));
            }
        }
        Some(Divisor::Invalid) => {
            return Err(SchemaError::InvalidDivisor {
                path: context.path(),
            }
            .into());
        }
        None => {}
    }

    if let Some(format) = &schema.format
        && formats::check_number(format, num) == Some(false)
    {
        return Err(context.error(ValidationErrorKind::FormatMismatch {
            format: format.clone(),
            value: num.to_string(),
        }));
    }

    Ok(())
}

fn validate_boolean(value: &Value, context: &mut ValidationContext) -> ValidateResult<()> {
    if value.is_boolean() {
        Ok(())
    } else {
        Err(context.error(ValidationErrorKind::TypeMismatch {
            expected: "boolean".to_string(),
            got: json_type_name(value).to_string(),
        }))
    }
}

fn validate_string(
    value: &Value,
    schema: &SchemaNode,
    context: &mut ValidationContext,
) -> ValidateResult<()> {
    let Some(s) = value.as_str() else {
        return Err(context.error(ValidationErrorKind::TypeMismatch {
            expected: "string".to_string(),
            got: json_type_name(value).to_string(),
        }));
    };
    check_string_constraints(s, schema, context)
}

/// Check order: pattern, length bounds, format
fn check_string_constraints(
    s: &str,
    schema: &SchemaNode,
    context: &mut ValidationContext,
) -> ValidateResult<()> {
    if let Some(pattern) = &schema.pattern {
        let regex = Regex::new(pattern).map_err(|source| SchemaError::InvalidPattern {
            pattern: pattern.clone(),
            path: context.path(),
            source,
        })?;
        if !regex.is_match(s) {
            return Err(context.error(ValidationErrorKind::StringPatternMismatch {
                value: s.to_string(),
                pattern: pattern.clone(),
            }));
        }
    }

    if let Some(min) = schema.min_length
        && s.len() < min
    {
        return Err(context.error(ValidationErrorKind::StringLengthInvalid {
            length: s.len(),
            min_length: Some(min),
            max_length: None,
        }));
    }

    if let Some(max) = schema.max_length
        && s.len() > max
    {
        return Err(context.error(ValidationErrorKind::StringLengthInvalid {
            length: s.len(),
            min_length: None,
            max_length: Some(max),
        }));
    }

    if let Some(format) = &schema.format
        && formats::check_string(format, s) == Some(false)
    {
        return Err(context.error(ValidationErrorKind::FormatMismatch {
            format: format.clone(),
            value: s.to_string(),
        }));
    }

    Ok(())
}

fn validate_array(
    value: &Value,
    schema: &SchemaNode,
    context: &mut ValidationContext,
) -> ValidateResult<()> {
    let Some(items) = value.as_array() else {
        return Err(context.error(ValidationErrorKind::TypeMismatch {
            expected: "array".to_string(),
            got: json_type_name(value).to_string(),
        }));
    };
    check_array_constraints(items, schema, context)
}

fn check_array_constraints(
    items: &[Value],
    schema: &SchemaNode,
    context: &mut ValidationContext,
) -> ValidateResult<()> {
    if let Some(min) = schema.min_items
        && items.len() < min
    {
        return Err(context.error(ValidationErrorKind::ArrayLengthInvalid {
            length: items.len(),
            min_items: Some(min),
            max_items: None,
        }));
    }

    if let Some(max) = schema.max_items
        && items.len() > max
    {
        return Err(context.error(ValidationErrorKind::ArrayLengthInvalid {
            length: items.len(),
            min_items: None,
            max_items: Some(max),
        }));
    }

    if schema.unique_items == Some(true) {
        for (i, item) in items.iter().enumerate() {
            if items[..i].contains(item) {
                return Err(context.error(ValidationErrorKind::ArrayItemsNotUnique));
            }
        }
    }

    match &schema.items {
        None => {}
        Some(ItemsDecl::Single(item_schema)) => {
            for (i, item) in items.iter().enumerate() {
                context.with_index(i, |ctx| validate_node(item, item_schema, ctx))?;
            }
        }
        // Elements beyond the declared entries are unconstrained
        Some(ItemsDecl::Tuple(entries)) => {
            for (i, (item, entry_schema)) in items.iter().zip(entries).enumerate() {
                context.with_index(i, |ctx| validate_node(item, entry_schema, ctx))?;
            }
        }
        Some(ItemsDecl::Malformed) => {
            return Err(SchemaError::InvalidItems {
                path: context.path(),
            }
            .into());
        }
    }

    Ok(())
}

fn validate_null(value: &Value, context: &mut ValidationContext) -> ValidateResult<()> {
    if value.is_null() {
        Ok(())
    } else {
        Err(context.error(ValidationErrorKind::TypeMismatch {
            expected: "null".to_string(),
            got: json_type_name(value).to_string(),
        }))
    }
}

/// The disallow check runs before type dispatch and rejects the value
/// when its shape matches any listed type name
fn check_disallow(
    value: &Value,
    disallowed: &TypeDecl,
    context: &mut ValidationContext,
) -> ValidateResult<()> {
    match disallowed {
        TypeDecl::Name(name) => {
            if matches_type_name(value, name, context)? {
                return Err(context.error(ValidationErrorKind::DisallowedType {
                    matched: name.clone(),
                }));
            }
            Ok(())
        }
        TypeDecl::Union(options) => {
            for option in options {
                check_disallow(value, option, context)?;
            }
            Ok(())
        }
        _ => Err(SchemaError::InvalidTypeDecl {
            keyword: "disallow",
            path: context.path(),
        }
        .into()),
    }
}

/// Shape-only membership test for one of the seven type names
fn matches_type_name(
    value: &Value,
    name: &str,
    context: &ValidationContext,
) -> Result<bool, SchemaError> {
    match name {
        "object" => Ok(value.is_object()),
        "number" => Ok(value.is_number()),
        "integer" => Ok(value.as_i64().is_some() || value.as_u64().is_some()),
        "boolean" => Ok(value.is_boolean()),
        "string" => Ok(value.is_string()),
        "array" => Ok(value.is_array()),
        "null" => Ok(value.is_null()),
        _ => Err(SchemaError::UnknownType {
            name: name.to_string(),
            path: context.path(),
        }),
    }
}

/// Enum membership is whole-value equality, including the value's type
fn check_enum(
    value: &Value,
    decl: &EnumDecl,
    context: &mut ValidationContext,
) -> ValidateResult<()> {
    match decl {
        EnumDecl::Values(allowed) => {
            if allowed.contains(value) {
                Ok(())
            } else {
                Err(context.error(ValidationErrorKind::InvalidEnumValue {
                    value: value.to_string(),
                    allowed: allowed.iter().map(|v| v.to_string()).collect(),
                }))
            }
        }
        EnumDecl::Malformed => Err(SchemaError::InvalidEnum {
            path: context.path(),
        }
        .into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn schema(value: Value) -> SchemaNode {
        SchemaNode::from_value(&value)
    }

    fn expect_kind(result: ValidateResult<()>) -> ValidationErrorKind {
        match result {
            Err(ValidateError::Validation(error)) => error.kind,
            other => panic!("expected a validation failure, got {:?}", other),
        }
    }

    fn expect_error(result: ValidateResult<()>) -> ValidationError {
        match result {
            Err(ValidateError::Validation(error)) => error,
            other => panic!("expected a validation failure, got {:?}", other),
        }
    }

    fn expect_schema_error(result: ValidateResult<()>) -> SchemaError {
        match result {
            Err(ValidateError::Schema(error)) => error,
            other => panic!("expected a schema defect, got {:?}", other),
        }
    }

    // ==================== Type Dispatch Tests ====================

    #[test]
    fn test_scalar_types() {
        let string = schema(json!({"type": "string"}));
        assert!(validate(&json!("asdf"), &string).is_ok());
        let kind = expect_kind(validate(&json!(1234), &string));
        assert_eq!(
            kind,
            ValidationErrorKind::TypeMismatch {
                expected: "string".to_string(),
                got: "number".to_string(),
            }
        );

        let boolean = schema(json!({"type": "boolean"}));
        assert!(validate(&json!(false), &boolean).is_ok());
        assert!(validate(&json!("asdf"), &boolean).is_err());

        let null = schema(json!({"type": "null"}));
        assert!(validate(&json!(null), &null).is_ok());
        assert!(validate(&json!("asdf"), &null).is_err());
    }

    #[test]
    fn test_number_accepts_integers_and_floats() {
        let number = schema(json!({"type": "number"}));
        assert!(validate(&json!(1.1), &number).is_ok());
        assert!(validate(&json!(7), &number).is_ok());
        assert!(validate(&json!("asdf"), &number).is_err());
    }

    #[test]
    fn test_integer_rejects_fractional_numbers() {
        let integer = schema(json!({"type": "integer"}));
        assert!(validate(&json!(1), &integer).is_ok());
        assert!(validate(&json!(-3), &integer).is_ok());

        let kind = expect_kind(validate(&json!(1.5), &integer));
        assert_eq!(
            kind,
            ValidationErrorKind::TypeMismatch {
                expected: "integer".to_string(),
                got: "number".to_string(),
            }
        );
        assert!(validate(&json!("1"), &integer).is_err());
    }

    #[test]
    fn test_unknown_type_name_is_a_schema_defect() {
        let bad = schema(json!({"type": "widget"}));
        match expect_schema_error(validate(&json!(1), &bad)) {
            SchemaError::UnknownType { name, path } => {
                assert_eq!(name, "widget");
                assert_eq!(path, "root");
            }
            other => panic!("expected unknown type, got {:?}", other),
        }
    }

    #[test]
    fn test_malformed_type_declaration() {
        let bad = schema(json!({"type": 17}));
        match expect_schema_error(validate(&json!(1), &bad)) {
            SchemaError::InvalidTypeDecl { keyword, .. } => assert_eq!(keyword, "type"),
            other => panic!("expected invalid type declaration, got {:?}", other),
        }
    }

    #[test]
    fn test_inline_type_schema() {
        let inline = schema(json!({"type": {"type": "number", "minimum": 10}}));
        assert!(validate(&json!(12), &inline).is_ok());
        let kind = expect_kind(validate(&json!(5), &inline));
        assert!(matches!(kind, ValidationErrorKind::NumberOutOfRange { .. }));
    }

    // ==================== Union Tests ====================

    #[test]
    fn test_union_accepts_any_listed_type() {
        let multi = schema(json!({"type": ["string", "number"]}));
        assert!(validate(&json!("asdf"), &multi).is_ok());
        assert!(validate(&json!(1234), &multi).is_ok());

        let kind = expect_kind(validate(&json!(true), &multi));
        assert_eq!(
            kind,
            ValidationErrorKind::UnionTypeMismatch {
                allowed: vec!["string".to_string(), "number".to_string()],
                got: "boolean".to_string(),
            }
        );
    }

    #[test]
    fn test_union_applies_option_constraints() {
        let multi = schema(json!({
            "type": ["string", "integer"],
            "minLength": 5,
            "minimum": 10
        }));
        assert!(validate(&json!("hello"), &multi).is_ok());
        assert!(validate(&json!(12), &multi).is_ok());

        let kind = expect_kind(validate(&json!("hi"), &multi));
        assert!(matches!(kind, ValidationErrorKind::UnionTypeMismatch { .. }));
        let kind = expect_kind(validate(&json!(7), &multi));
        assert!(matches!(kind, ValidationErrorKind::UnionTypeMismatch { .. }));
    }

    #[test]
    fn test_union_defective_alternative_is_lazy() {
        let multi = schema(json!({"type": ["string", 5]}));
        assert!(validate(&json!("ok"), &multi).is_ok());

        match expect_schema_error(validate(&json!(42), &multi)) {
            SchemaError::InvalidTypeDecl { keyword, .. } => assert_eq!(keyword, "type"),
            other => panic!("expected invalid type declaration, got {:?}", other),
        }
    }

    // ==================== Object Tests ====================

    #[test]
    fn test_object_properties_recurse() {
        let nested = schema(json!({
            "type": "object",
            "properties": {
                "engine": {
                    "type": "object",
                    "properties": {"cylinders": {"type": "integer"}}
                }
            }
        }));
        assert!(validate(&json!({"engine": {"cylinders": 8}}), &nested).is_ok());

        let error = expect_error(validate(&json!({"engine": {"cylinders": "eight"}}), &nested));
        assert_eq!(error.instance_path.to_string(), "root.engine.cylinders");
        assert!(matches!(error.kind, ValidationErrorKind::TypeMismatch { .. }));
    }

    #[test]
    fn test_missing_required_property() {
        let object = schema(json!({
            "type": "object",
            "properties": {"name": {"type": "string", "required": true}}
        }));
        assert!(validate(&json!({"name": "ok"}), &object).is_ok());

        let error = expect_error(validate(&json!({}), &object));
        assert_eq!(error.instance_path.to_string(), "root.name");
        assert_eq!(
            error.kind,
            ValidationErrorKind::MissingRequiredProperty {
                property: "name".to_string(),
            }
        );
    }

    #[test]
    fn test_optional_property_may_be_absent() {
        let object = schema(json!({
            "type": "object",
            "properties": {"name": {"type": "string"}}
        }));
        assert!(validate(&json!({}), &object).is_ok());
    }

    #[test]
    fn test_additional_properties_false() {
        let closed = schema(json!({
            "type": "object",
            "properties": {"name": {"type": "string"}},
            "additionalProperties": false
        }));
        assert!(validate(&json!({"name": "ok"}), &closed).is_ok());

        let kind = expect_kind(validate(&json!({"name": "ok", "foo": "bar"}), &closed));
        assert_eq!(
            kind,
            ValidationErrorKind::UnknownProperty {
                property: "foo".to_string(),
            }
        );

        let bare = schema(json!({"additionalProperties": false}));
        assert!(matches!(
            expect_kind(validate(&json!({"x": 1}), &bare)),
            ValidationErrorKind::UnknownProperty { .. }
        ));
    }

    #[test]
    fn test_additional_properties_schema() {
        let object = schema(json!({
            "type": "object",
            "properties": {"name": {"type": "string"}},
            "additionalProperties": {"type": "number"}
        }));
        assert!(validate(&json!({"name": "ok", "extra": 5}), &object).is_ok());

        let error = expect_error(validate(&json!({"name": "ok", "extra": "nope"}), &object));
        assert_eq!(error.instance_path.to_string(), "root.extra");
    }

    // ==================== Number Tests ====================

    #[test]
    fn test_numeric_bounds_are_inclusive() {
        let bounded = schema(json!({"type": "number", "minimum": 2, "maximum": 4}));
        assert!(validate(&json!(2), &bounded).is_ok());
        assert!(validate(&json!(4), &bounded).is_ok());

        let kind = expect_kind(validate(&json!(1), &bounded));
        assert!(matches!(
            kind,
            ValidationErrorKind::NumberOutOfRange { minimum: Some(_), .. }
        ));
        let kind = expect_kind(validate(&json!(5), &bounded));
        assert!(matches!(
            kind,
            ValidationErrorKind::NumberOutOfRange { maximum: Some(_), .. }
        ));
    }

    #[test]
    fn test_exclusive_bounds_reject_the_bound_itself() {
        let bounded = schema(json!({
            "type": "number",
            "exclusiveMinimum": 0,
            "exclusiveMaximum": 100
        }));
        assert!(validate(&json!(0.1), &bounded).is_ok());
        assert!(validate(&json!(99.9), &bounded).is_ok());

        let kind = expect_kind(validate(&json!(0), &bounded));
        assert!(matches!(
            kind,
            ValidationErrorKind::NumberOutOfRange { exclusive_minimum: Some(_), .. }
        ));
        let kind = expect_kind(validate(&json!(100), &bounded));
        assert!(matches!(
            kind,
            ValidationErrorKind::NumberOutOfRange { exclusive_maximum: Some(_), .. }
        ));
    }

    #[test]
    fn test_minimum_zero_is_enforced() {
        let bounded = schema(json!({"type": "integer", "minimum": 0}));
        assert!(validate(&json!(0), &bounded).is_ok());
        assert!(validate(&json!(-1), &bounded).is_err());
    }

    #[test]
    fn test_divisible_by() {
        let divisible = schema(json!({"type": "integer", "divisibleBy": 4}));
        assert!(validate(&json!(8), &divisible).is_ok());

        let kind = expect_kind(validate(&json!(3), &divisible));
        assert_eq!(
            kind,
            ValidationErrorKind::NumberNotDivisible {
                value: 3.0,
                divisor: 4.0,
            }
        );
    }

    #[test]
    fn test_divisible_by_zero_is_a_schema_defect() {
        let bad = schema(json!({"type": "integer", "divisibleBy": 0}));
        match expect_schema_error(validate(&json!(8), &bad)) {
            SchemaError::InvalidDivisor { path } => assert_eq!(path, "root"),
            other => panic!("expected invalid divisor, got {:?}", other),
        }
    }

    // ==================== String Tests ====================

    #[test]
    fn test_string_pattern() {
        let patterned = schema(json!({"type": "string", "pattern": "^[a-z]+$"}));
        assert!(validate(&json!("abc"), &patterned).is_ok());

        let kind = expect_kind(validate(&json!("123"), &patterned));
        assert!(matches!(kind, ValidationErrorKind::StringPatternMismatch { .. }));
    }

    #[test]
    fn test_unparseable_pattern_is_a_schema_defect() {
        let bad = schema(json!({"type": "string", "pattern": "("}));
        match expect_schema_error(validate(&json!("abc"), &bad)) {
            SchemaError::InvalidPattern { pattern, .. } => assert_eq!(pattern, "("),
            other => panic!("expected invalid pattern, got {:?}", other),
        }
    }

    #[test]
    fn test_string_length_bounds() {
        let bounded = schema(json!({"type": "string", "minLength": 2, "maxLength": 3}));
        assert!(validate(&json!("ab"), &bounded).is_ok());
        assert!(validate(&json!("abc"), &bounded).is_ok());

        let kind = expect_kind(validate(&json!("a"), &bounded));
        assert!(matches!(
            kind,
            ValidationErrorKind::StringLengthInvalid { min_length: Some(2), .. }
        ));
        let kind = expect_kind(validate(&json!("abcd"), &bounded));
        assert!(matches!(
            kind,
            ValidationErrorKind::StringLengthInvalid { max_length: Some(3), .. }
        ));
    }

    #[test]
    fn test_string_format_runs_after_structural_checks() {
        let colored = schema(json!({"type": "string", "format": "color"}));
        assert!(validate(&json!("#CCC"), &colored).is_ok());

        let kind = expect_kind(validate(&json!("CCC"), &colored));
        assert_eq!(
            kind,
            ValidationErrorKind::FormatMismatch {
                format: "color".to_string(),
                value: "CCC".to_string(),
            }
        );
    }

    // ==================== Array Tests ====================

    #[test]
    fn test_array_items_single_schema() {
        let typed = schema(json!({"type": "array", "items": {"type": "string"}}));
        assert!(validate(&json!(["a", "b"]), &typed).is_ok());

        let error = expect_error(validate(&json!(["a", 7]), &typed));
        assert_eq!(error.instance_path.to_string(), "root.1");
        assert!(matches!(error.kind, ValidationErrorKind::TypeMismatch { .. }));
    }

    #[test]
    fn test_array_tuple_items_tolerate_trailing_elements() {
        let tuple = schema(json!({
            "type": "array",
            "items": [{"type": "string"}, {"type": "integer"}]
        }));
        assert!(validate(&json!(["a", 1]), &tuple).is_ok());
        assert!(validate(&json!(["a", 1, true, null]), &tuple).is_ok());

        let error = expect_error(validate(&json!(["a", "x"]), &tuple));
        assert_eq!(error.instance_path.to_string(), "root.1");
    }

    #[test]
    fn test_array_tuple_malformed_entry_is_lazy() {
        let tuple = schema(json!({"type": "array", "items": [{"type": "string"}, 7]}));
        assert!(validate(&json!(["a"]), &tuple).is_ok());

        match expect_schema_error(validate(&json!(["a", "b"]), &tuple)) {
            SchemaError::InvalidNode { path, found } => {
                assert_eq!(path, "root.1");
                assert_eq!(found, "number");
            }
            other => panic!("expected invalid node, got {:?}", other),
        }
    }

    #[test]
    fn test_array_length_bounds() {
        let bounded = schema(json!({"type": "array", "minItems": 1, "maxItems": 3}));
        assert!(validate(&json!(["a"]), &bounded).is_ok());

        let kind = expect_kind(validate(&json!([]), &bounded));
        assert!(matches!(
            kind,
            ValidationErrorKind::ArrayLengthInvalid { min_items: Some(1), .. }
        ));
        let kind = expect_kind(validate(&json!(["a", "b", "c", "d"]), &bounded));
        assert!(matches!(
            kind,
            ValidationErrorKind::ArrayLengthInvalid { max_items: Some(3), .. }
        ));
    }

    #[test]
    fn test_unique_items() {
        let unique = schema(json!({"type": "array", "uniqueItems": true}));
        assert!(validate(&json!(["a", "b"]), &unique).is_ok());
        assert_eq!(
            expect_kind(validate(&json!(["a", "a"]), &unique)),
            ValidationErrorKind::ArrayItemsNotUnique
        );

        let relaxed = schema(json!({"type": "array", "uniqueItems": false}));
        assert!(validate(&json!(["a", "a"]), &relaxed).is_ok());
    }

    #[test]
    fn test_items_declaration_must_be_schema_shaped() {
        let bad = schema(json!({"type": "array", "items": "nope"}));
        match expect_schema_error(validate(&json!([1]), &bad)) {
            SchemaError::InvalidItems { path } => assert_eq!(path, "root"),
            other => panic!("expected invalid items, got {:?}", other),
        }
    }

    // ==================== Enum Tests ====================

    #[test]
    fn test_enum_membership() {
        let colors = schema(json!({"type": "string", "enum": ["red", "green"]}));
        assert!(validate(&json!("red"), &colors).is_ok());

        let kind = expect_kind(validate(&json!("blue"), &colors));
        assert!(matches!(kind, ValidationErrorKind::InvalidEnumValue { .. }));
    }

    #[test]
    fn test_enum_equality_includes_the_value_type() {
        let exact = schema(json!({"enum": [2, "2"]}));
        assert!(validate(&json!(2), &exact).is_ok());
        assert!(validate(&json!("2"), &exact).is_ok());
        assert!(validate(&json!(2.0), &exact).is_err());
    }

    #[test]
    fn test_enum_runs_after_type_dispatch() {
        let colors = schema(json!({"type": "string", "enum": ["red"]}));
        let kind = expect_kind(validate(&json!(5), &colors));
        assert!(matches!(kind, ValidationErrorKind::TypeMismatch { .. }));
    }

    #[test]
    fn test_enum_declaration_must_be_a_sequence() {
        let bad = schema(json!({"enum": "oops"}));
        match expect_schema_error(validate(&json!("x"), &bad)) {
            SchemaError::InvalidEnum { path } => assert_eq!(path, "root"),
            other => panic!("expected invalid enum, got {:?}", other),
        }
    }

    // ==================== Disallow Tests ====================

    #[test]
    fn test_disallow_rejects_matching_shape() {
        let no_strings = schema(json!({"disallow": "string"}));
        assert!(validate(&json!(5), &no_strings).is_ok());

        let kind = expect_kind(validate(&json!("s"), &no_strings));
        assert_eq!(
            kind,
            ValidationErrorKind::DisallowedType {
                matched: "string".to_string(),
            }
        );
    }

    #[test]
    fn test_disallow_list() {
        let scalar_only = schema(json!({"disallow": ["object", "array"]}));
        assert!(validate(&json!("ok"), &scalar_only).is_ok());
        assert!(validate(&json!({}), &scalar_only).is_err());
        assert!(validate(&json!([]), &scalar_only).is_err());
    }

    #[test]
    fn test_disallow_runs_before_type_dispatch() {
        let narrowed = schema(json!({"type": ["string", "number"], "disallow": "integer"}));
        assert!(validate(&json!(5.5), &narrowed).is_ok());
        assert!(validate(&json!("s"), &narrowed).is_ok());

        let kind = expect_kind(validate(&json!(5), &narrowed));
        assert_eq!(
            kind,
            ValidationErrorKind::DisallowedType {
                matched: "integer".to_string(),
            }
        );
    }

    #[test]
    fn test_disallow_unknown_name_is_a_schema_defect() {
        let bad = schema(json!({"disallow": "widget"}));
        assert!(matches!(
            expect_schema_error(validate(&json!(1), &bad)),
            SchemaError::UnknownType { .. }
        ));
    }

    #[test]
    fn test_disallow_inline_schema_is_a_schema_defect() {
        let bad = schema(json!({"disallow": {"type": "string"}}));
        match expect_schema_error(validate(&json!(1), &bad)) {
            SchemaError::InvalidTypeDecl { keyword, .. } => assert_eq!(keyword, "disallow"),
            other => panic!("expected invalid disallow declaration, got {:?}", other),
        }
    }

    // ==================== Untyped Node Tests ====================

    #[test]
    fn test_untyped_node_accepts_anything() {
        let any = schema(json!({}));
        assert!(validate(&json!(1), &any).is_ok());
        assert!(validate(&json!("s"), &any).is_ok());
        assert!(validate(&json!(null), &any).is_ok());
        assert!(validate(&json!([1, 2]), &any).is_ok());
        assert!(validate(&json!({"x": 1}), &any).is_ok());
    }

    #[test]
    fn test_untyped_constraints_gate_on_value_shape() {
        let mixed = schema(json!({"minLength": 3, "minimum": 10}));
        assert!(validate(&json!(true), &mixed).is_ok());
        assert!(validate(&json!("long enough"), &mixed).is_ok());
        assert!(validate(&json!(12), &mixed).is_ok());

        let kind = expect_kind(validate(&json!("ab"), &mixed));
        assert!(matches!(kind, ValidationErrorKind::StringLengthInvalid { .. }));
        let kind = expect_kind(validate(&json!(5), &mixed));
        assert!(matches!(kind, ValidationErrorKind::NumberOutOfRange { .. }));
    }

    #[test]
    fn test_untyped_properties_apply_to_objects_only() {
        let shaped = schema(json!({"properties": {"x": {"type": "integer"}}}));
        assert!(validate(&json!("not an object"), &shaped).is_ok());
        assert!(validate(&json!({"x": 3}), &shaped).is_ok());

        let error = expect_error(validate(&json!({"x": "s"}), &shaped));
        assert_eq!(error.instance_path.to_string(), "root.x");
    }

    // ==================== Walk Behavior Tests ====================

    #[test]
    fn test_defects_in_unreached_branches_stay_silent() {
        let lazy = schema(json!({
            "type": "object",
            "properties": {
                "good": {"type": "string"},
                "broken": {"type": "number", "divisibleBy": 0}
            }
        }));
        assert!(validate(&json!({"good": "x"}), &lazy).is_ok());

        assert!(matches!(
            expect_schema_error(validate(&json!({"good": "x", "broken": 6}), &lazy)),
            SchemaError::InvalidDivisor { .. }
        ));
    }

    #[test]
    fn test_revalidation_is_idempotent() {
        let object = schema(json!({
            "type": "object",
            "properties": {"name": {"type": "string", "required": true}}
        }));
        let document = json!({"name": "ok"});
        assert!(validate(&document, &object).is_ok());
        assert!(validate(&document, &object).is_ok());

        assert!(validate(&json!({}), &object).is_err());
        assert!(validate(&document, &object).is_ok());
    }

    #[test]
    fn test_custom_root_name_flows_into_paths() {
        let number = schema(json!({"type": "number"}));
        let error = expect_error(validate_named(&json!("x"), &number, "config"));
        assert_eq!(error.instance_path.to_string(), "config");
    }
}
