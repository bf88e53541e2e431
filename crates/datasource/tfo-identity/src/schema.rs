//! Declarative schemas for data source configuration and state.
//!
//! A [`ResourceSchema`] names every field a data source accepts or computes,
//! with its type and whether it is required, optional or computed. The same
//! schema validates user configuration before a read, guards every value
//! written into state, and tells the filter engine how to reach a field.

use serde_json::{Map, Value};
use std::collections::BTreeMap;
use tfo_error::{Result, SchemaError, StateError, TfoError};

/// The type of a schema field.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldType {
    String,
    Bool,
    Int,
    Float,
    /// String-keyed map of string values
    Map,
    List(Box<Element>),
    Set(Box<Element>),
}

/// The element type of a list or set.
#[derive(Debug, Clone, PartialEq)]
pub enum Element {
    Scalar(FieldType),
    Resource(ResourceSchema),
}

/// Whether a field is set by the user or by the data source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Presence {
    Required,
    Optional,
    Computed,
}

/// One field of a schema.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldSchema {
    pub ty: FieldType,
    pub presence: Presence,
}

impl FieldSchema {
    pub fn required(ty: FieldType) -> Self {
        Self {
            ty,
            presence: Presence::Required,
        }
    }

    pub fn optional(ty: FieldType) -> Self {
        Self {
            ty,
            presence: Presence::Optional,
        }
    }

    pub fn computed(ty: FieldType) -> Self {
        Self {
            ty,
            presence: Presence::Computed,
        }
    }
}

/// Field name -> field schema.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResourceSchema {
    fields: BTreeMap<String, FieldSchema>,
}

impl ResourceSchema {
    /// Create an empty schema.
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare a field (builder pattern).
    pub fn with_field(mut self, name: &str, field: FieldSchema) -> Self {
        self.fields.insert(name.to_string(), field);
        self
    }

    /// Look up a field by name.
    pub fn field(&self, name: &str) -> Option<&FieldSchema> {
        self.fields.get(name)
    }

    /// All fields, in name order.
    pub fn fields(&self) -> impl Iterator<Item = (&str, &FieldSchema)> {
        self.fields.iter().map(|(name, field)| (name.as_str(), field))
    }

    /// Validate user configuration.
    ///
    /// Rejects unknown keys, values for computed fields, and type mismatches.
    /// Required fields must be present and, for strings, non-empty. `null`
    /// counts as unset.
    pub fn validate_config(&self, config: &Map<String, Value>) -> Result<()> {
        self.validate_object("", config, false)
            .map_err(TfoError::Schema)
    }

    /// Check that `value` may be written to state under `key`.
    pub fn check_value(&self, key: &str, value: &Value) -> Result<()> {
        let field = self
            .field(key)
            .ok_or_else(|| StateError::UnknownKey(key.to_string()))?;

        if value.is_null() {
            return Ok(());
        }

        check_type(key, &field.ty, value, true).map_err(|e| {
            TfoError::State(StateError::Set {
                key: key.to_string(),
                reason: e.to_string(),
            })
        })
    }

    fn validate_object(
        &self,
        prefix: &str,
        object: &Map<String, Value>,
        allow_computed: bool,
    ) -> std::result::Result<(), SchemaError> {
        for (key, value) in object {
            let path = join_path(prefix, key);
            let field = self
                .field(key)
                .ok_or_else(|| SchemaError::UnknownField(path.clone()))?;

            if value.is_null() {
                continue;
            }
            if field.presence == Presence::Computed && !allow_computed {
                return Err(SchemaError::TypeMismatch {
                    field: path,
                    expected: "no value (computed)".to_string(),
                });
            }
            check_type(&path, &field.ty, value, allow_computed)?;
        }

        for (name, field) in self.fields() {
            if field.presence != Presence::Required {
                continue;
            }
            let missing = match object.get(name) {
                None | Some(Value::Null) => true,
                Some(Value::String(s)) => s.is_empty(),
                Some(_) => false,
            };
            if missing {
                return Err(SchemaError::MissingRequired(join_path(prefix, name)));
            }
        }

        Ok(())
    }
}

fn join_path(prefix: &str, key: &str) -> String {
    if prefix.is_empty() {
        key.to_string()
    } else {
        format!("{prefix}.{key}")
    }
}

fn check_type(
    path: &str,
    ty: &FieldType,
    value: &Value,
    allow_computed: bool,
) -> std::result::Result<(), SchemaError> {
    let mismatch = |expected: &str| SchemaError::TypeMismatch {
        field: path.to_string(),
        expected: expected.to_string(),
    };

    match ty {
        FieldType::String if value.is_string() => Ok(()),
        FieldType::String => Err(mismatch("a string")),
        FieldType::Bool if value.is_boolean() => Ok(()),
        FieldType::Bool => Err(mismatch("a bool")),
        FieldType::Int if value.is_i64() || value.is_u64() => Ok(()),
        FieldType::Int => Err(mismatch("an integer")),
        FieldType::Float if value.is_number() => Ok(()),
        FieldType::Float => Err(mismatch("a number")),
        FieldType::Map => match value.as_object() {
            Some(map) if map.values().all(Value::is_string) => Ok(()),
            _ => Err(mismatch("a map of strings")),
        },
        FieldType::List(element) | FieldType::Set(element) => {
            let items = value.as_array().ok_or_else(|| mismatch("a list"))?;
            for (i, item) in items.iter().enumerate() {
                let item_path = format!("{path}.{i}");
                match element.as_ref() {
                    Element::Scalar(inner) => check_type(&item_path, inner, item, allow_computed)?,
                    Element::Resource(schema) => {
                        let object = item.as_object().ok_or_else(|| SchemaError::TypeMismatch {
                            field: item_path.clone(),
                            expected: "an object".to_string(),
                        })?;
                        schema.validate_object(&item_path, object, allow_computed)?;
                    }
                }
            }
            Ok(())
        }
    }
}

/// Schema of one `filter` block.
pub fn filter_schema() -> ResourceSchema {
    ResourceSchema::new()
        .with_field("name", FieldSchema::required(FieldType::String))
        .with_field(
            "values",
            FieldSchema::required(FieldType::List(Box::new(Element::Scalar(
                FieldType::String,
            )))),
        )
        .with_field("regex", FieldSchema::optional(FieldType::Bool))
}

/// Schema of one element of the `compartments` output list.
pub fn compartment_item_schema() -> ResourceSchema {
    ResourceSchema::new()
        .with_field("compartment_id", FieldSchema::computed(FieldType::String))
        .with_field("defined_tags", FieldSchema::computed(FieldType::Map))
        .with_field("description", FieldSchema::computed(FieldType::String))
        .with_field("freeform_tags", FieldSchema::computed(FieldType::Map))
        .with_field("id", FieldSchema::computed(FieldType::String))
        .with_field("inactive_state", FieldSchema::computed(FieldType::String))
        .with_field("is_accessible", FieldSchema::computed(FieldType::Bool))
        .with_field("name", FieldSchema::computed(FieldType::String))
        .with_field("state", FieldSchema::computed(FieldType::String))
        .with_field("time_created", FieldSchema::computed(FieldType::String))
}

/// Schema of the compartments data source.
pub fn compartments_data_source_schema() -> ResourceSchema {
    ResourceSchema::new()
        .with_field(
            "filter",
            FieldSchema::optional(FieldType::Set(Box::new(Element::Resource(filter_schema())))),
        )
        .with_field("access_level", FieldSchema::optional(FieldType::String))
        .with_field("compartment_id", FieldSchema::required(FieldType::String))
        .with_field(
            "compartment_id_in_subtree",
            FieldSchema::optional(FieldType::Bool),
        )
        .with_field(
            "compartments",
            FieldSchema::computed(FieldType::List(Box::new(Element::Resource(
                compartment_item_schema(),
            )))),
        )
}
