//! In-memory resource state.

use serde_json::{Map, Value};
use tfo_error::{Result, TfoError};
use tfo_traits::ResourceData;

use crate::schema::{Presence, ResourceSchema};

/// Resource data backed by a JSON object and checked against a schema.
///
/// Configuration and computed values share one namespace, the way Terraform
/// resource data does. Writes are type-checked; reads of unset keys return
/// `None`.
#[derive(Debug, Clone)]
pub struct StateData {
    schema: ResourceSchema,
    id: String,
    values: Map<String, Value>,
}

impl StateData {
    /// Empty state for `schema`.
    pub fn new(schema: ResourceSchema) -> Self {
        Self {
            schema,
            id: String::new(),
            values: Map::new(),
        }
    }

    /// State seeded from a configuration object.
    ///
    /// The configuration is validated first. Null entries count as unset.
    pub fn from_config(schema: ResourceSchema, config: Value) -> Result<Self> {
        let Value::Object(config) = config else {
            return Err(TfoError::Config(
                "data source configuration must be a JSON object".to_string(),
            ));
        };
        schema.validate_config(&config)?;

        let values = config.into_iter().filter(|(_, v)| !v.is_null()).collect();
        Ok(Self {
            schema,
            id: String::new(),
            values,
        })
    }

    pub fn schema(&self) -> &ResourceSchema {
        &self.schema
    }

    /// Whether the state has been voided or was never read.
    pub fn is_void(&self) -> bool {
        self.id.is_empty()
    }

    /// The state as one JSON object: `id` (when set) plus every value.
    pub fn to_json(&self) -> Value {
        let mut out = Map::new();
        if !self.id.is_empty() {
            out.insert("id".to_string(), Value::String(self.id.clone()));
        }
        for (key, value) in &self.values {
            out.insert(key.clone(), value.clone());
        }
        Value::Object(out)
    }
}

impl ResourceData for StateData {
    fn get_ok(&self, key: &str) -> Option<&Value> {
        self.values.get(key).filter(|v| !v.is_null())
    }

    fn id(&self) -> &str {
        &self.id
    }

    fn set_id(&mut self, id: &str) {
        self.id = id.to_string();
        if id.is_empty() {
            let schema = &self.schema;
            self.values.retain(|key, _| {
                schema
                    .field(key)
                    .is_some_and(|f| f.presence != Presence::Computed)
            });
        }
    }

    fn set(&mut self, key: &str, value: Value) -> Result<()> {
        self.schema.check_value(key, &value)?;
        self.values.insert(key.to_string(), value);
        Ok(())
    }
}
