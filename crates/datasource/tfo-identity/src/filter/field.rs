//! Single-field filters.

use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tfo_error::{FilterError, Result};
use tracing::warn;

use super::Filter;
use crate::schema::{FieldType, ResourceSchema};

/// One `filter` block as written in configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterSpec {
    /// Field to match; `field.key` reaches into map fields
    pub name: String,

    /// Accepted values; any one matching is enough
    pub values: Vec<String>,

    /// Treat `values` as regular expressions
    #[serde(default)]
    pub regex: bool,
}

impl FilterSpec {
    /// Create an equality filter.
    pub fn new(name: impl Into<String>, values: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            name: name.into(),
            values: values.into_iter().map(Into::into).collect(),
            regex: false,
        }
    }

    /// Switch between regex and equality matching.
    pub fn with_regex(mut self, regex: bool) -> Self {
        self.regex = regex;
        self
    }
}

#[derive(Debug, Clone)]
enum Matcher {
    Equals(Vec<String>),
    Regex(Vec<Regex>),
}

/// A filter on one field of a projected item.
#[derive(Debug, Clone)]
pub struct FieldFilter {
    name: String,
    path: Vec<String>,
    matcher: Matcher,
}

impl FieldFilter {
    /// Build a filter, resolving its field against the item schema.
    ///
    /// A name the schema does not know is used as a literal top-level key.
    /// A regex value that does not compile is logged and never matches.
    pub fn new(spec: &FilterSpec, schema: &ResourceSchema) -> Result<Self> {
        if spec.name.is_empty() {
            return Err(FilterError::Malformed("filter name is empty".to_string()).into());
        }

        let path = match resolve_path(schema, &spec.name) {
            Some(path) => path,
            None => {
                warn!(name = %spec.name, "Filter names a field the schema does not declare");
                vec![spec.name.clone()]
            }
        };

        let matcher = if spec.regex {
            let compiled = spec
                .values
                .iter()
                .filter_map(|pattern| match Regex::new(pattern) {
                    Ok(re) => Some(re),
                    Err(e) => {
                        warn!(
                            name = %spec.name,
                            pattern = %pattern,
                            error = %e,
                            "Invalid regular expression in filter, treating it as a non-match"
                        );
                        None
                    }
                })
                .collect();
            Matcher::Regex(compiled)
        } else {
            Matcher::Equals(spec.values.clone())
        };

        Ok(Self {
            name: spec.name.clone(),
            path,
            matcher,
        })
    }

    /// The path of keys this filter follows into an item.
    pub fn path(&self) -> &[String] {
        &self.path
    }

    fn matches_value(&self, target: &Value) -> bool {
        match target {
            Value::String(s) => self.matches_str(s),
            Value::Bool(b) => self.matches_str(&b.to_string()),
            Value::Number(n) => self.matches_str(&n.to_string()),
            Value::Array(items) => items.iter().any(|item| self.matches_value(item)),
            Value::Null | Value::Object(_) => false,
        }
    }

    fn matches_str(&self, candidate: &str) -> bool {
        match &self.matcher {
            Matcher::Equals(values) => values.iter().any(|v| v == candidate),
            Matcher::Regex(patterns) => patterns.iter().any(|re| re.is_match(candidate)),
        }
    }
}

impl Filter for FieldFilter {
    fn matches(&self, item: &Map<String, Value>) -> bool {
        match lookup(item, &self.path) {
            Some(target) => self.matches_value(target),
            None => false,
        }
    }

    fn description(&self) -> String {
        match &self.matcher {
            Matcher::Equals(values) => format!("{} in [{}]", self.name, values.join(", ")),
            Matcher::Regex(patterns) => {
                let patterns: Vec<&str> = patterns.iter().map(Regex::as_str).collect();
                format!("{} =~ [{}]", self.name, patterns.join(", "))
            }
        }
    }
}

/// Resolve a filter name to a key path.
///
/// `field` names a top-level field. For map fields, `field.rest` looks up the
/// key `rest` inside the map; `rest` may itself contain dots, which is how
/// flattened defined tags (`Namespace.Key`) are reached.
fn resolve_path(schema: &ResourceSchema, name: &str) -> Option<Vec<String>> {
    if schema.field(name).is_some() {
        return Some(vec![name.to_string()]);
    }

    let (head, rest) = name.split_once('.')?;
    match schema.field(head) {
        Some(field) if field.ty == FieldType::Map && !rest.is_empty() => {
            Some(vec![head.to_string(), rest.to_string()])
        }
        _ => None,
    }
}

fn lookup<'a>(item: &'a Map<String, Value>, path: &[String]) -> Option<&'a Value> {
    let (first, rest) = path.split_first()?;
    let mut current = item.get(first)?;
    for key in rest {
        current = current.as_object()?.get(key)?;
    }
    Some(current)
}
