//! The record abstraction presenters wrap

use crate::core::definition::PresenterDefinition;
use crate::core::error::{PresenterError, Result};
use indexmap::IndexMap;
use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;

/// An insertion-ordered attribute map
pub type Attributes = IndexMap<String, Value>;

/// Trait for any data-bearing value a presenter can wrap.
///
/// A record exposes:
/// - attributes: a flat, ordered export of its fields
/// - attribute: access to a single field
/// - call: a named-method surface presenters delegate to
///
/// Presenters never mutate the record they wrap.
pub trait Record {
    /// Export every field, in declaration order
    fn attributes(&self) -> Attributes;

    /// Get the value of a single field by name
    fn attribute(&self, key: &str) -> Option<Value> {
        self.attributes().swap_remove(key)
    }

    /// Invoke a named method on the record.
    ///
    /// Records without a method surface keep the default, which reports the
    /// method as missing.
    fn call(&self, method: &str, _args: &[Value]) -> Result<Value> {
        Err(PresenterError::MethodNotFound {
            method: method.to_string(),
            target: std::any::type_name::<Self>().to_string(),
        })
    }

    /// The presenter used when none is passed explicitly
    fn default_presenter() -> Option<Arc<PresenterDefinition<Self>>>
    where
        Self: Sized,
    {
        None
    }
}

/// Export a serializable value as attributes.
///
/// Used by [`impl_record!`](crate::impl_record). Values that do not serialize to
/// a JSON object export no attributes. A serialization failure (a map with
/// non-string keys, a failing `Serialize` impl) is logged and also exports no
/// attributes; use [`try_serialize_attributes`] to observe it.
pub fn serialize_attributes<T: Serialize + ?Sized>(value: &T) -> Attributes {
    match try_serialize_attributes(value) {
        Ok(attributes) => attributes,
        Err(e) => {
            tracing::warn!(
                record = std::any::type_name::<T>(),
                error = %e,
                "Record failed to serialize, exporting no attributes"
            );
            Attributes::new()
        }
    }
}

/// Export a serializable value as attributes, reporting serialization errors
pub fn try_serialize_attributes<T: Serialize + ?Sized>(value: &T) -> Result<Attributes> {
    match serde_json::to_value(value)? {
        Value::Object(map) => Ok(map.into_iter().collect()),
        other => {
            tracing::warn!(
                record = std::any::type_name::<T>(),
                kind = json_kind(&other),
                "Record did not serialize to an object, exporting no attributes"
            );
            Ok(Attributes::new())
        }
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

impl Record for Attributes {
    fn attributes(&self) -> Attributes {
        self.clone()
    }

    fn attribute(&self, key: &str) -> Option<Value> {
        self.get(key).cloned()
    }
}

impl Record for serde_json::Map<String, Value> {
    fn attributes(&self) -> Attributes {
        self.iter().map(|(k, v)| (k.clone(), v.clone())).collect()
    }

    fn attribute(&self, key: &str) -> Option<Value> {
        self.get(key).cloned()
    }
}

impl<T: Record + ?Sized> Record for &T {
    fn attributes(&self) -> Attributes {
        (**self).attributes()
    }

    fn attribute(&self, key: &str) -> Option<Value> {
        (**self).attribute(key)
    }

    fn call(&self, method: &str, args: &[Value]) -> Result<Value> {
        (**self).call(method, args)
    }
}
