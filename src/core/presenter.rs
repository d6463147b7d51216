//! The presenter: a read-only decorator around one record

use crate::core::casing::Casing;
use crate::core::definition::PresenterDefinition;
use crate::core::error::{PresenterError, Result, WriteOperation};
use crate::core::record::{Attributes, Record};
use serde::{Serialize, Serializer};
use serde_json::Value;
use std::any::TypeId;
use std::fmt;
use std::sync::Arc;

/// Wraps one record to add computed attributes, filter visibility and re-case
/// keys before serialization.
///
/// The record is borrowed, never copied or mutated. The casing mode starts at
/// the definition's default and can be switched per instance.
pub struct Presenter<'a, R> {
    model: &'a R,
    definition: Arc<PresenterDefinition<R>>,
    casing: Casing,
}

impl<'a, R: Record> Presenter<'a, R> {
    /// Wrap a record
    pub fn new(model: &'a R, definition: Arc<PresenterDefinition<R>>) -> Self {
        let casing = definition.casing();
        Self {
            model,
            definition,
            casing,
        }
    }

    /// Alias of [`Presenter::new`]
    pub fn make(model: &'a R, definition: Arc<PresenterDefinition<R>>) -> Self {
        Self::new(model, definition)
    }

    /// Present every record of a sequence with the same definition
    pub fn collection<I>(models: I, definition: Arc<PresenterDefinition<R>>) -> Vec<Self>
    where
        I: IntoIterator<Item = &'a R>,
    {
        models
            .into_iter()
            .map(|model| Self::new(model, Arc::clone(&definition)))
            .collect()
    }

    /// The wrapped record
    pub fn model(&self) -> &'a R {
        self.model
    }

    /// The definition this presenter was built from
    pub fn definition(&self) -> &Arc<PresenterDefinition<R>> {
        &self.definition
    }

    /// Whether this presenter was created from the typed presenter `P`
    pub fn is<P: 'static>(&self) -> bool {
        self.definition.kind() == Some(TypeId::of::<P>())
    }

    // === Casing ===

    /// Current casing mode
    pub fn casing(&self) -> Casing {
        self.casing
    }

    /// Whether output keys are snake_cased
    pub fn is_snake_case(&self) -> bool {
        self.casing.is_snake()
    }

    /// Switch output keys to snake_case
    pub fn snake_case(&mut self) -> &mut Self {
        self.casing = Casing::Snake;
        self
    }

    /// Switch output keys to camelCase
    pub fn camel_case(&mut self) -> &mut Self {
        self.casing = Casing::Camel;
        self
    }

    /// Consuming variant of the casing switches
    pub fn with_casing(mut self, casing: Casing) -> Self {
        self.casing = casing;
        self
    }

    // === Resolution ===

    /// Resolve a property: a computed attribute first, then the record's own
    /// field.
    pub fn get(&self, name: &str) -> Result<Value> {
        if let Some(attribute) = self.definition.find_computed(name) {
            tracing::trace!(
                presenter = %self.definition.name(),
                attribute = %attribute.name(),
                "Resolved computed attribute"
            );
            return Ok(attribute.resolve(self.model));
        }

        tracing::debug!(
            presenter = %self.definition.name(),
            property = %name,
            "Delegating property to record"
        );
        self.model.attribute(name).ok_or_else(|| {
            tracing::debug!(property = %name, "Property could not be resolved");
            PresenterError::PropertyNotResolvable {
                name: name.to_string(),
            }
        })
    }

    /// Invoke a method: the presenter's own first, then the record's.
    pub fn call(&self, method: &str, args: &[Value]) -> Result<Value> {
        match self.definition.method(method) {
            Some(own) => own(self.model, args),
            None => self.model.call(method, args),
        }
    }

    // === Serialization ===

    /// Build the presented output.
    ///
    /// Raw fields come first in record order, narrowed by `visible` or, when
    /// that is empty, by `hidden`. Computed attributes follow in declaration
    /// order and are never filtered; one sharing a raw field's key replaces
    /// that value in place.
    pub fn to_array(&self) -> Attributes {
        let raw = self.model.attributes();
        let computed = self.definition.computed();
        let mut output = Attributes::with_capacity(raw.len() + computed.len());

        for (key, value) in raw {
            if self.definition.is_field_visible(&key) {
                output.insert(self.casing.apply(&key), value);
            }
        }

        for attribute in computed {
            output.insert(
                self.casing.apply(attribute.name()),
                attribute.resolve(self.model),
            );
        }

        tracing::trace!(
            presenter = %self.definition.name(),
            keys = output.len(),
            "Built presented output"
        );
        output
    }

    /// Compact JSON encoding of [`Presenter::to_array`]
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(&self.to_array())?)
    }

    /// Pretty-printed JSON encoding of [`Presenter::to_array`]
    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self.to_array())?)
    }

    // === Read-only indexed access ===

    /// Look up a key of the presented output
    pub fn lookup(&self, key: &str) -> Option<Value> {
        self.to_array().swap_remove(key)
    }

    /// Whether the presented output has a key
    pub fn contains_key(&self, key: &str) -> bool {
        self.to_array().contains_key(key)
    }

    /// Presented output is read-only; this always fails
    pub fn set(&mut self, key: &str, _value: Value) -> Result<()> {
        Err(PresenterError::unwritable(key, WriteOperation::Set))
    }

    /// Presented output is read-only; this always fails
    pub fn unset(&mut self, key: &str) -> Result<()> {
        Err(PresenterError::unwritable(key, WriteOperation::Unset))
    }
}

impl<R> Clone for Presenter<'_, R> {
    fn clone(&self) -> Self {
        Self {
            model: self.model,
            definition: Arc::clone(&self.definition),
            casing: self.casing,
        }
    }
}

impl<R: Record> fmt::Debug for Presenter<'_, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Presenter")
            .field("presenter", &self.definition.name())
            .field("casing", &self.casing)
            .field("output", &self.to_array())
            .finish()
    }
}

impl<R: Record> fmt::Display for Presenter<'_, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let json = self.to_json().map_err(|_| fmt::Error)?;
        f.write_str(&json)
    }
}

impl<R: Record> Serialize for Presenter<'_, R> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        self.to_array().serialize(serializer)
    }
}

impl<R: Record> Record for Presenter<'_, R> {
    fn attributes(&self) -> Attributes {
        self.to_array()
    }

    fn attribute(&self, key: &str) -> Option<Value> {
        self.get(key).ok()
    }

    fn call(&self, method: &str, args: &[Value]) -> Result<Value> {
        Presenter::call(self, method, args)
    }
}

/// A presenter type declared with [`define_presenter!`](crate::define_presenter).
///
/// The definition is built on first use and memoized for the life of the
/// process.
pub trait PresenterKind: 'static {
    /// The record type this presenter wraps
    type Model: Record + 'static;

    /// The shared definition
    fn definition() -> Arc<PresenterDefinition<Self::Model>>;

    /// Wrap a record
    fn make(model: &Self::Model) -> Presenter<'_, Self::Model> {
        Presenter::new(model, Self::definition())
    }

    /// Wrap every record of a sequence
    fn collection<'a, I>(models: I) -> Vec<Presenter<'a, Self::Model>>
    where
        I: IntoIterator<Item = &'a Self::Model>,
    {
        Presenter::collection(models, Self::definition())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn user() -> Attributes {
        let mut attrs = Attributes::new();
        attrs.insert("id".to_string(), json!(1));
        attrs.insert("name".to_string(), json!("David Hemphill"));
        attrs.insert("email".to_string(), json!("d@x.com"));
        attrs
    }

    fn name_of(record: &Attributes) -> String {
        record
            .get("name")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string()
    }

    fn profile() -> Arc<PresenterDefinition<Attributes>> {
        Arc::new(
            PresenterDefinition::builder("profile")
                .computed("full_name", |r: &Attributes| format!("Mx. {}", name_of(r)))
                .hidden(["email"])
                .build(),
        )
    }

    #[test]
    fn test_to_array_example() {
        let record = user();
        let presenter = Presenter::new(&record, profile());

        let expected = json!({
            "id": 1,
            "name": "David Hemphill",
            "full_name": "Mx. David Hemphill"
        });
        assert_eq!(json!(presenter.to_array()), expected);

        let output = presenter.to_array();
        let keys: Vec<&str> = output.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["id", "name", "full_name"]);
    }

    #[test]
    fn test_get_prefers_computed() {
        let record = user();
        let definition = Arc::new(
            PresenterDefinition::<Attributes>::builder("shadow")
                .computed("name", |_| "Presented")
                .build(),
        );
        let presenter = Presenter::new(&record, definition);

        assert_eq!(presenter.get("name").unwrap(), json!("Presented"));
        assert_eq!(presenter.get("email").unwrap(), json!("d@x.com"));
        assert_eq!(presenter.to_array()["name"], json!("Presented"));
    }

    #[test]
    fn test_get_unresolvable() {
        let record = user();
        let presenter = Presenter::new(&record, profile());

        let err = presenter.get("nickname").unwrap_err();
        assert!(matches!(err, PresenterError::PropertyNotResolvable { ref name } if name == "nickname"));
    }

    #[test]
    fn test_get_bypasses_visibility() {
        let record = user();
        let presenter = Presenter::new(&record, profile());

        assert_eq!(presenter.get("email").unwrap(), json!("d@x.com"));
        assert!(!presenter.contains_key("email"));
    }

    #[test]
    fn test_camel_case_switch() {
        let record = user();
        let mut presenter = Presenter::new(&record, profile());
        assert!(presenter.is_snake_case());

        presenter.camel_case();
        assert!(!presenter.is_snake_case());
        assert!(presenter.contains_key("fullName"));
        assert!(!presenter.contains_key("full_name"));

        presenter.snake_case();
        assert!(presenter.contains_key("full_name"));
    }

    #[test]
    fn test_read_only() {
        let record = user();
        let mut presenter = Presenter::new(&record, profile());

        assert!(matches!(
            presenter.set("name", json!("x")),
            Err(PresenterError::Unwritable { operation: WriteOperation::Set, .. })
        ));
        assert!(matches!(
            presenter.unset("name"),
            Err(PresenterError::Unwritable { operation: WriteOperation::Unset, .. })
        ));
        assert_eq!(presenter.lookup("name"), Some(json!("David Hemphill")));
    }

    #[test]
    fn test_display_matches_to_json() {
        let record = user();
        let presenter = Presenter::new(&record, profile());

        assert_eq!(presenter.to_string(), presenter.to_json().unwrap());
        assert_eq!(
            presenter.to_json().unwrap(),
            r#"{"id":1,"name":"David Hemphill","full_name":"Mx. David Hemphill"}"#
        );
    }

    #[test]
    fn test_presenter_is_a_record() {
        let record = user();
        let presenter = Presenter::new(&record, profile());

        assert_eq!(Record::attributes(&presenter), presenter.to_array());
        assert_eq!(Record::attribute(&presenter, "full_name"), Some(json!("Mx. David Hemphill")));
    }

    #[test]
    fn test_collection_preserves_order() {
        let first = user();
        let mut second = user();
        second.insert("name".to_string(), json!("Taylor Otwell"));

        let records = vec![first, second];
        let presenters = Presenter::collection(&records, profile());

        assert_eq!(presenters.len(), 2);
        assert_eq!(presenters[0].get("full_name").unwrap(), json!("Mx. David Hemphill"));
        assert_eq!(presenters[1].get("full_name").unwrap(), json!("Mx. Taylor Otwell"));
    }
}
