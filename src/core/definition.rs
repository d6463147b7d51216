//! Presenter definitions: computed attributes, methods, visibility and casing
//!
//! A definition is built once per presenter type and shared by every
//! [`Presenter`](crate::core::presenter::Presenter) created from it.
//!
//! ```rust,ignore
//! let definition = PresenterDefinition::<User>::builder("user_profile")
//!     .computed("full_name", |user| format!("Mx. {}", user.name))
//!     .hidden(["email"])
//!     .build();
//! ```

use crate::config::PresentationConfig;
use crate::core::casing::{Casing, camel_case, snake_case};
use crate::core::error::{PresenterError, Result};
use indexmap::IndexMap;
use regex::Regex;
use serde_json::Value;
use std::any::TypeId;
use std::fmt;
use std::sync::{Arc, OnceLock};

/// Function producing a computed attribute from a record
pub type ComputedFn<R> = Arc<dyn Fn(&R) -> Value + Send + Sync>;

/// Function implementing a presenter-own method
pub type MethodFn<R> = Arc<dyn Fn(&R, &[Value]) -> Result<Value> + Send + Sync>;

/// A named, derived attribute
pub struct ComputedAttribute<R> {
    name: String,
    resolve: ComputedFn<R>,
}

impl<R> ComputedAttribute<R> {
    /// The attribute name, in snake_case
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Compute the value for a record
    pub fn resolve(&self, record: &R) -> Value {
        (self.resolve)(record)
    }
}

impl<R> Clone for ComputedAttribute<R> {
    fn clone(&self) -> Self {
        Self {
            name: self.name.clone(),
            resolve: Arc::clone(&self.resolve),
        }
    }
}

/// Everything a presenter type adds to the records it wraps
pub struct PresenterDefinition<R> {
    name: String,
    kind: Option<TypeId>,
    computed: Vec<ComputedAttribute<R>>,
    methods: IndexMap<String, MethodFn<R>>,
    hidden: Vec<String>,
    visible: Vec<String>,
    casing: Casing,
}

impl<R> PresenterDefinition<R> {
    /// Start building a definition
    pub fn builder(name: impl Into<String>) -> PresenterDefinitionBuilder<R> {
        PresenterDefinitionBuilder::new(name)
    }

    /// The presenter name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Type identity of the typed presenter this definition belongs to, if any
    pub fn kind(&self) -> Option<TypeId> {
        self.kind
    }

    /// Computed attributes, in declaration order
    pub fn computed(&self) -> &[ComputedAttribute<R>] {
        &self.computed
    }

    /// Names of the computed attributes, in declaration order
    pub fn computed_names(&self) -> Vec<&str> {
        self.computed.iter().map(|attr| attr.name()).collect()
    }

    /// Find a computed attribute, accepting any casing of its name
    pub fn find_computed(&self, name: &str) -> Option<&ComputedAttribute<R>> {
        let wanted = snake_case(name);
        let camel = camel_case(name);
        self.computed
            .iter()
            .find(|attr| attr.name == wanted || camel_case(&attr.name) == camel)
    }

    /// Find a presenter-own method by exact name
    pub fn method(&self, name: &str) -> Option<&MethodFn<R>> {
        self.methods.get(name)
    }

    /// Fields removed from output (ignored when `visible` is non-empty)
    pub fn hidden(&self) -> &[String] {
        &self.hidden
    }

    /// Fields kept in output; when non-empty, every other raw field is dropped
    pub fn visible(&self) -> &[String] {
        &self.visible
    }

    /// Default casing mode of presenters built from this definition
    pub fn casing(&self) -> Casing {
        self.casing
    }

    /// Whether a raw record field survives the visibility lists
    pub fn is_field_visible(&self, field: &str) -> bool {
        if !self.visible.is_empty() {
            return self.visible.iter().any(|v| v == field);
        }
        !self.hidden.iter().any(|h| h == field)
    }

    /// Check that every registered name is a plain identifier
    pub fn validate(&self) -> Result<()> {
        let names = self
            .computed
            .iter()
            .map(|attr| attr.name.as_str())
            .chain(self.methods.keys().map(String::as_str))
            .chain(self.hidden.iter().map(String::as_str))
            .chain(self.visible.iter().map(String::as_str));

        for name in names {
            validate_attribute_name(name)?;
        }
        Ok(())
    }

    /// Copy this definition with configuration overrides applied
    pub fn reconfigured(&self, config: &PresentationConfig) -> Self {
        self.to_builder().configure(config).build()
    }

    fn to_builder(&self) -> PresenterDefinitionBuilder<R> {
        PresenterDefinitionBuilder {
            name: self.name.clone(),
            kind: self.kind,
            computed: self.computed.clone(),
            methods: self.methods.clone(),
            hidden: self.hidden.clone(),
            visible: self.visible.clone(),
            casing: self.casing,
        }
    }
}

impl<R> Clone for PresenterDefinition<R> {
    fn clone(&self) -> Self {
        self.to_builder().build()
    }
}

impl<R> fmt::Debug for PresenterDefinition<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PresenterDefinition")
            .field("name", &self.name)
            .field("computed", &self.computed_names())
            .field("methods", &self.methods.keys().collect::<Vec<_>>())
            .field("hidden", &self.hidden)
            .field("visible", &self.visible)
            .field("casing", &self.casing)
            .finish()
    }
}

/// Check a single attribute name against `^[A-Za-z_][A-Za-z0-9_]*$`
pub fn validate_attribute_name(name: &str) -> Result<()> {
    static NAME_REGEX: OnceLock<Regex> = OnceLock::new();
    let regex = NAME_REGEX.get_or_init(|| {
        Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").expect("attribute name regex is valid")
    });

    if regex.is_match(name) {
        Ok(())
    } else {
        Err(PresenterError::InvalidAttributeName {
            name: name.to_string(),
        })
    }
}

/// Builder for [`PresenterDefinition`]
pub struct PresenterDefinitionBuilder<R> {
    name: String,
    kind: Option<TypeId>,
    computed: Vec<ComputedAttribute<R>>,
    methods: IndexMap<String, MethodFn<R>>,
    hidden: Vec<String>,
    visible: Vec<String>,
    casing: Casing,
}

impl<R> PresenterDefinitionBuilder<R> {
    /// Create an empty builder
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: None,
            computed: Vec::new(),
            methods: IndexMap::new(),
            hidden: Vec::new(),
            visible: Vec::new(),
            casing: Casing::default(),
        }
    }

    /// Tag the definition with the typed presenter it belongs to
    pub fn kind<P: 'static>(mut self) -> Self {
        self.kind = Some(TypeId::of::<P>());
        self
    }

    /// Register a computed attribute.
    ///
    /// The name is stored in snake_case. Registering the same name twice
    /// replaces the first function but keeps its position.
    pub fn computed<F, V>(mut self, name: &str, resolve: F) -> Self
    where
        F: Fn(&R) -> V + Send + Sync + 'static,
        V: Into<Value>,
    {
        let attribute = ComputedAttribute {
            name: snake_case(name),
            resolve: Arc::new(move |record: &R| -> Value { resolve(record).into() }),
        };

        match self.computed.iter_mut().find(|a| a.name == attribute.name) {
            Some(existing) => *existing = attribute,
            None => self.computed.push(attribute),
        }
        self
    }

    /// Register a presenter-own method; it takes priority over the record's
    pub fn method<F>(mut self, name: &str, method: F) -> Self
    where
        F: Fn(&R, &[Value]) -> Result<Value> + Send + Sync + 'static,
    {
        self.methods.insert(name.to_string(), Arc::new(method));
        self
    }

    /// Set the deny-list
    pub fn hidden<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.hidden = fields.into_iter().map(Into::into).collect();
        self
    }

    /// Set the allow-list
    pub fn visible<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.visible = fields.into_iter().map(Into::into).collect();
        self
    }

    /// Set the default casing mode
    pub fn casing(mut self, casing: Casing) -> Self {
        self.casing = casing;
        self
    }

    /// Apply configuration: the default casing first, then the overrides
    /// registered under this presenter's name.
    pub fn configure(mut self, config: &PresentationConfig) -> Self {
        if let Some(casing) = config.default_casing {
            self.casing = casing;
        }

        if let Some(overrides) = config.overrides_for(&self.name) {
            if let Some(hidden) = &overrides.hidden {
                self.hidden = hidden.clone();
            }
            if let Some(visible) = &overrides.visible {
                self.visible = visible.clone();
            }
            if let Some(casing) = overrides.casing {
                self.casing = casing;
            }
        }
        self
    }

    /// Finish the definition
    pub fn build(self) -> PresenterDefinition<R> {
        if !self.hidden.is_empty() && !self.visible.is_empty() {
            tracing::debug!(
                presenter = %self.name,
                "Presenter defines both hidden and visible fields, visible takes precedence"
            );
        }

        PresenterDefinition {
            name: self.name,
            kind: self.kind,
            computed: self.computed,
            methods: self.methods,
            hidden: self.hidden,
            visible: self.visible,
            casing: self.casing,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::record::Attributes;
    use serde_json::json;

    fn name_of(record: &Attributes) -> String {
        record
            .get("name")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string()
    }

    #[test]
    fn test_computed_names_are_snake_cased() {
        let definition = PresenterDefinition::<Attributes>::builder("profile")
            .computed("FullName", |r| name_of(r))
            .computed("sayHello", |_| "hello")
            .build();

        assert_eq!(definition.computed_names(), vec!["full_name", "say_hello"]);
    }

    #[test]
    fn test_find_computed_accepts_any_casing() {
        let definition = PresenterDefinition::<Attributes>::builder("profile")
            .computed("say_hello", |_| "hello")
            .build();

        assert!(definition.find_computed("say_hello").is_some());
        assert!(definition.find_computed("sayHello").is_some());
        assert!(definition.find_computed("SayHello").is_some());
        assert!(definition.find_computed("say_goodbye").is_none());
    }

    #[test]
    fn test_find_computed_by_camel_output_key() {
        let definition = PresenterDefinition::<Attributes>::builder("geometry")
            .computed("vector_x_y", |_| 1)
            .build();

        assert!(definition.find_computed("vectorXY").is_some());
        assert!(definition.find_computed("vector_x_y").is_some());
    }

    #[test]
    fn test_reregistering_replaces_in_place() {
        let definition = PresenterDefinition::<Attributes>::builder("profile")
            .computed("first", |_| 1)
            .computed("second", |_| 2)
            .computed("first", |_| 3)
            .build();

        assert_eq!(definition.computed_names(), vec!["first", "second"]);
        assert_eq!(definition.computed()[0].resolve(&Attributes::new()), json!(3));
    }

    #[test]
    fn test_visibility_visible_wins() {
        let definition = PresenterDefinition::<Attributes>::builder("profile")
            .hidden(["id", "name"])
            .visible(["name"])
            .build();

        assert!(definition.is_field_visible("name"));
        assert!(!definition.is_field_visible("id"));
        assert!(!definition.is_field_visible("email"));
    }

    #[test]
    fn test_visibility_hidden_only() {
        let definition = PresenterDefinition::<Attributes>::builder("profile")
            .hidden(["email"])
            .build();

        assert!(!definition.is_field_visible("email"));
        assert!(definition.is_field_visible("name"));
    }

    #[test]
    fn test_methods() {
        let definition = PresenterDefinition::<Attributes>::builder("profile")
            .method("middle_name", |_, _| Ok(json!("Isles")))
            .build();

        let method = definition.method("middle_name").unwrap();
        assert_eq!(method(&Attributes::new(), &[]).unwrap(), json!("Isles"));
        assert!(definition.method("missing").is_none());
    }

    #[test]
    fn test_kind() {
        struct Marker;
        let definition = PresenterDefinition::<Attributes>::builder("profile")
            .kind::<Marker>()
            .build();
        assert_eq!(definition.kind(), Some(TypeId::of::<Marker>()));

        let untyped = PresenterDefinition::<Attributes>::builder("profile").build();
        assert_eq!(untyped.kind(), None);
    }

    #[test]
    fn test_validate() {
        let ok = PresenterDefinition::<Attributes>::builder("profile")
            .computed("full_name", |_| "x")
            .hidden(["email", "_token"])
            .build();
        assert!(ok.validate().is_ok());

        let bad = PresenterDefinition::<Attributes>::builder("profile")
            .visible(["first name"])
            .build();
        assert!(matches!(
            bad.validate(),
            Err(PresenterError::InvalidAttributeName { ref name }) if name == "first name"
        ));
    }

    #[test]
    fn test_clone_shares_functions() {
        let definition = PresenterDefinition::<Attributes>::builder("profile")
            .computed("answer", |_| 42)
            .casing(Casing::Camel)
            .build();
        let copy = definition.clone();

        assert_eq!(copy.name(), "profile");
        assert_eq!(copy.casing(), Casing::Camel);
        assert_eq!(copy.computed()[0].resolve(&Attributes::new()), json!(42));
    }
}
