//! Presenter factory: choosing how a record is presented
//!
//! A record can be presented with a [`PresenterDefinition`] (giving a full
//! [`Presenter`]) or with an inline transformation function (giving a
//! [`Transformed`] attribute bag). [`Presentation`] covers both.

use crate::core::definition::PresenterDefinition;
use crate::core::error::{PresenterError, Result, WriteOperation};
use crate::core::presenter::{Presenter, PresenterKind};
use crate::core::record::{Attributes, Record};
use serde::{Serialize, Serializer};
use serde_json::Value;
use std::fmt;
use std::sync::Arc;

/// Inline transformation from a record to output attributes
pub type TransformFn<R> = Arc<dyn Fn(&R) -> Attributes + Send + Sync>;

/// How a record should be presented
pub enum Using<R> {
    /// Decorate with a presenter definition
    Presenter(Arc<PresenterDefinition<R>>),

    /// Replace with the attributes returned by a function
    Transform(TransformFn<R>),
}

impl<R: Record> Using<R> {
    /// Use a typed presenter
    pub fn presenter<P>() -> Self
    where
        P: PresenterKind<Model = R>,
    {
        Using::Presenter(P::definition())
    }

    /// Use an inline transformation
    pub fn transform<F>(transform: F) -> Self
    where
        F: Fn(&R) -> Attributes + Send + Sync + 'static,
    {
        Using::Transform(Arc::new(transform))
    }

    /// Present one record
    pub fn apply<'a>(&self, record: &'a R) -> Presentation<'a, R> {
        match self {
            Using::Presenter(definition) => {
                Presentation::Presenter(Presenter::new(record, Arc::clone(definition)))
            }
            Using::Transform(transform) => {
                Presentation::Transformed(Transformed::new(transform(record)))
            }
        }
    }
}

impl<R> Clone for Using<R> {
    fn clone(&self) -> Self {
        match self {
            Using::Presenter(definition) => Using::Presenter(Arc::clone(definition)),
            Using::Transform(transform) => Using::Transform(Arc::clone(transform)),
        }
    }
}

impl<R> fmt::Debug for Using<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Using::Presenter(definition) => f
                .debug_tuple("Presenter")
                .field(&definition.name())
                .finish(),
            Using::Transform(_) => f.debug_tuple("Transform").finish(),
        }
    }
}

impl<R> From<Arc<PresenterDefinition<R>>> for Using<R> {
    fn from(definition: Arc<PresenterDefinition<R>>) -> Self {
        Using::Presenter(definition)
    }
}

impl<R> From<PresenterDefinition<R>> for Using<R> {
    fn from(definition: PresenterDefinition<R>) -> Self {
        Using::Presenter(Arc::new(definition))
    }
}

/// Attributes produced by an inline transformation
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(transparent)]
pub struct Transformed {
    attributes: Attributes,
}

impl Transformed {
    /// Wrap transformed attributes
    pub fn new(attributes: Attributes) -> Self {
        Self { attributes }
    }

    /// Resolve a property
    pub fn get(&self, name: &str) -> Result<Value> {
        self.attributes
            .get(name)
            .cloned()
            .ok_or_else(|| PresenterError::PropertyNotResolvable {
                name: name.to_string(),
            })
    }

    /// Look up a key
    pub fn lookup(&self, key: &str) -> Option<Value> {
        self.attributes.get(key).cloned()
    }

    /// Whether a key is present
    pub fn contains_key(&self, key: &str) -> bool {
        self.attributes.contains_key(key)
    }

    /// The transformed attributes
    pub fn to_array(&self) -> Attributes {
        self.attributes.clone()
    }

    /// Compact JSON encoding of the attributes
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(&self.attributes)?)
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

impl fmt::Display for Transformed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let json = self.to_json().map_err(|_| fmt::Error)?;
        f.write_str(&json)
    }
}

impl Record for Transformed {
    fn attributes(&self) -> Attributes {
        self.to_array()
    }

    fn attribute(&self, key: &str) -> Option<Value> {
        self.lookup(key)
    }
}

/// The result of presenting one record
pub enum Presentation<'a, R> {
    Presenter(Presenter<'a, R>),
    Transformed(Transformed),
}

impl<'a, R: Record> Presentation<'a, R> {
    /// Resolve a property
    pub fn get(&self, name: &str) -> Result<Value> {
        match self {
            Presentation::Presenter(p) => p.get(name),
            Presentation::Transformed(t) => t.get(name),
        }
    }

    /// Look up a key of the presented output
    pub fn lookup(&self, key: &str) -> Option<Value> {
        match self {
            Presentation::Presenter(p) => p.lookup(key),
            Presentation::Transformed(t) => t.lookup(key),
        }
    }

    /// The presented output
    pub fn to_array(&self) -> Attributes {
        match self {
            Presentation::Presenter(p) => p.to_array(),
            Presentation::Transformed(t) => t.to_array(),
        }
    }

    /// Compact JSON encoding of the presented output
    pub fn to_json(&self) -> Result<String> {
        match self {
            Presentation::Presenter(p) => p.to_json(),
            Presentation::Transformed(t) => t.to_json(),
        }
    }

    /// The presenter, if this record was decorated
    pub fn as_presenter(&self) -> Option<&Presenter<'a, R>> {
        match self {
            Presentation::Presenter(p) => Some(p),
            Presentation::Transformed(_) => None,
        }
    }

    /// Mutable access to the presenter, e.g. to switch casing
    pub fn as_presenter_mut(&mut self) -> Option<&mut Presenter<'a, R>> {
        match self {
            Presentation::Presenter(p) => Some(p),
            Presentation::Transformed(_) => None,
        }
    }

    /// The transformed attributes, if an inline function was used
    pub fn as_transformed(&self) -> Option<&Transformed> {
        match self {
            Presentation::Presenter(_) => None,
            Presentation::Transformed(t) => Some(t),
        }
    }

    /// Whether this record was decorated by the typed presenter `P`
    pub fn is<P: 'static>(&self) -> bool {
        self.as_presenter().is_some_and(|p| p.is::<P>())
    }
}

impl<R: Record> fmt::Debug for Presentation<'_, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Presentation::Presenter(p) => f.debug_tuple("Presenter").field(p).finish(),
            Presentation::Transformed(t) => f.debug_tuple("Transformed").field(t).finish(),
        }
    }
}

impl<R: Record> fmt::Display for Presentation<'_, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Presentation::Presenter(p) => fmt::Display::fmt(p, f),
            Presentation::Transformed(t) => fmt::Display::fmt(t, f),
        }
    }
}

impl<R: Record> Serialize for Presentation<'_, R> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            Presentation::Presenter(p) => p.serialize(serializer),
            Presentation::Transformed(t) => t.serialize(serializer),
        }
    }
}

impl<R: Record> Record for Presentation<'_, R> {
    fn attributes(&self) -> Attributes {
        self.to_array()
    }

    fn attribute(&self, key: &str) -> Option<Value> {
        self.get(key).ok()
    }

    fn call(&self, method: &str, args: &[Value]) -> Result<Value> {
        match self {
            Presentation::Presenter(p) => p.call(method, args),
            Presentation::Transformed(t) => t.call(method, args),
        }
    }
}

/// Present a record
pub fn present<R: Record>(record: &R, using: impl Into<Using<R>>) -> Presentation<'_, R> {
    using.into().apply(record)
}

/// Present a record with an explicit choice, or the record type's default
/// presenter when `using` is `None`.
pub fn try_present<R: Record>(record: &R, using: Option<Using<R>>) -> Result<Presentation<'_, R>> {
    match using {
        Some(using) => Ok(using.apply(record)),
        None => default_presenter_for(record).map(Presentation::Presenter),
    }
}

fn default_presenter_for<R: Record>(record: &R) -> Result<Presenter<'_, R>> {
    match R::default_presenter() {
        Some(definition) => Ok(Presenter::new(record, definition)),
        None => {
            let type_name = std::any::type_name::<R>();
            tracing::debug!(record = type_name, "No presenter and no default presenter");
            Err(PresenterError::NoPresenter { record: type_name })
        }
    }
}

/// Presentation entry points available on every record
pub trait Presentable: Record + Sized {
    /// Present with the record type's default presenter
    fn present(&self) -> Result<Presenter<'_, Self>> {
        default_presenter_for(self)
    }

    /// Present with a definition
    fn present_with(&self, definition: Arc<PresenterDefinition<Self>>) -> Presenter<'_, Self> {
        Presenter::new(self, definition)
    }

    /// Present with a typed presenter
    fn present_as<P>(&self) -> Presenter<'_, Self>
    where
        P: PresenterKind<Model = Self>,
    {
        Presenter::new(self, P::definition())
    }

    /// Present with a definition or an inline transformation
    fn present_using(&self, using: impl Into<Using<Self>>) -> Presentation<'_, Self> {
        present(self, using)
    }
}

impl<R: Record> Presentable for R {}

/// Build [`Attributes`] from `key => value` pairs.
///
/// Values may be anything `serde_json::json!` accepts.
///
/// ```
/// use present::attributes;
///
/// let attrs = attributes! { "name" => "david", "age" => 30 };
/// assert_eq!(attrs["age"], 30);
/// ```
#[macro_export]
macro_rules! attributes {
    () => {
        $crate::core::record::Attributes::new()
    };
    ( $( $key:expr => $value:expr ),+ $(,)? ) => {{
        let mut attrs = $crate::core::record::Attributes::new();
        $(
            attrs.insert(::std::string::String::from($key), $crate::__private::serde_json::json!($value));
        )+
        attrs
    }};
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn user() -> Attributes {
        crate::attributes! { "id" => 1, "name" => "David" }
    }

    #[test]
    fn test_present_with_definition() {
        let record = user();
        let definition = PresenterDefinition::<Attributes>::builder("upper")
            .computed("shout", |r| {
                r.get("name")
                    .and_then(Value::as_str)
                    .unwrap_or_default()
                    .to_uppercase()
            })
            .build();

        let presented = present(&record, definition);
        assert!(presented.as_presenter().is_some());
        assert_eq!(presented.get("shout").unwrap(), json!("DAVID"));
    }

    #[test]
    fn test_present_with_closure() {
        let record = user();
        let presented = present(
            &record,
            Using::transform(|r: &Attributes| {
                let name = r.get("name").and_then(Value::as_str).unwrap_or_default();
                crate::attributes! { "name" => name.to_lowercase() }
            }),
        );

        assert!(presented.as_transformed().is_some());
        assert_eq!(presented.get("name").unwrap(), json!("david"));
        assert!(matches!(
            presented.get("id"),
            Err(PresenterError::PropertyNotResolvable { .. })
        ));
        assert_eq!(presented.to_json().unwrap(), r#"{"name":"david"}"#);
    }

    #[test]
    fn test_try_present_without_default_fails() {
        let record = user();
        let err = try_present(&record, None).unwrap_err();
        assert!(matches!(err, PresenterError::NoPresenter { .. }));

        let err = record.present().unwrap_err();
        assert_eq!(err.error_code(), "NO_PRESENTER");
    }

    #[test]
    fn test_try_present_explicit() {
        let record = user();
        let definition = Arc::new(PresenterDefinition::<Attributes>::builder("plain").build());
        let presented = try_present(&record, Some(Using::from(definition))).unwrap();
        assert_eq!(presented.to_array(), record);
    }

    #[test]
    fn test_transformed_is_read_only() {
        let mut transformed = Transformed::new(user());
        assert!(transformed.set("id", json!(2)).is_err());
        assert!(transformed.unset("id").is_err());
        assert_eq!(transformed.lookup("id"), Some(json!(1)));
        assert!(transformed.contains_key("name"));
    }

    #[test]
    fn test_transformed_display() {
        let transformed = Transformed::new(user());
        assert_eq!(transformed.to_string(), r#"{"id":1,"name":"David"}"#);
    }

    #[test]
    fn test_attributes_macro() {
        let empty: Attributes = crate::attributes! {};
        assert!(empty.is_empty());

        let attrs = crate::attributes! { "b" => 1, "a" => [1, 2], };
        let keys: Vec<&str> = attrs.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["b", "a"]);
        assert_eq!(attrs["a"], json!([1, 2]));
    }
}
