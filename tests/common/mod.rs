//! Shared fixtures for integration tests

#![allow(dead_code)]

use chrono::{DateTime, Duration, TimeZone, Utc};
use present::core::record::serialize_attributes;
use present::prelude::*;

/// Install a tracing subscriber once; honours `RUST_LOG`
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// 14 October 2019, midnight UTC
pub fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2019, 10, 14, 0, 0, 0)
        .single()
        .expect("valid fixture date")
}

#[derive(Debug, Clone, Serialize)]
pub struct User {
    pub id: u64,
    pub name: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    pub fn new(id: u64, name: &str, email: &str) -> Self {
        Self {
            id,
            name: name.to_string(),
            email: email.to_string(),
            created_at: now() - Duration::days(4),
            updated_at: now(),
        }
    }

    pub fn david() -> Self {
        Self::new(1, "David Hemphill", "david@laravel.com")
    }

    pub fn taylor() -> Self {
        Self::new(2, "Taylor Otwell", "taylor@laravel.com")
    }
}

impl Record for User {
    fn attributes(&self) -> Attributes {
        serialize_attributes(self)
    }

    fn call(&self, method: &str, args: &[Value]) -> present::core::Result<Value> {
        match method {
            "say_hello" => Ok(json!("Hello from the Model!")),
            "greet" => {
                let whom = args.first().and_then(Value::as_str).unwrap_or("stranger");
                Ok(json!(format!("{} greets {}", self.name, whom)))
            }
            _ => Err(PresenterError::MethodNotFound {
                method: method.to_string(),
                target: "User".to_string(),
            }),
        }
    }
}

fn name_part(user: &User, index: usize) -> String {
    user.name
        .split(' ')
        .nth(index)
        .unwrap_or_default()
        .to_string()
}

define_presenter! {
    /// No additions: the record as-is
    pub struct UserProfilePresenter for User => |presenter| presenter
}

define_presenter! {
    /// Human readable timestamps
    pub struct ReadableDatesPresenter for User => |presenter| presenter
        .computed("created_at", |user| user.created_at.format("%b %-d, %Y").to_string())
        .computed("updated_at", |user| user.updated_at.format("%b %-d, %Y").to_string())
}

define_presenter! {
    /// Splits the name and camel-cases every key
    pub struct CamelCaseAttributesPresenter for User => |presenter| presenter
        .casing(Casing::Camel)
        .computed("first_name", |user| name_part(user, 0))
        .computed("last_name", |user| name_part(user, 1))
}

define_presenter! {
    pub struct HiddenAttributesPresenter for User => |presenter| presenter
        .hidden(["id", "created_at", "updated_at"])
}

define_presenter! {
    pub struct VisibleAttributesPresenter for User => |presenter| presenter
        .visible(["id", "email"])
}

define_presenter! {
    pub struct HiddenAndVisibleAttributesPresenter for User => |presenter| presenter
        .hidden(["id", "created_at", "name", "updated_at"])
        .visible(["name"])
}

define_presenter! {
    /// Courtesy title, email withheld
    pub struct CourtesyPresenter for User => |presenter| presenter
        .computed("full_name", |user| format!("Mx. {}", user.name))
        .hidden(["email"])
}

/// A user type whose records present themselves with `UserProfilePresenter`
#[derive(Debug, Clone, Serialize)]
pub struct UserWithDefaultPresenter {
    pub id: u64,
    pub name: String,
}

define_presenter! {
    pub struct DefaultProfilePresenter for UserWithDefaultPresenter => |presenter| presenter
        .computed("display_name", |user| user.name.to_uppercase())
}

impl_record!(UserWithDefaultPresenter, default = DefaultProfilePresenter);
