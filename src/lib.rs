//! # Present
//!
//! Read-only presenters for data records.
//!
//! A presenter wraps one record and shapes its serialized form without touching
//! the record itself.
//!
//! ## Features
//!
//! - **Computed Attributes**: derived values registered by name, always included in output
//! - **Visibility Filtering**: a `hidden` deny-list or a `visible` allow-list (allow-list wins)
//! - **Key Casing**: snake_case or camelCase output, switchable per presenter instance
//! - **Delegation**: unknown properties and methods fall back to the wrapped record
//! - **Collections**: present whole sequences or a single page, and re-present presented values
//! - **Configuration-Based**: override visibility and casing from YAML
//! - **HTTP Ready**: presented values are axum responses (feature `http`)
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use present::prelude::*;
//!
//! #[derive(Serialize)]
//! struct User {
//!     id: u64,
//!     name: String,
//!     email: String,
//! }
//!
//! define_presenter! {
//!     pub struct UserProfilePresenter for User => |presenter| presenter
//!         .computed("full_name", |user| format!("Mx. {}", user.name))
//!         .hidden(["email"])
//! }
//!
//! impl_record!(User, default = UserProfilePresenter);
//!
//! let user = User { id: 1, name: "David Hemphill".into(), email: "d@x.com".into() };
//! let presenter = user.present()?;
//!
//! assert_eq!(
//!     presenter.to_json()?,
//!     r#"{"id":1,"name":"David Hemphill","full_name":"Mx. David Hemphill"}"#
//! );
//! ```

pub mod config;
pub mod core;
#[cfg(feature = "http")]
pub mod http;
pub mod records;

#[doc(hidden)]
pub mod __private {
    pub use serde_json;
}

/// Re-exports of commonly used types and traits
pub mod prelude {
    // === Core Traits ===
    pub use crate::core::{
        casing::Casing,
        collection::{Page, PaginationMeta, present_all},
        definition::{PresenterDefinition, PresenterDefinitionBuilder},
        error::{PresenterError, WriteOperation},
        factory::{Presentable, Presentation, Transformed, Using, present, try_present},
        presenter::{Presenter, PresenterKind},
        record::{Attributes, Record},
    };

    // === Macros ===
    pub use crate::{attributes, define_presenter, impl_record};

    // === Records ===
    pub use crate::records::SerdeRecord;

    // === Config ===
    pub use crate::config::{PresentationConfig, PresenterOverrides};

    // === HTTP ===
    #[cfg(feature = "http")]
    pub use crate::http::json_collection;

    // === External dependencies ===
    pub use serde::{Deserialize, Serialize};
    pub use serde_json::{Value, json};
}
