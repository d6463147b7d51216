//! Core module containing the record abstraction, presenters and serialization

pub mod casing;
pub mod collection;
pub mod definition;
pub mod error;
pub mod factory;
pub mod presenter;
pub mod record;

pub use casing::Casing;
pub use collection::{Page, PaginationMeta, present_all};
pub use definition::{PresenterDefinition, PresenterDefinitionBuilder};
pub use error::{PresenterError, Result, WriteOperation};
pub use factory::{Presentable, Presentation, Transformed, Using, present, try_present};
pub use presenter::{Presenter, PresenterKind};
pub use record::{Attributes, Record};
