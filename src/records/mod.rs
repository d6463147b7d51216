//! Ready-made records and the declaration macros
//!
//! Most structs become records through [`impl_record!`](crate::impl_record).
//! [`SerdeRecord`] wraps a serializable value that cannot take an impl, such
//! as a type from another crate.

pub mod macros;

use crate::core::record::{Attributes, Record, serialize_attributes};
use serde::{Deserialize, Serialize};
use std::ops::Deref;

/// A serializable value exposed as a record through its serde representation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SerdeRecord<T>(pub T);

impl<T> SerdeRecord<T> {
    /// Unwrap the inner value
    pub fn into_inner(self) -> T {
        self.0
    }
}

impl<T> Deref for SerdeRecord<T> {
    type Target = T;

    fn deref(&self) -> &T {
        &self.0
    }
}

impl<T: Serialize> Record for SerdeRecord<T> {
    fn attributes(&self) -> Attributes {
        serialize_attributes(&self.0)
    }
}
