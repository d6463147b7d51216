//! JSON responses for presented output
//!
//! Presenters, transformed values, presentations and pages can be returned
//! straight from axum handlers.
//!
//! ```rust,ignore
//! async fn list_users(State(state): State<AppState>) -> Response {
//!     let users = state.users.read().await;
//!     present_all(users.iter(), Using::presenter::<UserProfilePresenter>()).into_response()
//! }
//! ```

use crate::core::collection::Page;
use crate::core::factory::{Presentation, Transformed};
use crate::core::presenter::Presenter;
use crate::core::record::Record;
use axum::Json;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

impl<R: Record> IntoResponse for Presenter<'_, R> {
    fn into_response(self) -> Response {
        Json(self.to_array()).into_response()
    }
}

impl IntoResponse for Transformed {
    fn into_response(self) -> Response {
        Json(self).into_response()
    }
}

impl<R: Record> IntoResponse for Presentation<'_, R> {
    fn into_response(self) -> Response {
        Json(self.to_array()).into_response()
    }
}

impl<T: Serialize> IntoResponse for Page<T> {
    fn into_response(self) -> Response {
        Json(self).into_response()
    }
}

/// Respond with a presented sequence as a JSON array
pub fn json_collection<T: Serialize>(items: Vec<T>) -> Response {
    Json(items).into_response()
}
