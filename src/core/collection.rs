//! Presenting sequences of records, with optional pagination

use crate::core::factory::{Presentation, Using};
use crate::core::record::Record;
use serde::Serialize;

/// Present every record of a sequence.
///
/// The output has one entry per input record, in input order. Presentations
/// are records themselves, so an already presented sequence can be presented
/// again with a second presenter.
///
/// ```rust,ignore
/// let users = present_all(&users, Using::presenter::<UserProfilePresenter>());
/// let cards = present_all(&users, card_definition);
/// ```
pub fn present_all<'a, R, I>(records: I, using: impl Into<Using<R>>) -> Vec<Presentation<'a, R>>
where
    R: Record + 'a,
    I: IntoIterator<Item = &'a R>,
{
    let using = using.into();
    records.into_iter().map(|record| using.apply(record)).collect()
}

/// A page of items with its pagination metadata
#[derive(Debug, Clone, Serialize)]
pub struct Page<T> {
    /// The items on this page
    pub data: Vec<T>,

    /// Pagination metadata
    pub pagination: PaginationMeta,
}

/// Pagination metadata
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PaginationMeta {
    /// Current page number (starts at 1)
    pub page: usize,

    /// Number of items per page
    pub limit: usize,

    /// Total number of items
    pub total: usize,

    /// Total number of pages
    pub total_pages: usize,

    /// Whether there is a next page
    pub has_next: bool,

    /// Whether there is a previous page
    pub has_prev: bool,
}

impl PaginationMeta {
    /// Create pagination metadata; `page` and `limit` are raised to at least 1
    pub fn new(page: usize, limit: usize, total: usize) -> Self {
        let page = page.max(1);
        let limit = limit.max(1);
        let total_pages = if total == 0 { 0 } else { total.div_ceil(limit) };
        let start = (page - 1).saturating_mul(limit);

        Self {
            page,
            limit,
            total,
            total_pages,
            has_next: start.saturating_add(limit) < total,
            has_prev: page > 1,
        }
    }

    /// Index of the first item on this page
    pub fn offset(&self) -> usize {
        self.page.saturating_sub(1).saturating_mul(self.limit)
    }
}

impl<'a, R> Page<&'a R> {
    /// Select one page of borrowed records
    pub fn slice(records: &'a [R], page: usize, limit: usize) -> Self {
        let pagination = PaginationMeta::new(page, limit, records.len());
        let data = records
            .iter()
            .skip(pagination.offset())
            .take(pagination.limit)
            .collect();

        Self { data, pagination }
    }
}

impl<'a, R: Record + 'a> Page<&'a R> {
    /// Present the records of this page, keeping the pagination metadata
    pub fn present(self, using: impl Into<Using<R>>) -> Page<Presentation<'a, R>> {
        Page {
            data: present_all(self.data, using),
            pagination: self.pagination,
        }
    }
}

impl<T> Page<T> {
    /// Transform every item, keeping the pagination metadata
    pub fn map<U, F>(self, f: F) -> Page<U>
    where
        F: FnMut(T) -> U,
    {
        Page {
            data: self.data.into_iter().map(f).collect(),
            pagination: self.pagination,
        }
    }

    /// Number of items on this page
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Whether this page has no items
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}
