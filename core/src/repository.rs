//! Storage seam for the to-do list.
//!
//! # Design
//! The trait is deliberately narrow so `TodoListService` stays storage
//! agnostic: the server plugs in SQLite, tests use `InMemoryTodoRepo`.
//! Methods that target a single id report whether a row was touched
//! instead of failing on a missing row.

use crate::error::StoreError;
use crate::types::{DateRange, TodoId, TodoItem};

/// Field values of an item that has not been stored yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTodoItem {
    pub title: String,
    pub description: Option<String>,
    pub range: DateRange,
    pub sort_order: i64,
}

pub trait TodoRepository {
    /// All items, ascending by `sort_order`, ties broken by id.
    fn list_ordered(&self) -> Result<Vec<TodoItem>, StoreError>;

    fn find_by_id(&self, id: TodoId) -> Result<Option<TodoItem>, StoreError>;

    /// Store a new item; the repository assigns the id.
    fn insert(&mut self, item: NewTodoItem) -> Result<TodoItem, StoreError>;

    /// Overwrite title, description and range of an existing item.
    /// `sort_order` is left as stored. Returns `false` if the id is unknown.
    fn update(&mut self, item: &TodoItem) -> Result<bool, StoreError>;

    /// Returns `false` if the id is unknown.
    fn delete(&mut self, id: TodoId) -> Result<bool, StoreError>;

    fn max_sort_order(&self) -> Result<Option<i64>, StoreError>;

    /// Set `sort_order` for every listed id that exists; unknown ids are
    /// skipped. Returns the number of items updated.
    fn apply_sort_orders(&mut self, orders: &[(TodoId, i64)]) -> Result<usize, StoreError>;
}

impl<R: TodoRepository + ?Sized> TodoRepository for Box<R> {
    fn list_ordered(&self) -> Result<Vec<TodoItem>, StoreError> {
        (**self).list_ordered()
    }

    fn find_by_id(&self, id: TodoId) -> Result<Option<TodoItem>, StoreError> {
        (**self).find_by_id(id)
    }

    fn insert(&mut self, item: NewTodoItem) -> Result<TodoItem, StoreError> {
        (**self).insert(item)
    }

    fn update(&mut self, item: &TodoItem) -> Result<bool, StoreError> {
        (**self).update(item)
    }

    fn delete(&mut self, id: TodoId) -> Result<bool, StoreError> {
        (**self).delete(id)
    }

    fn max_sort_order(&self) -> Result<Option<i64>, StoreError> {
        (**self).max_sort_order()
    }

    fn apply_sort_orders(&mut self, orders: &[(TodoId, i64)]) -> Result<usize, StoreError> {
        (**self).apply_sort_orders(orders)
    }
}
