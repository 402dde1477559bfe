use std::collections::BTreeMap;

use crate::error::StoreError;
use crate::repository::{NewTodoItem, TodoRepository};
use crate::types::{TodoId, TodoItem};

/// Process-local repository keyed by id. Ids start at 1 and are never reused.
#[derive(Debug, Default)]
pub struct InMemoryTodoRepo {
    items: BTreeMap<TodoId, TodoItem>,
    last_id: TodoId,
}

impl TodoRepository for InMemoryTodoRepo {
    fn list_ordered(&self) -> Result<Vec<TodoItem>, StoreError> {
        let mut items: Vec<TodoItem> = self.items.values().cloned().collect();
        // BTreeMap iteration is by id, so a stable sort keeps id as tie-breaker.
        items.sort_by_key(|item| item.sort_order);
        Ok(items)
    }

    fn find_by_id(&self, id: TodoId) -> Result<Option<TodoItem>, StoreError> {
        Ok(self.items.get(&id).cloned())
    }

    fn insert(&mut self, item: NewTodoItem) -> Result<TodoItem, StoreError> {
        self.last_id += 1;
        let stored = TodoItem {
            id: self.last_id,
            title: item.title,
            description: item.description,
            from: item.range.from,
            to: item.range.to,
            sort_order: item.sort_order,
        };
        self.items.insert(stored.id, stored.clone());
        Ok(stored)
    }

    fn update(&mut self, item: &TodoItem) -> Result<bool, StoreError> {
        let Some(existing) = self.items.get_mut(&item.id) else {
            return Ok(false);
        };
        existing.title = item.title.clone();
        existing.description = item.description.clone();
        existing.from = item.from;
        existing.to = item.to;
        Ok(true)
    }

    fn delete(&mut self, id: TodoId) -> Result<bool, StoreError> {
        Ok(self.items.remove(&id).is_some())
    }

    fn max_sort_order(&self) -> Result<Option<i64>, StoreError> {
        Ok(self.items.values().map(|item| item.sort_order).max())
    }

    fn apply_sort_orders(&mut self, orders: &[(TodoId, i64)]) -> Result<usize, StoreError> {
        let mut updated = 0;
        for (id, sort_order) in orders {
            if let Some(item) = self.items.get_mut(id) {
                item.sort_order = *sort_order;
                updated += 1;
            }
        }
        Ok(updated)
    }
}
