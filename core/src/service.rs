//! All state transitions of the ordered to-do list.
//!
//! # Design
//! `TodoListService` is a thin layer over a `TodoRepository`. It owns the
//! list rules (title required, append on create, position = index on
//! reorder) and nothing else; storage, locking and transport belong to the
//! caller.

use tracing::debug;

use crate::error::{ServiceError, ValidationError};
use crate::repository::{NewTodoItem, TodoRepository};
use crate::types::{TodoDraft, TodoId, TodoItem};

#[derive(Debug)]
pub struct TodoListService<R> {
    repo: R,
}

impl<R: TodoRepository> TodoListService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    pub fn list_ordered(&self) -> Result<Vec<TodoItem>, ServiceError> {
        Ok(self.repo.list_ordered()?)
    }

    pub fn find(&self, id: TodoId) -> Result<Option<TodoItem>, ServiceError> {
        Ok(self.repo.find_by_id(id)?)
    }

    /// Create or update keyed by `draft.id`.
    ///
    /// An absent or unknown id creates a new item appended after the current
    /// last position. A known id overwrites title, description and range;
    /// its position is kept.
    pub fn upsert(&mut self, draft: TodoDraft) -> Result<TodoItem, ServiceError> {
        let title = draft.title.trim();
        if title.is_empty() {
            return Err(ValidationError::required("title").into());
        }

        if let Some(mut existing) = self.lookup(draft.id)? {
            existing.title = title.to_string();
            existing.description = draft.description.clone();
            existing.from = draft.range.from;
            existing.to = draft.range.to;
            if self.repo.update(&existing)? {
                return Ok(existing);
            }
            // Deleted between lookup and update: fall through to create.
        }

        let sort_order = self.repo.max_sort_order()?.map_or(0, |max| max + 1);
        let created = self.repo.insert(NewTodoItem {
            title: title.to_string(),
            description: draft.description,
            range: draft.range,
            sort_order,
        })?;
        debug!(id = created.id, sort_order, "todo item created");
        Ok(created)
    }

    /// Remove an item. Unknown ids are a no-op; the flag says whether
    /// anything was removed.
    pub fn complete(&mut self, id: TodoId) -> Result<bool, ServiceError> {
        let removed = self.repo.delete(id)?;
        if !removed {
            debug!(id, "complete ignored unknown item");
        }
        Ok(removed)
    }

    /// Give each listed id its index as `sort_order`. Unknown ids are
    /// skipped but still occupy their index. Returns how many items moved.
    pub fn reorder(&mut self, ordered_ids: &[TodoId]) -> Result<usize, ServiceError> {
        let positions: Vec<(TodoId, i64)> = ordered_ids
            .iter()
            .enumerate()
            .map(|(position, id)| (*id, position as i64))
            .collect();
        self.apply_positions(&positions)
    }

    /// Set `sort_order` from explicit `(id, position)` pairs, skipping
    /// unknown ids.
    pub fn apply_positions(&mut self, positions: &[(TodoId, i64)]) -> Result<usize, ServiceError> {
        let updated = self.repo.apply_sort_orders(positions)?;
        if updated < positions.len() {
            debug!(
                requested = positions.len(),
                updated, "reorder skipped unknown items"
            );
        }
        Ok(updated)
    }

    fn lookup(&self, id: Option<TodoId>) -> Result<Option<TodoItem>, ServiceError> {
        match id {
            Some(id) => Ok(self.repo.find_by_id(id)?),
            None => Ok(None),
        }
    }
}
