//! In-process `TodoService` backed by an ordered map.
//!
//! # Design
//! Mirrors what a SQL table with an auto-increment key would do: ids are
//! handed out monotonically and never reused, pages are read newest first,
//! and updates or deletes of unknown ids report `NotFound`. The whole map
//! sits behind one tokio `RwLock`, so reads run concurrently and writes are
//! serialized.

use std::collections::BTreeMap;

use chrono::Utc;
use tokio::sync::RwLock;
use todo_core::{ServiceError, Todo, TodoService};

/// Page size used when a read asks for zero (or fewer) items.
pub const DEFAULT_PAGE_SIZE: usize = 5;

#[derive(Debug, Default)]
struct Table {
    last_id: i64,
    rows: BTreeMap<i64, Todo>,
}

#[derive(Debug, Default)]
pub struct MemoryStore {
    table: RwLock<Table>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.table.read().await.rows.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

fn require_subject(subject: &str) -> Result<(), ServiceError> {
    if subject.is_empty() {
        return Err(ServiceError::InvalidInput("subject must not be empty".to_string()));
    }
    Ok(())
}

impl TodoService for MemoryStore {
    async fn create_todo(&self, subject: &str, description: &str) -> Result<Todo, ServiceError> {
        require_subject(subject)?;

        let mut table = self.table.write().await;
        let id = table
            .last_id
            .checked_add(1)
            .ok_or_else(|| ServiceError::Storage("id space exhausted".to_string()))?;
        let now = Utc::now();
        let todo = Todo {
            id,
            subject: subject.to_string(),
            description: description.to_string(),
            created_at: now,
            updated_at: now,
        };
        table.last_id = id;
        table.rows.insert(id, todo.clone());

        tracing::debug!(id, "inserted todo");
        Ok(todo)
    }

    async fn read_todos(&self, prev_id: i64, size: i64) -> Result<Vec<Todo>, ServiceError> {
        let limit = usize::try_from(size)
            .ok()
            .filter(|&n| n > 0)
            .unwrap_or(DEFAULT_PAGE_SIZE);

        let table = self.table.read().await;
        let page: Vec<Todo> = if prev_id == 0 {
            table.rows.values().rev().take(limit).cloned().collect()
        } else {
            table
                .rows
                .range(..prev_id)
                .rev()
                .take(limit)
                .map(|(_, todo)| todo.clone())
                .collect()
        };
        Ok(page)
    }

    async fn update_todo(
        &self,
        id: i64,
        subject: &str,
        description: &str,
    ) -> Result<Todo, ServiceError> {
        require_subject(subject)?;

        let mut table = self.table.write().await;
        let todo = table
            .rows
            .get_mut(&id)
            .ok_or_else(|| ServiceError::not_found(id))?;
        todo.subject = subject.to_string();
        todo.description = description.to_string();
        todo.updated_at = Utc::now().max(todo.updated_at);

        tracing::debug!(id, "updated todo");
        Ok(todo.clone())
    }

    async fn delete_todos(&self, ids: &[i64]) -> Result<(), ServiceError> {
        if ids.is_empty() {
            return Ok(());
        }

        let mut table = self.table.write().await;
        let removed = ids
            .iter()
            .filter(|&&id| table.rows.remove(&id).is_some())
            .count();
        if removed == 0 {
            return Err(ServiceError::NotFound { ids: ids.to_vec() });
        }

        tracing::debug!(removed, "deleted todos");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn seeded(n: usize) -> MemoryStore {
        let store = MemoryStore::new();
        for i in 1..=n {
            store.create_todo(&format!("task {i}"), "").await.unwrap();
        }
        store
    }

    fn ids(todos: &[Todo]) -> Vec<i64> {
        todos.iter().map(|t| t.id).collect()
    }

    #[tokio::test]
    async fn create_assigns_sequential_ids_and_timestamps() {
        let store = MemoryStore::new();
        let first = store.create_todo("Buy milk", "2 liters").await.unwrap();
        let second = store.create_todo("Walk dog", "").await.unwrap();

        assert_eq!(first.id, 1);
        assert_eq!(second.id, 2);
        assert_eq!(first.subject, "Buy milk");
        assert_eq!(first.description, "2 liters");
        assert_eq!(first.created_at, first.updated_at);
    }

    #[tokio::test]
    async fn create_rejects_empty_subject() {
        let store = MemoryStore::new();
        let err = store.create_todo("", "nothing").await.unwrap_err();
        assert!(matches!(err, ServiceError::InvalidInput(_)));
        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn ids_are_not_reused_after_delete() {
        let store = seeded(2).await;
        store.delete_todos(&[2]).await.unwrap();
        let next = store.create_todo("again", "").await.unwrap();
        assert_eq!(next.id, 3);
    }

    #[tokio::test]
    async fn read_first_page_is_newest_first() {
        let store = seeded(7).await;
        let page = store.read_todos(0, 3).await.unwrap();
        assert_eq!(ids(&page), vec![7, 6, 5]);
    }

    #[tokio::test]
    async fn read_after_cursor_returns_older_items() {
        let store = seeded(7).await;
        let page = store.read_todos(5, 3).await.unwrap();
        assert_eq!(ids(&page), vec![4, 3, 2]);

        let tail = store.read_todos(2, 3).await.unwrap();
        assert_eq!(ids(&tail), vec![1]);
    }

    #[tokio::test]
    async fn read_zero_size_uses_default_page() {
        let store = seeded(8).await;
        let page = store.read_todos(0, 0).await.unwrap();
        assert_eq!(page.len(), DEFAULT_PAGE_SIZE);
        assert_eq!(page[0].id, 8);
    }

    #[tokio::test]
    async fn update_replaces_fields_and_keeps_created_at() {
        let store = seeded(1).await;
        let before = store.read_todos(0, 1).await.unwrap().remove(0);

        let after = store.update_todo(1, "renamed", "details").await.unwrap();
        assert_eq!(after.subject, "renamed");
        assert_eq!(after.description, "details");
        assert_eq!(after.created_at, before.created_at);
        assert!(after.updated_at >= before.updated_at);
    }

    #[tokio::test]
    async fn update_unknown_id_is_not_found() {
        let store = seeded(1).await;
        let err = store.update_todo(999, "x", "").await.unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn delete_removes_existing_ids() {
        let store = seeded(3).await;
        store.delete_todos(&[1, 3, 42]).await.unwrap();
        assert_eq!(ids(&store.read_todos(0, 10).await.unwrap()), vec![2]);
    }

    #[tokio::test]
    async fn delete_of_only_unknown_ids_is_not_found() {
        let store = seeded(1).await;
        let err = store.delete_todos(&[5, 6]).await.unwrap_err();
        assert!(err.is_not_found());
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn delete_with_no_ids_is_a_no_op() {
        let store = seeded(2).await;
        store.delete_todos(&[]).await.unwrap();
        assert_eq!(store.len().await, 2);
    }
}
