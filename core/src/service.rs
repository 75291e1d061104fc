//! The storage-backed service contract consumed by the HTTP layer.

use std::future::Future;

use crate::error::ServiceError;
use crate::types::Todo;

/// Persistence and consistency for todo items.
///
/// Implementations own their own concurrency control; the handler only
/// holds a shared reference. Dropping a returned future cancels the
/// operation, so implementations should not spawn work that outlives it.
pub trait TodoService: Send + Sync + 'static {
    /// Persist a new todo, assigning its id and both timestamps.
    fn create_todo(
        &self,
        subject: &str,
        description: &str,
    ) -> impl Future<Output = Result<Todo, ServiceError>> + Send;

    /// Return up to `size` todos older than `prev_id`, newest first.
    fn read_todos(
        &self,
        prev_id: i64,
        size: i64,
    ) -> impl Future<Output = Result<Vec<Todo>, ServiceError>> + Send;

    /// Replace subject and description. Fails with `ServiceError::NotFound`
    /// when `id` does not exist.
    fn update_todo(
        &self,
        id: i64,
        subject: &str,
        description: &str,
    ) -> impl Future<Output = Result<Todo, ServiceError>> + Send;

    fn delete_todos(&self, ids: &[i64]) -> impl Future<Output = Result<(), ServiceError>> + Send;
}
