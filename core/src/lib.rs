//! Domain types and service contract for the todo service.
//!
//! # Overview
//! Holds the `Todo` entity, one request/response pair per operation, the
//! `TodoService` trait that storage implementations provide, and the
//! `ServiceError` they return.
//!
//! # Design
//! - No HTTP or runtime dependencies; the server crate depends on this one,
//!   never the other way round.
//! - Timestamps are `chrono::DateTime<Utc>` and serialize as RFC 3339.

pub mod error;
pub mod service;
pub mod types;

pub use error::ServiceError;
pub use service::TodoService;
pub use types::{
    CreateTodoRequest, CreateTodoResponse, DeleteTodoRequest, DeleteTodoResponse, ReadTodoRequest,
    ReadTodoResponse, Todo, UpdateTodoRequest, UpdateTodoResponse,
};
