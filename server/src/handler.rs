//! Operation handlers for the todo resource.
//!
//! # Design
//! Each operation has a typed method (`create`, `read`, `update`, `delete`)
//! that only delegates to the service, and the HTTP-facing operations
//! (`handle_create`, `handle_update`) wrap them with the linear flow
//! decode → validate → delegate → map error → encode. Validation failures
//! return before the service is touched.

use std::sync::Arc;

use axum::{
    http::header,
    response::{IntoResponse, Response},
};
use serde::{de::DeserializeOwned, Serialize};
use todo_core::{
    CreateTodoRequest, CreateTodoResponse, DeleteTodoRequest, DeleteTodoResponse, ReadTodoRequest,
    ReadTodoResponse, ServiceError, TodoService, UpdateTodoRequest, UpdateTodoResponse,
};

use crate::error::{ApiError, Operation};

/// Holds the injected service. Cloning is cheap and shares the service.
pub struct TodoHandler<S> {
    svc: Arc<S>,
}

impl<S> Clone for TodoHandler<S> {
    fn clone(&self) -> Self {
        Self {
            svc: Arc::clone(&self.svc),
        }
    }
}

impl<S: TodoService> TodoHandler<S> {
    pub fn new(svc: Arc<S>) -> Self {
        Self { svc }
    }

    pub async fn create(&self, req: &CreateTodoRequest) -> Result<CreateTodoResponse, ServiceError> {
        let todo = self.svc.create_todo(&req.subject, &req.description).await?;
        Ok(CreateTodoResponse { todo })
    }

    pub async fn read(&self, req: &ReadTodoRequest) -> Result<ReadTodoResponse, ServiceError> {
        let todos = self.svc.read_todos(req.prev_id, req.size).await?;
        Ok(ReadTodoResponse { todos })
    }

    pub async fn update(&self, req: &UpdateTodoRequest) -> Result<UpdateTodoResponse, ServiceError> {
        let todo = self
            .svc
            .update_todo(req.id, &req.subject, &req.description)
            .await?;
        Ok(UpdateTodoResponse { todo })
    }

    pub async fn delete(&self, req: &DeleteTodoRequest) -> Result<DeleteTodoResponse, ServiceError> {
        self.svc.delete_todos(&req.ids).await?;
        Ok(DeleteTodoResponse {})
    }

    /// POST: create a todo from a JSON body.
    pub async fn handle_create(&self, body: &[u8]) -> Result<Response, ApiError> {
        let req: CreateTodoRequest = decode(body, "CreateTodoRequest")?;
        if req.subject.is_empty() {
            tracing::warn!("rejected create request without subject");
            return Err(ApiError::BadRequest("Subject is required"));
        }

        let res = self
            .create(&req)
            .await
            .map_err(|e| ApiError::from_service(Operation::Create, e))?;

        tracing::info!(id = res.todo.id, "todo created");
        json_response(&res)
    }

    /// PUT: replace subject and description of an existing todo.
    pub async fn handle_update(&self, body: &[u8]) -> Result<Response, ApiError> {
        let req: UpdateTodoRequest = decode(body, "UpdateTodoRequest")?;
        if req.id == 0 || req.subject.is_empty() {
            tracing::warn!(id = req.id, "rejected update request with invalid id or subject");
            return Err(ApiError::BadRequest("Invalid ID or Subject"));
        }

        let res = self
            .update(&req)
            .await
            .map_err(|e| ApiError::from_service(Operation::Update, e))?;

        tracing::info!(id = res.todo.id, "todo updated");
        json_response(&res)
    }
}

fn decode<T: DeserializeOwned>(body: &[u8], kind: &'static str) -> Result<T, ApiError> {
    serde_json::from_slice(body).map_err(|e| {
        tracing::warn!(request = kind, error = %e, "failed to decode request body");
        ApiError::BadRequest("Invalid JSON")
    })
}

fn json_response(body: &impl Serialize) -> Result<Response, ApiError> {
    let bytes = serde_json::to_vec(body).map_err(|e| {
        tracing::error!(error = %e, "failed to encode response body");
        ApiError::Internal("Failed to encode JSON")
    })?;
    Ok(([(header::CONTENT_TYPE, "application/json")], bytes).into_response())
}
