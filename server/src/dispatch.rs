//! Method dispatch for the single todo resource path.

use axum::{
    body::{self, Body},
    extract::{Request, State},
    http::Method,
    response::{IntoResponse, Response},
};
use todo_core::TodoService;

use crate::error::ApiError;
use crate::handler::TodoHandler;

/// Largest request body the dispatcher will buffer.
pub const MAX_BODY_BYTES: usize = 1024 * 1024;

/// POST creates, PUT updates; anything else is 405 and the body is never
/// read.
pub async fn dispatch<S: TodoService>(
    State(handler): State<TodoHandler<S>>,
    req: Request,
) -> Response {
    let method = req.method().clone();
    let result = match method {
        Method::POST => {
            async {
                let bytes = read_body(req.into_body()).await?;
                handler.handle_create(&bytes).await
            }
            .await
        }
        Method::PUT => {
            async {
                let bytes = read_body(req.into_body()).await?;
                handler.handle_update(&bytes).await
            }
            .await
        }
        _ => {
            tracing::debug!(method = %method, "method not allowed");
            Err(ApiError::MethodNotAllowed)
        }
    };

    result.unwrap_or_else(IntoResponse::into_response)
}

async fn read_body(body: Body) -> Result<body::Bytes, ApiError> {
    body::to_bytes(body, MAX_BODY_BYTES).await.map_err(|e| {
        tracing::warn!(error = %e, "failed to read request body");
        ApiError::BadRequest("Invalid request body")
    })
}
