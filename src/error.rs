//! Service error type
//!
//! Every mutation returns a typed error that the HTTP layer maps to a
//! status code and a JSON body. Nothing in the domain reports failures any
//! other way.

use crate::domain::aggregates::cart::CartError;
use crate::domain::aggregates::order::OrderError;
use crate::domain::aggregates::product::ProductError;
use crate::storage::StorageError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("validation failed")]
    Validation(#[from] validator::ValidationErrors),

    #[error("product not found")]
    ProductNotFound,

    #[error("order not found")]
    OrderNotFound,

    #[error("custom request not found")]
    CustomRequestNotFound,

    #[error("invalid credentials")]
    InvalidCredentials,

    #[error("admin access required")]
    AdminRequired,

    #[error(transparent)]
    Cart(#[from] CartError),

    #[error(transparent)]
    Order(#[from] OrderError),

    #[error(transparent)]
    Product(#[from] ProductError),

    #[error("checkout step is incomplete")]
    IncompleteStep,

    #[error("wizard step is incomplete")]
    IncompleteWizardStep,

    #[error(transparent)]
    Storage(#[from] StorageError),
}

pub type Result<T> = std::result::Result<T, StoreError>;

impl IntoResponse for StoreError {
    fn into_response(self) -> Response {
        let status = match &self {
            StoreError::Validation(_) => StatusCode::BAD_REQUEST,
            StoreError::ProductNotFound
            | StoreError::OrderNotFound
            | StoreError::CustomRequestNotFound => StatusCode::NOT_FOUND,
            StoreError::InvalidCredentials => StatusCode::UNAUTHORIZED,
            StoreError::AdminRequired => StatusCode::FORBIDDEN,
            StoreError::Cart(_)
            | StoreError::Product(_)
            | StoreError::IncompleteStep
            | StoreError::IncompleteWizardStep => StatusCode::UNPROCESSABLE_ENTITY,
            // An invalid lifecycle transition is a conflict with the order's
            // current state, not a malformed request.
            StoreError::Order(_) => StatusCode::CONFLICT,
            StoreError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        if status == StatusCode::INTERNAL_SERVER_ERROR {
            tracing::error!(error = %self, "internal error");
        }
        if let StoreError::Validation(errors) = &self {
            let body = Json(json!({
                "error": "one or more fields are invalid",
                "details": errors.field_errors().keys().collect::<Vec<_>>(),
            }));
            return (status, body).into_response();
        }
        let body = Json(json!({ "error": self.to_string() }));
        (status, body).into_response()
    }
}
