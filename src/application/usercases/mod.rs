pub mod dashboard;
pub mod inscriptions;
pub mod offers;

use axum::http::StatusCode;
use thiserror::Error;

use crate::domain::services::subscription_lifecycle::LifecycleError;

#[derive(Debug, Error)]
pub enum UseCaseError {
    #[error(transparent)]
    Lifecycle(#[from] LifecycleError),
    #[error("inscription not found")]
    InscriptionNotFound,
    #[error("offer not found")]
    OfferNotFound,
    #[error("the selected offer belongs to another category")]
    OfferCategoryMismatch,
    #[error(transparent)]
    Storage(#[from] anyhow::Error),
}

impl UseCaseError {
    pub fn validation(message: impl Into<String>) -> Self {
        UseCaseError::Lifecycle(LifecycleError::Validation(message.into()))
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            UseCaseError::Lifecycle(_) | UseCaseError::OfferCategoryMismatch => {
                StatusCode::BAD_REQUEST
            }
            UseCaseError::InscriptionNotFound | UseCaseError::OfferNotFound => {
                StatusCode::NOT_FOUND
            }
            UseCaseError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

pub type UseCaseResult<T> = std::result::Result<T, UseCaseError>;
