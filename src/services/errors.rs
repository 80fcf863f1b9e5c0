use thiserror::Error;

use crate::gateway::GatewayError;

pub type ServiceResult<T> = Result<T, ServiceError>;

/// Errors surfaced by the service layer to the routes.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("{0}")]
    Form(String),
    #[error("analysis failed: {0}")]
    Analysis(#[from] GatewayError),
    #[error("an analysis for this product is already running")]
    Busy,
    #[error("not found")]
    NotFound,
}
