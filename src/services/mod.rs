pub use errors::{ServiceError, ServiceResult};

pub mod errors;
pub mod in_flight;
pub mod products;
