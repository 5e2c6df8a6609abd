//! Error handling for the gateway
//!
//! One error enum for the whole crate plus its HTTP mapping. Handlers return
//! `GatewayError` and actix renders the wire body through `ResponseError`.

pub mod helpers;
pub mod response;
pub mod types;

pub use response::ErrorBody;
pub use types::{GatewayError, Result};
