//! Response envelope types

pub mod response;

pub use response::{success_codes, ApiResponse};
