//! # Blog Shared
//!
//! Request and response types of the blog HTTP API.

pub mod dto;
pub mod response;

pub use response::{ErrorResponse, HealthResponse, MessageResponse};
