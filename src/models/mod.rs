//! Response models for the cache server API
//!
//! This module defines the DTOs (Data Transfer Objects) used for
//! serializing HTTP response bodies. Payloads travel as raw bytes.

pub mod responses;

// Re-export commonly used types
pub use responses::{AddResponse, ErrorResponse, HealthResponse};
