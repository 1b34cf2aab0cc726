//! API Module
//!
//! HTTP handlers and routing exposing the cache to out-of-process callers.
//!
//! # Endpoints
//! - `PUT /entries/:key` - Store the request body under a key
//! - `GET /entries/:key` - Retrieve the payload for a key
//! - `GET /stats` - Get cache statistics
//! - `GET /health` - Health check endpoint

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;
