//! # rima-server
//!
//! axum host for the rima engine. The binary (`rima`) wires settings,
//! logging and the provider registry together; the library half exists so
//! integration tests can drive the router directly.

#![forbid(unsafe_code)]
#![warn(clippy::all)]

pub mod api;
pub mod settings;
pub mod state;

pub use api::router;
pub use state::AppState;
