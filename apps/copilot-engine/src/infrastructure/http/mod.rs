//! HTTP/REST API adapter.
//!
//! Inbound adapter for OpenClaw callbacks; handlers delegate to the approval
//! workflow or the skill queue.

mod controller;
mod request;
mod response;

pub use controller::{API_PREFIX, AppState, create_router};
pub use request::*;
pub use response::*;
