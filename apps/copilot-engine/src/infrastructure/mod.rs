//! Infrastructure Layer
//!
//! Adapters around the application layer:
//!
//! - **Driven Adapters (Outbound)**
//!   - `persistence/`: process-lifetime task registry and skill queue
//!
//! - **Driver Adapters (Inbound)**
//!   - `http/`: OpenClaw callback API

pub mod http;
pub mod persistence;
