#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Calculator Module
//!
//! Integer calculator served over HTTP+JSON.
//!
//! ## Architecture
//!
//! - `domain/engine.rs` - Arithmetic engine (pure integer operations)
//! - `domain/service.rs` - Operation dispatcher (validation + engine calls)
//! - `api/rest/` - `POST /calculate` and `GET /health` handlers and router
//! - `server/` - Listener, connection loop, signal-driven graceful shutdown
//! - `config.rs` - Layered server configuration
//! - `domain/local_client.rs` - In-process `CalculatorClientV1`
//!
//! Remote consumers should use the `calculator-sdk` crate.

#![forbid(unsafe_code)]

// === CONFIGURATION ===
pub mod config;
mod humantime_serde;
pub use config::{ConfigError, ServerConfig, ServerOverrides};

// === DOMAIN ===
pub mod domain;
pub use domain::local_client::LocalCalculatorClient;
pub use domain::{Calculator, DomainError, Service};

// === TRANSPORT ===
pub mod api;
pub mod server;
pub use server::{Server, ServerError, run};
