#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Calculator SDK
//!
//! Everything needed to talk to the calculator service:
//! - Wire models (`CalculationRequest`, `CalculationResponse`, `HealthResponse`)
//! - API trait (`CalculatorClientV1`) and error type (`CalculatorError`)
//! - HTTP client (`HttpCalculatorClient`) gated behind a health probe
//! - Interactive command parsing and loop (`Command`, `run_repl`)
//!
//! ## Usage
//!
//! ```ignore
//! use calculator_sdk::{ClientConfig, HttpCalculatorClient, CalculatorClientV1, Operation};
//!
//! // Fails with `CalculatorError::Unavailable` if the health probe does not pass
//! let client = HttpCalculatorClient::connect(ClientConfig::default()).await?;
//! let sum = client.calculate(Operation::Add, 5, 3).await?;
//! ```

#![forbid(unsafe_code)]
#![deny(rust_2018_idioms)]

// === API TRAIT AND TYPES ===
mod api;
mod errors;
mod models;
pub use api::CalculatorClientV1;
pub use errors::{CalculatorError, Operand};
pub use models::{
    CALCULATE_PATH, CalculationRequest, CalculationResponse, HEALTH_PATH, HealthResponse,
    Operation, UnknownOperation,
};

// === HTTP CLIENT ===
mod client;
mod config;
pub use client::HttpCalculatorClient;
pub use config::ClientConfig;

// === INTERACTIVE LOOP ===
mod command;
mod repl;
pub use command::Command;
pub use repl::{ReplOptions, run_repl};
