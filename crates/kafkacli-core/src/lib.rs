//! kafkacli Core Library
//!
//! This crate provides the core functionality behind the kafkacli tools:
//! - REST clients for Kafka Connect and Confluent Schema Registry
//! - Connector matching by name pattern or runtime state
//! - Bulk operations across matched connectors
//! - Task scaling and forced schema registration
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌─────────────┐
//! │    List     │────▶│   Matcher   │────▶│    Bulk     │
//! │ (REST call) │     │ (name/state)│     │  Operator   │
//! └─────────────┘     └─────────────┘     └─────────────┘
//! ```
//!
//! # Example
//!
//! ```rust,ignore
//! use kafkacli_core::{BulkOp, ConnectClient, Endpoint, ErrorPolicy, Matcher, bulk};
//!
//! let client = ConnectClient::new(&Endpoint::new("localhost", 8083))?;
//! let names = Matcher::name("^orders-.*")?.find_matching(&client).await?;
//! let report = bulk::for_each_match(&client, &names, BulkOp::Pause, ErrorPolicy::ContinueOnError).await;
//! for (name, err) in report.failures() {
//!     eprintln!("{name}: {err}");
//! }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod bulk;
pub mod config;
pub mod connect;
pub mod error;
mod http;
pub mod matcher;
pub mod registry;
pub mod scale;

#[cfg(test)]
pub(crate) mod testing;

pub use bulk::{BatchEntry, BatchResult, BulkOp, ErrorPolicy, OpOutput};
pub use config::{Endpoint, Service};
pub use connect::{ConnectApi, ConnectClient};
pub use error::{Error, Result};
pub use matcher::Matcher;
pub use registry::{RegistryApi, RegistryClient};
