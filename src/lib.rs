/* src/lib.rs */

//! Support utilities for an HTTP-based Hadoop filesystem client.
//!
//! This crate provides three independent components:
//!
//! - **config**: rc file loading and alias (connection profile) resolution.
//! - **human**: fixed-width, human-readable sizes and durations.
//! - **writer**: scoped producer/consumer handoff feeding a background consumer.
//!
//! ## Feature Flags
//!
//! - `full`: Enables all features.
//! - `config`: Enables the `config` module.
//! - `serde`: Typed alias deserialization (`Config::get_alias_as`).
//! - `human`: Enables the `human` module.
//! - `writer`: Enables the `writer` module with the thread-backed `AsyncWriter`.
//! - `stream`: Adds the tokio-backed `StreamWriter`.
//! - `logging`: Emits `log` records from the config loader and `AsyncWriter`.
//!
//! ## Basic Usage
//!
//! See `demos/basic.rs` for a complete example.

#[cfg(feature = "config")]
pub mod config;

#[cfg(feature = "human")]
pub mod human;

#[cfg(feature = "writer")]
pub mod writer;

#[cfg(any(feature = "config", feature = "writer"))]
mod error;

#[cfg(any(feature = "config", feature = "writer"))]
pub use error::Error;

#[cfg(feature = "config")]
pub use config::{Config, ConfigError, parse_boolean};

#[cfg(feature = "human")]
pub use human::{format_duration, format_size};

#[cfg(feature = "writer")]
pub use writer::{AsyncWriter, WriterError};
