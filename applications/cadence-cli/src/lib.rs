//! Cadence CLI Library
//!
//! Terminal host for the Cadence playback controller: configuration, a
//! rodio-backed engine, and the interactive command session.
//!
//! This library exposes the host components for testing purposes.

pub mod commands;
pub mod config;
pub mod engine;
pub mod error;
pub mod listener;
pub mod session;
pub mod tracks;

// Re-export commonly used types for convenience
pub use commands::Command;
pub use config::AppConfig;
pub use error::{CliError, EngineError, Result};
pub use listener::ChannelListener;
pub use session::{Input, Reply, Session};
