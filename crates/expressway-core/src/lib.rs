//! Expressway Core - Domain models, ports, and configuration
//!
//! This crate contains the feature model shared by the editor, the flat-file
//! store, the HTTP server and the CLI, together with the port traits the editor
//! talks to (store, map display, status channel).

pub mod config;
pub mod error;
pub mod models;
pub mod ports;

pub use error::{ExpresswayError, Result};
