//! Port trait definitions
//!
//! These traits define the interfaces that adapters must implement.

pub mod display;
pub mod storage;

pub use display::{Layer, MapDisplay, Notifier, Severity};
pub use storage::FeatureStore;
