//! Modules layer - Infrastructure components for external integrations
//!
//! Contains adapters for external services like file storage.

pub mod storage;
