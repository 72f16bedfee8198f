//! Modules layer - Infrastructure components for external integrations
//!
//! Contains adapters for things that live outside the database, currently
//! only local media storage.

pub mod storage;
