//! Storage module for uploaded ad images
//!
//! Writes image payloads to a local media directory and hands back the URL
//! path they are served under.

mod media_store;

pub use media_store::MediaStore;
