//! BUILD helpers - turning downloads into a directory tree
//!
//! ## Functions
//!
//! - **extract_zip_bytes**: Extract an in-memory zip archive
//! - **extract_zip**: Extract a zip archive from any seekable reader

pub mod extract;

// Re-export commonly used items
pub use extract::extract_zip_bytes;
