//! ACQUIRE helpers - getting bytes off the network
//!
//! ## Functions
//!
//! - **repository_metadata / latest_release**: Query the GitHub REST API
//! - **Download**: Stream a response body to a file or into memory

pub mod download;
pub mod http;

// Re-export commonly used items
pub use download::Download;
