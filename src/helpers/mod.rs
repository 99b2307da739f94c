//! Helper functions behind the fetch operations
//!
//! The engine composes these; each helper takes explicit inputs and returns
//! explicit outputs.
//!
//! ## Categories
//!
//! - **acquire**: GitHub API requests, streaming downloads
//! - **build**: zip extraction
//! - **internal**: URL parsing, directory scans, progress clamping

pub mod acquire;
pub mod build;
pub mod internal;
