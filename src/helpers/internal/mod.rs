//! Internal utility modules
//!
//! Shared functionality used by the acquire and build helpers. Nothing here
//! touches the network.

pub mod fs_utils;
pub mod progress;
pub mod url_utils;
