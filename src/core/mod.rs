//! Core infrastructure shared by the library and the CLI
//!
//! Terminal output and configuration loading.

pub mod config;
pub mod output;
