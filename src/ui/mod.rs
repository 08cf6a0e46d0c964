//! Configuration front end: serde choice types, their builders, the prompt
//! wizard and JSON config loading.

pub mod cli;
pub mod config;
pub mod types;
