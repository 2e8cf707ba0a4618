//! Binary-crate support for `mesh-planner`: CLI argument parsing, layered
//! TOML configuration, and OBJ mesh ingestion. Pure planning logic lives in
//! `mesh-planner-core`; this crate is the file-I/O and process-level shell
//! around it.

pub mod app_config;
pub mod cli;
pub mod error;
pub mod mesh_io;

pub use error::AppError;
