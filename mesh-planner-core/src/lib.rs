//! Core algorithms for traversability-aware path planning over triangular
//! surface meshes: mesh-to-graph construction, the graph preparation
//! pipeline, the multi-metric edge-weight engine, and a multi-source
//! Dijkstra search whose relaxation may consult one hop of predecessor
//! context.
//!
//! This crate is pure computation: no file I/O, no logging configuration, no
//! process-level concerns. Those live in the `mesh-planner` binary crate.

pub mod config;
pub mod error;
pub mod facade;
pub mod geometry;
pub mod model;
pub mod prepare;
pub mod search;
pub mod stats;
pub mod weight;

pub use error::PlannerError;
