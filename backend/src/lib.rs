//! # Timetable Export
//!
//! Presentation and CSV export core for generated timetables.
//!
//! A solver backend produces one grid per audience (student groups,
//! instructors, lab rooms). This crate turns that raw mapping into something
//! a person can browse and download:
//!
//! - **Naming**: display names derived from table ids
//! - **Categorization**: partition of the table ids into audience tabs
//! - **Ordering**: Monday-to-Friday day order, whatever the arrival order
//! - **Classification**: free, break, lab, lecture and other cells
//! - **CSV export**: one table at once or a whole category, spaced out in time
//! - **HTTP API**: a small axum server over the same core
//!
//! ## Architecture
//!
//! - [`api`]: identifiers, categories and render-model types
//! - [`models`]: the raw dataset, the generation response, checksums
//! - [`services`]: pure transformations and the dataset session
//! - [`export`]: CSV serialization, artifact sinks and the batch exporter
//! - [`config`]: `timetable.toml` and environment settings
//! - [`http`]: Axum-based HTTP server and request handlers

pub mod api;
pub mod config;
pub mod error;
pub mod export;
pub mod models;
pub mod services;

#[cfg(feature = "http-server")]
pub mod http;

pub use error::{TimetableError, TimetableResult};
