//! HTTP server module for the timetable core.
//!
//! This module provides an axum-based HTTP server standing in for the browser
//! client: it accepts generation results, serves render models and CSV
//! downloads, and runs batch exports in the background.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │  HTTP Layer (axum handlers)                               │
//! │  - Request parsing and validation                         │
//! │  - JSON serialization/deserialization                     │
//! │  - CORS, compression, error handling                      │
//! └───────────────────┬──────────────────────────────────────┘
//!                     │
//! ┌───────────────────▼──────────────────────────────────────┐
//! │  Service Layer (services/)                                │
//! │  - Session, categorization, rendering                     │
//! │  - Export job tracking                                    │
//! └───────────────────┬──────────────────────────────────────┘
//!                     │
//! ┌───────────────────▼──────────────────────────────────────┐
//! │  Export Layer (export/)                                   │
//! │  - CSV serialization                                      │
//! │  - Spaced-out deliveries to an artifact sink              │
//! └──────────────────────────────────────────────────────────┘
//! ```

pub mod dto;
pub mod error;
pub mod handlers;
pub mod router;
pub mod state;

pub use router::create_router;
pub use state::AppState;
