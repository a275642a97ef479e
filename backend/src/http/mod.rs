//! HTTP server module.
//!
//! This module provides an axum-based HTTP server that serves the dashboard
//! pages, the upload endpoint and the JSON session API used by the page
//! script.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │  HTTP Layer (axum handlers, minijinja pages)              │
//! │  - Request parsing and validation                         │
//! │  - JSON / HTML rendering                                  │
//! │  - CORS, compression, static files, error handling        │
//! └───────────────────┬──────────────────────────────────────┘
//!                     │
//! ┌───────────────────▼──────────────────────────────────────┐
//! │  Gateway + Service Layer                                  │
//! │  - Reference and upload validation                        │
//! │  - Sessions, encoding pipeline, view building             │
//! └───────────────────┬──────────────────────────────────────┘
//!                     │
//! ┌───────────────────▼──────────────────────────────────────┐
//! │  Storage Layer                                            │
//! │  - FsDatasetStore / MemoryDatasetStore                    │
//! └──────────────────────────────────────────────────────────┘
//! ```

pub mod dto;
pub mod error;
pub mod handlers;
pub mod pages;
pub mod router;
pub mod state;

pub use router::create_router;
pub use state::AppState;
