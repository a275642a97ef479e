//! # mvMapper
//!
//! Multivariate data explorer: a crossfilter scatter plot linked to a
//! geographic map, served over HTTP.
//!
//! The server does not draw anything itself. For every interaction it
//! recomputes the per-row encodings (plot coordinates, marker color and
//! size, map coordinates) and returns a serializable scene description that
//! the browser renders.
//!
//! ## Architecture
//!
//! - [`parsing`]: CSV loading, type inference and missing-value handling
//! - [`models`]: datasets, column classification and encoding selections
//! - [`services`]: quantile binning, the encoding pipeline, view building
//!   and per-session state
//! - [`storage`]: the data directory, server and dashboard configuration
//! - [`gateway`]: page parameter validation, uploads and the help page
//! - [`api`]: Data Transfer Objects (DTOs) for HTTP responses
//! - [`http`]: Axum-based HTTP server and request handlers
//!
//! ## Data flow
//!
//! ```text
//! UI event ─▶ SessionStore ─▶ encode ─▶ build_dashboard ─▶ DashboardView
//!                 ▲
//! upload / ?c=&d= ─┴── gateway ─▶ DatasetStore ─▶ parse_dataset
//! ```

pub mod api;
pub mod gateway;
pub mod models;
pub mod parsing;
pub mod routes;
pub mod services;
pub mod storage;

#[cfg(feature = "http-server")]
pub mod http;
