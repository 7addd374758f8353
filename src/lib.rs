//! # Assay Monitor
//!
//! Aggregation backend for a PCR assay validation dashboard.
//!
//! This crate loads the JSON resources a sequence-analysis pipeline
//! publishes for a set of diagnostic assays (per-assay mismatch tallies
//! against a genome corpus, geo/date rollups, genome metadata, a
//! phylogenetic tree) and derives the dashboard's views: the summary
//! table, the top-assays ranking, month and country breakdowns, map
//! markers and on-demand per-(assay, genome) match details. The backend
//! exposes a REST API via Axum for the dashboard frontend.
//!
//! ## Features
//!
//! - **Resource Loading**: one startup fetch per named resource, over
//!   HTTP or from a local data directory, degrading per resource
//! - **Classification**: a single mismatch-count bucket classifier
//!   shared by every view
//! - **Aggregation**: summary, breakdown and map projections computed
//!   as pure functions of the loaded snapshots
//! - **Detail Fetching**: asynchronous per-(assay, genome) record
//!   lookups behind a superseding single-entry cache
//! - **HTTP API**: RESTful endpoints for frontend integration
//!
//! ## Architecture
//!
//! The crate is organized into several logical modules:
//!
//! - [`api`]: Data Transfer Objects (DTOs) for API responses
//! - [`resources`]: resource fetching, wire models and the loaded store
//! - [`models`]: mismatch buckets and calendar-date handling
//! - [`services`]: derivations from resource snapshots to view data
//! - [`http`]: Axum-based HTTP server and request handlers

pub mod api;
pub mod config;
pub mod format;
pub mod models;

pub mod resources;

pub mod services;

#[cfg(feature = "http-server")]
pub mod http;
