//! Climate observation API server.
//!
//! A small read-only HTTP service over a pre-loaded SQLite snapshot of
//! Hawaii weather-station measurements.

pub mod domain;
pub mod store;
pub mod web;
