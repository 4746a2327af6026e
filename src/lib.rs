//! Core library for the `rankcard` CLI.
//!
//! This crate provides the building blocks used by the binary: metric
//! catalogues and percentile rows, the percentile-rank chart renderer with
//! SVG/PNG export, percentile sources (stats backend over HTTP or JSON
//! files), CLI argument types and configuration parsing. The primary
//! user-facing interface is the `rankcard` command-line application.
pub mod args;
pub mod charts;
pub mod config;
pub mod error;
pub mod fetch;
pub mod metrics;
