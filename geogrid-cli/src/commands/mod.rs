//! CLI command implementations.
//!
//! Each subcommand has its own module with argument definitions and handlers.
//!
//! # Command Modules
//!
//! - [`tile`] - XYZ tile decode and encode
//! - [`mgrs`] - MGRS reference decode and encode
//! - [`convert`] - Conversion between any two formats
//! - [`bounds`] - Extent of a geometry
//! - [`config`] - Configuration management (get, set, list, path)

pub mod bounds;
pub mod common;
pub mod config;
pub mod convert;
pub mod mgrs;
pub mod tile;
