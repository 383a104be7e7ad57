//! User-agent classification against the browscap capability dataset.
//!
//! A [`Catalog`] compiles every wildcard pattern of the dataset into a
//! [`PatternIndex`](pattern::PatternIndex) and keeps one capability record per
//! pattern. The [`Browscap`] facade owns the installed catalog, swaps it
//! atomically on reload and answers lookups.

// Core subsystems
pub mod catalog;
pub mod pattern;
pub mod record;
pub mod service;

// Cross-cutting concerns
pub mod config;
pub mod observability;

pub use catalog::{BuildError, Catalog, Entry};
pub use config::BrowscapConfig;
pub use record::Capabilities;
pub use service::{Browscap, BrowserMatch, ServiceError};
