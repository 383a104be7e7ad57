//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! All subsystems produce:
//!     → logging.rs (structured log events via `tracing`)
//!     → metrics.rs (counters and gauges via the `metrics` facade)
//!
//! Consumers:
//!     → fmt subscriber on stderr (CLI, embedding applications)
//!     → whatever metrics recorder the embedding application installs
//! ```
//!
//! # Design Decisions
//! - The library only emits; installing subscribers and recorders is the binary's job
//! - Lookups log at trace level only, they are the hot path
//! - Metrics are cheap: without a recorder every call is a no-op

pub mod logging;
pub mod metrics;
