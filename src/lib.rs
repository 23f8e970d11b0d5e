//! raidmon - RAID Controller Health Monitor
//!
//! Invokes vendor diagnostic tools, parses their heterogeneous text
//! output into a normalized per-unit/per-drive health model, and
//! aggregates per-controller results into a single pass/fail verdict.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                        RaidMonitor                           │
//! │         (fan-out, error isolation, ordered output)           │
//! ├──────────────────────────────────────────────────────────────┤
//! │   CommandRunner port            Controller Evaluator         │
//! │   ┌───────────────┐     ┌──────────────┬────────────────┐    │
//! │   │   CliRunner   │ ──▶ │ Line Parsers │   Vocabulary   │    │
//! │   │ storcli/tw_cli│     │megaraid/3ware│  (fail-closed) │    │
//! │   └───────────────┘     └──────────────┴────────────────┘    │
//! ├──────────────────────────────────────────────────────────────┤
//! │   ReportSink port (LogSink: per-record status via tracing)   │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Modules
//!
//! - [`raid`]: vocabulary, line parsers, evaluator, and aggregator
//! - [`adapters`]: subprocess runner and log sink implementations
//! - [`domain`]: core model types and port traits
//! - [`error`]: error types and handling

pub mod adapters;
pub mod domain;
pub mod error;
pub mod raid;

// Re-export commonly used types
pub use adapters::{CliRunner, LogSink, RunnerConfig};

pub use domain::ports::{
    AggregateReport, CommandRunner, CommandRunnerRef, ControllerFailure, ControllerKind,
    ControllerReport, ControllerSpec, HealthRecord, RawInvocation, ReportSink, ReportSinkRef,
    UnitType,
};

pub use error::{Error, Result};

pub use raid::{evaluate, is_healthy, RaidMonitor, DEFAULT_CONCURRENCY};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");
