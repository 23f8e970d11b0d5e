//! Adapters Module
//!
//! Concrete implementations of the domain ports: subprocess invocation of
//! the vendor tools and log-based report delivery.

pub mod runner;
pub mod sink;

pub use runner::*;
pub use sink::*;
