//! Domain Module
//!
//! Core domain types and the port traits that bound the monitor.

pub mod ports;
