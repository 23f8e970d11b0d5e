//! Error types for the RAID monitor
//!
//! Provides structured error types for controller invocation, output
//! evaluation, and configuration.

use crate::domain::ports::ControllerSpec;
use thiserror::Error;

/// Unified error type for the monitor
#[derive(Error, Debug)]
pub enum Error {
    // =========================================================================
    // Internal Errors
    // =========================================================================
    #[error("Internal error: {0}")]
    Internal(String),

    // =========================================================================
    // Configuration Errors
    // =========================================================================
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Unrecognized controller kind: {0}")]
    UnrecognizedControllerKind(String),

    // =========================================================================
    // Invocation Errors
    // =========================================================================
    #[error("Vendor tool not found: {tool}")]
    BinaryNotFound { tool: String },

    #[error("Vendor tool failed: {tool} - {reason}")]
    Invocation { tool: String, reason: String },

    // =========================================================================
    // Evaluation Errors
    // =========================================================================
    #[error("No recognizable data lines in output of controller {spec}")]
    EmptyOutput { spec: ControllerSpec },

    // =========================================================================
    // IO Errors
    // =========================================================================
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Check if this error means the controller could not be checked at all,
    /// as opposed to a problem with what it reported.
    pub fn is_invocation_failure(&self) -> bool {
        matches!(
            self,
            Error::BinaryNotFound { .. } | Error::Invocation { .. } | Error::Io(_)
        )
    }

    /// Check if this error should abort startup before any controller is
    /// contacted.
    pub fn is_configuration_failure(&self) -> bool {
        matches!(
            self,
            Error::Configuration(_) | Error::UnrecognizedControllerKind(_)
        )
    }
}

/// Result type alias for the monitor
pub type Result<T> = std::result::Result<T, Error>;
