//! Controller Evaluator
//!
//! Reduces the raw output of one controller invocation to a
//! [`ControllerReport`]: parse every line, keep the records in output
//! order, and AND-reduce their health flags into one verdict.

use crate::domain::ports::{ControllerKind, ControllerReport, HealthRecord, RawInvocation};
use crate::error::{Error, Result};
use crate::raid::{megaraid, threeware};
use tracing::debug;

/// Verdict line for a clean report.
pub const HEALTHY_SUMMARY: &str = "No issues detected.";

/// Verdict line when any unit or drive is outside its healthy vocabulary.
pub const PROBLEM_SUMMARY: &str = "RAID status problematic.";

impl ControllerKind {
    /// Parse one raw output line for this controller family.
    ///
    /// Adding a vendor means adding one enum variant and one parser
    /// module behind this dispatch.
    pub fn parse_line(&self, controller: u32, line: &str) -> Option<HealthRecord> {
        match self {
            ControllerKind::MegaRaid => megaraid::parse_line(controller, line),
            ControllerKind::ThreeWare => threeware::parse_line(line),
        }
    }
}

/// Evaluate one controller invocation.
///
/// Fails with [`Error::EmptyOutput`] when no line parses into a record:
/// absence of evidence is never evidence of health.
pub fn evaluate(invocation: &RawInvocation) -> Result<ControllerReport> {
    let spec = invocation.spec;

    let records: Vec<HealthRecord> = invocation
        .lines
        .iter()
        .filter_map(|line| spec.kind.parse_line(spec.controller, line))
        .collect();

    if records.is_empty() {
        return Err(Error::EmptyOutput { spec });
    }

    let overall_healthy = records.iter().all(|r| r.healthy);
    let summary = if overall_healthy {
        HEALTHY_SUMMARY
    } else {
        PROBLEM_SUMMARY
    };

    debug!(
        "Evaluated controller {}: {} records, healthy={}",
        spec,
        records.len(),
        overall_healthy
    );

    Ok(ControllerReport {
        spec,
        records,
        overall_healthy,
        summary: summary.to_string(),
    })
}
