//! Domain Ports - Core types and trait definitions for the RAID monitor
//!
//! These traits define the boundaries between the health-evaluation logic
//! and external systems. Adapters implement these traits to provide
//! concrete functionality (subprocess invocation, log delivery).

use crate::error::{Error, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use std::sync::Arc;

// =============================================================================
// Controller Addressing
// =============================================================================

/// Supported RAID controller families
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ControllerKind {
    /// Broadcom/LSI MegaRAID, queried through storcli
    MegaRaid,
    /// 3ware/AMCC, queried through tw_cli
    ThreeWare,
}

impl std::fmt::Display for ControllerKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ControllerKind::MegaRaid => write!(f, "megaraid"),
            ControllerKind::ThreeWare => write!(f, "3ware"),
        }
    }
}

impl FromStr for ControllerKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "megaraid" => Ok(ControllerKind::MegaRaid),
            "3ware" | "threeware" => Ok(ControllerKind::ThreeWare),
            other => Err(Error::UnrecognizedControllerKind(other.to_string())),
        }
    }
}

/// A single controller to check: vendor family plus numeric index
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ControllerSpec {
    /// Controller family
    pub kind: ControllerKind,
    /// Controller number as the vendor tool addresses it (c0, c4, ...)
    pub controller: u32,
}

impl ControllerSpec {
    pub fn new(kind: ControllerKind, controller: u32) -> Self {
        Self { kind, controller }
    }
}

impl std::fmt::Display for ControllerSpec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/c{}", self.kind, self.controller)
    }
}

impl FromStr for ControllerSpec {
    type Err = Error;

    /// Parse a `kind:index` pair as given on the command line,
    /// e.g. `megaraid:0` or `3ware:4`.
    fn from_str(s: &str) -> Result<Self> {
        let (kind, index) = s.split_once(':').ok_or_else(|| {
            Error::Configuration(format!(
                "Invalid controller '{}': expected <kind>:<index>",
                s
            ))
        })?;

        let kind = kind.parse::<ControllerKind>()?;
        let controller = index.parse::<u32>().map_err(|_| {
            Error::Configuration(format!("Invalid controller index '{}' in '{}'", index, s))
        })?;

        Ok(Self { kind, controller })
    }
}

// =============================================================================
// Health Model
// =============================================================================

/// Whether a record describes a logical array or a physical disk slot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnitType {
    /// A RAID logical volume/array
    Unit,
    /// A single physical disk slot
    Drive,
}

impl std::fmt::Display for UnitType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UnitType::Unit => write!(f, "Unit"),
            UnitType::Drive => write!(f, "Drive"),
        }
    }
}

/// Raw output of one controller invocation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawInvocation {
    /// Which controller produced this output
    pub spec: ControllerSpec,
    /// Tool output, split into lines, in original order
    pub lines: Vec<String>,
}

/// Health state of one unit or drive, derived from one output line
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthRecord {
    /// Row kind
    pub unit_type: UnitType,
    /// Unit/drive identifier as the vendor names it
    pub id: String,
    /// Raw status token from the vendor output
    pub status: String,
    /// Rebuild completion token, verbatim (e.g. "42%"), when rebuilding
    pub progress: Option<String>,
    /// Whether `status` is in the vendor's healthy vocabulary
    pub healthy: bool,
}

impl HealthRecord {
    /// Numeric view of `progress`, if the vendor token parses as a
    /// percentage. Tolerates trailing `%` and returns `None` for any
    /// other artifact ("-", firmware oddities, out-of-range values).
    pub fn progress_percent(&self) -> Option<u8> {
        let raw = self.progress.as_deref()?;
        let digits = raw.strip_suffix('%').unwrap_or(raw);
        let value = digits.trim().parse::<u8>().ok()?;
        (value <= 100).then_some(value)
    }
}

/// Evaluated health of one controller
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ControllerReport {
    /// Which controller this report covers
    pub spec: ControllerSpec,
    /// Per-unit/per-drive records, in vendor output order
    pub records: Vec<HealthRecord>,
    /// AND-reduction over all records' `healthy`
    pub overall_healthy: bool,
    /// Fixed human-readable verdict line
    pub summary: String,
}

/// A controller that could not be evaluated at all
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ControllerFailure {
    /// Which controller failed
    pub spec: ControllerSpec,
    /// Rendered error
    pub error: String,
}

/// Combined result of one polling cycle over all configured controllers
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AggregateReport {
    /// Reports for controllers that were evaluated, in caller order
    pub reports: Vec<ControllerReport>,
    /// Controllers that could not be evaluated, in caller order
    pub failures: Vec<ControllerFailure>,
    /// True if any report is unhealthy or any controller failed
    pub any_unhealthy: bool,
}

// =============================================================================
// Command Runner Port
// =============================================================================

/// Port for invoking a vendor diagnostic tool against one controller
#[async_trait]
pub trait CommandRunner: Send + Sync {
    /// Run the vendor tool for the given controller and capture its output.
    ///
    /// Implementations must report a missing binary as
    /// [`Error::BinaryNotFound`] and a non-zero exit as
    /// [`Error::Invocation`], distinct from a successful invocation whose
    /// content turns out unhealthy.
    async fn invoke(&self, spec: ControllerSpec) -> Result<RawInvocation>;
}

// =============================================================================
// Report Sink Port
// =============================================================================

/// Port for delivering evaluation results
///
/// The monitor never writes logs, files, or network messages itself; all
/// reporting flows through this trait.
#[async_trait]
pub trait ReportSink: Send + Sync {
    /// Called once per evaluated controller, as each completes.
    async fn controller_report(&self, report: &ControllerReport);

    /// Called once per controller that could not be evaluated.
    async fn controller_failed(&self, spec: &ControllerSpec, error: &Error);

    /// Called once per polling cycle with the combined verdict.
    async fn aggregate_report(&self, report: &AggregateReport);
}

// =============================================================================
// Type Aliases for Arc'd Traits
// =============================================================================

pub type CommandRunnerRef = Arc<dyn CommandRunner>;
pub type ReportSinkRef = Arc<dyn ReportSink>;
