//! 3ware Line Parser
//!
//! Parses the unit and port tables printed by `tw_cli info c<n>`. Data
//! rows start with `u` (unit) or `p` (port/drive); header lines are
//! capitalized and fall through. One invocation targets exactly one
//! controller, so no per-line controller filtering is needed.

use crate::domain::ports::{ControllerKind, HealthRecord, UnitType};
use crate::raid::vocabulary;

/// Column offsets in the whitespace-split row. tw_cli fields are
/// position-dependent, not name-delimited; verified against tw_cli 9.x
/// `info` output.
const UNIT_STATUS_FIELD: usize = 2;
const UNIT_PROGRESS_FIELD: usize = 3;
const DRIVE_STATUS_FIELD: usize = 1;

/// Parse one line of tw_cli output.
///
/// Returns `None` for anything that is not a unit or drive row. Unknown
/// status tokens still produce a record, with `healthy = false`.
pub fn parse_line(line: &str) -> Option<HealthRecord> {
    match line.chars().next() {
        Some('u') => parse_unit_row(line),
        Some('p') => parse_drive_row(line),
        _ => None,
    }
}

fn parse_unit_row(line: &str) -> Option<HealthRecord> {
    let fields: Vec<&str> = line.split_whitespace().collect();
    let id = *fields.first()?;
    let status = *fields.get(UNIT_STATUS_FIELD)?;

    // %RCmpl is only meaningful while the unit rebuilds; captured
    // verbatim, the token format varies across firmware revisions.
    let progress = if status == "REBUILDING" {
        fields.get(UNIT_PROGRESS_FIELD).map(|p| p.to_string())
    } else {
        None
    };

    Some(HealthRecord {
        unit_type: UnitType::Unit,
        id: id.to_string(),
        status: status.to_string(),
        progress,
        healthy: vocabulary::is_healthy(ControllerKind::ThreeWare, UnitType::Unit, status),
    })
}

fn parse_drive_row(line: &str) -> Option<HealthRecord> {
    let fields: Vec<&str> = line.split_whitespace().collect();
    let id = *fields.first()?;
    let status = *fields.get(DRIVE_STATUS_FIELD)?;

    Some(HealthRecord {
        unit_type: UnitType::Drive,
        id: id.to_string(),
        status: status.to_string(),
        progress: None,
        healthy: vocabulary::is_healthy(ControllerKind::ThreeWare, UnitType::Drive, status),
    })
}
