//! MegaRAID Line Parser
//!
//! Parses rows of the fixed-width topology table printed by
//! `storcli64 /c<n> show`. A data row for controller `n` starts with the
//! space-padded prefix `" n n"` (drive group and array column); all other
//! lines (headers, separators, rows of other controllers) are ignored.

use crate::domain::ports::{ControllerKind, HealthRecord, UnitType};
use crate::raid::vocabulary;

/// Column offsets in the whitespace-split row. storcli does not label
/// fields, so these are position-dependent on the table layout.
const TYPE_FIELD: usize = 5;
const STATUS_FIELD: usize = 6;
const UNIT_ID_FIELD: usize = 1;
const DRIVE_ID_FIELD: usize = 2;

/// Marker in the type column for physical-drive rows.
const DRIVE_MARKER: &str = "DRIVE";

/// Parse one line of storcli output for the given controller number.
///
/// Returns `None` for anything that is not a data row of this controller.
/// Unknown status tokens still produce a record, with `healthy = false`.
pub fn parse_line(controller: u32, line: &str) -> Option<HealthRecord> {
    let prefix = format!(" {0} {0}", controller);
    if !line.starts_with(&prefix) {
        return None;
    }

    let fields: Vec<&str> = line.split_whitespace().collect();
    let status = *fields.get(STATUS_FIELD)?;

    let (unit_type, id) = if fields[TYPE_FIELD] == DRIVE_MARKER {
        (UnitType::Drive, fields[DRIVE_ID_FIELD])
    } else {
        (UnitType::Unit, fields[UNIT_ID_FIELD])
    };

    Some(HealthRecord {
        unit_type,
        id: id.to_string(),
        status: status.to_string(),
        // storcli's table format does not expose rebuild progress
        progress: None,
        healthy: vocabulary::is_healthy(ControllerKind::MegaRaid, unit_type, status),
    })
}
