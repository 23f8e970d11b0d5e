//! Status Vocabulary
//!
//! Defines, per controller family, which raw status tokens count as
//! healthy. Anything outside the vocabulary is unhealthy (fail-closed);
//! unknown tokens must surface as problems, never pass.

use crate::domain::ports::{ControllerKind, UnitType};

/// Healthy MegaRAID states: Online, Optimal, Rebuilding.
const MEGARAID_HEALTHY: &[&str] = &["Onln", "Optl", "Rbld"];

/// Healthy 3ware unit states. REBUILDING and VERIFYING are in-progress
/// states that apply to units, not individual drives.
const THREEWARE_UNIT_HEALTHY: &[&str] = &["OK", "REBUILDING", "VERIFYING"];

/// Healthy 3ware drive states.
const THREEWARE_DRIVE_HEALTHY: &[&str] = &["OK"];

/// Check whether a raw status token counts as healthy for the given
/// controller family and row kind. Matching is exact; vendor tools emit
/// fixed casing.
pub fn is_healthy(kind: ControllerKind, unit_type: UnitType, token: &str) -> bool {
    let vocabulary = match (kind, unit_type) {
        (ControllerKind::MegaRaid, _) => MEGARAID_HEALTHY,
        (ControllerKind::ThreeWare, UnitType::Unit) => THREEWARE_UNIT_HEALTHY,
        (ControllerKind::ThreeWare, UnitType::Drive) => THREEWARE_DRIVE_HEALTHY,
    };

    vocabulary.contains(&token)
}
