//! Log Report Sink
//!
//! Renders health reports through `tracing`, one line per unit/drive
//! record plus a completion line per controller. Healthy records log at
//! info, unhealthy ones at warn, controllers that could not be checked
//! at error.

use crate::domain::ports::{
    AggregateReport, ControllerReport, ControllerSpec, HealthRecord, ReportSink,
};
use crate::error::Error;
use async_trait::async_trait;
use tracing::{error, info, warn};

/// Report sink writing through the process-wide tracing subscriber
#[derive(Debug, Default)]
pub struct LogSink;

impl LogSink {
    pub fn new() -> Self {
        Self
    }
}

/// One status line per record, in the syslog-friendly shape operators
/// grep for.
fn record_line(spec: &ControllerSpec, record: &HealthRecord) -> String {
    match &record.progress {
        Some(progress) => format!(
            "Controller: {}, {} {}: Status: {}, Completion: {}",
            spec, record.unit_type, record.id, record.status, progress
        ),
        None => format!(
            "Controller: {}, {} {}: Status: {}",
            spec, record.unit_type, record.id, record.status
        ),
    }
}

#[async_trait]
impl ReportSink for LogSink {
    async fn controller_report(&self, report: &ControllerReport) {
        for record in &report.records {
            let line = record_line(&report.spec, record);
            if record.healthy {
                info!("{}", line);
            } else {
                warn!("{}", line);
            }
        }

        if report.overall_healthy {
            info!(
                "Check completed for controller {}. {}",
                report.spec, report.summary
            );
        } else {
            warn!(
                "Check completed for controller {}. {}",
                report.spec, report.summary
            );
        }
    }

    async fn controller_failed(&self, spec: &ControllerSpec, err: &Error) {
        error!("Check failed for controller {}: {}", spec, err);
    }

    async fn aggregate_report(&self, report: &AggregateReport) {
        if report.any_unhealthy {
            warn!(
                "RAID check finished: {} controller(s) reported, {} could not be checked, attention required",
                report.reports.len(),
                report.failures.len()
            );
        } else {
            info!(
                "RAID check finished: all {} controller(s) healthy",
                report.reports.len()
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::{ControllerKind, UnitType};

    #[test]
    fn test_record_line_without_progress() {
        let spec = ControllerSpec::new(ControllerKind::ThreeWare, 4);
        let record = HealthRecord {
            unit_type: UnitType::Drive,
            id: "p0".to_string(),
            status: "OK".to_string(),
            progress: None,
            healthy: true,
        };

        assert_eq!(
            record_line(&spec, &record),
            "Controller: 3ware/c4, Drive p0: Status: OK"
        );
    }

    #[test]
    fn test_record_line_with_progress() {
        let spec = ControllerSpec::new(ControllerKind::ThreeWare, 4);
        let record = HealthRecord {
            unit_type: UnitType::Unit,
            id: "u0".to_string(),
            status: "REBUILDING".to_string(),
            progress: Some("42%".to_string()),
            healthy: true,
        };

        assert_eq!(
            record_line(&spec, &record),
            "Controller: 3ware/c4, Unit u0: Status: REBUILDING, Completion: 42%"
        );
    }
}
